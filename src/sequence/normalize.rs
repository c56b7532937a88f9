use crate::config::{AnalysisConfig, CharSet};
use std::fmt;

/// Character stream produced by the normalizer
///
/// Offsets everywhere in the engine are character offsets into this stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CleanedStream {
    chars: Vec<char>,
}

impl CleanedStream {
    pub fn as_chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Window of `len` characters starting at `start`, truncated at the stream end
    pub fn window(&self, start: usize, len: usize) -> &[char] {
        let start = start.min(self.chars.len());
        let end = start.saturating_add(len).min(self.chars.len());
        &self.chars[start..end]
    }
}

impl From<&str> for CleanedStream {
    fn from(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }
}

impl From<Vec<char>> for CleanedStream {
    fn from(chars: Vec<char>) -> Self {
        Self { chars }
    }
}

impl fmt::Display for CleanedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|ch| write!(f, "{}", ch))
    }
}

/// Applies the allow/replace/skip rules of a configuration to raw text
///
/// Case folding is resolved once at construction: in case-insensitive mode every
/// character set is lowercased here and the text is lowercased per call. The split
/// set is not applied to the stream; it is carried folded for the extractor.
#[derive(Debug, Clone)]
pub struct Normalizer {
    allowed: CharSet,
    replace: CharSet,
    replacement: char,
    skip: CharSet,
    split: CharSet,
    fold_case: bool,
}

impl Normalizer {
    pub fn new(config: &AnalysisConfig) -> Self {
        let fold_case = !config.case_sensitive;
        let fold = |set: &CharSet| {
            if fold_case {
                set.to_lowercase()
            } else {
                set.clone()
            }
        };

        Self {
            allowed: fold(&config.allowed_characters),
            replace: fold(&config.characters_to_replace),
            replacement: config.replacement_character,
            skip: fold(&config.characters_to_skip),
            split: fold(&config.characters_to_split),
            fold_case,
        }
    }

    /// Split set folded the same way as the stream
    pub fn split_set(&self) -> &CharSet {
        &self.split
    }

    /// Produce the cleaned stream for `text`
    ///
    /// Allowed characters pass unchanged, replaceable ones become the replacement
    /// character, anything else passes unchanged; skipped characters are removed
    /// afterwards, so a replacement character that is also in the skip set vanishes.
    pub fn normalize(&self, text: &str) -> CleanedStream {
        let folded;
        let text = if self.fold_case {
            folded = text.to_lowercase();
            folded.as_str()
        } else {
            text
        };

        let chars = text
            .chars()
            .map(|ch| self.substitute(ch))
            .filter(|ch| !self.skip.contains(*ch))
            .collect();

        CleanedStream { chars }
    }

    fn substitute(&self, ch: char) -> char {
        if self.allowed.contains(ch) {
            ch
        } else if self.replace.contains(ch) {
            self.replacement
        } else {
            ch
        }
    }
}

/// One-shot form of [`Normalizer::normalize`]
pub fn normalize(text: &str, config: &AnalysisConfig) -> CleanedStream {
    Normalizer::new(config).normalize(text)
}
