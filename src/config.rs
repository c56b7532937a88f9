//! Analysis configuration
//!
//! One explicit value carries every knob of a run: the character-class rules used by
//! the normalizer, the split set used by the extractor, both window lengths and the
//! ranking cap. Loaded from `.json` or `.toml`, then passed by reference into each
//! stage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Errors raised while loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported config format: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Character set entries must be single characters, got {0:?}")]
    NotSingleCharacter(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A set of single characters
///
/// Deserializes from a plain string (`"abc"`, one member per character) or from an
/// array of one-character strings (`["a", "b", "c"]`). An empty set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CharSetRepr", into = "String")]
pub struct CharSet(BTreeSet<char>);

#[derive(Deserialize)]
#[serde(untagged)]
enum CharSetRepr {
    Chars(String),
    List(Vec<String>),
}

impl TryFrom<CharSetRepr> for CharSet {
    type Error = ConfigError;

    fn try_from(repr: CharSetRepr) -> Result<Self, Self::Error> {
        match repr {
            CharSetRepr::Chars(s) => Ok(s.chars().collect()),
            CharSetRepr::List(entries) => entries
                .into_iter()
                .map(|entry| {
                    let mut chars = entry.chars();
                    match (chars.next(), chars.next()) {
                        (Some(ch), None) => Ok(ch),
                        _ => Err(ConfigError::NotSingleCharacter(entry)),
                    }
                })
                .collect(),
        }
    }
}

impl From<CharSet> for String {
    fn from(set: CharSet) -> Self {
        set.0.into_iter().collect()
    }
}

impl From<&str> for CharSet {
    fn from(s: &str) -> Self {
        s.chars().collect()
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl CharSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// Lowercase every member; a member whose lowercase form spans several
    /// characters contributes all of them.
    pub fn to_lowercase(&self) -> Self {
        self.0.iter().flat_map(|ch| ch.to_lowercase()).collect()
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.0 {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

/// Input and output locations, all optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    /// Text corpus to analyze
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_file: Option<PathBuf>,

    /// CSV matrix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,

    /// Color-coded HTML matrix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_html_file: Option<PathBuf>,

    /// Cleaned text with ranked n-grams highlighted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_highlight_file: Option<PathBuf>,

    /// Machine-readable JSON report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_json_file: Option<PathBuf>,
}

/// Configuration for one analysis run
///
/// # Example
/// ```
/// use charmatrix::config::AnalysisConfig;
///
/// let config = AnalysisConfig::from_json_str(r#"{"allowed_characters": "ab", "n": 1, "m": 1}"#).unwrap();
/// assert!(config.allowed_characters.contains('a'));
/// assert_eq!(config.top_n, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Characters always kept as-is; wins over `characters_to_replace`
    pub allowed_characters: CharSet,

    /// Characters substituted with `replacement_character`
    pub characters_to_replace: CharSet,

    pub replacement_character: char,

    /// Characters deleted from the cleaned stream
    pub characters_to_skip: CharSet,

    /// Characters that disqualify any window containing them from ranking
    pub characters_to_split: CharSet,

    /// When false, text and every character set are lowercased first
    pub case_sensitive: bool,

    /// Row window length
    pub n: usize,

    /// Column window length
    pub m: usize,

    /// Maximum size of each ranked set
    pub top_n: usize,

    #[serde(flatten)]
    pub paths: OutputPaths,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            allowed_characters: CharSet::new(),
            characters_to_replace: CharSet::new(),
            replacement_character: ' ',
            characters_to_skip: CharSet::new(),
            characters_to_split: CharSet::new(),
            case_sensitive: true,
            n: 2,
            m: 2,
            top_n: 20,
            paths: OutputPaths::default(),
        }
    }
}

impl AnalysisConfig {
    /// Create a configuration with the given window lengths and cap, everything else
    /// defaulted; [`crate::analyze`] validates it before running
    pub fn with_windows(n: usize, m: usize, top_n: usize) -> Self {
        Self {
            n,
            m,
            top_n,
            ..Self::default()
        }
    }

    /// Load, parse and validate a config file; the format follows the extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let config = match extension.as_deref() {
            Some("json") => Self::from_json_str(&contents)?,
            Some("toml") => Self::from_toml_str(&contents)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        tracing::debug!(path = %path.display(), "loaded analysis config");
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n == 0 {
            return Err(ConfigError::Invalid("n must be >= 1, got 0".to_string()));
        }

        if self.m == 0 {
            return Err(ConfigError::Invalid("m must be >= 1, got 0".to_string()));
        }

        Ok(())
    }
}
