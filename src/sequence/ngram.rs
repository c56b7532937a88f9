use crate::config::CharSet;
use crate::sequence::normalize::CleanedStream;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type alias for a character n-gram (its identity is its content, not its offset)
pub type NGram = String;

/// A distinct n-gram together with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedNgram {
    pub ngram: NGram,
    pub count: usize,
}

/// Extracts every length-`n` window of the stream, stride 1
///
/// Windows containing a character from `split` are dropped; extraction still moves
/// on one character at a time, so the windows right after the split character are
/// considered normally.
///
/// # Example
/// ```
/// use charmatrix::config::CharSet;
/// use charmatrix::sequence::{extract_ngrams, CleanedStream};
///
/// let stream = CleanedStream::from("ab cd");
/// let ngrams = extract_ngrams(&stream, 2, &CharSet::from(" "));
///
/// assert_eq!(ngrams, vec!["ab".to_string(), "cd".to_string()]);
/// ```
pub fn extract_ngrams(stream: &CleanedStream, n: usize, split: &CharSet) -> Vec<NGram> {
    let chars = stream.as_chars();

    if n == 0 || chars.len() < n {
        return Vec::new(); // Not enough characters for a single window
    }

    chars
        .windows(n)
        .filter(|window| !window.iter().any(|ch| split.contains(*ch)))
        .map(|window| window.iter().collect())
        .collect()
}

/// Counts each distinct n-gram, listed in order of first appearance
pub fn count_ngrams(ngrams: &[NGram]) -> Vec<RankedNgram> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<RankedNgram> = Vec::new();

    for ngram in ngrams {
        match index.get(ngram.as_str()) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(ngram.as_str(), counts.len());
                counts.push(RankedNgram {
                    ngram: ngram.clone(),
                    count: 1,
                });
            }
        }
    }

    counts
}

/// Find the `top_n` most frequent n-grams
///
/// Sorted by descending count; equal counts keep their first-appearance order
/// (`sort_by` is stable over the first-appearance listing of [`count_ngrams`]).
pub fn rank_ngrams(ngrams: &[NGram], top_n: usize) -> Vec<RankedNgram> {
    let mut ranked = count_ngrams(ngrams);

    // Sort by frequency (descending)
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    ranked.truncate(top_n);
    ranked
}

/// Ratio of distinct n-grams to total windows
///
/// High coverage indicates diverse text; low coverage indicates heavy repetition.
pub fn ngram_coverage(ngrams: &[NGram]) -> f64 {
    if ngrams.is_empty() {
        return 0.0;
    }

    let unique_count = count_ngrams(ngrams).len();
    unique_count as f64 / ngrams.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grams(items: &[&str]) -> Vec<NGram> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_ngrams_basic() {
        let stream = CleanedStream::from("abcd");
        let ngrams = extract_ngrams(&stream, 3, &CharSet::new());
        assert_eq!(ngrams, grams(&["abc", "bcd"]));
    }

    #[test]
    fn test_extract_ngrams_overlapping() {
        let stream = CleanedStream::from("aaaa");
        let ngrams = extract_ngrams(&stream, 2, &CharSet::new());
        assert_eq!(ngrams, grams(&["aa", "aa", "aa"]));
    }

    #[test]
    fn test_extract_ngrams_insufficient_length() {
        let stream = CleanedStream::from("ab");
        assert!(extract_ngrams(&stream, 3, &CharSet::new()).is_empty());
    }

    #[test]
    fn test_extract_ngrams_exact_length() {
        let stream = CleanedStream::from("abc");
        assert_eq!(extract_ngrams(&stream, 3, &CharSet::new()), grams(&["abc"]));
    }

    #[test]
    fn test_extract_ngrams_zero_width() {
        let stream = CleanedStream::from("abc");
        assert!(extract_ngrams(&stream, 0, &CharSet::new()).is_empty());
    }

    #[test]
    fn test_extract_ngrams_split_excludes_windows() {
        let stream = CleanedStream::from("ab|cd");
        let ngrams = extract_ngrams(&stream, 2, &CharSet::from("|"));
        // "b|" and "|c" are dropped, extraction resumes one step later
        assert_eq!(ngrams, grams(&["ab", "cd"]));
    }

    #[test]
    fn test_extract_ngrams_split_unigram() {
        let stream = CleanedStream::from("a b");
        let ngrams = extract_ngrams(&stream, 1, &CharSet::from(" "));
        assert_eq!(ngrams, grams(&["a", "b"]));
    }

    #[test]
    fn test_count_ngrams_first_appearance_order() {
        let counts = count_ngrams(&grams(&["b", "a", "b", "c", "a", "b"]));
        let order: Vec<_> = counts.iter().map(|r| r.ngram.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        assert_eq!(counts[0].count, 3);
        assert_eq!(counts[1].count, 2);
        assert_eq!(counts[2].count, 1);
    }

    #[test]
    fn test_rank_ngrams_by_frequency() {
        let ranked = rank_ngrams(&grams(&["x", "y", "y", "z", "z", "z"]), 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].ngram, "z");
        assert_eq!(ranked[0].count, 3); // Most frequent first
        assert_eq!(ranked[1].ngram, "y");
        assert_eq!(ranked[1].count, 2);
    }

    #[test]
    fn test_rank_ngrams_tie_break_first_appearance() {
        let ranked = rank_ngrams(&grams(&["q", "p", "p", "q", "r"]), 3);
        let order: Vec<_> = ranked.iter().map(|r| r.ngram.as_str()).collect();
        assert_eq!(order, vec!["q", "p", "r"]);
    }

    #[test]
    fn test_rank_ngrams_fewer_than_top_n() {
        let ranked = rank_ngrams(&grams(&["a", "b"]), 10);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_rank_ngrams_top_zero() {
        assert!(rank_ngrams(&grams(&["a", "b"]), 0).is_empty());
    }

    #[test]
    fn test_ngram_coverage() {
        // 3 unique n-grams, 3 total occurrences = 100% coverage
        assert_eq!(ngram_coverage(&grams(&["ab", "bc", "cd"])), 1.0);
    }

    #[test]
    fn test_ngram_coverage_repetitive() {
        let mut ngrams = vec!["ab".to_string(); 10];
        ngrams.push("bc".to_string());

        // 2 unique n-grams, 11 total occurrences = ~18% coverage
        let coverage = ngram_coverage(&ngrams);
        assert!((coverage - 0.181).abs() < 0.01);
    }

    #[test]
    fn test_ngram_coverage_empty() {
        assert_eq!(ngram_coverage(&[]), 0.0);
    }
}
