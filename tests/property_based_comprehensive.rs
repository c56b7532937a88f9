//! Property-based tests for the character n-gram engine
//!
//! Core properties tested:
//! 1. Normalization idempotence
//! 2. Extraction length and split exclusion
//! 3. Ranking determinism and ordering
//! 4. Adjacency completeness and agreement with a literal re-scan

use charmatrix::config::{AnalysisConfig, CharSet};
use charmatrix::sequence::{
    count_adjacency, count_ngrams, extract_ngrams, normalize, rank_ngrams, CleanedStream, NGram,
};
use proptest::prelude::*;

fn naive_adjacency(chars: &[char], a: &[char], b: &[char]) -> u64 {
    let mut count = 0;
    for p in 0..chars.len() {
        let end = p + a.len();
        if end > chars.len() || chars[p..end] != *a {
            continue;
        }
        if end + b.len() <= chars.len() && chars[end..end + b.len()] == *b {
            count += 1;
        }
    }
    count
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_normalize_idempotent(
        text in "[a-eA-E .,\n]{0,60}",
        case_sensitive in any::<bool>(),
    ) {
        // Property: replacement output is allowed, so a second pass changes nothing
        let config = AnalysisConfig {
            allowed_characters: CharSet::from("abcde_"),
            characters_to_replace: CharSet::from(".,"),
            replacement_character: '_',
            characters_to_skip: CharSet::from("\n"),
            case_sensitive,
            ..AnalysisConfig::default()
        };

        let once = normalize(&text, &config);
        let twice = normalize(&once.to_string(), &config);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_extract_length_without_split(text in "[a-d]{0,40}", n in 1usize..6) {
        let stream = CleanedStream::from(text.as_str());
        let windows = extract_ngrams(&stream, n, &CharSet::new());

        prop_assert_eq!(windows.len(), (stream.len() + 1).saturating_sub(n));
        prop_assert!(windows.iter().all(|w| w.chars().count() == n));
    }

    #[test]
    fn prop_split_windows_excluded(text in "[ab|]{0,40}", n in 1usize..5) {
        let stream = CleanedStream::from(text.as_str());
        let split = CharSet::from("|");
        let all = extract_ngrams(&stream, n, &CharSet::new());
        let kept = extract_ngrams(&stream, n, &split);

        let excluded = all.iter().filter(|w| w.contains('|')).count();
        prop_assert!(kept.iter().all(|w| !w.contains('|')));
        prop_assert_eq!(kept.len(), all.len() - excluded);
    }

    #[test]
    fn prop_rank_deterministic_and_ordered(
        grams in prop::collection::vec("[a-e]{2}", 0..60),
        top_n in 0usize..10,
    ) {
        let first = rank_ngrams(&grams, top_n);
        let second = rank_ngrams(&grams, top_n);
        prop_assert_eq!(&first, &second);

        prop_assert!(first.len() <= top_n);
        prop_assert!(first.windows(2).all(|pair| pair[0].count >= pair[1].count));

        // Counts are true occurrence counts
        for entry in &first {
            let actual = grams.iter().filter(|g| **g == entry.ngram).count();
            prop_assert_eq!(entry.count, actual);
        }
    }

    #[test]
    fn prop_rank_ties_keep_first_appearance(grams in prop::collection::vec("[a-d]", 0..40)) {
        let ranked = rank_ngrams(&grams, usize::MAX);
        let first_seen: Vec<NGram> = count_ngrams(&grams).into_iter().map(|r| r.ngram).collect();
        let position = |g: &str| first_seen.iter().position(|s| s == g);

        for pair in ranked.windows(2) {
            if pair[0].count == pair[1].count {
                prop_assert!(position(pair[0].ngram.as_str()) < position(pair[1].ngram.as_str()));
            }
        }
    }

    #[test]
    fn prop_adjacency_complete_and_exact(
        text in "[abc]{0,50}",
        n in 1usize..4,
        m in 1usize..4,
        top_n in 0usize..6,
    ) {
        let stream = CleanedStream::from(text.as_str());
        let n_grams: Vec<NGram> = rank_ngrams(&extract_ngrams(&stream, n, &CharSet::new()), top_n)
            .into_iter()
            .map(|r| r.ngram)
            .collect();
        let m_grams: Vec<NGram> = rank_ngrams(&extract_ngrams(&stream, m, &CharSet::new()), top_n)
            .into_iter()
            .map(|r| r.ngram)
            .collect();

        let table = count_adjacency(&stream, &n_grams, &m_grams, n, m);
        prop_assert_eq!(table.len(), n_grams.len() * m_grams.len());

        let chars = stream.as_chars();
        for a in &n_grams {
            let a_chars: Vec<char> = a.chars().collect();
            let occurrences = chars.windows(n).filter(|w| *w == a_chars.as_slice()).count() as u64;

            for b in &m_grams {
                let count = table.get(a, b);
                prop_assert!(count.is_some());
                let count = count.unwrap_or_default();

                prop_assert!(count <= occurrences.min(chars.len() as u64));

                let b_chars: Vec<char> = b.chars().collect();
                prop_assert_eq!(count, naive_adjacency(chars, &a_chars, &b_chars));
            }
        }
    }

    #[test]
    fn prop_analyze_never_panics(text in "\\PC{0,80}", n in 1usize..5, m in 1usize..5) {
        let config = AnalysisConfig {
            characters_to_split: CharSet::from(" "),
            case_sensitive: false,
            ..AnalysisConfig::with_windows(n, m, 5)
        };
        let analysis = charmatrix::analyze(&text, &config).unwrap();

        prop_assert!(analysis.n_ranked.len() <= 5);
        prop_assert_eq!(
            analysis.adjacency.len(),
            analysis.n_ranked.len() * analysis.m_ranked.len()
        );
    }
}
