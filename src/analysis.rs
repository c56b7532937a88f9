//! End-to-end analysis run
//!
//! Wires the sequence engine stages together for one configuration and keeps every
//! intermediate result the report builders need.

use crate::config::{AnalysisConfig, CharSet, ConfigError};
use crate::sequence::{
    count_adjacency, extract_ngrams, ngram_coverage, rank_ngrams, AdjacencyTable, CleanedStream,
    NGram, Normalizer, RankedNgram,
};

/// Output of one run: cleaned stream, both ranked sets and the adjacency table
#[derive(Debug, Clone)]
pub struct NgramAnalysis {
    pub stream: CleanedStream,
    pub n: usize,
    pub m: usize,
    pub top_n: usize,
    pub n_ranked: Vec<RankedNgram>,
    pub m_ranked: Vec<RankedNgram>,
    pub adjacency: AdjacencyTable,
    /// Windows that survived split filtering, per length
    pub n_windows: usize,
    pub m_windows: usize,
    coverage_n: f64,
    coverage_m: f64,
}

impl NgramAnalysis {
    pub fn n_grams(&self) -> Vec<NGram> {
        self.n_ranked.iter().map(|r| r.ngram.clone()).collect()
    }

    pub fn m_grams(&self) -> Vec<NGram> {
        self.m_ranked.iter().map(|r| r.ngram.clone()).collect()
    }

    /// Distinct/total ratio of the length-`n` windows
    pub fn coverage_n(&self) -> f64 {
        self.coverage_n
    }

    /// Distinct/total ratio of the length-`m` windows
    pub fn coverage_m(&self) -> f64 {
        self.coverage_m
    }
}

/// Run normalize, extract (n and m), rank and adjacency counting over `text`
///
/// The configuration is validated first; a zero window length is rejected before any
/// work is done.
///
/// # Example
/// ```
/// use charmatrix::analysis::analyze;
/// use charmatrix::config::AnalysisConfig;
///
/// let analysis = analyze("abcabcabc", &AnalysisConfig::with_windows(1, 1, 3)).unwrap();
/// assert_eq!(analysis.n_grams(), vec!["a", "b", "c"]);
/// assert_eq!(analysis.adjacency.get("a", "b"), Some(3));
/// ```
pub fn analyze(text: &str, config: &AnalysisConfig) -> Result<NgramAnalysis, ConfigError> {
    config.validate()?;

    let normalizer = Normalizer::new(config);
    let stream = normalizer.normalize(text);
    tracing::debug!(
        input_chars = text.chars().count(),
        stream_chars = stream.len(),
        "text normalized"
    );

    let split = normalizer.split_set();
    let (n_ranked, n_windows, coverage_n) = rank_windows(&stream, config.n, split, config.top_n);
    let (m_ranked, m_windows, coverage_m) = rank_windows(&stream, config.m, split, config.top_n);

    let n_grams: Vec<NGram> = n_ranked.iter().map(|r| r.ngram.clone()).collect();
    let m_grams: Vec<NGram> = m_ranked.iter().map(|r| r.ngram.clone()).collect();
    let adjacency = count_adjacency(&stream, &n_grams, &m_grams, config.n, config.m);

    tracing::info!(
        n = config.n,
        m = config.m,
        rows = n_ranked.len(),
        cols = m_ranked.len(),
        total = adjacency.total(),
        "analysis complete"
    );

    Ok(NgramAnalysis {
        stream,
        n: config.n,
        m: config.m,
        top_n: config.top_n,
        n_ranked,
        m_ranked,
        adjacency,
        n_windows,
        m_windows,
        coverage_n,
        coverage_m,
    })
}

fn rank_windows(
    stream: &CleanedStream,
    width: usize,
    split: &CharSet,
    top_n: usize,
) -> (Vec<RankedNgram>, usize, f64) {
    if stream.len() < width {
        tracing::warn!(
            width,
            stream_chars = stream.len(),
            "stream shorter than window length"
        );
    }

    let windows = extract_ngrams(stream, width, split);
    let coverage = ngram_coverage(&windows);
    let ranked = rank_ngrams(&windows, top_n);

    tracing::debug!(width, windows = windows.len(), ranked = ranked.len(), "windows ranked");
    if ranked.len() < top_n {
        tracing::warn!(
            width,
            requested = top_n,
            available = ranked.len(),
            "fewer distinct n-grams than top_n"
        );
    }

    (ranked, windows.len(), coverage)
}
