//! JSON output format for analysis results

use crate::analysis::NgramAnalysis;
use crate::report::Report;
use crate::sequence::RankedNgram;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Window statistics for one length
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonWindowSummary {
    /// Window length
    pub length: usize,
    /// Windows left after split filtering
    pub windows: usize,
    /// Distinct/total window ratio
    pub coverage: f64,
    /// Ranked set with occurrence counts
    pub ranked: Vec<RankedNgram>,
}

/// Complete analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    /// Cleaned stream length in characters
    pub stream_length: usize,
    pub top_n: usize,
    pub n_grams: JsonWindowSummary,
    pub m_grams: JsonWindowSummary,
    /// Row-major counts: `matrix[i][j]` is n-gram `i` followed by m-gram `j`
    pub matrix: Vec<Vec<u64>>,
}

impl JsonReport {
    pub fn from_analysis(analysis: &NgramAnalysis) -> Self {
        let table = &analysis.adjacency;

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            stream_length: analysis.stream.len(),
            top_n: analysis.top_n,
            n_grams: JsonWindowSummary {
                length: analysis.n,
                windows: analysis.n_windows,
                coverage: analysis.coverage_n(),
                ranked: analysis.n_ranked.clone(),
            },
            m_grams: JsonWindowSummary {
                length: analysis.m,
                windows: analysis.m_windows,
                coverage: analysis.coverage_m(),
                ranked: analysis.m_ranked.clone(),
            },
            matrix: (0..table.n_grams().len())
                .map(|row| table.row(row).to_vec())
                .collect(),
        }
    }
}

/// JSON formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOutput;

impl Report for JsonOutput {
    fn render(&self, analysis: &NgramAnalysis) -> Result<String> {
        serde_json::to_string_pretty(&JsonReport::from_analysis(analysis))
            .context("Failed to serialize JSON report")
    }
}
