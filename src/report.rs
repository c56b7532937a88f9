//! Report builders consuming a finished [`NgramAnalysis`]
//!
//! Each output format is an independent consumer of the same analysis; none of them
//! touch the engine.

use crate::analysis::NgramAnalysis;
use anyhow::Result;

/// Renders an analysis into a document
pub trait Report {
    fn render(&self, analysis: &NgramAnalysis) -> Result<String>;
}
