//! charmatrix - character n-gram frequency and adjacency analysis
//!
//! This library turns raw text into a cleaned character stream, ranks the most
//! frequent fixed-length character sequences of two lengths, and counts how often
//! each ranked n-gram is immediately followed by each ranked m-gram. Report builders
//! render the result as CSV, HTML, highlighted text, console tables or JSON.

pub mod analysis;
pub mod cli;
pub mod color;
pub mod config;
pub mod csv_output;
pub mod html_output;
pub mod json_output;
pub mod report;
pub mod sequence;
pub mod text_output;

pub use analysis::{analyze, NgramAnalysis};
pub use config::{AnalysisConfig, CharSet, ConfigError};
