//! CLI argument parsing for charmatrix

use crate::config::AnalysisConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Format printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned console table (default)
    Text,
    /// CSV matrix
    Csv,
    /// JSON report
    Json,
    /// Print nothing; only write the configured files
    Quiet,
}

#[derive(Parser, Debug)]
#[command(name = "charmatrix")]
#[command(version)]
#[command(about = "Character n-gram frequency and adjacency matrix analysis", long_about = None)]
pub struct Cli {
    /// Configuration file (.json or .toml); defaults to ./config.json when present
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Text file to analyze (overrides input_file)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the CSV matrix here (overrides output_file)
    #[arg(long = "csv", value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Write the color-coded HTML matrix here (overrides output_html_file)
    #[arg(long = "html", value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Write the highlighted-text HTML here (overrides output_highlight_file)
    #[arg(long = "highlight", value_name = "FILE")]
    pub highlight: Option<PathBuf>,

    /// Write the JSON report here (overrides output_json_file)
    #[arg(long = "json", value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Row n-gram length
    #[arg(short = 'n', long = "n-length", value_name = "N")]
    pub n: Option<usize>,

    /// Column m-gram length
    #[arg(short = 'm', long = "m-length", value_name = "M")]
    pub m: Option<usize>,

    /// Number of most frequent n-grams and m-grams to keep
    #[arg(short = 'k', long = "top-n", value_name = "K")]
    pub top_n: Option<usize>,

    /// Fold text and character sets to lowercase
    #[arg(long = "ignore-case")]
    pub ignore_case: bool,

    /// Stdout format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Color matrix cells in text output
    #[arg(long = "color")]
    pub color: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut AnalysisConfig) {
        let paths = &mut config.paths;
        if let Some(ref input) = self.input {
            paths.input_file = Some(input.clone());
        }
        if let Some(ref csv) = self.csv {
            paths.output_file = Some(csv.clone());
        }
        if let Some(ref html) = self.html {
            paths.output_html_file = Some(html.clone());
        }
        if let Some(ref highlight) = self.highlight {
            paths.output_highlight_file = Some(highlight.clone());
        }
        if let Some(ref json) = self.json {
            paths.output_json_file = Some(json.clone());
        }

        if let Some(n) = self.n {
            config.n = n;
        }
        if let Some(m) = self.m {
            config.m = m;
        }
        if let Some(top_n) = self.top_n {
            config.top_n = top_n;
        }
        if self.ignore_case {
            config.case_sensitive = false;
        }
    }
}
