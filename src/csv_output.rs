//! CSV output format for the n-gram / m-gram matrix
//!
//! Header row: an empty corner cell, then every m-gram. One row per n-gram: the
//! n-gram, then its adjacency counts.

use crate::analysis::NgramAnalysis;
use crate::report::Report;
use crate::sequence::AdjacencyTable;
use anyhow::Result;

/// CSV matrix formatter
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvMatrixOutput;

impl CsvMatrixOutput {
    pub fn new() -> Self {
        Self
    }

    /// Generate CSV header row from the m-grams
    fn header(table: &AdjacencyTable) -> String {
        let mut fields = vec![String::new()];
        fields.extend(table.m_grams().iter().map(|g| Self::escape_field(g)));
        fields.join(",")
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        // If field contains comma, quote, or line break, wrap in quotes and escape quotes
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Format one n-gram row
    fn format_row(table: &AdjacencyTable, row: usize) -> String {
        let mut fields = vec![Self::escape_field(&table.n_grams()[row])];
        fields.extend(table.row(row).iter().map(|count| count.to_string()));
        fields.join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(table: &AdjacencyTable) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(table));
        output.push('\n');

        for row in 0..table.n_grams().len() {
            output.push_str(&Self::format_row(table, row));
            output.push('\n');
        }

        output
    }
}

impl Report for CsvMatrixOutput {
    fn render(&self, analysis: &NgramAnalysis) -> Result<String> {
        Ok(Self::to_csv(&analysis.adjacency))
    }
}
