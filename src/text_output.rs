//! Console table output for the n-gram / m-gram matrix

use crate::analysis::NgramAnalysis;
use crate::color::{gradient, ANSI_RESET};
use crate::report::Report;
use anyhow::Result;

/// Make whitespace and control characters visible in a column label
pub fn display_label(ngram: &str) -> String {
    let mut out = String::with_capacity(ngram.len());
    for ch in ngram.chars() {
        match ch {
            ' ' => out.push('␣'),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&c.escape_unicode().to_string()),
            c => out.push(c),
        }
    }
    out
}

/// Plain-text matrix formatter
#[derive(Debug, Clone, Default)]
pub struct TextMatrixOutput {
    /// Color count cells with ANSI truecolor backgrounds
    pub color: bool,
}

impl TextMatrixOutput {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn summary(analysis: &NgramAnalysis) -> String {
        format!(
            "stream: {} chars | n={} ({} windows, coverage {:.2}) | m={} ({} windows, coverage {:.2}) | top {}\n",
            analysis.stream.len(),
            analysis.n,
            analysis.n_windows,
            analysis.coverage_n(),
            analysis.m,
            analysis.m_windows,
            analysis.coverage_m(),
            analysis.top_n
        )
    }

    fn pad(text: &str, width: usize) -> String {
        let len = text.chars().count();
        format!("{}{}", " ".repeat(width.saturating_sub(len)), text)
    }

    /// Render the matrix as an aligned table
    pub fn to_text(&self, analysis: &NgramAnalysis) -> String {
        let table = &analysis.adjacency;
        let row_labels: Vec<String> = table.n_grams().iter().map(|g| display_label(g)).collect();
        let col_labels: Vec<String> = table.m_grams().iter().map(|g| display_label(g)).collect();

        let label_width = row_labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let count_width = table.max().unwrap_or(0).to_string().len();
        let col_widths: Vec<usize> = col_labels
            .iter()
            .map(|l| l.chars().count().max(count_width))
            .collect();

        let min = table.min().unwrap_or(0);
        let max = table.max().unwrap_or(1);

        let mut output = String::new();
        output.push_str("N-gram / M-gram Combination Matrix\n");
        output.push_str(&Self::summary(analysis));
        output.push('\n');

        output.push_str(&" ".repeat(label_width));
        for (label, &width) in col_labels.iter().zip(&col_widths) {
            output.push_str("  ");
            output.push_str(&Self::pad(label, width));
        }
        output.push('\n');

        for (row, label) in row_labels.iter().enumerate() {
            output.push_str(&format!("{:<width$}", label, width = label_width));
            for (&count, &width) in table.row(row).iter().zip(&col_widths) {
                output.push_str("  ");
                let cell = Self::pad(&count.to_string(), width);
                if self.color {
                    output.push_str(&gradient(count, min, max).ansi_background());
                    output.push_str(&cell);
                    output.push_str(ANSI_RESET);
                } else {
                    output.push_str(&cell);
                }
            }
            output.push('\n');
        }

        output
    }
}

impl Report for TextMatrixOutput {
    fn render(&self, analysis: &NgramAnalysis) -> Result<String> {
        Ok(self.to_text(analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::config::AnalysisConfig;

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("a b"), "a␣b");
        assert_eq!(display_label("\n\t"), "\\n\\t");
        assert_eq!(display_label("é"), "é");
        assert_eq!(display_label("\u{7}"), "\\u{7}");
    }

    #[test]
    fn test_text_matrix_layout() {
        let analysis = analyze("aabbaabbaabb", &AnalysisConfig::with_windows(1, 1, 2)).unwrap();
        let text = TextMatrixOutput::new(false).to_text(&analysis);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "N-gram / M-gram Combination Matrix");
        assert!(lines[1].starts_with("stream: 12 chars"));
        assert_eq!(lines[3], "   a  b");
        assert_eq!(lines[4], "a  3  3");
        assert_eq!(lines[5], "b  2  3");
    }

    #[test]
    fn test_text_matrix_wide_counts() {
        let text = "ab".repeat(12);
        let analysis = analyze(&text, &AnalysisConfig::with_windows(1, 1, 2)).unwrap();
        let out = TextMatrixOutput::new(false).to_text(&analysis);
        // counts reach 12, so every column is two wide
        assert!(out.contains("a   0  12"));
    }

    #[test]
    fn test_text_matrix_color() {
        let analysis = analyze("abab", &AnalysisConfig::with_windows(1, 1, 2)).unwrap();
        let out = TextMatrixOutput::new(true).to_text(&analysis);
        assert!(out.contains("\x1b[30;48;2;"));
        assert!(out.contains(ANSI_RESET));

        let plain = TextMatrixOutput::new(false).to_text(&analysis);
        assert!(!plain.contains('\x1b'));
    }
}
