//! HTML output formats
//!
//! - [`HtmlMatrixOutput`]: the n-gram / m-gram matrix with every count cell colored on
//!   the gradient spanning the table's smallest and largest count
//! - [`HtmlHighlightOutput`]: the cleaned text with occurrences of the ranked n-grams
//!   highlighted by frequency

use crate::analysis::NgramAnalysis;
use crate::color::gradient;
use crate::report::Report;
use anyhow::Result;
use std::collections::HashMap;

/// Escape HTML special characters to prevent XSS
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate embedded CSS styles
fn generate_styles() -> &'static str {
    r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        table {
            border-collapse: collapse;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: center;
            font-family: monospace;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
            white-space: pre;
        }
        .summary {
            color: #555;
            margin-bottom: 12px;
        }
        .corpus {
            font-family: monospace;
            white-space: pre-wrap;
            background-color: white;
            padding: 12px;
            line-height: 1.6;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
}

fn document_start(title: &str) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n");
    html.push_str("<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("    <title>{}</title>\n", escape_html(title)));
    html.push_str("    <style>");
    html.push_str(generate_styles());
    html.push_str("</style>\n");
    html.push_str("</head>\n");
    html.push_str("<body>\n");
    html.push_str(&format!("    <h1>{}</h1>\n", escape_html(title)));

    html
}

fn document_end() -> &'static str {
    "    <div class=\"footer\">\n        Generated by charmatrix\n    </div>\n</body>\n</html>\n"
}

fn summary_line(analysis: &NgramAnalysis) -> String {
    format!(
        "    <p class=\"summary\">{} characters &middot; n = {} ({} windows) &middot; m = {} ({} windows) &middot; top {}</p>\n",
        analysis.stream.len(),
        analysis.n,
        analysis.n_windows,
        analysis.m,
        analysis.m_windows,
        analysis.top_n
    )
}

/// Color-coded HTML matrix
#[derive(Debug, Clone)]
pub struct HtmlMatrixOutput {
    title: String,
}

impl Default for HtmlMatrixOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlMatrixOutput {
    pub fn new() -> Self {
        Self {
            title: "N-gram / M-gram Combination Matrix".to_string(),
        }
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Generate HTML table header from the m-grams
    fn generate_header(analysis: &NgramAnalysis) -> String {
        let cells: Vec<String> = analysis
            .adjacency
            .m_grams()
            .iter()
            .map(|g| format!("<th>{}</th>", escape_html(g)))
            .collect();

        format!("<tr><th></th>{}</tr>", cells.join(""))
    }

    /// Format one n-gram row with gradient-colored cells
    fn format_row(analysis: &NgramAnalysis, row: usize, min: u64, max: u64) -> String {
        let table = &analysis.adjacency;
        let mut cells = vec![format!("<th>{}</th>", escape_html(&table.n_grams()[row]))];

        for &count in table.row(row) {
            cells.push(format!(
                r#"<td style="background-color: {}">{}</td>"#,
                gradient(count, min, max).to_css(),
                count
            ));
        }

        format!("<tr>{}</tr>", cells.join(""))
    }

    /// Generate complete HTML document
    pub fn to_html(&self, analysis: &NgramAnalysis) -> String {
        let table = &analysis.adjacency;
        let min = table.min().unwrap_or(0);
        let max = table.max().unwrap_or(1);

        let mut html = document_start(&self.title);
        html.push_str(&summary_line(analysis));

        html.push_str("    <table>\n");
        html.push_str("        ");
        html.push_str(&Self::generate_header(analysis));
        html.push('\n');

        for row in 0..table.n_grams().len() {
            html.push_str("        ");
            html.push_str(&Self::format_row(analysis, row, min, max));
            html.push('\n');
        }

        html.push_str("    </table>\n");
        html.push_str(document_end());

        html
    }
}

impl Report for HtmlMatrixOutput {
    fn render(&self, analysis: &NgramAnalysis) -> Result<String> {
        Ok(self.to_html(analysis))
    }
}

/// Cleaned text with ranked n-grams highlighted
///
/// Scans left to right; where a ranked n-gram starts, it is wrapped in a colored span
/// and the scan jumps past it, so highlights never overlap. All ranked n-grams share
/// one length, so at most one can start at any offset.
#[derive(Debug, Clone)]
pub struct HtmlHighlightOutput {
    title: String,
}

impl Default for HtmlHighlightOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlHighlightOutput {
    pub fn new() -> Self {
        Self {
            title: "Highlighted N-grams".to_string(),
        }
    }

    /// Legend listing each ranked n-gram with its count and color
    fn render_legend(analysis: &NgramAnalysis, min: u64, max: u64) -> String {
        let mut html = String::new();

        html.push_str("    <h2>Ranked N-grams</h2>\n");
        html.push_str("    <table>\n");
        html.push_str("        <tr><th>rank</th><th>n-gram</th><th>count</th></tr>\n");

        for (rank, entry) in analysis.n_ranked.iter().enumerate() {
            html.push_str(&format!(
                "        <tr><td>{}</td><td style=\"background-color: {}\">{}</td><td>{}</td></tr>\n",
                rank + 1,
                gradient(entry.count as u64, min, max).to_css(),
                escape_html(&entry.ngram),
                entry.count
            ));
        }

        html.push_str("    </table>\n");
        html
    }

    /// Highlighted body text
    fn render_corpus(analysis: &NgramAnalysis, min: u64, max: u64) -> String {
        let keys: Vec<Vec<char>> = analysis
            .n_ranked
            .iter()
            .map(|r| r.ngram.chars().collect())
            .collect();
        let lookup: HashMap<&[char], usize> = keys
            .iter()
            .zip(&analysis.n_ranked)
            .map(|(key, entry)| (key.as_slice(), entry.count))
            .collect();

        let chars = analysis.stream.as_chars();
        let width = analysis.n;
        let mut html = String::from("    <div class=\"corpus\">");
        let mut buf = [0u8; 4];
        let mut i = 0;

        while i < chars.len() {
            let hit = if width > 0 && i + width <= chars.len() {
                lookup.get(&chars[i..i + width]).copied()
            } else {
                None
            };

            match hit {
                Some(count) => {
                    let text: String = chars[i..i + width].iter().collect();
                    html.push_str(&format!(
                        r#"<span style="background-color: {}" title="{}">{}</span>"#,
                        gradient(count as u64, min, max).to_css(),
                        count,
                        escape_html(&text)
                    ));
                    i += width;
                }
                None => {
                    html.push_str(&escape_html(chars[i].encode_utf8(&mut buf)));
                    i += 1;
                }
            }
        }

        html.push_str("</div>\n");
        html
    }

    pub fn to_html(&self, analysis: &NgramAnalysis) -> String {
        let counts = analysis.n_ranked.iter().map(|r| r.count as u64);
        let min = counts.clone().min().unwrap_or(0);
        let max = counts.max().unwrap_or(1);

        let mut html = document_start(&self.title);
        html.push_str(&summary_line(analysis));
        html.push_str(&Self::render_legend(analysis, min, max));
        html.push_str("    <h2>Text</h2>\n");
        html.push_str(&Self::render_corpus(analysis, min, max));
        html.push_str(document_end());

        html
    }
}

impl Report for HtmlHighlightOutput {
    fn render(&self, analysis: &NgramAnalysis) -> Result<String> {
        Ok(self.to_html(analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::config::AnalysisConfig;

    fn analysis(text: &str, n: usize, m: usize, top_n: usize) -> NgramAnalysis {
        analyze(text, &AnalysisConfig::with_windows(n, m, top_n)).unwrap()
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("\"test\""), "&quot;test&quot;");
        assert_eq!(escape_html("'test'"), "&#39;test&#39;");
    }

    #[test]
    fn test_html_matrix_basic_structure() {
        let html = HtmlMatrixOutput::new().to_html(&analysis("abcabc", 1, 1, 3));

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("<head>"));
        assert!(html.contains("<body>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("<table"));
        assert!(html.contains("N-gram / M-gram Combination Matrix"));
    }

    #[test]
    fn test_html_matrix_header_and_rows() {
        let a = analysis("abcabc", 1, 1, 3);
        let header = HtmlMatrixOutput::generate_header(&a);
        assert_eq!(header, "<tr><th></th><th>a</th><th>b</th><th>c</th></tr>");

        let html = HtmlMatrixOutput::new().to_html(&a);
        assert_eq!(html.matches("<tr><th>").count(), 4);
    }

    #[test]
    fn test_html_matrix_cell_colors() {
        // Counts: a->b = 2 is the maximum, zeros are the minimum
        let a = analysis("abcabc", 1, 1, 3);
        let row = HtmlMatrixOutput::format_row(&a, 0, 0, 2);
        assert!(row.contains(r#"<td style="background-color: rgb(255,255,0)">0</td>"#));
        assert!(row.contains(r#"<td style="background-color: rgb(255,0,0)">2</td>"#));
    }

    #[test]
    fn test_html_matrix_uniform_counts_are_red() {
        let a = analysis("ab", 1, 1, 1);
        // Single cell ("a","a") = 0, min == max
        let html = HtmlMatrixOutput::new().to_html(&a);
        assert!(html.contains("rgb(255,0,0)"));
    }

    #[test]
    fn test_html_matrix_escapes_grams() {
        let a = analysis("<<<>", 1, 1, 2);
        let html = HtmlMatrixOutput::new().to_html(&a);
        assert!(html.contains("<th>&lt;</th>"));
        assert!(html.contains("<th>&gt;</th>"));
        assert!(!html.contains("<th><</th>"));
    }

    #[test]
    fn test_html_matrix_custom_title() {
        let html = HtmlMatrixOutput::with_title("Bigrams <corpus>").to_html(&analysis("ab", 1, 1, 1));
        assert!(html.contains("<title>Bigrams &lt;corpus&gt;</title>"));
    }

    #[test]
    fn test_highlight_wraps_ranked_ngrams() {
        let a = analysis("abxab", 2, 1, 1);
        let html = HtmlHighlightOutput::new().to_html(&a);
        assert_eq!(html.matches("<span").count(), 2);
        assert!(html.contains(">ab</span>x<span"));
    }

    #[test]
    fn test_highlight_never_overlaps() {
        let a = analysis("aaaa", 2, 1, 1);
        let corpus = HtmlHighlightOutput::render_corpus(&a, 3, 3);
        assert_eq!(corpus.matches("<span").count(), 2);
    }

    #[test]
    fn test_highlight_escapes_text() {
        let a = analysis("a<b", 2, 1, 0);
        let corpus = HtmlHighlightOutput::render_corpus(&a, 0, 1);
        assert!(corpus.contains("a&lt;b"));
        assert!(!corpus.contains("<span"));
    }

    #[test]
    fn test_highlight_legend() {
        let a = analysis("ababab", 1, 1, 2);
        let legend = HtmlHighlightOutput::render_legend(&a, 3, 3);
        assert!(legend.contains("<td>1</td>"));
        assert!(legend.contains(">a</td><td>3</td>"));
        assert!(legend.contains(">b</td><td>3</td>"));
    }
}
