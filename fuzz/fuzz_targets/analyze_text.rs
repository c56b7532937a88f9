#![no_main]

use charmatrix::config::{AnalysisConfig, CharSet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    // First bytes pick the window lengths and cap, the rest is the corpus
    let n = (data[0] % 6) as usize + 1;
    let m = (data[1] % 6) as usize + 1;
    let top_n = (data[2] % 32) as usize;

    if let Ok(text) = std::str::from_utf8(&data[3..]) {
        let config = AnalysisConfig {
            characters_to_replace: CharSet::from(".,;"),
            characters_to_skip: CharSet::from("\n"),
            characters_to_split: CharSet::from(" "),
            case_sensitive: data[0] & 0x80 == 0,
            ..AnalysisConfig::with_windows(n, m, top_n)
        };

        // Must never panic, and the table is always the full cross product
        let analysis = charmatrix::analyze(text, &config).unwrap();
        assert_eq!(
            analysis.adjacency.len(),
            analysis.n_ranked.len() * analysis.m_ranked.len()
        );
    }
});
