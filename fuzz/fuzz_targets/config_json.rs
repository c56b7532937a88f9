#![no_main]

use charmatrix::config::AnalysisConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert arbitrary bytes to UTF-8 string
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must reject or accept, never panic
        if let Ok(config) = AnalysisConfig::from_json_str(input) {
            assert!(config.n >= 1 && config.m >= 1);
        }
    }
});
