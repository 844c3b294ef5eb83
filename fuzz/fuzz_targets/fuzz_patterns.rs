#![no_main]

use docwatch::domain::services::{GlobPatternMatcher, PatternMatcher};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // first line is the probe path, the rest are exclusion patterns
        let mut lines = content.lines();
        let probe = lines.next().unwrap_or_default();
        let patterns: Vec<&str> = lines.collect();

        if let Ok(matcher) = GlobPatternMatcher::new(&patterns, &[] as &[&str]) {
            let path = std::path::Path::new(probe);
            let _ = matcher.should_exclude(path);
            assert!(matcher.should_include(path));
        }
    }
});
