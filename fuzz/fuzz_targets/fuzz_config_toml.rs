#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz TOML config parsing - this should never panic
        if let Ok(config) = toml::from_str::<docwatch::Config>(content) {
            let base = std::path::Path::new("/proj");
            let _ = config.tasks(base);
            let _ = config.watch_configuration(base, &base.join("doc.tex"), None);
        }
    }
});
