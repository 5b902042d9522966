#![no_main]

use libfuzzer_sys::fuzz_target;
use monaco::config::ProjectConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing, validation and graph construction must reject bad input
        // with an error, never a panic
        if let Ok(config) = ProjectConfig::from_yaml_str(input) {
            if let Ok(project) = config.build_project() {
                let _ = project.statistics_seeded(4, Some(0));
            }
        }
        let _ = ProjectConfig::from_toml_str(input).map(|config| config.validate());
    }
});
