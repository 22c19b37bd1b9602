use std::path::Path;

use serde::Deserialize;

use crate::language::{LanguageProfile, LanguageRegistry};

/// Optional overlay for the built-in language registry
///
/// Deployments with nonstandard toolchain paths or extra languages supply a
/// JSON file of profiles; entries replace built-ins of the same name.
#[derive(Deserialize, Debug)]
pub struct RegistryConfig {
    pub languages: Vec<LanguageProfile>,
}

impl RegistryConfig {
    /// Load the configuration from the specified file
    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| e.into())
    }

    /// Builds a registry from the built-ins with this overlay applied.
    pub fn into_registry(self) -> LanguageRegistry {
        let mut registry = LanguageRegistry::builtin();
        for profile in self.languages {
            log::info!("language profile override: {}", profile.name);
            registry.insert(profile);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Seconds;

    #[test]
    fn test_config_deserialization() {
        let config = RegistryConfig::load("data/languages.json").unwrap();
        assert_eq!(config.languages[0].name, "python");
        assert_eq!(config.languages[0].default_time_limit, Seconds(2.0));
    }

    #[test]
    fn test_overlay_replaces_builtin() {
        let config: RegistryConfig = serde_json::from_str(
            r#"{
                "languages": [{
                    "name": "cpp",
                    "file_name": "main.cpp",
                    "compile": ["g++", "-O2", "main.cpp", "-o", "main"],
                    "run": ["./main"],
                    "default_time_limit": 1.0,
                    "max_time_limit": 8.0
                }]
            }"#,
        )
        .unwrap();

        let registry = config.into_registry();
        let cpp = registry.get("cpp").unwrap();
        assert!(cpp.compile.as_ref().unwrap().contains(&"-O2".to_string()));
        // Untouched built-ins survive the overlay
        assert!(registry.get("java").is_some());
    }
}
