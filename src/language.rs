use std::collections::HashMap;

use serde::Deserialize;

/// Wall-clock seconds
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Seconds(pub f64);

/// Static per-language configuration
///
/// `file_name` carries the extension the toolchain requires; `compile` is
/// absent for interpreted languages. Commands are argv vectors resolved
/// relative to the scratch workspace, so `run` for a compiled language is the
/// produced binary path (`./main`) and for an interpreted one is
/// `<interpreter> <file_name>`.
#[derive(Deserialize, Debug, Clone)]
pub struct LanguageProfile {
    pub name: String,
    pub file_name: String,
    #[serde(default)]
    pub compile: Option<Vec<String>>,
    pub run: Vec<String>,
    pub default_time_limit: Seconds,
    pub max_time_limit: Seconds,
}

/// Registry mapping language identifiers to their profiles
///
/// Lookup is case-insensitive. Adding a language touches only the registry;
/// the Executor's control flow is language-agnostic.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    profiles: HashMap<String, LanguageProfile>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four supported language variants.
    ///
    /// Interpreted languages get shorter default limits; compiled/JVM
    /// languages get longer ones to absorb real startup overhead.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.insert(LanguageProfile {
            name: "python".to_string(),
            file_name: "main.py".to_string(),
            compile: None,
            run: argv(&["python3", "main.py"]),
            default_time_limit: Seconds(2.0),
            max_time_limit: Seconds(10.0),
        });
        registry.insert(LanguageProfile {
            name: "javascript".to_string(),
            file_name: "main.js".to_string(),
            compile: None,
            run: argv(&["node", "main.js"]),
            default_time_limit: Seconds(2.0),
            max_time_limit: Seconds(10.0),
        });
        registry.insert(LanguageProfile {
            name: "cpp".to_string(),
            file_name: "main.cpp".to_string(),
            compile: Some(argv(&["g++", "main.cpp", "-o", "main"])),
            run: argv(&["./main"]),
            default_time_limit: Seconds(4.0),
            max_time_limit: Seconds(15.0),
        });
        registry.insert(LanguageProfile {
            name: "java".to_string(),
            file_name: "Main.java".to_string(),
            compile: Some(argv(&["javac", "Main.java"])),
            run: argv(&["java", "Main"]),
            default_time_limit: Seconds(6.0),
            max_time_limit: Seconds(20.0),
        });

        registry
    }

    /// Inserts a profile, replacing any existing one with the same name.
    pub fn insert(&mut self, profile: LanguageProfile) {
        self.profiles
            .insert(profile.name.to_lowercase(), profile);
    }

    /// Case-insensitive profile lookup.
    pub fn get(&self, language: &str) -> Option<&LanguageProfile> {
        self.profiles.get(&language.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_languages_present() {
        let registry = LanguageRegistry::builtin();
        for name in ["python", "java", "cpp", "javascript"] {
            assert!(registry.get(name).is_some(), "missing profile for {name}");
        }
        assert!(registry.get("brainfuck").is_none());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = LanguageRegistry::builtin();
        assert_eq!(registry.get("PyThOn").unwrap().name, "python");
        assert_eq!(registry.get("JAVA").unwrap().file_name, "Main.java");
    }

    #[test]
    fn test_interpreted_profiles_have_no_compile_step() {
        let registry = LanguageRegistry::builtin();
        assert!(registry.get("python").unwrap().compile.is_none());
        assert!(registry.get("javascript").unwrap().compile.is_none());
        assert!(registry.get("cpp").unwrap().compile.is_some());
        assert!(registry.get("java").unwrap().compile.is_some());
    }

    #[test]
    fn test_insert_replaces_existing_profile() {
        let mut registry = LanguageRegistry::builtin();
        registry.insert(LanguageProfile {
            name: "Python".to_string(),
            file_name: "main.py".to_string(),
            compile: None,
            run: argv(&["pypy3", "main.py"]),
            default_time_limit: Seconds(1.0),
            max_time_limit: Seconds(5.0),
        });
        assert_eq!(registry.get("python").unwrap().run[0], "pypy3");
    }
}
