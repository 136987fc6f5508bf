//! Versioned keyword table driving the event-log classifiers.
//!
//! The built-in table lives in `vocabulary.yml` at the crate root and is
//! embedded at compile time. A different table can be loaded from disk so
//! undecided keywords can be tried without touching code.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Only supported vocabulary format version
pub const VOCABULARY_VERSION: u32 = 1;

const BUILTIN_VOCABULARY: &str = include_str!("../vocabulary.yml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub version: u32,
    pub introduced: Vec<String>,
    pub committee_action: Vec<String>,
    pub passed_prefix: String,
    pub enacted: Vec<String>,
    pub substitution_marker: String,
}

impl Vocabulary {
    /// The vocabulary shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_VOCABULARY)
    }

    /// Load a vocabulary from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read vocabulary file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Parse, lower-case and validate a vocabulary
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let raw: Vocabulary = serde_yaml::from_str(contents)?;
        let vocabulary = raw.normalized();
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    fn normalized(self) -> Self {
        let lower = |list: Vec<String>| -> Vec<String> {
            list.into_iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect()
        };
        Self {
            version: self.version,
            introduced: lower(self.introduced),
            committee_action: lower(self.committee_action),
            passed_prefix: self.passed_prefix.trim().to_lowercase(),
            enacted: lower(self.enacted),
            substitution_marker: self.substitution_marker.trim().to_lowercase(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != VOCABULARY_VERSION {
            return Err(Error::Config(format!(
                "Unsupported vocabulary version {} (expected {})",
                self.version, VOCABULARY_VERSION
            )));
        }

        for (name, list) in [
            ("introduced", &self.introduced),
            ("committee_action", &self.committee_action),
            ("enacted", &self.enacted),
        ] {
            if list.is_empty() {
                return Err(Error::Config(format!(
                    "Vocabulary list '{}' must not be empty",
                    name
                )));
            }
        }

        if self.passed_prefix.is_empty() {
            return Err(Error::Config("passed_prefix must not be empty".to_string()));
        }
        if self.substitution_marker.is_empty() {
            return Err(Error::Config(
                "substitution_marker must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// True if `text` contains any of `keywords`
pub fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text.contains(k.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parses() {
        let vocab = Vocabulary::builtin().unwrap();
        assert_eq!(vocab.version, 1);
        assert_eq!(vocab.introduced, vec!["introduced"]);
        assert_eq!(vocab.committee_action.len(), 6);
        assert!(vocab
            .committee_action
            .contains(&"amend (t) and recommit".to_string()));
        // Undecided candidates stay commented out
        assert!(!vocab
            .committee_action
            .contains(&"held for consideration".to_string()));
        assert_eq!(vocab.passed_prefix, "passed");
        assert_eq!(vocab.enacted, vec!["signed"]);
        assert_eq!(vocab.substitution_marker, "substituted by");
    }

    #[test]
    fn test_custom_vocabulary_is_lowercased() {
        let yaml = r#"
version: 1
introduced: [Introduced]
committee_action: [COMMITTEE, "  Held For Consideration "]
passed_prefix: PASSED
enacted: [Signed, "Chapter"]
substitution_marker: Substituted By
"#;
        let vocab = Vocabulary::from_yaml_str(yaml).unwrap();
        assert_eq!(
            vocab.committee_action,
            vec!["committee", "held for consideration"]
        );
        assert_eq!(vocab.enacted, vec!["signed", "chapter"]);
        assert_eq!(vocab.passed_prefix, "passed");
    }

    #[test]
    fn test_rejects_unknown_version() {
        let yaml = r#"
version: 2
introduced: [introduced]
committee_action: [committee]
passed_prefix: passed
enacted: [signed]
substitution_marker: substituted by
"#;
        assert!(matches!(
            Vocabulary::from_yaml_str(yaml),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_rejects_empty_list() {
        let yaml = r#"
version: 1
introduced: [introduced]
committee_action: []
passed_prefix: passed
enacted: [signed]
substitution_marker: substituted by
"#;
        assert!(matches!(
            Vocabulary::from_yaml_str(yaml),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_contains_any() {
        let keywords = vec!["report".to_string(), "committee".to_string()];
        assert!(contains_any("reported to calendar", &keywords));
        assert!(!contains_any("introduced", &keywords));
    }
}
