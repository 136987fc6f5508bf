use crate::error::{Error, Result};
use crate::pipeline::PipelineOptions;
use crate::vocabulary::Vocabulary;
use std::path::PathBuf;

/// States with a senate sponsor source
pub const SUPPORTED_STATES: &[&str] = &["NY"];

/// What to do with a row that cannot be classified or attributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Abort the run on the first malformed row
    #[default]
    Fail,
    /// Log the row, count it in the report and continue
    Skip,
}

impl MalformedPolicy {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(MalformedPolicy::Fail),
            "skip" => Ok(MalformedPolicy::Skip),
            other => Err(Error::Config(format!(
                "Invalid malformed-row policy '{}'. Allowed values are: fail, skip",
                other
            ))),
        }
    }
}

/// Configuration for a scoring run over on-disk datasets
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub state: String,
    pub year: u16,
    pub vocabulary_path: Option<PathBuf>,
    pub on_malformed: MalformedPolicy,
}

impl Config {
    /// Create a new default configuration
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            state: "NY".to_string(),
            year: 2023,
            vocabulary_path: None,
            on_malformed: MalformedPolicy::Fail,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_STATES.contains(&self.state.as_str()) {
            return Err(Error::UnsupportedState(self.state.clone()));
        }

        if !(1000..=9999).contains(&self.year) {
            return Err(Error::Config(format!(
                "Year must be a 4-digit integer, got {}",
                self.year
            )));
        }

        if !self.data_dir.exists() {
            return Err(Error::MissingDataDir(self.data_dir.display().to_string()));
        }

        if !self.data_dir.is_dir() {
            return Err(Error::Config(format!(
                "Data directory is not a directory: {}",
                self.data_dir.display()
            )));
        }

        if let Some(path) = &self.vocabulary_path {
            if !path.is_file() {
                return Err(Error::Config(format!(
                    "Vocabulary file does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// The configured vocabulary, or the built-in one
    pub fn vocabulary(&self) -> Result<Vocabulary> {
        match &self.vocabulary_path {
            Some(path) => Vocabulary::load(path),
            None => Vocabulary::builtin(),
        }
    }

    pub fn pipeline_options(&self) -> Result<PipelineOptions> {
        Ok(PipelineOptions {
            vocabulary: self.vocabulary()?,
            on_malformed: self.on_malformed,
        })
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::new(data_dir),
        }
    }

    /// Set the raw data directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    /// Set the state (two-letter abbreviation, case-insensitive)
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.config.state = state.into().trim().to_uppercase();
        self
    }

    /// Set the session year
    pub fn year(mut self, year: u16) -> Self {
        self.config.year = year;
        self
    }

    /// Use a custom vocabulary file
    pub fn vocabulary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.vocabulary_path = Some(path.into());
        self
    }

    pub fn on_malformed(mut self, policy: MalformedPolicy) -> Self {
        self.config.on_malformed = policy;
        self
    }

    /// Set the malformed-row policy from a string (`fail` or `skip`)
    pub fn on_malformed_str(mut self, policy: &str) -> Result<Self> {
        self.config.on_malformed = MalformedPolicy::parse(policy)?;
        Ok(self)
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("data/raw")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_normalizes_state() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigBuilder::new(dir.path())
            .state(" ny ")
            .year(2023)
            .on_malformed_str("SKIP")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.state, "NY");
        assert_eq!(config.on_malformed, MalformedPolicy::Skip);
    }

    #[test]
    fn test_unsupported_state() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigBuilder::new(dir.path()).state("CA").build();
        assert!(matches!(result, Err(Error::UnsupportedState(ref s)) if s == "CA"));
    }

    #[test]
    fn test_rejects_bad_year_and_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigBuilder::new(dir.path()).year(23).build().is_err());
        assert!(ConfigBuilder::new(dir.path().join("nope")).build().is_err());
    }

    #[test]
    fn test_missing_data_dir_hints_at_download() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigBuilder::new(dir.path().join("raw"))
            .year(2023)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MissingDataDir(_)));
        assert!(err
            .to_string()
            .contains("Did you download the data for this year?"));
    }

    #[test]
    fn test_invalid_policy() {
        assert!(matches!(
            MalformedPolicy::parse("retry"),
            Err(Error::Config(_))
        ));
        assert_eq!(MalformedPolicy::parse("fail").unwrap(), MalformedPolicy::Fail);
    }

    #[test]
    fn test_default_vocabulary() {
        let config = Config::default();
        let options = config.pipeline_options().unwrap();
        assert_eq!(options.on_malformed, MalformedPolicy::Fail);
        assert_eq!(options.vocabulary, Vocabulary::builtin().unwrap());
    }
}
