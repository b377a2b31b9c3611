//! Defines where and what a generation run writes.

use crate::error::{GoldenError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The scenario suites that can be generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SuiteName {
    /// Single cylinders sampled on `[-5, 5]^3`.
    Cylinder,
    /// A three-cylinder collection sampled on `[-1, 1]^3`.
    Collection,
}

impl SuiteName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuiteName::Cylinder => "cylinder",
            SuiteName::Collection => "collection",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfiguration {
    /// Directory that receives the `.mtx` artifacts. Created if missing.
    pub output_dir: PathBuf,

    /// Suites to generate. They always run in the order cylinder, collection.
    pub suites: Vec<SuiteName>,

    /// Default log filter, used when `RUST_LOG` is not set.
    pub log_level: String,
}

/// Per default every suite is generated into the directory the consuming test
/// suite reads from.
impl Default for GeneratorConfiguration {
    fn default() -> Self {
        GeneratorConfiguration {
            output_dir: PathBuf::from("tests/test-data"),
            suites: vec![SuiteName::Cylinder, SuiteName::Collection],
            log_level: "info".to_string(),
        }
    }
}

impl GeneratorConfiguration {
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).map_err(|e| GoldenError::Config(e.to_string()))
    }

    /// Loads a YAML configuration file. Missing keys take their default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| GoldenError::io(path, e))?;
        Self::from_yaml_str(&contents)
    }

    /// Whether `suite` is selected by this configuration.
    pub fn includes(&self, suite: SuiteName) -> bool {
        self.suites.contains(&suite)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = GeneratorConfiguration::from_yaml_str("{}").unwrap();
        assert_eq!(config, GeneratorConfiguration::default());
    }

    #[test]
    fn test_partial_document() {
        let config = GeneratorConfiguration::from_yaml_str(
            "output_dir: /tmp/golden\nsuites: [collection]\n",
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/golden"));
        assert!(config.includes(SuiteName::Collection));
        assert!(!config.includes(SuiteName::Cylinder));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        match GeneratorConfiguration::from_yaml_str("outputdir: x\n") {
            Err(GoldenError::Config(_)) => (),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_suite_is_rejected() {
        assert!(GeneratorConfiguration::from_yaml_str("suites: [sphere]\n").is_err());
    }
}
