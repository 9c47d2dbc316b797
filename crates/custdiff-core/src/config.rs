//! Configuration file parsing, merging, and the run configuration
//!
//! This module handles:
//! - Config file discovery from multiple locations
//! - TOML parsing with serde
//! - Config merging with precedence rules
//! - Gitignore-style pattern matching
//! - Validation of file settings and of the final run configuration

mod discovery;
mod merge;
mod patterns;
mod types;
mod validation;

pub use discovery::{ConfigDiscovery, ConfigFiles, LOCAL_CONFIG_NAME, PROJECT_CONFIG_NAME};
pub use merge::ConfigMerger;
pub use patterns::PatternMatcher;
pub use types::{ALL_MODULES, DEFAULT_GIT_PROGRAM, FileConfig, RunConfig, parse_prefix_list};
pub use validation::ConfigValidator;

use std::path::Path;

use crate::error::Result;

/// Configuration manager that coordinates discovery, parsing, merging, and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Load and merge configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if config files are invalid or cannot be read.
    pub fn load(cli_config_path: Option<&Path>) -> Result<FileConfig> {
        let config_files = ConfigDiscovery::discover(cli_config_path);
        Self::load_files(&config_files)
    }

    /// Merge and validate an explicit set of configuration files
    ///
    /// # Errors
    ///
    /// Returns an error if config files are invalid or cannot be read.
    pub fn load_files(files: &ConfigFiles) -> Result<FileConfig> {
        let merged = ConfigMerger::merge(files)?;
        ConfigValidator::validate(&merged)?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_files_validates() {
        let tmp = TempDir::new().unwrap();
        let cli = tmp.path().join("cli.toml");
        fs::write(&cli, "ignore = [\"\"]").unwrap();

        let files = ConfigFiles {
            cli: Some(cli),
            ..ConfigFiles::default()
        };

        let err = ConfigManager::load_files(&files).unwrap_err();
        assert!(err.to_string().contains("Ignore pattern cannot be empty"));
    }

    #[test]
    fn test_load_files_merges() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join(PROJECT_CONFIG_NAME);
        fs::write(&project, "prefixes = [\"vnd_\"]").unwrap();

        let files = ConfigFiles {
            project: Some(project),
            ..ConfigFiles::default()
        };

        let config = ConfigManager::load_files(&files).unwrap();
        assert_eq!(config.prefixes, vec!["vnd_"]);
    }
}
