//! Configuration validation and error reporting

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::types::{FileConfig, RunConfig};
use crate::error::Result;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate settings loaded from configuration files
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(config: &FileConfig) -> Result<()> {
        Self::validate_lists(&config.prefixes, &config.ignore, &config.exclude)?;

        if config.git.as_deref().is_some_and(|git| git.trim().is_empty()) {
            anyhow::bail!("git program cannot be empty");
        }

        Ok(())
    }

    /// Validate a run configuration and resolve its paths to absolute form
    ///
    /// Roots must be existing directories; the output directory must not
    /// coincide with, or contain, either root because it is wiped every run.
    ///
    /// # Errors
    ///
    /// Returns an error if a root is missing or the output directory would
    /// destroy input.
    pub fn validate_run(mut config: RunConfig) -> Result<RunConfig> {
        Self::validate_lists(&config.prefixes, &config.ignore, &config.exclude)?;

        if config.git_program.trim().is_empty() {
            anyhow::bail!("git program cannot be empty");
        }

        config.standard_root = Self::existing_dir(&config.standard_root, "Standard root")?;
        config.custom_root = Self::existing_dir(&config.custom_root, "Custom root")?;
        Self::existing_dir(&config.scan_root(), "Module directory")?;
        config.output_dir = Self::absolute_output(&config.output_dir)?;

        for (label, root) in [
            ("custom root", &config.custom_root),
            ("standard root", &config.standard_root),
        ] {
            if root.starts_with(&config.output_dir) {
                anyhow::bail!(
                    "Output directory {} would overwrite the {label} {}",
                    config.output_dir.display(),
                    root.display()
                );
            }
        }

        Ok(config)
    }

    fn validate_lists(prefixes: &[String], ignore: &[String], exclude: &[String]) -> Result<()> {
        if prefixes.iter().any(|prefix| prefix.trim().is_empty()) {
            anyhow::bail!("Prefix cannot be empty");
        }

        for (kind, patterns) in [("Ignore", ignore), ("Exclude", exclude)] {
            if patterns.iter().any(|pattern| pattern.trim().is_empty()) {
                anyhow::bail!("{kind} pattern cannot be empty");
            }
        }

        Ok(())
    }

    fn existing_dir(path: &Path, label: &str) -> Result<PathBuf> {
        if !path.is_dir() {
            anyhow::bail!("{label} is not a directory: {}", path.display());
        }
        dunce::canonicalize(path)
            .with_context(|| format!("Failed to resolve {label}: {}", path.display()))
    }

    /// Canonicalize the deepest existing ancestor of `path` and re-append the rest
    fn absolute_output(path: &Path) -> Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .context("Failed to get current directory")?
                .join(path)
        };

        let mut existing = absolute.as_path();
        let mut missing = Vec::new();
        while !existing.exists() {
            match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name.to_os_string());
                    existing = parent;
                }
                _ => break,
            }
        }

        let mut resolved = dunce::canonicalize(existing).with_context(|| {
            format!("Failed to resolve output directory: {}", path.display())
        })?;
        resolved.extend(missing.iter().rev());
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn roots() -> (TempDir, RunConfig) {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("std")).unwrap();
        fs::create_dir_all(tmp.path().join("custom/payments")).unwrap();
        let config = RunConfig::new(
            tmp.path().join("std"),
            tmp.path().join("custom"),
            tmp.path().join("out"),
        );
        (tmp, config)
    }

    #[test]
    fn test_validate_empty_file_config() {
        assert!(ConfigValidator::validate(&FileConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_empty_prefix() {
        let config = FileConfig {
            prefixes: vec!["  ".to_string()],
            ..FileConfig::default()
        };

        let result = ConfigValidator::validate(&config);
        assert!(result.unwrap_err().to_string().contains("Prefix cannot be empty"));
    }

    #[test]
    fn test_validate_empty_pattern() {
        let config = FileConfig {
            exclude: vec![String::new()],
            ..FileConfig::default()
        };

        let result = ConfigValidator::validate(&config);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Exclude pattern cannot be empty"));
    }

    #[test]
    fn test_validate_empty_git() {
        let config = FileConfig {
            git: Some(" ".to_string()),
            ..FileConfig::default()
        };

        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_validate_run_resolves_paths() {
        let (tmp, config) = roots();

        let validated = ConfigValidator::validate_run(config.with_module("payments")).unwrap();

        let base = dunce::canonicalize(tmp.path()).unwrap();
        assert_eq!(validated.standard_root, base.join("std"));
        assert_eq!(validated.custom_root, base.join("custom"));
        assert_eq!(validated.output_dir, base.join("out"));
    }

    #[test]
    fn test_validate_run_missing_root() {
        let (tmp, mut config) = roots();
        config.standard_root = tmp.path().join("missing");

        let err = ConfigValidator::validate_run(config).unwrap_err();
        assert!(err.to_string().contains("Standard root is not a directory"));
    }

    #[test]
    fn test_validate_run_missing_module() {
        let (_tmp, config) = roots();

        let err = ConfigValidator::validate_run(config.with_module("cards")).unwrap_err();
        assert!(err.to_string().contains("Module directory is not a directory"));
    }

    #[test]
    fn test_validate_run_output_over_root() {
        let (tmp, mut config) = roots();
        config.output_dir = tmp.path().to_path_buf();

        let err = ConfigValidator::validate_run(config).unwrap_err();
        assert!(err.to_string().contains("would overwrite"));
    }

    #[test]
    fn test_validate_run_output_inside_root_allowed() {
        let (tmp, mut config) = roots();
        config.output_dir = tmp.path().join("custom").join("review");

        assert!(ConfigValidator::validate_run(config).is_ok());
    }
}
