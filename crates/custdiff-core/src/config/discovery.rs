//! Configuration file discovery from multiple locations

use std::path::{Path, PathBuf};

/// Project-local config file name (highest precedence after `--config`)
pub const LOCAL_CONFIG_NAME: &str = ".custdiff.local.toml";

/// Project config file name
pub const PROJECT_CONFIG_NAME: &str = ".custdiff.toml";

/// Configuration file locations in order of precedence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFiles {
    /// Config from CLI flag (highest precedence)
    pub cli: Option<PathBuf>,
    /// Project-local config (.custdiff.local.toml)
    pub local: Option<PathBuf>,
    /// Project config (.custdiff.toml)
    pub project: Option<PathBuf>,
    /// Global XDG config
    pub global: Option<PathBuf>,
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover all available configuration files, searching upwards from the
    /// current directory
    #[must_use]
    pub fn discover(cli_path: Option<&Path>) -> ConfigFiles {
        match std::env::current_dir() {
            Ok(cwd) => Self::discover_from(&cwd, cli_path),
            Err(_) => ConfigFiles {
                cli: cli_path.map(Path::to_path_buf),
                global: Self::find_global_config(),
                ..ConfigFiles::default()
            },
        }
    }

    /// Discover configuration files starting the upward search at `start`
    ///
    /// An explicit CLI path is kept even when it does not exist so that the
    /// merge step reports it instead of silently running without it.
    #[must_use]
    pub fn discover_from(start: &Path, cli_path: Option<&Path>) -> ConfigFiles {
        ConfigFiles {
            cli: cli_path.map(Path::to_path_buf),
            local: Self::find_file(start, LOCAL_CONFIG_NAME),
            project: Self::find_file(start, PROJECT_CONFIG_NAME),
            global: Self::find_global_config(),
        }
    }

    /// Find a config file in `start` or one of its ancestors
    fn find_file(start: &Path, name: &str) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Find global config in XDG config directory
    fn find_global_config() -> Option<PathBuf> {
        let global_config = dirs::config_dir()?.join("custdiff").join("config.toml");
        global_config.is_file().then_some(global_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_without_cli_config() {
        let tmp = TempDir::new().unwrap();
        let files = ConfigDiscovery::discover_from(tmp.path(), None);

        assert!(files.cli.is_none());
        // global may or may not exist depending on test environment
    }

    #[test]
    fn test_discover_cli_config_kept_even_if_missing() {
        let tmp = TempDir::new().unwrap();
        let cli_config = tmp.path().join("missing.toml");

        let files = ConfigDiscovery::discover_from(tmp.path(), Some(&cli_config));

        assert_eq!(files.cli, Some(cli_config));
    }

    #[test]
    fn test_discover_project_and_local_in_ancestor() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(PROJECT_CONFIG_NAME), "").unwrap();
        fs::write(tmp.path().join(LOCAL_CONFIG_NAME), "").unwrap();
        let nested = tmp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let files = ConfigDiscovery::discover_from(&nested, None);

        assert_eq!(files.project, Some(tmp.path().join(PROJECT_CONFIG_NAME)));
        assert_eq!(files.local, Some(tmp.path().join(LOCAL_CONFIG_NAME)));
    }

    #[test]
    fn test_discover_nearest_project_config_wins() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("inner");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join(PROJECT_CONFIG_NAME), "").unwrap();
        fs::write(nested.join(PROJECT_CONFIG_NAME), "").unwrap();

        let files = ConfigDiscovery::discover_from(&nested, None);

        assert_eq!(files.project, Some(nested.join(PROJECT_CONFIG_NAME)));
    }
}
