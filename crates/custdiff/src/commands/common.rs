use std::path::Path;

use custdiff_core::config::{ConfigManager, FileConfig};

/// Options shared by every run, taken from global flags
#[derive(Debug, Clone, Copy)]
pub struct RunOptions<'a> {
    /// Classify and report without writing output
    pub dry_run: bool,
    /// Path to custom config file
    pub config_path: Option<&'a Path>,
    /// Skip loading all config files
    pub no_config: bool,
}

impl<'a> RunOptions<'a> {
    /// Create new run options
    #[must_use]
    pub const fn new(dry_run: bool, config_path: Option<&'a Path>, no_config: bool) -> Self {
        Self {
            dry_run,
            config_path,
            no_config,
        }
    }

    /// Load file settings unless config files are disabled
    pub fn load_config(&self) -> anyhow::Result<FileConfig> {
        if self.no_config {
            tracing::debug!("Config files disabled with --no-config");
            return Ok(FileConfig::default());
        }
        ConfigManager::load(self.config_path)
    }
}
