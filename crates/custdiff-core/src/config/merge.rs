//! Configuration merging with precedence rules
//!
//! # Merging Semantics
//!
//! - **Prefixes**: Additive, highest precedence first, since order is try order
//! - **Arrays** (ignore, exclude): Additive, lowest precedence first
//! - **Booleans**: OR semantics - if any config sets to `true`, result is `true`
//! - **`git`**: the highest-precedence file that sets it wins

use std::fs;
use std::path::Path;

use anyhow::Context;

use super::discovery::ConfigFiles;
use super::types::FileConfig;
use crate::error::Result;

/// Configuration merger
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple config files with precedence rules
    ///
    /// Precedence order (highest to lowest):
    /// 1. CLI config
    /// 2. .custdiff.local.toml
    /// 3. .custdiff.toml
    /// 4. Global config
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn merge(files: &ConfigFiles) -> Result<FileConfig> {
        let mut merged = FileConfig::default();

        // Load and merge in reverse precedence order (lowest to highest)
        for path in [&files.global, &files.project, &files.local, &files.cli]
            .into_iter()
            .flatten()
        {
            Self::merge_into(&mut merged, path)?;
        }

        Ok(merged)
    }

    /// Load and merge a single config file into the existing config
    fn merge_into(base: &mut FileConfig, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!("Loaded config file {}", path.display());

        // Files arrive lowest precedence first, so newer prefixes go in front
        let lower = std::mem::replace(&mut base.prefixes, config.prefixes);
        dedup_extend(&mut base.prefixes, lower);
        base.ignore.extend(config.ignore);
        base.exclude.extend(config.exclude);
        base.skip_firmware_docs |= config.skip_firmware_docs;
        if config.git.is_some() {
            base.git = config.git;
        }

        Ok(())
    }
}

/// Append `extra` to `list`, keeping only the first occurrence of each entry
fn dedup_extend(list: &mut Vec<String>, extra: Vec<String>) {
    let mut seen = Vec::with_capacity(list.len() + extra.len());
    for item in list.drain(..).chain(extra) {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    *list = seen;
}
