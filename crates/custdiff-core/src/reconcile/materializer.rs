//! Output directory reset and file pair copying

use std::fs;
use std::path::Path;

use anyhow::Context;

use super::ReconcileReport;
use crate::classifier::{Classification, FileRecord};
use crate::config::RunConfig;
use crate::error::Result;

/// Side folder for the custom copy of a pair
pub const CUSTOM_SIDE: &str = "custom";

/// Side folder for the standard copy of a pair
pub const STANDARD_SIDE: &str = "std";

/// Writes matched file pairs into the output tree
pub struct OutputWriter<'a> {
    config: &'a RunConfig,
}

impl<'a> OutputWriter<'a> {
    /// Create a writer for the configured output directory
    #[must_use]
    pub const fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Recreate the output directory and copy every changed and unchanged pair
    ///
    /// In dry-run mode nothing is touched and planned copies are only logged.
    /// Returns the number of files written.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be reset or a copy fails.
    pub fn materialize(&self, report: &ReconcileReport) -> Result<usize> {
        if !self.config.dry_run {
            self.reset()?;
        }

        let mut copied = 0;
        for classification in Classification::ALL {
            let Some(group) = classification.output_group() else {
                continue;
            };
            for record in report.group(classification) {
                copied += self.copy_pair(record, group)?;
            }
        }

        Ok(copied)
    }

    /// Delete the output directory with everything in it and create it empty
    ///
    /// # Errors
    ///
    /// Returns an error if deletion or creation fails.
    pub fn reset(&self) -> Result<()> {
        let output = &self.config.output_dir;
        if output.exists() {
            fs::remove_dir_all(output).with_context(|| {
                format!("Failed to delete output directory: {}", output.display())
            })?;
        }
        fs::create_dir_all(output)
            .with_context(|| format!("Failed to create output directory: {}", output.display()))
    }

    /// Copy the custom file and its standard counterpart under `group`
    fn copy_pair(&self, record: &FileRecord, group: &str) -> Result<usize> {
        let Some(standard) = record.standard_path() else {
            return Ok(0);
        };
        let custom = record.custom_path();
        let relative = custom.strip_prefix(&self.config.custom_root).with_context(|| {
            format!("{} is outside the custom root", custom.display())
        })?;

        let custom_dest = self.config.output_side(group, CUSTOM_SIDE).join(relative);
        let standard_dest = self.config.output_side(group, STANDARD_SIDE).join(relative);

        if self.config.dry_run {
            tracing::info!(
                "[DRY RUN] Would copy {} -> {}",
                custom.display(),
                custom_dest.display()
            );
            tracing::info!(
                "[DRY RUN] Would copy {} -> {}",
                standard.display(),
                standard_dest.display()
            );
            return Ok(0);
        }

        Self::copy_file(custom, &custom_dest)?;
        Self::copy_file(standard, &standard_dest)?;
        Ok(2)
    }

    /// Copy a file, creating parent directories as needed
    fn copy_file(source: &Path, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::copy(source, dest).with_context(|| {
            format!("Failed to copy {} to {}", source.display(), dest.display())
        })?;

        Ok(())
    }
}
