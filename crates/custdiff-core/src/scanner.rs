//! Custom tree traversal
//!
//! Walks the custom tree in file-name order so that every run visits files
//! in the same sequence. Built-in project exclusions, configured exclude
//! patterns and the output directory are pruned during the walk.

mod filters;

use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::{DirEntry, WalkDir};

pub use filters::{FileFilter, Pattern};

use crate::config::PatternMatcher;
use crate::error::Result;

/// Recursive scanner for the custom tree
pub struct Scanner {
    filter: FileFilter,
    exclude: PatternMatcher,
    base: PathBuf,
    skip_dir: Option<PathBuf>,
}

impl Scanner {
    /// Create a scanner whose exclude patterns are relative to `base`
    #[must_use]
    pub fn new(filter: FileFilter, exclude: PatternMatcher, base: impl Into<PathBuf>) -> Self {
        Self {
            filter,
            exclude,
            base: base.into(),
            skip_dir: None,
        }
    }

    /// Never descend into `dir` (used for an output directory inside the tree)
    #[must_use]
    pub fn skipping(mut self, dir: impl Into<PathBuf>) -> Self {
        self.skip_dir = Some(dir.into());
        self
    }

    /// Collect every regular file below `root`
    ///
    /// # Errors
    ///
    /// Returns an error if directory traversal fails due to permission issues
    /// or I/O errors.
    pub fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || self.keep(entry));

        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            if entry.file_type().is_dir() {
                continue;
            }
            // Symlinks count when they point at a regular file
            if entry.path().is_file() {
                files.push(entry.into_path());
            } else {
                tracing::debug!("Skipping non-regular entry {}", entry.path().display());
            }
        }

        Ok(files)
    }

    fn keep(&self, entry: &DirEntry) -> bool {
        let path = entry.path();
        let is_dir = entry.file_type().is_dir();

        if self.filter.should_exclude(path, is_dir) {
            return false;
        }
        if is_dir && self.skip_dir.as_deref() == Some(path) {
            return false;
        }
        match path.strip_prefix(&self.base) {
            Ok(relative) => !self.exclude.is_match(relative, is_dir),
            Err(_) => true,
        }
    }
}
