//! Gitignore-style pattern matching using the ignore crate

use std::path::Path;

use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::Result;

/// Matcher for paths relative to a tree root
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    gitignore: Option<Gitignore>,
}

impl PatternMatcher {
    /// Create a matcher that matches nothing
    #[must_use]
    pub const fn empty() -> Self {
        Self { gitignore: None }
    }

    /// Build a matcher from gitignore-style patterns
    ///
    /// # Errors
    ///
    /// Returns an error if patterns are invalid.
    pub fn with_patterns(patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(Self::empty());
        }

        let mut builder = GitignoreBuilder::new("");
        for pattern in patterns {
            builder
                .add_line(None, pattern)
                .with_context(|| format!("Invalid pattern: '{pattern}'"))?;
        }

        let gitignore = builder.build().context("Failed to compile patterns")?;

        Ok(Self {
            gitignore: Some(gitignore),
        })
    }

    /// Check whether a relative path, or any of its parent directories, matches
    #[must_use]
    pub fn is_match(&self, relative: &Path, is_dir: bool) -> bool {
        if relative.has_root() {
            return false;
        }
        self.gitignore.as_ref().is_some_and(|gi| {
            gi.matched_path_or_any_parents(relative, is_dir)
                .is_ignore()
        })
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::empty()
    }
}
