//! Per-file classification
//!
//! Each custom file goes through a single pass:
//!
//! 1. ignore rules → [`Classification::Ignored`], nothing else is looked at;
//! 2. path resolution → [`Classification::NotFound`] when no standard file matches;
//! 3. last commit of the custom file;
//! 4. last standard commit strictly after it → [`Classification::Changed`]
//!    if there is one, [`Classification::Unchanged`] otherwise.
//!
//! An untracked custom file has no last commit; then any commit of the
//! standard file counts as a change.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::{PatternMatcher, RunConfig};
use crate::error::Result;
use crate::resolver::{FileLookup, Filesystem, PathResolver};
use crate::vcs::{CommitProbe, CommitTimestamp};

/// Path fragments that are always ignored
pub const DENYLIST: &[&str] = &["2ts/docs/currency_accreditiv/"];

/// Firmware documentation folder ignored when `skip_firmware_docs` is set
pub const FIRMWARE_DOCS: &str = "2ts/docs/";

/// Outcome category of a custom file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Classification {
    /// The standard file has a commit after the custom file's last commit
    Changed,
    /// The standard file has no commit after the custom file's last commit
    Unchanged,
    /// No standard counterpart could be resolved
    NotFound,
    /// Excluded by ignore rules before resolution
    Ignored,
}

impl Classification {
    /// All classifications in report order
    pub const ALL: [Self; 4] = [Self::Changed, Self::Unchanged, Self::NotFound, Self::Ignored];

    /// Human-readable group label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Changed => "Changed",
            Self::Unchanged => "Unchanged",
            Self::NotFound => "Not found",
            Self::Ignored => "Ignored",
        }
    }

    /// Output subdirectory for groups whose files are copied
    #[must_use]
    pub const fn output_group(self) -> Option<&'static str> {
        match self {
            Self::Changed => Some("changed"),
            Self::Unchanged => Some("unchanged"),
            Self::NotFound | Self::Ignored => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What classification found out about a custom file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Matched an ignore rule
    Ignored,
    /// No standard counterpart exists
    NotFound,
    /// A standard counterpart was resolved and its history compared
    Matched {
        /// Resolved standard-tree file
        standard_path: PathBuf,
        /// Last commit of the custom file, `None` if untracked
        custom_commit: Option<CommitTimestamp>,
        /// Last standard commit after `custom_commit`
        standard_commit: Option<CommitTimestamp>,
    },
}

/// Classification result for one custom file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    custom_path: PathBuf,
    outcome: Outcome,
}

impl FileRecord {
    /// Create a record for `custom_path`
    #[must_use]
    pub fn new(custom_path: impl Into<PathBuf>, outcome: Outcome) -> Self {
        Self {
            custom_path: custom_path.into(),
            outcome,
        }
    }

    /// File in the custom tree
    #[must_use]
    pub fn custom_path(&self) -> &Path {
        &self.custom_path
    }

    /// Raw outcome
    #[must_use]
    pub const fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Classification derived from the outcome
    #[must_use]
    pub const fn classification(&self) -> Classification {
        match &self.outcome {
            Outcome::Ignored => Classification::Ignored,
            Outcome::NotFound => Classification::NotFound,
            Outcome::Matched {
                standard_commit: Some(_),
                ..
            } => Classification::Changed,
            Outcome::Matched {
                standard_commit: None,
                ..
            } => Classification::Unchanged,
        }
    }

    /// Resolved standard file, if any
    #[must_use]
    pub fn standard_path(&self) -> Option<&Path> {
        match &self.outcome {
            Outcome::Matched { standard_path, .. } => Some(standard_path),
            Outcome::Ignored | Outcome::NotFound => None,
        }
    }

    /// Last commit of the custom file, if known
    #[must_use]
    pub const fn custom_commit(&self) -> Option<&CommitTimestamp> {
        match &self.outcome {
            Outcome::Matched { custom_commit, .. } => custom_commit.as_ref(),
            Outcome::Ignored | Outcome::NotFound => None,
        }
    }

    /// Standard commit that makes the file changed, if any
    #[must_use]
    pub const fn standard_commit(&self) -> Option<&CommitTimestamp> {
        match &self.outcome {
            Outcome::Matched {
                standard_commit, ..
            } => standard_commit.as_ref(),
            Outcome::Ignored | Outcome::NotFound => None,
        }
    }
}

/// Ignore predicate applied before any resolution work
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    custom_root: PathBuf,
    skip_firmware_docs: bool,
    patterns: PatternMatcher,
}

impl IgnoreRules {
    /// Build the rules from the run configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configured ignore pattern is invalid.
    pub fn new(config: &RunConfig) -> Result<Self> {
        Ok(Self {
            custom_root: config.custom_root.clone(),
            skip_firmware_docs: config.skip_firmware_docs,
            patterns: PatternMatcher::with_patterns(&config.ignore)?,
        })
    }

    /// Whether `path` is excluded from reconciliation
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        let rendered = slash_path(path);

        if DENYLIST.iter().any(|fragment| rendered.contains(fragment)) {
            return true;
        }
        if self.skip_firmware_docs && rendered.contains(FIRMWARE_DOCS) {
            return true;
        }

        path.strip_prefix(&self.custom_root)
            .is_ok_and(|relative| self.patterns.is_match(relative, false))
    }
}

/// Render a path with `/` separators regardless of platform
fn slash_path(path: &Path) -> String {
    path.iter()
        .map(|segment| segment.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Classifies custom files against the standard tree
pub struct Classifier<P, L = Filesystem> {
    ignore: IgnoreRules,
    resolver: PathResolver<L>,
    probe: P,
}

impl<P: CommitProbe> Classifier<P> {
    /// Create a classifier resolving paths on disk
    ///
    /// # Errors
    ///
    /// Returns an error if a configured ignore pattern is invalid.
    pub fn new(config: &RunConfig, probe: P) -> Result<Self> {
        Self::with_resolver(config, PathResolver::new(config), probe)
    }
}

impl<P: CommitProbe, L: FileLookup> Classifier<P, L> {
    /// Create a classifier with an explicit resolver
    ///
    /// # Errors
    ///
    /// Returns an error if a configured ignore pattern is invalid.
    pub fn with_resolver(config: &RunConfig, resolver: PathResolver<L>, probe: P) -> Result<Self> {
        Ok(Self {
            ignore: IgnoreRules::new(config)?,
            resolver,
            probe,
        })
    }

    /// Classify a single custom file
    ///
    /// # Errors
    ///
    /// Returns an error if commit history cannot be queried.
    pub fn classify(&self, custom_path: &Path) -> Result<FileRecord> {
        if self.ignore.is_ignored(custom_path) {
            return Ok(FileRecord::new(custom_path, Outcome::Ignored));
        }

        let Some(standard_path) = self.resolver.resolve(custom_path) else {
            return Ok(FileRecord::new(custom_path, Outcome::NotFound));
        };

        let custom_commit = self.probe.last_commit(custom_path).with_context(|| {
            format!("Failed to query history of {}", custom_path.display())
        })?;

        let standard_commit = match &custom_commit {
            Some(after) => self.probe.last_commit_after(&standard_path, after),
            None => self.probe.last_commit(&standard_path),
        }
        .with_context(|| format!("Failed to query history of {}", standard_path.display()))?;

        Ok(FileRecord::new(
            custom_path,
            Outcome::Matched {
                standard_path,
                custom_commit,
                standard_commit,
            },
        ))
    }
}
