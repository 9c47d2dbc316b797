//! Version-control commit metadata
//!
//! The classifier only needs two questions answered about a file: when was
//! it last committed, and when was it last committed after a given moment.
//! [`CommitProbe`] captures exactly that so the subprocess-based
//! [`GitCliProbe`] can be replaced by a native history library.

mod git;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};

pub use git::GitCliProbe;

/// Errors raised while querying commit history
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The query process could not be started
    #[error("Failed to start `{program}` in {dir}: {source}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Working directory of the query
        dir: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The file has no usable parent directory to run the query from
    #[error("Invalid working directory for {path}")]
    InvalidWorkingDir {
        /// File the query was about
        path: PathBuf,
    },

    /// The query ran but reported failure
    #[error("`{command}` failed in {dir}: {stderr}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Working directory of the query
        dir: PathBuf,
        /// Trimmed standard error output
        stderr: String,
    },

    /// The first output line is not a timestamp
    #[error("Unexpected output from `{command}`: {line:?}")]
    MalformedOutput {
        /// Rendered command line
        command: String,
        /// Offending line
        line: String,
    },
}

/// Committer date of a commit, keeping the offset it was recorded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommitTimestamp(DateTime<FixedOffset>);

impl CommitTimestamp {
    /// Parse a strict ISO-8601 / RFC 3339 timestamp as printed by `git log --format=%cI`
    ///
    /// # Errors
    ///
    /// Returns the chrono parse error if the text is not a valid timestamp.
    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(text.trim()).map(Self)
    }

    /// Underlying date and time
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    /// RFC 3339 rendering
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl From<DateTime<FixedOffset>> for CommitTimestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self(value)
    }
}

impl fmt::Display for CommitTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

/// Read-only source of commit timestamps for individual files
pub trait CommitProbe {
    /// Most recent commit touching `path`, or `None` if it has no history
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be queried at all.
    fn last_commit(&self, path: &Path) -> Result<Option<CommitTimestamp>, ProbeError>;

    /// Most recent commit touching `path` strictly after `after`
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be queried at all.
    fn last_commit_after(
        &self,
        path: &Path,
        after: &CommitTimestamp,
    ) -> Result<Option<CommitTimestamp>, ProbeError>;
}

impl<P: CommitProbe + ?Sized> CommitProbe for &P {
    fn last_commit(&self, path: &Path) -> Result<Option<CommitTimestamp>, ProbeError> {
        (**self).last_commit(path)
    }

    fn last_commit_after(
        &self,
        path: &Path,
        after: &CommitTimestamp,
    ) -> Result<Option<CommitTimestamp>, ProbeError> {
        (**self).last_commit_after(path, after)
    }
}
