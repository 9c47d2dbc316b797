//! # custdiff-core
//!
//! Core library for reconciling a custom source tree against the standard
//! tree it was derived from.
//!
//! For every file under the custom tree the library finds the matching
//! standard file, asks version control whether the standard file was
//! committed after the custom file was last touched, and sorts the result
//! into changed, unchanged, not-found and ignored groups.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Core error types for the custdiff library
pub mod error {
    /// Result type alias using `anyhow::Error`
    pub type Result<T> = anyhow::Result<T>;
}

/// Configuration file parsing and the immutable run configuration
pub mod config;

/// Custom tree traversal
pub mod scanner;

/// Version-control commit metadata queries
pub mod vcs;

/// Custom-to-standard path resolution heuristics
pub mod resolver;

/// Per-file classification state machine
pub mod classifier;

/// Run orchestration, output materialization and reporting
pub mod reconcile;

#[cfg(test)]
mod test_support;

pub use classifier::{Classification, Classifier, FileRecord, Outcome};
pub use config::{ConfigManager, FileConfig, RunConfig};
pub use reconcile::{ReconcileReport, Reconciler, ReconcileReporter};
pub use resolver::{FileLookup, Filesystem, PathResolver};
pub use vcs::{CommitProbe, CommitTimestamp, GitCliProbe, ProbeError};
