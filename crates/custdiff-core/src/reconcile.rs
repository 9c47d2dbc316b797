//! Reconcile run: traversal, classification, output materialization and reporting
//!
//! The engine classifies every file first and only then rewrites the output
//! directory, so a fatal error during classification leaves the previous
//! output untouched.

mod materializer;
mod orchestrator;
mod reporting;


use std::collections::BTreeMap;
use std::path::PathBuf;

pub use materializer::OutputWriter;
pub use orchestrator::Reconciler;
pub use reporting::ReconcileReporter;

use crate::classifier::{Classification, FileRecord};

/// Result of a reconcile run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Directory that was walked
    pub scanned_root: PathBuf,
    /// Records grouped by classification, each group in traversal order
    pub groups: BTreeMap<Classification, Vec<FileRecord>>,
    /// Number of files written to the output directory
    pub copied: usize,
    /// Output directory, when it was written
    pub output_dir: Option<PathBuf>,
}

impl ReconcileReport {
    /// Create an empty report for `scanned_root`
    #[must_use]
    pub fn new(scanned_root: impl Into<PathBuf>) -> Self {
        Self {
            scanned_root: scanned_root.into(),
            groups: BTreeMap::new(),
            copied: 0,
            output_dir: None,
        }
    }

    /// Append a record to its group
    pub fn push(&mut self, record: FileRecord) {
        self.groups
            .entry(record.classification())
            .or_default()
            .push(record);
    }

    /// Records with the given classification
    #[must_use]
    pub fn group(&self, classification: Classification) -> &[FileRecord] {
        self.groups
            .get(&classification)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of records with the given classification
    #[must_use]
    pub fn count(&self, classification: Classification) -> usize {
        self.group(classification).len()
    }

    /// Total number of processed files
    #[must_use]
    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Non-empty groups in report order
    pub fn non_empty_groups(&self) -> impl Iterator<Item = (Classification, &[FileRecord])> {
        Classification::ALL
            .into_iter()
            .map(|c| (c, self.group(c)))
            .filter(|(_, records)| !records.is_empty())
    }
}
