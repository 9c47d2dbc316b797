//! Reconcile summary rendering

use std::fmt::Write;

use super::ReconcileReport;
use crate::classifier::{Classification, FileRecord};

/// Text used for a custom file without commit history
const UNTRACKED: &str = "untracked";

/// Reconcile run reporter
pub struct ReconcileReporter;

impl ReconcileReporter {
    /// Generate a summary report
    #[must_use]
    pub fn generate_summary(report: &ReconcileReport) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "Processed {} files in {}",
            report.total(),
            report.scanned_root.display()
        );

        for (classification, records) in report.non_empty_groups() {
            let _ = writeln!(output, "\n{}: {}", classification.label(), records.len());
            for record in records {
                Self::write_record(&mut output, classification, record);
            }
        }

        match &report.output_dir {
            Some(dir) => {
                let _ = writeln!(output, "\nCopied {} files into {}", report.copied, dir.display());
            }
            None => output.push_str("\nDry run: output directory not modified\n"),
        }

        output
    }

    fn write_record(output: &mut String, classification: Classification, record: &FileRecord) {
        let _ = writeln!(output, "[custom file] = {}", record.custom_path().display());

        if !matches!(
            classification,
            Classification::Changed | Classification::Unchanged
        ) {
            return;
        }

        let custom_commit = record
            .custom_commit()
            .map_or_else(|| UNTRACKED.to_string(), ToString::to_string);
        let _ = writeln!(output, "[custom last commit] = {custom_commit}");
        if let Some(standard) = record.standard_path() {
            let _ = writeln!(output, "[standard file] = {}", standard.display());
        }
        if let Some(commit) = record.standard_commit() {
            let _ = writeln!(output, "[standard commit after custom] = {commit}");
        }
        // Blank line between matched pairs
        output.push('\n');
    }
}
