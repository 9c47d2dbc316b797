//! Reconcile orchestration - coordinates the run workflow

use super::ReconcileReport;
use super::materializer::OutputWriter;
use crate::classifier::Classifier;
use crate::config::{PatternMatcher, RunConfig};
use crate::error::Result;
use crate::scanner::{FileFilter, Scanner};
use crate::vcs::{CommitProbe, GitCliProbe};

/// Main reconcile engine
pub struct Reconciler<P = GitCliProbe> {
    config: RunConfig,
    scanner: Scanner,
    classifier: Classifier<P>,
}

impl Reconciler<GitCliProbe> {
    /// Create an engine querying history through the configured git program
    ///
    /// # Errors
    ///
    /// Returns an error if configured patterns fail to compile.
    pub fn new(config: RunConfig) -> Result<Self> {
        let probe = GitCliProbe::new(config.git_program.clone());
        Self::with_probe(config, probe)
    }
}

impl<P: CommitProbe> Reconciler<P> {
    /// Create an engine with an explicit commit probe
    ///
    /// # Errors
    ///
    /// Returns an error if configured patterns fail to compile.
    pub fn with_probe(config: RunConfig, probe: P) -> Result<Self> {
        // Compile patterns once during construction
        let exclude = PatternMatcher::with_patterns(&config.exclude)?;
        let scanner = Scanner::new(FileFilter::project_defaults(), exclude, &config.custom_root)
            .skipping(&config.output_dir);
        let classifier = Classifier::new(&config, probe)?;

        Ok(Self {
            config,
            scanner,
            classifier,
        })
    }

    /// Configuration this engine runs with
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Classify every file under the scan root, then write the output tree
    ///
    /// # Errors
    ///
    /// Returns an error on traversal failure, history query failure, or any
    /// output directory operation failure. No partial output is produced for
    /// classification errors.
    pub fn run(&self) -> Result<ReconcileReport> {
        let scan_root = self.config.scan_root();
        let files = self.scanner.scan(&scan_root)?;
        tracing::debug!("Found {} files under {}", files.len(), scan_root.display());

        let mut report = ReconcileReport::new(scan_root);
        for file in &files {
            tracing::info!("Processing {}", file.display());
            let record = self.classifier.classify(file)?;
            tracing::debug!("{} -> {}", file.display(), record.classification());
            report.push(record);
        }

        report.copied = OutputWriter::new(&self.config).materialize(&report)?;
        if !self.config.dry_run {
            report.output_dir = Some(self.config.output_dir.clone());
        }

        Ok(report)
    }
}
