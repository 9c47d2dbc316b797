use anyhow::Context;
use custdiff_core::config::{ConfigValidator, RunConfig, parse_prefix_list};
use custdiff_core::{Reconciler, ReconcileReporter};

use crate::cli::ReconcileArgs;
use crate::commands::RunOptions;

pub struct Reconcile;

impl Reconcile {
    pub fn execute(args: &ReconcileArgs, options: &RunOptions) -> anyhow::Result<()> {
        let file_config = options.load_config()?;
        tracing::debug!("Loaded file config: {file_config:?}");

        let config = Self::build_config(args, options.dry_run).with_file_config(file_config);
        let config = ConfigValidator::validate_run(config).context("Invalid run configuration")?;

        tracing::debug!("Standard root: {}", config.standard_root.display());
        tracing::debug!("Custom root: {}", config.custom_root.display());
        tracing::debug!("Output: {}", config.output_dir.display());
        tracing::debug!("Prefixes: {:?}", config.prefixes);

        let engine = Reconciler::new(config).context("Failed to initialize reconcile engine")?;
        let report = engine.run().context("Reconcile run failed")?;

        let summary = ReconcileReporter::generate_summary(&report);
        println!("{summary}");

        Ok(())
    }

    /// Command-line values only; file settings are layered on afterwards
    fn build_config(args: &ReconcileArgs, dry_run: bool) -> RunConfig {
        let prefixes = args
            .prefixes
            .as_deref()
            .map(parse_prefix_list)
            .unwrap_or_default();

        RunConfig::new(&args.standard_root, &args.custom_root, &args.output)
            .with_module(&args.module)
            .with_prefixes(prefixes)
            .with_skip_firmware_docs(args.skip_firmware_docs)
            .with_dry_run(dry_run)
    }
}
