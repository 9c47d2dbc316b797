use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;

/// Custom Tree Reconciliation Tool
///
/// Find files in a customized source tree whose standard counterparts were
/// committed after the custom file last changed, and copy both sides into an
/// output directory for review
#[derive(Parser, Debug)]
#[command(name = "custdiff")]
#[command(about, long_about = None, version)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Classify and report without touching the output directory
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Use specific config file
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    #[command(flatten)]
    pub args: ReconcileArgs,
}

/// Positional arguments of a reconcile run
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Root of the standard tree
    #[arg(value_name = "STANDARD_ROOT")]
    pub standard_root: PathBuf,

    /// Root of the custom tree
    #[arg(value_name = "CUSTOM_ROOT")]
    pub custom_root: PathBuf,

    /// Subdirectory of the custom root to scan ("." for everything)
    #[arg(value_name = "MODULE")]
    pub module: String,

    /// Output directory, deleted and recreated on every run
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Ignore everything under firmware docs folders (true/false)
    #[arg(value_name = "SKIP_FIRMWARE_DOCS", action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub skip_firmware_docs: bool,

    /// Filename prefixes to strip, separated by ';'
    #[arg(value_name = "PREFIXES")]
    pub prefixes: Option<String>,
}
