//! Configuration types and structures

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Module argument meaning "scan the whole custom root"
pub const ALL_MODULES: &str = ".";

/// Default program used for commit queries
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Settings read from a `.custdiff.toml` style configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Filename prefixes to try stripping from custom file names
    ///
    /// Tried in order; prefixes from higher-precedence files come first and
    /// command-line prefixes come before all of them.
    #[serde(default)]
    pub prefixes: Vec<String>,

    /// Gitignore-style patterns that classify matching custom files as ignored
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Gitignore-style patterns excluded from traversal entirely
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Treat every file under a firmware `docs` folder as ignored
    #[serde(default)]
    pub skip_firmware_docs: bool,

    /// Program used for commit queries (defaults to `git` on PATH)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<String>,
}

/// Immutable configuration for a single reconcile run
///
/// Built once by the caller and handed to the resolver, classifier and
/// engine at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Root of the standard tree
    pub standard_root: PathBuf,
    /// Root of the custom tree
    pub custom_root: PathBuf,
    /// Optional subdirectory of the custom root to restrict the scan to
    pub module: Option<String>,
    /// Directory receiving the copied file pairs
    pub output_dir: PathBuf,
    /// Ignore everything under a firmware `docs` folder
    pub skip_firmware_docs: bool,
    /// Filename prefixes tried in order by the resolver
    pub prefixes: Vec<String>,
    /// Gitignore-style patterns classified as ignored
    pub ignore: Vec<String>,
    /// Gitignore-style patterns excluded from traversal
    pub exclude: Vec<String>,
    /// Program used for commit queries
    pub git_program: String,
    /// Classify and report without touching the output directory
    pub dry_run: bool,
}

impl RunConfig {
    /// Create a run configuration with defaults for everything but the roots
    #[must_use]
    pub fn new(
        standard_root: impl Into<PathBuf>,
        custom_root: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            standard_root: standard_root.into(),
            custom_root: custom_root.into(),
            module: None,
            output_dir: output_dir.into(),
            skip_firmware_docs: false,
            prefixes: Vec::new(),
            ignore: Vec::new(),
            exclude: Vec::new(),
            git_program: DEFAULT_GIT_PROGRAM.to_string(),
            dry_run: false,
        }
    }

    /// Restrict the scan to a module folder; `.` selects the whole custom root
    #[must_use]
    pub fn with_module(mut self, module: &str) -> Self {
        self.module = (module != ALL_MODULES && !module.is_empty()).then(|| module.to_string());
        self
    }

    /// Set the filename prefixes tried by the resolver
    #[must_use]
    pub fn with_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Enable or disable ignoring firmware documentation
    #[must_use]
    pub const fn with_skip_firmware_docs(mut self, skip: bool) -> Self {
        self.skip_firmware_docs = skip;
        self
    }

    /// Enable or disable dry-run mode
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Layer settings from configuration files under the command-line values
    ///
    /// Command-line prefixes keep priority in the try order; lists are
    /// extended and the firmware-docs flag uses OR semantics.
    #[must_use]
    pub fn with_file_config(mut self, file: FileConfig) -> Self {
        for prefix in file.prefixes {
            if !self.prefixes.contains(&prefix) {
                self.prefixes.push(prefix);
            }
        }
        self.ignore.extend(file.ignore);
        self.exclude.extend(file.exclude);
        self.skip_firmware_docs |= file.skip_firmware_docs;
        if let Some(git) = file.git {
            self.git_program = git;
        }
        self
    }

    /// Directory actually walked: the custom root or its module subfolder
    #[must_use]
    pub fn scan_root(&self) -> PathBuf {
        match &self.module {
            Some(module) => self.custom_root.join(module),
            None => self.custom_root.clone(),
        }
    }

    /// Output subtree for one copied side of a group, e.g. `<out>/changed/std`
    #[must_use]
    pub fn output_side(&self, group: &str, side: &str) -> PathBuf {
        self.output_dir.join(group).join(side)
    }
}

/// Split a `;`-delimited prefix list, dropping empty entries
#[must_use]
pub fn parse_prefix_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .filter(|prefix| !prefix.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_default() {
        let config = FileConfig::default();
        assert!(config.prefixes.is_empty());
        assert!(config.ignore.is_empty());
        assert!(config.exclude.is_empty());
        assert!(!config.skip_firmware_docs);
        assert!(config.git.is_none());
    }

    #[test]
    fn test_file_config_from_toml() {
        let config: FileConfig = toml::from_str(
            r#"
prefixes = ["vnd_", "bank_"]
ignore = ["**/*.bak"]
skip_firmware_docs = true
git = "/usr/local/bin/git"
"#,
        )
        .unwrap();

        assert_eq!(config.prefixes, vec!["vnd_", "bank_"]);
        assert_eq!(config.ignore, vec!["**/*.bak"]);
        assert!(config.exclude.is_empty());
        assert!(config.skip_firmware_docs);
        assert_eq!(config.git.as_deref(), Some("/usr/local/bin/git"));
    }

    #[test]
    fn test_module_sentinel() {
        let config = RunConfig::new("std", "custom", "out").with_module(ALL_MODULES);
        assert!(config.module.is_none());
        assert_eq!(config.scan_root(), PathBuf::from("custom"));

        let config = RunConfig::new("std", "custom", "out").with_module("payments");
        assert_eq!(config.module.as_deref(), Some("payments"));
        assert_eq!(config.scan_root(), PathBuf::from("custom/payments"));
    }

    #[test]
    fn test_parse_prefix_list() {
        assert_eq!(parse_prefix_list("vnd_;bank_"), vec!["vnd_", "bank_"]);
        assert_eq!(parse_prefix_list(";vnd_;;"), vec!["vnd_"]);
        assert!(parse_prefix_list("").is_empty());
    }

    #[test]
    fn test_file_config_layering() {
        let file = FileConfig {
            prefixes: vec!["bank_".to_string(), "vnd_".to_string()],
            ignore: vec!["*.bak".to_string()],
            exclude: vec!["generated/".to_string()],
            skip_firmware_docs: true,
            git: Some("git2.40".to_string()),
        };

        let config = RunConfig::new("std", "custom", "out")
            .with_prefixes(vec!["vnd_".to_string()])
            .with_file_config(file);

        // Command-line prefixes first, duplicates collapsed
        assert_eq!(config.prefixes, vec!["vnd_", "bank_"]);
        assert_eq!(config.ignore, vec!["*.bak"]);
        assert_eq!(config.exclude, vec!["generated/"]);
        assert!(config.skip_firmware_docs);
        assert_eq!(config.git_program, "git2.40");
    }

    #[test]
    fn test_output_side() {
        let config = RunConfig::new("std", "custom", "out");
        assert_eq!(
            config.output_side("changed", "std"),
            PathBuf::from("out/changed/std")
        );
    }
}
