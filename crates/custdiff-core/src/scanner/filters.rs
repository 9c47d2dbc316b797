//! Built-in traversal exclusions for project trees

use std::path::Path;

/// Pattern for matching entries that never take part in reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Directory with exactly this name (e.g., "node_modules")
    DirName(String),
    /// File whose name contains a substring (e.g., ".gitignore")
    FileNameContains(String),
    /// File whose name starts with a prefix (e.g., ".flattened-pom-")
    FileNamePrefix(String),
    /// File whose name ends with a suffix (e.g., ".iml")
    FileNameSuffix(String),
}

impl Pattern {
    /// Check if this pattern matches the given entry
    #[must_use]
    pub fn matches(&self, path: &Path, is_dir: bool) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        match self {
            Self::DirName(dir) => is_dir && name == dir,
            Self::FileNameContains(needle) => !is_dir && name.contains(needle.as_str()),
            Self::FileNamePrefix(prefix) => !is_dir && name.starts_with(prefix.as_str()),
            Self::FileNameSuffix(suffix) => !is_dir && name.ends_with(suffix.as_str()),
        }
    }
}

/// Filter deciding which entries of a project tree are skipped
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    patterns: Vec<Pattern>,
}

impl FileFilter {
    /// Create a filter that excludes nothing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// VCS metadata, IDE folders, build output, dependency folders,
    /// flattened-build descriptors and IDE module files
    #[must_use]
    pub fn project_defaults() -> Self {
        let dirs = [".git", ".idea", "target", "node", "node_modules"]
            .into_iter()
            .map(|d| Pattern::DirName(d.to_string()));

        Self::new().with_patterns(
            dirs.chain([
                Pattern::FileNameContains(".gitignore".to_string()),
                Pattern::FileNamePrefix(".flattened-pom-".to_string()),
                Pattern::FileNameSuffix(".iml".to_string()),
            ])
            .collect(),
        )
    }

    /// Add exclusion patterns
    #[must_use]
    pub fn with_patterns(mut self, patterns: Vec<Pattern>) -> Self {
        self.patterns.extend(patterns);
        self
    }

    /// Check if an entry should be skipped
    #[must_use]
    pub fn should_exclude(&self, path: &Path, is_dir: bool) -> bool {
        self.patterns.iter().any(|p| p.matches(path, is_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_dir_name_pattern() {
        let pattern = Pattern::DirName("target".to_string());
        assert!(pattern.matches(&PathBuf::from("mod/target"), true));
        // Files named like the directory are kept
        assert!(!pattern.matches(&PathBuf::from("mod/target"), false));
        assert!(!pattern.matches(&PathBuf::from("mod/targets"), true));
    }

    #[test]
    fn test_file_name_patterns() {
        let contains = Pattern::FileNameContains(".gitignore".to_string());
        assert!(contains.matches(&PathBuf::from("mod/.gitignore"), false));
        assert!(contains.matches(&PathBuf::from("mod/old.gitignore.bak"), false));

        let prefix = Pattern::FileNamePrefix(".flattened-pom-".to_string());
        assert!(prefix.matches(&PathBuf::from("mod/.flattened-pom-1.xml"), false));
        assert!(!prefix.matches(&PathBuf::from("mod/pom.xml"), false));

        let suffix = Pattern::FileNameSuffix(".iml".to_string());
        assert!(suffix.matches(&PathBuf::from("mod/module.iml"), false));
        assert!(!suffix.matches(&PathBuf::from("mod/module.xml"), false));
    }

    #[test]
    fn test_filter_no_patterns() {
        let filter = FileFilter::new();
        assert!(!filter.should_exclude(&PathBuf::from("node_modules"), true));
    }

    #[test]
    fn test_project_defaults() {
        let filter = FileFilter::project_defaults();

        for dir in [".git", ".idea", "target", "node", "node_modules"] {
            assert!(filter.should_exclude(&PathBuf::from(dir), true), "{dir}");
        }
        assert!(filter.should_exclude(&PathBuf::from("a/.gitignore"), false));
        assert!(filter.should_exclude(&PathBuf::from("a/app.iml"), false));
        assert!(filter.should_exclude(&PathBuf::from("a/.flattened-pom-x.xml"), false));

        assert!(!filter.should_exclude(&PathBuf::from("src"), true));
        assert!(!filter.should_exclude(&PathBuf::from("a/Main.java"), false));
    }
}
