//! Git repository fixtures for tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Whether a `git` executable is available on PATH
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// Check for git before a repository-backed test, reporting a skip if absent
pub fn require_git(test: &str) -> bool {
    let available = git_available();
    if !available {
        eprintln!("SKIPPED {test}: git not found on PATH");
    }
    available
}

/// A real repository with commits at controlled dates
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Run `git init` in `root` and configure a throwaway identity
    ///
    /// # Panics
    /// Panics if any git operation fails.
    pub fn init(root: &Path) -> Self {
        fs::create_dir_all(root).unwrap();
        let repo = Self {
            root: root.to_path_buf(),
        };
        repo.git(&["init", "-q"], None);
        repo.git(&["config", "user.email", "test@example.com"], None);
        repo.git(&["config", "user.name", "Test"], None);
        repo.git(&["config", "commit.gpgsign", "false"], None);
        repo.git(&["config", "core.autocrlf", "false"], None);
        repo
    }

    /// Write a file without committing it
    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Write and commit a file with both author and committer date set to `date`
    ///
    /// # Panics
    /// Panics if any git operation fails.
    pub fn commit_file(&self, rel: &str, content: &str, date: &str) -> PathBuf {
        let path = self.write_file(rel, content);
        self.git(&["--literal-pathspecs", "add", "--", rel], None);
        self.git(&["commit", "-q", "-m", &format!("update {rel}")], Some(date));
        path
    }

    fn git(&self, args: &[&str], date: Option<&str>) {
        let mut command = Command::new("git");
        command.args(args).current_dir(&self.root);
        if let Some(date) = date {
            command
                .env("GIT_AUTHOR_DATE", date)
                .env("GIT_COMMITTER_DATE", date);
        }
        let output = command
            .output()
            .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
        assert!(
            output.status.success(),
            "`git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
