//! Commit queries through the `git` command line

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use super::{CommitProbe, CommitTimestamp, ProbeError};
use crate::config::DEFAULT_GIT_PROGRAM;

/// Probe that shells out to `git log`
///
/// Each query runs in the file's own directory, so whichever repository
/// contains the file answers for it. The file name is passed as a literal
/// pathspec so glob characters and `:` magic in names are not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCliProbe {
    program: String,
}

impl GitCliProbe {
    /// Create a probe invoking the given git executable
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Committer dates of commits touching `path`, newest first in history order
    fn log(&self, path: &Path, extra: &[&str]) -> Result<Vec<CommitTimestamp>, ProbeError> {
        let (dir, name) = match (path.parent(), path.file_name()) {
            (Some(dir), Some(name)) => {
                let dir = if dir.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    dir
                };
                (dir, name)
            }
            _ => {
                return Err(ProbeError::InvalidWorkingDir {
                    path: path.to_path_buf(),
                });
            }
        };
        if !dir.is_dir() {
            return Err(ProbeError::InvalidWorkingDir {
                path: path.to_path_buf(),
            });
        }

        let mut args: Vec<&OsStr> = vec![
            OsStr::new("--literal-pathspecs"),
            OsStr::new("-c"),
            OsStr::new("log.showSignature=false"),
            OsStr::new("log"),
            OsStr::new("--format=%cI"),
        ];
        args.extend(extra.iter().map(|arg| OsStr::new(*arg)));
        args.push(OsStr::new("--"));
        args.push(name);

        let rendered = format!(
            "{} {}",
            self.program,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );
        tracing::debug!("Running `{rendered}` in {}", dir.display());

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(dir)
            .output()
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                dir: dir.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::CommandFailed {
                command: rendered,
                dir: dir.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                CommitTimestamp::parse(line).map_err(|_| ProbeError::MalformedOutput {
                    command: rendered.clone(),
                    line: line.to_string(),
                })
            })
            .collect()
    }
}

impl Default for GitCliProbe {
    fn default() -> Self {
        Self::new(DEFAULT_GIT_PROGRAM)
    }
}

impl CommitProbe for GitCliProbe {
    fn last_commit(&self, path: &Path) -> Result<Option<CommitTimestamp>, ProbeError> {
        Ok(self.log(path, &["-1"])?.into_iter().next())
    }

    fn last_commit_after(
        &self,
        path: &Path,
        after: &CommitTimestamp,
    ) -> Result<Option<CommitTimestamp>, ProbeError> {
        // `--after` stops walking at the first older commit, so rebased or
        // cherry-picked history would hide later dates. Scan all of it.
        Ok(self
            .log(path, &[])?
            .into_iter()
            .filter(|found| found > after)
            .max())
    }
}
