//! Custom-to-standard path resolution
//!
//! Custom trees rename, prefix or relocate files relative to the standard
//! tree following a small set of known conventions. The resolver tries them
//! as an ordered chain:
//!
//! 1. swap the custom root for the standard root,
//! 2. strip a configured prefix from the file name,
//! 3. rename firmware variant folders (`firmware/src/<variant>/...`).
//!
//! The heuristics are pure functions over path segments; only the
//! existence checks go through [`FileLookup`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::RunConfig;

/// Folder name every `*2ts*` firmware variant maps to in the standard tree
pub const STANDARD_2TS_FOLDER: &str = "standart2ts";

/// Existence check used by the resolver
pub trait FileLookup {
    /// Whether a regular file exists at `path`
    fn is_file(&self, path: &Path) -> bool;
}

/// Lookup backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct Filesystem;

impl FileLookup for Filesystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

impl<L: FileLookup + ?Sized> FileLookup for &L {
    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }
}

/// Maps custom-tree files to their standard-tree counterparts
#[derive(Debug, Clone)]
pub struct PathResolver<L = Filesystem> {
    custom_root: PathBuf,
    standard_root: PathBuf,
    prefixes: Vec<String>,
    lookup: L,
}

impl PathResolver<Filesystem> {
    /// Create a resolver checking existence on disk
    #[must_use]
    pub fn new(config: &RunConfig) -> Self {
        Self::with_lookup(config, Filesystem)
    }
}

impl<L: FileLookup> PathResolver<L> {
    /// Create a resolver with a custom existence check
    #[must_use]
    pub fn with_lookup(config: &RunConfig, lookup: L) -> Self {
        Self {
            custom_root: config.custom_root.clone(),
            standard_root: config.standard_root.clone(),
            prefixes: config.prefixes.clone(),
            lookup,
        }
    }

    /// Find the standard file matching `custom_path`, if any
    #[must_use]
    pub fn resolve(&self, custom_path: &Path) -> Option<PathBuf> {
        let substituted = substitute_root(custom_path, &self.custom_root, &self.standard_root)?;
        if self.lookup.is_file(&substituted) {
            return Some(substituted);
        }

        let segments = split_segments(&substituted);

        for candidate in strip_prefix_candidates(&segments, &self.prefixes) {
            let path = join_segments(&candidate);
            if self.lookup.is_file(&path) {
                tracing::debug!("Resolved {} by prefix stripping", custom_path.display());
                return Some(path);
            }
        }

        let renamed = join_segments(&rename_firmware_folders(&segments)?);
        if self.lookup.is_file(&renamed) {
            tracing::debug!("Resolved {} by firmware renaming", custom_path.display());
            return Some(renamed);
        }

        None
    }
}

/// Replace the `from` root of `path` with `to`, keeping the remainder verbatim
#[must_use]
pub fn substitute_root(path: &Path, from: &Path, to: &Path) -> Option<PathBuf> {
    path.strip_prefix(from).ok().map(|rest| to.join(rest))
}

/// Split a path into its components
#[must_use]
pub fn split_segments(path: &Path) -> Vec<OsString> {
    path.components()
        .map(|component| component.as_os_str().to_os_string())
        .collect()
}

/// Rebuild a path from segments produced by [`split_segments`]
#[must_use]
pub fn join_segments(segments: &[OsString]) -> PathBuf {
    segments.iter().collect()
}

/// Candidates with one configured prefix removed from the final segment,
/// in prefix order
///
/// A prefix the file name does not start with, or one that would leave an
/// empty name, yields no candidate.
#[must_use]
pub fn strip_prefix_candidates(segments: &[OsString], prefixes: &[String]) -> Vec<Vec<OsString>> {
    let Some((last, parents)) = segments.split_last() else {
        return Vec::new();
    };
    let Some(name) = last.to_str() else {
        return Vec::new();
    };

    prefixes
        .iter()
        .filter(|prefix| !prefix.is_empty())
        .filter_map(|prefix| name.strip_prefix(prefix.as_str()))
        .filter(|stripped| !stripped.is_empty())
        .map(|stripped| {
            let mut candidate = parents.to_vec();
            candidate.push(OsString::from(stripped));
            candidate
        })
        .collect()
}

/// Rename every folder sitting directly under a `firmware/src` pair
///
/// Returns `None` when no segment changed.
#[must_use]
pub fn rename_firmware_folders(segments: &[OsString]) -> Option<Vec<OsString>> {
    let mut renamed = segments.to_vec();
    let mut changed = false;

    // The final segment is the file itself, never a variant folder
    for i in 2..segments.len().saturating_sub(1) {
        if segments[i - 2] != "firmware" || segments[i - 1] != "src" {
            continue;
        }
        if let Some(new_name) = segments[i].to_str().and_then(rename_variant) {
            renamed[i] = OsString::from(new_name);
            changed = true;
        }
    }

    changed.then_some(renamed)
}

/// Standard-tree name of a firmware variant folder, if it differs
///
/// `*2ts*` folders map to [`STANDARD_2TS_FOLDER`]; otherwise a hyphenated
/// name keeps the part after the first hyphen.
#[must_use]
pub fn rename_variant(name: &str) -> Option<String> {
    let renamed = if name.contains("2ts") {
        STANDARD_2TS_FOLDER
    } else {
        name.split_once('-').map(|(_, rest)| rest)?
    };

    (!renamed.is_empty() && renamed != name).then(|| renamed.to_string())
}
