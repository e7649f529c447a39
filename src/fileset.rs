//! Checked file set
//!
//! The set of files the gates run over: repository-tracked files matching
//! `*.py`, minus every path under an excluded prefix. Computed fresh from
//! `git ls-files` on each run and never persisted.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Check whether a directory is inside a git work tree
#[must_use]
pub fn in_work_tree(root: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(root)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Resolve the top-level work tree directory for a path.
///
/// Exclusion prefixes anchor at the repository root, so listing must happen
/// from the top level even when pygate is started in a subdirectory.
#[must_use]
pub fn work_tree_root(dir: &Path) -> Option<PathBuf> {
    Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(dir)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| PathBuf::from(s.trim()))
        .filter(|p| !p.as_os_str().is_empty())
}

/// List all repository-tracked files under a root
pub fn tracked_files(root: &Path) -> anyhow::Result<Vec<String>> {
    let output = Command::new("git").arg("ls-files").current_dir(root).output()?;

    if !output.status.success() {
        anyhow::bail!("failed to list tracked files (is this a git repository?)");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().map(String::from).filter(|s| !s.is_empty()).collect())
}

/// Apply the `*.py` match and prefix exclusions to a file list.
///
/// Exclusion prefixes anchor at the repository root and match whole path
/// components: `tests/` drops `tests/b.py` but keeps `tests.py` and
/// `src/tests/x.py`.
#[must_use]
pub fn filter(files: &[String], exclude: &[String]) -> Vec<String> {
    let prefixes: Vec<String> = exclude
        .iter()
        .map(|p| {
            if p.ends_with('/') {
                p.clone()
            } else {
                format!("{p}/")
            }
        })
        .collect();

    files
        .iter()
        .filter(|f| f.ends_with(".py"))
        .filter(|f| !prefixes.iter().any(|p| f.starts_with(p.as_str())))
        .cloned()
        .collect()
}

/// Compute the checked file set for a directory inside a repository.
///
/// Paths are always relative to the repository root, regardless of where
/// inside the work tree pygate was started.
pub fn collect(dir: &Path, exclude: &[String]) -> anyhow::Result<Vec<String>> {
    let root = work_tree_root(dir).ok_or_else(|| {
        anyhow::anyhow!("failed to resolve repository root (is this a git repository?)")
    })?;
    let tracked = tracked_files(&root)?;
    let files = filter(&tracked, exclude);
    log::debug!("{} tracked file(s), {} in checked set", tracked.len(), files.len());
    Ok(files)
}
