//! Print the checked file set

use std::path::Path;

use pygate::config::Config;
use pygate::fileset;
use pygate::output::{FileListResult, OutputMode};

/// Print the files the gates would run over, one per line.
///
/// Lets users audit the filter directly: tracked `*.py` files minus the
/// configured exclusions.
pub fn files(root: &Path, mode: OutputMode) -> anyhow::Result<()> {
    // Config anchors at the top-level work tree, like the file paths
    let config = Config::load(fileset::work_tree_root(root).as_deref().unwrap_or(root))?;
    let files = fileset::collect(root, &config.exclude)?;

    FileListResult { files }.render(mode);
    Ok(())
}
