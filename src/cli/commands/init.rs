//! Initialize pygate in a repository

use std::path::Path;

use pygate::config::{Config, PYGATE_TOML};
use pygate::output::{OperationResult, OutputMode};

/// Write a default `.pygate.toml` to the repository root.
///
/// The defaults reproduce the original workflow pins; the file exists so
/// teams can adjust exclusions or pins and commit the change.
pub fn init(root: &Path, force: bool, mode: OutputMode) -> anyhow::Result<()> {
    // Inside a work tree the config belongs at the top level; outside one
    // (a repo about to be initialized) the given directory is used as-is.
    let root = pygate::fileset::work_tree_root(root).unwrap_or_else(|| root.to_path_buf());
    let path = Config::path_in(&root);

    if path.exists() && !force {
        OperationResult {
            success: false,
            message: format!("Already initialized ({PYGATE_TOML} exists). Use --force to overwrite."),
        }
        .render(mode);
        return Ok(());
    }

    Config::default().save(&root)?;

    OperationResult {
        success: true,
        message: format!("Created {PYGATE_TOML} with default pins and exclusions."),
    }
    .render(mode);
    Ok(())
}
