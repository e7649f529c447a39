//! Run only the quality gates

use std::path::Path;

use pygate::config::Config;
use pygate::output::OutputMode;
use pygate::pipeline::steps;
use pygate::{fileset, pipeline};

/// Run the gate steps over the checked file set, skipping environment setup.
///
/// The workspace check still applies: the file set is undefined outside a
/// git work tree.
pub fn check(root: &Path, mode: OutputMode) -> anyhow::Result<()> {
    // Config and file paths anchor at the top-level work tree, so execution
    // happens from there.
    let top = fileset::work_tree_root(root);
    let config = Config::load(top.as_deref().unwrap_or(root))?;
    let (exec_root, files) = match top {
        Some(top) => {
            let files = fileset::collect(&top, &config.exclude)?;
            (top, files)
        },
        None => (root.to_path_buf(), Vec::new()),
    };

    let step_list = steps::check_only(&files);
    let report = pipeline::execute(&step_list, &exec_root, files.len());
    report.render(mode);

    if !report.passed {
        std::process::exit(1);
    }
    Ok(())
}
