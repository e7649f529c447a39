//! Run the full pipeline

use std::path::Path;

use pygate::config::Config;
use pygate::output::OutputMode;
use pygate::{fileset, pipeline};

/// Execute the full pipeline: setup steps, then every quality gate.
///
/// Renders a run report and exits 1 when any step fails, so CI sees a
/// failed check.
pub fn run(root: &Path, no_install: bool, mode: OutputMode) -> anyhow::Result<()> {
    // Config and file paths anchor at the top-level work tree, and gates
    // receive root-relative paths, so the whole pipeline executes from
    // there. If the workspace check is going to fail, let it fail as a
    // pipeline step rather than erroring out before the run starts.
    let top = fileset::work_tree_root(root);
    let config = Config::load(top.as_deref().unwrap_or(root))?;
    let (exec_root, files) = match top {
        Some(top) => {
            let files = fileset::collect(&top, &config.exclude)?;
            (top, files)
        },
        None => (root.to_path_buf(), Vec::new()),
    };

    if files.is_empty() {
        log::info!("no files in checked set; gates are trivially satisfied");
    }

    let steps = pipeline::build(&config, &files, no_install);
    let report = pipeline::execute(&steps, &exec_root, files.len());
    report.render(mode);

    if !report.passed {
        std::process::exit(1);
    }
    Ok(())
}
