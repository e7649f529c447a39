//! Concrete step definitions
//!
//! Builds the ordered step list for a run: workspace and interpreter checks,
//! pip bootstrap, then the three quality gates. The commands and their
//! ordering reproduce the original workflow verbatim:
//!
//! 1. `pip install --upgrade pip`
//! 2. `pip install black==<pin> pylint==<pin> mypy==<pin> <extras>`
//! 3. `black --diff --check <files>`
//! 4. `pylint --disable=all --enable=unused-import <files>`
//! 5. `mypy --strict <files>`

use std::process::Command;

use regex::Regex;

use super::{Step, StepAction, StepKind};
use crate::config::Config;

/// An interpreter located on PATH
#[derive(Debug, Clone)]
pub struct FoundInterpreter {
    /// The program name that answered (e.g., "python3")
    pub program: String,
    /// The full version it reported (e.g., "3.10.12")
    pub version: String,
}

/// Build the full pipeline: setup steps then gate steps.
///
/// With `no_install` the two pip steps are omitted (tools assumed present).
/// Gate steps are omitted when the checked file set is empty, since the
/// tools reject an empty argument list.
#[must_use]
pub fn build(config: &Config, files: &[String], no_install: bool) -> Vec<Step> {
    let mut steps = vec![
        workspace_step(),
        Step {
            name: "python interpreter".to_string(),
            kind: StepKind::Setup,
            action: StepAction::Interpreter {
                spec: config.python.clone(),
            },
        },
    ];

    if !no_install {
        steps.push(Step {
            name: "upgrade pip".to_string(),
            kind: StepKind::Setup,
            action: command("pip", &["install", "--upgrade", "pip"]),
        });
        let mut install_args = vec!["install".to_string()];
        install_args.extend(config.install_specs());
        steps.push(Step {
            name: "install tools".to_string(),
            kind: StepKind::Setup,
            action: StepAction::Command {
                program: "pip".to_string(),
                args: install_args,
            },
        });
    }

    steps.extend(gates(files));
    steps
}

/// Build the `check` pipeline: workspace check plus the gate steps.
#[must_use]
pub fn check_only(files: &[String]) -> Vec<Step> {
    let mut steps = vec![workspace_step()];
    steps.extend(gates(files));
    steps
}

fn workspace_step() -> Step {
    Step {
        name: "workspace check".to_string(),
        kind: StepKind::Setup,
        action: StepAction::Workspace,
    }
}

/// Build only the gate steps (plus nothing else).
///
/// Returns an empty list for an empty file set.
#[must_use]
pub fn gates(files: &[String]) -> Vec<Step> {
    if files.is_empty() {
        return Vec::new();
    }

    let with_files = |base: &[&str]| {
        let mut args: Vec<String> = base.iter().map(ToString::to_string).collect();
        args.extend(files.iter().cloned());
        args
    };

    vec![
        Step {
            name: "format check".to_string(),
            kind: StepKind::Gate,
            action: StepAction::Command {
                program: "black".to_string(),
                args: with_files(&["--diff", "--check"]),
            },
        },
        Step {
            name: "unused-import lint".to_string(),
            kind: StepKind::Gate,
            action: StepAction::Command {
                program: "pylint".to_string(),
                args: with_files(&["--disable=all", "--enable=unused-import"]),
            },
        },
        Step {
            name: "strict type check".to_string(),
            kind: StepKind::Gate,
            action: StepAction::Command {
                program: "mypy".to_string(),
                args: with_files(&["--strict"]),
            },
        },
    ]
}

fn command(program: &str, args: &[&str]) -> StepAction {
    StepAction::Command {
        program: program.to_string(),
        args: args.iter().map(ToString::to_string).collect(),
    }
}

/// Find a Python interpreter on PATH matching a major-version specifier.
///
/// Tries `python{spec}` first (e.g., `python3`, `python3.10`), then the
/// generic names, and verifies the reported version against the spec.
#[must_use]
pub fn resolve_interpreter(spec: &str) -> Option<FoundInterpreter> {
    let specific = format!("python{spec}");
    let candidates = [specific.as_str(), "python3", "python"];

    let mut tried = Vec::new();
    for candidate in candidates {
        if tried.contains(&candidate) {
            continue;
        }
        tried.push(candidate);

        if let Some(version) = probe_version(candidate) {
            if version_matches(&version, spec) {
                return Some(FoundInterpreter {
                    program: candidate.to_string(),
                    version,
                });
            }
            log::debug!("{candidate} reports {version}, wanted {spec}");
        }
    }
    None
}

/// Ask a program for its version, parsing `Python X.Y.Z` output
fn probe_version(program: &str) -> Option<String> {
    let output = Command::new(program).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    // Python 2 printed the version to stderr
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    let re = Regex::new(r"Python (\d+(?:\.\d+)*)").ok()?;
    re.captures(&text).map(|c| c[1].to_string())
}

/// Whether a full version satisfies a major-version specifier.
///
/// "3" matches "3.10.12"; "3.10" matches "3.10.x" but not "3.1.x".
fn version_matches(version: &str, spec: &str) -> bool {
    version == spec || version.starts_with(&format!("{spec}."))
}
