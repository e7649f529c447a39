//! The quality-gate pipeline
//!
//! One job, an ordered list of steps, strict sequential execution with
//! short-circuit failure: the first step that fails aborts the run and every
//! later step is reported as skipped. A step fails iff the process it invokes
//! exits non-zero or cannot be spawned.

use std::path::Path;
use std::process::Command;
use std::time::Instant;

use crate::error::PipelineError;
use crate::output::{RunReport, StepReport, StepStatus};

pub mod steps;

pub use steps::build;

/// Maximum bytes of tool output kept in a failed step's report
const OUTPUT_TAIL_BYTES: usize = 4096;

/// Step class, mirroring the flat error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Environment setup (workspace, interpreter, installs)
    Setup,
    /// Quality gate (format, lint, types)
    Gate,
}

impl StepKind {
    /// Lowercase label used in reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Gate => "gate",
        }
    }
}

/// What a step does when executed
#[derive(Debug, Clone)]
pub enum StepAction {
    /// Run a command; the step passes iff it exits 0
    Command {
        /// Program to invoke
        program: String,
        /// Arguments, in order
        args: Vec<String>,
    },
    /// Verify the run directory is inside a git work tree
    Workspace,
    /// Locate an interpreter matching a major-version specifier
    Interpreter {
        /// Version specifier, e.g. "3" or "3.10"
        spec: String,
    },
}

/// A single pipeline step
#[derive(Debug, Clone)]
pub struct Step {
    /// Display name (e.g., "format check")
    pub name: String,
    /// Setup or gate
    pub kind: StepKind,
    /// The action this step performs
    pub action: StepAction,
}

impl Step {
    /// The command line this step runs, for diagnostics
    #[must_use]
    pub fn command_line(&self) -> String {
        match &self.action {
            StepAction::Command { program, args } => {
                let mut line = program.clone();
                for arg in args {
                    line.push(' ');
                    line.push_str(arg);
                }
                line
            },
            StepAction::Workspace => "git rev-parse --is-inside-work-tree".to_string(),
            StepAction::Interpreter { spec } => format!("python{spec} --version"),
        }
    }
}

/// Execute steps in order, stopping at the first failure.
///
/// Every step gets a report: passed, failed, or (for steps after a failure)
/// skipped. The overall run passes iff no step failed.
#[must_use]
pub fn execute(steps: &[Step], root: &Path, files_checked: usize) -> RunReport {
    let started_at = chrono::Utc::now().to_rfc3339();
    let mut reports = Vec::with_capacity(steps.len());
    let mut failed = false;

    for step in steps {
        if failed {
            reports.push(StepReport {
                name: step.name.clone(),
                kind: step.kind.as_str().to_string(),
                command: step.command_line(),
                status: StepStatus::Skipped,
                exit_code: None,
                duration_ms: 0,
                output_tail: None,
            });
            continue;
        }

        log::debug!("running step '{}'", step.name);
        let start = Instant::now();
        let outcome = run_step(step, root);
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let report = match outcome {
            Ok(()) => StepReport {
                name: step.name.clone(),
                kind: step.kind.as_str().to_string(),
                command: step.command_line(),
                status: StepStatus::Passed,
                exit_code: Some(0),
                duration_ms,
                output_tail: None,
            },
            Err((err, tail)) => {
                failed = true;
                log::warn!("step '{}' failed: {err}", step.name);
                StepReport {
                    name: step.name.clone(),
                    kind: step.kind.as_str().to_string(),
                    command: step.command_line(),
                    status: StepStatus::Failed,
                    exit_code: match &err {
                        PipelineError::Gate { code, .. } => Some(*code),
                        _ => None,
                    },
                    duration_ms,
                    output_tail: tail,
                }
            },
        };
        reports.push(report);
    }

    RunReport {
        passed: !failed,
        files_checked,
        started_at,
        steps: reports,
    }
}

/// Run one step to completion.
///
/// On failure returns the typed error plus a bounded tail of whatever the
/// tool wrote, for the report.
fn run_step(step: &Step, root: &Path) -> Result<(), (PipelineError, Option<String>)> {
    match &step.action {
        StepAction::Command { program, args } => run_command(step, program, args, root),
        StepAction::Workspace => {
            if crate::fileset::in_work_tree(root) {
                Ok(())
            } else {
                Err((
                    PipelineError::Setup {
                        step: step.name.clone(),
                        detail: "not inside a git work tree".to_string(),
                    },
                    None,
                ))
            }
        },
        StepAction::Interpreter { spec } => match steps::resolve_interpreter(spec) {
            Some(found) => {
                log::debug!("interpreter: {} ({})", found.program, found.version);
                Ok(())
            },
            None => Err((
                PipelineError::Setup {
                    step: step.name.clone(),
                    detail: format!("no python interpreter matching '{spec}' found"),
                },
                None,
            )),
        },
    }
}

fn run_command(
    step: &Step,
    program: &str,
    args: &[String],
    root: &Path,
) -> Result<(), (PipelineError, Option<String>)> {
    let output = Command::new(program).args(args).current_dir(root).output().map_err(|e| {
        (
            PipelineError::Spawn {
                command: program.to_string(),
                source: e,
            },
            None,
        )
    })?;

    if output.status.success() {
        return Ok(());
    }

    let code = output.status.code().unwrap_or(-1);
    let err = match step.kind {
        StepKind::Gate => PipelineError::Gate {
            step: step.name.clone(),
            code,
        },
        StepKind::Setup => PipelineError::Setup {
            step: step.name.clone(),
            detail: format!("exited with code {code}"),
        },
    };
    Err((err, Some(output_tail(&output.stdout, &output.stderr))))
}

/// Combine stdout and stderr, keeping at most the last `OUTPUT_TAIL_BYTES`
fn output_tail(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    let err = String::from_utf8_lossy(stderr);
    if !err.is_empty() {
        if !combined.is_empty() {
            combined.push('\n');
        }
        combined.push_str(&err);
    }
    if combined.len() > OUTPUT_TAIL_BYTES {
        // Trim from the front, keeping the tail on a char boundary
        let mut cut = combined.len() - OUTPUT_TAIL_BYTES;
        while !combined.is_char_boundary(cut) {
            cut += 1;
        }
        combined.split_off(cut)
    } else {
        combined
    }
}
