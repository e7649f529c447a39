//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Terminal status of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step ran and exited 0
    Passed,
    /// Step ran and exited non-zero (or failed to start)
    Failed,
    /// Step never ran because an earlier step failed
    Skipped,
}

/// Report for a single executed (or skipped) step
#[derive(Debug, Serialize)]
pub struct StepReport {
    /// Step name (e.g., "format check")
    pub name: String,
    /// Step class: "setup" or "gate"
    pub kind: String,
    /// The command line the step runs, for diagnostics
    pub command: String,
    /// Outcome of the step
    pub status: StepStatus,
    /// Exit code, when the step ran to completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Wall-clock duration in milliseconds (zero when skipped)
    pub duration_ms: u64,
    /// Bounded tail of the tool's output, kept for failed steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_tail: Option<String>,
}

/// Result of a full pipeline run
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Whether every executed step passed
    pub passed: bool,
    /// Number of files in the checked set
    pub files_checked: usize,
    /// When the run started (RFC3339)
    pub started_at: String,
    /// Per-step reports, in execution order
    pub steps: Vec<StepReport>,
}

/// Result of a file-set listing
#[derive(Debug, Serialize)]
pub struct FileListResult {
    /// Files in the checked set, in git's listing order
    pub files: Vec<String>,
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl RunReport {
    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!("Checking {} file(s)...\n", self.files_checked);

        for step in &self.steps {
            let marker = match step.status {
                StepStatus::Passed => "ok".green(),
                StepStatus::Failed => "FAIL".red(),
                StepStatus::Skipped => "skip".dimmed(),
            };
            match step.status {
                StepStatus::Skipped => println!("  [{marker}] {}", step.name),
                _ => println!("  [{marker}] {} ({} ms)", step.name, step.duration_ms),
            }
        }

        println!();
        if self.passed {
            println!("{}", "All quality gates passed.".green());
        } else if let Some(failed) = self.steps.iter().find(|s| s.status == StepStatus::Failed) {
            if let Some(code) = failed.exit_code {
                println!("{} '{}' exited with code {code}", "FAILED:".red(), failed.name);
            } else {
                println!("{} '{}' could not run", "FAILED:".red(), failed.name);
            }
            println!("  command: {}", failed.command);
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl FileListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                for file in &self.files {
                    println!("{file}");
                }
            },
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
