//! Pipeline error types
//!
//! The taxonomy is deliberately flat, mirroring how a CI job surfaces
//! failures: a step either could not set up its environment or a quality
//! gate rejected the code. Both are fatal within a run.

use thiserror::Error;

/// Errors produced while executing the step pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An environment-setup step failed (workspace, interpreter, installs)
    #[error("setup step '{step}' failed: {detail}")]
    Setup {
        /// Name of the failing step
        step: String,
        /// What went wrong
        detail: String,
    },

    /// A quality gate rejected the code (non-zero tool exit)
    #[error("gate '{step}' failed with exit code {code}")]
    Gate {
        /// Name of the failing gate
        step: String,
        /// Exit code reported by the tool
        code: i32,
    },

    /// The step's command could not be spawned at all
    #[error("could not run '{command}': {source}")]
    Spawn {
        /// The program that failed to start
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Whether this error came from a quality gate (as opposed to setup)
    #[must_use]
    pub const fn is_gate_failure(&self) -> bool {
        matches!(self, Self::Gate { .. })
    }
}
