//! Workflow configuration
//!
//! Defaults reproduce the original quality-gate workflow exactly: Python 3,
//! black 22.6.0, pylint v3.0.0a3, mypy v0.902, types-setuptools, with
//! `tests/`, `docs/` and `examples/` excluded from every check. A committed
//! `.pygate.toml` at the repository root overrides individual fields.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Project configuration filename
pub const PYGATE_TOML: &str = ".pygate.toml";

/// Workflow configuration for a repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Interpreter major-version specifier (e.g., "3" or "3.10")
    #[serde(default = "default_python")]
    pub python: String,

    /// Path prefixes excluded from every check
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Version pins for the three quality tools
    #[serde(default)]
    pub tools: ToolPins,

    /// Additional packages installed unpinned alongside the tools
    #[serde(default = "default_extra_packages")]
    pub extra_packages: Vec<String>,
}

/// Version pins for the quality tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolPins {
    /// black version pin
    #[serde(default = "default_black")]
    pub black: String,
    /// pylint version pin
    #[serde(default = "default_pylint")]
    pub pylint: String,
    /// mypy version pin
    #[serde(default = "default_mypy")]
    pub mypy: String,
}

fn default_python() -> String {
    "3".to_string()
}

fn default_exclude() -> Vec<String> {
    vec!["tests/".to_string(), "docs/".to_string(), "examples/".to_string()]
}

fn default_extra_packages() -> Vec<String> {
    vec!["types-setuptools".to_string()]
}

fn default_black() -> String {
    "22.6.0".to_string()
}

// pip normalizes the leading "v"; the strings are kept verbatim from the
// workflow they reproduce.
fn default_pylint() -> String {
    "v3.0.0a3".to_string()
}

fn default_mypy() -> String {
    "v0.902".to_string()
}

impl Default for ToolPins {
    fn default() -> Self {
        Self {
            black: default_black(),
            pylint: default_pylint(),
            mypy: default_mypy(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            python: default_python(),
            exclude: default_exclude(),
            tools: ToolPins::default(),
            extra_packages: default_extra_packages(),
        }
    }
}

impl Config {
    /// Get the config file path for a repository root
    #[must_use]
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(PYGATE_TOML)
    }

    /// Load config from a repository root.
    ///
    /// A missing file means pure defaults; a malformed file is a hard error
    /// so a typo never silently widens the checked file set.
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let path = Self::path_in(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        let config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Save config to a repository root
    pub fn save(&self, root: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(Self::path_in(root), content)?;
        Ok(())
    }

    /// The pip requirement specifiers installed by the tool-install step
    #[must_use]
    pub fn install_specs(&self) -> Vec<String> {
        let mut specs = vec![
            format!("black=={}", self.tools.black),
            format!("pylint=={}", self.tools.pylint),
            format!("mypy=={}", self.tools.mypy),
        ];
        specs.extend(self.extra_packages.iter().cloned());
        specs
    }
}
