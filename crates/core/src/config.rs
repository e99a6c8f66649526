//! Tool configuration.
//!
//! Optional JSON or YAML file describing which disassembler to drive, which
//! identification script to run, and how strictly to treat tool failures.
//! Every field has a default, so an empty object is a valid config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::disassembler::ExitPolicy;

/// Environment variable overriding the configured disassembler path.
pub const DISASSEMBLER_ENV: &str = "LIBSEEK_DISASSEMBLER";

fn default_skip_present() -> bool {
    true
}

/// Serializable configuration shared by the CLI commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Command-line path of the disassembler (e.g. `/opt/ida/idat64`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disassembler: Option<String>,
    /// Identification script executed inside the analysis database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// Reuse an existing analysis database instead of rebuilding it.
    #[serde(default = "default_skip_present")]
    pub skip_present: bool,
    #[serde(default)]
    pub exit_policy: ExitPolicy,
    /// Restrict scans to these library names; all registered seekers otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seekers: Option<Vec<String>>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            disassembler: None,
            script: None,
            skip_present: default_skip_present(),
            exit_policy: ExitPolicy::default(),
            seekers: None,
        }
    }
}

impl ToolConfig {
    /// Disassembler path, preferring `LIBSEEK_DISASSEMBLER` over the file value.
    pub fn disassembler_path(&self) -> Option<PathBuf> {
        std::env::var_os(DISASSEMBLER_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.disassembler.as_ref().map(PathBuf::from))
    }
}

/// Load a config file (`.yaml`/`.yml` as YAML, anything else as JSON).
pub fn load_tool_config(path: impl AsRef<Path>) -> Result<ToolConfig> {
    let path = path.as_ref();
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let config = if matches!(ext, "yaml" | "yml") {
        serde_yaml::from_str(&body).context("Failed to parse config YAML")?
    } else {
        serde_json::from_str(&body).context("Failed to parse config JSON")?
    };
    Ok(config)
}

/// Load `path` if given, otherwise fall back to defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ToolConfig> {
    match path {
        Some(p) => load_tool_config(p),
        None => Ok(ToolConfig::default()),
    }
}
