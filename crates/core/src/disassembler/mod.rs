//! Disassembler adapters.
//!
//! An adapter drives one external disassembler from the command line: it turns
//! a binary into a tool-specific analysis database and runs scripts inside
//! that database. Adapters are found through an [`AdapterRegistry`] that maps a
//! tool path to the adapter able to drive it.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[cfg(feature = "ida-adapter")]
pub mod ida;

#[cfg(feature = "ida-adapter")]
pub use ida::IdaAdapter;

#[derive(Debug, Error)]
pub enum DisassemblerError {
    #[error("Binary not found at {}", .0.display())]
    MissingBinary(PathBuf),
    #[error("Database not found at {}", .0.display())]
    MissingDatabase(PathBuf),
    #[error("Failed to spawn {}: {source}", .tool.display())]
    Spawn {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} exited with {}", .tool.display(), describe_code(.code))]
    ExternalToolFailed { tool: PathBuf, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// How a non-zero exit (or spawn failure) of the external tool is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitPolicy {
    /// Surface failures as `DisassemblerError`.
    #[default]
    Strict,
    /// Log failures and carry on; callers must check the artifacts themselves.
    Lenient,
}

impl ExitPolicy {
    /// Apply the policy to the outcome of one tool invocation.
    pub fn check(
        self,
        tool: &Path,
        outcome: io::Result<ToolExit>,
    ) -> Result<(), DisassemblerError> {
        match (outcome, self) {
            (Ok(exit), _) if exit.success() => {
                info!("{} finished successfully", tool.display());
                Ok(())
            }
            (Ok(exit), ExitPolicy::Strict) => Err(DisassemblerError::ExternalToolFailed {
                tool: tool.to_path_buf(),
                code: exit.code,
            }),
            (Ok(exit), ExitPolicy::Lenient) => {
                warn!("{} exited with {:?}; continuing", tool.display(), exit.code);
                Ok(())
            }
            (Err(source), ExitPolicy::Strict) => {
                Err(DisassemblerError::Spawn { tool: tool.to_path_buf(), source })
            }
            (Err(source), ExitPolicy::Lenient) => {
                warn!("failed to spawn {}: {}; continuing", tool.display(), source);
                Ok(())
            }
        }
    }
}

/// Exit information of an external tool run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ToolExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Seam over process spawning so adapters can be exercised without the tool.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, blocking until it exits.
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<ToolExit>;
}

/// Runs commands as real child processes, inheriting stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<ToolExit> {
        let status = Command::new(program).args(args).status()?;
        Ok(ToolExit { code: status.code() })
    }
}

/// Trait implemented by disassembler adapters (e.g., IDA).
pub trait DisassemblerAdapter: Send + Sync {
    /// Human-readable name of the disassembler program.
    fn name(&self) -> &'static str;

    /// Command-line path of the tool this adapter drives.
    fn tool_path(&self) -> &Path;

    /// Deterministic database path for `binary`.
    fn database_path(&self, binary: &Path) -> PathBuf;

    /// Create the analysis database for `binary` and return its path.
    ///
    /// With `skip_present`, an existing database is returned without running
    /// the tool.
    fn create_database(
        &self,
        binary: &Path,
        is_windows: bool,
        skip_present: bool,
    ) -> Result<PathBuf, DisassemblerError>;

    /// Execute `script` inside a database created earlier by the same tool.
    fn execute_script(&self, database: &Path, script: &Path) -> Result<(), DisassemblerError>;
}

/// Predicate deciding whether a tool path belongs to an adapter.
pub type IdentifyFn = fn(&Path) -> bool;

/// Constructor for an adapter bound to a tool path.
pub type AdapterFactory = fn(PathBuf, ExitPolicy) -> Box<dyn DisassemblerAdapter>;

struct AdapterEntry {
    name: &'static str,
    identify: IdentifyFn,
    build: AdapterFactory,
}

/// Ordered registry of adapters; the first matching predicate wins.
#[derive(Default)]
pub struct AdapterRegistry {
    entries: Vec<AdapterEntry>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn register(
        &mut self,
        name: &'static str,
        identify: IdentifyFn,
        build: AdapterFactory,
    ) -> &mut Self {
        self.entries.push(AdapterEntry { name, identify, build });
        self
    }

    /// Name of the adapter that would handle `tool`, if any.
    pub fn identify(&self, tool: &Path) -> Option<&'static str> {
        self.entries.iter().find(|e| (e.identify)(tool)).map(|e| e.name)
    }

    /// Build the adapter for `tool`, or `None` when no predicate matches.
    pub fn resolve(
        &self,
        tool: impl AsRef<Path>,
        policy: ExitPolicy,
    ) -> Option<Box<dyn DisassemblerAdapter>> {
        let tool = tool.as_ref();
        self.entries
            .iter()
            .find(|e| (e.identify)(tool))
            .map(|e| (e.build)(tool.to_path_buf(), policy))
    }

    /// Registered adapter names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }
}

#[cfg(feature = "ida-adapter")]
fn ida_adapter(tool: PathBuf, policy: ExitPolicy) -> Box<dyn DisassemblerAdapter> {
    Box::new(IdaAdapter::new(tool).with_exit_policy(policy))
}

/// Convenience builder for a registry populated with every built-in adapter.
pub fn default_adapter_registry() -> AdapterRegistry {
    #[allow(unused_mut)]
    let mut registry = AdapterRegistry::new();
    #[cfg(feature = "ida-adapter")]
    {
        registry.register(ida::NAME, ida::identify, ida_adapter);
    }
    registry
}
