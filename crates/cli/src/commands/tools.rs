use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use libseek_core::config::{load_or_default, ToolConfig, DISASSEMBLER_ENV};
use libseek_core::disassembler::{default_adapter_registry, DisassemblerAdapter, ExitPolicy};
use libseek_core::services::pipeline::{prepare_and_run, PipelineRequest};

use crate::sha256_file;

/// Options shared by every command that drives the disassembler.
#[derive(Debug, Clone, Default)]
pub struct ToolOptions {
    /// Explicit tool path; wins over config and environment.
    pub tool: Option<String>,
    /// Force lenient exit handling regardless of config.
    pub lenient: bool,
    pub config: Option<String>,
}

impl ToolOptions {
    fn load_config(&self) -> Result<ToolConfig> {
        load_or_default(self.config.as_deref().map(Path::new))
    }

    fn exit_policy(&self, config: &ToolConfig) -> ExitPolicy {
        if self.lenient {
            ExitPolicy::Lenient
        } else {
            config.exit_policy
        }
    }

    fn tool_path(&self, config: &ToolConfig) -> Result<PathBuf> {
        if let Some(tool) = &self.tool {
            return Ok(PathBuf::from(tool));
        }
        config.disassembler_path().ok_or_else(|| {
            anyhow!("No disassembler configured. Pass --tool or set {DISASSEMBLER_ENV}")
        })
    }
}

/// Find the adapter able to drive `tool`.
pub fn resolve_adapter(tool: &Path, policy: ExitPolicy) -> Result<Box<dyn DisassemblerAdapter>> {
    let registry = default_adapter_registry();
    registry.resolve(tool, policy).ok_or_else(|| {
        anyhow!(
            "No supported disassembler found for {} (supported: {})",
            tool.display(),
            registry.names().join(", ")
        )
    })
}

fn adapter_for(options: &ToolOptions) -> Result<(ToolConfig, Box<dyn DisassemblerAdapter>)> {
    let config = options.load_config()?;
    let tool = options.tool_path(&config)?;
    let adapter = resolve_adapter(&tool, options.exit_policy(&config))?;
    tracing::debug!("Using {} adapter for {}", adapter.name(), tool.display());
    Ok((config, adapter))
}

/// Report which adapter handles the given tool path.
pub fn resolve_tool_command(tool: &str) -> Result<()> {
    let registry = default_adapter_registry();
    match registry.identify(Path::new(tool)) {
        Some(name) => {
            println!("{}: {}", tool, name);
            Ok(())
        }
        None => Err(anyhow!(
            "No supported disassembler found for {} (supported: {})",
            tool,
            registry.names().join(", ")
        )),
    }
}

/// Create (or reuse) the analysis database for `binary`.
pub fn create_db_command(
    binary: &str,
    is_windows: bool,
    force: bool,
    options: &ToolOptions,
) -> Result<PathBuf> {
    let (config, adapter) = adapter_for(options)?;
    let skip_present = config.skip_present && !force;
    let database = adapter
        .create_database(Path::new(binary), is_windows, skip_present)
        .with_context(|| format!("Failed to create {} database for {}", adapter.name(), binary))?;

    println!("Database: {}", database.display());
    Ok(database)
}

/// Execute a script inside an existing analysis database.
pub fn run_script_command(database: &str, script: &str, options: &ToolOptions) -> Result<()> {
    let (_config, adapter) = adapter_for(options)?;
    adapter
        .execute_script(Path::new(database), Path::new(script))
        .with_context(|| format!("Failed to execute {} in {}", script, database))?;

    println!("Executed {} in {}", script, database);
    Ok(())
}

/// Full pipeline: build/reuse the database, then run the identification script.
pub fn analyze_command(
    binary: &str,
    script: Option<String>,
    is_windows: bool,
    force: bool,
    options: &ToolOptions,
) -> Result<PathBuf> {
    let (config, adapter) = adapter_for(options)?;
    let script = script.or_else(|| config.script.clone()).ok_or_else(|| {
        anyhow!("No identification script given. Pass --script or add \"script\" to the config")
    })?;

    let binary_path = PathBuf::from(binary);
    let hash = sha256_file(&binary_path)?;
    let request = PipelineRequest {
        binary: binary_path,
        script: PathBuf::from(&script),
        is_windows,
        skip_present: config.skip_present && !force,
    };
    let database = prepare_and_run(adapter.as_ref(), &request)
        .with_context(|| format!("Failed to analyze {} with {}", binary, adapter.name()))?;

    println!("Analyzed binary:");
    println!("  Path: {}", binary);
    println!("  SHA-256: {}", hash);
    println!("  Disassembler: {} ({})", adapter.name(), adapter.tool_path().display());
    println!("  Database: {}", database.display());
    println!("  Script: {}", script);

    Ok(database)
}
