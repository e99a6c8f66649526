use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::disassembler::{DisassemblerAdapter, DisassemblerError};

/// Inputs for building a database and running the identification script.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub binary: PathBuf,
    pub script: PathBuf,
    pub is_windows: bool,
    pub skip_present: bool,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Disassembler(#[from] DisassemblerError),
    #[error("{tool} did not produce a database at {}", .path.display())]
    DatabaseMissing { tool: String, path: PathBuf },
}

/// Create (or reuse) the analysis database, verify it exists, then execute
/// the script inside it. Returns the database path.
pub fn prepare_and_run(
    adapter: &dyn DisassemblerAdapter,
    request: &PipelineRequest,
) -> Result<PathBuf, PipelineError> {
    let database =
        adapter.create_database(&request.binary, request.is_windows, request.skip_present)?;
    ensure_database(adapter, &database)?;
    info!("Executing {} in {}", request.script.display(), database.display());
    adapter.execute_script(&database, &request.script)?;
    Ok(database)
}

fn ensure_database(
    adapter: &dyn DisassemblerAdapter,
    database: &Path,
) -> Result<(), PipelineError> {
    if database.exists() {
        Ok(())
    } else {
        Err(PipelineError::DatabaseMissing {
            tool: adapter.name().to_string(),
            path: database.to_path_buf(),
        })
    }
}
