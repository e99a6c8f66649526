use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::disassembler::{
    CommandRunner, DisassemblerAdapter, DisassemblerError, ExitPolicy, SystemRunner,
};

/// Program name reported by the adapter.
pub const NAME: &str = "IDA";

/// Appended to the binary path to form the database path.
pub const DATABASE_SUFFIX: &str = ".i64";

/// True when the file name, up to its first `.`, starts with `ida`
/// (case-insensitive): `ida64.exe`, `idat`, `IDA.app`.
pub fn identify(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_lowercase))
        .map(|stem| stem.starts_with("ida"))
        .unwrap_or(false)
}

/// Adapter for the IDA disassembler's batch mode.
///
/// Databases are written next to the input as `<binary>.i64`.
pub struct IdaAdapter<R: CommandRunner = SystemRunner> {
    path: PathBuf,
    runner: R,
    exit_policy: ExitPolicy,
}

impl IdaAdapter<SystemRunner> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_runner(path, SystemRunner)
    }
}

impl<R: CommandRunner> IdaAdapter<R> {
    pub fn with_runner(path: impl Into<PathBuf>, runner: R) -> Self {
        Self { path: path.into(), runner, exit_policy: ExitPolicy::default() }
    }

    pub fn with_exit_policy(mut self, policy: ExitPolicy) -> Self {
        self.exit_policy = policy;
        self
    }

    fn run(&self, args: Vec<OsString>) -> Result<(), DisassemblerError> {
        info!("Running {} {:?}", self.path.display(), args);
        let outcome = self.runner.run(&self.path, &args);
        self.exit_policy.check(&self.path, outcome)
    }
}

impl<R: CommandRunner> DisassemblerAdapter for IdaAdapter<R> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn tool_path(&self) -> &Path {
        &self.path
    }

    fn database_path(&self, binary: &Path) -> PathBuf {
        let mut path = binary.as_os_str().to_os_string();
        path.push(DATABASE_SUFFIX);
        PathBuf::from(path)
    }

    fn create_database(
        &self,
        binary: &Path,
        is_windows: bool,
        skip_present: bool,
    ) -> Result<PathBuf, DisassemblerError> {
        let database = self.database_path(binary);
        if skip_present && database.exists() {
            debug!("Database already present at {}, skipping", database.display());
            return Ok(database);
        }
        if !binary.is_file() {
            return Err(DisassemblerError::MissingBinary(binary.to_path_buf()));
        }
        debug!("Creating database for {} (windows: {})", binary.display(), is_windows);

        let mut output_flag = OsString::from("-o");
        output_flag.push(&database);
        self.run(vec!["-A".into(), "-B".into(), output_flag, binary.as_os_str().to_os_string()])?;

        Ok(database)
    }

    fn execute_script(&self, database: &Path, script: &Path) -> Result<(), DisassemblerError> {
        if !database.exists() {
            return Err(DisassemblerError::MissingDatabase(database.to_path_buf()));
        }
        let mut script_flag = OsString::from("-S");
        script_flag.push(script);
        self.run(vec!["-A".into(), script_flag, database.as_os_str().to_os_string()])
    }
}
