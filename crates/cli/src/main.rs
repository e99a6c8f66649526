use anyhow::Result;
use clap::{Parser, Subcommand};

use libseek::commands::{
    analyze_command, create_db_command, list_seekers_command, resolve_tool_command,
    run_script_command, scan_command, ToolOptions,
};

/// Identify open-source libraries statically linked into a binary.
///
/// This CLI is a thin wrapper around `libseek-core` (exposed in code as
/// `libseek_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "libseek",
    version,
    about = "Identify statically linked open-source libraries",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the library seekers compiled into this binary.
    Seekers {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Scan a string corpus (JSON/YAML, native or rizin `izj` shape) for libraries.
    Scan {
        /// Path to the corpus file.
        #[arg(long)]
        corpus: String,

        /// Only run the named seeker(s). Repeatable.
        #[arg(long = "library")]
        libraries: Vec<String>,

        /// Optional config file (JSON or YAML).
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show which disassembler adapter handles a tool path.
    ResolveTool {
        /// Command-line path to the disassembler.
        #[arg(long)]
        tool: String,
    },

    /// Create (or reuse) the analysis database for a binary.
    CreateDb {
        /// Path to the binary to analyze.
        #[arg(long)]
        binary: String,

        /// The binary was compiled for Windows.
        #[arg(long, default_value_t = false)]
        windows: bool,

        /// Rebuild the database even if it already exists.
        #[arg(long, default_value_t = false)]
        force: bool,

        #[command(flatten)]
        tool_args: ToolArgs,
    },

    /// Execute a script inside an existing analysis database.
    RunScript {
        /// Path to the analysis database.
        #[arg(long)]
        database: String,

        /// Script to execute once the database is loaded.
        #[arg(long)]
        script: String,

        #[command(flatten)]
        tool_args: ToolArgs,
    },

    /// Build/reuse the database for a binary and run the identification script in it.
    Analyze {
        /// Path to the binary to analyze.
        #[arg(long)]
        binary: String,

        /// Identification script. Defaults to `script` from the config.
        #[arg(long)]
        script: Option<String>,

        /// The binary was compiled for Windows.
        #[arg(long, default_value_t = false)]
        windows: bool,

        /// Rebuild the database even if it already exists.
        #[arg(long, default_value_t = false)]
        force: bool,

        #[command(flatten)]
        tool_args: ToolArgs,
    },
}

#[derive(clap::Args, Debug)]
struct ToolArgs {
    /// Command-line path to the disassembler (overrides config and LIBSEEK_DISASSEMBLER).
    #[arg(long)]
    tool: Option<String>,

    /// Log tool failures instead of aborting.
    #[arg(long, default_value_t = false)]
    lenient: bool,

    /// Optional config file (JSON or YAML).
    #[arg(long)]
    config: Option<String>,
}

impl From<ToolArgs> for ToolOptions {
    fn from(args: ToolArgs) -> Self {
        Self { tool: args.tool, lenient: args.lenient, config: args.config }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    libseek::init_tracing(cli.verbose);

    // Default to listing seekers if no command is provided.
    match cli.command.unwrap_or(Command::Seekers { json: false }) {
        Command::Seekers { json } => list_seekers_command(json)?,
        Command::Scan { corpus, libraries, config, json } => {
            scan_command(&corpus, &libraries, config.as_deref(), json)?
        }
        Command::ResolveTool { tool } => resolve_tool_command(&tool)?,
        Command::CreateDb { binary, windows, force, tool_args } => {
            create_db_command(&binary, windows, force, &tool_args.into())?;
        }
        Command::RunScript { database, script, tool_args } => {
            run_script_command(&database, &script, &tool_args.into())?
        }
        Command::Analyze { binary, script, windows, force, tool_args } => {
            analyze_command(&binary, script, windows, force, &tool_args.into())?;
        }
    }

    Ok(())
}
