//! libseek CLI library.
//!
//! Command implementations live here (not in `main.rs`) so they can be driven
//! directly from integration tests.

use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod commands;

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbosity` picks the level for our
/// own crates (0 = info, 1 = debug, 2+ = trace). Safe to call more than once.
pub fn init_tracing(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "libseek=info,libseek_core=info",
        1 => "libseek=debug,libseek_core=debug",
        _ => "libseek=trace,libseek_core=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Compute the SHA-256 hash of a file and return it as a hex string.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open binary for hashing: {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("Failed to read binary for hashing: {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let digest = hasher.finalize();
    Ok(format!("{:x}", digest))
}
