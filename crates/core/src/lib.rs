//! libseek-core
//!
//! Core library for identifying open-source libraries statically linked into a
//! binary from the binary's extracted string table.
//!
//! The crate holds all substantive logic so it is fully testable and reusable
//! from multiple frontends:
//! - `model`: addressed strings and the evidence a seeker accepts.
//! - `version`: character-class driven version token extraction.
//! - `seekers`: the `Seeker` contract, its registry, and per-library seekers.
//! - `disassembler`: adapters that drive an external disassembler.
//! - `corpus` / `config`: loading string corpora and tool configuration.
//! - `services`: identification and database/script orchestration.

pub mod config;
pub mod corpus;
pub mod disassembler;
pub mod model;
pub mod seekers;
pub mod services;
pub mod version;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
