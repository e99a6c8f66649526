//! Core data model for string corpora and fingerprint evidence.
//!
//! A corpus is an ordered list of `AddressedString`s pulled out of a binary's
//! data sections by the host analysis environment. Seekers read it and produce
//! `Fingerprint`s, bundled in a `SearchOutcome` per library.

use serde::{Deserialize, Serialize};

/// A string found in the analyzed binary, tagged with its virtual address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressedString {
    pub address: u64,
    pub text: String,
}

impl AddressedString {
    pub fn new(address: u64, text: impl Into<String>) -> Self {
        Self { address, text: text.into() }
    }
}

/// Which detection strategy accepted a fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintSource {
    /// Embedded copyright/version banner, chopped at the banner marker.
    Banner,
    /// Leftover install-path fragment; `text` holds only the version segment.
    InstallPath,
}

/// One accepted, deduplicated piece of library evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub address: u64,
    pub text: String,
    pub source: FingerprintSource,
}

/// Result of a single `Seeker::search_lib` pass.
///
/// Holding the scanned state as a value means versions can only be asked for
/// once a scan actually happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub library: String,
    pub fingerprints: Vec<Fingerprint>,
}

impl SearchOutcome {
    pub fn new(library: impl Into<String>) -> Self {
        Self { library: library.into(), fingerprints: Vec::new() }
    }

    /// Number of accepted (non-duplicate) matches across all strategies.
    pub fn match_count(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }
}
