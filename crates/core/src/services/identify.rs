use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::model::{AddressedString, Fingerprint};
use crate::seekers::{Seeker, SeekerRegistry};

/// Findings for one library that was located in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryReport {
    pub library: String,
    pub match_count: usize,
    pub versions: Vec<String>,
    pub fingerprints: Vec<Fingerprint>,
}

/// Result of running seekers over one corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentificationReport {
    pub generated_at: String,
    pub corpus_size: usize,
    pub libraries: Vec<LibraryReport>,
}

impl IdentificationReport {
    pub fn library(&self, name: &str) -> Option<&LibraryReport> {
        self.libraries.iter().find(|l| l.library == name)
    }
}

#[derive(Debug, Error)]
pub enum IdentifyError {
    #[error("Seeker not found: {name} (available: {})", .available.join(", "))]
    UnknownSeeker { name: String, available: Vec<String> },
}

/// Run one seeker end to end: scan, then read versions from the outcome.
///
/// Returns `None` when the library left no fingerprint in the corpus.
pub fn run_seeker(seeker: &dyn Seeker, corpus: &[AddressedString]) -> Option<LibraryReport> {
    let outcome = seeker.search_lib(corpus);
    if outcome.is_empty() {
        return None;
    }
    let versions = seeker.identify_versions(&outcome);
    info!("{}: {} match(es), versions {:?}", seeker.name(), outcome.match_count(), versions);
    Some(LibraryReport {
        library: seeker.name().to_string(),
        match_count: outcome.match_count(),
        versions,
        fingerprints: outcome.fingerprints,
    })
}

/// Run the selected seekers (all registered ones when `only` is `None`) over
/// `corpus`. Libraries without matches are left out of the report.
pub fn identify_libraries(
    registry: &SeekerRegistry,
    corpus: &[AddressedString],
    only: Option<&[String]>,
) -> Result<IdentificationReport, IdentifyError> {
    let seekers: Vec<Box<dyn Seeker>> = match only {
        None => registry.all(),
        Some(names) => names
            .iter()
            .map(|name| {
                registry.create(name).ok_or_else(|| IdentifyError::UnknownSeeker {
                    name: name.clone(),
                    available: registry.names(),
                })
            })
            .collect::<Result<_, _>>()?,
    };

    let libraries = seekers.iter().filter_map(|s| run_seeker(s.as_ref(), corpus)).collect();

    Ok(IdentificationReport {
        generated_at: Utc::now().to_rfc3339(),
        corpus_size: corpus.len(),
        libraries,
    })
}
