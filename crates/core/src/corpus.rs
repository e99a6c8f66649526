//! Loading string corpora produced by the host analysis environment.
//!
//! A corpus file is a JSON (or YAML) array of records. Both the native shape
//! `{"address": 4096, "text": "..."}` and rizin's `izj` shape
//! `{"vaddr": 4096, "string": "..."}` are accepted, so the output of
//! `rizin -qc izj <binary>` can be scanned as-is.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::model::AddressedString;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Failed to read corpus at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse corpus JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse corpus YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize)]
struct CorpusRecord {
    #[serde(default, alias = "vaddr")]
    address: Option<u64>,
    #[serde(default, alias = "string")]
    text: Option<String>,
}

fn into_corpus(records: Vec<CorpusRecord>) -> Vec<AddressedString> {
    records
        .into_iter()
        .filter_map(|r| r.text.map(|text| AddressedString::new(r.address.unwrap_or(0), text)))
        .collect()
}

/// Parse a JSON corpus; records without text are skipped.
pub fn parse_corpus_json(body: &str) -> Result<Vec<AddressedString>, CorpusError> {
    let records: Vec<CorpusRecord> = serde_json::from_str(body)?;
    Ok(into_corpus(records))
}

/// Parse a YAML corpus; records without text are skipped.
pub fn parse_corpus_yaml(body: &str) -> Result<Vec<AddressedString>, CorpusError> {
    let records: Vec<CorpusRecord> = serde_yaml::from_str(body)?;
    Ok(into_corpus(records))
}

/// Load a corpus file, choosing the format from the extension
/// (`.yaml`/`.yml` are YAML, anything else is JSON). Record order is kept.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<AddressedString>, CorpusError> {
    let path = path.as_ref();
    let body = fs::read_to_string(path)
        .map_err(|source| CorpusError::Read { path: path.to_path_buf(), source })?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let corpus = if matches!(ext, "yaml" | "yml") {
        parse_corpus_yaml(&body)?
    } else {
        parse_corpus_json(&body)?
    };
    tracing::debug!("Loaded {} strings from {}", corpus.len(), path.display());
    Ok(corpus)
}
