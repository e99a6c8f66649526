use std::path::Path;

use anyhow::{Context, Result};

use libseek_core::config::load_or_default;
use libseek_core::corpus::load_corpus;
use libseek_core::seekers::default_seeker_registry;
use libseek_core::services::identify::{identify_libraries, IdentificationReport};

/// Run the registered seekers over a corpus file.
///
/// `libraries` narrows the scan; when empty, the config's `seekers` list (or
/// every registered seeker) is used.
pub fn scan_report(
    corpus_path: &str,
    libraries: &[String],
    config_path: Option<&str>,
) -> Result<IdentificationReport> {
    let config = load_or_default(config_path.map(Path::new))?;
    let corpus = load_corpus(corpus_path)
        .with_context(|| format!("Failed to load corpus from {corpus_path}"))?;

    let only = if libraries.is_empty() { config.seekers.as_deref() } else { Some(libraries) };
    if let Some(names) = only {
        tracing::debug!("Restricting scan to seekers: {}", names.join(", "));
    }
    let registry = default_seeker_registry();
    let report = identify_libraries(&registry, &corpus, only)?;
    Ok(report)
}

/// Scan a corpus file and print the identification report.
pub fn scan_command(
    corpus_path: &str,
    libraries: &[String],
    config_path: Option<&str>,
    json: bool,
) -> Result<()> {
    let report = scan_report(corpus_path, libraries, config_path)?;

    if json {
        let serialized =
            serde_json::to_string_pretty(&report).context("Failed to serialize report to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Corpus: {} ({} strings)", corpus_path, report.corpus_size);
    if report.libraries.is_empty() {
        println!("No known libraries found.");
        return Ok(());
    }

    println!("Libraries ({}):", report.libraries.len());
    for lib in &report.libraries {
        let versions =
            if lib.versions.is_empty() { "-".to_string() } else { lib.versions.join(", ") };
        println!("  - {} [{} match(es)] versions: {}", lib.library, lib.match_count, versions);
        for fp in &lib.fingerprints {
            println!("      0x{:x}: {}", fp.address, fp.text);
        }
    }

    Ok(())
}
