//! Marker-based fingerprint matching shared by banner-style seekers.
//!
//! Two strategies run over the same single pass of the corpus:
//! - banner: a fixed marker inside the library's self-identifying string,
//!   corroborated by at least one domain keyword;
//! - install path: a packaged-install directory fragment followed by a
//!   version path segment.
//!
//! Both feed one ordered fingerprint list and share one dedup set. The first
//! accepted match is never checked against the set.

use std::collections::HashSet;

use tracing::debug;

use crate::model::{AddressedString, Fingerprint, FingerprintSource, SearchOutcome};
use crate::version::extract_version;

/// Fixed configuration of a marker-based seeker.
#[derive(Debug, Clone, Copy)]
pub struct MarkerRules {
    /// Library name; banner versions are read right after it.
    pub name: &'static str,
    /// Substring identifying the embedded banner.
    pub banner_marker: &'static str,
    /// At least one must appear next to the banner marker.
    pub keywords: &'static [&'static str],
    /// Install directory fragment, if the library ships via a package manager.
    pub install_marker: Option<&'static str>,
    /// Characters required beyond the install marker for a path to count.
    pub min_install_suffix: usize,
}

/// Run both strategies over `corpus` and collect accepted fingerprints.
pub fn scan(rules: &MarkerRules, corpus: &[AddressedString]) -> SearchOutcome {
    let mut outcome = SearchOutcome::new(rules.name);
    let mut seen: HashSet<String> = HashSet::new();

    for entry in corpus {
        if let Some(chopped) = match_banner(rules, &entry.text) {
            if accept(&mut outcome, &mut seen, entry.address, chopped, FingerprintSource::Banner) {
                debug!(
                    "Located a copyright string of {} in address 0x{:x}",
                    rules.name, entry.address
                );
            }
        }
        if let Some(token) = match_install_path(rules, &entry.text) {
            if accept(&mut outcome, &mut seen, entry.address, token, FingerprintSource::InstallPath)
            {
                debug!(
                    "Located an install path of {} in address 0x{:x}",
                    rules.name, entry.address
                );
            }
        }
    }

    outcome
}

/// Extract one version token per fingerprint, skipping fingerprints with none.
pub fn versions(rules: &MarkerRules, outcome: &SearchOutcome) -> Vec<String> {
    outcome
        .fingerprints
        .iter()
        .filter_map(|fp| {
            let start = match fp.source {
                FingerprintSource::Banner => fp
                    .text
                    .find(rules.name)
                    .map(|idx| idx + rules.name.len() + 1)
                    .unwrap_or(0),
                FingerprintSource::InstallPath => 0,
            };
            extract_version(&fp.text, start)
        })
        .collect()
}

/// Returns the banner chopped at the marker's first occurrence.
pub fn match_banner<'a>(rules: &MarkerRules, text: &'a str) -> Option<&'a str> {
    let idx = text.find(rules.banner_marker)?;
    if !rules.keywords.iter().any(|kw| text.contains(kw)) {
        debug!("{} banner marker without a supporting keyword, ignoring", rules.name);
        return None;
    }
    Some(&text[idx..])
}

/// Returns the path segment following the install marker.
pub fn match_install_path<'a>(rules: &MarkerRules, text: &'a str) -> Option<&'a str> {
    let marker = rules.install_marker?;
    let idx = text.find(marker)?;
    if text.len() < marker.len() + rules.min_install_suffix {
        debug!("{} install path too short, ignoring: {:?}", rules.name, text);
        return None;
    }
    let after_marker = idx + marker.len();
    let left = after_marker + text[after_marker..].find('/')?;
    let rest = &text[left + 1..];
    let token = rest.split('/').next().unwrap_or(rest);
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn accept(
    outcome: &mut SearchOutcome,
    seen: &mut HashSet<String>,
    address: u64,
    text: &str,
    source: FingerprintSource,
) -> bool {
    if !outcome.is_empty() && seen.contains(text) {
        debug!("Skipping duplicate {} fingerprint at 0x{:x}", outcome.library, address);
        return false;
    }
    seen.insert(text.to_string());
    outcome.fingerprints.push(Fingerprint { address, text: text.to_string(), source });
    true
}
