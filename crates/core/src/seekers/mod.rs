//! Library seekers and the registry that makes them discoverable.
//!
//! A seeker knows how to recognize one open-source library inside a string
//! corpus. New libraries are added by implementing [`Seeker`] and registering a
//! factory; nothing that dispatches over seekers needs to change.

use std::collections::HashMap;

use crate::model::{AddressedString, SearchOutcome};

pub mod marker;
#[cfg(feature = "openssl-seeker")]
pub mod openssl;

#[cfg(feature = "openssl-seeker")]
pub use openssl::OpenSslSeeker;

/// Trait implemented by per-library seekers.
///
/// Seekers are stateless: each `search_lib` call scans from scratch, so calling
/// it twice over the same corpus yields the same outcome.
pub trait Seeker: Send + Sync {
    /// Unique library identifier (e.g. `OpenSSL`).
    fn name(&self) -> &'static str;

    /// Scan the whole corpus once and collect deduplicated fingerprints in
    /// encounter order. An empty outcome is not an error.
    fn search_lib(&self, corpus: &[AddressedString]) -> SearchOutcome;

    /// Extract version identifiers from a previous scan, one per fingerprint
    /// that yields a token, in fingerprint order.
    fn identify_versions(&self, outcome: &SearchOutcome) -> Vec<String>;
}

/// Constructor stored in the registry.
pub type SeekerFactory = fn() -> Box<dyn Seeker>;

/// Registry of seeker factories; callers select by library name.
///
/// Registering a name twice replaces the earlier factory.
#[derive(Default)]
pub struct SeekerRegistry {
    seekers: HashMap<String, SeekerFactory>,
}

impl SeekerRegistry {
    pub fn new() -> Self {
        Self { seekers: HashMap::new() }
    }

    pub fn register(&mut self, name: impl Into<String>, factory: SeekerFactory) -> &mut Self {
        let name = name.into();
        if self.seekers.insert(name.clone(), factory).is_some() {
            tracing::debug!(seeker = %name, "replacing previously registered seeker");
        }
        self
    }

    pub fn lookup(&self, name: &str) -> Option<SeekerFactory> {
        self.seekers.get(name).copied()
    }

    /// Build a fresh seeker instance for `name`.
    pub fn create(&self, name: &str) -> Option<Box<dyn Seeker>> {
        self.lookup(name).map(|factory| factory())
    }

    /// Fresh instances of every registered seeker, ordered by name.
    pub fn all(&self) -> Vec<Box<dyn Seeker>> {
        self.names().iter().filter_map(|name| self.create(name)).collect()
    }

    /// Return a sorted list of registered seeker names for error messages/help.
    pub fn names(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.seekers.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.seekers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seekers.is_empty()
    }
}

#[cfg(feature = "openssl-seeker")]
fn openssl_seeker() -> Box<dyn Seeker> {
    Box::new(OpenSslSeeker)
}

/// Convenience builder for a registry populated with every built-in seeker.
pub fn default_seeker_registry() -> SeekerRegistry {
    #[allow(unused_mut)]
    let mut registry = SeekerRegistry::new();
    #[cfg(feature = "openssl-seeker")]
    {
        registry.register(OpenSslSeeker::NAME, openssl_seeker);
    }
    registry
}
