use crate::model::{AddressedString, SearchOutcome};
use crate::seekers::marker::{self, MarkerRules};
use crate::seekers::Seeker;

/// Seeker for the OpenSSL library.
///
/// Matches the `"<primitive> part of OpenSSL <version> <date>"` banners compiled
/// into libcrypto, plus Homebrew cellar paths such as
/// `/usr/local/Cellar/openssl@3/3.5.0/lib`.
pub struct OpenSslSeeker;

impl OpenSslSeeker {
    pub const NAME: &'static str = "OpenSSL";

    pub const RULES: MarkerRules = MarkerRules {
        name: Self::NAME,
        banner_marker: " part of OpenSSL ",
        keywords: &[
            "SHA1",
            "SHA-256",
            "SHA-512",
            "SSLv3",
            "TLSv1",
            "ASN.1",
            "EVP",
            "RAND",
            "RSA",
            "Big Number",
        ],
        install_marker: Some("/Cellar/openssl"),
        min_install_suffix: 4,
    };
}

impl Seeker for OpenSslSeeker {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn search_lib(&self, corpus: &[AddressedString]) -> SearchOutcome {
        marker::scan(&Self::RULES, corpus)
    }

    fn identify_versions(&self, outcome: &SearchOutcome) -> Vec<String> {
        marker::versions(&Self::RULES, outcome)
    }
}
