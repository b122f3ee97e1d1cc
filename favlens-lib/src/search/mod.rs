pub mod credentials;
pub mod shodan;

use std::future::Future;

use crate::error::Result;
use crate::fingerprinting::Fingerprint;

pub use credentials::{resolve_api_key, CredentialStore, KeyFlags, ShodanCliStore};
pub use shodan::ShodanClient;

/// Scan-index search keyed by favicon fingerprint
pub trait IndexSearch {
    /// IP addresses of every match, in the order the index returned them
    fn search(&self, fingerprint: Fingerprint) -> impl Future<Output = Result<Vec<String>>>;
}
