use std::fmt;

use serde::Serialize;

/// Signed 32-bit favicon fingerprint, as stored by the scan index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(pub i32);

impl Fingerprint {
    /// Search query matching hosts that serve a favicon with this fingerprint
    pub fn query(&self) -> String {
        format!("http.favicon.hash:{}", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Representation of the base64 output that is fed to MurmurHash3.
///
/// Favicons read from disk or fetched by URL hash the base64 buffer as
/// bytes. Favicons discovered through a page hash the buffer decoded to a
/// string. Base64 output is ASCII, so both land on the index's convention
/// and agree for the same image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashVariant {
    Bytes,
    Text,
}
