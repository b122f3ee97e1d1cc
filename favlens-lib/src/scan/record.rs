use serde::Serialize;

use crate::fingerprinting::Fingerprint;
use crate::lens::ConnectionInfo;
use crate::source::SourceKind;

/// Outcome for one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub favhash: Fingerprint,
    /// File path, favicon URL or page host
    pub source: String,
    pub kind: SourceKind,
    /// Absent for local files
    #[serde(flatten)]
    pub connection: Option<ConnectionInfo>,
    /// Exactly what the index returned for `favhash`, in order
    pub real_ips: Vec<String>,
}
