#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod fingerprinting;
pub mod flags;
pub mod lens;
pub mod scan;
pub mod search;
pub mod source;
pub mod telemetry;

pub use config::{load_from_path, Config};
pub use error::{exit_status, FavlensError, Result};
pub use fingerprinting::{favicon_hash, Fingerprint, HashVariant};
pub use flags::{load_run_config, validate_flags};
pub use lens::{ConnectionInfo, NetworkRegistry, WhoisClient};
pub use scan::{ResultRecord, Scanner};
pub use search::{resolve_api_key, IndexSearch, KeyFlags, ShodanClient};
pub use source::{Fetch, FaviconSource, HttpFetcher, SourceFlags, Targets};
