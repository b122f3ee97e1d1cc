pub mod hash;
pub mod types;

pub use hash::{encode_mime_base64, favicon_hash, murmur3_32};
pub use types::{Fingerprint, HashVariant};
