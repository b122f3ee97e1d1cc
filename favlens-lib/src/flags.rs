use std::path::Path;

use crate::config::{load_from_path, Config};
use crate::error::{FavlensError, Result};
use crate::search::credentials::MISSING_KEY_MESSAGE;
use crate::search::KeyFlags;
use crate::source::targets::MISSING_SOURCE_MESSAGE;
use crate::source::SourceFlags;

/// Checks that a key source and a favicon source were both given, in that
/// order, before anything is read from disk.
pub fn validate_flags(keys: &KeyFlags, sources: &SourceFlags) -> Result<()> {
    if keys.is_empty() {
        return Err(FavlensError::Configuration(MISSING_KEY_MESSAGE.to_string()));
    }
    if sources.is_empty() {
        return Err(FavlensError::Configuration(MISSING_SOURCE_MESSAGE.to_string()));
    }
    Ok(())
}

/// Validates the flags, then loads the optional config file, so a bad
/// config never hides a missing key or favicon source.
pub fn load_run_config(keys: &KeyFlags, sources: &SourceFlags, config: Option<&Path>) -> Result<Config> {
    validate_flags(keys, sources)?;
    match config {
        Some(path) => load_from_path(path),
        None => Ok(Config::default()),
    }
}
