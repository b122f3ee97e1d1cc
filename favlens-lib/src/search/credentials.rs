use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{FavlensError, Result};

pub const MISSING_KEY_MESSAGE: &str =
    "[x] Please specify the key with --key, --key-file or --shodan-cli.";

/// API key selectors as given on the command line
#[derive(Debug, Clone, Default)]
pub struct KeyFlags {
    pub key: Option<String>,
    pub key_file: Option<PathBuf>,
    pub shodan_cli: bool,
}

impl KeyFlags {
    pub fn is_empty(&self) -> bool {
        self.key.as_deref().is_none_or(str::is_empty) && self.key_file.is_none() && !self.shodan_cli
    }
}

/// Key previously saved by a local search-index CLI
pub trait CredentialStore {
    fn api_key(&self) -> Result<String>;
}

/// Reads the key written by `shodan init <key>`
#[derive(Debug, Clone)]
pub struct ShodanCliStore {
    home: Option<PathBuf>,
}

impl ShodanCliStore {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: Some(home.into()) }
    }

    /// Store rooted at the current user's home directory
    pub fn from_env() -> Self {
        let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
        Self { home: home.map(PathBuf::from) }
    }

    fn candidates(&self) -> Result<[PathBuf; 2]> {
        let home = self.home.as_ref().ok_or_else(|| {
            FavlensError::Authentication("cannot locate home directory for Shodan CLI key".into())
        })?;
        Ok([
            home.join(".config").join("shodan").join("api_key"),
            home.join(".shodan").join("api_key"),
        ])
    }
}

impl CredentialStore for ShodanCliStore {
    fn api_key(&self) -> Result<String> {
        for path in self.candidates()? {
            if let Ok(txt) = fs::read_to_string(&path) {
                let key = txt.trim();
                if !key.is_empty() {
                    debug!(path = %path.display(), "loaded key from Shodan CLI");
                    return Ok(key.to_string());
                }
            }
        }
        Err(FavlensError::Authentication(
            "no Shodan CLI key found, run 'shodan init <api key>' first".into(),
        ))
    }
}

/// Picks the API key: `--key`, then `--key-file`, then the CLI store.
pub fn resolve_api_key<S: CredentialStore>(flags: &KeyFlags, store: &S) -> Result<String> {
    if let Some(key) = flags.key.as_deref().filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }
    if let Some(path) = &flags.key_file {
        return read_key_file(path);
    }
    if flags.shodan_cli {
        return store.api_key();
    }
    Err(FavlensError::Configuration(MISSING_KEY_MESSAGE.to_string()))
}

/// First line of the key file, trimmed
fn read_key_file(path: &Path) -> Result<String> {
    let txt = fs::read_to_string(path).map_err(|e| FavlensError::file(path, e))?;
    Ok(txt.lines().next().unwrap_or("").trim().to_string())
}
