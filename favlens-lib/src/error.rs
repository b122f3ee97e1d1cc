use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fingerprinting and correlating favicons
#[derive(Error, Debug)]
pub enum FavlensError {
    #[error("{0}")]
    Configuration(String),

    #[error("failed to read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection refused by {0}")]
    Connection(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("No icon link found in {0}")]
    IconNotFound(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("WHOIS error: {0}")]
    Whois(String),

    #[error("The only web target {0} could not be reached")]
    Unreachable(String),
}

impl FavlensError {
    /// Every failure that reaches the binary terminates the process with 1.
    pub fn exit_code(&self) -> i32 {
        1
    }

    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File { path: path.into(), source }
    }
}

impl From<reqwest::Error> for FavlensError {
    fn from(e: reqwest::Error) -> Self {
        let target = e.url().map(|u| u.to_string()).unwrap_or_default();
        if e.is_connect() {
            FavlensError::Connection(if target.is_empty() { e.to_string() } else { target })
        } else if e.is_builder() {
            FavlensError::InvalidUrl(e.to_string())
        } else {
            FavlensError::Http(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, FavlensError>;

/// Process exit status for the outcome of a run
pub fn exit_status<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.exit_code(),
    }
}
