use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{FavlensError, Result};

pub fn load_from_path<P: AsRef<Path>>(p: P) -> Result<Config> {
    let txt = fs::read_to_string(p.as_ref())
        .map_err(|e| FavlensError::Configuration(format!("Failed to read config file: {e}")))?;
    let cfg: Config = toml::from_str(&txt)
        .map_err(|e| FavlensError::Configuration(format!("Failed to parse config: {e}")))?;

    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> Result<()> {
    let base_url = cfg.search.base_url.as_str();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(FavlensError::Configuration(format!(
            "search.base_url must be an http(s) URL: {base_url}"
        )));
    }
    if cfg.whois.server.trim().is_empty() {
        return Err(FavlensError::Configuration("whois.server cannot be empty".into()));
    }
    if cfg.whois.port == 0 {
        return Err(FavlensError::Configuration("whois.port must be > 0".into()));
    }
    if cfg.whois.timeout_secs == 0 {
        return Err(FavlensError::Configuration("whois.timeout_secs must be > 0".into()));
    }
    Ok(())
}
