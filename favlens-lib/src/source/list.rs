use std::fs;
use std::path::Path;

use crate::error::{FavlensError, Result};

/// Loads a batch target file: one entry per line, trimmed, blank lines skipped
pub fn load_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let txt = fs::read_to_string(path).map_err(|e| FavlensError::file(path, e))?;
    Ok(parse_list(&txt))
}

pub fn parse_list(txt: &str) -> Vec<String> {
    txt.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
