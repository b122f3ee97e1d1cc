use std::path::PathBuf;

use super::list::load_list;
use super::FaviconSource;
use crate::error::{FavlensError, Result};

pub const MISSING_SOURCE_MESSAGE: &str = "[x] Please specify the source of the favicon with \
     --favicon-file, --favicon-url, --web, --favicon-list, --url-list or --web-list.";

/// Favicon source selectors as given on the command line
#[derive(Debug, Clone, Default)]
pub struct SourceFlags {
    pub favicon_file: Option<PathBuf>,
    pub favicon_url: Option<String>,
    pub web: Option<String>,
    pub favicon_list: Option<PathBuf>,
    pub url_list: Option<PathBuf>,
    pub web_list: Option<PathBuf>,
}

impl SourceFlags {
    pub fn is_empty(&self) -> bool {
        self.favicon_file.is_none()
            && self.favicon_url.is_none()
            && self.web.is_none()
            && self.favicon_list.is_none()
            && self.url_list.is_none()
            && self.web_list.is_none()
    }
}

/// Targets per mode, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    pub files: Vec<PathBuf>,
    pub urls: Vec<String>,
    pub hosts: Vec<String>,
}

impl Targets {
    /// Loads list files and appends each single-target flag after its list.
    pub fn from_flags(flags: &SourceFlags) -> Result<Self> {
        if flags.is_empty() {
            return Err(FavlensError::Configuration(MISSING_SOURCE_MESSAGE.to_string()));
        }

        let mut files: Vec<PathBuf> =
            optional_list(flags.favicon_list.as_ref())?.into_iter().map(PathBuf::from).collect();
        files.extend(flags.favicon_file.clone());

        let mut urls = optional_list(flags.url_list.as_ref())?;
        urls.extend(flags.favicon_url.clone());

        let mut hosts = optional_list(flags.web_list.as_ref())?;
        hosts.extend(flags.web.clone());

        Ok(Self { files, urls, hosts })
    }

    pub fn len(&self) -> usize {
        self.files.len() + self.urls.len() + self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every target as a [`FaviconSource`]: files, then URLs, then hosts
    pub fn sources(&self) -> impl Iterator<Item = FaviconSource> + '_ {
        self.files
            .iter()
            .cloned()
            .map(FaviconSource::File)
            .chain(self.urls.iter().cloned().map(FaviconSource::Url))
            .chain(self.hosts.iter().cloned().map(FaviconSource::Web))
    }
}

fn optional_list(path: Option<&PathBuf>) -> Result<Vec<String>> {
    match path {
        Some(p) => load_list(p),
        None => Ok(Vec::new()),
    }
}
