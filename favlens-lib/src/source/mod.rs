pub mod fetch;
pub mod html;
pub mod list;
pub mod targets;

use std::fs;
use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;

use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use crate::error::{FavlensError, Result};
use crate::fingerprinting::HashVariant;

pub use fetch::HttpFetcher;
pub use html::{find_icon_href, resolve_icon_href};
pub use list::{load_list, parse_list};
pub use targets::{SourceFlags, Targets};

/// Body of an HTTP GET together with the socket it was read from
#[derive(Debug, Clone)]
pub struct Fetched {
    pub url: String,
    pub body: Bytes,
    /// Remote address of the connection, when the client recorded one
    pub peer: Option<SocketAddr>,
}

/// Network endpoint a favicon or page was actually retrieved from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub peer: Option<SocketAddr>,
}

impl From<&Fetched> for Endpoint {
    fn from(f: &Fetched) -> Self {
        Self { url: f.url.clone(), peer: f.peer }
    }
}

/// HTTP GET capability used to retrieve pages and favicons
pub trait Fetch {
    fn get(&self, url: &str) -> impl Future<Output = Result<Fetched>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    File,
    Url,
    Web,
}

/// Where a favicon's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaviconSource {
    /// Local file path
    File(PathBuf),
    /// Direct favicon URL
    Url(String),
    /// Host whose home page references the favicon
    Web(String),
}

/// Favicon bytes plus the endpoint that served them, if any
#[derive(Debug, Clone)]
pub struct Resolved {
    pub bytes: Bytes,
    pub endpoint: Option<Endpoint>,
}

impl FaviconSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            FaviconSource::File(_) => SourceKind::File,
            FaviconSource::Url(_) => SourceKind::Url,
            FaviconSource::Web(_) => SourceKind::Web,
        }
    }

    pub fn variant(&self) -> HashVariant {
        match self {
            FaviconSource::Web(_) => HashVariant::Text,
            FaviconSource::File(_) | FaviconSource::Url(_) => HashVariant::Bytes,
        }
    }

    pub fn identifier(&self) -> String {
        match self {
            FaviconSource::File(path) => path.display().to_string(),
            FaviconSource::Url(url) => url.clone(),
            FaviconSource::Web(host) => host.clone(),
        }
    }

    /// Reads or downloads the favicon bytes.
    ///
    /// For web sources the endpoint is the page request, since that is the
    /// connection which reveals who answers for the host.
    pub async fn resolve<F: Fetch>(&self, fetcher: &F) -> Result<Resolved> {
        match self {
            FaviconSource::File(path) => {
                let bytes = fs::read(path).map_err(|e| FavlensError::file(path, e))?;
                Ok(Resolved { bytes: Bytes::from(bytes), endpoint: None })
            }
            FaviconSource::Url(url) => {
                let fetched = fetcher.get(url).await?;
                let endpoint = Endpoint::from(&fetched);
                Ok(Resolved { bytes: fetched.body, endpoint: Some(endpoint) })
            }
            FaviconSource::Web(host) => {
                let page = fetcher.get(&format!("https://{host}")).await?;
                let href = find_icon_href(&String::from_utf8_lossy(&page.body))
                    .ok_or_else(|| FavlensError::IconNotFound(host.clone()))?;
                let icon_url = resolve_icon_href(host, &href);
                debug!(%host, %icon_url, "icon link found");
                let icon = fetcher.get(&icon_url).await?;
                Ok(Resolved { bytes: icon.body, endpoint: Some(Endpoint::from(&page)) })
            }
        }
    }
}
