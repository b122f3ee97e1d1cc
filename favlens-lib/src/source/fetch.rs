use tracing::debug;

use super::{Fetch, Fetched};
use crate::config::HttpConfig;
use crate::error::Result;

/// reqwest-backed [`Fetch`] implementation
///
/// Redirects, TLS and timeouts keep the client defaults. Non-success
/// statuses are not treated as errors; the body is used as returned.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(config.user_agent.as_str()).build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn get(&self, url: &str) -> Result<Fetched> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let peer = response.remote_addr();
        debug!(%url, status = %response.status(), ?peer, "response received");
        let body = response.bytes().await?;
        Ok(Fetched { url: url.to_string(), body, peer })
    }
}
