use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use super::IndexSearch;
use crate::config::SearchConfig;
use crate::error::{FavlensError, Result};
use crate::fingerprinting::Fingerprint;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    matches: Vec<SearchMatch>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchMatch {
    ip_str: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Shodan host search client
#[derive(Debug, Clone)]
pub struct ShodanClient {
    client: reqwest::Client,
    base_url: String,
    key: String,
}

impl ShodanClient {
    pub fn new(config: &SearchConfig, key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, config, key))
    }

    pub fn with_client(client: reqwest::Client, config: &SearchConfig, key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            key: key.into(),
        }
    }

    fn endpoint(&self, query: &str) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/shodan/host/search", self.base_url),
            &[("key", self.key.as_str()), ("query", query)],
        )
        .map_err(|e| FavlensError::InvalidUrl(format!("{}: {e}", self.base_url)))
    }
}

impl IndexSearch for ShodanClient {
    async fn search(&self, fingerprint: Fingerprint) -> Result<Vec<String>> {
        let query = fingerprint.query();
        debug!(%query, "searching index");

        let response = self.client.get(self.endpoint(&query)?).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FavlensError::Authentication(error_message(&body, status)));
        }
        if !status.is_success() {
            return Err(FavlensError::Search(error_message(&body, status)));
        }

        let parsed: SearchResponse = serde_json::from_slice(&body)
            .map_err(|e| FavlensError::Search(format!("invalid search response: {e}")))?;
        if let Some(error) = parsed.error {
            return Err(FavlensError::Search(error));
        }

        debug!(%query, matches = parsed.matches.len(), "search complete");
        Ok(parsed.matches.into_iter().map(|m| m.ip_str).collect())
    }
}

fn error_message(body: &[u8], status: StatusCode) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| format!("search API returned {status}"))
}
