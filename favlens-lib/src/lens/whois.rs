//! WHOIS (RFC 3912) client for IP network registrations.
//!
//! The root server (IANA by default) answers with a `refer:` line naming
//! the regional registry that holds the allocation; that registry's answer
//! carries the `netname`/`NetName` of the network block.

use std::net::IpAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace};

use super::NetworkRegistry;
use crate::config::WhoisConfig;
use crate::error::{FavlensError, Result};

/// Responses larger than this are truncated.
const MAX_RESPONSE_BYTES: u64 = 256 * 1024;

#[derive(Debug, Clone)]
pub struct WhoisClient {
    server: String,
    port: u16,
    timeout: Duration,
    max_referrals: usize,
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new(&WhoisConfig::default())
    }
}

impl WhoisClient {
    pub fn new(config: &WhoisConfig) -> Self {
        Self {
            server: config.server.clone(),
            port: config.port,
            timeout: Duration::from_secs(config.timeout_secs),
            max_referrals: config.max_referrals,
        }
    }

    /// Raw response of `server` for `query`
    pub async fn query(&self, server: &str, query: &str) -> Result<String> {
        let mut stream = timeout(self.timeout, TcpStream::connect((server, self.port)))
            .await
            .map_err(|_| FavlensError::Whois(format!("timed out connecting to {server}")))?
            .map_err(|e| FavlensError::Whois(format!("failed to connect to {server}: {e}")))?;

        stream
            .write_all(format!("{query}\r\n").as_bytes())
            .await
            .map_err(|e| FavlensError::Whois(format!("failed to send query to {server}: {e}")))?;

        let mut buf = Vec::new();
        let mut limited = (&mut stream).take(MAX_RESPONSE_BYTES);
        timeout(self.timeout, limited.read_to_end(&mut buf))
            .await
            .map_err(|_| FavlensError::Whois(format!("timed out reading from {server}")))?
            .map_err(|e| FavlensError::Whois(format!("failed to read from {server}: {e}")))?;

        trace!(%server, bytes = buf.len(), "whois response");
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Follows referrals from the root server and returns the final answer.
    ///
    /// A referral that cannot be queried ends the walk with the last answer
    /// received; only a failure of the root server is an error.
    pub async fn lookup(&self, ip: IpAddr) -> Result<String> {
        let query = ip.to_string();
        let mut server = self.server.clone();
        let mut response = self.query(&server, &query).await?;

        for _ in 0..self.max_referrals {
            match parse_referral(&response) {
                Some(next) if !next.eq_ignore_ascii_case(&server) => {
                    debug!(%ip, from = %server, to = %next, "following whois referral");
                    match self.query(&next, &query).await {
                        Ok(next_response) => {
                            response = next_response;
                            server = next;
                        }
                        Err(err) => {
                            debug!(%ip, server = %next, err = %err, "whois referral failed, keeping previous answer");
                            break;
                        }
                    }
                }
                _ => break,
            }
        }

        Ok(response)
    }
}

impl NetworkRegistry for WhoisClient {
    async fn network_name(&self, ip: IpAddr) -> Result<Option<String>> {
        let response = self.lookup(ip).await?;
        Ok(parse_network_name(&response))
    }
}

/// Value of a `key: value` line, comparing keys case-insensitively
fn field<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let (k, v) = line.split_once(':')?;
    if k.trim().eq_ignore_ascii_case(key) {
        Some(v.trim())
    } else {
        None
    }
}

/// Next server named by a `refer:`, `whois:` or `ReferralServer:` line.
///
/// `rwhois://` referrals speak a different protocol on their own port and
/// are skipped.
pub fn parse_referral(response: &str) -> Option<String> {
    for line in response.lines() {
        let line = line.trim();
        if line.starts_with('%') || line.starts_with('#') {
            continue;
        }
        let value = field(line, "refer")
            .or_else(|| field(line, "whois"))
            .or_else(|| field(line, "ReferralServer"));
        if let Some(value) = value {
            if value.to_ascii_lowercase().starts_with("rwhois://") {
                continue;
            }
            // ReferralServer: whois://whois.ripe.net:43
            let host = value.strip_prefix("whois://").unwrap_or(value);
            let host = host.split(':').next().unwrap_or(host).trim_end_matches('/');
            if !host.is_empty() {
                return Some(host.to_string());
            }
        }
    }
    None
}

/// Name of the first network block in a registry answer.
pub fn parse_network_name(response: &str) -> Option<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('%') && !line.starts_with('#'))
        .filter_map(|line| field(line, "netname"))
        .find(|name| !name.is_empty())
        .map(str::to_string)
}
