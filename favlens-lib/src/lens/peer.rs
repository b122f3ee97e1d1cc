use std::net::IpAddr;

use reqwest::Url;
use tokio::net::lookup_host;
use tracing::debug;

use crate::error::{FavlensError, Result};
use crate::source::Endpoint;

/// Remote IP of the connection that served `endpoint`.
///
/// Uses the socket address recorded on the response. When the client did
/// not record one, falls back to resolving the URL's host and taking the
/// first address, which is the one the client would have dialed.
pub async fn peer_ip(endpoint: &Endpoint) -> Result<IpAddr> {
    if let Some(addr) = endpoint.peer {
        return Ok(addr.ip());
    }

    let url = Url::parse(&endpoint.url)
        .map_err(|e| FavlensError::InvalidUrl(format!("{}: {e}", endpoint.url)))?;
    let host = url
        .host_str()
        .ok_or_else(|| FavlensError::InvalidUrl(format!("{}: missing host", endpoint.url)))?;
    let port = url.port_or_known_default().unwrap_or(443);

    if let Ok(ip) = host.trim_start_matches('[').trim_end_matches(']').parse::<IpAddr>() {
        return Ok(ip);
    }

    debug!(%host, "no peer recorded on response, resolving host");
    let mut addrs = lookup_host((host, port))
        .await
        .map_err(|e| FavlensError::Connection(format!("{host}: {e}")))?;
    addrs
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| FavlensError::Connection(format!("{host}: no addresses found")))
}
