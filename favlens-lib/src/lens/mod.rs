pub mod peer;
pub mod whois;

use std::future::Future;
use std::net::IpAddr;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::source::Endpoint;

pub use peer::peer_ip;
pub use whois::WhoisClient;

/// Address actually reached when fetching over the network and the
/// registered name of the network it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionInfo {
    #[serde(rename = "mask_ip")]
    pub ip: IpAddr,
    #[serde(rename = "mask_isp")]
    pub isp: Option<String>,
}

/// Registry lookup of the network name an address is allocated to
pub trait NetworkRegistry {
    fn network_name(&self, ip: IpAddr) -> impl Future<Output = Result<Option<String>>>;
}

/// Peer address of `endpoint` plus its network name.
///
/// A failed registry lookup leaves the name empty; the peer is still
/// reported.
pub async fn inspect<R: NetworkRegistry>(endpoint: &Endpoint, registry: &R) -> Result<ConnectionInfo> {
    let ip = peer_ip(endpoint).await?;
    let isp = match registry.network_name(ip).await {
        Ok(name) => name,
        Err(err) => {
            warn!(%ip, %err, "network registry lookup failed");
            None
        }
    };
    debug!(%ip, ?isp, url = %endpoint.url, "connection inspected");
    Ok(ConnectionInfo { ip, isp })
}
