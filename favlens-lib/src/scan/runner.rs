use std::io::Write;

use tracing::{info, warn};

use super::record::ResultRecord;
use super::report::write_record;
use crate::error::{FavlensError, Result};
use crate::fingerprinting::favicon_hash;
use crate::lens::{inspect, NetworkRegistry};
use crate::search::IndexSearch;
use crate::source::{FaviconSource, Fetch, Targets};

/// Runs every target through fetch, fingerprint, inspection and search,
/// one at a time, in the order given by [`Targets::sources`].
pub struct Scanner<F, S, R> {
    fetcher: F,
    search: S,
    registry: R,
}

impl<F, S, R> Scanner<F, S, R>
where
    F: Fetch,
    S: IndexSearch,
    R: NetworkRegistry,
{
    pub fn new(fetcher: F, search: S, registry: R) -> Self {
        Self { fetcher, search, registry }
    }

    /// Scans all targets, writing each record to `out` as soon as it is built.
    ///
    /// A refused connection while scanning a web host is reported and the
    /// next host is tried; when that host was the only web target the run
    /// ends with [`FavlensError::Unreachable`]. Every other failure aborts
    /// the run.
    pub async fn run<W: Write>(&self, targets: &Targets, out: &mut W) -> Result<Vec<ResultRecord>> {
        let mut records = Vec::with_capacity(targets.len());
        self.run_into(targets, out, &mut records).await?;
        Ok(records)
    }

    /// Same as [`Scanner::run`], but pushes into `records` so that the
    /// records built before a fatal error stay with the caller.
    pub async fn run_into<W: Write>(
        &self,
        targets: &Targets,
        out: &mut W,
        records: &mut Vec<ResultRecord>,
    ) -> Result<()> {
        for source in targets.sources() {
            match self.scan(&source).await {
                Ok(record) => {
                    write_record(out, &record)?;
                    records.push(record);
                }
                Err(FavlensError::Connection(reason)) if matches!(source, FaviconSource::Web(_)) => {
                    let host = source.identifier();
                    warn!(%host, %reason, "connection refused");
                    writeln!(out, "[x] Connection refused by {host}.")?;
                    if targets.hosts.len() == 1 {
                        return Err(FavlensError::Unreachable(host));
                    }
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    /// Builds the record for a single source
    pub async fn scan(&self, source: &FaviconSource) -> Result<ResultRecord> {
        let resolved = source.resolve(&self.fetcher).await?;
        let favhash = favicon_hash(&resolved.bytes, source.variant());

        let connection = match &resolved.endpoint {
            Some(endpoint) => Some(inspect(endpoint, &self.registry).await?),
            None => None,
        };

        let real_ips = self.search.search(favhash).await?;
        info!(source = %source.identifier(), %favhash, matches = real_ips.len(), "target scanned");

        Ok(ResultRecord {
            favhash,
            source: source.identifier(),
            kind: source.kind(),
            connection,
            real_ips,
        })
    }
}
