//! Region fan-out fetcher.
//!
//! Regions are visited sequentially to bound concurrent load on the API;
//! within a region, per-namespace metadata (and recall, when requested)
//! calls run concurrently. Per-call failures stay per-call: a namespace
//! whose metadata fetch fails is dropped from the cycle's output, a
//! region whose listing fails is skipped in all-regions mode, and a
//! failing recall estimation only costs that namespace its recall value.

use futures_util::future::join_all;
use thiserror::Error;
use tracing::{debug, warn};

use tpuff_client::{ClientError, ClientResult, NamespaceApi, regions};

use crate::snapshot::NamespaceSnapshot;

/// Probe queries per recall estimation.
pub const RECALL_SAMPLE_COUNT: u32 = 25;
/// Results per probe query.
pub const RECALL_TOP_K: u32 = 10;

/// Errors the fetcher itself can raise. Partial failures never surface
/// here; in single-region mode a failed listing is the whole cycle
/// failing, so it propagates.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("a single region and all-regions mode are mutually exclusive")]
    RegionConflict,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// What one fetch cycle should do.
#[derive(Debug, Clone)]
pub struct FetchPlan {
    /// Explicit region to query; `None` queries the default region.
    pub region: Option<String>,
    /// Query the full static region table instead.
    pub all_regions: bool,
    /// Issue recall estimation calls this cycle.
    pub include_recall: bool,
}

/// A region to visit: the region queried, and the region recorded on the
/// resulting snapshots (empty in default single-region mode).
struct RegionTarget {
    query: String,
    label: String,
}

impl FetchPlan {
    fn targets(&self) -> Result<Vec<RegionTarget>, FetchError> {
        if self.all_regions && self.region.is_some() {
            return Err(FetchError::RegionConflict);
        }
        if self.all_regions {
            return Ok(regions::REGIONS
                .iter()
                .map(|r| RegionTarget {
                    query: r.to_string(),
                    label: r.to_string(),
                })
                .collect());
        }
        Ok(vec![match &self.region {
            Some(r) => RegionTarget {
                query: r.clone(),
                label: r.clone(),
            },
            None => RegionTarget {
                query: regions::DEFAULT_REGION.to_string(),
                label: String::new(),
            },
        }])
    }
}

/// Fetch namespace snapshots according to `plan`.
///
/// In all-regions mode, unreachable regions are skipped and the rest
/// still produce results; partial success is not an error. In
/// single-region mode a listing failure propagates — there is nothing
/// left to serve from that cycle.
pub async fn fetch_namespaces<C: NamespaceApi>(
    client: &C,
    plan: &FetchPlan,
) -> Result<Vec<NamespaceSnapshot>, FetchError> {
    let targets = plan.targets()?;

    if !plan.all_regions {
        let target = &targets[0];
        return Ok(fetch_region(client, target, plan.include_recall).await?);
    }

    let mut snapshots = Vec::new();
    let mut reachable = 0usize;
    for target in &targets {
        match fetch_region(client, target, plan.include_recall).await {
            Ok(mut batch) => {
                reachable += 1;
                snapshots.append(&mut batch);
            }
            Err(e) => {
                warn!(region = %target.query, error = %e, "region listing failed, skipping region");
            }
        }
    }
    debug!(
        reachable,
        total = targets.len(),
        namespaces = snapshots.len(),
        "all-regions fetch complete"
    );
    Ok(snapshots)
}

/// Fetch every namespace in one region: list, then fan out metadata and
/// recall calls concurrently, then partition results at fan-in.
async fn fetch_region<C: NamespaceApi>(
    client: &C,
    target: &RegionTarget,
    include_recall: bool,
) -> ClientResult<Vec<NamespaceSnapshot>> {
    let namespaces = client.list_namespaces(&target.query).await?;
    if namespaces.is_empty() {
        return Ok(Vec::new());
    }

    let metadata_fut = join_all(
        namespaces
            .iter()
            .map(|ns| client.namespace_metadata(&target.query, &ns.id)),
    );
    let recall_fut = async {
        if include_recall {
            join_all(namespaces.iter().map(|ns| async move {
                Some(
                    client
                        .estimate_recall(&target.query, &ns.id, RECALL_SAMPLE_COUNT, RECALL_TOP_K)
                        .await,
                )
            }))
            .await
        } else {
            namespaces.iter().map(|_| None).collect()
        }
    };
    let (metadata_results, recall_results) = tokio::join!(metadata_fut, recall_fut);

    let mut snapshots = Vec::with_capacity(namespaces.len());
    for ((ns, metadata), recall) in namespaces
        .iter()
        .zip(metadata_results)
        .zip(recall_results)
    {
        let metadata = match metadata {
            Ok(m) => m,
            Err(e) => {
                warn!(namespace = %ns.id, region = %target.query, error = %e,
                      "metadata fetch failed, dropping namespace from this cycle");
                continue;
            }
        };
        let recall = match recall {
            Some(Ok(r)) => Some(r),
            Some(Err(e)) => {
                warn!(namespace = %ns.id, region = %target.query, error = %e,
                      "recall estimation failed");
                None
            }
            None => None,
        };
        snapshots.push(NamespaceSnapshot::from_metadata(
            &ns.id,
            &target.label,
            &metadata,
            recall,
        ));
    }
    Ok(snapshots)
}
