//! The resolve → enumerate → fetch pipeline.

use std::time::Instant;

use tokio::time::sleep;

use crate::api::Transport;
use crate::config::{RateConfig, RunMode};
use crate::error::Result;
use crate::resolve::{resolve, ResolvedIdentity};
use crate::scrape::collections::{list_collections, CollectionDescriptor};
use crate::scrape::items::fetch_items;
use crate::scrape::report::{CollectionResult, ScrapeReport};

/// Hooks for reporting progress while a run is underway.
///
/// All methods default to doing nothing.
pub trait ScrapeProgress {
    fn resolving(&mut self, _target: &str) {}

    fn resolved(&mut self, _identity: &ResolvedIdentity) {}

    fn listing_collections(&mut self) {}

    fn collections_listed(&mut self, _collections: &[CollectionDescriptor]) {}

    /// Called after each collection; `index` is zero-based.
    fn collection_done(&mut self, _index: usize, _total: usize, _result: &CollectionResult) {}
}

/// Progress sink that ignores everything.
impl ScrapeProgress for () {}

/// Run a full scrape of `target`.
///
/// Only resolution and collection listing failures abort the run; item
/// fetching degrades to partial collections instead.
pub async fn scrape(
    transport: &dyn Transport,
    rate: &RateConfig,
    target: &str,
    mode: RunMode,
    progress: &mut dyn ScrapeProgress,
) -> Result<ScrapeReport> {
    let start = Instant::now();

    progress.resolving(target);
    let identity = resolve(transport, target).await?;
    tracing::info!(
        "Resolved {} to secUid {} (uniqueId: {})",
        target,
        identity.sec_uid,
        identity.unique_id.as_deref().unwrap_or("unknown")
    );
    progress.resolved(&identity);

    progress.listing_collections();
    let collections = list_collections(transport, rate, &identity.sec_uid).await?;
    tracing::info!("Found {} collections", collections.len());
    progress.collections_listed(&collections);

    let total = collections.len();
    let mut results = Vec::with_capacity(total);

    for (index, descriptor) in collections.into_iter().enumerate() {
        let fetch = fetch_items(transport, rate, &descriptor.collection_id).await;
        let result = CollectionResult::new(descriptor, fetch.items);

        tracing::debug!(
            "Collection {} ({}): expected={} actual={} outcome={} stop={:?}",
            result.collection_id,
            result.name,
            result.expected,
            result.actual(),
            result.outcome(),
            fetch.stop
        );
        progress.collection_done(index, total, &result);
        results.push(result);

        if (index + 1) % rate.batch_size.max(1) == 0 {
            sleep(rate.batch_pause()).await;
        } else {
            sleep(rate.interval()).await;
        }
    }

    let report = ScrapeReport::new(
        target,
        identity,
        mode,
        start.elapsed().as_secs_f64(),
        results,
    );
    tracing::info!(
        "Scrape finished: {} collections, {} videos in {}s",
        report.total_collections(),
        report.total_videos(),
        report.elapsed_seconds
    );

    Ok(report)
}
