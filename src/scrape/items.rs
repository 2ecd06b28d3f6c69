//! Per-collection item pagination.
//!
//! Each page request is retried a bounded number of times with a fixed
//! delay. Nothing here returns an error: running out of attempts, a
//! non-zero `status_code`, or the end of the listing all stop the loop and
//! hand back whatever was collected so far. A short collection shows up in
//! the report as `actual < expected`.

use tokio::time::sleep;

use crate::api::types::{body_preview, ItemListResponse};
use crate::api::Transport;
use crate::config::RateConfig;
use crate::error::{Error, Result};
use crate::media::{parse_items, MediaItem};
use crate::scrape::collections::{APP_ID, PAGE_SIZE};

/// Collection item endpoint.
pub const ITEM_LIST_PATH: &str = "/api/collection/item_list/";

/// Fixed web-client parameters sent with every item page request.
const ITEM_PARAMS: &[(&str, &str)] = &[
    ("aid", APP_ID),
    ("device_platform", "web_pc"),
    ("channel", "tiktok_web"),
    ("sourceType", "113"),
    ("count", PAGE_SIZE),
    ("os", "windows"),
    ("region", "US"),
    ("language", "en"),
];

/// Why item pagination ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The listing was exhausted.
    NoMore,
    /// The server answered with a non-success `status_code`.
    BadStatus,
    /// A page kept failing after every attempt.
    RetriesExhausted,
}

/// Items collected for one collection plus how the loop ended.
#[derive(Debug, Clone)]
pub struct ItemFetch {
    pub items: Vec<MediaItem>,
    pub stop: StopReason,
    /// Pages successfully fetched.
    pub pages: u32,
}

/// Result of one page, fed back into the pagination loop.
enum PageStep {
    /// Items appended; fetch the page at this cursor next.
    Continue(String),
    /// Items (if any) appended; pagination is over.
    Stop(StopReason),
}

/// Fetch every item of a collection, returning a partial list on failure.
pub async fn list_items(
    transport: &dyn Transport,
    rate: &RateConfig,
    collection_id: &str,
) -> Vec<MediaItem> {
    fetch_items(transport, rate, collection_id).await.items
}

/// Fetch every item of a collection along with the stop reason.
pub async fn fetch_items(
    transport: &dyn Transport,
    rate: &RateConfig,
    collection_id: &str,
) -> ItemFetch {
    let url = format!("{}{}", transport.base_url(), ITEM_LIST_PATH);
    let mut items = Vec::new();
    let mut cursor = "0".to_string();
    let mut pages = 0;

    let stop = loop {
        let Some(page) = fetch_page_with_retry(transport, rate, &url, collection_id, &cursor).await
        else {
            break StopReason::RetriesExhausted;
        };
        pages += 1;

        match apply_page(page, &cursor, &mut items) {
            PageStep::Stop(reason) => break reason,
            PageStep::Continue(next) => cursor = next,
        }

        sleep(rate.interval()).await;
    };

    tracing::debug!(
        "Collection {}: {} items over {} pages, stopped: {:?}",
        collection_id,
        items.len(),
        pages,
        stop
    );

    ItemFetch { items, stop, pages }
}

/// Append a page's items and decide whether to continue.
fn apply_page(page: ItemListResponse, cursor: &str, items: &mut Vec<MediaItem>) -> PageStep {
    if page.status_code != Some(0) {
        tracing::debug!("Item page status_code {:?}, stopping", page.status_code);
        return PageStep::Stop(StopReason::BadStatus);
    }

    let raw = page.item_list.unwrap_or_default();
    items.extend(parse_items(&raw));

    if !page.has_more || raw.is_empty() {
        return PageStep::Stop(StopReason::NoMore);
    }

    let next = if page.cursor.is_empty() {
        "0".to_string()
    } else {
        page.cursor
    };
    if next == cursor {
        tracing::warn!("Item cursor did not advance ({}), stopping", cursor);
        return PageStep::Stop(StopReason::NoMore);
    }

    PageStep::Continue(next)
}

/// Fetch one page, retrying up to `rate.retries` attempts in total.
///
/// Returns `None` once every attempt has failed.
async fn fetch_page_with_retry(
    transport: &dyn Transport,
    rate: &RateConfig,
    url: &str,
    collection_id: &str,
    cursor: &str,
) -> Option<ItemListResponse> {
    let mut attempt = 0;

    loop {
        attempt += 1;

        match fetch_page(transport, url, collection_id, cursor).await {
            Ok(page) => return Some(page),
            Err(e) if attempt < rate.retries => {
                tracing::warn!(
                    "Item page for collection {} at cursor {} failed (attempt {}/{}): {}",
                    collection_id,
                    cursor,
                    attempt,
                    rate.retries,
                    e
                );
                sleep(rate.retry_delay()).await;
            }
            Err(e) => {
                tracing::warn!(
                    "Giving up on collection {} at cursor {} after {} attempts: {}",
                    collection_id,
                    cursor,
                    attempt,
                    e
                );
                return None;
            }
        }
    }
}

async fn fetch_page(
    transport: &dyn Transport,
    url: &str,
    collection_id: &str,
    cursor: &str,
) -> Result<ItemListResponse> {
    let mut query: Vec<(&str, String)> = ITEM_PARAMS
        .iter()
        .map(|(k, v)| (*k, v.to_string()))
        .collect();
    query.push(("collectionId", collection_id.to_string()));
    query.push(("cursor", cursor.to_string()));

    let text = transport.fetch_api(url, &query).await?;
    serde_json::from_str(&text).map_err(|e| {
        Error::Api(format!(
            "Failed to parse item list: {} - Response: {}",
            e,
            body_preview(&text)
        ))
    })
}
