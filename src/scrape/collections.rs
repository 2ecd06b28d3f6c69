//! Collection folder enumeration.

use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::api::types::{body_preview, CollectionListResponse, RawCollection};
use crate::api::Transport;
use crate::config::RateConfig;
use crate::error::{Error, Result};

/// Collection listing endpoint.
pub const COLLECTION_LIST_PATH: &str = "/api/user/collection_list/";

/// Web app id expected by the API.
pub(crate) const APP_ID: &str = "1988";

/// Requested page size; the server caps it anyway.
pub(crate) const PAGE_SIZE: &str = "30";

/// A collection folder of the target account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDescriptor {
    pub collection_id: String,
    pub name: String,
    /// Item total reported by the server; not guaranteed to match what the
    /// item endpoint actually returns.
    pub expected_count: u64,
}

impl From<RawCollection> for CollectionDescriptor {
    fn from(raw: RawCollection) -> Self {
        Self {
            collection_id: raw.collection_id,
            name: raw.name.unwrap_or_default(),
            expected_count: raw.total,
        }
    }
}

/// List every collection folder of an account.
///
/// Stops when the server reports no more pages or returns an empty page,
/// even if it claims more exist. An account without collections yields an
/// empty list.
pub async fn list_collections(
    transport: &dyn Transport,
    rate: &RateConfig,
    sec_uid: &str,
) -> Result<Vec<CollectionDescriptor>> {
    let url = format!("{}{}", transport.base_url(), COLLECTION_LIST_PATH);
    let mut collections = Vec::new();
    let mut cursor = "0".to_string();

    loop {
        let query = [
            ("secUid", sec_uid.to_string()),
            ("aid", APP_ID.to_string()),
            ("count", PAGE_SIZE.to_string()),
            ("cursor", cursor.clone()),
        ];

        let text = transport.fetch_api(&url, &query).await?;
        let page: CollectionListResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse collection list: {} - Response: {}",
                e,
                body_preview(&text)
            ))
        })?;

        let batch = page.collection_list.unwrap_or_default();
        tracing::debug!(
            "Collection page at cursor {}: {} collections, has_more={}",
            cursor,
            batch.len(),
            page.has_more
        );

        if batch.is_empty() {
            if page.has_more {
                tracing::debug!("Empty collection page despite has_more, stopping");
            }
            break;
        }

        collections.extend(batch.into_iter().map(CollectionDescriptor::from));

        if !page.has_more {
            break;
        }

        let next = if page.cursor.is_empty() {
            "0".to_string()
        } else {
            page.cursor
        };
        if next == cursor {
            tracing::warn!("Collection cursor did not advance ({}), stopping", cursor);
            break;
        }
        cursor = next;

        sleep(rate.interval()).await;
    }

    Ok(collections)
}
