//! Report types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::RunMode;
use crate::media::MediaItem;
use crate::resolve::ResolvedIdentity;
use crate::scrape::collections::CollectionDescriptor;

/// How completely a collection was fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionOutcome {
    /// At least as many items as the server announced.
    Complete,
    /// Some items, but fewer than announced.
    Partial,
    /// Nothing fetched although items were announced.
    Empty,
}

impl CollectionOutcome {
    pub fn classify(expected: u64, actual: u64) -> Self {
        if actual >= expected {
            CollectionOutcome::Complete
        } else if actual > 0 {
            CollectionOutcome::Partial
        } else {
            CollectionOutcome::Empty
        }
    }
}

impl fmt::Display for CollectionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionOutcome::Complete => write!(f, "complete"),
            CollectionOutcome::Partial => write!(f, "partial"),
            CollectionOutcome::Empty => write!(f, "empty"),
        }
    }
}

/// Items fetched for one collection.
///
/// `actual` is never stored: it is serialized from `items.len()` and
/// recomputed on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "CollectionResultRepr", from = "CollectionResultRepr")]
pub struct CollectionResult {
    pub collection_id: String,
    pub name: String,
    pub expected: u64,
    pub items: Vec<MediaItem>,
}

impl CollectionResult {
    pub fn new(descriptor: CollectionDescriptor, items: Vec<MediaItem>) -> Self {
        Self {
            collection_id: descriptor.collection_id,
            name: descriptor.name,
            expected: descriptor.expected_count,
            items,
        }
    }

    /// Number of items actually fetched.
    pub fn actual(&self) -> u64 {
        self.items.len() as u64
    }

    pub fn outcome(&self) -> CollectionOutcome {
        CollectionOutcome::classify(self.expected, self.actual())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionResultRepr {
    collection_id: String,
    name: String,
    expected: u64,
    #[serde(default)]
    actual: u64,
    #[serde(default)]
    items: Vec<MediaItem>,
}

impl From<CollectionResult> for CollectionResultRepr {
    fn from(result: CollectionResult) -> Self {
        Self {
            actual: result.actual(),
            collection_id: result.collection_id,
            name: result.name,
            expected: result.expected,
            items: result.items,
        }
    }
}

impl From<CollectionResultRepr> for CollectionResult {
    fn from(repr: CollectionResultRepr) -> Self {
        if repr.actual != repr.items.len() as u64 {
            tracing::debug!(
                "Collection {} claims {} items but lists {}",
                repr.collection_id,
                repr.actual,
                repr.items.len()
            );
        }

        Self {
            collection_id: repr.collection_id,
            name: repr.name,
            expected: repr.expected,
            items: repr.items,
        }
    }
}

/// Output of a full run.
///
/// The collection and video totals are derived from `collections` whenever
/// they are read or serialized, like each collection's `actual`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ScrapeReportRepr", from = "ScrapeReportRepr")]
pub struct ScrapeReport {
    pub target: String,
    pub sec_uid: String,
    pub uid: Option<String>,
    pub unique_id: Option<String>,
    pub mode: RunMode,
    pub elapsed_seconds: f64,
    pub collections: Vec<CollectionResult>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeReportRepr {
    target: String,
    sec_uid: String,
    uid: Option<String>,
    unique_id: Option<String>,
    mode: RunMode,
    #[serde(default)]
    total_collections: usize,
    #[serde(default)]
    total_videos: usize,
    elapsed_seconds: f64,
    collections: Vec<CollectionResult>,
}

impl From<ScrapeReport> for ScrapeReportRepr {
    fn from(report: ScrapeReport) -> Self {
        Self {
            total_collections: report.total_collections(),
            total_videos: report.total_videos(),
            target: report.target,
            sec_uid: report.sec_uid,
            uid: report.uid,
            unique_id: report.unique_id,
            mode: report.mode,
            elapsed_seconds: report.elapsed_seconds,
            collections: report.collections,
        }
    }
}

impl From<ScrapeReportRepr> for ScrapeReport {
    fn from(repr: ScrapeReportRepr) -> Self {
        let report = Self {
            target: repr.target,
            sec_uid: repr.sec_uid,
            uid: repr.uid,
            unique_id: repr.unique_id,
            mode: repr.mode,
            elapsed_seconds: repr.elapsed_seconds,
            collections: repr.collections,
        };

        if repr.total_collections != report.total_collections()
            || repr.total_videos != report.total_videos()
        {
            tracing::debug!(
                "Report totals {}/{} do not match its collections, recomputed as {}/{}",
                repr.total_collections,
                repr.total_videos,
                report.total_collections(),
                report.total_videos()
            );
        }

        report
    }
}

impl ScrapeReport {
    /// Assemble a report; elapsed time is rounded to a tenth of a second.
    pub fn new(
        target: &str,
        identity: ResolvedIdentity,
        mode: RunMode,
        elapsed_seconds: f64,
        collections: Vec<CollectionResult>,
    ) -> Self {
        Self {
            target: target.to_string(),
            sec_uid: identity.sec_uid,
            uid: identity.uid,
            unique_id: identity.unique_id,
            mode,
            elapsed_seconds: (elapsed_seconds * 10.0).round() / 10.0,
            collections,
        }
    }

    pub fn total_collections(&self) -> usize {
        self.collections.len()
    }

    pub fn total_videos(&self) -> usize {
        self.collections.iter().map(|c| c.items.len()).sum()
    }

    /// Count of collections per outcome: (complete, partial, empty).
    pub fn outcome_counts(&self) -> (usize, usize, usize) {
        self.collections
            .iter()
            .fold((0, 0, 0), |(c, p, e), result| match result.outcome() {
                CollectionOutcome::Complete => (c + 1, p, e),
                CollectionOutcome::Partial => (c, p + 1, e),
                CollectionOutcome::Empty => (c, p, e + 1),
            })
    }

    /// Serialize as JSON, keeping non-ASCII text as-is.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
