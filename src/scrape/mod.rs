//! Collection scraping.
//!
//! This module provides:
//! - Collection folder enumeration
//! - Per-collection item pagination with retry
//! - Report types
//! - The resolve → enumerate → fetch pipeline

pub mod collections;
pub mod items;
pub mod report;
pub mod run;

pub use collections::{list_collections, CollectionDescriptor};
pub use items::{fetch_items, list_items, ItemFetch, StopReason};
pub use report::{CollectionOutcome, CollectionResult, ScrapeReport};
pub use run::{scrape, ScrapeProgress};
