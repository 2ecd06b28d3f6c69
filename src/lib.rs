//! tiktok-collections - export a TikTok user's collection folders.
//!
//! This library resolves a TikTok account from any common identifier, lists
//! its collection folders and fetches every video in each one.
//!
//! # Features
//!
//! - Accepts usernames, profile/video URLs, short links, numeric user ids and secUids
//! - Cursor pagination over collections and collection items
//! - Bounded retry per item page, degrading to partial results
//! - Optional session cookies for private collections
//! - JSON report with per-video engagement counters
//!
//! # Example
//!
//! ```no_run
//! use tiktok_collections::{scrape, Config, RunMode, TikTokApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let cookies = config.session_cookies()?;
//!     let api = TikTokApi::new(
//!         &config.api.base_url,
//!         &config.api.user_agent,
//!         config.timeout(),
//!         &cookies,
//!     )?;
//!
//!     let report = scrape(&api, &config.rate, "@tiktok", RunMode::from_cookies(&cookies), &mut ()).await?;
//!     println!("{}", report.to_json(true)?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod output;
pub mod resolve;
pub mod scrape;

// Re-exports for convenience
pub use api::{SessionCookies, TikTokApi, Transport};
pub use config::{Config, RunMode};
pub use error::{Error, Result};
pub use media::MediaItem;
pub use resolve::{resolve, ResolvedIdentity};
pub use scrape::{
    list_collections, list_items, scrape, CollectionDescriptor, CollectionResult, ScrapeReport,
};
