//! TikTok web API module.
//!
//! This module provides:
//! - The `Transport` seam the scraper talks through
//! - HTTP client for TikTok web pages and JSON endpoints
//! - Session cookie handling
//! - API response types

pub mod auth;
pub mod client;
pub mod transport;
pub mod types;

pub use auth::SessionCookies;
pub use client::{TikTokApi, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use transport::Transport;
pub use types::*;
