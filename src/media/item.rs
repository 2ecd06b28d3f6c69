//! Media item representation.

use serde::{Deserialize, Serialize};

/// Origin used for public video links, independent of the API host.
const VIDEO_URL_BASE: &str = "https://www.tiktok.com";

/// Build the public URL of a video from its author handle and id.
pub fn video_url(author: &str, id: &str) -> String {
    format!("{}/@{}/video/{}", VIDEO_URL_BASE, author, id)
}

/// A video saved in a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Video ID.
    pub id: String,

    /// Public video URL.
    pub url: String,

    /// Caption text.
    #[serde(rename = "desc")]
    pub description: String,

    /// Author handle (without the leading `@`).
    pub author: String,

    /// Play count.
    pub plays: u64,

    /// Like count.
    pub likes: u64,

    /// Comment count.
    pub comments: u64,

    /// Share count.
    pub shares: u64,
}
