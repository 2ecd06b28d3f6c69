//! API response type definitions.
//!
//! TikTok is inconsistent about numeric encoding: cursors, collection ids
//! and counters show up as either JSON strings or numbers depending on the
//! endpoint and account. The `flex` helpers accept both.

use serde::Deserialize;

/// Page of `/api/user/collection_list/`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionListResponse {
    #[serde(default)]
    pub collection_list: Option<Vec<RawCollection>>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default, deserialize_with = "flex::string")]
    pub cursor: String,
}

/// Collection folder as listed by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCollection {
    #[serde(deserialize_with = "flex::string")]
    pub collection_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "flex::count")]
    pub total: u64,
}

/// Page of `/api/collection/item_list/`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListResponse {
    #[serde(rename = "status_code", default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub item_list: Option<Vec<RawItem>>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default, deserialize_with = "flex::string")]
    pub cursor: String,
}

/// Video entry inside an item page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    #[serde(default, deserialize_with = "flex::string")]
    pub id: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub author: Option<RawAuthor>,
    #[serde(default)]
    pub stats: Option<RawStats>,
}

/// Author block of a video.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAuthor {
    #[serde(default)]
    pub unique_id: Option<String>,
}

/// Engagement counters of a video.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStats {
    #[serde(default, deserialize_with = "flex::count")]
    pub play_count: u64,
    #[serde(default, deserialize_with = "flex::count")]
    pub digg_count: u64,
    #[serde(default, deserialize_with = "flex::count")]
    pub comment_count: u64,
    #[serde(default, deserialize_with = "flex::count")]
    pub share_count: u64,
}

/// Leading part of a response body for error messages.
pub fn body_preview(text: &str) -> &str {
    const LIMIT: usize = 500;
    match text.char_indices().nth(LIMIT) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

mod flex {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrNum {
        Str(String),
        Int(i64),
        Float(f64),
        Null,
    }

    /// String or number into a string; null becomes empty.
    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match StrOrNum::deserialize(deserializer)? {
            StrOrNum::Str(s) => s,
            StrOrNum::Int(n) => n.to_string(),
            StrOrNum::Float(n) => n.to_string(),
            StrOrNum::Null => String::new(),
        })
    }

    /// String or number into a non-negative count; unparseable becomes zero.
    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        Ok(match StrOrNum::deserialize(deserializer)? {
            StrOrNum::Str(s) => s.trim().parse().unwrap_or(0),
            StrOrNum::Int(n) => n.max(0) as u64,
            StrOrNum::Float(n) if n > 0.0 => n as u64,
            StrOrNum::Float(_) | StrOrNum::Null => 0,
        })
    }
}
