//! Identity fields embedded in profile and video pages.
//!
//! TikTok pages carry a hydration blob with the account in it. The fields are
//! pulled out with independent pattern searches instead of parsing the blob,
//! so changes to the surrounding structure do not break extraction as long
//! as the three key/value shapes survive.

use std::sync::LazyLock;

use regex::Regex;

static SEC_UID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""secUid":"([^"]+)""#).unwrap());

static USER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""user":\s*\{[^}]*"id":"(\d+)""#).unwrap());

static UNIQUE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""uniqueId":"([^"]+)""#).unwrap());

/// Raw fields scraped from page markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityFields {
    pub sec_uid: String,
    pub uid: Option<String>,
    pub unique_id: Option<String>,
}

/// Scrape identity fields from markup.
///
/// Returns `None` only when no `secUid` is present; the other two fields
/// are optional.
pub fn extract_identity_fields(markup: &str) -> Option<IdentityFields> {
    let capture = |re: &Regex| {
        re.captures(markup)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    };

    Some(IdentityFields {
        sec_uid: capture(&SEC_UID)?,
        uid: capture(&USER_ID),
        unique_id: capture(&UNIQUE_ID),
    })
}
