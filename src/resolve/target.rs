//! Target classification.
//!
//! Inputs can satisfy several shapes at once (a profile URL also contains
//! the domain, a secUid could be mistaken for a username), so the rules are
//! evaluated strictly in table order and the first match wins. Anything no
//! rule claims is treated as a bare username.

use std::sync::LazyLock;

use regex::Regex;

/// Prefix shared by every secUid.
pub const SEC_UID_PREFIX: &str = "MS4wLjAB";

/// Numeric user ids are longer than this.
const MIN_USER_ID_LEN: usize = 10;

static SHORT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://(vm|vt)\.tiktok\.com/").unwrap());

static HANDLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"@([^/?"]+)"#).unwrap());

/// Shape of a target identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    /// Already a secUid; used verbatim.
    SecUid(String),
    /// Numeric user id, resolved through the share redirect.
    UserId(String),
    /// `vm.`/`vt.` short link, resolved through its redirect.
    ShortLink(String),
    /// TikTok URL carrying an `@handle`.
    ProfileUrl { url: String, username: String },
    /// TikTok URL without a handle; the page itself is scraped.
    PageUrl(String),
    /// Bare username, with any leading `@` removed.
    Username(String),
}

type Rule = (fn(&str) -> bool, fn(&str) -> TargetKind);

/// Classification rules in precedence order.
const RULES: &[Rule] = &[
    (is_sec_uid, sec_uid),
    (is_user_id, user_id),
    (is_short_link, short_link),
    (is_platform_url, platform_url),
];

/// Classify a target string.
pub fn classify(target: &str) -> TargetKind {
    let target = target.trim();

    RULES
        .iter()
        .find(|(matches, _)| matches(target))
        .map(|(_, build)| build(target))
        .unwrap_or_else(|| TargetKind::Username(target.trim_start_matches('@').to_string()))
}

/// Extract the `@handle` from a URL or redirect target.
pub fn extract_handle(text: &str) -> Option<String> {
    HANDLE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn is_sec_uid(target: &str) -> bool {
    target.starts_with(SEC_UID_PREFIX)
}

fn is_user_id(target: &str) -> bool {
    target.len() > MIN_USER_ID_LEN && target.chars().all(|c| c.is_ascii_digit())
}

fn is_short_link(target: &str) -> bool {
    SHORT_LINK.is_match(target)
}

fn is_platform_url(target: &str) -> bool {
    target.contains("tiktok.com")
}

fn sec_uid(target: &str) -> TargetKind {
    TargetKind::SecUid(target.to_string())
}

fn user_id(target: &str) -> TargetKind {
    TargetKind::UserId(target.to_string())
}

fn short_link(target: &str) -> TargetKind {
    TargetKind::ShortLink(target.to_string())
}

fn platform_url(target: &str) -> TargetKind {
    match extract_handle(target) {
        Some(handle) => {
            let username = urlencoding::decode(&handle)
                .map(|decoded| decoded.into_owned())
                .unwrap_or(handle);
            TargetKind::ProfileUrl {
                url: target.to_string(),
                username,
            }
        }
        None => TargetKind::PageUrl(target.to_string()),
    }
}
