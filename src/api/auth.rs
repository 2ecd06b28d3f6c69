//! Session cookie handling.
//!
//! Cookies are supplied pre-formed, usually copied from a logged-in browser
//! as a single `k=v; k2=v2` line. Having any cookies switches the run into
//! login mode, which exposes private collections.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Ordered set of session cookies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookies {
    pairs: Vec<(String, String)>,
}

impl SessionCookies {
    /// Parse a raw `Cookie` header style string.
    ///
    /// Parts without `=` are skipped. Values may themselves contain `=`.
    pub fn parse(raw: &str) -> Self {
        let pairs = raw
            .split(';')
            .filter_map(|part| {
                let (key, value) = part.split_once('=')?;
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), value.trim().to_string()))
            })
            .collect();

        Self { pairs }
    }

    /// Read and parse a cookie file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Cookie file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        Ok(Self::parse(content.trim()))
    }

    /// Whether no cookies were supplied.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of cookies.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Look up a cookie value by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render as a `Cookie` header value.
    pub fn header_value(&self) -> Option<String> {
        if self.pairs.is_empty() {
            return None;
        }

        Some(
            self.pairs
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
