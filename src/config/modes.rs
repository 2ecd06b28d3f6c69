//! Run mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::SessionCookies;

/// Whether requests carry session cookies.
///
/// Private collections are only listed in login mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Session cookies supplied.
    Login,
    /// Anonymous requests.
    #[default]
    Guest,
}

impl RunMode {
    /// Derive the mode from the cookies in use.
    pub fn from_cookies(cookies: &SessionCookies) -> Self {
        if cookies.is_empty() {
            RunMode::Guest
        } else {
            RunMode::Login
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, RunMode::Login)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Login => write!(f, "login"),
            RunMode::Guest => write!(f, "guest"),
        }
    }
}
