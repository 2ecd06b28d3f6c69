//! Resolution of a classified target into a `ResolvedIdentity`.

use crate::api::Transport;
use crate::error::{Error, Result};
use crate::resolve::markup::extract_identity_fields;
use crate::resolve::target::{classify, extract_handle, TargetKind};

/// Canonical identity of the target account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    /// Opaque stable account token used by the collection endpoints.
    pub sec_uid: String,
    /// Numeric user id, when the page exposed it.
    pub uid: Option<String>,
    /// Handle, when known.
    pub unique_id: Option<String>,
}

/// Resolve any supported target string to an identity.
///
/// A secUid input is returned without touching the network; every other
/// shape costs one or two requests.
pub async fn resolve(transport: &dyn Transport, target: &str) -> Result<ResolvedIdentity> {
    let kind = classify(target);
    tracing::debug!("Classified target {:?} as {:?}", target, kind);

    match kind {
        TargetKind::SecUid(sec_uid) => Ok(ResolvedIdentity {
            sec_uid,
            uid: None,
            unique_id: None,
        }),
        TargetKind::UserId(id) => {
            let url = format!("{}/share/user/{}", transport.base_url(), id);
            let location = transport.fetch_location(&url).await?.unwrap_or_default();
            tracing::debug!("User id {} redirects to {:?}", id, location);

            match extract_handle(&location) {
                Some(username) => resolve_profile(transport, &username).await,
                None => Err(Error::Resolution(format!("Cannot resolve user_id: {}", id))),
            }
        }
        TargetKind::ShortLink(url) => {
            let location = transport
                .fetch_location(&url)
                .await?
                .filter(|l| !l.is_empty())
                .ok_or_else(|| {
                    Error::Resolution(format!("Short link did not redirect: {}", url))
                })?;
            tracing::debug!("Short link {} redirects to {}", url, location);

            match extract_handle(&location) {
                Some(username) => resolve_profile(transport, &username).await,
                None => resolve_page(transport, &location).await,
            }
        }
        TargetKind::ProfileUrl { url, username } => {
            tracing::debug!("Profile URL {} names @{}", url, username);
            resolve_profile(transport, &username).await
        }
        TargetKind::Username(username) => resolve_profile(transport, &username).await,
        TargetKind::PageUrl(url) => resolve_page(transport, &url).await,
    }
}

/// Fetch a profile page and scrape it, falling back to `username` as handle.
async fn resolve_profile(transport: &dyn Transport, username: &str) -> Result<ResolvedIdentity> {
    let url = format!("{}/@{}", transport.base_url(), username);
    let markup = transport.fetch_page(&url).await?;
    scrape(&markup, Some(username), &url)
}

/// Fetch an arbitrary TikTok page and scrape it.
async fn resolve_page(transport: &dyn Transport, url: &str) -> Result<ResolvedIdentity> {
    let markup = transport.fetch_page(url).await?;
    scrape(&markup, None, url)
}

fn scrape(markup: &str, fallback_name: Option<&str>, url: &str) -> Result<ResolvedIdentity> {
    let fields = extract_identity_fields(markup).ok_or_else(|| {
        Error::Resolution(format!("Cannot extract secUid from page: {}", url))
    })?;

    Ok(ResolvedIdentity {
        sec_uid: fields.sec_uid,
        uid: fields.uid,
        unique_id: fields
            .unique_id
            .or_else(|| fallback_name.map(str::to_string)),
    })
}
