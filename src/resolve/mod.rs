//! User identity resolution.
//!
//! Turns any of the accepted target shapes (secUid, numeric user id, short
//! link, profile or video URL, other TikTok page, bare username) into a
//! `ResolvedIdentity`.

pub mod markup;
pub mod resolver;
pub mod target;

pub use markup::{extract_identity_fields, IdentityFields};
pub use resolver::{resolve, ResolvedIdentity};
pub use target::{classify, TargetKind, SEC_UID_PREFIX};
