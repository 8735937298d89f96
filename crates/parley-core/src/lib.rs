//! Canonical, provider-agnostic conversation model
//!
//! Messages are ordered sequences of typed parts. Binary content is never
//! carried inline; parts reference assets by content hash and callers supply
//! an [`AssetUrls`] lookup to resolve those hashes to public URLs.

#![allow(clippy::must_use_candidate)]

pub mod asset;
mod de;
pub mod format;
pub mod message;
pub mod part;

pub use asset::{Asset, AssetUrls, PublicUrl};
pub use format::{MessageFormat, UnknownFormat};
pub use message::{Message, Role};
pub use part::{Part, PartMeta, PartType};
