//! Feed object types.
//!
//! This module contains the data structures a decoded feed is made of:
//!
//! - [`Channel`] - The feed metadata and its items
//! - [`Item`] - A single story or post
//! - [`MediaContent`], [`MediaThumbnail`], [`MediaCredit`] - Media RSS
//!   attachments of an item
//!
//! Also provides [`Size`] and the namespace constants.

mod channel;
mod common;
mod item;
mod media;

pub use channel::Channel;
pub use common::{
    canonical_prefix, Size, KNOWN_NAMESPACES, RSS_VERSION, XMLNS_CONTENT, XMLNS_DC, XMLNS_MEDIA,
    XMLNS_SLASH, XMLNS_WFW,
};
pub use item::Item;
pub use media::{MediaContent, MediaCredit, MediaThumbnail, DEFAULT_EXPRESSION};
