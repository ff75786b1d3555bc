//! Channel - the top-level record of an RSS feed.
//!
//! A feed holds a single channel, which carries the feed metadata and owns
//! every decoded item in document order.

use crate::objects::item::Item;
use crate::objects::media::MediaContent;
use chrono::{DateTime, FixedOffset};
use url::Url;

/// Represents the `channel` element of an RSS 2.0 feed.
///
/// `title`, `link` and `description` are required by RSS 2.0 but the decoder
/// leaves them empty when a feed omits them; validation is up to the caller.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    // === Required Elements ===
    /// Name of the channel
    pub title: String,
    /// URL of the website corresponding to the channel
    pub link: Option<Url>,
    /// Phrase or sentence describing the channel
    pub description: String,

    // === Optional Elements ===
    /// Language the channel is written in
    pub language: Option<String>,
    /// Copyright notice
    pub copyright: Option<String>,
    /// Email of the person responsible for editorial content (`managingEditor`)
    pub managing_editor_email: Option<String>,
    /// Email of the person responsible for technical issues (`webMaster`)
    pub web_master_email: Option<String>,
    /// Publication date of the channel content
    pub pub_date: Option<DateTime<FixedOffset>>,
    /// Last time the channel content changed
    pub last_build_date: Option<DateTime<FixedOffset>>,
    /// Program used to generate the channel
    pub generator: Option<String>,
    /// URL of the documentation for the RSS format (`docs`)
    pub docs_url: Option<Url>,
    /// Minutes the channel may be cached before refreshing (`ttl`)
    pub ttl: u32,

    // === Items ===
    /// Items in document order
    pub items: Vec<Item>,
}

impl Channel {
    /// Creates a new empty Channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Channel with the given title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Appends an item.
    pub fn append_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Returns the number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Iterates over the items in document order.
    pub fn iter_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Iterates over every `media:content` of every item.
    pub fn iter_media_contents(&self) -> impl Iterator<Item = &MediaContent> {
        self.items.iter().flat_map(|item| item.media_contents.iter())
    }

    /// Consumes the channel and returns its items.
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}
