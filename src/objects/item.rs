//! Item - a single entry of an RSS channel.
//!
//! An item carries the RSS 2.0 fields of a story or post, plus the Media RSS
//! attachments found inside it.

use crate::images::images_from_html;
use crate::objects::media::{MediaContent, MediaCredit, MediaThumbnail};
use chrono::{DateTime, FixedOffset};
use url::Url;

/// Represents an `item` element.
///
/// No field is required. An item without a title or description is still
/// decoded, with those fields left empty.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    // === RSS 2.0 ===
    /// Title of the item
    pub title: Option<String>,
    /// URL of the item
    pub link: Option<Url>,
    /// Item synopsis (`description`), whitespace preserved
    pub item_description: Option<String>,
    /// Full content (`content:encoded`), whitespace preserved
    pub content: Option<String>,
    /// Author email or name (`author`, `dc:creator`)
    pub author: Option<String>,
    /// URL of the comments page (`comments`)
    pub comments_link: Option<Url>,
    /// URL of the comments feed (`wfw:commentRss`)
    pub comments_feed: Option<Url>,
    /// Number of comments (`slash:comments`)
    pub comments_count: u64,
    /// Unique identifier (`guid`)
    pub guid: Option<String>,
    /// Publication date
    pub pub_date: Option<DateTime<FixedOffset>>,

    // === Media RSS ===
    /// `media:title`
    pub media_title: Option<String>,
    /// `media:description`
    pub media_description: Option<String>,
    /// `media:text`, whitespace preserved
    pub media_text: Option<String>,
    /// `media:content` elements in document order
    pub media_contents: Vec<MediaContent>,
    /// `media:thumbnail` elements in document order
    pub media_thumbnails: Vec<MediaThumbnail>,
    /// `media:credit` elements in document order
    pub media_credits: Vec<MediaCredit>,
}

impl Item {
    /// Creates a new empty Item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an Item with the given title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Returns the content flagged `isDefault`, or the first content if none is.
    pub fn default_media_content(&self) -> Option<&MediaContent> {
        self.media_contents
            .iter()
            .find(|c| c.is_default)
            .or_else(|| self.media_contents.first())
    }

    /// Returns true if the item carries any Media RSS attachment.
    pub fn has_media(&self) -> bool {
        !self.media_contents.is_empty()
            || !self.media_thumbnails.is_empty()
            || !self.media_credits.is_empty()
    }

    /// Image URLs found in the item description.
    pub fn images_from_item_description(&self) -> Vec<String> {
        self.item_description
            .as_deref()
            .map(images_from_html)
            .unwrap_or_default()
    }

    /// Image URLs found in the item content.
    pub fn images_from_content(&self) -> Vec<String> {
        self.content
            .as_deref()
            .map(images_from_html)
            .unwrap_or_default()
    }

    /// Image URLs found in `media:text`.
    pub fn images_from_media_text(&self) -> Vec<String> {
        self.media_text
            .as_deref()
            .map(images_from_html)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_media_content() {
        let mut item = Item::with_title("clip");
        assert!(item.default_media_content().is_none());
        assert!(!item.has_media());

        let first = MediaContent::with_url(Url::parse("http://example.com/a.mp4").unwrap());
        let mut second = MediaContent::with_url(Url::parse("http://example.com/b.mp4").unwrap());
        item.media_contents.push(first.clone());
        assert_eq!(item.default_media_content(), Some(&first));

        second.is_default = true;
        item.media_contents.push(second.clone());
        assert_eq!(item.default_media_content(), Some(&second));
        assert!(item.has_media());
    }

    #[test]
    fn test_images_from_fields() {
        let mut item = Item::new();
        assert!(item.images_from_item_description().is_empty());

        item.item_description = Some(r#"<img src="http://a.com/x.png">"#.to_string());
        item.content = Some("see https://b.com/y.gif".to_string());
        item.media_text = Some("no images here".to_string());

        assert_eq!(item.images_from_item_description(), vec!["http://a.com/x.png\">"]);
        assert_eq!(item.images_from_content(), vec!["https://b.com/y.gif"]);
        assert!(item.images_from_media_text().is_empty());
    }
}
