//! Feed reader entry points.
//!
//! Wires the [`XmlTokenizer`] to a [`ParseContext`] and returns the decoded
//! [`Channel`].
//!
//! # Example
//!
//! ```rust,no_run
//! use mediarss_rs::reader::parse;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = File::open("feed.xml").unwrap();
//! let channel = parse(BufReader::new(file)).unwrap();
//!
//! for item in channel.iter_items() {
//!     println!("{:?}: {} media", item.title, item.media_contents.len());
//! }
//! ```

use crate::context::{CancelHandle, ParseContext};
use crate::error::{Error, Result};
use crate::events::XmlTokenizer;
use crate::objects::{Channel, Item};
use std::io::BufRead;

/// Decodes an RSS document from a buffered reader.
pub fn parse<R: BufRead>(reader: R) -> Result<Channel> {
    // Nothing else holds this handle, so the decode always yields a result
    parse_cancellable(reader, &CancelHandle::new()).unwrap_or(Err(Error::EmptyDocument))
}

/// Decodes an RSS document held in memory.
pub fn parse_str(xml: &str) -> Result<Channel> {
    parse(xml.as_bytes())
}

/// Decodes an RSS document, stopping early if `cancel` is triggered.
///
/// Returns `None` when the decode was cancelled. Once cancelled, no further
/// bytes are read from `reader`.
pub fn parse_cancellable<R: BufRead>(reader: R, cancel: &CancelHandle) -> Option<Result<Channel>> {
    ParseContext::with_cancel_handle(cancel.clone()).decode(XmlTokenizer::from_reader(reader))
}

/// Decodes an RSS document and returns only its items.
///
/// This is the flat item list offered by older versions of the API; it runs
/// the same decoder as [`parse`] and discards the channel metadata.
#[deprecated(note = "use `parse` and read `Channel::items`")]
pub fn parse_items<R: BufRead>(reader: R) -> Result<Vec<Item>> {
    parse(reader).map(Channel::into_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SIMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Example Feed</title>
    <link>http://example.com/</link>
    <description>An example</description>
    <item>
      <title>First</title>
      <media:content url="http://example.com/1.jpg" medium="image" width="640" height="480"/>
    </item>
    <item>
      <title>Second</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_simple_feed() {
        let channel = parse(Cursor::new(SIMPLE_RSS)).unwrap();

        assert_eq!(channel.title, "Example Feed");
        assert_eq!(channel.description, "An example");
        assert_eq!(channel.item_count(), 2);
        assert_eq!(channel.items[0].media_contents.len(), 1);
        assert!(channel.items[0].media_contents[0].is_image());
        assert!(channel.items[1].media_contents.is_empty());
    }

    #[test]
    fn test_parse_str() {
        let channel = parse_str(SIMPLE_RSS).unwrap();
        assert_eq!(channel.items[1].title.as_deref(), Some("Second"));
    }

    #[test]
    #[allow(deprecated)]
    fn test_parse_items() {
        let items = parse_items(Cursor::new(SIMPLE_RSS)).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title.as_deref(), Some("First"));
    }

    #[test]
    fn test_parse_error_before_channel_end() {
        let xml = "<rss><channel><title>Broken</title><item></channel></rss>";
        assert!(matches!(parse_str(xml), Err(Error::Tokenizer(_))));
    }

    #[test]
    fn test_parse_no_channel() {
        assert!(matches!(parse_str("<rss version=\"2.0\"/>"), Err(Error::EmptyDocument)));
        assert!(matches!(parse_str(""), Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_parse_cancelled() {
        let cancel = CancelHandle::new();
        cancel.cancel();
        assert!(parse_cancellable(Cursor::new(SIMPLE_RSS), &cancel).is_none());
    }
}
