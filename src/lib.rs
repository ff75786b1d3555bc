//! Streaming RSS 2.0 and Media RSS decoder for Rust.
//!
//! This crate turns an RSS 2.0 feed, optionally carrying the Media RSS
//! extension, into a typed [`Channel`] holding its [`Item`]s and their media
//! attachments.
//!
//! # Features
//!
//! - **Core Types**: channel, item, `media:content`, `media:thumbnail` and
//!   `media:credit` records.
//! - **Streaming Decoder**: a single-pass state machine over a token stream,
//!   with cooperative cancellation.
//! - **Writer**: serialize a channel back to RSS 2.0 XML.
//! - **Serde Support**: serialization of every record with the `serde` feature.
//! - **Fetching**: blocking HTTP fetch-and-parse with the `fetch` feature.
//!
//! # Quick Start
//!
//! ```rust
//! use mediarss_rs::parse_str;
//!
//! let xml = r#"<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
//!   <channel>
//!     <title>Photos</title>
//!     <item>
//!       <title>Sunrise</title>
//!       <media:content url="http://example.com/sunrise.jpg" medium="image"/>
//!     </item>
//!   </channel>
//! </rss>"#;
//!
//! let channel = parse_str(xml).unwrap();
//! assert_eq!(channel.items.len(), 1);
//! assert!(channel.items[0].media_contents[0].is_image());
//! ```
//!
//! # Cancellation
//!
//! ```rust
//! use mediarss_rs::{parse_cancellable, CancelHandle};
//!
//! let cancel = CancelHandle::new();
//! cancel.cancel();
//!
//! let result = parse_cancellable("<rss><channel/></rss>".as_bytes(), &cancel);
//! assert!(result.is_none());
//! ```
//!
//! # Module Structure
//!
//! - [`objects`] - Feed data structures
//! - [`events`] - Token model and the XML tokenizer
//! - [`context`] - Decode state machine
//! - [`dispatch`] - Element name to field mapping
//! - [`coerce`] - Attribute and text conversions
//! - [`reader`] - Parse entry points
//! - [`writer`] - RSS serializer
//! - [`images`] - Image URL extraction
//! - [`error`] - Error types
//!
//! # Optional Features
//!
//! - `serde` (default) - Enable serde serialization/deserialization support
//! - `fetch` - Blocking HTTP client for fetching feeds
//! - `cli` - Build the `rss_items` command line tool

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod coerce;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod events;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod images;
pub mod objects;
pub mod reader;
pub mod writer;

// Re-export commonly used types at the crate root
pub use context::{CancelHandle, ParseContext};
pub use error::{Error, Result};
pub use events::{Token, TokenizerError, XmlTokenizer};
pub use images::images_from_html;
pub use objects::{Channel, Item, MediaContent, MediaCredit, MediaThumbnail, Size};
#[allow(deprecated)]
pub use reader::parse_items;
pub use reader::{parse, parse_cancellable, parse_str};
pub use writer::RssWriter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
