//! Parse context: the decode state machine.
//!
//! A [`ParseContext`] consumes [`Token`]s in delivery order and builds the
//! [`Channel`] graph. It owns the graph under construction and the text
//! buffer until the document ends, then hands the channel to the caller.
//!
//! One context decodes exactly one document. It is not reused and not shared
//! between concurrent decodes.
//!
//! # Example
//!
//! ```rust
//! use mediarss_rs::context::ParseContext;
//! use mediarss_rs::events::Token;
//!
//! let tokens = vec![
//!     Token::start("rss"),
//!     Token::start("channel"),
//!     Token::start("item"),
//!     Token::start("title"),
//!     Token::text("Hello"),
//!     Token::end("title"),
//!     Token::end("item"),
//!     Token::end("channel"),
//!     Token::end("rss"),
//!     Token::EndDocument,
//! ];
//!
//! let channel = ParseContext::new().decode(tokens).unwrap().unwrap();
//! assert_eq!(channel.items[0].title.as_deref(), Some("Hello"));
//! ```

use crate::coerce::Attributes;
use crate::dispatch::{is_media_element, lookup, Level};
use crate::error::{Error, Result};
use crate::events::Token;
use crate::objects::{Channel, Item, MediaContent, MediaCredit, MediaThumbnail, DEFAULT_EXPRESSION};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable flag that aborts an in-flight decode.
///
/// Cancelling stops the decoder from pulling further tokens and discards the
/// partial graph; neither a channel nor an error is produced. Cancelling after
/// the decode has finished has no effect.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Creates a handle that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of feeding one token to a [`ParseContext`].
#[derive(Debug)]
pub enum Step {
    /// More tokens are needed
    Continue,
    /// The document ended or the tokenizer failed
    Finished(Result<Channel>),
}

/// Decode state for one document.
///
/// Nesting is tracked with depth counters: the element depth of the open
/// channel and item, and of a `media:credit` awaiting its text.
#[derive(Debug, Default)]
pub struct ParseContext {
    /// The channel being built; only the first `channel` element counts
    channel: Option<Channel>,
    /// The item being built
    item: Option<Item>,
    /// Characters seen since the last start element
    text: String,
    /// Number of currently open elements
    depth: usize,
    /// Depth of the open channel element
    channel_depth: Option<usize>,
    /// Depth of the open item element
    item_depth: Option<usize>,
    /// Index into the item's credits and depth of an open `media:credit`
    pending_credit: Option<(usize, usize)>,
    /// Open elements inside an ignored channel
    skip_depth: usize,
    cancel: CancelHandle,
    finished: bool,
}

impl ParseContext {
    /// Creates a fresh context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context that observes an existing cancel handle.
    pub fn with_cancel_handle(cancel: CancelHandle) -> Self {
        Self {
            cancel,
            ..Self::default()
        }
    }

    /// Returns a handle that cancels this decode.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Decodes a whole token stream.
    ///
    /// Returns `None` if the decode was cancelled; otherwise exactly one of
    /// the channel or the error. A stream that runs out without a terminal
    /// token is finished as if `EndDocument` had been seen.
    pub fn decode<I>(mut self, tokens: I) -> Option<Result<Channel>>
    where
        I: IntoIterator<Item = Token>,
    {
        for token in tokens {
            if self.cancel.is_cancelled() {
                tracing::debug!(depth = self.depth, "Decode cancelled");
                return None;
            }
            if let Step::Finished(result) = self.handle(token) {
                return Some(result);
            }
        }

        if self.cancel.is_cancelled() {
            tracing::debug!("Decode cancelled");
            return None;
        }
        Some(self.finish())
    }

    /// Feeds one token.
    ///
    /// Tokens delivered after the context has finished are ignored.
    pub fn handle(&mut self, token: Token) -> Step {
        if self.finished {
            return Step::Continue;
        }

        match token {
            Token::StartElement { name, attributes } => self.start_element(&name, &attributes),
            Token::Characters(text) => {
                if self.skip_depth == 0 {
                    self.text.push_str(&text);
                }
            }
            Token::EndElement { name } => self.end_element(&name),
            Token::EndDocument => return Step::Finished(self.finish()),
            Token::Error(err) => {
                tracing::debug!(error = %err, "Tokenizer reported an error");
                self.finished = true;
                self.channel = None;
                self.item = None;
                return Step::Finished(Err(Error::Tokenizer(err)));
            }
        }

        Step::Continue
    }

    /// Returns the channel, or [`Error::EmptyDocument`] if none was seen.
    fn finish(&mut self) -> Result<Channel> {
        self.finished = true;
        if let Some(item) = self.item.take() {
            tracing::debug!(title = ?item.title, "Discarding unclosed item");
        }
        match self.channel.take() {
            Some(channel) => {
                tracing::debug!(items = channel.items.len(), "Decoded channel");
                Ok(channel)
            }
            None => Err(Error::EmptyDocument),
        }
    }

    fn start_element(&mut self, name: &str, attrs: &Attributes) {
        if self.skip_depth > 0 {
            self.skip_depth += 1;
            return;
        }

        self.text.clear();
        self.depth += 1;

        if name.eq_ignore_ascii_case("channel") {
            if self.channel.is_none() {
                self.channel = Some(Channel::new());
                self.channel_depth = Some(self.depth);
            } else {
                tracing::debug!("Ignoring additional channel element");
                self.depth -= 1;
                self.skip_depth = 1;
            }
            return;
        }

        if self.channel_depth.is_none() {
            return;
        }

        if name.eq_ignore_ascii_case("item") {
            if self.item.is_none() {
                self.item = Some(Item::new());
                self.item_depth = Some(self.depth);
            }
            return;
        }

        let Some(item) = self.item.as_mut() else {
            return;
        };

        if name.eq_ignore_ascii_case("media:content") {
            item.media_contents.push(media_content_from(attrs));
        } else if name.eq_ignore_ascii_case("media:thumbnail") {
            item.media_thumbnails.push(media_thumbnail_from(attrs));
        } else if name.eq_ignore_ascii_case("media:credit") {
            item.media_credits
                .push(MediaCredit::new(attrs.string("role"), String::new()));
            self.pending_credit = Some((item.media_credits.len() - 1, self.depth));
        }
    }

    fn end_element(&mut self, name: &str) {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return;
        }

        let depth = self.depth;
        self.depth = self.depth.saturating_sub(1);

        if let Some(item_depth) = self.item_depth {
            if depth == item_depth {
                self.close_item();
                return;
            }
            self.apply_item_field(name, depth, item_depth);
            return;
        }

        if let Some(channel_depth) = self.channel_depth {
            if depth == channel_depth {
                // The channel stays as the result until the document ends
                self.channel_depth = None;
                return;
            }
            if depth == channel_depth + 1 {
                if let (Some(field), Some(channel)) =
                    (lookup(Level::Channel, name), self.channel.as_mut())
                {
                    field.apply_to_channel(channel, &self.text);
                }
            }
        }
    }

    fn apply_item_field(&mut self, name: &str, depth: usize, item_depth: usize) {
        let Some(item) = self.item.as_mut() else {
            return;
        };

        if let Some((index, credit_depth)) = self.pending_credit {
            if depth == credit_depth {
                if let Some(credit) = item.media_credits.get_mut(index) {
                    credit.value = self.text.trim().to_string();
                }
                self.pending_credit = None;
                return;
            }
        }

        if depth != item_depth + 1 && !is_media_element(name) {
            return;
        }
        if let Some(field) = lookup(Level::Item, name) {
            field.apply_to_item(item, &self.text);
        }
    }

    fn close_item(&mut self) {
        self.item_depth = None;
        self.pending_credit = None;
        if let (Some(item), Some(channel)) = (self.item.take(), self.channel.as_mut()) {
            tracing::trace!(
                index = channel.items.len(),
                media = item.media_contents.len(),
                "Decoded item"
            );
            channel.append_item(item);
        }
    }
}

/// Builds a `media:content` record from its attributes.
fn media_content_from(attrs: &Attributes) -> MediaContent {
    MediaContent {
        url: attrs.url("url"),
        file_size: attrs.int("fileSize"),
        mime_type: attrs.string("type"),
        medium: attrs.string("medium"),
        is_default: attrs.flag("isDefault"),
        expression: attrs
            .string("expression")
            .unwrap_or_else(|| DEFAULT_EXPRESSION.to_string()),
        bitrate: attrs.int("bitrate"),
        framerate: attrs.int("framerate"),
        sampling_rate: attrs.float("samplingrate"),
        channels: attrs.int("channels"),
        duration: attrs.int("duration"),
        size: attrs.size(),
        language: attrs.string("lang"),
    }
}

/// Builds a `media:thumbnail` record from its attributes.
fn media_thumbnail_from(attrs: &Attributes) -> MediaThumbnail {
    MediaThumbnail {
        url: attrs.url("url"),
        size: attrs.size(),
        time_offset: attrs.string("time"),
    }
}
