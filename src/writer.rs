//! RSS 2.0 writer for serializing a decoded [`Channel`] back to XML.
//!
//! Media RSS and the other extension namespaces the decoder understands are
//! declared on the root element, so the output reads back through
//! [`crate::reader::parse`] into an equal channel.
//!
//! # Example
//!
//! ```rust
//! use mediarss_rs::objects::{Channel, Item, MediaContent};
//! use mediarss_rs::writer::RssWriter;
//!
//! let mut channel = Channel::with_title("Photos");
//! channel.description = "Daily pictures".to_string();
//!
//! let mut item = Item::with_title("Sunrise");
//! let mut content = MediaContent::new();
//! content.medium = Some("image".to_string());
//! item.media_contents.push(content);
//! channel.append_item(item);
//!
//! let xml = RssWriter::new().write_to_string(&channel).unwrap();
//! assert!(xml.contains("<media:content"));
//! ```

use crate::coerce::format_date;
use crate::error::Result;
use crate::objects::{
    Channel, Item, MediaContent, MediaCredit, MediaThumbnail, Size, RSS_VERSION, XMLNS_CONTENT,
    XMLNS_DC, XMLNS_MEDIA, XMLNS_SLASH, XMLNS_WFW,
};
use chrono::{DateTime, FixedOffset};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{self, Write};
use url::Url;

/// Configuration options for the RSS writer.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Whether to indent the output for readability
    pub indent: bool,
    /// Indentation for one nesting level (default: two spaces)
    ///
    /// The output repeats the first character of this string once per
    /// character, so `"\t"` indents with a tab and `"    "` with four spaces.
    pub indent_string: String,
    /// Whether to include the XML declaration
    pub xml_declaration: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: true,
            indent_string: "  ".to_string(),
            xml_declaration: true,
        }
    }
}

impl WriterConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compact configuration (no indentation).
    pub fn compact() -> Self {
        Self {
            indent: false,
            indent_string: String::new(),
            xml_declaration: true,
        }
    }

    /// Sets whether to indent the output.
    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the indentation for one nesting level.
    pub fn with_indent_string(mut self, s: impl Into<String>) -> Self {
        self.indent_string = s.into();
        self
    }

    /// Sets whether to emit the `<?xml ...?>` declaration.
    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }
}

/// RSS 2.0 / Media RSS writer.
#[derive(Debug, Clone, Default)]
pub struct RssWriter {
    config: WriterConfig,
}

impl RssWriter {
    /// Creates a new writer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new writer with the specified configuration.
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Writes a channel to a string.
    pub fn write_to_string(&self, channel: &Channel) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(channel, &mut buffer)?;
        let xml = String::from_utf8(buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(xml)
    }

    /// Writes a channel to any `Write` implementation.
    pub fn write<W: Write>(&self, channel: &Channel, writer: W) -> Result<()> {
        let mut xml_writer = if self.config.indent {
            let (indent_char, indent_size) = indent_unit(&self.config.indent_string);
            Writer::new_with_indent(writer, indent_char, indent_size)
        } else {
            Writer::new(writer)
        };

        if self.config.xml_declaration {
            xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
            if self.config.indent {
                xml_writer.get_mut().write_all(b"\n")?;
            }
        }

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", RSS_VERSION));
        rss.push_attribute(("xmlns:media", XMLNS_MEDIA));
        rss.push_attribute(("xmlns:content", XMLNS_CONTENT));
        rss.push_attribute(("xmlns:dc", XMLNS_DC));
        rss.push_attribute(("xmlns:wfw", XMLNS_WFW));
        rss.push_attribute(("xmlns:slash", XMLNS_SLASH));
        xml_writer.write_event(Event::Start(rss))?;

        self.write_channel(&mut xml_writer, channel)?;

        xml_writer.write_event(Event::End(BytesEnd::new("rss")))?;
        Ok(())
    }

    fn write_channel<W: Write>(&self, writer: &mut Writer<W>, channel: &Channel) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        self.write_simple_element(writer, "title", &channel.title)?;
        self.write_url(writer, "link", channel.link.as_ref())?;
        self.write_simple_element(writer, "description", &channel.description)?;
        self.write_optional(writer, "language", channel.language.as_deref())?;
        self.write_optional(writer, "copyright", channel.copyright.as_deref())?;
        self.write_optional(
            writer,
            "managingEditor",
            channel.managing_editor_email.as_deref(),
        )?;
        self.write_optional(writer, "webMaster", channel.web_master_email.as_deref())?;
        self.write_date(writer, "pubDate", channel.pub_date.as_ref())?;
        self.write_date(writer, "lastBuildDate", channel.last_build_date.as_ref())?;
        self.write_optional(writer, "generator", channel.generator.as_deref())?;
        self.write_url(writer, "docs", channel.docs_url.as_ref())?;
        if channel.ttl > 0 {
            self.write_simple_element(writer, "ttl", &channel.ttl.to_string())?;
        }

        for item in &channel.items {
            self.write_item(writer, item)?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        Ok(())
    }

    fn write_item<W: Write>(&self, writer: &mut Writer<W>, item: &Item) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("item")))?;

        self.write_optional(writer, "title", item.title.as_deref())?;
        self.write_url(writer, "link", item.link.as_ref())?;
        self.write_optional(writer, "description", item.item_description.as_deref())?;
        self.write_optional(writer, "content:encoded", item.content.as_deref())?;
        self.write_optional(writer, "author", item.author.as_deref())?;
        self.write_url(writer, "comments", item.comments_link.as_ref())?;
        self.write_url(writer, "wfw:commentRss", item.comments_feed.as_ref())?;
        if item.comments_count > 0 {
            self.write_simple_element(
                writer,
                "slash:comments",
                &item.comments_count.to_string(),
            )?;
        }
        self.write_optional(writer, "guid", item.guid.as_deref())?;
        self.write_date(writer, "pubDate", item.pub_date.as_ref())?;

        self.write_optional(writer, "media:title", item.media_title.as_deref())?;
        self.write_optional(
            writer,
            "media:description",
            item.media_description.as_deref(),
        )?;
        self.write_optional(writer, "media:text", item.media_text.as_deref())?;

        for content in &item.media_contents {
            self.write_media_content(writer, content)?;
        }
        for thumbnail in &item.media_thumbnails {
            self.write_media_thumbnail(writer, thumbnail)?;
        }
        for credit in &item.media_credits {
            self.write_media_credit(writer, credit)?;
        }

        writer.write_event(Event::End(BytesEnd::new("item")))?;
        Ok(())
    }

    fn write_media_content<W: Write>(
        &self,
        writer: &mut Writer<W>,
        content: &MediaContent,
    ) -> Result<()> {
        let mut elem = BytesStart::new("media:content");
        if let Some(ref url) = content.url {
            elem.push_attribute(("url", url.as_str()));
        }
        if content.file_size > 0 {
            elem.push_attribute(("fileSize", content.file_size.to_string().as_str()));
        }
        if let Some(ref mime_type) = content.mime_type {
            elem.push_attribute(("type", mime_type.as_str()));
        }
        if let Some(ref medium) = content.medium {
            elem.push_attribute(("medium", medium.as_str()));
        }
        if content.is_default {
            elem.push_attribute(("isDefault", "true"));
        }
        elem.push_attribute(("expression", content.expression.as_str()));
        if content.bitrate > 0 {
            elem.push_attribute(("bitrate", content.bitrate.to_string().as_str()));
        }
        if content.framerate > 0 {
            elem.push_attribute(("framerate", content.framerate.to_string().as_str()));
        }
        if content.sampling_rate != 0.0 {
            elem.push_attribute(("samplingrate", content.sampling_rate.to_string().as_str()));
        }
        if content.channels > 0 {
            elem.push_attribute(("channels", content.channels.to_string().as_str()));
        }
        if content.duration > 0 {
            elem.push_attribute(("duration", content.duration.to_string().as_str()));
        }
        push_size(&mut elem, &content.size);
        if let Some(ref language) = content.language {
            elem.push_attribute(("lang", language.as_str()));
        }

        writer.write_event(Event::Empty(elem))?;
        Ok(())
    }

    fn write_media_thumbnail<W: Write>(
        &self,
        writer: &mut Writer<W>,
        thumbnail: &MediaThumbnail,
    ) -> Result<()> {
        let mut elem = BytesStart::new("media:thumbnail");
        if let Some(ref url) = thumbnail.url {
            elem.push_attribute(("url", url.as_str()));
        }
        push_size(&mut elem, &thumbnail.size);
        if let Some(ref time) = thumbnail.time_offset {
            elem.push_attribute(("time", time.as_str()));
        }

        writer.write_event(Event::Empty(elem))?;
        Ok(())
    }

    fn write_media_credit<W: Write>(
        &self,
        writer: &mut Writer<W>,
        credit: &MediaCredit,
    ) -> Result<()> {
        let mut elem = BytesStart::new("media:credit");
        if let Some(ref role) = credit.role {
            elem.push_attribute(("role", role.as_str()));
        }

        if credit.value.is_empty() {
            writer.write_event(Event::Empty(elem))?;
        } else {
            writer.write_event(Event::Start(elem))?;
            writer.write_event(Event::Text(BytesText::new(&credit.value)))?;
            writer.write_event(Event::End(BytesEnd::new("media:credit")))?;
        }
        Ok(())
    }

    fn write_optional<W: Write>(
        &self,
        writer: &mut Writer<W>,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        match value {
            Some(v) => self.write_simple_element(writer, name, v),
            None => Ok(()),
        }
    }

    fn write_url<W: Write>(
        &self,
        writer: &mut Writer<W>,
        name: &str,
        url: Option<&Url>,
    ) -> Result<()> {
        self.write_optional(writer, name, url.map(Url::as_str))
    }

    fn write_date<W: Write>(
        &self,
        writer: &mut Writer<W>,
        name: &str,
        date: Option<&DateTime<FixedOffset>>,
    ) -> Result<()> {
        match date {
            Some(d) => self.write_simple_element(writer, name, &format_date(d)),
            None => Ok(()),
        }
    }

    fn write_simple_element<W: Write>(
        &self,
        writer: &mut Writer<W>,
        name: &str,
        value: &str,
    ) -> Result<()> {
        // An empty start/end pair would pick up indentation as text
        if value.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new(name)))?;
            return Ok(());
        }
        writer.write_event(Event::Start(BytesStart::new(name)))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }
}

/// Splits an indentation string into the character and count quick-xml takes.
fn indent_unit(indent: &str) -> (u8, usize) {
    match indent.as_bytes().first() {
        Some(&c) => (c, indent.len()),
        None => (b' ', 0),
    }
}

fn push_size(elem: &mut BytesStart<'_>, size: &Size) {
    if size.width != 0.0 {
        elem.push_attribute(("width", size.width.to_string().as_str()));
    }
    if size.height != 0.0 {
        elem.push_attribute(("height", size.height.to_string().as_str()));
    }
}

/// Convenience function to write a channel to a string with default settings.
pub fn to_string(channel: &Channel) -> Result<String> {
    RssWriter::new().write_to_string(channel)
}

/// Convenience function to write a channel to a string without indentation.
pub fn to_string_compact(channel: &Channel) -> Result<String> {
    RssWriter::with_config(WriterConfig::compact()).write_to_string(channel)
}

/// Convenience function to write a channel to a writer.
pub fn write<W: Write>(channel: &Channel, writer: W) -> Result<()> {
    RssWriter::new().write(channel, writer)
}
