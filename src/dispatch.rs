//! Element dispatch table.
//!
//! Maps a logical element name, at a given nesting level, to the field it
//! writes when the element closes. Names are compared case-insensitively and
//! carry their canonical namespace prefix (`media:`, `content:`, `dc:`,
//! `wfw:`, `slash:`).

use crate::coerce::{parse_date, parse_int, parse_url};
use crate::objects::{Channel, Item};

/// The entity whose fields an end element may write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Inside the channel, outside any item
    Channel,
    /// Inside an item
    Item,
}

/// How the accumulated text of an element is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Trimmed string
    Text,
    /// String kept verbatim, internal and surrounding whitespace included
    PreservedText,
    /// Absolute URL, absent when invalid
    Url,
    /// Base-10 integer, `0` when invalid
    Integer,
    /// RSS date, absent when invalid
    Date,
}

/// Every field the decoder writes from element text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `channel/title`
    ChannelTitle,
    /// `channel/link`
    ChannelLink,
    /// `channel/description`
    ChannelDescription,
    /// `channel/language`
    ChannelLanguage,
    /// `channel/copyright`
    ChannelCopyright,
    /// `channel/managingEditor`
    ChannelManagingEditor,
    /// `channel/webMaster`
    ChannelWebMaster,
    /// `channel/pubDate`
    ChannelPubDate,
    /// `channel/lastBuildDate`
    ChannelLastBuildDate,
    /// `channel/generator`
    ChannelGenerator,
    /// `channel/docs`
    ChannelDocs,
    /// `channel/ttl`
    ChannelTtl,
    /// `item/title`
    ItemTitle,
    /// `item/link`
    ItemLink,
    /// `item/description`
    ItemDescription,
    /// `item/content:encoded` or `item/content`
    ItemContent,
    /// `item/author` or `item/dc:creator`
    ItemAuthor,
    /// `item/comments`
    ItemCommentsLink,
    /// `item/wfw:commentRss`
    ItemCommentsFeed,
    /// `item/slash:comments`
    ItemCommentsCount,
    /// `item/guid`
    ItemGuid,
    /// `item/pubDate`
    ItemPubDate,
    /// `media:title` anywhere in an item
    MediaTitle,
    /// `media:description` anywhere in an item
    MediaDescription,
    /// `media:text` anywhere in an item
    MediaText,
}

const CHANNEL_FIELDS: &[(&str, Field)] = &[
    ("title", Field::ChannelTitle),
    ("link", Field::ChannelLink),
    ("description", Field::ChannelDescription),
    ("language", Field::ChannelLanguage),
    ("copyright", Field::ChannelCopyright),
    ("managingeditor", Field::ChannelManagingEditor),
    ("webmaster", Field::ChannelWebMaster),
    ("pubdate", Field::ChannelPubDate),
    ("lastbuilddate", Field::ChannelLastBuildDate),
    ("generator", Field::ChannelGenerator),
    ("docs", Field::ChannelDocs),
    ("ttl", Field::ChannelTtl),
];

const ITEM_FIELDS: &[(&str, Field)] = &[
    ("title", Field::ItemTitle),
    ("link", Field::ItemLink),
    ("description", Field::ItemDescription),
    ("content", Field::ItemContent),
    ("content:encoded", Field::ItemContent),
    ("author", Field::ItemAuthor),
    ("dc:creator", Field::ItemAuthor),
    ("comments", Field::ItemCommentsLink),
    ("wfw:commentrss", Field::ItemCommentsFeed),
    ("slash:comments", Field::ItemCommentsCount),
    ("guid", Field::ItemGuid),
    ("pubdate", Field::ItemPubDate),
    ("media:title", Field::MediaTitle),
    ("media:description", Field::MediaDescription),
    ("media:text", Field::MediaText),
];

/// Looks up the field written by the element `name` at `level`.
///
/// Unknown names return `None` and are ignored by the decoder.
pub fn lookup(level: Level, name: &str) -> Option<Field> {
    let table = match level {
        Level::Channel => CHANNEL_FIELDS,
        Level::Item => ITEM_FIELDS,
    };
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, field)| *field)
}

/// Returns true for elements that may appear at any depth inside an item.
///
/// Media RSS wraps these in `media:group` or `media:content`; plain RSS
/// fields only count as direct children of their entity.
pub fn is_media_element(name: &str) -> bool {
    name.len() > 6
        && name
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("media:"))
}

impl Field {
    /// Returns the level this field belongs to.
    pub fn level(&self) -> Level {
        match self {
            Field::ChannelTitle
            | Field::ChannelLink
            | Field::ChannelDescription
            | Field::ChannelLanguage
            | Field::ChannelCopyright
            | Field::ChannelManagingEditor
            | Field::ChannelWebMaster
            | Field::ChannelPubDate
            | Field::ChannelLastBuildDate
            | Field::ChannelGenerator
            | Field::ChannelDocs
            | Field::ChannelTtl => Level::Channel,
            _ => Level::Item,
        }
    }

    /// Returns how this field converts its element text.
    pub fn kind(&self) -> ValueKind {
        match self {
            Field::ChannelDescription
            | Field::ItemDescription
            | Field::ItemContent
            | Field::MediaDescription
            | Field::MediaText => ValueKind::PreservedText,
            Field::ChannelLink
            | Field::ChannelDocs
            | Field::ItemLink
            | Field::ItemCommentsLink
            | Field::ItemCommentsFeed => ValueKind::Url,
            Field::ChannelTtl | Field::ItemCommentsCount => ValueKind::Integer,
            Field::ChannelPubDate | Field::ChannelLastBuildDate | Field::ItemPubDate => {
                ValueKind::Date
            }
            _ => ValueKind::Text,
        }
    }

    /// Trims `text` unless this field preserves whitespace.
    pub fn normalize<'a>(&self, text: &'a str) -> &'a str {
        match self.kind() {
            ValueKind::PreservedText => text,
            _ => text.trim(),
        }
    }

    /// Writes `text` into the channel. Item fields are ignored.
    pub fn apply_to_channel(&self, channel: &mut Channel, text: &str) {
        let text = self.normalize(text);
        match self {
            Field::ChannelTitle => channel.title = text.to_string(),
            Field::ChannelLink => channel.link = parse_url(Some(text)),
            Field::ChannelDescription => channel.description = text.to_string(),
            Field::ChannelLanguage => channel.language = Some(text.to_string()),
            Field::ChannelCopyright => channel.copyright = Some(text.to_string()),
            Field::ChannelManagingEditor => {
                channel.managing_editor_email = Some(text.to_string())
            }
            Field::ChannelWebMaster => channel.web_master_email = Some(text.to_string()),
            Field::ChannelPubDate => channel.pub_date = decode_date(text),
            Field::ChannelLastBuildDate => channel.last_build_date = decode_date(text),
            Field::ChannelGenerator => channel.generator = Some(text.to_string()),
            Field::ChannelDocs => channel.docs_url = parse_url(Some(text)),
            Field::ChannelTtl => channel.ttl = parse_int(Some(text)),
            _ => {}
        }
    }

    /// Writes `text` into the item. Channel fields are ignored.
    pub fn apply_to_item(&self, item: &mut Item, text: &str) {
        let text = self.normalize(text);
        match self {
            Field::ItemTitle => item.title = Some(text.to_string()),
            Field::ItemLink => item.link = parse_url(Some(text)),
            Field::ItemDescription => item.item_description = Some(text.to_string()),
            Field::ItemContent => item.content = Some(text.to_string()),
            Field::ItemAuthor => item.author = Some(text.to_string()),
            Field::ItemCommentsLink => item.comments_link = parse_url(Some(text)),
            Field::ItemCommentsFeed => item.comments_feed = parse_url(Some(text)),
            Field::ItemCommentsCount => item.comments_count = parse_int(Some(text)),
            Field::ItemGuid => item.guid = Some(text.to_string()),
            Field::ItemPubDate => item.pub_date = decode_date(text),
            Field::MediaTitle => item.media_title = Some(text.to_string()),
            Field::MediaDescription => item.media_description = Some(text.to_string()),
            Field::MediaText => item.media_text = Some(text.to_string()),
            _ => {}
        }
    }
}

fn decode_date(text: &str) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    let date = parse_date(text);
    if date.is_none() && !text.is_empty() {
        tracing::debug!(value = text, "Ignoring unparseable date");
    }
    date
}
