//! Common types shared across feed objects.
//!
//! This module contains:
//! - Namespace URIs for RSS 2.0 extensions the decoder understands
//! - [`Size`] - A width/height geometry pair

use std::fmt;

// ============================================================================
// Namespaces
// ============================================================================

/// RSS version written by the serializer
pub const RSS_VERSION: &str = "2.0";

/// Media RSS namespace
pub const XMLNS_MEDIA: &str = "http://search.yahoo.com/mrss/";

/// RSS 1.0 content module namespace (`content:encoded`)
pub const XMLNS_CONTENT: &str = "http://purl.org/rss/1.0/modules/content/";

/// Dublin Core namespace (`dc:creator`)
pub const XMLNS_DC: &str = "http://purl.org/dc/elements/1.1/";

/// Well-Formed Web comment API namespace (`wfw:commentRss`)
pub const XMLNS_WFW: &str = "http://wellformedweb.org/CommentAPI/";

/// Slash namespace (`slash:comments`)
pub const XMLNS_SLASH: &str = "http://purl.org/rss/1.0/modules/slash/";

/// Canonical prefixes for every namespace URI the decoder dispatches on.
///
/// Some feeds omit the trailing slash of the Media RSS URI, so both forms
/// are listed.
pub const KNOWN_NAMESPACES: &[(&str, &str)] = &[
    (XMLNS_MEDIA, "media"),
    ("http://search.yahoo.com/mrss", "media"),
    (XMLNS_CONTENT, "content"),
    (XMLNS_DC, "dc"),
    (XMLNS_WFW, "wfw"),
    (XMLNS_SLASH, "slash"),
];

/// Returns the canonical prefix for a namespace URI, if it is one we know.
pub fn canonical_prefix(namespace: &str) -> Option<&'static str> {
    KNOWN_NAMESPACES
        .iter()
        .find(|(uri, _)| *uri == namespace)
        .map(|(_, prefix)| *prefix)
}

// ============================================================================
// Geometry
// ============================================================================

/// Width and height of a media object, in pixels.
///
/// Each dimension defaults to `0.0` independently when its attribute is
/// missing or unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Size {
    /// Creates a new Size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true if both dimensions are zero.
    pub fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
