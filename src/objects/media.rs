//! Media RSS attachments carried by an item.
//!
//! [`MediaContent`] and [`MediaThumbnail`] are built entirely from element
//! attributes. [`MediaCredit`] takes its role from an attribute and its value
//! from the element text.

use crate::objects::common::Size;
use url::Url;

/// Default value of the `expression` attribute on `media:content`.
pub const DEFAULT_EXPRESSION: &str = "full";

/// A single `media:content` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaContent {
    /// Direct URL to the media object (`url`)
    pub url: Option<Url>,
    /// Number of bytes of the media object (`fileSize`)
    pub file_size: u64,
    /// Standard MIME type of the object (`type`)
    pub mime_type: Option<String>,
    /// Type of object: image, audio, video, document or executable (`medium`).
    ///
    /// Stored verbatim; membership is not validated.
    pub medium: Option<String>,
    /// Whether this is the default object of its group (`isDefault`)
    pub is_default: bool,
    /// sample, full or nonstop (`expression`), `"full"` when absent
    pub expression: String,
    /// Kilobits per second (`bitrate`)
    pub bitrate: u32,
    /// Frames per second (`framerate`)
    pub framerate: u32,
    /// Samples per second, in kHz (`samplingrate`)
    pub sampling_rate: f64,
    /// Number of audio channels (`channels`)
    pub channels: u32,
    /// Play time in seconds (`duration`)
    pub duration: u64,
    /// Pixel dimensions (`width`, `height`)
    pub size: Size,
    /// RFC 3066 language code (`lang`)
    pub language: Option<String>,
}

impl MediaContent {
    /// Creates an empty MediaContent with the default expression.
    pub fn new() -> Self {
        Self {
            url: None,
            file_size: 0,
            mime_type: None,
            medium: None,
            is_default: false,
            expression: DEFAULT_EXPRESSION.to_string(),
            bitrate: 0,
            framerate: 0,
            sampling_rate: 0.0,
            channels: 0,
            duration: 0,
            size: Size::default(),
            language: None,
        }
    }

    /// Creates a MediaContent pointing at the given URL.
    pub fn with_url(url: Url) -> Self {
        Self {
            url: Some(url),
            ..Self::new()
        }
    }

    /// Returns true if the medium is `image`, or the MIME type is an image type.
    pub fn is_image(&self) -> bool {
        match self.medium.as_deref() {
            Some(medium) => medium.eq_ignore_ascii_case("image"),
            None => self
                .mime_type
                .as_deref()
                .is_some_and(|t| t.starts_with("image/")),
        }
    }
}

impl Default for MediaContent {
    fn default() -> Self {
        Self::new()
    }
}

/// A single `media:thumbnail` element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaThumbnail {
    /// URL of the thumbnail image (`url`)
    pub url: Option<Url>,
    /// Pixel dimensions (`width`, `height`)
    pub size: Size,
    /// Time offset in Normal Play Time, `H:M:S.h` or `S.h` (`time`).
    ///
    /// Kept as the raw string.
    pub time_offset: Option<String>,
}

impl MediaThumbnail {
    /// Creates an empty MediaThumbnail.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A single `media:credit` element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaCredit {
    /// Role the entity played (`role`)
    pub role: Option<String>,
    /// Name of the credited entity (element text)
    pub value: String,
}

impl MediaCredit {
    /// Creates a credit with an optional role and a value.
    pub fn new(role: Option<String>, value: impl Into<String>) -> Self {
        Self {
            role,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_content_defaults() {
        let content = MediaContent::new();
        assert_eq!(content.expression, "full");
        assert!(!content.is_default);
        assert_eq!(content.size, Size::default());
        assert_eq!(content, MediaContent::default());
    }

    #[test]
    fn test_media_content_is_image() {
        let mut content = MediaContent::new();
        assert!(!content.is_image());

        content.mime_type = Some("image/jpeg".to_string());
        assert!(content.is_image());

        content.medium = Some("video".to_string());
        assert!(!content.is_image());

        content.medium = Some("IMAGE".to_string());
        assert!(content.is_image());
    }
}
