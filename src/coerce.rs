//! Attribute and text coercion.
//!
//! Converts raw strings from the feed into typed field values. Every
//! conversion is total: a missing or unparseable value becomes the field's
//! default instead of an error.

use crate::objects::Size;
use chrono::{DateTime, FixedOffset};
use std::str::FromStr;
use url::Url;

/// Date pattern used by RSS 2.0 (`EEE, dd MMM yyyy HH:mm:ss Z`).
pub const RSS_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// The attributes of a start element, in document order.
///
/// Lookup is case-insensitive on the attribute name, so `samplingrate` and
/// `samplingRate` resolve to the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Creates an empty attribute list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Returns the value of the first attribute with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses the named attribute as an integer, `0` if absent or invalid.
    pub fn int<T: FromStr + Default>(&self, name: &str) -> T {
        parse_int(self.get(name))
    }

    /// Parses the named attribute as a float, `0.0` if absent or invalid.
    pub fn float(&self, name: &str) -> f64 {
        parse_float(self.get(name))
    }

    /// Parses the named attribute as a boolean.
    pub fn flag(&self, name: &str) -> bool {
        parse_bool(self.get(name))
    }

    /// Parses the named attribute as a URL.
    pub fn url(&self, name: &str) -> Option<Url> {
        parse_url(self.get(name))
    }

    /// Returns the named attribute as an owned string.
    pub fn string(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    /// Combines the `width` and `height` attributes into a [`Size`].
    pub fn size(&self) -> Size {
        parse_size(self.get("width"), self.get("height"))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parses a base-10 integer. Absent or invalid input yields `T::default()`.
pub fn parse_int<T: FromStr + Default>(value: Option<&str>) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_default()
}

/// Parses a decimal number. Absent or invalid input yields `0.0`.
pub fn parse_float(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Returns true only for a case-insensitive `"true"`.
pub fn parse_bool(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Combines independent width and height values into a [`Size`].
pub fn parse_size(width: Option<&str>, height: Option<&str>) -> Size {
    Size::new(parse_float(width), parse_float(height))
}

/// Parses an absolute URL. Anything that is not a valid URL yields `None`.
pub fn parse_url(value: Option<&str>) -> Option<Url> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    Url::parse(value).ok()
}

/// Parses an RSS date (`Sat, 07 Sep 2002 09:42:31 +0000`).
///
/// Dates using a zone name such as `GMT` are accepted through the RFC 2822
/// grammar, which the fixed pattern is a subset of.
pub fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    DateTime::parse_from_str(value, RSS_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .ok()
}

/// Formats a date with [`RSS_DATE_FORMAT`].
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format(RSS_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int::<u64>(Some("12345")), 12345);
        assert_eq!(parse_int::<u64>(Some(" 42 ")), 42);
        assert_eq!(parse_int::<u32>(Some("abc")), 0);
        assert_eq!(parse_int::<u32>(Some("12.5")), 0);
        assert_eq!(parse_int::<u32>(Some("-1")), 0);
        assert_eq!(parse_int::<u32>(None), 0);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float(Some("44.1")), 44.1);
        assert_eq!(parse_float(Some("48")), 48.0);
        assert_eq!(parse_float(Some("fast")), 0.0);
        assert_eq!(parse_float(Some("NaN")), 0.0);
        assert_eq!(parse_float(None), 0.0);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool(Some("true")));
        assert!(parse_bool(Some("TRUE")));
        assert!(parse_bool(Some("True")));
        assert!(!parse_bool(Some("1")));
        assert!(!parse_bool(Some("yes")));
        assert!(!parse_bool(Some(" true ")));
        assert!(!parse_bool(Some("false")));
        assert!(!parse_bool(None));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size(Some("640"), Some("480")), Size::new(640.0, 480.0));
        assert_eq!(parse_size(Some("640"), None), Size::new(640.0, 0.0));
        assert_eq!(parse_size(Some("wide"), Some("12.5")), Size::new(0.0, 12.5));
    }

    #[test]
    fn test_parse_url() {
        assert_eq!(
            parse_url(Some("http://example.com/a.mp3")).map(|u| u.to_string()),
            Some("http://example.com/a.mp3".to_string())
        );
        assert!(parse_url(Some("not a url")).is_none());
        assert!(parse_url(Some("/relative/path")).is_none());
        assert!(parse_url(Some("  ")).is_none());
        assert!(parse_url(None).is_none());
    }

    #[test]
    fn test_parse_date() {
        let expected = Utc.with_ymd_and_hms(2002, 9, 7, 9, 42, 31).unwrap();

        let date = parse_date("Sat, 07 Sep 2002 09:42:31 +0000").unwrap();
        assert_eq!(date, expected);

        let date = parse_date("Sat, 07 Sep 2002 09:42:31 GMT").unwrap();
        assert_eq!(date, expected);

        let date = parse_date("Sat, 07 Sep 2002 11:42:31 +0200").unwrap();
        assert_eq!(date, expected);
        assert_eq!(date.offset().local_minus_utc(), 7200);

        assert!(parse_date("2002-09-07T09:42:31Z").is_none());
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_format_date() {
        let date = parse_date("Sat, 07 Sep 2002 11:42:31 +0200").unwrap();
        assert_eq!(format_date(&date), "Sat, 07 Sep 2002 11:42:31 +0200");
    }

    #[test]
    fn test_attributes_lookup() {
        let attrs: Attributes = [
            ("url", "http://example.com/v.mp4"),
            ("samplingrate", "44.1"),
            ("isDefault", "true"),
            ("width", "320"),
        ]
        .into_iter()
        .collect();

        assert_eq!(attrs.len(), 4);
        assert_eq!(attrs.get("samplingRate"), Some("44.1"));
        assert_eq!(attrs.float("samplingRate"), 44.1);
        assert!(attrs.flag("isdefault"));
        assert_eq!(attrs.int::<u32>("bitrate"), 0);
        assert_eq!(attrs.size(), Size::new(320.0, 0.0));
        assert!(attrs.url("url").is_some());
        assert_eq!(attrs.string("missing"), None);
    }
}
