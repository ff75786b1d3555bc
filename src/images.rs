//! Image URL extraction from HTML or plain text.
//!
//! The scan is a plain pattern match, not an HTML parse. A match starts at
//! `http`, runs over non-whitespace characters to a `png`, `jpg`, `jpeg` or
//! `gif` occurrence, and keeps any non-whitespace that directly follows.
//! Because of that, a closing quote or punctuation stuck to the URL is
//! captured too: `src="http://a.com/x.png"` yields `http://a.com/x.png"`.

use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?\S+(?:png|jpg|jpeg|gif)\S*").expect("image URL pattern is valid")
});

/// Returns every image URL in `html`, in order of appearance.
///
/// Matching is case-sensitive and duplicates are kept.
///
/// # Example
///
/// ```rust
/// use mediarss_rs::images::images_from_html;
///
/// let images = images_from_html("see http://a.com/x.png and http://b.com/y.jpg!");
/// assert_eq!(images, vec!["http://a.com/x.png", "http://b.com/y.jpg!"]);
/// ```
pub fn images_from_html(html: &str) -> Vec<String> {
    IMAGE_URL
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect()
}
