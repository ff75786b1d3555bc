//! Tokenizer events.
//!
//! The decoder consumes a linear stream of [`Token`]s. Any source can produce
//! them; [`XmlTokenizer`] is the production source, built on `quick-xml`'s
//! namespace-aware reader.
//!
//! # Example
//!
//! ```rust
//! use mediarss_rs::events::{Token, XmlTokenizer};
//!
//! let xml = r#"<rss xmlns:m="http://search.yahoo.com/mrss/"><m:title>Hi</m:title></rss>"#;
//! let tokens: Vec<Token> = XmlTokenizer::from_str(xml).collect();
//!
//! // Whatever prefix the feed binds, Media RSS elements come out as `media:`
//! assert!(tokens.iter().any(|t| matches!(t, Token::StartElement { name, .. } if name == "media:title")));
//! assert_eq!(tokens.last(), Some(&Token::EndDocument));
//! ```

use crate::coerce::Attributes;
use crate::objects::canonical_prefix;
use quick_xml::encoding::Decoder;
use quick_xml::events::BytesStart;
use quick_xml::events::Event as XmlEvent;
use quick_xml::name::{Namespace, QName, ResolveResult};
use quick_xml::NsReader;
use std::fmt;
use std::io::BufRead;
use std::str;

/// A failure reported by the tokenizer.
///
/// Carries the tokenizer's diagnostic and, when known, the byte offset in the
/// input where it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerError {
    /// Description of the failure
    pub message: String,
    /// Byte offset of the failure in the input
    pub position: Option<u64>,
}

impl TokenizerError {
    /// Creates an error without position information.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    /// Creates an error at a byte offset.
    pub fn at(message: impl Into<String>, position: u64) -> Self {
        Self {
            message: message.into(),
            position: Some(position),
        }
    }
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{} (at byte {})", self.message, pos),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for TokenizerError {}

/// One event of the tokenizer stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An element opened
    StartElement {
        /// Logical element name, e.g. `item` or `media:content`
        name: String,
        /// Attributes in document order
        attributes: Attributes,
    },
    /// Character data, already entity-decoded
    Characters(String),
    /// An element closed
    EndElement {
        /// Logical element name
        name: String,
    },
    /// The document ended cleanly
    EndDocument,
    /// The tokenizer failed; no further tokens follow
    Error(TokenizerError),
}

impl Token {
    /// Creates a start token without attributes.
    pub fn start(name: impl Into<String>) -> Self {
        Token::StartElement {
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    /// Creates a start token with attributes.
    pub fn start_with(name: impl Into<String>, attributes: Attributes) -> Self {
        Token::StartElement {
            name: name.into(),
            attributes,
        }
    }

    /// Creates a character data token.
    pub fn text(text: impl Into<String>) -> Self {
        Token::Characters(text.into())
    }

    /// Creates an end token.
    pub fn end(name: impl Into<String>) -> Self {
        Token::EndElement { name: name.into() }
    }

    /// Returns true for `EndDocument` and `Error`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Token::EndDocument | Token::Error(_))
    }
}

/// Produces [`Token`]s from XML bytes.
///
/// - Text is decoded with the encoding named by the XML declaration
///   (UTF-8 when there is none), so Latin-1 and windows-1252 feeds read as
///   ordinary strings.
/// - Entities are unescaped and CDATA is passed through as characters.
/// - Empty elements (`<media:content url="..."/>`) yield a start and an end.
/// - Elements bound to a known extension namespace are renamed to the
///   canonical prefix, so `<m:content>` under the Media RSS URI becomes
///   `media:content`. Unbound prefixes keep their raw qualified name.
/// - A document that ends with open elements yields an [`Token::Error`].
///
/// The stream ends after the first terminal token.
pub struct XmlTokenizer<R: BufRead> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    depth: usize,
    done: bool,
}

impl<R: BufRead> XmlTokenizer<R> {
    /// Creates a tokenizer over a buffered reader.
    pub fn from_reader(reader: R) -> Self {
        let mut xml_reader = NsReader::from_reader(reader);
        let config = xml_reader.config_mut();
        config.trim_text(false);
        config.expand_empty_elements = true;

        Self {
            reader: xml_reader,
            buf: Vec::with_capacity(4096),
            depth: 0,
            done: false,
        }
    }

    /// Reads the next token.
    fn next_token(&mut self) -> Token {
        loop {
            self.buf.clear();
            // Tracks the encoding named by the XML declaration once it is read
            let decoder = self.reader.decoder();

            // Extract owned data before touching `self` again
            let raw = match self.reader.read_resolved_event_into(&mut self.buf) {
                Ok((ns, XmlEvent::Start(ref e))) => {
                    match logical_name(&ns, e.name(), decoder).and_then(|name| {
                        let attributes = extract_attrs(e, decoder)?;
                        Ok(Token::StartElement { name, attributes })
                    }) {
                        Ok(token) => Raw::Token(token),
                        Err(message) => Raw::Undecodable(message),
                    }
                }
                Ok((ns, XmlEvent::End(ref e))) => match logical_name(&ns, e.name(), decoder) {
                    Ok(name) => Raw::Token(Token::EndElement { name }),
                    Err(message) => Raw::Undecodable(message),
                },
                Ok((_, XmlEvent::Text(ref e))) => match e.unescape() {
                    Ok(text) => Raw::Token(Token::Characters(text.into_owned())),
                    Err(err) => Raw::Undecodable(err.to_string()),
                },
                Ok((_, XmlEvent::CData(ref e))) => match decoder.decode(e.as_ref()) {
                    Ok(text) => Raw::Token(Token::Characters(text.into_owned())),
                    Err(err) => Raw::Undecodable(err.to_string()),
                },
                Ok((_, XmlEvent::Eof)) => Raw::Eof,
                Ok(_) => Raw::Skip,
                Err(err) => Raw::Malformed(err.to_string()),
            };

            match raw {
                Raw::Token(token) => {
                    match token {
                        Token::StartElement { .. } => self.depth += 1,
                        Token::EndElement { .. } => self.depth = self.depth.saturating_sub(1),
                        _ => {}
                    }
                    return token;
                }
                Raw::Eof => return self.end_of_input(),
                Raw::Malformed(message) => {
                    let position = self.reader.error_position() as u64;
                    return Token::Error(TokenizerError::at(message, position));
                }
                Raw::Undecodable(message) => {
                    let position = self.reader.buffer_position() as u64;
                    return Token::Error(TokenizerError::at(message, position));
                }
                Raw::Skip => {}
            }
        }
    }

    fn end_of_input(&self) -> Token {
        if self.depth == 0 {
            return Token::EndDocument;
        }
        Token::Error(TokenizerError::at(
            format!(
                "Unexpected end of document: {} element(s) not closed",
                self.depth
            ),
            self.reader.buffer_position() as u64,
        ))
    }
}

impl<'a> XmlTokenizer<&'a [u8]> {
    /// Creates a tokenizer over an in-memory string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(xml: &'a str) -> Self {
        Self::from_reader(xml.as_bytes())
    }
}

impl<R: BufRead> Iterator for XmlTokenizer<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let token = self.next_token();
        if token.is_terminal() {
            self.done = true;
        }
        Some(token)
    }
}

/// Outcome of a single read from the underlying reader.
enum Raw {
    Token(Token),
    Eof,
    /// The reader rejected the markup
    Malformed(String),
    /// Well-formed markup whose bytes or entities could not be decoded
    Undecodable(String),
    Skip,
}

/// Builds the logical name of an element from its resolved namespace.
fn logical_name(
    ns: &ResolveResult<'_>,
    qname: QName<'_>,
    decoder: Decoder,
) -> Result<String, String> {
    let local_name = qname.local_name();
    let local = decoder
        .decode(local_name.as_ref())
        .map_err(|e| e.to_string())?;

    if let ResolveResult::Bound(Namespace(uri)) = ns {
        let prefix = str::from_utf8(uri).ok().and_then(canonical_prefix);
        if let Some(prefix) = prefix {
            return Ok(format!("{}:{}", prefix, local));
        }
    }

    decoder
        .decode(qname.as_ref())
        .map(|name| name.into_owned())
        .map_err(|e| e.to_string())
}

/// Extracts attributes from a start element as owned data.
///
/// Malformed and repeated attributes are skipped, so the first `url` of an
/// element wins.
fn extract_attrs(e: &BytesStart<'_>, decoder: Decoder) -> Result<Attributes, String> {
    let mut attrs = Attributes::new();
    for attr in e.attributes().flatten() {
        let key = decoder
            .decode(attr.key.as_ref())
            .map_err(|e| e.to_string())?;
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(|e| e.to_string())?;
        attrs.push(key, value);
    }
    Ok(attrs)
}
