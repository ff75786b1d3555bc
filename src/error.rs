//! Error types for the Media RSS decoder.

use crate::events::TokenizerError;
use thiserror::Error;

/// Errors that can terminate a feed decode.
///
/// Malformed attribute values, unknown elements and unparseable dates are
/// never errors; the decoder falls back to defaults for those.
#[derive(Error, Debug)]
pub enum Error {
    /// The tokenizer reported malformed XML
    #[error("XML parsing error: {0}")]
    Tokenizer(#[from] TokenizerError),

    /// The document was well-formed but contained no `channel` element
    #[error("Document contains no channel element")]
    EmptyDocument,

    /// XML serialization error
    #[error("XML writing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the byte offset of a tokenizer failure, if known.
    pub fn position(&self) -> Option<u64> {
        match self {
            Error::Tokenizer(e) => e.position,
            _ => None,
        }
    }
}

/// Result type alias for decoder operations.
pub type Result<T> = std::result::Result<T, Error>;
