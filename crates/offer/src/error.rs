//! Error types for offer encoding.
//!
//! Null values are never errors. Everything here is either malformed
//! structural input or a violation of the element writer contract.

use thiserror::Error;

/// Errors raised while rendering an offer.
#[derive(Error, Debug)]
pub enum OfferError {
    /// The element writer was driven out of order (unbalanced elements,
    /// attribute after content, flush with open elements).
    #[error("element writer contract violated: {0}")]
    Writer(String),

    /// XML encoder error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error while writing into the in-memory buffer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The encoded buffer was not valid UTF-8
    #[error("encoded offer is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A repeated-group entry is not a nested map.
    #[error("repeated group `{property}` entry {index} is not a map")]
    MalformedGroup { property: String, index: usize },

    /// A list reached the scalar path without a handler or group rule.
    #[error("property `{property}` holds a list but has no handler or repeated-group rule")]
    UnexpectedList { property: String },

    /// The `images` handler received something other than a list.
    #[error("`images` must be a list of image URLs")]
    MalformedImages,

    /// The offer identifier could not be resolved.
    #[error("offer identifier is missing (looked up `{key}`)")]
    MissingIdentifier { key: String },

    /// Invalid encoder configuration
    #[error("invalid encoder configuration: {0}")]
    Config(String),
}

impl OfferError {
    pub(crate) fn writer(msg: impl Into<String>) -> Self {
        OfferError::Writer(msg.into())
    }
}

/// Result type alias for offer encoding operations
pub type Result<T> = std::result::Result<T, OfferError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_malformed_group() {
        let err = OfferError::MalformedGroup {
            property: "metro".to_string(),
            index: 2,
        };
        assert_eq!(err.to_string(), "repeated group `metro` entry 2 is not a map");
    }

    #[test]
    fn test_from_utf8_error() {
        let bad = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: OfferError = bad.into();
        assert!(matches!(err, OfferError::Utf8(_)));
    }
}
