// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for domlens
//!
//! Every error here is raised by the host tree or the configuration layer.
//! The accessor layer never creates its own errors; it propagates these.
//! A missing attribute is not an error and never shows up here.

use thiserror::Error;

/// Result type alias for domlens operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for domlens
#[derive(Error, Debug)]
pub enum Error {
    /// HTML parsing failed
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// DOM operation not supported by the node
    #[error("DOM error: {0}")]
    Dom(String),

    /// Host rejected an attribute name
    #[error("Invalid attribute name '{name}'")]
    InvalidAttributeName { name: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new HTML parse error
    pub fn html_parse<S: Into<String>>(msg: S) -> Self {
        Error::HtmlParse(msg.into())
    }

    /// Create a new DOM error
    pub fn dom<S: Into<String>>(msg: S) -> Self {
        Error::Dom(msg.into())
    }

    /// Create an invalid attribute name error
    pub fn invalid_attribute(name: impl Into<String>) -> Self {
        Error::InvalidAttributeName { name: name.into() }
    }

    /// Check if this came from the markup parser
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::HtmlParse(_))
    }

    /// Check if the host rejected an attribute
    pub fn is_attribute_error(&self) -> bool {
        matches!(self, Error::InvalidAttributeName { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_attribute_error() {
        let err = Error::invalid_attribute("a b");

        assert!(err.is_attribute_error());
        assert!(!err.is_parse_error());
        assert_eq!(err.to_string(), "Invalid attribute name 'a b'");
    }

    #[test]
    fn test_parse_error() {
        let err = Error::html_parse("unexpected eof");
        assert!(err.is_parse_error());
        assert_eq!(err.to_string(), "HTML parsing error: unexpected eof");
    }

    #[test]
    fn test_from_serde_json() {
        let err: Error = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(!err.is_attribute_error());
    }
}
