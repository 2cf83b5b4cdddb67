//! Error types for dirsearch
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Indexing and query boundaries decide how each variant is handled:
//! `MissingDocument` is benign, `MalformedSummary` is skipped during
//! hydration, everything else surfaces as a failed index call or an
//! empty search result.

use thiserror::Error;

/// Result type alias for dirsearch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for dirsearch
#[derive(Debug, Error)]
pub enum Error {
    /// A backing store call failed or timed out
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A key holds a value of a different primitive type
    #[error("Wrong type for key {key}")]
    WrongType {
        /// The offending key
        key: String,
    },

    /// An identifier cannot be embedded in a store key
    #[error("Invalid key segment: {0}")]
    InvalidKey(String),

    /// No summary entry exists for the record
    #[error("Missing document {record_id} in site {site_id}")]
    MissingDocument {
        /// Owning site
        site_id: String,
        /// Record that was expected
        record_id: String,
    },

    /// A summary entry could not be decoded
    #[error("Malformed summary for {record_id}: {reason}")]
    MalformedSummary {
        /// Record whose summary failed to parse
        record_id: String,
        /// Decoder message
        reason: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be read or is invalid
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error describes an already-clean state rather than a failure.
    pub fn is_benign(&self) -> bool {
        matches!(self, Error::MissingDocument { .. })
    }

    /// Build a `StoreUnavailable` from any displayable cause.
    pub fn store(cause: impl std::fmt::Display) -> Self {
        Error::StoreUnavailable(cause.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_store_unavailable() {
        let err = Error::StoreUnavailable("connection refused".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Store unavailable"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_error_display_wrong_type() {
        let err = Error::WrongType {
            key: "dirsearch:s1:listing:summary".to_string(),
        };
        assert!(err.to_string().contains("dirsearch:s1:listing:summary"));
    }

    #[test]
    fn test_error_display_missing_document() {
        let err = Error::MissingDocument {
            site_id: "s1".to_string(),
            record_id: "l1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("l1"));
        assert!(msg.contains("s1"));
    }

    #[test]
    fn test_error_display_malformed_summary() {
        let err = Error::MalformedSummary {
            record_id: "l1".to_string(),
            reason: "expected value".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Malformed summary"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn test_only_missing_document_is_benign() {
        let missing = Error::MissingDocument {
            site_id: "s".to_string(),
            record_id: "r".to_string(),
        };
        assert!(missing.is_benign());
        assert!(!Error::store("down").is_benign());
        assert!(!Error::Config("bad".to_string()).is_benign());
    }

    #[test]
    fn test_error_from_serde_json() {
        let result: std::result::Result<Vec<String>, serde_json::Error> =
            serde_json::from_str("{not json");
        let err: Error = result.unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_error_pattern_matching() {
        let err = Error::MalformedSummary {
            record_id: "abc".to_string(),
            reason: "eof".to_string(),
        };

        match err {
            Error::MalformedSummary { record_id, reason } => {
                assert_eq!(record_id, "abc");
                assert_eq!(reason, "eof");
            }
            _ => panic!("Wrong error variant"),
        }
    }
}
