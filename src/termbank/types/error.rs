//! Custom error types for the termbank-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Every variant belongs to the fatal load tier: dictionary loading is an
/// all-or-nothing startup step. Lookup and extraction have no error path;
/// structural anomalies inside a content tree degrade to empty output
/// instead.
#[derive(Debug, Error)]
pub enum TermbankError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The zip container is missing, truncated, or structurally invalid.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A term bank member's bytes are not valid UTF-8.
    #[error("archive member {member} is not valid UTF-8")]
    MemberNotUtf8 {
        member: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A term bank member does not decode as an array of term entry arrays.
    ///
    /// Covers malformed JSON, a non-array top level, and entries that break
    /// the fixed seven-element envelope.
    #[error("malformed term bank JSON in archive member {member}: {source}")]
    MalformedMember {
        member: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A convenience `Result` type alias using the crate's `TermbankError` type.
pub type Result<T> = std::result::Result<T, TermbankError>;
