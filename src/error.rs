// Error types for req2postman
// One enum for every failure the converter can report, grouped into categories
// that decide how far a failure reaches (one item, one file, or the run).

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Main error type for the converter
#[derive(Debug, Error)]
pub enum ConvertError {
    /// URL has no `scheme://` separator
    #[error("invalid URL format: {0}")]
    MalformedUrl(String),

    /// Raw HTTP request text was empty
    #[error("empty request")]
    EmptyRequest,

    /// First line of a raw HTTP request lacked a method or a target
    #[error("invalid request line: {0}")]
    InvalidRequestLine(String),

    /// Burp request content flagged as base64 did not decode
    #[error("could not decode base64 request for item {item}: {source}")]
    InvalidBase64 {
        item: usize,
        #[source]
        source: base64::DecodeError,
    },

    /// Burp export did not match the expected element structure
    #[error("error decoding Burp XML {}: {source}", path.display())]
    XmlDecode {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    /// Input is not a kind the converter recognizes
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// File could not be opened, read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Collection could not be rendered as JSON
    #[error("error marshaling JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Invalid run configuration
    #[error("configuration error: {0}")]
    Config(String),
}

/// How far a failure reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad item or line; the rest of the file continues
    MalformedInput,
    /// File is not a recognized kind; the file is skipped
    UnsupportedFormat,
    /// Document shape is wrong; the file is abandoned
    StructuralDecodeFailure,
    /// File unreadable; the file is abandoned
    IoFailure,
    /// Final document could not be produced; the run fails
    Output,
    /// Run could not start
    Configuration,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::MalformedUrl(_)
            | ConvertError::EmptyRequest
            | ConvertError::InvalidRequestLine(_)
            | ConvertError::InvalidBase64 { .. } => ErrorCategory::MalformedInput,
            ConvertError::UnsupportedFormat(_) => ErrorCategory::UnsupportedFormat,
            ConvertError::XmlDecode { .. } => ErrorCategory::StructuralDecodeFailure,
            ConvertError::Io { .. } => ErrorCategory::IoFailure,
            ConvertError::Serialize(_) => ErrorCategory::Output,
            ConvertError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
