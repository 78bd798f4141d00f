// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

/// Failure of a single editor operation. The model is never modified when
/// one of these is returned.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Unsupported file format: {0}. Upload a .pdf or .docx file")]
    UnsupportedFormat(String),

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("{collection} index {index} out of range (len {len})")]
    IndexOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for EditorError {
    fn from(e: reqwest::Error) -> Self {
        // A body that fails to decode is a malformed response, not a network error
        if e.is_decode() {
            EditorError::EmptyResponse(e.to_string())
        } else {
            EditorError::TransportFailure(e.to_string())
        }
    }
}
