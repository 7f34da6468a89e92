//! Error types for codec-bench operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::codec::CodecOp;
use crate::digest::Digest;

/// Result type alias for codec-bench operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while benchmarking a codec.
///
/// None of these are recovered from: the harness performs no retries, and a
/// failed run never emits a partial result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read or recognize an input image file.
    #[error("Image load failed: {path}: {reason}")]
    Load {
        /// Path to the image that failed to load.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Unknown codec identifier, malformed image description, or an
    /// image format with no matching encode/decode dispatch.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A wrapped codec rejected its input or failed internally.
    #[error("Codec error ({codec}, {operation}): {message}")]
    Codec {
        /// Codec identifier.
        codec: String,
        /// The operation that failed.
        operation: CodecOp,
        /// Error message from the codec.
        message: String,
    },

    /// The codec does not implement the requested capability.
    #[error("Codec {codec} does not implement {operation}")]
    Unsupported {
        /// Codec identifier.
        codec: String,
        /// The unsupported operation.
        operation: CodecOp,
    },

    /// A decoded image did not reproduce the encoder's input bit-exactly.
    #[error("Round-trip mismatch: source digest {expected}, decoded digest {actual}")]
    RoundTripMismatch {
        /// Digest of the source image.
        expected: Digest,
        /// Digest of the decoded image.
        actual: Digest,
    },

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
