//! Error types for chat payload encoding.
//!
//! Parsing the legacy markup never fails (unmatched text is plain text), so
//! only the typed envelope has an error surface.

use thiserror::Error;

/// Errors produced while encoding or decoding a [`crate::ChatPayload`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// CBOR serialization failed.
    #[error("CBOR encode error: {0}")]
    CborEncode(String),

    /// CBOR deserialization failed (malformed bytes or unknown `kind`).
    #[error("CBOR decode error: {0}")]
    CborDecode(String),

    /// Encoded envelope exceeds [`crate::ChatPayload::MAX_SIZE`].
    #[error("payload too large: {size} bytes exceeds maximum {max}")]
    PayloadTooLarge {
        /// Size of the rejected payload in bytes.
        size: usize,
        /// Maximum accepted size in bytes.
        max: usize,
    },
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, ProtocolError>;
