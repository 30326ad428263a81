//! Error types for discprobe-nal.

use thiserror::Error;

/// Result type for NAL scanning.
pub type Result<T> = std::result::Result<T, NalError>;

/// Errors raised while scanning an elementary stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NalError {
    /// A length prefix, declared payload or header byte runs past the buffer.
    #[error("Truncated NAL unit at offset {offset}: need {needed} bytes, have {available}")]
    TruncatedUnit {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Length-prefixed framing with a size field outside 1..=4 bytes.
    #[error("Invalid NAL length field size: {0} (expected 1..=4)")]
    InvalidLengthSize(u8),
}

impl NalError {
    pub(crate) fn truncated(offset: usize, needed: usize, buffer_len: usize) -> Self {
        Self::TruncatedUnit {
            offset,
            needed,
            available: buffer_len.saturating_sub(offset),
        }
    }
}
