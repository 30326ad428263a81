//! Error types for discprobe-bdmv.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for discprobe-bdmv operations.
pub type Result<T> = std::result::Result<T, BdmvError>;

/// Error type for ClipInfo and playlist parsing.
#[derive(Debug, Error)]
pub enum BdmvError {
    /// I/O error on the underlying source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File or record does not start with the expected tag.
    #[error("Bad magic: expected {expected:?}, found {found:?}")]
    BadMagic {
        expected: &'static str,
        found: String,
    },

    /// Version string other than "0100" / "0200".
    #[error("Unsupported version: {0:?}")]
    UnsupportedVersion(String),

    /// A field or record runs past the end of the file or its enclosing record.
    #[error("Truncated record at offset {offset}: need {needed} bytes, have {available}")]
    TruncatedRecord {
        offset: u64,
        needed: u64,
        available: u64,
    },

    /// Play item with inconsistent contents.
    #[error("Invalid play item {index}: {reason}")]
    InvalidPlayItem { index: usize, reason: String },

    /// No playlist could be read from the disc folder.
    #[error("No main movie playlist found under {0:?}")]
    NotFound(PathBuf),

    /// The scan was stopped through its stop signal.
    #[error("Playlist scan cancelled")]
    Cancelled,
}

impl BdmvError {
    pub(crate) fn bad_magic(expected: &'static str, found: &[u8]) -> Self {
        Self::BadMagic {
            expected,
            found: String::from_utf8_lossy(found).into_owned(),
        }
    }
}
