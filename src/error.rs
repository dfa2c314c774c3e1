//! Error type shared by every codec stage and the pipeline.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PackError>;

/// Everything that can go wrong while packing or unpacking a buffer.
///
/// None of these are retryable: they mean either the caller broke a codec contract
/// (escape byte, oversized input) or the packed data is damaged.
#[derive(Debug, Error)]
pub enum PackError {
    /// The run-length plaintext contains the reserved escape byte.
    #[error("escape byte 0x{escape:02x} found in plaintext at offset {offset}")]
    EscapeByteCollision { escape: u8, offset: usize },

    /// A decoder needed more input than the buffer holds.
    #[error("unexpected end of stream at offset {offset}")]
    UnexpectedEndOfStream { offset: usize },

    /// The packed data cannot have been produced by the matching encoder.
    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    /// The input is longer than the codec can represent.
    #[error("input of {len} bytes exceeds the limit of {max} bytes")]
    InputTooLarge { len: usize, max: usize },

    /// A pipeline stage name that is not one of the known codecs.
    #[error("unknown stage '{0}' (expected bwt, mtf, rle or arith)")]
    UnknownStage(String),

    /// File handling in the command line tool.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackError {
    /// Shorthand for a [`PackError::CorruptStream`].
    pub fn corrupt(message: impl Into<String>) -> Self {
        PackError::CorruptStream(message.into())
    }
}
