//! Error types for huffpack

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompressError>;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("malformed container: {reason}")]
    MalformedContainer { reason: String },

    #[error("empty tree: histogram is all zero but payload has {payload_len} bytes")]
    EmptyTree { payload_len: usize },

    #[error("input contains a single distinct byte value {byte:#04x}")]
    DegenerateSingleSymbol { byte: u8 },

    #[error("input too large: {len} bytes exceeds limit of {max}")]
    InputTooLarge { len: usize, max: usize },

    #[error("frequency of byte {byte:#04x} does not fit a 32-bit counter")]
    CounterOverflow { byte: u8 },

    #[error("bitstream error: {0}")]
    Bitstream(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl CompressError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CompressError::MalformedContainer {
            reason: reason.into(),
        }
    }
}
