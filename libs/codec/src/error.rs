//! Protocol-level errors for exchange wire blocks
//!
//! Every decode path in this crate fails fast with one of these variants.
//! Each variant carries the numbers a peer operator needs to diagnose a
//! desynchronized exchange: expected versus received sizes, the series or
//! record the block claimed to be, and the offending field values.

use thiserror::Error;

/// Wire block decoding errors with diagnostic context
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProtocolError {
    /// Block is too short to contain the expected structure
    #[error("block too small: need {need} bytes, got {got} ({context})")]
    BlockTooSmall {
        need: usize,
        got: usize,
        context: &'static str,
    },

    /// Block length does not match the fixed size agreed for this payload
    #[error("payload size mismatch for {struct_name}: expected {expected} bytes, got {got}")]
    PayloadSizeMismatch {
        struct_name: &'static str,
        expected: usize,
        got: usize,
    },

    /// Peer sent a series of a different length than the local buffer
    #[error(
        "series length mismatch for {series}: local buffer holds {expected} samples, peer sent {got}"
    )]
    SeriesLengthMismatch {
        series: &'static str,
        expected: usize,
        got: usize,
    },

    /// Block carries an encoding version this build does not understand
    #[error("unsupported block version {version}: this build supports version {supported}")]
    UnsupportedVersion { version: u8, supported: u8 },

    /// Series block is tagged as a different series than expected
    #[error("series tag mismatch: expected {expected:#04x} ({series}), got {got:#04x}")]
    SeriesTagMismatch {
        series: &'static str,
        expected: u8,
        got: u8,
    },

    /// Control message count field is zero, which the offset encoding never produces
    #[error("control message count field is zero: peer did not apply the +1 count offset")]
    ZeroCountField,

    /// Object count cannot be represented in the signed count field
    #[error("object count {count} exceeds the encodable range of the count field")]
    CountOutOfRange { count: u32 },
}

impl ProtocolError {
    /// Create a BlockTooSmall error for a truncated decode
    pub fn block_too_small(need: usize, got: usize, context: &'static str) -> Self {
        Self::BlockTooSmall { need, got, context }
    }

    /// Create a PayloadSizeMismatch error for a fixed-size block
    pub fn payload_size_mismatch(struct_name: &'static str, expected: usize, got: usize) -> Self {
        Self::PayloadSizeMismatch {
            struct_name,
            expected,
            got,
        }
    }

    /// Create a SeriesLengthMismatch error for a nested series transfer
    pub fn series_length_mismatch(series: &'static str, expected: usize, got: usize) -> Self {
        Self::SeriesLengthMismatch {
            series,
            expected,
            got,
        }
    }
}

/// Result type for codec operations
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;
