//! Exchange and transport error types
//!
//! Every protocol operation is fail-fast: no retries, no partial success.
//! Errors propagate to the caller, which owns pipeline-level decisions.

use crate::transport::Rank;
use codec::ProtocolError;
use thiserror::Error;

/// Failures reported by a [`crate::Transport`] implementation
#[derive(Debug, Error)]
pub enum TransportError {
    /// The peer's endpoint is gone; a blocking receive can never complete
    #[error("peer {peer} disconnected")]
    Disconnected { peer: Rank },

    /// The destination rank is not part of this transport
    #[error("unknown peer rank {rank}")]
    UnknownPeer { rank: Rank },

    /// The peer sent a different frame kind than this end was waiting for,
    /// which means the two call sequences have diverged
    #[error("unexpected frame from peer {peer}: expected {expected}, got {got}")]
    UnexpectedFrame {
        peer: Rank,
        expected: &'static str,
        got: &'static str,
    },

    /// I/O failure in a transport backed by the operating system
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a protocol operation
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The received termination token differs from [`codec::HANDSHAKE_TOKEN`].
    /// Fatal to the session: payload already exchanged must not be trusted.
    #[error(
        "termination handshake mismatch: expected {expected:#06x}, got {got:#06x} - payload exchanged in this session must not be trusted"
    )]
    HandshakeMismatch { expected: i16, got: i16 },

    /// A transfer was attempted after every negotiated object had already
    /// been moved; rejected locally instead of desynchronizing the wire
    #[error("transfer sequence violation: all {negotiated} negotiated objects were already transferred")]
    SequenceViolation { negotiated: u32 },

    /// A precondition on caller-supplied parameters failed before any I/O
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A wire block could not be decoded
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The underlying transport failed; the session is left unterminated
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result type for exchange operations
pub type Result<T> = std::result::Result<T, ExchangeError>;
