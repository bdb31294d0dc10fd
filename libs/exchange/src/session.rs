//! Exchange sessions: negotiation, state tracking and termination
//!
//! One exchange is a single negotiated agreement between exactly two peers:
//! who sends, who receives, and how many payload units move. The initiator
//! states the contract in one control message and never waits for a reply;
//! the responder blocks for that message and derives the mirrored contract
//! from it. Both peers then drive an identical sequence of transfer calls
//! and close with the termination handshake.
//!
//! The live [`Exchange`] value is the session state machine. It counts
//! transfers against the negotiated object count and rejects the excess
//! locally, and it is consumed by [`Exchange::finish`], so a terminated
//! session cannot be reused by construction.

use crate::error::{ExchangeError, Result};
use crate::transport::{Rank, Transport};
use codec::{ControlMessage, HANDSHAKE_TOKEN};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The negotiated contract of one exchange, immutable once established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeSession {
    /// Caller-defined tag for what this session transfers; opaque to the
    /// protocol (see [`types::ObjectKind`] for the pipeline's registry)
    pub object_type: i32,
    /// True if this process pushes payload for the whole session
    pub is_sender: bool,
    /// Number of payload units the session will move; zero is valid
    pub num_objects: u32,
    /// Transport rank of the other participant
    pub peer: Rank,
}

/// Per-session configuration
///
/// Verbosity is an explicit value here rather than process-global state, so
/// concurrent pipelines can trace one exchange without drowning in all of
/// them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Emit a debug event for every protocol operation of this session
    pub verbose: bool,
}

/// A live exchange session
///
/// Created by [`Exchange::initiate`] or [`Exchange::respond`], driven by the
/// transfer methods, consumed by [`Exchange::finish`]. The session borrows
/// its transport exclusively conceptually: exactly one session per peer pair
/// may be active at a time, and a session must stay on the thread that
/// created it.
#[derive(Debug)]
pub struct Exchange<'t, T: Transport + ?Sized> {
    pub(crate) transport: &'t T,
    pub(crate) session: ExchangeSession,
    pub(crate) config: ExchangeConfig,
    pub(crate) transferred: u32,
    terminated: bool,
}

impl<'t, T: Transport + ?Sized> Exchange<'t, T> {
    /// Initiate an exchange: state the contract and send it to the peer
    ///
    /// The initiator already knows the full contract; the returned session
    /// is an exact copy of `session`. No acknowledgement round-trip occurs:
    /// the surrounding pipeline guarantees the responder is listening.
    pub fn initiate(transport: &'t T, session: ExchangeSession, config: ExchangeConfig) -> Result<Self> {
        if session.peer == transport.rank() {
            return Err(ExchangeError::InvalidArgument(format!(
                "cannot negotiate an exchange with own rank {}",
                session.peer
            )));
        }

        let count_field = codec::encode_count(session.num_objects, session.is_sender)?;
        let hello = ControlMessage::new(session.object_type, count_field, transport.rank());
        transport.send_control(&hello, session.peer)?;

        if config.verbose {
            debug!(
                peer = session.peer,
                object_type = session.object_type,
                num_objects = session.num_objects,
                is_sender = session.is_sender,
                "exchange initiated"
            );
        }

        Ok(Self {
            transport,
            session,
            config,
            transferred: 0,
            terminated: false,
        })
    }

    /// Respond to an exchange: block until an initiator states a contract
    ///
    /// The received control message carries everything the responder needs,
    /// including the initiator's rank. The responder's role is the mirror of
    /// the initiator's: a negative count field means the initiator receives,
    /// so this process sends.
    pub fn respond(transport: &'t T, config: ExchangeConfig) -> Result<Self> {
        let hello = transport.recv_control()?;
        let (initiator_sends, num_objects) = codec::decode_count(hello.count_field)?;

        let session = ExchangeSession {
            object_type: hello.object_type,
            is_sender: !initiator_sends,
            num_objects,
            peer: hello.source_rank,
        };

        if config.verbose {
            debug!(
                peer = session.peer,
                object_type = session.object_type,
                num_objects = session.num_objects,
                is_sender = session.is_sender,
                "exchange accepted"
            );
        }

        Ok(Self {
            transport,
            session,
            config,
            transferred: 0,
            terminated: false,
        })
    }

    /// The negotiated contract
    pub fn session(&self) -> &ExchangeSession {
        &self.session
    }

    /// True if this process pushes payload for the whole session
    pub fn is_sender(&self) -> bool {
        self.session.is_sender
    }

    /// Payload units not yet transferred in this session
    pub fn remaining(&self) -> u32 {
        self.session.num_objects - self.transferred
    }

    /// Account for one payload transfer, rejecting calls past the contract
    pub(crate) fn begin_transfer(&mut self) -> Result<()> {
        if self.transferred == self.session.num_objects {
            return Err(ExchangeError::SequenceViolation {
                negotiated: self.session.num_objects,
            });
        }
        self.transferred += 1;
        Ok(())
    }

    /// Close the exchange with the termination handshake
    ///
    /// The sending-role peer pushes the handshake token and returns; the
    /// receiving-role peer blocks for it and verifies every bit. The session
    /// is consumed on every path, success or failure; a mismatch means both
    /// peers did not reach the same logical point and nothing exchanged in
    /// the session should be trusted.
    pub fn finish(mut self) -> Result<()> {
        self.terminated = true;
        let peer = self.session.peer;

        if self.session.is_sender {
            self.transport.send_i16_vector(&[HANDSHAKE_TOKEN], peer)?;
            if self.config.verbose {
                debug!(peer, "termination handshake sent");
            }
            return Ok(());
        }

        let goodbye = self.transport.recv_i16_vector(peer)?;
        let &[got] = goodbye.as_slice() else {
            return Err(codec::ProtocolError::payload_size_mismatch(
                "handshake vector",
                1,
                goodbye.len(),
            )
            .into());
        };

        if got != HANDSHAKE_TOKEN {
            return Err(ExchangeError::HandshakeMismatch {
                expected: HANDSHAKE_TOKEN,
                got,
            });
        }

        if self.config.verbose {
            debug!(peer, "termination handshake verified");
        }
        Ok(())
    }
}

impl<T: Transport + ?Sized> Drop for Exchange<'_, T> {
    fn drop(&mut self) {
        if !self.terminated {
            // The peer side of an unterminated session blocks forever in its
            // half of the handshake
            warn!(
                peer = self.session.peer,
                transferred = self.transferred,
                num_objects = self.session.num_objects,
                "exchange dropped without termination handshake"
            );
        }
    }
}
