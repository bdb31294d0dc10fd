//! Point-to-point blocking transport interface
//!
//! The exchange protocol only needs three kinds of traffic: the negotiation
//! control message, length-delimited byte blocks and short vectors of 16-bit
//! integers (the termination handshake). [`Transport`] models exactly that,
//! addressed by integer peer rank, with blocking semantics on both sides.
//! Timeout and retry policy belong to the transport implementation, never to
//! the protocol.
//!
//! [`ChannelTransport`] is the in-process implementation used by the test
//! suite and by single-host pipelines: a full mesh of unbounded channels,
//! one per directed peer pair, so a receive from rank `r` can never observe
//! frames from other peers.

use crate::error::TransportError;
use codec::ControlMessage;
use crossbeam_channel::{unbounded, Receiver, Select, Sender};
use std::collections::HashMap;

/// Transport address of a process
pub type Rank = i32;

/// One unit of transport traffic
#[derive(Debug, Clone)]
pub enum Frame {
    /// Negotiation control message
    Control(ControlMessage),
    /// Opaque length-delimited byte block
    Block(Vec<u8>),
    /// Vector of 16-bit integers
    I16Vector(Vec<i16>),
}

impl Frame {
    fn kind(&self) -> &'static str {
        match self {
            Frame::Control(_) => "control message",
            Frame::Block(_) => "byte block",
            Frame::I16Vector(_) => "i16 vector",
        }
    }
}

/// Blocking, rank-addressed point-to-point transport
///
/// Every method blocks the calling thread until the transfer completes.
/// Receives are ordered per peer pair; the protocol relies on both peers
/// issuing matching call sequences and the transport delivering frames in
/// send order.
pub trait Transport {
    /// Rank of this endpoint
    fn rank(&self) -> Rank;

    /// Send a negotiation message to `dest`
    fn send_control(&self, message: &ControlMessage, dest: Rank) -> Result<(), TransportError>;

    /// Block until a negotiation message arrives from any peer
    fn recv_control(&self) -> Result<ControlMessage, TransportError>;

    /// Send an opaque byte block to `dest`
    fn send_block(&self, block: &[u8], dest: Rank) -> Result<(), TransportError>;

    /// Block until a byte block arrives from `source`
    fn recv_block(&self, source: Rank) -> Result<Vec<u8>, TransportError>;

    /// Send a vector of 16-bit integers to `dest`
    fn send_i16_vector(&self, data: &[i16], dest: Rank) -> Result<(), TransportError>;

    /// Block until an i16 vector arrives from `source`
    fn recv_i16_vector(&self, source: Rank) -> Result<Vec<i16>, TransportError>;
}

/// In-process transport endpoint over crossbeam channels
#[derive(Debug)]
pub struct ChannelTransport {
    rank: Rank,
    outgoing: HashMap<Rank, Sender<Frame>>,
    incoming: Vec<(Rank, Receiver<Frame>)>,
}

impl ChannelTransport {
    /// Build a fully connected mesh of `n` endpoints with ranks `0..n`
    pub fn mesh(n: usize) -> Vec<ChannelTransport> {
        let mut endpoints: Vec<ChannelTransport> = (0..n)
            .map(|rank| ChannelTransport {
                rank: rank as Rank,
                outgoing: HashMap::new(),
                incoming: Vec::new(),
            })
            .collect();

        for from in 0..n {
            for to in 0..n {
                if from == to {
                    continue;
                }
                let (tx, rx) = unbounded();
                endpoints[from].outgoing.insert(to as Rank, tx);
                endpoints[to].incoming.push((from as Rank, rx));
            }
        }
        endpoints
    }

    /// Convenience constructor for a two-process pipeline
    pub fn pair() -> (ChannelTransport, ChannelTransport) {
        let mut mesh = Self::mesh(2);
        let b = mesh.pop().expect("mesh of two");
        let a = mesh.pop().expect("mesh of two");
        (a, b)
    }

    fn send_frame(&self, frame: Frame, dest: Rank) -> Result<(), TransportError> {
        let tx = self
            .outgoing
            .get(&dest)
            .ok_or(TransportError::UnknownPeer { rank: dest })?;
        tx.send(frame)
            .map_err(|_| TransportError::Disconnected { peer: dest })
    }

    fn recv_frame(&self, source: Rank) -> Result<Frame, TransportError> {
        let rx = self
            .incoming
            .iter()
            .find(|(rank, _)| *rank == source)
            .map(|(_, rx)| rx)
            .ok_or(TransportError::UnknownPeer { rank: source })?;
        rx.recv()
            .map_err(|_| TransportError::Disconnected { peer: source })
    }
}

impl Transport for ChannelTransport {
    fn rank(&self) -> Rank {
        self.rank
    }

    fn send_control(&self, message: &ControlMessage, dest: Rank) -> Result<(), TransportError> {
        self.send_frame(Frame::Control(*message), dest)
    }

    fn recv_control(&self) -> Result<ControlMessage, TransportError> {
        // A responder does not know its peer yet, so select over every inbox
        let mut select = Select::new();
        for (_, rx) in &self.incoming {
            select.recv(rx);
        }

        let op = select.select();
        let (peer, rx) = &self.incoming[op.index()];
        let frame = op
            .recv(rx)
            .map_err(|_| TransportError::Disconnected { peer: *peer })?;

        match frame {
            Frame::Control(message) => Ok(message),
            other => Err(TransportError::UnexpectedFrame {
                peer: *peer,
                expected: "control message",
                got: other.kind(),
            }),
        }
    }

    fn send_block(&self, block: &[u8], dest: Rank) -> Result<(), TransportError> {
        self.send_frame(Frame::Block(block.to_vec()), dest)
    }

    fn recv_block(&self, source: Rank) -> Result<Vec<u8>, TransportError> {
        match self.recv_frame(source)? {
            Frame::Block(block) => Ok(block),
            other => Err(TransportError::UnexpectedFrame {
                peer: source,
                expected: "byte block",
                got: other.kind(),
            }),
        }
    }

    fn send_i16_vector(&self, data: &[i16], dest: Rank) -> Result<(), TransportError> {
        self.send_frame(Frame::I16Vector(data.to_vec()), dest)
    }

    fn recv_i16_vector(&self, source: Rank) -> Result<Vec<i16>, TransportError> {
        match self.recv_frame(source)? {
            Frame::I16Vector(data) => Ok(data),
            other => Err(TransportError::UnexpectedFrame {
                peer: source,
                expected: "i16 vector",
                got: other.kind(),
            }),
        }
    }
}
