//! # Chirpsearch Exchange Protocol
//!
//! ## Purpose
//!
//! A minimal point-to-point negotiation and bulk-transfer layer used to move
//! search parameters and large typed data structures between the
//! coordinating process and worker processes of the search pipeline:
//! - **Negotiation**: one control message fixes direction and object count
//!   for a whole session
//! - **Payload transfer**: fixed-size records and composite data segments,
//!   in a call order both peers agree on out-of-band
//! - **Termination**: a handshake token that detects gross desynchronization
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → libs/codec → [exchange]
//!     ↑            ↓             ↓
//! Pure Data    Wire Rules   Sessions and
//! Structures   Encoding     Transport
//! ```
//!
//! ## Protocol Shape
//!
//! Strictly synchronous and single-threaded per session. Each side:
//!
//! ```text
//! negotiate → transfer × num_objects (identical order on both peers) → terminate
//! ```
//!
//! ```no_run
//! use exchange::{ChannelTransport, Exchange, ExchangeConfig, ExchangeSession};
//! use types::{ObjectKind, TemplateEntry};
//!
//! # fn main() -> exchange::Result<()> {
//! let (coordinator, _worker) = ChannelTransport::pair();
//!
//! let mut exchange = Exchange::initiate(
//!     &coordinator,
//!     ExchangeSession {
//!         object_type: ObjectKind::Template.into(),
//!         is_sender: true,
//!         num_objects: 1,
//!         peer: 1,
//!     },
//!     ExchangeConfig::default(),
//! )?;
//!
//! let mut tmplt = TemplateEntry::default();
//! exchange.transfer_record(&mut tmplt)?;
//! exchange.finish()
//! # }
//! ```
//!
//! ## What This Crate Does NOT Contain
//!
//! No service discovery, no multiplexing of concurrent exchanges on one
//! peer pair, no retries, no timeouts, no schema evolution. Each exchange is
//! one negotiated session between exactly two peers.

pub mod error;
pub mod record;
pub mod segment;
pub mod session;
pub mod transport;

pub use error::{ExchangeError, Result, TransportError};
pub use session::{Exchange, ExchangeConfig, ExchangeSession};
pub use transport::{ChannelTransport, Frame, Rank, Transport};

// Wire-level constants callers may need when implementing a transport
pub use codec::{ControlMessage, HANDSHAKE_TOKEN};
