//! # Chirpsearch Exchange Codec
//!
//! ## Purpose
//!
//! This crate contains the wire rules of the exchange protocol, with no I/O:
//! - The negotiation [`ControlMessage`] and its signed count-field encoding
//! - The versioned segment header block codec
//! - Series block codecs for the three nested series of a data segment
//! - Fixed-size record block framing
//! - Protocol error types
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → libs/exchange
//!     ↑           ↓            ↓
//! Pure Data   Wire Rules   Sessions and
//! Structures  Encoding     Transport
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Transport or session logic (belongs in libs/exchange)
//! - Data structure definitions (belong in libs/types)
//!
//! All multi-byte fields are little-endian. Every block is versioned or
//! fixed-size, and every decoder validates the delivered length before
//! touching caller buffers, so a peer mismatch surfaces as a typed error
//! instead of a silently desynchronized wire.

pub mod control;
pub mod error;
pub mod record_block;
pub mod segment_header;
pub mod series_block;

pub use control::{decode_count, encode_count, ControlMessage};
pub use error::{ProtocolError, ProtocolResult};
pub use record_block::{decode_record, record_bytes};
pub use segment_header::{
    decode_segment_header, encode_segment_header, SEGMENT_HEADER_LEN, SEGMENT_HEADER_VERSION,
};
pub use series_block::{
    decode_response, decode_spectrum, decode_strain, encode_response, encode_spectrum,
    encode_strain, SERIES_BLOCK_VERSION, SERIES_HEADER_LEN,
};

/// Termination handshake sentinel ("A SOS"), shared by both peers
///
/// Sent as a length-1 vector of 16-bit integers by the sending-role peer
/// when an exchange finishes; the receiving-role peer verifies it bit for
/// bit.
pub const HANDSHAKE_TOKEN: i16 = 0xA505_u16 as i16;
