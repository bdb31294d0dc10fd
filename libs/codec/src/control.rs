//! Negotiation control message and count-field encoding
//!
//! Exchange negotiation uses a single 12-byte control message. Its
//! `count_field` packs two facts into one signed integer: how many payload
//! units the session will move and which peer pushes them. The initiator
//! writes `num_objects + 1` when it will send and `-(num_objects + 1)` when
//! it will receive; the `+1` offset keeps the field nonzero for an empty
//! exchange so the sign always carries the direction.

use crate::error::{ProtocolError, ProtocolResult};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

/// Negotiation message (12 bytes)
///
/// Sent exactly once per exchange, initiator to responder. The responder
/// derives the whole session contract from it, including the initiator's
/// rank, so no explicit peer configuration is needed on the responding side.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsBytes, FromBytes, FromZeroes)]
pub struct ControlMessage {
    /// Caller-defined tag naming what the session will transfer
    pub object_type: i32,
    /// Signed object count, offset by one; see [`encode_count`]
    pub count_field: i32,
    /// Transport rank of the initiator
    pub source_rank: i32,
}

impl ControlMessage {
    /// Wire size in bytes
    pub const SIZE: usize = 12;

    pub fn new(object_type: i32, count_field: i32, source_rank: i32) -> Self {
        Self {
            object_type,
            count_field,
            source_rank,
        }
    }
}

/// Encode an object count and transfer direction into the count field
///
/// `initiator_sends` is the role of the peer building the control message.
/// Fails with [`ProtocolError::CountOutOfRange`] when `num_objects + 1`
/// does not fit a signed 32-bit field.
pub fn encode_count(num_objects: u32, initiator_sends: bool) -> ProtocolResult<i32> {
    if num_objects > i32::MAX as u32 - 1 {
        return Err(ProtocolError::CountOutOfRange { count: num_objects });
    }

    let offset = (num_objects + 1) as i32;
    Ok(if initiator_sends { offset } else { -offset })
}

/// Decode a count field into `(initiator_sends, num_objects)`
///
/// A zero field is unreachable through [`encode_count`] and is rejected as
/// a corrupt or foreign message.
pub fn decode_count(count_field: i32) -> ProtocolResult<(bool, u32)> {
    if count_field == 0 {
        return Err(ProtocolError::ZeroCountField);
    }

    Ok((count_field > 0, count_field.unsigned_abs() - 1))
}
