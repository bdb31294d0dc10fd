//! Segment header block codec
//!
//! The first block of a composite segment transfer carries the four header
//! scalars of a [`DataSegment`]. The encoding is versioned and
//! field-by-field; in-memory images of the segment struct never touch the
//! wire, so heterogeneous peers cannot disagree about layout or pointer
//! fields.
//!
//! ```text
//! ┌─────────┬───────┬──────────┬───────────────┐
//! │ version │ flags │ reserved │ number        │
//! │ u8      │ u8    │ u16 = 0  │ u32 LE        │
//! └─────────┴───────┴──────────┴───────────────┘
//! ```

use crate::error::{ProtocolError, ProtocolResult};
use byteorder::{ByteOrder, LittleEndian};
use types::DataSegment;

/// Current segment header encoding version
pub const SEGMENT_HEADER_VERSION: u8 = 1;

/// Encoded length of the segment header block
pub const SEGMENT_HEADER_LEN: usize = 8;

const FLAG_END_OF_DATA: u8 = 1 << 0;
const FLAG_NEW_CALIBRATION: u8 = 1 << 1;
const FLAG_NEW_LOCK: u8 = 1 << 2;

/// Encode the header scalars of `segment` into a fixed-size block
pub fn encode_segment_header(segment: &DataSegment) -> [u8; SEGMENT_HEADER_LEN] {
    let mut flags = 0u8;
    if segment.end_of_data {
        flags |= FLAG_END_OF_DATA;
    }
    if segment.new_calibration {
        flags |= FLAG_NEW_CALIBRATION;
    }
    if segment.new_lock {
        flags |= FLAG_NEW_LOCK;
    }

    let mut block = [0u8; SEGMENT_HEADER_LEN];
    block[0] = SEGMENT_HEADER_VERSION;
    block[1] = flags;
    LittleEndian::write_u32(&mut block[4..8], segment.number);
    block
}

/// Decode a header block into the scalar fields of `segment`
///
/// Only the four header scalars are written; the nested series of `segment`
/// are left untouched for the dedicated series transfers that follow.
pub fn decode_segment_header(block: &[u8], segment: &mut DataSegment) -> ProtocolResult<()> {
    if block.len() != SEGMENT_HEADER_LEN {
        return Err(ProtocolError::payload_size_mismatch(
            "DataSegment header",
            SEGMENT_HEADER_LEN,
            block.len(),
        ));
    }

    let version = block[0];
    if version != SEGMENT_HEADER_VERSION {
        return Err(ProtocolError::UnsupportedVersion {
            version,
            supported: SEGMENT_HEADER_VERSION,
        });
    }

    let flags = block[1];
    segment.end_of_data = flags & FLAG_END_OF_DATA != 0;
    segment.new_calibration = flags & FLAG_NEW_CALIBRATION != 0;
    segment.new_lock = flags & FLAG_NEW_LOCK != 0;
    segment.number = LittleEndian::read_u32(&block[4..8]);
    Ok(())
}
