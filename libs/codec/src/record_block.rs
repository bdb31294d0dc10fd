//! Fixed-size record block codec
//!
//! Wire records cross the boundary as their exact in-memory byte image,
//! which is safe here because [`WireRecord`] bounds guarantee a flat,
//! padding-free `#[repr(C)]` layout. The only decode-time rule is that the
//! received block length equals the statically known record size.

use crate::error::{ProtocolError, ProtocolResult};
use types::WireRecord;
use zerocopy::AsBytes;

/// View a record as its wire block
pub fn record_bytes<R: WireRecord>(record: &R) -> &[u8] {
    record.as_bytes()
}

/// Decode a record block into the caller's record, overwriting it in place
///
/// A length other than `R::SIZE` means the peers disagree about the record
/// type or build; the caller's record is left untouched in that case.
pub fn decode_record<R: WireRecord>(block: &[u8], out: &mut R) -> ProtocolResult<()> {
    if block.len() != R::SIZE {
        return Err(ProtocolError::payload_size_mismatch(
            std::any::type_name::<R>(),
            R::SIZE,
            block.len(),
        ));
    }

    out.as_bytes_mut().copy_from_slice(block);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::TemplateEntry;

    #[test]
    fn test_record_block_round_trip() {
        let tmplt = TemplateEntry {
            mass1: 1.4,
            mass2: 1.38,
            chirp_mass: 1.209,
            eta: 0.2499,
            tau0: 31.7,
            tau3: 1.1,
            f_final: 1570.0,
            template_id: 12,
            _reserved: 0,
        };

        let block = record_bytes(&tmplt).to_vec();
        assert_eq!(block.len(), TemplateEntry::SIZE);

        let mut out = TemplateEntry::default();
        decode_record(&block, &mut out).unwrap();
        assert_eq!(out, tmplt);
    }

    #[test]
    fn test_record_block_size_checked() {
        let mut out = TemplateEntry::default();
        let err = decode_record(&[0u8; 16], &mut out).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::PayloadSizeMismatch {
                expected: 64,
                got: 16,
                ..
            }
        ));
        assert_eq!(out, TemplateEntry::default());
    }
}
