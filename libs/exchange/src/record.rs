//! Typed record transfer
//!
//! Moves one fixed-size record per call, direction fixed by the session
//! role. The record travels as a single opaque byte block; the protocol
//! never interprets its fields.

use crate::error::Result;
use crate::session::Exchange;
use crate::transport::Transport;
use tracing::debug;
use types::WireRecord;

impl<T: Transport + ?Sized> Exchange<'_, T> {
    /// Transfer one fixed-size record
    ///
    /// Sender role: serialize `record` as its flat byte block and push it.
    /// Receiver role: block for the peer's block and overwrite `record` in
    /// place. A block of the wrong size fails with
    /// [`codec::ProtocolError::PayloadSizeMismatch`] and leaves `record`
    /// untouched.
    pub fn transfer_record<R: WireRecord>(&mut self, record: &mut R) -> Result<()> {
        self.begin_transfer()?;
        let peer = self.session.peer;

        if self.session.is_sender {
            self.transport.send_block(codec::record_bytes(record), peer)?;
        } else {
            let block = self.transport.recv_block(peer)?;
            codec::decode_record(&block, record)?;
        }

        if self.config.verbose {
            debug!(
                peer,
                size = R::SIZE,
                sent = self.session.is_sender,
                remaining = self.remaining(),
                "record transferred"
            );
        }
        Ok(())
    }
}
