//! Composite segment transfer
//!
//! A data segment moves as four blocks in fixed order: the versioned header
//! block, then the strain time series, the power spectrum and the response
//! function, each as one series block. Both peers must issue this transfer
//! at the same point of their call sequences and must have pre-allocated the
//! three series with matching lengths; the series codecs verify the lengths
//! on receipt before touching any buffer.

use crate::error::Result;
use crate::session::Exchange;
use crate::transport::Transport;
use tracing::debug;
use types::DataSegment;

impl<T: Transport + ?Sized> Exchange<'_, T> {
    /// Transfer one composite data segment
    ///
    /// Sender role: push header and the three series. Receiver role: decode
    /// the header scalars into `segment`, then each series into the
    /// caller-allocated buffers, in the same fixed order.
    pub fn transfer_segment(&mut self, segment: &mut DataSegment) -> Result<()> {
        self.begin_transfer()?;
        let peer = self.session.peer;

        if self.session.is_sender {
            self.transport
                .send_block(&codec::encode_segment_header(segment), peer)?;
            self.transport
                .send_block(&codec::encode_strain(&segment.strain), peer)?;
            self.transport
                .send_block(&codec::encode_spectrum(&segment.spectrum), peer)?;
            self.transport
                .send_block(&codec::encode_response(&segment.response), peer)?;
        } else {
            let header = self.transport.recv_block(peer)?;
            codec::decode_segment_header(&header, segment)?;

            let strain = self.transport.recv_block(peer)?;
            codec::decode_strain(&strain, &mut segment.strain)?;

            let spectrum = self.transport.recv_block(peer)?;
            codec::decode_spectrum(&spectrum, &mut segment.spectrum)?;

            let response = self.transport.recv_block(peer)?;
            codec::decode_response(&response, &mut segment.response)?;
        }

        if self.config.verbose {
            debug!(
                peer,
                number = segment.number,
                end_of_data = segment.end_of_data,
                sent = self.session.is_sender,
                remaining = self.remaining(),
                "segment transferred"
            );
        }
        Ok(())
    }
}
