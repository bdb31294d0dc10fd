//! Series block codecs
//!
//! Each nested series of a composite segment travels as one block: a
//! fixed 32-byte header carrying the series metadata followed by the raw
//! sample buffer, little-endian throughout.
//!
//! ```text
//! ┌─────────┬─────┬──────────┬─────┬───────┬──────┬────┬─────────────┐
//! │ version │ tag │ reserved │ len │ epoch │ step │ f0 │ samples     │
//! │ u8      │ u8  │ u16 = 0  │ u32 │ 2×i32 │ f64  │ f64│ len × elem  │
//! └─────────┴─────┴──────────┴─────┴───────┴──────┴────┴─────────────┘
//! ```
//!
//! The sample count is not negotiated: the receiver decodes into a buffer
//! it allocated up front, and a peer that sends a different length is
//! reported as [`ProtocolError::SeriesLengthMismatch`] before any sample is
//! touched. Lengths are an out-of-band contract of the pipeline
//! configuration; the check here turns a violated contract into a clean
//! error instead of a desynchronized wire.

use crate::error::{ProtocolError, ProtocolResult};
use byteorder::{ByteOrder, LittleEndian};
use types::{GpsTime, PowerSpectrum, ResponseFunction, StrainTimeSeries};

/// Current series block encoding version
pub const SERIES_BLOCK_VERSION: u8 = 1;

/// Encoded length of the series block header
pub const SERIES_HEADER_LEN: usize = 32;

const TAG_STRAIN: u8 = 0x01;
const TAG_SPECTRUM: u8 = 0x02;
const TAG_RESPONSE: u8 = 0x03;

fn encode_header(block: &mut Vec<u8>, tag: u8, len: usize, epoch: GpsTime, step: f64, f0: f64) {
    let mut header = [0u8; SERIES_HEADER_LEN];
    header[0] = SERIES_BLOCK_VERSION;
    header[1] = tag;
    LittleEndian::write_u32(&mut header[4..8], len as u32);
    LittleEndian::write_i32(&mut header[8..12], epoch.seconds);
    LittleEndian::write_i32(&mut header[12..16], epoch.nanoseconds);
    LittleEndian::write_f64(&mut header[16..24], step);
    LittleEndian::write_f64(&mut header[24..32], f0);
    block.extend_from_slice(&header);
}

/// Validated series header fields shared by the three decoders
struct SeriesHeader {
    len: usize,
    epoch: GpsTime,
    step: f64,
    f0: f64,
}

fn decode_header(
    block: &[u8],
    series: &'static str,
    tag: u8,
    expected_len: usize,
    elem_size: usize,
) -> ProtocolResult<SeriesHeader> {
    if block.len() < SERIES_HEADER_LEN {
        return Err(ProtocolError::block_too_small(
            SERIES_HEADER_LEN,
            block.len(),
            "series block header",
        ));
    }

    let version = block[0];
    if version != SERIES_BLOCK_VERSION {
        return Err(ProtocolError::UnsupportedVersion {
            version,
            supported: SERIES_BLOCK_VERSION,
        });
    }

    if block[1] != tag {
        return Err(ProtocolError::SeriesTagMismatch {
            series,
            expected: tag,
            got: block[1],
        });
    }

    let len = LittleEndian::read_u32(&block[4..8]) as usize;
    if len != expected_len {
        return Err(ProtocolError::series_length_mismatch(
            series,
            expected_len,
            len,
        ));
    }

    let total = SERIES_HEADER_LEN + len * elem_size;
    if block.len() != total {
        return Err(ProtocolError::payload_size_mismatch(
            series,
            total,
            block.len(),
        ));
    }

    Ok(SeriesHeader {
        len,
        epoch: GpsTime::new(
            LittleEndian::read_i32(&block[8..12]),
            LittleEndian::read_i32(&block[12..16]),
        ),
        step: LittleEndian::read_f64(&block[16..24]),
        f0: LittleEndian::read_f64(&block[24..32]),
    })
}

/// Encode a strain time series into one wire block
pub fn encode_strain(series: &StrainTimeSeries) -> Vec<u8> {
    let mut block = Vec::with_capacity(SERIES_HEADER_LEN + series.len() * 2);
    encode_header(
        &mut block,
        TAG_STRAIN,
        series.len(),
        series.epoch,
        series.delta_t,
        series.f0,
    );

    let start = block.len();
    block.resize(start + series.len() * 2, 0);
    LittleEndian::write_i16_into(&series.data, &mut block[start..]);
    block
}

/// Decode a strain block into a pre-allocated series, overwriting metadata
/// and samples in place
pub fn decode_strain(block: &[u8], out: &mut StrainTimeSeries) -> ProtocolResult<()> {
    let header = decode_header(block, "strain time series", TAG_STRAIN, out.len(), 2)?;
    out.epoch = header.epoch;
    out.delta_t = header.step;
    out.f0 = header.f0;
    LittleEndian::read_i16_into(&block[SERIES_HEADER_LEN..], &mut out.data[..header.len]);
    Ok(())
}

/// Encode a power spectrum into one wire block
pub fn encode_spectrum(series: &PowerSpectrum) -> Vec<u8> {
    let mut block = Vec::with_capacity(SERIES_HEADER_LEN + series.len() * 4);
    encode_header(
        &mut block,
        TAG_SPECTRUM,
        series.len(),
        series.epoch,
        series.delta_f,
        series.f0,
    );

    let start = block.len();
    block.resize(start + series.len() * 4, 0);
    LittleEndian::write_f32_into(&series.data, &mut block[start..]);
    block
}

/// Decode a spectrum block into a pre-allocated series
pub fn decode_spectrum(block: &[u8], out: &mut PowerSpectrum) -> ProtocolResult<()> {
    let header = decode_header(block, "power spectrum", TAG_SPECTRUM, out.len(), 4)?;
    out.epoch = header.epoch;
    out.delta_f = header.step;
    out.f0 = header.f0;
    LittleEndian::read_f32_into(&block[SERIES_HEADER_LEN..], &mut out.data[..header.len]);
    Ok(())
}

/// Encode a response function into one wire block
pub fn encode_response(series: &ResponseFunction) -> Vec<u8> {
    let mut block = Vec::with_capacity(SERIES_HEADER_LEN + series.len() * 8);
    encode_header(
        &mut block,
        TAG_RESPONSE,
        series.len(),
        series.epoch,
        series.delta_f,
        series.f0,
    );

    let mut sample = [0u8; 8];
    for c in &series.data {
        LittleEndian::write_f32(&mut sample[0..4], c.re);
        LittleEndian::write_f32(&mut sample[4..8], c.im);
        block.extend_from_slice(&sample);
    }
    block
}

/// Decode a response block into a pre-allocated series
pub fn decode_response(block: &[u8], out: &mut ResponseFunction) -> ProtocolResult<()> {
    let header = decode_header(block, "response function", TAG_RESPONSE, out.len(), 8)?;
    out.epoch = header.epoch;
    out.delta_f = header.step;
    out.f0 = header.f0;

    for (i, c) in out.data.iter_mut().enumerate() {
        let at = SERIES_HEADER_LEN + i * 8;
        c.re = LittleEndian::read_f32(&block[at..at + 4]);
        c.im = LittleEndian::read_f32(&block[at + 4..at + 8]);
    }
    Ok(())
}
