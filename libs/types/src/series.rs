//! Sampled series owned by the pipeline
//!
//! Three series types travel inside a [`crate::DataSegment`]: the raw strain
//! time series (16-bit ADC counts), the one-sided power spectrum and the
//! complex detector response. Each series owns its sample buffer; buffer
//! lengths are fixed by the pipeline configuration before any exchange
//! begins, never by the protocol.

use serde::{Deserialize, Serialize};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

/// GPS timestamp of the first sample of a series
///
/// Layout matches the wire encoding used by the segment codecs: two
/// little-endian i32 fields, seconds then nanoseconds.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, AsBytes, FromBytes, FromZeroes, Serialize, Deserialize,
)]
pub struct GpsTime {
    pub seconds: i32,
    pub nanoseconds: i32,
}

impl GpsTime {
    pub fn new(seconds: i32, nanoseconds: i32) -> Self {
        Self {
            seconds,
            nanoseconds,
        }
    }
}

/// Single-precision complex sample (8 bytes, no padding)
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, AsBytes, FromBytes, FromZeroes, Serialize, Deserialize,
)]
pub struct Complex32 {
    pub re: f32,
    pub im: f32,
}

impl Complex32 {
    pub fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }
}

/// Raw detector output: uniformly sampled 16-bit strain counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrainTimeSeries {
    /// GPS time of the first sample
    pub epoch: GpsTime,
    /// Sampling interval in seconds
    pub delta_t: f64,
    /// Heterodyne base frequency in Hz (zero for raw data)
    pub f0: f64,
    pub data: Vec<i16>,
}

impl StrainTimeSeries {
    /// Allocate a zero-filled series of `len` samples
    pub fn with_len(len: usize) -> Self {
        Self {
            data: vec![0; len],
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One-sided power spectral density estimate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerSpectrum {
    /// GPS time of the data stretch the spectrum was estimated from
    pub epoch: GpsTime,
    /// Frequency of the first bin in Hz
    pub f0: f64,
    /// Bin spacing in Hz
    pub delta_f: f64,
    pub data: Vec<f32>,
}

impl PowerSpectrum {
    /// Allocate a zero-filled spectrum of `len` bins
    pub fn with_len(len: usize) -> Self {
        Self {
            data: vec![0.0; len],
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Complex detector response (transfer) function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseFunction {
    /// GPS time the calibration applies from
    pub epoch: GpsTime,
    /// Frequency of the first bin in Hz
    pub f0: f64,
    /// Bin spacing in Hz
    pub delta_f: f64,
    pub data: Vec<Complex32>,
}

impl ResponseFunction {
    /// Allocate a zero-filled response of `len` bins
    pub fn with_len(len: usize) -> Self {
        Self {
            data: vec![Complex32::default(); len],
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
