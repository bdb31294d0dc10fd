//! Composite data segment
//!
//! A [`DataSegment`] is the unit of input the coordinator hands a worker:
//! four header scalars describing the state of the instrument plus three
//! independently typed series. The segment owns its series; the series own
//! their sample buffers. Nothing here touches the wire — the codecs in
//! `libs/codec` define how a segment travels.

use crate::series::{PowerSpectrum, ResponseFunction, StrainTimeSeries};
use serde::{Deserialize, Serialize};

/// Header scalars plus the three nested series of one analysis segment
///
/// Both peers of an exchange must pre-allocate the three series with
/// matching lengths before transferring a segment; the protocol performs no
/// length negotiation for nested series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSegment {
    /// Last segment of the run; the worker should drain and stop
    pub end_of_data: bool,
    /// Calibration changed since the previous segment
    pub new_calibration: bool,
    /// Interferometer re-acquired lock since the previous segment
    pub new_lock: bool,
    /// Sequence number of this segment within the run
    pub number: u32,
    /// Raw strain samples
    pub strain: StrainTimeSeries,
    /// Noise power spectrum of the surrounding data
    pub spectrum: PowerSpectrum,
    /// Calibration response function
    pub response: ResponseFunction,
}

impl DataSegment {
    /// Allocate a segment whose series hold `strain_len`, `spectrum_len` and
    /// `response_len` zeroed samples
    ///
    /// Use the same lengths on both peers; they are the out-of-band contract
    /// the segment transfer relies on.
    pub fn with_lengths(strain_len: usize, spectrum_len: usize, response_len: usize) -> Self {
        Self {
            strain: StrainTimeSeries::with_len(strain_len),
            spectrum: PowerSpectrum::with_len(spectrum_len),
            response: ResponseFunction::with_len(response_len),
            ..Self::default()
        }
    }
}
