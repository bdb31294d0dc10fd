//! Fixed-size wire records
//!
//! A wire record is a flat, pointer-free value type that crosses the process
//! boundary as a single opaque byte block of statically known size. Field
//! ordering within each record is chosen so the `#[repr(C)]` layout has no
//! padding (wider fields first); the size tests below pin this down.
//!
//! The exchange protocol never interprets record fields. It only moves the
//! block, so every record here derives the zerocopy traits and advertises
//! its [`ObjectKind`] tag for session bookkeeping on the caller side.

use crate::series::GpsTime;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

/// Registry of exchangeable object kinds
///
/// The value is the `object_type` tag carried by the negotiation control
/// message. The tag is opaque to the protocol itself; both peers simply have
/// to agree on what a given session moves.
#[repr(i32)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
pub enum ObjectKind {
    /// Template bank generation input ([`BankParams`])
    BankParams = 1,
    /// One template bank entry ([`TemplateEntry`])
    Template = 2,
    /// One filter-output candidate ([`CandidateEvent`])
    CandidateEvent = 3,
    /// One composite data segment ([`crate::DataSegment`])
    DataSegment = 4,
}

/// A fixed-size record transferable as one flat byte block
///
/// Implementors must be `#[repr(C)]` with no padding; the zerocopy bounds
/// make any padded layout a compile error.
pub trait WireRecord: AsBytes + FromBytes + Sized {
    /// Object-kind tag callers use when negotiating a session for this record
    const KIND: ObjectKind;

    /// Exact block size on the wire
    const SIZE: usize = std::mem::size_of::<Self>();
}

/// Search-space input for template bank generation (48 bytes)
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, AsBytes, FromBytes, FromZeroes, Serialize, Deserialize,
)]
pub struct BankParams {
    /// Smallest component mass in solar masses
    pub mass_min: f64,
    /// Largest component mass in solar masses
    pub mass_max: f64,
    /// Low-frequency cutoff in Hz
    pub f_lower: f64,
    /// High-frequency cutoff in Hz
    pub f_upper: f64,
    /// Minimal match of the bank lattice
    pub min_match: f64,
    /// Coarse-grid points per dimension
    pub num_coarse: u32,
    pub _reserved: u32,
}

impl WireRecord for BankParams {
    const KIND: ObjectKind = ObjectKind::BankParams;
}

/// One entry of a template bank (64 bytes)
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, AsBytes, FromBytes, FromZeroes, Serialize, Deserialize,
)]
pub struct TemplateEntry {
    /// First component mass in solar masses
    pub mass1: f64,
    /// Second component mass in solar masses
    pub mass2: f64,
    /// Chirp mass in solar masses
    pub chirp_mass: f64,
    /// Symmetric mass ratio
    pub eta: f64,
    /// Newtonian chirp time in seconds
    pub tau0: f64,
    /// 1.5 post-Newtonian chirp time in seconds
    pub tau3: f64,
    /// Termination frequency in Hz
    pub f_final: f64,
    /// Position of this entry in the bank
    pub template_id: u32,
    pub _reserved: u32,
}

impl WireRecord for TemplateEntry {
    const KIND: ObjectKind = ObjectKind::Template;
}

/// One candidate produced by the matched filter (40 bytes)
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, AsBytes, FromBytes, FromZeroes, Serialize, Deserialize,
)]
pub struct CandidateEvent {
    /// Chirp mass of the matching template in solar masses
    pub chirp_mass: f64,
    /// GPS time of coalescence
    pub end_time: GpsTime,
    /// Bank position of the matching template
    pub template_id: u32,
    /// Segment the candidate was found in
    pub segment_number: u32,
    /// Signal-to-noise ratio at the peak
    pub snr: f32,
    /// Chi-squared veto statistic
    pub chisq: f32,
    /// Template normalization
    pub sigma: f32,
    /// Effective distance in megaparsecs
    pub effective_distance: f32,
}

impl WireRecord for CandidateEvent {
    const KIND: ObjectKind = ObjectKind::CandidateEvent;
}
