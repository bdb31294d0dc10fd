//! # Chirpsearch Type System
//!
//! ## Purpose
//!
//! Pure data structures shared by the coordinator and worker processes of the
//! search pipeline. This crate contains no protocol logic and no transport
//! logic:
//! - Fixed-size wire records (bank parameters, template entries, candidate
//!   events) with zero-copy byte views
//! - Sampled series owned by the pipeline (strain time series, power
//!   spectrum, response function)
//! - The composite [`DataSegment`] moved between peers during a search
//! - The [`ObjectKind`] registry used to tag exchange sessions
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → libs/codec → libs/exchange
//!     ↑            ↓             ↓
//! Pure Data    Wire Rules    Sessions and
//! Structures   Encoding      Transport
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Encoding/decoding rules (belongs in libs/codec)
//! - Session or transport logic (belongs in libs/exchange)
//! - Numerical search algorithms (belong to the surrounding pipeline)

pub mod records;
pub mod segment;
pub mod series;

pub use records::{BankParams, CandidateEvent, ObjectKind, TemplateEntry, WireRecord};
pub use segment::DataSegment;
pub use series::{Complex32, GpsTime, PowerSpectrum, ResponseFunction, StrainTimeSeries};
