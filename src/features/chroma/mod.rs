//! Pitch-class aggregation
//!
//! Accumulates per-frame spectral peaks into a 12-bin pitch-class distribution
//! used for key estimation.

pub mod histogram;

pub use histogram::PitchClassHistogram;
