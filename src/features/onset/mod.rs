//! Onset detection modules
//!
//! Energy flux onset detection over a non-overlapping RMS envelope.

pub mod energy_flux;

pub use energy_flux::{detect_onsets, energy_envelope, onset_strength};
