//! Period estimation modules
//!
//! Convert an onset list to a BPM value using the mean inter-onset interval.

pub mod tempo;

pub use tempo::{estimate_tempo, fold_tempo};
