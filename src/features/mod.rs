//! Feature extraction modules
//!
//! This module contains all feature extraction algorithms:
//! - Spectral frame analysis (FFT peaks per frame)
//! - Pitch-class aggregation
//! - Chord template matching
//! - Key detection
//! - Onset detection and tempo estimation

pub mod chord;
pub mod chroma;
pub mod key;
pub mod onset;
pub mod period;
pub mod spectral;
