//! Spectral frame analysis
//!
//! Turns windowed audio into per-frame pitch-class observations:
//! - Framing, Hann windowing and FFT
//! - Spectral peak picking

pub mod frames;
pub mod peak_picking;

pub use frames::SpectralAnalyzer;

use crate::features::chord::{NoteSet, PitchClass};

/// One dominant spectral peak
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralPeak {
    /// FFT bin index
    pub bin: usize,
    /// Bin centre frequency in Hz
    pub frequency: f32,
    /// Nearest equal-tempered pitch class
    pub pitch_class: PitchClass,
    /// Spectral magnitude
    pub magnitude: f32,
}

/// Pitch-class observations for one analysis frame
#[derive(Debug, Clone, PartialEq)]
pub struct FramePeaks {
    /// Frame index (0-based)
    pub index: usize,
    /// First sample of the frame
    pub start_sample: usize,
    /// Kept peaks, strongest first
    pub peaks: Vec<SpectralPeak>,
    /// Distinct pitch classes of the kept peaks
    pub notes: NoteSet,
    /// Pitch class of the lowest-frequency kept peak
    pub bass: Option<PitchClass>,
}
