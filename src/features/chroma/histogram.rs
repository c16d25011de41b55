//! Pitch-class energy histogram
//!
//! Accumulates spectral peak magnitudes into 12 pitch-class bins across all
//! frames, then L1-normalizes the result for key estimation.

use crate::features::chord::PitchClass;
use crate::features::spectral::FramePeaks;
use serde::{Deserialize, Serialize};

/// Totals at or below this are treated as zero energy
const EPSILON: f32 = 1e-10;

/// Magnitude-weighted pitch-class histogram
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PitchClassHistogram {
    bins: [f32; 12],
}

impl PitchClassHistogram {
    /// Empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `magnitude` to the bin of `pc`
    ///
    /// Negative or non-finite magnitudes are ignored.
    pub fn accumulate(&mut self, pc: PitchClass, magnitude: f32) {
        if magnitude.is_finite() && magnitude > 0.0 {
            self.bins[pc.value() as usize] += magnitude;
        }
    }

    /// Add every kept peak of a frame
    pub fn accumulate_frame(&mut self, frame: &FramePeaks) {
        for peak in &frame.peaks {
            self.accumulate(peak.pitch_class, peak.magnitude);
        }
    }

    /// Raw bin values
    pub fn bins(&self) -> &[f32; 12] {
        &self.bins
    }

    /// Sum of all bins
    pub fn total(&self) -> f32 {
        self.bins.iter().sum()
    }

    /// L1-normalized bins, or `None` when the total energy is ~0
    pub fn normalized(&self) -> Option<[f32; 12]> {
        let total = self.total();
        if !total.is_finite() || total <= EPSILON {
            return None;
        }
        let mut out = self.bins;
        for x in out.iter_mut() {
            *x /= total;
        }
        Some(out)
    }
}

impl FromIterator<(PitchClass, f32)> for PitchClassHistogram {
    fn from_iter<I: IntoIterator<Item = (PitchClass, f32)>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for (pc, magnitude) in iter {
            histogram.accumulate(pc, magnitude);
        }
        histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_and_normalize() {
        let histogram: PitchClassHistogram = [
            (PitchClass::new(0), 2.0),
            (PitchClass::new(4), 1.0),
            (PitchClass::new(0), 1.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(histogram.bins()[0], 3.0);
        assert_eq!(histogram.total(), 4.0);

        let normalized = histogram.normalized().unwrap();
        assert!((normalized[0] - 0.75).abs() < 1e-6);
        assert!((normalized[4] - 0.25).abs() < 1e-6);
        assert!((normalized.iter().sum::<f32>() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_histogram_skips_normalization() {
        assert!(PitchClassHistogram::new().normalized().is_none());
    }

    #[test]
    fn test_ignores_invalid_magnitudes() {
        let mut histogram = PitchClassHistogram::new();
        histogram.accumulate(PitchClass::new(3), f32::NAN);
        histogram.accumulate(PitchClass::new(3), -1.0);
        histogram.accumulate(PitchClass::new(3), f32::INFINITY);
        assert_eq!(histogram.total(), 0.0);
    }
}
