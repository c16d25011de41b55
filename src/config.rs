//! Configuration parameters for audio analysis

use crate::error::AnalysisError;
use crate::features::chord::DetectionSettings;

/// Analysis configuration parameters
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    // Spectral frames
    /// Analysis window length in seconds (default: 0.75)
    /// The FFT size is the next power of two above this length; frames overlap by 50%.
    pub window_seconds: f32,

    /// Smallest FFT size in samples (default: 2048)
    pub min_window_size: usize,

    /// Number of spectral peaks kept per frame (default: 6)
    pub peaks_per_frame: usize,

    // Tempo estimation
    /// Energy envelope frame length in seconds (default: 0.05)
    pub envelope_frame_seconds: f32,

    /// Smallest envelope frame in samples (default: 64)
    pub min_envelope_frame: usize,

    /// Peak envelope RMS below which the signal counts as silent (default: 1e-4)
    pub silence_threshold: f32,

    /// Onset threshold as a fraction of the strongest onset (default: 0.2)
    pub onset_threshold_ratio: f32,

    /// Absolute floor for the onset threshold (default: 0.01)
    pub min_onset_threshold: f32,

    /// Shortest accepted mean inter-onset interval in seconds (default: 0.2)
    pub min_beat_interval: f32,

    /// Longest accepted mean inter-onset interval in seconds (default: 3.0)
    pub max_beat_interval: f32,

    /// Tempos below this are doubled once (default: 80.0)
    pub fold_min_bpm: f32,

    /// Tempos above this are halved once (default: 180.0)
    pub fold_max_bpm: f32,

    // Timeline
    /// Largest gap in seconds between two equal labels that still merges (default: 0.05)
    pub merge_gap_seconds: f32,

    /// Interpolation weight when blending merged confidences (default: 0.5)
    pub merge_blend: f32,

    /// Confidence of the key-labelled segment emitted for silent input (default: 0.4)
    pub fallback_confidence: f32,

    /// Chord matcher settings used for every audio frame (default: lenient)
    pub frame_settings: DetectionSettings,

    /// Analyze frames on the rayon pool (default: true, needs the `parallel` feature)
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_seconds: 0.75,
            min_window_size: 2048,
            peaks_per_frame: 6,
            envelope_frame_seconds: 0.05,
            min_envelope_frame: 64,
            silence_threshold: 1e-4,
            onset_threshold_ratio: 0.2,
            min_onset_threshold: 0.01,
            min_beat_interval: 0.2,
            max_beat_interval: 3.0,
            fold_min_bpm: 80.0,
            fold_max_bpm: 180.0,
            merge_gap_seconds: 0.05,
            merge_blend: 0.5,
            fallback_confidence: 0.4,
            frame_settings: DetectionSettings::default(),
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    /// Check that every parameter is inside its usable range
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        fn positive(name: &str, value: f32) -> Result<(), AnalysisError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(AnalysisError::InvalidInput(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )))
            }
        }

        fn unit(name: &str, value: f32) -> Result<(), AnalysisError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(AnalysisError::InvalidInput(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )))
            }
        }

        positive("window_seconds", self.window_seconds)?;
        positive("envelope_frame_seconds", self.envelope_frame_seconds)?;
        positive("min_beat_interval", self.min_beat_interval)?;
        positive("max_beat_interval", self.max_beat_interval)?;
        positive("fold_min_bpm", self.fold_min_bpm)?;
        positive("fold_max_bpm", self.fold_max_bpm)?;
        unit("onset_threshold_ratio", self.onset_threshold_ratio)?;
        unit("merge_blend", self.merge_blend)?;
        unit("fallback_confidence", self.fallback_confidence)?;

        if self.min_window_size < 2 {
            return Err(AnalysisError::InvalidInput(format!(
                "min_window_size must be at least 2, got {}",
                self.min_window_size
            )));
        }
        if self.peaks_per_frame == 0 {
            return Err(AnalysisError::InvalidInput(
                "peaks_per_frame must be > 0".to_string(),
            ));
        }
        if self.min_envelope_frame == 0 {
            return Err(AnalysisError::InvalidInput(
                "min_envelope_frame must be > 0".to_string(),
            ));
        }
        if !(self.silence_threshold >= 0.0) || !(self.min_onset_threshold >= 0.0) {
            return Err(AnalysisError::InvalidInput(
                "silence and onset thresholds must be non-negative".to_string(),
            ));
        }
        if self.min_beat_interval >= self.max_beat_interval {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid beat interval range: [{:.2}, {:.2}]",
                self.min_beat_interval, self.max_beat_interval
            )));
        }
        if self.fold_min_bpm >= self.fold_max_bpm {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid tempo fold range: [{:.1}, {:.1}]",
                self.fold_min_bpm, self.fold_max_bpm
            )));
        }
        if !(self.merge_gap_seconds >= 0.0) {
            return Err(AnalysisError::InvalidInput(format!(
                "merge_gap_seconds must be non-negative, got {}",
                self.merge_gap_seconds
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_fields() {
        let config = AnalysisConfig {
            window_seconds: 0.0,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AnalysisConfig {
            fold_min_bpm: 200.0,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AnalysisConfig {
            merge_blend: 1.5,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AnalysisConfig {
            peaks_per_frame: 0,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
