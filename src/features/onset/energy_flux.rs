//! Energy flux onset detection
//!
//! Detects onsets by finding peaks in the frame-by-frame energy derivative.
//!
//! Algorithm:
//! 1. Divide audio into non-overlapping frames of `frame_size` samples
//! 2. Compute RMS energy per frame
//! 3. Compute energy derivative (flux): E_flux[n] = max(0, E[n] - E[n-1])
//! 4. Threshold and peak-pick to find onsets
//!
//! # Example
//!
//! ```
//! use stratum_harmony::features::onset::energy_flux::{detect_onsets, energy_envelope, onset_strength};
//!
//! let mut samples = vec![0.0f32; 4410];
//! for s in &mut samples[2205..2400] {
//!     *s = 0.8;
//! }
//! let envelope = energy_envelope(&samples, 441);
//! let flux = onset_strength(&envelope);
//! let onsets = detect_onsets(&flux, 0.2, 0.01);
//! assert_eq!(onsets, vec![5]);
//! ```

/// Compute the RMS energy envelope
///
/// # Reference
///
/// Bello, J. P., Daudet, L., Abdallah, S., Duxbury, C., Davies, M., & Sandler, M. B. (2005).
/// A Tutorial on Onset Detection in Music Signals.
/// *IEEE Transactions on Speech and Audio Processing*, 13(5), 1035-1047.
///
/// # Arguments
///
/// * `samples` - Audio samples (mono, normalized to [-1.0, 1.0])
/// * `frame_size` - Frame length in samples; frames do not overlap
///
/// # Returns
///
/// One RMS value per frame, covering the whole buffer. The final short frame
/// is still divided by the full `frame_size`. Non-finite samples count as 0.
pub fn energy_envelope(samples: &[f32], frame_size: usize) -> Vec<f32> {
    if samples.is_empty() || frame_size == 0 {
        return Vec::new();
    }

    samples
        .chunks(frame_size)
        .map(|frame| {
            let sum_sq: f32 = frame
                .iter()
                .map(|&x| if x.is_finite() { x * x } else { 0.0 })
                .sum();
            (sum_sq / frame_size as f32).sqrt()
        })
        .collect()
}

/// Half-wave rectified first difference of the envelope
///
/// `strength[0]` is 0; `strength[n] = max(0, E[n] - E[n-1])`.
pub fn onset_strength(envelope: &[f32]) -> Vec<f32> {
    if envelope.is_empty() {
        return Vec::new();
    }

    let mut flux = Vec::with_capacity(envelope.len());
    flux.push(0.0);
    flux.extend(envelope.windows(2).map(|w| (w[1] - w[0]).max(0.0)));
    flux
}

/// Pick onset frames from an onset strength curve
///
/// An onset is an index in `1..len-1` strictly greater than both neighbours and
/// at least `max(min_threshold, threshold_ratio * max(strength))`.
///
/// # Returns
///
/// Frame indices of onsets, in ascending order
pub fn detect_onsets(strength: &[f32], threshold_ratio: f32, min_threshold: f32) -> Vec<usize> {
    if strength.len() < 3 {
        return Vec::new();
    }

    let max_flux = strength.iter().copied().fold(0.0f32, f32::max);
    let threshold = min_threshold.max(threshold_ratio * max_flux);

    let onsets: Vec<usize> = (1..strength.len() - 1)
        .filter(|&i| {
            let flux = strength[i];
            flux > strength[i - 1] && flux > strength[i + 1] && flux >= threshold
        })
        .collect();

    log::debug!(
        "Energy flux: max={:.6}, threshold={:.6}, {} onsets",
        max_flux,
        threshold,
        onsets.len()
    );

    onsets
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Generate a synthetic kick pattern at specified BPM
    fn generate_kick_pattern(
        duration_seconds: f32,
        bpm: f32,
        sample_rate: f32,
        kick_duration_ms: f32,
    ) -> Vec<f32> {
        let num_samples = (duration_seconds * sample_rate) as usize;
        let mut samples = vec![0.0f32; num_samples];

        let beat_interval = (60.0 / bpm * sample_rate) as usize;
        let kick_samples = (kick_duration_ms / 1000.0 * sample_rate) as usize;

        let mut pos = 0;
        while pos < num_samples {
            let end = (pos + kick_samples).min(num_samples);
            for (i, s) in samples[pos..end].iter_mut().enumerate() {
                let t = i as f32 / kick_samples as f32;
                *s = (-t * 5.0).exp() * 0.8;
            }
            pos += beat_interval;
        }

        samples
    }

    #[test]
    fn test_envelope_covers_whole_buffer() {
        let samples = vec![1.0f32; 250];
        let envelope = energy_envelope(&samples, 100);
        assert_eq!(envelope.len(), 3);
        assert!((envelope[0] - 1.0).abs() < 1e-6);
        // Short final frame divides by the full frame length
        assert!((envelope[2] - 0.5f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_envelope_ignores_non_finite() {
        let samples = vec![f32::NAN, f32::INFINITY, 0.0, 0.0];
        let envelope = energy_envelope(&samples, 4);
        assert_eq!(envelope, vec![0.0]);
    }

    #[test]
    fn test_onset_strength_is_rectified() {
        let flux = onset_strength(&[0.0, 0.5, 0.2, 0.9]);
        assert_eq!(flux.len(), 4);
        assert_eq!(flux[0], 0.0);
        assert!((flux[1] - 0.5).abs() < 1e-6);
        assert_eq!(flux[2], 0.0);
        assert!((flux[3] - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_kick_pattern_120_bpm() {
        let sample_rate = 44100.0;
        let samples = generate_kick_pattern(4.0, 120.0, sample_rate, 100.0);
        let frame = (sample_rate * 0.05) as usize;

        let flux = onset_strength(&energy_envelope(&samples, frame));
        let onsets = detect_onsets(&flux, 0.2, 0.01);

        // Kick at t=0 has no preceding frame; the remaining seven are found
        assert_eq!(onsets.len(), 7, "onsets: {:?}", onsets);
        for pair in onsets.windows(2) {
            assert_eq!(pair[1] - pair[0], 10);
        }
    }

    #[test]
    fn test_silent_audio() {
        let samples = vec![0.0f32; 44100];
        let flux = onset_strength(&energy_envelope(&samples, 2205));
        assert!(detect_onsets(&flux, 0.2, 0.01).is_empty());
    }

    #[test]
    fn test_empty_and_short_inputs() {
        assert!(energy_envelope(&[], 64).is_empty());
        assert!(energy_envelope(&[0.5; 10], 0).is_empty());
        assert!(onset_strength(&[]).is_empty());
        assert!(detect_onsets(&[0.0, 1.0], 0.2, 0.01).is_empty());
    }

    #[test]
    fn test_threshold_floor() {
        // A tiny bump below the absolute floor is not an onset
        let flux = vec![0.0, 0.005, 0.0, 0.0];
        assert!(detect_onsets(&flux, 0.2, 0.01).is_empty());
        assert_eq!(detect_onsets(&flux, 0.2, 0.001), vec![1]);
    }
}
