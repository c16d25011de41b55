//! Windowed FFT frame analysis
//!
//! Splits a mono buffer into 50%-overlapping frames, applies a Hann window,
//! transforms each frame with a power-of-two FFT and keeps the dominant
//! spectral peaks as pitch classes.
//!
//! # Algorithm
//!
//! 1. `window_size = next_pow2(max(min_window_size, sample_rate * window_seconds))`
//! 2. `hop = window_size / 2`; frames start at `0, hop, 2*hop, ...` while inside the buffer
//! 3. Zero-pad the last frames, apply the Hann window, forward FFT
//! 4. Magnitudes of bins `0..window_size/2`, top-K local maxima
//! 5. `frequency = bin * sample_rate / window_size` -> pitch class

use super::peak_picking::find_spectral_peaks;
use super::{FramePeaks, SpectralPeak};
use crate::config::AnalysisConfig;
use crate::features::chord::{NoteSet, PitchClass};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// FFT size for a sample rate and window length
///
/// # Example
///
/// ```
/// use stratum_harmony::features::spectral::frames::window_size_for;
///
/// assert_eq!(window_size_for(44100, 0.75, 2048), 65536);
/// assert_eq!(window_size_for(8000, 0.1, 2048), 2048);
/// ```
pub fn window_size_for(sample_rate: u32, window_seconds: f32, min_window_size: usize) -> usize {
    let target = (sample_rate as f32 * window_seconds).floor();
    let target = if target.is_finite() && target > 0.0 { target as usize } else { 0 };
    target.max(min_window_size).max(2).next_power_of_two()
}

/// Hann window of length `n`
pub fn hann_window(n: usize) -> Vec<f32> {
    if n < 2 {
        return vec![1.0; n];
    }
    (0..n)
        .map(|i| {
            let t = 2.0 * std::f32::consts::PI * i as f32 / (n - 1) as f32;
            0.5 * (1.0 - t.cos())
        })
        .collect()
}

/// Frame analyzer bound to one sample rate and window configuration
///
/// The FFT plan and window are computed once and shared read-only, so a single
/// analyzer can serve frames from several threads.
pub struct SpectralAnalyzer {
    sample_rate: u32,
    window_size: usize,
    hop_size: usize,
    peaks_per_frame: usize,
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
}

impl SpectralAnalyzer {
    /// Build an analyzer for `sample_rate` (must be > 0)
    pub fn new(sample_rate: u32, config: &AnalysisConfig) -> Self {
        let window_size = window_size_for(sample_rate, config.window_seconds, config.min_window_size);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(window_size);

        log::debug!(
            "Spectral analyzer: {} Hz, window={} ({:.3}s), hop={}, peaks/frame={}",
            sample_rate,
            window_size,
            window_size as f32 / sample_rate.max(1) as f32,
            window_size / 2,
            config.peaks_per_frame
        );

        Self {
            sample_rate,
            window_size,
            hop_size: window_size / 2,
            peaks_per_frame: config.peaks_per_frame,
            window: hann_window(window_size),
            fft,
        }
    }

    /// FFT size in samples
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Distance between frame starts in samples
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Number of frames covering `num_samples`
    pub fn num_frames(&self, num_samples: usize) -> usize {
        num_samples.div_ceil(self.hop_size)
    }

    /// Analyze frame `index` of `samples`
    pub fn analyze_frame(&self, samples: &[f32], index: usize) -> FramePeaks {
        let start = index * self.hop_size;
        let end = (start + self.window_size).min(samples.len());

        let mut buffer: Vec<Complex<f32>> = vec![Complex::new(0.0, 0.0); self.window_size];
        if start < end {
            for (slot, (&x, &w)) in buffer
                .iter_mut()
                .zip(samples[start..end].iter().zip(self.window.iter()))
            {
                let x = if x.is_finite() { x } else { 0.0 };
                slot.re = x * w;
            }
        }

        self.fft.process(&mut buffer);

        let magnitudes: Vec<f32> = buffer[..self.window_size / 2]
            .iter()
            .map(|c| (c.re * c.re + c.im * c.im).sqrt())
            .collect();

        let peaks: Vec<SpectralPeak> = find_spectral_peaks(&magnitudes, self.peaks_per_frame)
            .into_iter()
            .map(|(bin, magnitude)| {
                let frequency = bin as f32 * self.sample_rate as f32 / self.window_size as f32;
                SpectralPeak {
                    bin,
                    frequency,
                    pitch_class: PitchClass::from_frequency(frequency),
                    magnitude,
                }
            })
            .collect();

        let notes: NoteSet = peaks.iter().map(|p| p.pitch_class).collect();
        let bass = peaks
            .iter()
            .min_by_key(|p| p.bin)
            .map(|p| p.pitch_class);

        FramePeaks {
            index,
            start_sample: start,
            peaks,
            notes,
            bass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_mix(freqs: &[f32], sample_rate: u32, seconds: f32) -> Vec<f32> {
        let n = (sample_rate as f32 * seconds) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                freqs
                    .iter()
                    .map(|f| (2.0 * std::f32::consts::PI * f * t).sin())
                    .sum::<f32>()
                    / freqs.len() as f32
            })
            .collect()
    }

    #[test]
    fn test_window_size() {
        assert_eq!(window_size_for(44100, 0.75, 2048), 65536);
        assert_eq!(window_size_for(22050, 0.75, 2048), 32768);
        assert_eq!(window_size_for(1000, 0.75, 2048), 2048);
        assert_eq!(window_size_for(0, 0.75, 2048), 2048);
    }

    #[test]
    fn test_hann_window_shape() {
        let w = hann_window(5);
        assert!(w[0].abs() < 1e-6);
        assert!((w[2] - 1.0).abs() < 1e-6);
        assert!(w[4].abs() < 1e-6);
    }

    #[test]
    fn test_num_frames() {
        let analyzer = SpectralAnalyzer::new(8000, &AnalysisConfig::default());
        // 8000 * 0.75 = 6000 -> 8192 window, 4096 hop
        assert_eq!(analyzer.window_size(), 8192);
        assert_eq!(analyzer.num_frames(0), 0);
        assert_eq!(analyzer.num_frames(1), 1);
        assert_eq!(analyzer.num_frames(4096), 1);
        assert_eq!(analyzer.num_frames(4097), 2);
    }

    #[test]
    fn test_single_tone_pitch_class() {
        let sample_rate = 22050;
        let samples = sine_mix(&[440.0], sample_rate, 1.0);
        let analyzer = SpectralAnalyzer::new(sample_rate, &AnalysisConfig::default());
        let frame = analyzer.analyze_frame(&samples, 0);

        assert!(!frame.peaks.is_empty());
        assert_eq!(frame.peaks[0].pitch_class.name(), "A");
        assert!((frame.peaks[0].frequency - 440.0).abs() < 3.0);
    }

    #[test]
    fn test_triad_pitch_classes() {
        let sample_rate = 22050;
        // C4, E4, G4
        let samples = sine_mix(&[261.63, 329.63, 392.0], sample_rate, 1.0);
        let analyzer = SpectralAnalyzer::new(sample_rate, &AnalysisConfig::default());
        let frame = analyzer.analyze_frame(&samples, 0);

        for pc in [0u8, 4, 7] {
            assert!(
                frame.notes.contains(PitchClass::new(pc as i32)),
                "missing pitch class {} in {}",
                pc,
                frame.notes.label()
            );
        }
        assert_eq!(frame.bass, Some(PitchClass::new(0)));
    }

    #[test]
    fn test_silent_frame_has_no_peaks() {
        let samples = vec![0.0f32; 22050];
        let analyzer = SpectralAnalyzer::new(22050, &AnalysisConfig::default());
        let frame = analyzer.analyze_frame(&samples, 0);
        assert!(frame.peaks.is_empty());
        assert!(frame.notes.is_empty());
        assert_eq!(frame.bass, None);
    }

    #[test]
    fn test_trailing_frame_is_zero_padded() {
        let sample_rate = 22050;
        let samples = sine_mix(&[440.0], sample_rate, 1.0);
        let analyzer = SpectralAnalyzer::new(sample_rate, &AnalysisConfig::default());
        let last = analyzer.num_frames(samples.len()) - 1;
        let frame = analyzer.analyze_frame(&samples, last);
        assert_eq!(frame.start_sample, last * analyzer.hop_size());
        assert!(frame.peaks.len() <= 6);
    }
}
