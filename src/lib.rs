//! # Stratum Harmony
//!
//! A harmonic analysis engine that extracts chord identity, key and tempo from
//! live note input or a decoded audio buffer.
//!
//! ## Features
//!
//! - **Chord Matching**: Template scoring over a 23-chord catalog with inversion/bass detection
//! - **Key Detection**: Pitch-class histogram correlated with Krumhansl-Kessler profiles
//! - **Tempo Estimation**: Energy-flux onsets and mean inter-onset interval
//! - **Chord Timeline**: Per-frame chord labels merged into contiguous segments
//!
//! ## Quick Start
//!
//! ```
//! use stratum_harmony::{match_chords, DetectionSettings, NoteSet, PitchClass};
//!
//! let notes: NoteSet = [0u8, 4, 7].iter().collect();
//! let candidates = match_chords(notes, PitchClass::new(4), &DetectionSettings::default());
//! assert_eq!(candidates[0].name, "CMajor/E");
//! ```
//!
//! ```no_run
//! use stratum_harmony::analyze;
//!
//! let samples: Vec<f32> = vec![]; // mono, f32, normalized
//! let result = analyze(&samples, 44100);
//!
//! println!("Tempo: {:.1} BPM", result.tempo_bpm());
//! println!("Key: {}", result.key.label());
//! for segment in &result.segments {
//!     println!("{:6.2}-{:6.2} {}", segment.start, segment.end, segment.label);
//! }
//! ```
//!
//! ## Architecture
//!
//! The analysis pipeline follows this flow:
//!
//! ```text
//! Audio Input → Spectral Frames → Chord Matching → Timeline
//!                      └→ Pitch-Class Histogram → Key
//! Audio Input → Energy Envelope → Onsets → Tempo
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

use std::sync::atomic::{AtomicBool, Ordering};

use analysis::timeline::{apply_fallback, frame_segment, merge_segments};
use features::chroma::PitchClassHistogram;
use features::key::{estimate_key, KeyTemplates};
use features::period::estimate_tempo;
use features::spectral::{FramePeaks, SpectralAnalyzer};

// Re-export main types
pub use analysis::result::{AnalysisMetadata, AnalysisResult, Key, Mode, Segment, TempoEstimate};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use features::chord::{
    detect_chords_from_midi, fretboard_to_midi, match_chords, ChordCandidate, DetectionSettings,
    FretPosition, NoteSet, PitchClass, Strictness,
};

/// Main analysis function
///
/// Analyzes a mono buffer with the default configuration and returns the
/// tempo, key and chord timeline.
///
/// Never fails: empty or silent buffers and a zero sample rate produce an
/// undetermined tempo, C major and a single key-labelled segment.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
///
/// # Example
///
/// ```
/// use stratum_harmony::analyze;
///
/// let samples = vec![0.0f32; 44100 * 2]; // 2 seconds of silence
/// let result = analyze(&samples, 44100);
/// assert_eq!(result.tempo_bpm(), 0.0);
/// assert_eq!(result.segments.len(), 1);
/// assert_eq!(result.segments[0].label, "C major");
/// ```
pub fn analyze(samples: &[f32], sample_rate: u32) -> AnalysisResult {
    let config = AnalysisConfig::default();
    match run_analysis(samples, sample_rate, &config, None) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("Analysis failed ({}), returning fallback result", e);
            fallback_result(samples.len(), sample_rate, &config)
        }
    }
}

/// Analyze with a custom configuration
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `config` fails validation.
pub fn analyze_with_config(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    config.validate()?;
    run_analysis(samples, sample_rate, config, None)
}

/// Analyze with a cancellation flag
///
/// The flag is checked between frames; once it reads `true` the analysis stops.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for an invalid `config` and
/// `AnalysisError::Cancelled` when `cancel` is set.
pub fn analyze_with_cancel(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
    cancel: &AtomicBool,
) -> Result<AnalysisResult, AnalysisError> {
    config.validate()?;
    run_analysis(samples, sample_rate, config, Some(cancel))
}

fn run_analysis(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
    cancel: Option<&AtomicBool>,
) -> Result<AnalysisResult, AnalysisError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!("Starting audio analysis: {} samples at {} Hz", samples.len(), sample_rate);

    check_cancelled(cancel)?;

    let duration = duration_seconds(samples.len(), sample_rate);

    if sample_rate == 0 {
        log::warn!("Sample rate is 0, treating input as a degenerate signal");
    } else if samples.is_empty() {
        log::warn!("Empty audio buffer");
    }

    let (frames, window_size) = if sample_rate == 0 || samples.is_empty() {
        (Vec::new(), 0)
    } else {
        let analyzer = SpectralAnalyzer::new(sample_rate, config);
        let frames = analyze_frames(&analyzer, samples, sample_rate, duration, config, cancel)?;
        (frames, analyzer.window_size())
    };

    check_cancelled(cancel)?;

    // Key from the pitch-class energy of every frame
    let mut histogram = PitchClassHistogram::new();
    for (peaks, _) in &frames {
        histogram.accumulate_frame(peaks);
    }
    let key_result = estimate_key(&histogram, &KeyTemplates::new());

    let tempo = estimate_tempo(samples, sample_rate, config);

    let frame_count = frames.len();
    let segments = merge_segments(
        frames.into_iter().map(|(_, segment)| segment).collect(),
        config.merge_gap_seconds,
        config.merge_blend,
    );
    let segments = apply_fallback(segments, key_result.key, duration, config.fallback_confidence);

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!(
        "Analysis complete: {} frames, {} segments, key {}, tempo {:.2} BPM in {:.1}ms",
        frame_count,
        segments.len(),
        key_result.key.label(),
        tempo.bpm(),
        processing_time_ms
    );

    Ok(AnalysisResult {
        tempo,
        key: key_result.key,
        segments,
        metadata: AnalysisMetadata {
            duration_seconds: duration,
            sample_rate,
            frame_count,
            window_size,
            key_confidence: key_result.confidence,
            processing_time_ms,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}

/// Spectral peaks and chord segment for every frame, in frame order
fn analyze_frames(
    analyzer: &SpectralAnalyzer,
    samples: &[f32],
    sample_rate: u32,
    duration: f32,
    config: &AnalysisConfig,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<(FramePeaks, Segment)>, AnalysisError> {
    let num_frames = analyzer.num_frames(samples.len());
    let hop_size = analyzer.hop_size();

    let process = |index: usize| -> Result<(FramePeaks, Segment), AnalysisError> {
        check_cancelled(cancel)?;
        let peaks = analyzer.analyze_frame(samples, index);
        let segment = frame_segment(&peaks, hop_size, sample_rate, duration, &config.frame_settings);
        Ok((peaks, segment))
    };

    #[cfg(feature = "parallel")]
    {
        if config.parallel {
            use rayon::prelude::*;
            log::debug!("Analyzing {} frames in parallel", num_frames);
            return (0..num_frames).into_par_iter().map(process).collect();
        }
    }

    log::debug!("Analyzing {} frames sequentially", num_frames);
    (0..num_frames).map(process).collect()
}

fn check_cancelled(cancel: Option<&AtomicBool>) -> Result<(), AnalysisError> {
    match cancel {
        Some(flag) if flag.load(Ordering::Relaxed) => Err(AnalysisError::Cancelled),
        _ => Ok(()),
    }
}

fn duration_seconds(num_samples: usize, sample_rate: u32) -> f32 {
    if sample_rate == 0 {
        0.0
    } else {
        num_samples as f32 / sample_rate as f32
    }
}

fn fallback_result(num_samples: usize, sample_rate: u32, config: &AnalysisConfig) -> AnalysisResult {
    let duration = duration_seconds(num_samples, sample_rate);
    let key = Key::default();
    AnalysisResult {
        tempo: TempoEstimate::Undetermined,
        key,
        segments: apply_fallback(Vec::new(), key, duration, config.fallback_confidence),
        metadata: AnalysisMetadata {
            duration_seconds: duration,
            sample_rate,
            frame_count: 0,
            window_size: 0,
            key_confidence: 0.0,
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sample_rate_is_degenerate() {
        let result = analyze(&[0.3; 1000], 0);
        assert_eq!(result.tempo, TempoEstimate::Undetermined);
        assert_eq!(result.key, Key::Major(0));
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].start, 0.0);
        assert_eq!(result.segments[0].end, 1.0);
        assert_eq!(result.metadata.frame_count, 0);
    }

    #[test]
    fn test_empty_buffer() {
        let result = analyze(&[], 44100);
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].end, 1.0);
        assert!((result.segments[0].confidence - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AnalysisConfig {
            peaks_per_frame: 0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            analyze_with_config(&[0.0; 100], 44100, &config),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_cancel_flag() {
        let cancel = AtomicBool::new(true);
        let result = analyze_with_cancel(&[0.0; 44100], 44100, &AnalysisConfig::default(), &cancel);
        assert_eq!(result, Err(AnalysisError::Cancelled));
    }
}
