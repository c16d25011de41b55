//! Onset-interval tempo estimation
//!
//! Converts the energy-flux onsets of a whole buffer into a single BPM value.
//!
//! Algorithm:
//! 1. RMS envelope over non-overlapping frames of `max(min_frame, sr * frame_seconds)`
//! 2. Bail out as `Undetermined` when the loudest frame is below the silence threshold
//! 3. Onset strength and peak picking (see [`crate::features::onset::energy_flux`])
//! 4. Mean inter-onset interval, clamped, then `bpm = 60 / interval`
//! 5. A single octave fold into `[fold_min_bpm, fold_max_bpm]`

use crate::analysis::result::TempoEstimate;
use crate::config::AnalysisConfig;
use crate::features::onset::energy_flux::{detect_onsets, energy_envelope, onset_strength};

/// Estimate the tempo of a mono buffer
///
/// # Arguments
///
/// * `samples` - Audio samples (mono)
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Envelope, onset and fold parameters
///
/// # Returns
///
/// `TempoEstimate::Bpm` when at least two onsets are found, otherwise
/// `TempoEstimate::Undetermined`
///
/// # Example
///
/// ```
/// use stratum_harmony::features::period::tempo::estimate_tempo;
/// use stratum_harmony::{AnalysisConfig, TempoEstimate};
///
/// let silence = vec![0.0f32; 44100];
/// let tempo = estimate_tempo(&silence, 44100, &AnalysisConfig::default());
/// assert_eq!(tempo, TempoEstimate::Undetermined);
/// ```
pub fn estimate_tempo(samples: &[f32], sample_rate: u32, config: &AnalysisConfig) -> TempoEstimate {
    if samples.is_empty() || sample_rate == 0 {
        return TempoEstimate::Undetermined;
    }

    let frame_size = envelope_frame_size(sample_rate, config);
    let hop_seconds = frame_size as f32 / sample_rate as f32;

    log::debug!(
        "Estimating tempo: {} samples at {} Hz, envelope frame={} samples",
        samples.len(),
        sample_rate,
        frame_size
    );

    let envelope = energy_envelope(samples, frame_size);
    let peak = envelope.iter().copied().fold(0.0f32, f32::max);
    if peak < config.silence_threshold {
        log::debug!("Envelope peak {:.2e} below silence threshold", peak);
        return TempoEstimate::Undetermined;
    }

    let strength = onset_strength(&envelope);
    let onsets = detect_onsets(
        &strength,
        config.onset_threshold_ratio,
        config.min_onset_threshold,
    );
    if onsets.len() < 2 {
        log::debug!("Only {} onsets, tempo undetermined", onsets.len());
        return TempoEstimate::Undetermined;
    }

    let gaps = onsets.windows(2).map(|w| (w[1] - w[0]) as f32 * hop_seconds);
    let mean_interval = gaps.sum::<f32>() / (onsets.len() - 1) as f32;
    let interval = mean_interval.clamp(config.min_beat_interval, config.max_beat_interval);

    let raw_bpm = 60.0 / interval;
    let bpm = fold_tempo(raw_bpm, config.fold_min_bpm, config.fold_max_bpm);

    log::debug!(
        "Tempo: mean interval {:.3}s, raw {:.2} BPM, folded {:.2} BPM",
        mean_interval,
        raw_bpm,
        bpm
    );

    TempoEstimate::Bpm(bpm)
}

/// Envelope frame length in samples for a sample rate
pub fn envelope_frame_size(sample_rate: u32, config: &AnalysisConfig) -> usize {
    let from_seconds = (sample_rate as f32 * config.envelope_frame_seconds).floor() as usize;
    from_seconds.max(config.min_envelope_frame).max(1)
}

/// Fold a tempo into `[low, high]` by a single doubling or halving
///
/// The fold is applied once: 30 BPM becomes 60, not 120.
pub fn fold_tempo(bpm: f32, low: f32, high: f32) -> f32 {
    if bpm < low {
        bpm * 2.0
    } else if bpm > high {
        bpm / 2.0
    } else {
        bpm
    }
}
