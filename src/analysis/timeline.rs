//! Chord timeline construction
//!
//! Turns per-frame chord matches into an ordered, contiguous list of segments:
//! 1. One segment per frame, spanning `[start, start + hop)` clipped to the duration
//! 2. Adjacent segments with the same label and a small gap are merged
//! 3. A timeline with no chords at all collapses to one key-labelled segment

use super::result::{Key, Segment};
use crate::features::chord::{match_chords, DetectionSettings, PitchClass};
use crate::features::spectral::FramePeaks;

/// Label of a frame without any pitched content
pub const NO_CHORD: &str = "N.C.";

/// Build the segment for one analysis frame
///
/// The label is the best candidate name, the raw `C-E-G` listing when no
/// template clears the threshold, or [`NO_CHORD`] for an empty frame.
pub fn frame_segment(
    frame: &FramePeaks,
    hop_size: usize,
    sample_rate: u32,
    duration: f32,
    settings: &DetectionSettings,
) -> Segment {
    let sr = sample_rate as f32;
    let start = frame.start_sample as f32 / sr;
    let end = ((frame.start_sample + hop_size) as f32 / sr).min(duration);

    let (label, confidence) = if frame.notes.is_empty() {
        (NO_CHORD.to_string(), 0.0)
    } else {
        let bass = frame
            .bass
            .or_else(|| frame.notes.iter().next())
            .unwrap_or(PitchClass::C);
        match match_chords(frame.notes, bass, settings).into_iter().next() {
            Some(best) => (best.name, (best.score / 100.0).clamp(0.0, 1.0)),
            None => (frame.notes.label(), 0.0),
        }
    };

    Segment {
        start,
        end,
        label,
        confidence,
    }
}

/// Merge adjacent segments that carry the same label
///
/// A segment merges into the previously retained one when the labels match and
/// `|start - previous.end| < max_gap`. The retained segment is extended and its
/// confidence moves toward the new one by `blend`.
pub fn merge_segments(segments: Vec<Segment>, max_gap: f32, blend: f32) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match merged.last_mut() {
            Some(prev) if prev.label == segment.label && (segment.start - prev.end).abs() < max_gap => {
                prev.end = prev.end.max(segment.end);
                prev.confidence += (segment.confidence - prev.confidence) * blend;
            }
            _ => merged.push(segment),
        }
    }

    merged
}

/// Replace a chordless timeline with a single key-labelled segment
///
/// A timeline that is empty or holds only [`NO_CHORD`] segments becomes
/// `[0, duration)` (or `[0, 1)` for zero duration) labelled with the key.
pub fn apply_fallback(segments: Vec<Segment>, key: Key, duration: f32, confidence: f32) -> Vec<Segment> {
    if segments.iter().any(|s| s.label != NO_CHORD) {
        return segments;
    }

    log::debug!("No chords detected, emitting {} fallback segment", key.label());

    let end = if duration > 0.0 && duration.is_finite() {
        duration
    } else {
        1.0
    };

    vec![Segment {
        start: 0.0,
        end,
        label: key.label(),
        confidence,
    }]
}
