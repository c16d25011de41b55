//! Adapters for live note-surface input
//!
//! Instrument surfaces report raw MIDI note numbers (piano keys) or string/fret
//! positions (guitar). These helpers turn them into a chord match, taking the
//! bass from the lowest sounding note.

use super::matcher::{match_chords, ChordCandidate, DetectionSettings};
use super::pitch::{NoteSet, PitchClass};
use serde::{Deserialize, Serialize};

/// Standard guitar tuning E2 A2 D3 G3 B3 E4 as MIDI notes (string 0 = low E)
pub const STANDARD_TUNING: [i32; 6] = [40, 45, 50, 55, 59, 64];

/// A fretted (or open, fret 0) string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FretPosition {
    /// String index, 0 = low E
    pub string: usize,
    /// Fret number, 0 = open string
    pub fret: u8,
}

/// Convert fretboard positions to MIDI notes in standard tuning
///
/// Positions on strings outside 0..6 are skipped.
pub fn fretboard_to_midi(positions: &[FretPosition]) -> Vec<i32> {
    positions
        .iter()
        .filter_map(|pos| {
            STANDARD_TUNING
                .get(pos.string)
                .map(|open| open + pos.fret as i32)
        })
        .collect()
}

/// Detect chords from MIDI note numbers
///
/// Octave duplicates collapse; the bass is the pitch class of the lowest note.
/// Returns an empty list when fewer than `min_notes` notes, or distinct pitch
/// classes, are sounding.
///
/// # Example
///
/// ```
/// use stratum_harmony::features::chord::live::detect_chords_from_midi;
/// use stratum_harmony::DetectionSettings;
///
/// // E3, C4, G4: C major over E
/// let candidates = detect_chords_from_midi(&[52, 60, 67], &DetectionSettings::default());
/// assert_eq!(candidates[0].name, "CMajor/E");
/// ```
pub fn detect_chords_from_midi(midi_notes: &[i32], settings: &DetectionSettings) -> Vec<ChordCandidate> {
    let min_notes = settings.min_notes.max(1);
    if midi_notes.len() < min_notes {
        return Vec::new();
    }

    let notes: NoteSet = midi_notes.iter().map(|&n| PitchClass::from_midi(n)).collect();
    if notes.len() < min_notes {
        return Vec::new();
    }

    let bass = match midi_notes.iter().min() {
        Some(&lowest) => PitchClass::from_midi(lowest),
        None => return Vec::new(),
    };

    match_chords(notes, bass, settings)
}
