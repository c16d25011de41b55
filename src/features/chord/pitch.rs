//! Pitch classes and note sets
//!
//! A pitch class is a note identity modulo one octave (0 = C, ..., 11 = B).
//! A `NoteSet` collapses octave duplicates into at most 12 members.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Note names indexed by pitch class (sharps only)
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Reference tuning: A4 = 440 Hz = MIDI note 69
const A4_FREQUENCY: f32 = 440.0;
const A4_MIDI: f32 = 69.0;

/// A note identity modulo one octave, always in [0, 11]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    /// C, the fallback pitch class for degenerate input
    pub const C: PitchClass = PitchClass(0);

    /// Wrap any integer into [0, 11]
    ///
    /// # Example
    ///
    /// ```
    /// use stratum_harmony::PitchClass;
    ///
    /// assert_eq!(PitchClass::new(14).value(), 2);
    /// assert_eq!(PitchClass::new(-1).value(), 11);
    /// ```
    pub fn new(value: i32) -> Self {
        PitchClass(value.rem_euclid(12) as u8)
    }

    /// Pitch class of a MIDI note number (60 = middle C)
    pub fn from_midi(note: i32) -> Self {
        Self::new(note)
    }

    /// Pitch class of the equal-tempered note nearest to `freq`
    ///
    /// Computes `round(69 + 12 * log2(f / 440)) mod 12`. Non-positive or
    /// non-finite frequencies map to C.
    pub fn from_frequency(freq: f32) -> Self {
        if !freq.is_finite() || freq <= 0.0 {
            return Self::C;
        }
        let midi = A4_MIDI + 12.0 * (freq / A4_FREQUENCY).log2();
        Self::new(midi.round() as i32)
    }

    /// Numeric value in [0, 11]
    pub fn value(self) -> u8 {
        self.0 % 12
    }

    /// Note name, e.g. "C#"
    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.value() as usize]
    }

    /// Upward interval in semitones from `root` to this pitch class, in [0, 11]
    pub fn interval_from(self, root: PitchClass) -> u8 {
        (self.value() + 12 - root.value()) % 12
    }

    /// Shift by a number of semitones (wraps around the octave)
    pub fn transpose(self, semitones: i32) -> Self {
        Self::new(self.value() as i32 + semitones)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<u8> for PitchClass {
    fn from(value: u8) -> Self {
        Self::new(value as i32)
    }
}

/// Set of unique pitch classes, stored as a 12-bit mask
///
/// Iteration is always in ascending pitch-class order, which keeps every
/// consumer deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NoteSet {
    mask: u16,
}

impl NoteSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pitch class, returning `true` if it was not present yet
    pub fn insert(&mut self, pc: PitchClass) -> bool {
        let bit = 1u16 << pc.value();
        let fresh = self.mask & bit == 0;
        self.mask |= bit;
        fresh
    }

    /// Membership test
    pub fn contains(&self, pc: PitchClass) -> bool {
        self.mask & (1u16 << pc.value()) != 0
    }

    /// Number of distinct pitch classes
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// True when no pitch class is present
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = PitchClass> + '_ {
        (0u8..12)
            .filter(move |&i| self.mask & (1u16 << i) != 0)
            .map(PitchClass)
    }

    /// Sorted, deduplicated intervals of every member relative to `root`
    pub fn intervals_from(&self, root: PitchClass) -> Vec<u8> {
        let mut intervals: Vec<u8> = self.iter().map(|pc| pc.interval_from(root)).collect();
        intervals.sort_unstable();
        intervals
    }

    /// Raw listing of the member names joined by '-', e.g. "C-E-G"
    pub fn label(&self) -> String {
        self.iter().map(PitchClass::name).collect::<Vec<_>>().join("-")
    }
}

impl FromIterator<PitchClass> for NoteSet {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> Self {
        let mut set = NoteSet::new();
        for pc in iter {
            set.insert(pc);
        }
        set
    }
}

impl<'a> FromIterator<&'a u8> for NoteSet {
    fn from_iter<I: IntoIterator<Item = &'a u8>>(iter: I) -> Self {
        iter.into_iter().map(|&v| PitchClass::from(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_frequency() {
        assert_eq!(PitchClass::from_frequency(440.0).name(), "A");
        assert_eq!(PitchClass::from_frequency(261.63).name(), "C");
        assert_eq!(PitchClass::from_frequency(329.63).name(), "E");
        // A quarter tone sharp of A4 still rounds to A
        assert_eq!(PitchClass::from_frequency(446.0).name(), "A");
        assert_eq!(PitchClass::from_frequency(27.5).name(), "A");
    }

    #[test]
    fn test_from_frequency_degenerate() {
        assert_eq!(PitchClass::from_frequency(0.0), PitchClass::C);
        assert_eq!(PitchClass::from_frequency(-10.0), PitchClass::C);
        assert_eq!(PitchClass::from_frequency(f32::NAN), PitchClass::C);
        assert_eq!(PitchClass::from_frequency(f32::INFINITY), PitchClass::C);
    }

    #[test]
    fn test_from_midi() {
        assert_eq!(PitchClass::from_midi(60), PitchClass::C);
        assert_eq!(PitchClass::from_midi(64).name(), "E");
        assert_eq!(PitchClass::from_midi(-1).value(), 11);
    }

    #[test]
    fn test_interval_from() {
        let c = PitchClass::new(0);
        let e = PitchClass::new(4);
        assert_eq!(e.interval_from(c), 4);
        assert_eq!(c.interval_from(e), 8);
        assert_eq!(c.interval_from(c), 0);
    }

    #[test]
    fn test_note_set_collapses_duplicates() {
        let set: NoteSet = [0u8, 4, 7, 12, 16].iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.label(), "C-E-G");
    }

    #[test]
    fn test_note_set_iterates_ascending() {
        let set: NoteSet = [7u8, 0, 4].iter().collect();
        let values: Vec<u8> = set.iter().map(PitchClass::value).collect();
        assert_eq!(values, vec![0, 4, 7]);
        assert_eq!(set.intervals_from(PitchClass::new(4)), vec![0, 3, 8]);
    }

    #[test]
    fn test_note_set_empty() {
        let set = NoteSet::new();
        assert!(set.is_empty());
        assert_eq!(set.label(), "");
    }
}
