//! Chord template catalog
//!
//! Fixed, ordered library of chord qualities. Intervals are semitone offsets
//! from an implicit root and may exceed an octave (extensions such as the 9th);
//! they are reduced modulo 12 before matching. The priority only breaks ties
//! between near-equal matches.

/// A named interval pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordTemplate {
    /// Quality name appended to the root, e.g. "Major", "Dominant 7"
    pub name: &'static str,
    /// Offsets from the root in semitones
    pub intervals: &'static [u8],
    /// Tie-break weight (higher wins among equal scores)
    pub priority: u32,
    /// Alternate quality spellings, e.g. "m7" for "Minor 7"
    pub alternate_names: &'static [&'static str],
}

impl ChordTemplate {
    /// Intervals reduced modulo 12, sorted and deduplicated
    pub fn normalized_intervals(&self) -> Vec<u8> {
        let mut intervals: Vec<u8> = self.intervals.iter().map(|i| i % 12).collect();
        intervals.sort_unstable();
        intervals.dedup();
        intervals
    }
}

/// The template library, in catalog order
pub static CHORD_TEMPLATES: [ChordTemplate; 23] = [
    // Triads
    ChordTemplate { name: "Major", intervals: &[0, 4, 7], priority: 100, alternate_names: &["M", ""] },
    ChordTemplate { name: "Minor", intervals: &[0, 3, 7], priority: 100, alternate_names: &["m", "min", "-"] },
    ChordTemplate { name: "Diminished", intervals: &[0, 3, 6], priority: 90, alternate_names: &["dim", "º"] },
    ChordTemplate { name: "Augmented", intervals: &[0, 4, 8], priority: 90, alternate_names: &["aug", "+"] },
    // Suspensions
    ChordTemplate { name: "sus2", intervals: &[0, 2, 7], priority: 85, alternate_names: &[] },
    ChordTemplate { name: "sus4", intervals: &[0, 5, 7], priority: 85, alternate_names: &[] },
    // Sevenths
    ChordTemplate { name: "Dominant 7", intervals: &[0, 4, 7, 10], priority: 80, alternate_names: &["7"] },
    ChordTemplate { name: "Major 7", intervals: &[0, 4, 7, 11], priority: 80, alternate_names: &["maj7", "M7", "Δ"] },
    ChordTemplate { name: "Minor 7", intervals: &[0, 3, 7, 10], priority: 80, alternate_names: &["m7", "min7", "-7"] },
    ChordTemplate { name: "Minor Major 7", intervals: &[0, 3, 7, 11], priority: 70, alternate_names: &["m(maj7)", "mM7"] },
    ChordTemplate { name: "Diminished 7", intervals: &[0, 3, 6, 9], priority: 75, alternate_names: &["dim7", "º7"] },
    ChordTemplate { name: "Half-Diminished 7", intervals: &[0, 3, 6, 10], priority: 75, alternate_names: &["m7♭5", "ø7"] },
    // Sixths
    ChordTemplate { name: "6", intervals: &[0, 4, 7, 9], priority: 70, alternate_names: &[] },
    ChordTemplate { name: "Minor 6", intervals: &[0, 3, 7, 9], priority: 70, alternate_names: &["m6"] },
    // Extended
    ChordTemplate { name: "9", intervals: &[0, 4, 7, 10, 14], priority: 60, alternate_names: &[] },
    ChordTemplate { name: "Major 9", intervals: &[0, 4, 7, 11, 14], priority: 60, alternate_names: &["maj9", "M9"] },
    ChordTemplate { name: "Minor 9", intervals: &[0, 3, 7, 10, 14], priority: 60, alternate_names: &["m9"] },
    ChordTemplate { name: "add9", intervals: &[0, 4, 7, 14], priority: 65, alternate_names: &[] },
    ChordTemplate { name: "madd9", intervals: &[0, 3, 7, 14], priority: 65, alternate_names: &[] },
    // Altered
    ChordTemplate { name: "7♯9", intervals: &[0, 4, 7, 10, 15], priority: 50, alternate_names: &["7#9"] },
    ChordTemplate { name: "7♭9", intervals: &[0, 4, 7, 10, 13], priority: 50, alternate_names: &["7b9"] },
    ChordTemplate { name: "7♯5", intervals: &[0, 4, 8, 10], priority: 55, alternate_names: &["7#5", "7aug"] },
    ChordTemplate { name: "7♭5", intervals: &[0, 4, 6, 10], priority: 55, alternate_names: &["7b5"] },
];

/// Look up a template by its quality name
pub fn find_template(name: &str) -> Option<&'static ChordTemplate> {
    CHORD_TEMPLATES.iter().find(|t| t.name == name)
}
