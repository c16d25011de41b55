//! Chord recognition modules
//!
//! Template-based chord matching shared by live note input and per-frame audio
//! analysis:
//! - Pitch classes and note sets
//! - The chord template catalog
//! - Scoring, inversion detection and ranking
//! - MIDI and fretboard input adapters

pub mod live;
pub mod matcher;
pub mod pitch;
pub mod templates;

pub use live::{detect_chords_from_midi, fretboard_to_midi, FretPosition};
pub use matcher::{match_chords, similarity_score, ChordCandidate, ConfidenceTier, DetectionSettings, Strictness};
pub use pitch::{NoteSet, PitchClass, NOTE_NAMES};
pub use templates::{ChordTemplate, CHORD_TEMPLATES};
