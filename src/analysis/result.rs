//! Analysis result types

use crate::features::chord::NOTE_NAMES;
use serde::{Deserialize, Serialize};

/// Key mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Major mode
    Major,
    /// Minor mode
    Minor,
}

impl Mode {
    /// Lowercase mode name ("major" / "minor")
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

/// Musical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Major key (0 = C, 1 = C#, ..., 11 = B)
    Major(u32),
    /// Minor key (0 = C, 1 = C#, ..., 11 = B)
    Minor(u32),
}

impl Key {
    /// Tonic pitch class (0 = C)
    pub fn tonic(&self) -> u32 {
        match self {
            Key::Major(i) | Key::Minor(i) => *i % 12,
        }
    }

    /// Major or minor
    pub fn mode(&self) -> Mode {
        match self {
            Key::Major(_) => Mode::Major,
            Key::Minor(_) => Mode::Minor,
        }
    }

    /// Get key name in musical notation (e.g., "C", "Am", "F#", "D#m")
    ///
    /// # Example
    ///
    /// ```
    /// use stratum_harmony::analysis::result::Key;
    ///
    /// assert_eq!(Key::Major(0).name(), "C");
    /// assert_eq!(Key::Major(6).name(), "F#");
    /// assert_eq!(Key::Minor(9).name(), "Am");
    /// assert_eq!(Key::Minor(1).name(), "C#m");
    /// ```
    pub fn name(&self) -> String {
        let tonic = NOTE_NAMES[self.tonic() as usize];
        match self {
            Key::Major(_) => tonic.to_string(),
            Key::Minor(_) => format!("{}m", tonic),
        }
    }

    /// Tonic and spelled-out mode (e.g., "C major", "A minor")
    ///
    /// This is the label used for the silent-input fallback segment.
    pub fn label(&self) -> String {
        format!("{} {}", NOTE_NAMES[self.tonic() as usize], self.mode().as_str())
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::Major(0)
    }
}

/// Tempo estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TempoEstimate {
    /// Beats per minute
    Bpm(f32),
    /// Too few onsets or a silent signal
    Undetermined,
}

impl TempoEstimate {
    /// BPM value, 0.0 when undetermined
    pub fn bpm(&self) -> f32 {
        match self {
            TempoEstimate::Bpm(bpm) => *bpm,
            TempoEstimate::Undetermined => 0.0,
        }
    }

    /// `true` for `Undetermined`
    pub fn is_undetermined(&self) -> bool {
        matches!(self, TempoEstimate::Undetermined)
    }
}

/// Timeline segment: half-open `[start, end)` in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    pub start: f32,

    /// End time in seconds (exclusive)
    pub end: f32,

    /// Chord label ("CMajor/E", "C-E", "N.C." or a key label)
    pub label: String,

    /// Confidence (0.0-1.0)
    pub confidence: f32,
}

impl Segment {
    /// Segment length in seconds
    pub fn duration(&self) -> f32 {
        self.end - self.start
    }

    /// First whitespace-separated token of the label
    ///
    /// "CMajor 7/E" becomes "CMajor", "C major" becomes "C".
    pub fn simple_label(&self) -> &str {
        self.label.split_whitespace().next().unwrap_or("")
    }
}

/// Complete analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Tempo estimate
    pub tempo: TempoEstimate,

    /// Detected key
    pub key: Key,

    /// Chord timeline, ordered and contiguous
    pub segments: Vec<Segment>,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Tempo in BPM, 0.0 when undetermined
    pub fn tempo_bpm(&self) -> f32 {
        self.tempo.bpm()
    }

    /// Timeline with every label reduced to its first token
    pub fn simple_segments(&self) -> Vec<Segment> {
        self.segments
            .iter()
            .map(|s| Segment {
                label: s.simple_label().to_string(),
                ..s.clone()
            })
            .collect()
    }
}

/// Analysis metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Audio duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of spectral frames analyzed
    pub frame_count: usize,

    /// FFT window size in samples (0 when no frames were analyzed)
    pub window_size: usize,

    /// Key confidence (0.0-1.0)
    pub key_confidence: f32,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,
}
