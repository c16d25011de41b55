//! Chord template matching
//!
//! Scores every pitch class of a note set as a candidate root against every
//! template in the catalog, detects the inversion from the bass note, and ranks
//! the surviving candidates.
//!
//! # Algorithm
//!
//! For each root and template:
//!
//! 1. `coverage = matched template intervals / template intervals`
//! 2. `penalty = extra notes * (0.15 strict | 0.05 lenient)`
//! 3. `score = clamp(coverage * 100 - penalty * 100, 0, 100)` (exactly 100 for a
//!    complete match without extra notes)
//! 4. Keep when `score >= 60` (lenient) or `>= 80` (strict)
//! 5. Rank by `score + priority * 0.1`
//!
//! The same note set and settings always produce the same list in the same order.
//!
//! # Example
//!
//! ```
//! use stratum_harmony::{match_chords, DetectionSettings, NoteSet, PitchClass};
//!
//! let notes: NoteSet = [0u8, 4, 7].iter().collect();
//! let candidates = match_chords(notes, PitchClass::new(4), &DetectionSettings::default());
//!
//! assert_eq!(candidates[0].name, "CMajor/E");
//! assert_eq!(candidates[0].inversion, 1);
//! ```

use super::pitch::{NoteSet, PitchClass};
use super::templates::CHORD_TEMPLATES;
use serde::{Deserialize, Serialize};

/// Share of the template priority added to the ranking score
pub const PRIORITY_WEIGHT: f32 = 0.1;

/// How strictly extra notes are punished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Small penalty per extra note, low acceptance threshold
    #[default]
    Lenient,
    /// Large penalty per extra note, high acceptance threshold
    Strict,
}

impl Strictness {
    /// Penalty fraction charged for each note outside the template
    pub fn extra_note_penalty(self) -> f32 {
        match self {
            Strictness::Lenient => 0.05,
            Strictness::Strict => 0.15,
        }
    }

    /// Minimum score (0-100) a candidate needs to be reported
    pub fn acceptance_threshold(self) -> f32 {
        match self {
            Strictness::Lenient => 60.0,
            Strictness::Strict => 80.0,
        }
    }
}

/// Chord detection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSettings {
    /// Extra-note tolerance (default: lenient)
    pub strictness: Strictness,
    /// Maximum number of candidates returned (default: 3, values below 1 act as 1)
    pub max_candidates: usize,
    /// Append "/bass" to names of inverted chords (default: true)
    pub allow_inversions: bool,
    /// Minimum number of distinct pitch classes (default: 2, values below 1 act as 1)
    pub min_notes: usize,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self::lenient()
    }
}

impl DetectionSettings {
    /// Lenient settings with default limits
    pub fn lenient() -> Self {
        Self {
            strictness: Strictness::Lenient,
            max_candidates: 3,
            allow_inversions: true,
            min_notes: 2,
        }
    }

    /// Strict settings with default limits
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
            ..Self::lenient()
        }
    }
}

/// Human-readable confidence bucket for a candidate score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceTier {
    /// Score >= 90
    VeryHigh,
    /// Score >= 75
    High,
    /// Score >= 60
    Medium,
    /// Anything lower
    Low,
}

impl ConfidenceTier {
    /// Bucket a 0-100 score
    pub fn from_score(score: f32) -> Self {
        if score >= 90.0 {
            ConfidenceTier::VeryHigh
        } else if score >= 75.0 {
            ConfidenceTier::High
        } else if score >= 60.0 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            ConfidenceTier::VeryHigh => "Very High",
            ConfidenceTier::High => "High",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::Low => "Low",
        }
    }
}

/// One interpretation of a note set as a chord
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordCandidate {
    /// Display name, e.g. "CMajor" or "CMajor/E"
    pub name: String,
    /// Assumed root
    pub root: PitchClass,
    /// Sorted intervals of the note set relative to the root
    pub intervals: Vec<u8>,
    /// Position of the bass interval in `intervals` (0 = root position)
    pub inversion: usize,
    /// Lowest sounding pitch class
    pub bass: PitchClass,
    /// Match confidence in [0, 100]
    pub score: f32,
    /// Score plus the priority tie-break, used for ordering
    pub ranking: f32,
    /// Quality name of the matched template
    pub template: String,
    /// Root plus each alternate quality spelling
    pub alternate_names: Vec<String>,
}

impl ChordCandidate {
    /// Confidence bucket of the score
    pub fn confidence_tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_score(self.score)
    }

    /// One-line description, e.g. "CMajor/E (1st inversion) - Confidence: Very High (100%)"
    pub fn describe(&self) -> String {
        let inversion = match self.inversion {
            0 => String::new(),
            1 => " (1st inversion)".to_string(),
            2 => " (2nd inversion)".to_string(),
            _ => " (3rd inversion)".to_string(),
        };
        format!(
            "{}{} - Confidence: {} ({}%)",
            self.name,
            inversion,
            self.confidence_tier().label(),
            self.score.round() as i32
        )
    }
}

/// Similarity between a note interval set and a template interval set (0-100)
///
/// Both slices are expected sorted and deduplicated.
pub fn similarity_score(note_intervals: &[u8], template_intervals: &[u8], strictness: Strictness) -> f32 {
    if template_intervals.is_empty() {
        return 0.0;
    }

    let matching = template_intervals
        .iter()
        .filter(|i| note_intervals.contains(i))
        .count();
    let extra = note_intervals
        .iter()
        .filter(|i| !template_intervals.contains(i))
        .count();

    if matching == template_intervals.len() && extra == 0 {
        return 100.0;
    }

    let coverage = matching as f32 / template_intervals.len() as f32;
    let penalty = extra as f32 * strictness.extra_note_penalty();

    (coverage * 100.0 - penalty * 100.0).clamp(0.0, 100.0)
}

/// Match a note set against the chord catalog
///
/// # Arguments
///
/// * `notes` - Sounding pitch classes
/// * `bass` - Pitch class of the lowest sounding note; a bass outside `notes` leaves
///   every candidate in root position
/// * `settings` - Strictness, result limit, inversion naming and minimum size
///
/// # Returns
///
/// Candidates sorted by ranking (highest first), at most `max_candidates`.
/// Empty when the set is smaller than `min_notes` or nothing clears the threshold.
pub fn match_chords(notes: NoteSet, bass: PitchClass, settings: &DetectionSettings) -> Vec<ChordCandidate> {
    let max_candidates = settings.max_candidates.max(1);
    let min_notes = settings.min_notes.max(1);

    if notes.len() < min_notes {
        log::trace!("{} pitch classes, need {}: no match attempted", notes.len(), min_notes);
        return Vec::new();
    }

    let threshold = settings.strictness.acceptance_threshold();
    let patterns: Vec<Vec<u8>> = CHORD_TEMPLATES.iter().map(|t| t.normalized_intervals()).collect();
    let mut candidates = Vec::new();

    for root in notes.iter() {
        let intervals = notes.intervals_from(root);
        let bass_interval = bass.interval_from(root);
        let inversion = intervals.iter().position(|&i| i == bass_interval).unwrap_or(0);

        for (template, pattern) in CHORD_TEMPLATES.iter().zip(patterns.iter()) {
            let score = similarity_score(&intervals, pattern, settings.strictness);
            if score < threshold {
                continue;
            }

            let mut name = format!("{}{}", root.name(), template.name);
            if settings.allow_inversions && inversion > 0 {
                name.push('/');
                name.push_str(bass.name());
            }

            candidates.push(ChordCandidate {
                name,
                root,
                intervals: intervals.clone(),
                inversion,
                bass,
                score,
                ranking: score + template.priority as f32 * PRIORITY_WEIGHT,
                template: template.name.to_string(),
                alternate_names: template
                    .alternate_names
                    .iter()
                    .map(|alt| format!("{}{}", root.name(), alt))
                    .collect(),
            });
        }
    }

    // Stable: equal rankings keep root order, then catalog order
    candidates.sort_by(|a, b| b.ranking.partial_cmp(&a.ranking).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(max_candidates);

    log::trace!(
        "Matched {} [{}]: {}",
        notes.label(),
        settings.strictness.acceptance_threshold(),
        candidates.first().map(|c| c.name.as_str()).unwrap_or("none")
    );

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[u8]) -> NoteSet {
        values.iter().collect()
    }

    #[test]
    fn test_similarity_exact_match() {
        assert_eq!(similarity_score(&[0, 4, 7], &[0, 4, 7], Strictness::Strict), 100.0);
    }

    #[test]
    fn test_similarity_extra_notes() {
        // Full coverage with one extra note
        let lenient = similarity_score(&[0, 2, 4, 7], &[0, 4, 7], Strictness::Lenient);
        let strict = similarity_score(&[0, 2, 4, 7], &[0, 4, 7], Strictness::Strict);
        assert!((lenient - 95.0).abs() < 1e-4);
        assert!((strict - 85.0).abs() < 1e-4);
    }

    #[test]
    fn test_similarity_partial_coverage() {
        // Two of three template notes, one extra
        let score = similarity_score(&[0, 3, 8], &[0, 3, 7], Strictness::Lenient);
        assert!((score - (200.0 / 3.0 - 5.0)).abs() < 1e-3);
    }

    #[test]
    fn test_similarity_clamps_at_zero() {
        let score = similarity_score(&[0, 1, 2, 3, 5, 6, 8, 9], &[0, 4, 7], Strictness::Strict);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_root_position_major() {
        let candidates = match_chords(set(&[0, 4, 7]), PitchClass::new(0), &DetectionSettings::default());
        let top = &candidates[0];
        assert_eq!(top.name, "CMajor");
        assert!(top.name.ends_with("Major"));
        assert_eq!(top.inversion, 0);
        assert_eq!(top.score, 100.0);
        assert_eq!(top.alternate_names, vec!["CM".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_first_inversion() {
        let candidates = match_chords(set(&[4, 7, 0]), PitchClass::new(4), &DetectionSettings::default());
        let top = &candidates[0];
        assert_eq!(top.template, "Major");
        assert_eq!(top.root, PitchClass::new(0));
        assert_eq!(top.inversion, 1);
        assert_eq!(top.name, "CMajor/E");
        assert_eq!(top.score, 100.0);
    }

    #[test]
    fn test_inversion_name_suppressed() {
        let settings = DetectionSettings {
            allow_inversions: false,
            ..DetectionSettings::default()
        };
        let candidates = match_chords(set(&[0, 4, 7]), PitchClass::new(7), &settings);
        assert_eq!(candidates[0].name, "CMajor");
        assert_eq!(candidates[0].inversion, 2);
    }

    #[test]
    fn test_diminished_strict_and_lenient() {
        let strict = match_chords(set(&[0, 3, 6]), PitchClass::new(0), &DetectionSettings::strict());
        assert_eq!(strict[0].name, "CDiminished");
        assert!(strict[0].score >= 80.0);

        let lenient = match_chords(set(&[0, 3, 6]), PitchClass::new(0), &DetectionSettings::default());
        assert_eq!(lenient[0].name, "CDiminished");
        assert!(lenient.len() > 1, "lenient mode should offer alternates");
        assert!(lenient[1].score < lenient[0].score);
    }

    #[test]
    fn test_below_min_notes() {
        let candidates = match_chords(set(&[0]), PitchClass::new(0), &DetectionSettings::default());
        assert!(candidates.is_empty());

        let settings = DetectionSettings {
            min_notes: 4,
            ..DetectionSettings::default()
        };
        assert!(match_chords(set(&[0, 4, 7]), PitchClass::new(0), &settings).is_empty());
    }

    #[test]
    fn test_bass_outside_note_set_is_not_counted() {
        let settings = DetectionSettings::default();
        assert!(match_chords(set(&[0]), PitchClass::new(7), &settings).is_empty());

        let candidates = match_chords(set(&[0, 4, 7]), PitchClass::new(2), &settings);
        assert_eq!(candidates[0].name, "CMajor");
        assert_eq!(candidates[0].inversion, 0);
        assert!(candidates.iter().all(|c| c.inversion == 0 && !c.name.contains('/')));

        let candidates = match_chords(set(&[0, 4]), PitchClass::new(7), &settings);
        assert!(!candidates.is_empty());
        assert!(candidates.iter().all(|c| c.inversion < 2 && !c.name.contains("/G")));
    }

    #[test]
    fn test_max_candidates() {
        let settings = DetectionSettings {
            max_candidates: 1,
            ..DetectionSettings::default()
        };
        let candidates = match_chords(set(&[0, 3, 6]), PitchClass::new(0), &settings);
        assert_eq!(candidates.len(), 1);

        let settings = DetectionSettings {
            max_candidates: 0,
            ..DetectionSettings::default()
        };
        assert_eq!(match_chords(set(&[0, 3, 6]), PitchClass::new(0), &settings).len(), 1);
    }

    #[test]
    fn test_sorted_by_ranking() {
        let settings = DetectionSettings {
            max_candidates: 50,
            ..DetectionSettings::default()
        };
        let candidates = match_chords(set(&[0, 2, 4, 7, 11]), PitchClass::new(0), &settings);
        assert!(!candidates.is_empty());
        for pair in candidates.windows(2) {
            assert!(pair[0].ranking >= pair[1].ranking);
        }
        assert_eq!(candidates[0].name, "CMajor 9");
    }

    #[test]
    fn test_describe() {
        let candidates = match_chords(set(&[0, 4, 7]), PitchClass::new(4), &DetectionSettings::default());
        assert_eq!(
            candidates[0].describe(),
            "CMajor/E (1st inversion) - Confidence: Very High (100%)"
        );
    }

    #[test]
    fn test_confidence_tier() {
        assert_eq!(ConfidenceTier::from_score(95.0), ConfidenceTier::VeryHigh);
        assert_eq!(ConfidenceTier::from_score(80.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(61.7), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(10.0), ConfidenceTier::Low);
    }
}
