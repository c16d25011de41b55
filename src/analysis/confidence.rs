//! Confidence scoring module
//!
//! Summarizes how trustworthy a chord timeline is by bucketing segment
//! confidences and rating the timeline as a whole.
//!
//! # Example
//!
//! ```
//! use stratum_harmony::analyze;
//! use stratum_harmony::analysis::confidence::{summarize, QualityRating};
//!
//! let result = analyze(&vec![0.0f32; 44100], 44100);
//! let summary = summarize(&result.segments);
//! assert_eq!(summary.total, 1);
//! assert_eq!(summary.rating, QualityRating::NeedsReview);
//! ```

use super::result::Segment;
use serde::{Deserialize, Serialize};

/// Segments below this confidence count as low
pub const MEDIUM_CONFIDENCE: f32 = 0.70;

/// Segments at or above this confidence count as high
pub const HIGH_CONFIDENCE: f32 = 0.85;

/// Overall quality of a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityRating {
    /// Mean ≥ 0.85 and under 5% low-confidence segments
    Excellent,
    /// Mean ≥ 0.75 and under 15% low-confidence segments
    Good,
    /// Mean ≥ 0.65
    Fair,
    /// Everything else, including empty timelines
    NeedsReview,
}

impl QualityRating {
    /// Human-readable rating
    pub fn label(self) -> &'static str {
        match self {
            QualityRating::Excellent => "Excellent",
            QualityRating::Good => "Good",
            QualityRating::Fair => "Fair",
            QualityRating::NeedsReview => "Needs Review",
        }
    }
}

/// Confidence statistics for a chord timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSummary {
    /// Number of segments
    pub total: usize,
    /// Segments with confidence < 0.70
    pub low: usize,
    /// Segments with confidence in [0.70, 0.85)
    pub medium: usize,
    /// Segments with confidence ≥ 0.85
    pub high: usize,
    /// Mean segment confidence (0.0 when empty)
    pub mean: f32,
    /// Overall rating
    pub rating: QualityRating,
}

/// Summarize segment confidences
pub fn summarize(segments: &[Segment]) -> ConfidenceSummary {
    let total = segments.len();
    let mut low = 0;
    let mut medium = 0;
    let mut high = 0;

    for segment in segments {
        if segment.confidence >= HIGH_CONFIDENCE {
            high += 1;
        } else if segment.confidence >= MEDIUM_CONFIDENCE {
            medium += 1;
        } else {
            low += 1;
        }
    }

    if total == 0 {
        return ConfidenceSummary {
            total,
            low,
            medium,
            high,
            mean: 0.0,
            rating: QualityRating::NeedsReview,
        };
    }

    let mean = segments.iter().map(|s| s.confidence).sum::<f32>() / total as f32;
    let low_share = low as f32 / total as f32;

    let rating = if mean >= HIGH_CONFIDENCE && low_share < 0.05 {
        QualityRating::Excellent
    } else if mean >= 0.75 && low_share < 0.15 {
        QualityRating::Good
    } else if mean >= 0.65 {
        QualityRating::Fair
    } else {
        QualityRating::NeedsReview
    };

    log::debug!(
        "Confidence summary: {} segments, mean {:.3}, {} low, rating {}",
        total,
        mean,
        low,
        rating.label()
    );

    ConfidenceSummary {
        total,
        low,
        medium,
        high,
        mean,
        rating,
    }
}
