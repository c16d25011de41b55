//! Key detection modules
//!
//! Detect musical key using:
//! - Krumhansl-Kessler templates (24 keys)
//! - Dot-product template matching over a pitch-class histogram

pub mod detector;
pub mod templates;

pub use detector::{detect_key, estimate_key};
pub use templates::KeyTemplates;

use crate::analysis::result::Key;

/// Key detection result
#[derive(Debug, Clone)]
pub struct KeyDetectionResult {
    /// Detected key (best match)
    pub key: Key,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,

    /// All 24 key scores (ranked, highest first)
    pub all_scores: Vec<(Key, f32)>,

    /// Top N keys with scores (default: top 3)
    pub top_keys: Vec<(Key, f32)>,
}
