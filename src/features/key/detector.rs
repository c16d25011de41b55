//! Key detection algorithm
//!
//! Correlates a normalized pitch-class histogram with the 24 rotated
//! Krumhansl-Kessler profiles and keeps the best-scoring key.
//!
//! # Reference
//!
//! Krumhansl, C. L., & Kessler, E. J. (1982). Tracing the Dynamic Changes in Perceived
//! Tonal Organization in a Spatial Representation of Musical Keys. *Psychological Review*,
//! 89(4), 334-368.

use super::templates::KeyTemplates;
use super::KeyDetectionResult;
use crate::analysis::result::Key;
use crate::features::chroma::PitchClassHistogram;

/// Estimate the key of an accumulated pitch-class histogram
///
/// When the histogram holds no energy the key defaults to C major with zero
/// confidence.
pub fn estimate_key(histogram: &PitchClassHistogram, templates: &KeyTemplates) -> KeyDetectionResult {
    match histogram.normalized() {
        Some(distribution) => detect_key(&distribution, templates),
        None => {
            log::debug!("Pitch-class histogram is empty, defaulting to C major");
            KeyDetectionResult {
                key: Key::Major(0),
                confidence: 0.0,
                all_scores: all_keys().map(|k| (k, 0.0)).collect(),
                top_keys: vec![(Key::Major(0), 0.0)],
            }
        }
    }
}

/// Detect musical key from a normalized 12-bin distribution
///
/// Iterates tonics C..B, scoring major before minor for each tonic, and keeps
/// the first strictly better score. At equal scores the lower tonic wins, and
/// major wins over minor on the same tonic.
///
/// # Returns
///
/// Key detection result with:
/// - Detected key
/// - Confidence `(best - second) / best` in [0, 1]
/// - All 24 key scores (ranked, highest first)
///
/// # Example
///
/// ```
/// use stratum_harmony::features::key::{detect_key, KeyTemplates};
/// use stratum_harmony::Key;
///
/// let mut chroma = [0.0f32; 12];
/// chroma[0] = 0.4; // C
/// chroma[4] = 0.3; // E
/// chroma[7] = 0.3; // G
/// let result = detect_key(&chroma, &KeyTemplates::new());
/// assert_eq!(result.key, Key::Major(0));
/// ```
pub fn detect_key(distribution: &[f32; 12], templates: &KeyTemplates) -> KeyDetectionResult {
    let mut scores = Vec::with_capacity(24);
    let mut best = (Key::Major(0), f32::NEG_INFINITY);

    for tonic in 0..12u32 {
        let major = dot_product(distribution, templates.get_major_template(tonic));
        scores.push((Key::Major(tonic), major));
        if major > best.1 {
            best = (Key::Major(tonic), major);
        }

        let minor = dot_product(distribution, templates.get_minor_template(tonic));
        scores.push((Key::Minor(tonic), minor));
        if minor > best.1 {
            best = (Key::Minor(tonic), minor);
        }
    }

    // Stable sort keeps iteration order among equal scores
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let (best_key, best_score) = best;
    let second_score = scores
        .iter()
        .find(|(k, _)| *k != best_key)
        .map(|(_, s)| *s)
        .unwrap_or(0.0);

    let confidence = if best_score > 0.0 && best_score.is_finite() {
        ((best_score - second_score) / best_score).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let top_keys: Vec<(Key, f32)> = scores.iter().take(3).cloned().collect();

    log::debug!(
        "Detected key: {}, score: {:.4}, confidence: {:.4}",
        best_key.label(),
        best_score,
        confidence
    );

    KeyDetectionResult {
        key: best_key,
        confidence,
        all_scores: scores,
        top_keys,
    }
}

fn all_keys() -> impl Iterator<Item = Key> {
    (0..12u32).flat_map(|t| [Key::Major(t), Key::Minor(t)])
}

/// Compute dot product between two vectors.
fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
