//! Spectral peak picking
//!
//! Finds the dominant local maxima of a magnitude spectrum.

/// Find the strongest local maxima of a magnitude spectrum
///
/// A peak is a bin strictly greater than both neighbours; the first and last
/// bins never qualify. Peaks are returned strongest first. Equal magnitudes keep
/// the lower bin first so the result is deterministic.
///
/// # Arguments
///
/// * `magnitudes` - Magnitude spectrum (first half of the FFT bins)
/// * `max_peaks` - Maximum number of peaks to keep
///
/// # Returns
///
/// Vector of (bin, magnitude) pairs, at most `max_peaks` long
///
/// # Example
///
/// ```
/// use stratum_harmony::features::spectral::peak_picking::find_spectral_peaks;
///
/// let spectrum = vec![0.0, 0.5, 1.0, 0.7, 0.3, 0.9, 0.2];
/// let peaks = find_spectral_peaks(&spectrum, 6);
/// assert_eq!(peaks, vec![(2, 1.0), (5, 0.9)]);
/// ```
pub fn find_spectral_peaks(magnitudes: &[f32], max_peaks: usize) -> Vec<(usize, f32)> {
    if magnitudes.len() < 3 || max_peaks == 0 {
        return Vec::new();
    }

    let mut peaks: Vec<(usize, f32)> = magnitudes
        .windows(3)
        .enumerate()
        .filter_map(|(i, w)| {
            let value = w[1];
            if value.is_finite() && value > w[0] && value > w[2] {
                Some((i + 1, value))
            } else {
                None
            }
        })
        .collect();

    peaks.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    peaks.truncate(max_peaks);
    peaks
}
