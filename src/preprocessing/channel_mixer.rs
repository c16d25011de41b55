//! Channel mixing utilities (multi-channel to mono conversion)

/// Average interleaved multi-channel samples into mono
///
/// # Arguments
///
/// * `samples` - Interleaved samples (`L R L R ...` for stereo)
/// * `channels` - Channel count; 0 and 1 return the input unchanged
///
/// # Returns
///
/// One sample per frame. A trailing partial frame is dropped.
///
/// # Example
///
/// ```
/// use stratum_harmony::preprocessing::channel_mixer::downmix_interleaved;
///
/// let stereo = [1.0, 0.0, 0.5, 0.5];
/// assert_eq!(downmix_interleaved(&stereo, 2), vec![0.5, 0.5]);
/// ```
pub fn downmix_interleaved(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
