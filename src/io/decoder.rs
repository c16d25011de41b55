//! Audio decoding using Symphonia
//!
//! Decodes any container/codec Symphonia's default registry supports into a
//! mono `f32` buffer ready for [`crate::analyze`].

use crate::error::AnalysisError;
use crate::preprocessing::channel_mixer::downmix_interleaved;
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode audio file to mono PCM samples
///
/// # Arguments
///
/// * `path` - Path to audio file
///
/// # Returns
///
/// Tuple of (mono samples, sample_rate)
///
/// # Errors
///
/// Returns `AnalysisError::DecodingError` if the file cannot be opened, has no
/// audio track, or fails to decode. Corrupt packets are skipped.
pub fn decode_audio<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32), AnalysisError> {
    let path = path.as_ref();
    log::debug!("Decoding audio file: {}", path.display());

    let src = File::open(path)
        .map_err(|e| AnalysisError::DecodingError(format!("{}: {}", path.display(), e)))?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(decoding_error)?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AnalysisError::DecodingError("No supported audio tracks found".to_string()))?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate.ok_or_else(|| {
        AnalysisError::DecodingError("Audio track has no sample rate".to_string())
    })?;
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(decoding_error)?;

    let mut mono: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(decoding_error(e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let channels = spec.channels.count();

                let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buf.copy_interleaved_ref(decoded);
                mono.extend(downmix_interleaved(buf.samples(), channels));
            }
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("Skipping corrupt packet: {}", e);
                continue;
            }
            Err(e) => return Err(decoding_error(e)),
        }
    }

    log::debug!(
        "Decoded {} mono samples at {} Hz ({:.2}s)",
        mono.len(),
        sample_rate,
        mono.len() as f32 / sample_rate.max(1) as f32
    );

    Ok((mono, sample_rate))
}

fn decoding_error(e: SymphoniaError) -> AnalysisError {
    AnalysisError::DecodingError(e.to_string())
}
