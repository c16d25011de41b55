//! Audio I/O modules
//!
//! Audio decoding using Symphonia (feature `decode`).

#[cfg(feature = "decode")]
pub mod decoder;

#[cfg(feature = "decode")]
pub use decoder::decode_audio;
