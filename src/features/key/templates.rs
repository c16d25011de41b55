//! Krumhansl-Kessler key templates
//!
//! Defines tonal profiles for 24 keys (12 major + 12 minor). Each template is the
//! C-rooted profile rotated so that its first entry sits on the tonic.

/// Krumhansl-Kessler major profile, C major
pub const MAJOR_PROFILE: [f32; 12] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// Krumhansl-Kessler minor profile, C minor
pub const MINOR_PROFILE: [f32; 12] = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Key templates for all 24 keys
#[derive(Debug, Clone)]
pub struct KeyTemplates {
    /// Major key templates (12 keys: C, C#, D, ..., B)
    pub major: [[f32; 12]; 12],

    /// Minor key templates (12 keys: C, C#, D, ..., B)
    pub minor: [[f32; 12]; 12],
}

impl KeyTemplates {
    /// Create key templates from the Krumhansl-Kessler profiles
    pub fn new() -> Self {
        Self::from_profiles(&MAJOR_PROFILE, &MINOR_PROFILE)
    }

    /// Create key templates from arbitrary C-rooted profiles
    pub fn from_profiles(major: &[f32; 12], minor: &[f32; 12]) -> Self {
        let mut templates = Self {
            major: [[0.0; 12]; 12],
            minor: [[0.0; 12]; 12],
        };
        for tonic in 0..12 {
            templates.major[tonic] = rotate(major, tonic);
            templates.minor[tonic] = rotate(minor, tonic);
        }
        templates
    }

    /// Major template for tonic `key_idx` (0 = C)
    pub fn get_major_template(&self, key_idx: u32) -> &[f32; 12] {
        &self.major[key_idx as usize % 12]
    }

    /// Minor template for tonic `key_idx` (0 = C)
    pub fn get_minor_template(&self, key_idx: u32) -> &[f32; 12] {
        &self.minor[key_idx as usize % 12]
    }
}

impl Default for KeyTemplates {
    fn default() -> Self {
        Self::new()
    }
}

/// `out[pc] = profile[(pc - tonic) mod 12]`
fn rotate(profile: &[f32; 12], tonic: usize) -> [f32; 12] {
    let mut out = [0.0; 12];
    for (pc, slot) in out.iter_mut().enumerate() {
        *slot = profile[(pc + 12 - tonic % 12) % 12];
    }
    out
}
