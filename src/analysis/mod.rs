//! Analysis and result aggregation modules
//!
//! Combines all feature extraction results into the final analysis:
//! - Chord timeline construction
//! - Confidence summary
//! - Result types

pub mod confidence;
pub mod result;
pub mod timeline;
