//! Error types for the harmonic analysis engine
//!
//! The analysis entry points degrade to documented fallbacks instead of failing on
//! well-formed input. This type only surfaces for invalid configuration,
//! cancellation and file decoding.

use std::fmt;

/// Errors that can occur during analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Audio decoding error
    DecodingError(String),

    /// Analysis was aborted through the caller's cancel flag
    Cancelled,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            AnalysisError::Cancelled => write!(f, "Analysis cancelled"),
        }
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AnalysisError::InvalidInput("window too short".to_string());
        assert_eq!(err.to_string(), "Invalid input: window too short");
        assert_eq!(AnalysisError::Cancelled.to_string(), "Analysis cancelled");
        let err = AnalysisError::DecodingError("no audio track".to_string());
        assert_eq!(err.to_string(), "Decoding error: no audio track");
    }
}
