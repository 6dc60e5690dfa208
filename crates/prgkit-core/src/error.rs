//! Error handling for PRGKit
//!
//! Provides error types for all layers of the pipeline:
//! - Parse errors (grammar/geometry of .prg motion lines)
//! - Analysis errors (stress analysis preconditions and edge states)
//! - Config errors (settings persistence)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Parse errors are recovered per line inside the parser and never
//! abort a run; they exist so the recovery path has something precise
//! to log and so tests can assert on the rejection reason.

use thiserror::Error;

/// Parse error type
///
/// Represents a single .prg line that could not be turned into a
/// motion segment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token was not a parameter word followed by a number
    #[error("Malformed token '{token}'")]
    MalformedToken {
        /// The offending token text.
        token: String,
    },

    /// The same parameter word appeared twice on one line
    #[error("Duplicate parameter word '{word}'")]
    DuplicateWord {
        /// The repeated word letter.
        word: char,
    },

    /// Arc geometry cannot be derived from the given parameters
    #[error("Under-determined arc geometry: {reason}")]
    UnderDetermined {
        /// Why the geometry could not be derived.
        reason: String,
    },

    /// Arc parameters contradict each other
    #[error("Inconsistent arc geometry: {reason}")]
    InconsistentGeometry {
        /// Description of the contradiction.
        reason: String,
    },

    /// Arc radius is zero or negative
    #[error("Arc radius must be positive, got {radius}")]
    NonPositiveRadius {
        /// The rejected radius value.
        radius: f64,
    },

    /// Motion command with no feed rate in effect
    #[error("No feed rate in effect for motion command")]
    MissingFeed,

    /// Feed rate is zero or negative
    #[error("Feed rate must be positive, got {feed}")]
    NonPositiveFeed {
        /// The rejected feed value.
        feed: f64,
    },
}

/// Analysis error type
///
/// Represents violated preconditions and explicit edge states of the
/// stress analysis stage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The G-factor must be a positive, finite number
    #[error("G-factor must be positive and finite, got {g_factor}")]
    InvalidGFactor {
        /// The rejected G-factor value.
        g_factor: f64,
    },

    /// No curved segments, so no curvature bound exists
    #[error("No limiting factor: program contains no curved segments")]
    NoLimitingFactor,
}

/// Config error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Config files must be JSON or TOML
    #[error("Config file must be .json or .toml: {path}")]
    UnsupportedExtension {
        /// The offending path.
        path: String,
    },

    /// Config file content failed to deserialize or validate
    #[error("Invalid config: {reason}")]
    Invalid {
        /// Why the config was rejected.
        reason: String,
    },
}

/// Main error type for PRGKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs. I/O failures
/// stay distinguishable from analysis failures so a caller can tell a
/// user "analysis succeeded but saving failed".
#[derive(Error, Debug)]
pub enum Error {
    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Analysis error
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Config error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Check if this is an analysis error
    pub fn is_analysis_error(&self) -> bool {
        matches!(self, Error::Analysis(_))
    }

    /// Check if this is an I/O error
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::NonPositiveRadius { radius: -2.5 };
        assert_eq!(err.to_string(), "Arc radius must be positive, got -2.5");

        let err = ParseError::UnderDetermined {
            reason: "neither R nor I/J given".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Under-determined arc geometry: neither R nor I/J given"
        );
    }

    #[test]
    fn test_analysis_error_display() {
        let err = AnalysisError::InvalidGFactor { g_factor: 0.0 };
        assert_eq!(
            err.to_string(),
            "G-factor must be positive and finite, got 0"
        );
        assert_eq!(
            AnalysisError::NoLimitingFactor.to_string(),
            "No limiting factor: program contains no curved segments"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ParseError::MissingFeed.into();
        assert!(err.is_parse_error());

        let err: Error = AnalysisError::NoLimitingFactor.into();
        assert!(err.is_analysis_error());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(err.is_io_error());
        assert!(!err.is_analysis_error());
    }
}
