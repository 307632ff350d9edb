//! Error types surfaced by the analyzer.
//!
//! All errors are local and synchronous: the analyzer performs no I/O and
//! has no transient-failure modes, so nothing here is ever retried. On any
//! error the analyzer leaves previously produced datasets untouched, which
//! lets a caller keep displaying stale-but-valid data.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Sample count of an incoming frame does not match its declared
    /// dimensions.
    #[error("frame carries {actual} samples, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Pixel format tag outside the recognized set.
    #[error("unsupported pixel format `{0}`")]
    UnsupportedFormat(String),

    /// Rejected analyzer configuration.
    #[error("invalid range configuration: {0}")]
    InvalidRange(String),
}
