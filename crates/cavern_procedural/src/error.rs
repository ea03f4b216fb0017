//! # Cave Error Types
//!
//! All errors that can be surfaced to a caller of the cave engine.
//!
//! Only boundary validation produces these. Internal invariants (buffer
//! sizing, frame coherence) are asserted, never reported.

use thiserror::Error;

/// Errors that can occur when configuring or driving a cave.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaveError {
    /// Width leaves no interior, or the interior is not a whole number of PRNG words.
    #[error("invalid width {width}: width - 4 must be a positive multiple of 8")]
    InvalidWidth {
        /// The rejected width.
        width: usize,
    },

    /// Height too small to hold the frame plus one interior row.
    #[error("invalid height {height}: must be at least 5")]
    InvalidHeight {
        /// The rejected height.
        height: usize,
    },

    /// Wall density outside 0..=100 percent.
    #[error("invalid density {0}%: must be within 0..=100")]
    InvalidDensity(u8),

    /// Scrolling zero rows is not a forward step.
    #[error("scroll distance must be at least one row")]
    EmptyScroll,

    /// Invalid configuration file contents.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration {path}: {reason}")]
    ConfigIo {
        /// Path that was being read.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },
}

/// Result type for cave operations.
pub type CaveResult<T> = Result<T, CaveError>;
