//! Error types for the sequence engine.
//!
//! Combinators themselves never fail. Errors only arise when building
//! configuration, such as compiling a match pattern.

use thiserror::Error;

/// Sequencer error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Pattern failed to compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type alias for sequencer operations.
pub type Result<T> = std::result::Result<T, Error>;
