//! Error types for sequence construction
//!
//! End of sequence is never an error: it is `None` from `next()`.
//! Everything in here is a programmer error caught at construction time.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeqError>;

#[derive(Debug, Error)]
pub enum SeqError {
    #[error("Step must not be zero")]
    ZeroStep,

    #[error("Odometer space exceeded: {current} > {max}")]
    OdometerSpaceExceeded { current: usize, max: usize },

    #[error("Too many tee branches: {current} > {max}")]
    TooManyBranches { current: usize, max: usize },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}
