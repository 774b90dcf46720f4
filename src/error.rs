use thiserror::Error;

/// Errors surfaced by sequence construction and formatting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// A sequence was requested from an empty list of candidates.
    #[error("cannot build a sequence from an empty list of candidates")]
    InvalidInput,

    /// A format pattern referenced a token outside `l s e f m p r R h t`.
    #[error("unknown format token: {0:?}")]
    UnknownToken(String),
}

pub type Result<T> = std::result::Result<T, SequenceError>;
