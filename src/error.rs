//! Errors raised while turning raw input into model parameters and sequences.
//!
//! The decoding core itself never fails; only this validation layer does.

use crate::model::State;
use thiserror::Error;

/// Rejected model or sequence input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Probability outside [0, 1] or NaN.
    #[error("probability `{name}` must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: String, value: f64 },

    /// Emission probabilities of one state do not add up to 1.
    #[error("emission probabilities for {state} sum to {sum}, expected 1")]
    EmissionSum { state: State, sum: f64 },

    /// Character outside the A/T/C/G alphabet.
    #[error("invalid nucleotide {found:?} at position {position}; use only A, T, C or G")]
    InvalidSymbol { position: usize, found: char },

    /// Builder field left unset.
    #[error("missing model parameter: {0}")]
    MissingParameter(&'static str),

    /// Model file could not be read or parsed.
    #[error("model configuration error: {0}")]
    Config(String),
}

/// Convenience alias for validation results.
pub type Result<T> = std::result::Result<T, ValidationError>;
