//! Input validation for model parameters and sequences.
//!
//! Everything here runs before the engine does; the engine assumes its
//! inputs already passed these checks.

use crate::error::{Result, ValidationError};
use crate::model::{EmissionRow, Sequence, State, Symbol, UnknownSymbol};

/// Maximum distance from 1.0 tolerated for a state's emission sum.
pub const EMISSION_SUM_TOLERANCE: f64 = 1e-9;

/// Accept `value` if it is a probability in [0, 1].
pub fn validate_probability(name: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::ProbabilityOutOfRange {
            name: name.to_string(),
            value,
        })
    }
}

/// Check every emission of `state` and that the row sums to 1.
pub fn validate_emissions(state: State, row: EmissionRow) -> Result<EmissionRow> {
    for (symbol, &p) in Symbol::ALL.iter().zip(row.iter()) {
        validate_probability(&format!("emission {symbol} in {state}"), p)?;
    }
    let sum: f64 = row.iter().sum();
    if (sum - 1.0).abs() > EMISSION_SUM_TOLERANCE {
        return Err(ValidationError::EmissionSum { state, sum });
    }
    Ok(row)
}

/// Parse a nucleotide string, case-insensitively.
///
/// Surrounding whitespace is ignored and the empty string is a valid,
/// empty sequence.
///
/// ```
/// use splice_hmm::{model::Symbol, validate::parse_sequence};
///
/// assert_eq!(parse_sequence("gAt").unwrap(), vec![Symbol::G, Symbol::A, Symbol::T]);
/// assert!(parse_sequence("GATN").is_err());
/// ```
pub fn parse_sequence(text: &str) -> Result<Sequence> {
    text.trim()
        .chars()
        .enumerate()
        .map(|(position, c)| {
            Symbol::try_from(c).map_err(|UnknownSymbol(found)| ValidationError::InvalidSymbol {
                position,
                found,
            })
        })
        .collect()
}

/// Render a sequence back to upper-case text.
pub fn sequence_to_string(sequence: &[Symbol]) -> String {
    sequence.iter().map(|s| s.as_char()).collect()
}
