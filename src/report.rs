//! Decoding result handed to the presentation layer.

use crate::matrix::ProbabilityMatrix;
use crate::model::State;

/// Best path, its probability and optionally the matrix it was read from.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultReport {
    /// One state per input symbol.
    pub path: Vec<State>,
    /// Joint probability of `path` including the Intron → End exit.
    /// Exactly 0 when no probable path exists.
    pub probability: f64,
    /// Probability matrix, kept for rendering.
    pub matrix: Option<ProbabilityMatrix>,
}

impl ResultReport {
    pub fn new(path: Vec<State>, probability: f64) -> Self {
        Self {
            path,
            probability,
            matrix: None,
        }
    }

    /// Attach the probability matrix for display.
    pub fn with_matrix(mut self, matrix: ProbabilityMatrix) -> Self {
        self.matrix = Some(matrix);
        self
    }

    /// False for the "no probable path" outcome.
    #[inline]
    pub fn is_probable(&self) -> bool {
        self.probability > 0.0
    }

    /// Number of decoded positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}
