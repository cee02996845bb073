//! Viterbi matrix construction over the fixed three-state chain.
//!
//! The engine fills two parallel grids, one row per state and one column per
//! symbol:
//! 1. a probability matrix holding, for each `(state, column)`, the
//!    probability of the single best path ending there;
//! 2. a direction matrix recording whether that best path arrived
//!    horizontally (same state) or diagonally (previous state).
//!
//! Rows are filled top to bottom, columns left to right. A state with row
//! index `r` needs at least `r` earlier symbols to have walked through the
//! states before it, so cells with `column < r` are forced to zero.

use crate::matrix::{Direction, DirectionMatrix, ProbabilityMatrix};
use crate::model::{ModelParameters, State, Symbol};
use crate::report::ResultReport;
use crate::resolver::PathResolver;

/// Viterbi decoder bound to one immutable parameter set.
///
/// Typical usage:
/// ```
/// use splice_hmm::{ModelConfig, ViterbiEngine, validate::parse_sequence};
///
/// let model = ModelConfig::worked_example().into_model().unwrap();
/// let engine = ViterbiEngine::new(model);
/// let sequence = parse_sequence("tatat").unwrap();
/// let report = engine.run(&sequence);
/// assert!(report.is_probable());
/// assert_eq!(report.path.len(), 5);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ViterbiEngine {
    model: ModelParameters,
}

impl ViterbiEngine {
    pub fn new(model: ModelParameters) -> Self {
        Self { model }
    }

    /// Expose the parameter set this engine decodes with.
    pub fn model(&self) -> &ModelParameters {
        &self.model
    }

    /// Build the probability and direction matrices for `sequence`.
    ///
    /// An empty sequence yields two zero-column matrices. The call never
    /// fails: zero probabilities are valid values and simply propagate.
    pub fn build(&self, sequence: &[Symbol]) -> (ProbabilityMatrix, DirectionMatrix) {
        let n = sequence.len();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("viterbi_build", len = n);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut matrix = ProbabilityMatrix::new(n);
        let mut directions = DirectionMatrix::new(n);

        for state in State::ALL {
            for (i, &symbol) in sequence.iter().enumerate() {
                let emit = self.model.emission(state, symbol);

                let Some(prev) = state.predecessor() else {
                    // Exon: entered from Start at column 0, then only self-loops.
                    let value = if i == 0 {
                        emit
                    } else {
                        emit * matrix.get(state, i - 1) * self.model.self_loop(state)
                    };
                    matrix.set(state, i, value);
                    continue;
                };

                let (diagonal, horizontal) = if i == 0 {
                    (0.0, 0.0)
                } else {
                    (
                        matrix.get(prev, i - 1) * self.model.transition(prev, state),
                        matrix.get(state, i - 1) * self.model.self_loop(state),
                    )
                };

                // Ties fall through to horizontal.
                let (max_incoming, direction) = if diagonal > horizontal {
                    (diagonal, Direction::Diagonal)
                } else {
                    (horizontal, Direction::Horizontal)
                };

                let value = if i < state.index() {
                    0.0
                } else {
                    emit * max_incoming
                };
                matrix.set(state, i, value);
                directions.set(state, i, direction);
            }
        }

        (matrix, directions)
    }

    /// Build the matrices for `sequence` and trace back the best path.
    ///
    /// The returned report carries the probability matrix for rendering.
    pub fn run(&self, sequence: &[Symbol]) -> ResultReport {
        let (matrix, directions) = self.build(sequence);
        PathResolver::new(&self.model)
            .resolve(&matrix, &directions)
            .with_matrix(matrix)
    }
}
