//! Traceback over the direction matrix.

use crate::matrix::{DirectionMatrix, ProbabilityMatrix};
use crate::model::{ModelParameters, State};
use crate::report::ResultReport;

/// Recovers the best state path from a filled direction matrix.
///
/// The path always ends in Intron, since End is only reachable from Intron.
/// Its probability is read once from the last Intron cell and scaled by the
/// Intron → End exit probability; the backward walk only relabels columns.
#[derive(Clone, Copy, Debug)]
pub struct PathResolver<'m> {
    model: &'m ModelParameters,
}

impl<'m> PathResolver<'m> {
    pub fn new(model: &'m ModelParameters) -> Self {
        Self { model }
    }

    /// Trace back through `directions` and score the path against `matrix`.
    ///
    /// The sequence length is the shared column count of both grids. A
    /// returned probability of 0 means no probable path exists.
    ///
    /// # Panics
    /// Panics if the two grids disagree on their column count.
    pub fn resolve(&self, matrix: &ProbabilityMatrix, directions: &DirectionMatrix) -> ResultReport {
        assert_eq!(
            matrix.len(),
            directions.len(),
            "probability and direction matrices must have the same width"
        );
        let n = matrix.len();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("resolve", len = n);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if n == 0 {
            #[cfg(feature = "tracing")]
            tracing::debug!("empty sequence, no probable path");
            return ResultReport::new(Vec::new(), 0.0);
        }

        let mut path = vec![State::Exon; n];
        let mut row = State::Intron.index();
        for i in (0..n).rev() {
            // Row r cannot be occupied before column r.
            row = row.min(i);
            let state = State::ALL[row];
            path[i] = state;
            if row != 0 {
                row = row.saturating_add_signed(directions.get(state, i).offset());
            }
        }

        let probability = matrix.get(State::Intron, n - 1) * self.model.p_intron_to_end();
        #[cfg(feature = "tracing")]
        {
            if probability == 0.0 {
                tracing::debug!(len = n, "no probable path");
            }
        }
        ResultReport::new(path, probability)
    }
}
