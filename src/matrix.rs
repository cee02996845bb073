//! Fixed-height grids produced by the engine.
//!
//! Every grid has exactly one row per [`State`] and one column per sequence
//! position. Row order encodes the chain adjacency: row `r` can only be
//! entered diagonally from row `r - 1`.

use crate::model::State;

/// Best-predecessor direction recorded for a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Same state, previous column.
    #[default]
    Horizontal,
    /// Previous state, previous column.
    Diagonal,
}

impl Direction {
    /// Row offset applied during traceback (0 or -1).
    #[inline]
    pub fn offset(self) -> isize {
        match self {
            Direction::Horizontal => 0,
            Direction::Diagonal => -1,
        }
    }
}

/// Three-row grid with `len` columns, one row per [`State`].
#[derive(Clone, Debug, PartialEq)]
pub struct StateGrid<T> {
    rows: [Vec<T>; State::COUNT],
}

/// `matrix[state][column]`: probability of the best path ending in `state`
/// at `column`.
pub type ProbabilityMatrix = StateGrid<f64>;

/// Parallel grid of best-predecessor directions.
pub type DirectionMatrix = StateGrid<Direction>;

impl<T: Copy + Default> StateGrid<T> {
    /// Grid with `len` columns filled with `T::default()`.
    pub fn new(len: usize) -> Self {
        Self {
            rows: std::array::from_fn(|_| vec![T::default(); len]),
        }
    }
}

impl<T: Copy> StateGrid<T> {
    /// Number of columns (sequence positions).
    #[inline]
    pub fn len(&self) -> usize {
        self.rows[0].len()
    }

    /// Returns true if the grid has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `(state, column)`.
    ///
    /// # Panics
    /// Panics if `column >= self.len()`.
    #[inline]
    pub fn get(&self, state: State, column: usize) -> T {
        self.rows[state.index()][column]
    }

    #[inline]
    pub(crate) fn set(&mut self, state: State, column: usize, value: T) {
        self.rows[state.index()][column] = value;
    }

    /// Full row for `state`.
    pub fn row(&self, state: State) -> &[T] {
        &self.rows[state.index()]
    }

    /// Iterate `(state, row)` pairs in row order.
    pub fn rows(&self) -> impl Iterator<Item = (State, &[T])> + '_ {
        State::ALL
            .iter()
            .map(move |&s| (s, self.rows[s.index()].as_slice()))
    }

    /// Values of one column, in row order.
    pub fn column(&self, column: usize) -> [T; State::COUNT] {
        State::ALL.map(|s| self.get(s, column))
    }
}
