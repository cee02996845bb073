//! Model definition: hidden states, observed symbols and the fixed
//! Exon → 5' splice site → Intron parameter set.
//!
//! The topology is a left-to-right chain with self-loops:
//!
//! ```text
//! START --> Exon --> 5' --> Intron --> END
//!           |  ^     | ^    |   ^
//!           +--+     +-+    +---+
//! ```
//!
//! States and symbols are closed enums, so every table is a fixed-size array
//! indexed by discriminant and no lookup can miss.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Hidden state of the chain. The declaration order is the row order of
/// every matrix produced by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum State {
    Exon,
    FivePrime,
    Intron,
}

impl State {
    /// Number of hidden states.
    pub const COUNT: usize = 3;

    /// All states in row order.
    pub const ALL: [State; State::COUNT] = [State::Exon, State::FivePrime, State::Intron];

    /// Row index of this state (Exon 0, FivePrime 1, Intron 2).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// State occupying row `index`, if any.
    #[inline]
    pub fn from_index(index: usize) -> Option<State> {
        State::ALL.get(index).copied()
    }

    /// The state that feeds this one diagonally, `None` for Exon.
    #[inline]
    pub fn predecessor(self) -> Option<State> {
        match self {
            State::Exon => None,
            State::FivePrime => Some(State::Exon),
            State::Intron => Some(State::FivePrime),
        }
    }

    /// Human-readable label used in rendered reports.
    pub fn label(self) -> &'static str {
        match self {
            State::Exon => "Exon",
            State::FivePrime => "5 Prime",
            State::Intron => "Intron",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Observed nucleotide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    A,
    T,
    C,
    G,
}

impl Symbol {
    /// Size of the alphabet.
    pub const COUNT: usize = 4;

    /// Alphabet in emission-table column order.
    pub const ALL: [Symbol; Symbol::COUNT] = [Symbol::A, Symbol::T, Symbol::C, Symbol::G];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Case-insensitive decode of a single nucleotide letter.
    pub fn from_byte(byte: u8) -> Option<Symbol> {
        match byte.to_ascii_uppercase() {
            b'A' => Some(Symbol::A),
            b'T' => Some(Symbol::T),
            b'C' => Some(Symbol::C),
            b'G' => Some(Symbol::G),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::A => 'A',
            Symbol::T => 'T',
            Symbol::C => 'C',
            Symbol::G => 'G',
        }
    }
}

/// Character outside the A/T/C/G alphabet.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("{0:?} is not a nucleotide")]
pub struct UnknownSymbol(pub char);

impl TryFrom<u8> for Symbol {
    type Error = UnknownSymbol;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Symbol::from_byte(byte).ok_or(UnknownSymbol(char::from(byte)))
    }
}

impl TryFrom<char> for Symbol {
    type Error = UnknownSymbol;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        u8::try_from(c)
            .ok()
            .and_then(Symbol::from_byte)
            .ok_or(UnknownSymbol(c))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An observed nucleotide sequence.
pub type Sequence = Vec<Symbol>;

/// Emission probabilities of one state, in [`Symbol::ALL`] order.
pub type EmissionRow = [f64; Symbol::COUNT];

/// Transition and emission probabilities of the three-state chain.
///
/// Constructed once and never mutated; it is `Copy` and may be shared freely
/// between threads. No validation happens here, see [`crate::validate`] and
/// [`crate::builder::ModelBuilder`] for checked construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelParameters {
    p_exon_to_fiveprime: f64,
    p_fiveprime_to_intron: f64,
    p_intron_to_end: f64,
    p_exon_to_exon: f64,
    p_fiveprime_to_fiveprime: f64,
    p_intron_to_intron: f64,
    emission: [EmissionRow; State::COUNT],
}

impl ModelParameters {
    /// Build a parameter set from the three forward transitions and the
    /// per-state emission rows (Exon, FivePrime, Intron). Self-loop
    /// probabilities are the complements of the forward transitions.
    pub fn new(
        p_exon_to_fiveprime: f64,
        p_fiveprime_to_intron: f64,
        p_intron_to_end: f64,
        emission: [EmissionRow; State::COUNT],
    ) -> Self {
        Self {
            p_exon_to_fiveprime,
            p_fiveprime_to_intron,
            p_intron_to_end,
            p_exon_to_exon: 1.0 - p_exon_to_fiveprime,
            p_fiveprime_to_fiveprime: 1.0 - p_fiveprime_to_intron,
            p_intron_to_intron: 1.0 - p_intron_to_end,
            emission,
        }
    }

    pub fn p_exon_to_fiveprime(&self) -> f64 {
        self.p_exon_to_fiveprime
    }

    pub fn p_fiveprime_to_intron(&self) -> f64 {
        self.p_fiveprime_to_intron
    }

    /// Exit probability from Intron into the implicit End state.
    pub fn p_intron_to_end(&self) -> f64 {
        self.p_intron_to_end
    }

    /// Probability of staying in `state` between consecutive positions.
    #[inline]
    pub fn self_loop(&self, state: State) -> f64 {
        match state {
            State::Exon => self.p_exon_to_exon,
            State::FivePrime => self.p_fiveprime_to_fiveprime,
            State::Intron => self.p_intron_to_intron,
        }
    }

    /// Transition probability `from -> to`; 0 for any edge the chain lacks.
    #[inline]
    pub fn transition(&self, from: State, to: State) -> f64 {
        match (from, to) {
            (a, b) if a == b => self.self_loop(a),
            (State::Exon, State::FivePrime) => self.p_exon_to_fiveprime,
            (State::FivePrime, State::Intron) => self.p_fiveprime_to_intron,
            _ => 0.0,
        }
    }

    /// Probability of observing `symbol` while in `state`.
    #[inline]
    pub fn emission(&self, state: State, symbol: Symbol) -> f64 {
        self.emission[state.index()][symbol.index()]
    }

    /// Full emission row for `state`.
    pub fn emission_row(&self, state: State) -> &EmissionRow {
        &self.emission[state.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform() -> ModelParameters {
        ModelParameters::new(0.1, 0.5, 0.1, [[0.25; 4]; 3])
    }

    #[test]
    fn self_loops_are_complements() {
        let m = ModelParameters::new(0.1, 0.5, 0.25, [[0.25; 4]; 3]);
        assert!((m.self_loop(State::Exon) - 0.9).abs() < 1e-15);
        assert!((m.self_loop(State::FivePrime) - 0.5).abs() < 1e-15);
        assert!((m.self_loop(State::Intron) - 0.75).abs() < 1e-15);
    }

    #[test]
    fn extreme_inputs_do_not_fail() {
        let m = ModelParameters::new(0.0, 1.0, 1.0, [[0.0; 4]; 3]);
        assert_eq!(m.self_loop(State::Exon), 1.0);
        assert_eq!(m.self_loop(State::FivePrime), 0.0);
        assert_eq!(m.self_loop(State::Intron), 0.0);
    }

    #[test]
    fn backward_and_skipping_transitions_are_zero() {
        let m = uniform();
        assert_eq!(m.transition(State::Exon, State::Intron), 0.0);
        assert_eq!(m.transition(State::Intron, State::Exon), 0.0);
        assert_eq!(m.transition(State::FivePrime, State::Exon), 0.0);
        assert_eq!(m.transition(State::Exon, State::FivePrime), 0.1);
        assert_eq!(m.transition(State::FivePrime, State::Intron), 0.5);
    }

    #[test]
    fn emission_lookup_uses_symbol_column() {
        let m = ModelParameters::new(
            0.1,
            0.5,
            0.1,
            [
                [0.25, 0.25, 0.25, 0.25],
                [0.8, 0.15, 0.05, 0.0],
                [0.4, 0.4, 0.1, 0.1],
            ],
        );
        assert_eq!(m.emission(State::FivePrime, Symbol::A), 0.8);
        assert_eq!(m.emission(State::FivePrime, Symbol::G), 0.0);
        assert_eq!(m.emission(State::Intron, Symbol::C), 0.1);
    }

    #[test]
    fn state_order_and_predecessors() {
        assert_eq!(State::ALL.map(State::index), [0, 1, 2]);
        assert_eq!(State::from_index(2), Some(State::Intron));
        assert_eq!(State::from_index(3), None);
        assert_eq!(State::Exon.predecessor(), None);
        assert_eq!(State::Intron.predecessor(), Some(State::FivePrime));
    }

    #[test]
    fn symbols_decode_case_insensitively() {
        assert_eq!(Symbol::from_byte(b'a'), Some(Symbol::A));
        assert_eq!(Symbol::from_byte(b'G'), Some(Symbol::G));
        assert_eq!(Symbol::from_byte(b'N'), None);
        assert_eq!(Symbol::from_byte(b','), None);
        assert_eq!(Symbol::T.to_string(), "T");
    }

    #[test]
    fn symbols_convert_from_bytes_and_chars() {
        assert_eq!(Symbol::try_from(b'c'), Ok(Symbol::C));
        assert_eq!(Symbol::try_from(b'T'), Ok(Symbol::T));
        assert_eq!(Symbol::try_from(b'u'), Err(UnknownSymbol('u')));
        assert_eq!(Symbol::try_from('g'), Ok(Symbol::G));
        assert_eq!(Symbol::try_from('A'), Ok(Symbol::A));
        assert_eq!(Symbol::try_from('N'), Err(UnknownSymbol('N')));
        assert_eq!(Symbol::try_from('Ğ'), Err(UnknownSymbol('Ğ')));
        assert_eq!(UnknownSymbol('N').to_string(), "'N' is not a nucleotide");
    }
}
