//! Exon / 5' splice site / Intron decoding with the Viterbi algorithm.
//!
//! This crate labels every nucleotide of a DNA sequence with one of three
//! hidden region types, arranged as a fixed left-to-right chain:
//!
//! ```text
//! START --> Exon --> 5' --> Intron --> END
//! ```
//!
//! Each state may repeat itself; no state can be skipped or re-entered.
//!
//! ## Core idea
//! 1. Describe the chain with a [`ModelParameters`] value (three forward
//!    transition probabilities plus a 3 × 4 emission table), usually through
//!    the validating [`ModelBuilder`] or a JSON [`ModelConfig`].
//! 2. Let [`ViterbiEngine`] fill the probability and direction matrices.
//! 3. Let [`PathResolver`] trace back from the last Intron cell to obtain the
//!    best path and its probability as a [`ResultReport`].
//!
//! A report whose probability is exactly 0 means no probable path exists,
//! for example when the sequence is too short to reach Intron.
//!
//! ## Quick start
//! ```
//! use splice_hmm::{model::State, validate::parse_sequence, ModelConfig, ViterbiEngine};
//!
//! let model = ModelConfig::worked_example().into_model().unwrap();
//! let report = ViterbiEngine::new(model).run(&parse_sequence("TATAT").unwrap());
//! assert_eq!(
//!     report.path,
//!     vec![State::Exon, State::FivePrime, State::Intron, State::Intron, State::Intron]
//! );
//! assert!((report.probability - 5.184e-5).abs() < 1e-12);
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod model;
pub mod render;
pub mod report;
pub mod resolver;
pub mod validate;

pub use crate::builder::ModelBuilder;
pub use crate::config::ModelConfig;
pub use crate::engine::ViterbiEngine;
pub use crate::error::ValidationError;
pub use crate::model::ModelParameters;
pub use crate::report::ResultReport;
pub use crate::resolver::PathResolver;
