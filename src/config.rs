//! JSON model description.
//!
//! ```json
//! {
//!   "transitions": { "exon_to_five_prime": 0.1, "five_prime_to_intron": 0.5, "intron_to_end": 0.1 },
//!   "emissions": {
//!     "exon":       { "A": 0.25, "T": 0.25, "C": 0.25, "G": 0.25 },
//!     "five_prime": { "A": 0.8,  "T": 0.15, "C": 0.05, "G": 0.0 },
//!     "intron":     { "A": 0.4,  "T": 0.4,  "C": 0.1,  "G": 0.1 }
//!   }
//! }
//! ```

use crate::builder::ModelBuilder;
use crate::error::{Result, ValidationError};
use crate::model::{EmissionRow, ModelParameters, State};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Forward transition probabilities; self-loops are derived.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionConfig {
    pub exon_to_five_prime: f64,
    pub five_prime_to_intron: f64,
    pub intron_to_end: f64,
}

/// Emission probabilities of one state, keyed by nucleotide.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmissionConfig {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "T")]
    pub t: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "G")]
    pub g: f64,
}

impl EmissionConfig {
    fn row(&self) -> EmissionRow {
        [self.a, self.t, self.c, self.g]
    }
}

impl From<EmissionRow> for EmissionConfig {
    fn from(row: EmissionRow) -> Self {
        let [a, t, c, g] = row;
        Self { a, t, c, g }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmissionsConfig {
    pub exon: EmissionConfig,
    pub five_prime: EmissionConfig,
    pub intron: EmissionConfig,
}

/// Serializable form of a [`ModelParameters`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    pub transitions: TransitionConfig,
    pub emissions: EmissionsConfig,
}

impl ModelConfig {
    /// Exon/5'/Intron parameters used throughout the documentation.
    pub fn worked_example() -> Self {
        Self {
            transitions: TransitionConfig {
                exon_to_five_prime: 0.1,
                five_prime_to_intron: 0.5,
                intron_to_end: 0.1,
            },
            emissions: EmissionsConfig {
                exon: [0.25, 0.25, 0.25, 0.25].into(),
                five_prime: [0.8, 0.15, 0.05, 0.0].into(),
                intron: [0.4, 0.4, 0.1, 0.1].into(),
            },
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ValidationError::Config(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ValidationError::Config(e.to_string()))
    }

    /// Validate and convert into the engine's parameter set.
    pub fn into_model(self) -> Result<ModelParameters> {
        ModelBuilder::new()
            .with_exon_to_five_prime(self.transitions.exon_to_five_prime)
            .with_five_prime_to_intron(self.transitions.five_prime_to_intron)
            .with_intron_to_end(self.transitions.intron_to_end)
            .with_emissions(State::Exon, self.emissions.exon.row())
            .with_emissions(State::FivePrime, self.emissions.five_prime.row())
            .with_emissions(State::Intron, self.emissions.intron.row())
            .build()
    }
}

impl From<&ModelParameters> for ModelConfig {
    fn from(model: &ModelParameters) -> Self {
        Self {
            transitions: TransitionConfig {
                exon_to_five_prime: model.p_exon_to_fiveprime(),
                five_prime_to_intron: model.p_fiveprime_to_intron(),
                intron_to_end: model.p_intron_to_end(),
            },
            emissions: EmissionsConfig {
                exon: (*model.emission_row(State::Exon)).into(),
                five_prime: (*model.emission_row(State::FivePrime)).into(),
                intron: (*model.emission_row(State::Intron)).into(),
            },
        }
    }
}
