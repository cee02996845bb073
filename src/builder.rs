use crate::error::{Result, ValidationError};
use crate::model::{EmissionRow, ModelParameters, State};
use crate::validate::{validate_emissions, validate_probability};

/// Checked, field-by-field construction of [`ModelParameters`].
///
/// ```
/// use splice_hmm::{builder::ModelBuilder, model::State};
///
/// let model = ModelBuilder::new()
///     .with_exon_to_five_prime(0.1)
///     .with_five_prime_to_intron(0.5)
///     .with_intron_to_end(0.1)
///     .with_emissions(State::Exon, [0.25, 0.25, 0.25, 0.25])
///     .with_emissions(State::FivePrime, [0.8, 0.15, 0.05, 0.0])
///     .with_emissions(State::Intron, [0.4, 0.4, 0.1, 0.1])
///     .build()
///     .unwrap();
/// assert_eq!(model.p_intron_to_end(), 0.1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ModelBuilder {
    exon_to_five_prime: Option<f64>,
    five_prime_to_intron: Option<f64>,
    intron_to_end: Option<f64>,
    emissions: [Option<EmissionRow>; State::COUNT],
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_exon_to_five_prime(mut self, p: f64) -> Self {
        self.exon_to_five_prime = Some(p);
        self
    }
    pub fn with_five_prime_to_intron(mut self, p: f64) -> Self {
        self.five_prime_to_intron = Some(p);
        self
    }
    pub fn with_intron_to_end(mut self, p: f64) -> Self {
        self.intron_to_end = Some(p);
        self
    }
    pub fn with_emissions(mut self, state: State, row: EmissionRow) -> Self {
        self.emissions[state.index()] = Some(row);
        self
    }

    /// Validate every field and produce the parameter set.
    ///
    /// Fails on the first unset field, out-of-range probability or emission
    /// row that does not sum to 1.
    pub fn build(self) -> Result<ModelParameters> {
        let exon_to_five_prime = validate_probability(
            "exon_to_five_prime",
            self.exon_to_five_prime
                .ok_or(ValidationError::MissingParameter("exon_to_five_prime"))?,
        )?;
        let five_prime_to_intron = validate_probability(
            "five_prime_to_intron",
            self.five_prime_to_intron
                .ok_or(ValidationError::MissingParameter("five_prime_to_intron"))?,
        )?;
        let intron_to_end = validate_probability(
            "intron_to_end",
            self.intron_to_end
                .ok_or(ValidationError::MissingParameter("intron_to_end"))?,
        )?;

        let mut emission = [[0.0; 4]; State::COUNT];
        for state in State::ALL {
            let row = self.emissions[state.index()].ok_or(ValidationError::MissingParameter(
                match state {
                    State::Exon => "exon emissions",
                    State::FivePrime => "five_prime emissions",
                    State::Intron => "intron emissions",
                },
            ))?;
            emission[state.index()] = validate_emissions(state, row)?;
        }

        Ok(ModelParameters::new(
            exon_to_five_prime,
            five_prime_to_intron,
            intron_to_end,
            emission,
        ))
    }
}
