use proptest::prelude::*;
use splice_hmm::{
    model::{ModelParameters, State, Symbol},
    ViterbiEngine,
};

fn emission_row() -> impl Strategy<Value = [f64; 4]> {
    prop::array::uniform4(0.0f64..=1.0).prop_map(|w| {
        let total: f64 = w.iter().sum();
        if total == 0.0 {
            [0.25; 4]
        } else {
            w.map(|x| x / total)
        }
    })
}

fn model() -> impl Strategy<Value = ModelParameters> {
    (
        0.0f64..=1.0,
        0.0f64..=1.0,
        0.0f64..=1.0,
        emission_row(),
        emission_row(),
        emission_row(),
    )
        .prop_map(|(e5, fi, ie, ex, fp, intr)| ModelParameters::new(e5, fi, ie, [ex, fp, intr]))
}

fn sequence(max_len: usize) -> impl Strategy<Value = Vec<Symbol>> {
    prop::collection::vec((0usize..4).prop_map(|i| Symbol::ALL[i]), 0..=max_len)
}

/// Joint probability of an explicit path, End transition included.
fn score(model: &ModelParameters, seq: &[Symbol], path: &[State]) -> f64 {
    let mut p = model.emission(path[0], seq[0]);
    for i in 1..seq.len() {
        p *= model.transition(path[i - 1], path[i]) * model.emission(path[i], seq[i]);
    }
    p * model.p_intron_to_end()
}

/// Exhaustive maximum over every chain path that starts in Exon and ends in
/// Intron. A path is fixed by the two columns at which 5' and Intron begin.
fn brute_force_best(model: &ModelParameters, seq: &[Symbol]) -> f64 {
    let n = seq.len();
    let mut best = 0.0f64;
    for five in 1..n {
        for intron in (five + 1)..n {
            let path: Vec<State> = (0..n)
                .map(|i| {
                    if i >= intron {
                        State::Intron
                    } else if i >= five {
                        State::FivePrime
                    } else {
                        State::Exon
                    }
                })
                .collect();
            best = best.max(score(model, seq, &path));
        }
    }
    best
}

fn rel_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(f64::MIN_POSITIVE)
}

proptest! {
    #[test]
    fn exon_row_is_non_increasing(m in model(), seq in sequence(40)) {
        let (matrix, _) = ViterbiEngine::new(m).build(&seq);
        for w in matrix.row(State::Exon).windows(2) {
            prop_assert!(w[1] <= w[0]);
        }
    }

    #[test]
    fn cells_are_probabilities_and_entry_columns_are_zero(m in model(), seq in sequence(30)) {
        let (matrix, _) = ViterbiEngine::new(m).build(&seq);
        for (state, row) in matrix.rows() {
            for (i, &p) in row.iter().enumerate() {
                prop_assert!((0.0..=1.0).contains(&p));
                if i < state.index() {
                    prop_assert_eq!(p, 0.0);
                }
            }
        }
    }

    #[test]
    fn build_is_a_pure_function(m in model(), seq in sequence(30)) {
        let engine = ViterbiEngine::new(m);
        let (m1, d1) = engine.build(&seq);
        let (m2, d2) = engine.build(&seq);
        for state in State::ALL {
            let bits1: Vec<u64> = m1.row(state).iter().map(|p| p.to_bits()).collect();
            let bits2: Vec<u64> = m2.row(state).iter().map(|p| p.to_bits()).collect();
            prop_assert_eq!(bits1, bits2);
        }
        prop_assert_eq!(d1, d2);
    }

    #[test]
    fn path_is_a_valid_chain(m in model(), seq in sequence(30)) {
        let report = ViterbiEngine::new(m).run(&seq);
        prop_assert_eq!(report.path.len(), seq.len());
        if let Some(first) = report.path.first() {
            prop_assert_eq!(*first, State::Exon);
        }
        for (i, &state) in report.path.iter().enumerate() {
            prop_assert!(state.index() <= i);
        }
        for w in report.path.windows(2) {
            let step = w[1].index() as isize - w[0].index() as isize;
            prop_assert!(step == 0 || step == 1);
        }
        if seq.len() >= 3 {
            prop_assert_eq!(report.path.last().copied(), Some(State::Intron));
        }
    }

    #[test]
    fn probability_matches_last_intron_cell(m in model(), seq in sequence(30)) {
        let report = ViterbiEngine::new(m).run(&seq);
        let matrix = report.matrix.as_ref().unwrap();
        if seq.is_empty() {
            prop_assert_eq!(report.probability, 0.0);
        } else {
            let expected = matrix.get(State::Intron, seq.len() - 1) * m.p_intron_to_end();
            prop_assert_eq!(report.probability.to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn agrees_with_exhaustive_search(m in model(), seq in sequence(8)) {
        let report = ViterbiEngine::new(m).run(&seq);
        let best = brute_force_best(&m, &seq);
        prop_assert!(rel_close(report.probability, best), "{} vs {}", report.probability, best);
        if report.is_probable() {
            let traced = score(&m, &seq, &report.path);
            prop_assert!(rel_close(traced, report.probability), "{} vs {}", traced, report.probability);
        }
    }
}
