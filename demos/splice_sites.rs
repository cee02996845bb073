//! Example: decoding a few short sequences with the built-in parameters.
//!
//! Run with:
//! `cargo run --example splice_sites`

use splice_hmm::{
    render::render_text,
    validate::parse_sequence,
    ModelConfig, ViterbiEngine,
};

fn main() {
    // Exon emits uniformly, the 5' site strongly prefers A and never emits G,
    // Intron is A/T rich.
    let model = ModelConfig::worked_example()
        .into_model()
        .expect("built-in parameters are valid");
    let engine = ViterbiEngine::new(model);

    for text in ["tatat", "aatgt", "aga", "", "ATTAGCTTAA"] {
        let sequence = parse_sequence(text).expect("only A/T/C/G used above");
        let report = engine.run(&sequence);
        println!("{}", render_text(&sequence, &report, true));
    }
}
