//! Text and JSON presentation of a [`ResultReport`].

use crate::matrix::ProbabilityMatrix;
use crate::model::Symbol;
use crate::report::ResultReport;
use crate::validate::sequence_to_string;
use serde_json::{json, Value};
use std::fmt::{self, Write};

const RULE_WIDTH: usize = 50;
const COLUMN_WIDTH: usize = 24;

/// Format a probability the way a reader expects: plain decimals for
/// ordinary magnitudes, scientific notation for very small or large ones.
pub fn format_probability(p: f64) -> String {
    if p != 0.0 && (p.abs() < 1e-4 || p.abs() >= 1e16) {
        format!("{p:e}")
    } else {
        format!("{p}")
    }
}

/// Render `report` for `sequence` as human-readable text.
///
/// A zero-probability report gets a single "no probable path" line and never
/// a table. Otherwise the path and its probability are printed, followed by
/// the probability matrix when `include_table` is set and the report carries
/// one.
pub fn render_text(sequence: &[Symbol], report: &ResultReport, include_table: bool) -> String {
    TextReport {
        sequence,
        report,
        include_table,
    }
    .to_string()
}

struct TextReport<'a> {
    sequence: &'a [Symbol],
    report: &'a ResultReport,
    include_table: bool,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, self.sequence, self.report, self.include_table)
    }
}

fn write_report(
    out: &mut impl fmt::Write,
    sequence: &[Symbol],
    report: &ResultReport,
    include_table: bool,
) -> fmt::Result {
    let seq = sequence_to_string(sequence);
    if !report.is_probable() {
        return writeln!(out, "--> Using the Viterbi algorithm, no probable path exists for {seq}");
    }

    let labels: Vec<&str> = report.path.iter().map(|s| s.label()).collect();
    writeln!(out, "Using Viterbi algorithm, the most probable state of {seq} is")?;
    writeln!(out, "{}", labels.join(", "))?;
    writeln!(
        out,
        "with overall probability of {}",
        format_probability(report.probability)
    )?;

    match report.matrix.as_ref() {
        Some(matrix) if include_table => write_table(out, sequence, matrix),
        _ => Ok(()),
    }
}

fn write_table(
    out: &mut impl fmt::Write,
    sequence: &[Symbol],
    matrix: &ProbabilityMatrix,
) -> fmt::Result {
    let rule = "-".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    let mut header = " ".repeat(COLUMN_WIDTH);
    for symbol in sequence {
        write!(header, "{:<width$}", symbol.to_string(), width = COLUMN_WIDTH)?;
    }
    writeln!(out, "{}", header.trim_end())?;
    for (state, row) in matrix.rows() {
        let mut line = format!("{:<width$}", state.label(), width = COLUMN_WIDTH);
        for &p in row {
            write!(line, "{:<width$}", format_probability(p), width = COLUMN_WIDTH)?;
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    writeln!(out, "{rule}")
}

/// Render `report` for `sequence` as a JSON object.
///
/// `path` is `null` when no probable path exists: a zero-probability
/// traceback still labels every column, but those labels carry no meaning.
pub fn render_json(sequence: &[Symbol], report: &ResultReport) -> Value {
    let probable = report.is_probable();
    let matrix = report.matrix.as_ref().map(|m| {
        m.rows()
            .map(|(state, row)| json!({ "state": state, "values": row }))
            .collect::<Vec<_>>()
    });
    json!({
        "sequence": sequence_to_string(sequence),
        "path": probable.then_some(&report.path),
        "probability": report.probability,
        "probable": probable,
        "matrix": matrix,
    })
}
