use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use splice_hmm::model::{EmissionRow, State};
use splice_hmm::render::{render_json, render_text};
use splice_hmm::validate::parse_sequence;
use splice_hmm::{ModelBuilder, ModelConfig, ModelParameters, ValidationError, ViterbiEngine};

fn main() -> ExitCode {
    #[cfg(feature = "tracing")]
    init_tracing();

    let stdout = io::stdout();
    let stderr = io::stderr();
    match run(env::args().skip(1), &mut stdout.lock(), &mut stderr.lock()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("splice-decode output error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Decode every sequence named in `args` and return the process exit code:
/// 0 on success, 1 if any sequence failed to parse, 2 for bad options or an
/// invalid model.
fn run<I, T>(args: I, out: &mut impl Write, err: &mut impl Write) -> io::Result<u8>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    let options = match Options::parse(args) {
        Ok(Command::Decode(opts)) => opts,
        Ok(Command::Help) => {
            out.write_all(HELP.as_bytes())?;
            return Ok(0);
        }
        Err(msg) => {
            writeln!(err, "splice-decode: {msg}")?;
            err.write_all(HELP.as_bytes())?;
            return Ok(2);
        }
    };

    let model = match options.model.load() {
        Ok(model) => model,
        Err(e) => {
            writeln!(err, "splice-decode: {e}")?;
            return Ok(2);
        }
    };

    let engine = ViterbiEngine::new(model);
    let mut failed = 0usize;
    let mut json_reports = Vec::new();

    for raw in &options.sequences {
        let sequence = match parse_sequence(raw) {
            Ok(seq) => seq,
            Err(e) => {
                writeln!(err, "splice-decode: {raw:?}: {e}")?;
                failed += 1;
                continue;
            }
        };
        let report = engine.run(&sequence);
        match options.format {
            OutputFormat::Text => writeln!(out, "{}", render_text(&sequence, &report, options.table))?,
            OutputFormat::Json => json_reports.push(render_json(&sequence, &report)),
        }
    }

    if let OutputFormat::Json = options.format {
        serde_json::to_writer_pretty(&mut *out, &json_reports)?;
        writeln!(out)?;
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

enum Command {
    Help,
    Decode(Options),
}

struct Options {
    model: ModelSource,
    format: OutputFormat,
    table: bool,
    sequences: Vec<String>,
}

enum ModelSource {
    Example,
    File(PathBuf),
    Flags(ModelBuilder),
}

impl ModelSource {
    fn load(self) -> Result<ModelParameters, ValidationError> {
        match self {
            ModelSource::Example => ModelConfig::worked_example().into_model(),
            ModelSource::File(path) => ModelConfig::from_path(path)?.into_model(),
            ModelSource::Flags(builder) => builder.build(),
        }
    }
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Command, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Text;
        let mut table = true;
        let mut example = false;
        let mut model_path = None;
        let mut builder = ModelBuilder::new();
        let mut have_flags = false;
        let mut sequences = Vec::new();

        while let Some(arg) = args.next() {
            let arg = arg.into();
            let (name, inline) = match arg.split_once('=') {
                Some((n, v)) if n.starts_with("--") => (n.to_string(), Some(v.to_string())),
                _ => (arg.clone(), None),
            };
            let mut value = |flag: &str| -> Result<String, String> {
                match inline.clone() {
                    Some(v) => Ok(v),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {flag}")),
                }
            };

            match name.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "--example" => example = true,
                "--no-table" => table = false,
                "--format" => format = OutputFormat::from_str(&value("--format")?)?,
                "--model" => model_path = Some(PathBuf::from(value("--model")?)),
                "--transitions" => {
                    let [e5, fi, ie] = parse_list::<3>("--transitions", &value("--transitions")?)?;
                    builder = builder
                        .with_exon_to_five_prime(e5)
                        .with_five_prime_to_intron(fi)
                        .with_intron_to_end(ie);
                    have_flags = true;
                }
                "--exon" | "--five-prime" | "--intron" => {
                    let state = match name.as_str() {
                        "--exon" => State::Exon,
                        "--five-prime" => State::FivePrime,
                        _ => State::Intron,
                    };
                    let row: EmissionRow = parse_list::<4>(&name, &value(&name)?)?;
                    builder = builder.with_emissions(state, row);
                    have_flags = true;
                }
                other if other.starts_with("--") => {
                    return Err(format!("unrecognized argument '{other}'"));
                }
                _ => sequences.push(arg),
            }
        }

        let model = match (example, model_path, have_flags) {
            (true, None, false) => ModelSource::Example,
            (false, Some(path), false) => ModelSource::File(path),
            (false, None, true) => ModelSource::Flags(builder),
            (false, None, false) => {
                return Err("no model given; use --model, --example or the probability flags".into())
            }
            _ => return Err("--model, --example and probability flags are mutually exclusive".into()),
        };
        if sequences.is_empty() {
            return Err("no sequence given".into());
        }

        Ok(Command::Decode(Self {
            model,
            format,
            table,
            sequences,
        }))
    }
}

const HELP: &str = "\
Usage: splice-decode [OPTIONS] <SEQUENCE>...

Labels each nucleotide of every SEQUENCE as Exon, 5 Prime or Intron.

Model (pick one):
  --model <PATH>                JSON model file
  --example                     Built-in example parameters
  --transitions <E5,5I,IEnd>    Exon->5', 5'->Intron and Intron->End probabilities
  --exon <A,T,C,G>              Exon emission probabilities
  --five-prime <A,T,C,G>        5' emission probabilities
  --intron <A,T,C,G>            Intron emission probabilities

Output:
  --format <text|json>          Output format (default: text)
  --no-table                    Omit the probability matrix in text output
  -h, --help                    Print this help message

Examples:
  splice-decode --example tatat aatgt aga
  splice-decode --transitions 0.1,0.5,0.1 --exon 0.25,0.25,0.25,0.25 \\
      --five-prime 0.8,0.15,0.05,0 --intron 0.4,0.4,0.1,0.1 TATAT
";

fn parse_list<const N: usize>(flag: &str, value: &str) -> Result<[f64; N], String> {
    let parsed = value
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| format!("{flag} expects {N} comma-separated numbers"))?;
    <[f64; N]>::try_from(parsed).map_err(|_| format!("{flag} expects {N} comma-separated numbers"))
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }
}
