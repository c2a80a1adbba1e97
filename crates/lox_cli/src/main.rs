//! lox: Command-line front end for the Lox tokenizer.
//!
//! Usage:
//!   lox tokenize [--format text|json] [--pretty] <FILE>...
//!
//! Tokens go to stdout, diagnostics to stderr. Exit status is 0 on success,
//! 65 when any lexical error was reported and 1 for usage or I/O errors.

use clap::{Args, Parser as ClapParser, Subcommand, ValueEnum};
use lox_diagnostics::Diagnostic;
use lox_scanner::{scan_many, ScanResult};
use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Report};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;

const EXIT_SUCCESS: i32 = 0;
const EXIT_USAGE: i32 = 1;
const EXIT_LEXICAL_ERROR: i32 = 65;

#[derive(ClapParser, Debug)]
#[command(name = "lox", about = "Lox tokenizer", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan source files and print one token per line.
    Tokenize(TokenizeArgs),
}

#[derive(Args, Debug)]
struct TokenizeArgs {
    /// Lox source files to tokenize.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Output format for tokens.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Render diagnostics with source snippets (text format only).
    #[arg(long)]
    pretty: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

/// Failures that stop the driver before or while printing results.
#[derive(Debug, Error, miette::Diagnostic)]
enum CliError {
    #[error("failed to read '{}'", .path.display())]
    #[diagnostic(code(lox::io))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not valid UTF-8", .path.display())]
    #[diagnostic(code(lox::encoding), help("Lox source files must be UTF-8 encoded"))]
    InvalidUtf8 { path: PathBuf },

    #[error("failed to write output")]
    #[diagnostic(code(lox::output))]
    Write(#[from] io::Error),

    #[error("failed to serialize tokens")]
    #[diagnostic(code(lox::json))]
    Json(#[from] serde_json::Error),
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not usage errors.
            let code = if err.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS };
            let _ = err.print();
            process::exit(code);
        }
    };

    let exit_code = match cli.command {
        Command::Tokenize(args) => match run_tokenize(&args) {
            Ok(code) => code,
            Err(err) => {
                eprintln!("{:?}", Report::new(err));
                EXIT_USAGE
            }
        },
    };
    process::exit(exit_code);
}

/// Install a stderr subscriber, only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run_tokenize(args: &TokenizeArgs) -> Result<i32, CliError> {
    let contents = args
        .files
        .iter()
        .map(|path| read_source(path))
        .collect::<Result<Vec<_>, _>>()?;
    let sources = args
        .files
        .iter()
        .zip(&contents)
        .map(|(path, bytes)| {
            simdutf8::basic::from_utf8(bytes).map_err(|_| CliError::InvalidUtf8 { path: path.clone() })
        })
        .collect::<Result<Vec<&str>, _>>()?;

    let results = scan_many(sources.as_slice());

    let mut out = BufWriter::new(io::stdout().lock());
    for ((path, source), result) in args.files.iter().zip(&sources).zip(&results) {
        tracing::info!(
            path = %path.display(),
            tokens = result.tokens.len(),
            diagnostics = result.diagnostics.len(),
            "tokenized"
        );
        match args.format {
            OutputFormat::Text => {
                print_tokens(&mut out, result)?;
                out.flush()?;
                print_diagnostics(path, source, result, args.pretty);
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut out, result)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;

    if results.iter().any(ScanResult::has_errors) {
        Ok(EXIT_LEXICAL_ERROR)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn read_source(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn print_tokens(out: &mut impl Write, result: &ScanResult) -> io::Result<()> {
    for token in &result.tokens {
        writeln!(out, "{}", token)?;
    }
    Ok(())
}

fn print_diagnostics(path: &Path, source: &str, result: &ScanResult, pretty: bool) {
    for diagnostic in &result.diagnostics {
        if pretty {
            eprintln!("{:?}", pretty_report(path, source, diagnostic));
        } else {
            eprintln!("{}", diagnostic);
        }
    }
}

/// Build a miette report pointing at the offending source text.
fn pretty_report(path: &Path, source: &str, diagnostic: &Diagnostic) -> Report {
    let report = MietteDiagnostic::new(diagnostic.to_string())
        .with_code(format!("lox::E{:04}", diagnostic.code))
        .with_label(LabeledSpan::at(diagnostic.span.to_range(), "here"));
    Report::new(report).with_source_code(NamedSource::new(path.display().to_string(), source.to_string()))
}
