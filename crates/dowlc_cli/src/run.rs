use crate::args::{Args, Emit};
use dowlc::{Compilation, Frontend, FrontendError};
use eyre::WrapErr;
use owo_colors::{OwoColorize, Stream};
use std::io;
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, instrument};

/// Exit status used when the source file is rejected
pub const DATA_ERROR: u8 = 65;

/// How a run ended, when it was able to check the file at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// The source was rejected by one of the stages
    DataError,
}

impl From<Status> for ExitCode {
    fn from(value: Status) -> Self {
        match value {
            Status::Success => ExitCode::SUCCESS,
            Status::DataError => ExitCode::from(DATA_ERROR),
        }
    }
}

/// Checks the file named by `args`, writing artifacts to `out` and diagnostics to `err`
#[instrument(skip_all, fields(file = ?args.file))]
pub fn run(args: &Args, out: &mut dyn Write, err: &mut dyn Write) -> eyre::Result<Status> {
    let source = std::fs::read_to_string(&args.file)
        .wrap_err_with(|| format!("could not read {:?}", args.file))?;
    let emit = args.emit();
    let frontend = Frontend::builder()
        .collect_trace(emit.contains(&Emit::Trace))
        .build();

    match frontend.compile(&source) {
        Ok(compilation) => {
            write_artifacts(&compilation, &emit, out)?;
            debug!("{:?} is valid", args.file);
            Ok(Status::Success)
        }
        Err(error) => {
            debug!("{:?} was rejected in the {} stage", args.file, error.stage());
            write_diagnostic(&error, &source, err)?;
            Ok(Status::DataError)
        }
    }
}

/// Writes `<Stage> Error: <message>` followed by an excerpt of the source
pub fn write_diagnostic(error: &FrontendError, source: &str, out: &mut dyn Write) -> io::Result<()> {
    let label = format!("{} Error:", error.stage());
    write!(
        out,
        "{} {}",
        label.if_supports_color(Stream::Stderr, |label| label.red()),
        error.report(source)
    )
}

fn write_artifacts(
    compilation: &Compilation,
    emit: &[Emit],
    out: &mut dyn Write,
) -> io::Result<()> {
    let headers = emit.len() > 1;
    for artifact in emit {
        if headers {
            let title = match artifact {
                Emit::Tokens => "Tokens",
                Emit::Ast => "AST",
                Emit::Symbols => "Symbol Table",
                Emit::Trace => "Semantic Trace",
            };
            writeln!(out, "--- {title} ---")?;
        }
        match artifact {
            Emit::Tokens => {
                for token in &compilation.tokens {
                    writeln!(out, "{token:?}")?;
                }
            }
            Emit::Ast => write!(out, "{}", compilation.program)?,
            Emit::Symbols => write!(out, "{}", compilation.symbols)?,
            Emit::Trace => {
                for event in &compilation.trace {
                    writeln!(out, "{event}")?;
                }
            }
        }
    }
    Ok(())
}
