//! the args for running dowlc

use crate::logging::LoggingArgs;
use itertools::Itertools;
use std::path::PathBuf;

/// An artifact of the front end that can be printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Emit {
    /// The token sequence, one token per line
    Tokens,
    /// The syntax tree as an indented outline
    Ast,
    /// The declared variables and their types
    Symbols,
    /// Every rule applied during semantic analysis
    Trace,
}

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Checks dowl source files")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// The source file to check
    #[clap(value_name = "source file", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Which artifacts to print, in order. Defaults to the symbol table.
    #[clap(long = "emit", value_enum)]
    emit: Vec<Emit>,
}

impl Args {
    /// Gets the artifacts to print, without repeats
    pub fn emit(&self) -> Vec<Emit> {
        if self.emit.is_empty() {
            vec![Emit::Symbols]
        } else {
            self.emit.iter().copied().unique().collect()
        }
    }

    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn test_args_parsing() {
        let test = "dowlc file.dowl";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.file, Path::new("file.dowl"));
        assert_eq!(args.emit(), [Emit::Symbols]);
    }

    #[test]
    fn test_emit_order_and_repeats() {
        let test = "dowlc file.dowl --emit ast --emit tokens --emit ast";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.emit(), [Emit::Ast, Emit::Tokens]);
    }

    #[test]
    fn test_unknown_emit() {
        let test = "dowlc file.dowl --emit bytecode";
        assert!(Args::try_parse_from(test.split(" ")).is_err());
    }

    #[test]
    fn test_file_required() {
        assert!(Args::try_parse_from(["dowlc"]).is_err());
    }
}
