//! The error taxonomy shared by every stage of the front end.
//!
//! Each stage fails with a [SpannedError] over its own kind enum. [FrontendError] is the union a
//! caller gets when it runs the whole pipeline.

use crate::spanned::{LineReader, Span, Spanned};
use crate::types::ValueType;
use std::fmt::{Display, Formatter};
use strum::Display as StrumDisplay;
use thiserror::Error;

/// An error with a location
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error} at {location}")]
pub struct SpannedError<E> {
    error: E,
    location: Span,
}

impl<E> SpannedError<E> {
    pub fn new(error: impl Into<E>, location: Span) -> Self {
        Self {
            error: error.into(),
            location,
        }
    }

    /// Gets the kind of this error
    pub fn kind(&self) -> &E {
        &self.error
    }

    pub fn line(&self) -> usize {
        self.location.line()
    }

    pub fn column(&self) -> usize {
        self.location.column()
    }
}

impl<E: Display> SpannedError<E> {
    /// The human-readable message, without position information
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// Renders this error against the source it was produced from, with a few lines of context
    /// and a marker under the offending location.
    pub fn report<'a>(&'a self, source: &'a str) -> Report<'a> {
        Report {
            message: &self.error,
            location: self.location,
            source,
        }
    }
}

impl<E> Spanned for SpannedError<E> {
    fn span(&self) -> Span {
        self.location
    }
}

/// A [SpannedError] rendered against its source text
pub struct Report<'a> {
    message: &'a dyn Display,
    location: Span,
    source: &'a str,
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.message)?;
        writeln!(f, "  -> {}:{}", self.location.line(), self.location.column())?;
        let (lines, base_line) = LineReader::new(2, 2).lines(self.source, &self.location);
        let width = lines
            .iter()
            .map(|line| line.line)
            .max()
            .unwrap_or(0)
            .to_string()
            .len();
        let start = self.location.offset();
        let marked = self
            .source
            .get(start..start + self.location.len())
            .map_or(self.location.len(), |text| text.chars().count());
        for line in &lines {
            writeln!(f, "{:width$} | {}", line.line, line.src.trim_end())?;
            if line.line == base_line {
                let col = self.location.column().saturating_sub(1);
                if !self.location.is_empty() {
                    writeln!(
                        f,
                        "{}{}{}",
                        " ".repeat(width + 3),
                        " ".repeat(col),
                        "~".repeat(marked)
                    )?;
                } else {
                    writeln!(f, "{}{}^", " ".repeat(width + 3), "-".repeat(col))?;
                }
            }
        }
        Ok(())
    }
}

/// The stage of the pipeline an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
}

/// [LexicalError] kind
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexicalErrorKind {
    #[error("Unexpected character: '{0}'")]
    UnexpectedChar(char),
    #[error("Unterminated block comment")]
    UnterminatedComment,
    #[error("Integer literal {0} does not fit in an int")]
    IntegerOutOfRange(String),
}

/// Represents an error occurring while converting source text into tokens
pub type LexicalError = SpannedError<LexicalErrorKind>;

/// [SyntaxError] kind
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxErrorKind {
    #[error("Expected {} but found {found}", .expected.join(" or "))]
    ExpectedToken { expected: Vec<String>, found: String },
    #[error("Unexpected statement: {0}")]
    UnexpectedStatement(String),
    #[error("Unexpected factor: {0}")]
    UnexpectedFactor(String),
    #[error("Nesting deeper than {0} levels")]
    NestingTooDeep(usize),
}

impl SyntaxErrorKind {
    pub fn expected_token(
        token_kinds: impl IntoIterator<Item = impl AsRef<str>>,
        found: impl Into<String>,
    ) -> Self {
        Self::ExpectedToken {
            expected: token_kinds
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
            found: found.into(),
        }
    }
}

/// Represents an error occurring during parsing
pub type SyntaxError = SpannedError<SyntaxErrorKind>;

/// [SemanticError] kind
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticErrorKind {
    #[error("Variable '{0}' already declared")]
    AlreadyDeclared(String),
    #[error("Undeclared variable '{0}'")]
    UndeclaredVariable(String),
    #[error("Cannot assign {found} to {declared} variable '{name}'")]
    NarrowingConversion {
        name: String,
        declared: ValueType,
        found: ValueType,
    },
    #[error("Do-while condition must be of numeric type (int or float), found '{0}'")]
    NonNumericCondition(ValueType),
    #[error("Invalid operand types for operator '{op}': '{left}' and '{right}'")]
    InvalidOperands {
        op: String,
        left: ValueType,
        right: ValueType,
    },
}

/// Represents an error found while analyzing a syntactically valid program
pub type SemanticError = SpannedError<SemanticErrorKind>;

/// Any error the front end can fail with
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl FrontendError {
    /// The stage that failed
    pub fn stage(&self) -> Stage {
        match self {
            FrontendError::Lexical(_) => Stage::Lexical,
            FrontendError::Syntax(_) => Stage::Syntax,
            FrontendError::Semantic(_) => Stage::Semantic,
        }
    }

    pub fn message(&self) -> String {
        match self {
            FrontendError::Lexical(e) => e.message(),
            FrontendError::Syntax(e) => e.message(),
            FrontendError::Semantic(e) => e.message(),
        }
    }

    pub fn line(&self) -> usize {
        self.span().line()
    }

    pub fn column(&self) -> usize {
        self.span().column()
    }

    /// Renders this error against its source
    pub fn report<'a>(&'a self, source: &'a str) -> Report<'a> {
        match self {
            FrontendError::Lexical(e) => e.report(source),
            FrontendError::Syntax(e) => e.report(source),
            FrontendError::Semantic(e) => e.report(source),
        }
    }
}

impl Spanned for FrontendError {
    fn span(&self) -> Span {
        match self {
            FrontendError::Lexical(e) => e.span(),
            FrontendError::Syntax(e) => e.span(),
            FrontendError::Semantic(e) => e.span(),
        }
    }
}
