//! Runs every stage of the front end over a single source text

use dowl_analysis::{Analyzer, SymbolTable, TraceEvent};
use dowl_ast::Program;
use dowl_common::FrontendError;
use dowl_parsing::{parse, tokenize};
use dowl_tokens::Token;
use tracing::{debug, instrument};

/// Everything produced by a successful run of the front end
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub program: Program,
    pub symbols: SymbolTable,
    /// The analyzer's trace. Empty unless the front end collects it.
    pub trace: Vec<TraceEvent>,
}

/// The front end, tokenizing, parsing and analyzing a source text.
///
/// Must be configured using a [FrontendBuilder]. A front end holds no state between calls, so the
/// same source always compiles to the same result.
#[derive(Debug, Clone)]
pub struct Frontend {
    collect_trace: bool,
}

impl Frontend {
    /// Creates the default FrontendBuilder
    #[inline]
    pub fn builder() -> FrontendBuilder {
        FrontendBuilder::new()
    }

    /// Compiles a source text, stopping at the first error
    #[instrument(skip_all, fields(len = source.len()))]
    pub fn compile(&self, source: &str) -> Result<Compilation, FrontendError> {
        let tokens = tokenize(source)?;
        let program = parse(&tokens)?;
        let analysis = Analyzer::new()
            .collect_trace(self.collect_trace)
            .analyze(&program)?;
        debug!(
            "compiled {} tokens into {} statements with {} symbols",
            tokens.len(),
            program.statements.len(),
            analysis.symbols.len()
        );
        Ok(Compilation {
            tokens,
            program,
            symbols: analysis.symbols,
            trace: analysis.trace,
        })
    }
}

impl Default for Frontend {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for creating a [Frontend] instance.
#[derive(Debug, Default)]
pub struct FrontendBuilder {
    /// Whether the analyzer's trace is kept in the [Compilation]
    pub collect_trace: bool,
}

impl FrontendBuilder {
    /// Creates a FrontendBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to keep the analyzer's trace
    pub fn collect_trace(mut self, collect_trace: bool) -> Self {
        self.collect_trace = collect_trace;
        self
    }

    /// Builds a [Frontend] instance from this builder
    pub fn build(self) -> Frontend {
        Frontend {
            collect_trace: self.collect_trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dowl_common::Stage;
    use test_log::test;

    #[test]
    fn test_trace_off_by_default() {
        let compilation = Frontend::default().compile("int x = 1;").unwrap();
        assert!(compilation.trace.is_empty());
        assert_eq!(compilation.tokens.len(), 6);
    }

    #[test]
    fn test_trace_collected() {
        let compilation = Frontend::builder()
            .collect_trace(true)
            .build()
            .compile("int x = 1;")
            .unwrap();
        assert_eq!(compilation.trace.len(), 2);
    }

    #[test]
    fn test_stages_fail_fast() {
        let frontend = Frontend::default();
        assert_eq!(frontend.compile("x = 1 # 2;").unwrap_err().stage(), Stage::Lexical);
        assert_eq!(frontend.compile("x = ;").unwrap_err().stage(), Stage::Syntax);
        assert_eq!(frontend.compile("x = 1;").unwrap_err().stage(), Stage::Semantic);
    }
}
