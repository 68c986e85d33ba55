#![doc = include_str!("../README.md")]

use crate::lexer::LexicalError;
use crate::parser::{ParseOutput, Parser, ParserConfig, SyntaxError};
use crate::symbol_table::Scope;
use indexmap::IndexMap;
use rill_ast::items::{FunctionDecl, Program};
use rill_tokens::Token;
use tracing::debug;

pub mod lexer;
pub mod parser;
pub mod symbol_table;

/// Everything the front end produces for one source text
#[derive(Debug, Clone, Default)]
pub struct FrontendOutput {
    pub tokens: Vec<Token>,
    pub lexical_errors: Vec<LexicalError>,
    /// Syntactic and semantic errors, in the order they were found
    pub diagnostics: Vec<SyntaxError>,
    /// The final frame of every function, keyed by function name
    pub symbol_tables: IndexMap<String, Scope>,
    /// Only the functions whose declaration parsed without errors
    pub functions: IndexMap<String, FunctionDecl>,
    /// The function entries
    pub globals: Scope,
    pub program: Program,
}

impl FrontendOutput {
    /// The number of lexical, syntactic and semantic errors
    pub fn error_count(&self) -> usize {
        self.lexical_errors.len() + self.diagnostics.len()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Lexes and parses a source text.
///
/// Never fails; every problem found is part of the returned output.
///
/// # Examples
/// ```
/// # use rill_ast_parsing::parse_source;
/// # use rill_ast_parsing::parser::ParserConfig;
/// let output = parse_source("fn main() -> int { return 0; }", &ParserConfig::default());
/// assert!(!output.has_errors());
/// assert_eq!(output.program.functions.len(), 1);
/// ```
pub fn parse_source(src: &str, config: &ParserConfig) -> FrontendOutput {
    let (tokens, lexical_errors) = lexer::scan(src);
    let ParseOutput {
        program,
        functions,
        symbol_tables,
        globals,
        diagnostics,
    } = Parser::new(tokens.iter().cloned(), *config).parse();
    debug!(
        "front end finished with {} lexical errors and {} diagnostics",
        lexical_errors.len(),
        diagnostics.len()
    );
    FrontendOutput {
        tokens,
        lexical_errors,
        diagnostics,
        symbol_tables,
        functions,
        globals,
        program,
    }
}
