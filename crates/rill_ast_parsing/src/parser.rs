//! The recursive descent parser.
//!
//! Parsing is a single pass over the token stream. Declarations and uses of names are checked
//! against a [`SymbolTable`] while the tree is built, so the parser produces the syntax tree,
//! one symbol table frame per function and every diagnostic in one go.

use crate::symbol_table::{Scope, SymbolEntry, SymbolError, SymbolTable};
use indexmap::IndexMap;
use rill_ast::items::{FunctionDecl, Program};
use rill_tokens::{Token, TokenKind, TokenStream};
use tracing::{debug, trace};

mod config;
mod error;
mod expr;
mod items;
mod statements;

pub use config::{ParserConfig, RedeclarationPolicy};
pub use error::{ErrorCategory, ErrorKind, SyntaxError, SyntaxResult};

/// Tokens that end the discarding of tokens during error recovery. All but `;` are left for
/// the parser to consume.
const SYNC_TOKENS: [TokenKind; 6] = [
    TokenKind::Fn,
    TokenKind::Let,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Return,
    TokenKind::RCurly,
];

/// How many grammar rules may be open at once. Deeper input is reported as
/// [`ErrorKind::NestingTooDeep`] instead of exhausting the stack.
pub const MAX_NESTING: usize = 128;

/// The results of a parser session
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    /// Every function whose declaration parsed without errors, in source order
    pub program: Program,
    /// Same as [`ParseOutput::program`], keyed by function name
    pub functions: IndexMap<String, FunctionDecl>,
    /// The final frame of every function, including the ones that failed to parse
    pub symbol_tables: IndexMap<String, Scope>,
    /// The global frame holding the function entries
    pub globals: Scope,
    /// Syntactic and semantic errors, in the order they were found
    pub diagnostics: Vec<SyntaxError>,
}

/// A single parser session over a token sequence.
///
/// # Examples
/// ```
/// # use rill_ast_parsing::lexer::scan;
/// # use rill_ast_parsing::parser::{Parser, ParserConfig};
/// let (tokens, _) = scan("fn main() { let a: int; a = 1; }");
/// let output = Parser::new(tokens, ParserConfig::default()).parse();
/// assert!(output.diagnostics.is_empty());
/// assert!(output.functions.contains_key("main"));
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: TokenStream,
    symbols: SymbolTable,
    config: ParserConfig,
    non_terminals: Vec<&'static str>,
    diagnostics: Vec<SyntaxError>,
    functions: IndexMap<String, FunctionDecl>,
    symbol_tables: IndexMap<String, Scope>,
    current_function: Option<String>,
    /// Stream position when the last diagnostic was recorded
    reported_at: Option<usize>,
}

impl Parser {
    /// Creates a new parser
    pub fn new(tokens: impl IntoIterator<Item = Token>, config: ParserConfig) -> Self {
        Self {
            tokens: TokenStream::new(tokens),
            symbols: SymbolTable::with_policy(config.redeclaration_policy()),
            config,
            non_terminals: vec![],
            diagnostics: vec![],
            functions: IndexMap::new(),
            symbol_tables: IndexMap::new(),
            current_function: None,
            reported_at: None,
        }
    }

    /// Parses every function, recovering from errors, until the tokens are exhausted.
    pub fn parse(mut self) -> ParseOutput {
        self.parse_program();
        debug!(
            "parsed {} functions with {} diagnostics",
            self.functions.len(),
            self.diagnostics.len()
        );
        ParseOutput {
            program: Program::new(self.functions.values().cloned()),
            functions: self.functions,
            symbol_tables: self.symbol_tables,
            globals: self.symbols.into_global_scope(),
            diagnostics: self.diagnostics,
        }
    }

    fn parse_program(&mut self) {
        while self.check(TokenKind::Fn) {
            if let Err(error) = self.function_decl() {
                self.report(error);
                self.synchronize_to_function();
            }
        }
        if let Some(token) = self.peek().cloned() {
            let line = token.line();
            let error = self.error(ErrorKind::TrailingTokens(token), line);
            self.report(error);
        }
    }

    /// Runs a grammar rule, tracking it on the non terminal stack
    fn rule<T>(
        &mut self,
        non_terminal: &'static str,
        f: impl FnOnce(&mut Self) -> SyntaxResult<T>,
    ) -> SyntaxResult<T> {
        trace!("starting parsing {non_terminal} next={:?}", self.peek());
        if self.non_terminals.len() >= MAX_NESTING {
            let line = self.line_of(self.peek());
            return Err(self.error(ErrorKind::NestingTooDeep { limit: MAX_NESTING }, line));
        }
        self.non_terminals.push(non_terminal);
        let result = f(self);
        self.non_terminals.pop();
        trace!(
            "after parsing {non_terminal} ok={} next={:?}",
            result.is_ok(),
            self.peek()
        );
        result
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.peek()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.peek_kind()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consumes the next token, failing at the end of input
    fn consume(&mut self) -> SyntaxResult<Token> {
        match self.tokens.next() {
            Some(token) => {
                trace!("consumed {token:?}");
                Ok(token)
            }
            None => Err(self.error(ErrorKind::UnexpectedEof, self.tokens.last_line())),
        }
    }

    /// Consumes the next token if it is of the given kind
    fn consume_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            let token = self.tokens.next();
            trace!("consumed {token:?}");
            token
        } else {
            None
        }
    }

    /// Consumes the next token, which must be of the given kind
    fn expect(&mut self, kind: TokenKind) -> SyntaxResult<Token> {
        match self.consume_if(kind) {
            Some(token) => Ok(token),
            None => {
                let found = self.peek().cloned();
                let line = self.line_of(found.as_ref());
                Err(self.error(ErrorKind::expected_token(kind, found), line))
            }
        }
    }

    /// The line of a token, or of the last consumed token at the end of input
    fn line_of(&self, token: Option<&Token>) -> usize {
        token
            .map(Token::line)
            .unwrap_or_else(|| self.tokens.last_line())
    }

    /// Creates an error capturing the current non terminal stack
    fn error(&self, kind: ErrorKind, line: usize) -> SyntaxError {
        SyntaxError::new(kind, line, self.non_terminals.clone())
    }

    /// Records a diagnostic.
    ///
    /// The same failure can escape several nested blocks. An error identical to the previous
    /// one, reported without consuming any token in between, is only recorded once.
    fn report(&mut self, error: SyntaxError) {
        let position = self.tokens.position();
        if self.reported_at == Some(position)
            && self
                .diagnostics
                .last()
                .is_some_and(|last| last.kind == error.kind && last.line == error.line)
        {
            trace!("already reported {error}");
            return;
        }
        debug!("{error}");
        self.reported_at = Some(position);
        self.diagnostics.push(error);
    }

    /// Adds an entry to the innermost frame
    fn declare(&mut self, entry: SymbolEntry) -> SyntaxResult<()> {
        let line = entry.line();
        self.symbols.add_entry(entry).map_err(|e| match e {
            SymbolError::Redeclaration {
                name,
                previous_line,
            } => self.error(
                ErrorKind::Redeclaration {
                    name,
                    previous_line,
                },
                line,
            ),
        })
    }

    /// Checks that an identifier read at `line` was declared
    fn resolve(&self, name: &str, line: usize) -> SyntaxResult<&SymbolEntry> {
        self.symbols.lookup(name).ok_or_else(|| {
            self.error(
                ErrorKind::Undeclared {
                    name: name.to_string(),
                },
                line,
            )
        })
    }

    /// Discards tokens up to and including a `;`, or up to a token that can start a
    /// statement or close a block.
    fn synchronize(&mut self) {
        let mut skipped = 0_usize;
        while let Some(kind) = self.peek_kind() {
            if kind == TokenKind::SemiColon {
                self.tokens.next();
                skipped += 1;
                break;
            }
            if SYNC_TOKENS.contains(&kind) {
                break;
            }
            self.tokens.next();
            skipped += 1;
        }
        debug!(
            "synchronized after skipping {skipped} tokens, next={:?}",
            self.peek()
        );
    }

    /// Discards tokens up to the next `fn`
    fn synchronize_to_function(&mut self) {
        let mut skipped = 0_usize;
        while self.peek().is_some() && !self.check(TokenKind::Fn) {
            self.tokens.next();
            skipped += 1;
        }
        debug!("skipped {skipped} tokens to the next function");
    }
}
