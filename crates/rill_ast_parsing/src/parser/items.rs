//! Function declarations

use crate::parser::{ErrorKind, Parser, RedeclarationPolicy, SyntaxResult};
use crate::symbol_table::{SymbolEntry, SymbolEntryBuilder, SymbolKind};
use rill_ast::items::{FunctionDecl, Param};
use rill_ast::types::Type;
use rill_tokens::{Token, TokenKind};

impl Parser {
    /// Parses a function declaration.
    ///
    /// A name already taken by an earlier function is reported as soon as it is read. The body
    /// is still parsed for its own diagnostics, but the earlier definition is kept.
    ///
    /// The function's frame is exported even when the declaration fails. Its name is declared in
    /// the enclosing frame only once the whole declaration has been seen, so the body can not
    /// see it but later functions can.
    pub(super) fn function_decl(&mut self) -> SyntaxResult<()> {
        self.rule("FunctionDecl", |p| {
            p.expect(TokenKind::Fn)?;
            let name_token = p.function_name()?;
            let name = name_token.lexeme().to_string();
            let previous_line = p.symbols.current_scope().get(&name).map(SymbolEntry::line);
            let rejected = match previous_line {
                Some(previous_line)
                    if p.config.redeclaration_policy() == RedeclarationPolicy::Reject =>
                {
                    let error = p.error(
                        ErrorKind::Redeclaration {
                            name: name.clone(),
                            previous_line,
                        },
                        name_token.line(),
                    );
                    p.report(error);
                    true
                }
                _ => false,
            };
            let mut entry = SymbolEntryBuilder::new(&name, SymbolKind::Function, name_token.line());

            p.symbols.enter_scope();
            p.current_function = Some(name.clone());
            let result = p.function_rest(&mut entry, name_token.line());
            p.current_function = None;
            let frame = p.symbols.exit_scope().unwrap_or_default();

            if rejected {
                return result.map(drop);
            }
            match result {
                Ok(decl) => {
                    p.declare(entry.build())?;
                    p.symbol_tables.insert(name.clone(), frame);
                    p.functions.insert(name, decl);
                    Ok(())
                }
                // a failed redefinition leaves the earlier one in place
                Err(error) if previous_line.is_some() => Err(error),
                Err(error) => {
                    p.declare(entry.build())?;
                    p.symbol_tables.insert(name, frame);
                    Err(error)
                }
            }
        })
    }

    fn function_name(&mut self) -> SyntaxResult<Token> {
        match self.peek_kind() {
            Some(TokenKind::Identifier | TokenKind::Main) => self.consume(),
            _ => {
                let found = self.peek().cloned();
                let line = self.line_of(found.as_ref());
                Err(self.error(ErrorKind::ExpectedFunctionName(found), line))
            }
        }
    }

    /// Everything after the function name
    fn function_rest(
        &mut self,
        entry: &mut SymbolEntryBuilder,
        line: usize,
    ) -> SyntaxResult<FunctionDecl> {
        self.expect(TokenKind::LParen)?;
        let params = self.params()?;
        self.expect(TokenKind::RParen)?;
        let return_type = if self.consume_if(TokenKind::Arrow).is_some() {
            let ty = self.type_()?;
            entry.ty(ty);
            ty
        } else {
            Type::Void
        };
        let body = self.block()?;
        Ok(FunctionDecl {
            name: entry.name().to_string(),
            params,
            return_type,
            body,
            line,
        })
    }

    fn params(&mut self) -> SyntaxResult<Vec<Param>> {
        self.rule("Params", |p| {
            let mut params = vec![];
            if !p.check(TokenKind::Identifier) {
                return Ok(params);
            }
            loop {
                let name = p.expect(TokenKind::Identifier)?;
                p.expect(TokenKind::Colon)?;
                let ty = p.type_()?;
                p.declare(SymbolEntry::new(
                    name.lexeme(),
                    ty,
                    name.line(),
                    SymbolKind::Parameter,
                ))?;
                params.push(Param::new(name.lexeme(), ty, name.line()));
                if p.consume_if(TokenKind::Comma).is_none() {
                    break;
                }
            }
            Ok(params)
        })
    }

    pub(super) fn type_(&mut self) -> SyntaxResult<Type> {
        self.rule("Type", |p| {
            let ty = match p.peek_kind() {
                Some(TokenKind::Int) => Type::Int,
                Some(TokenKind::Float) => Type::Float,
                Some(TokenKind::Char) => Type::Char,
                _ => {
                    let found = p.peek().cloned();
                    let line = p.line_of(found.as_ref());
                    return Err(p.error(ErrorKind::ExpectedType(found), line));
                }
            };
            p.consume()?;
            Ok(ty)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::{kinds, parse, parse_with};
    use crate::parser::{ErrorCategory, ErrorKind, ParserConfig, RedeclarationPolicy};
    use crate::symbol_table::SymbolKind;
    use rill_ast::types::Type;
    use test_log::test;

    #[test]
    fn test_function_signature() {
        let output = parse("fn add(a: int, b: float) -> float { return a + b; }");
        assert!(output.diagnostics.is_empty(), "{:#?}", output.diagnostics);
        let add = &output.functions["add"];
        assert_eq!(add.signature(), "fn add(a: int, b: float) -> float");
        let frame = &output.symbol_tables["add"];
        assert_eq!(
            frame.iter().map(|e| (e.name(), e.kind())).collect::<Vec<_>>(),
            [("a", SymbolKind::Parameter), ("b", SymbolKind::Parameter)]
        );
        let entry = output.globals.get("add").expect("add should be global");
        assert_eq!(entry.kind(), SymbolKind::Function);
        assert_eq!(entry.ty(), Type::Float);
    }

    #[test]
    fn test_function_without_return_type_is_void() {
        let output = parse("fn f() {}");
        assert_eq!(output.functions["f"].return_type, Type::Void);
        assert_eq!(output.globals.get("f").map(|e| e.ty()), Some(Type::Void));
    }

    #[test]
    fn test_duplicate_parameter() {
        let output = parse("fn f(a: int, a: char) {} fn g() {}");
        assert!(matches!(
            kinds(&output)[..],
            [ErrorKind::Redeclaration { name, previous_line: 1 }] if name == "a"
        ));
        assert!(!output.functions.contains_key("f"));
        assert!(output.symbol_tables.contains_key("f"));
        assert!(output.functions.contains_key("g"));
    }

    #[test]
    fn test_duplicate_function() {
        let output = parse("fn f() -> int { return 1; }\nfn f() -> char { return 'c'; }");
        assert!(matches!(
            kinds(&output)[..],
            [ErrorKind::Redeclaration { name, previous_line: 1 }] if name == "f"
        ));
        assert_eq!(output.diagnostics[0].line, 2);
        assert_eq!(output.functions["f"].return_type, Type::Int);
        assert_eq!(output.program.functions.len(), 1);
    }

    #[test]
    fn test_duplicate_function_overwritten() {
        let config = ParserConfig::new().redeclaration(RedeclarationPolicy::Overwrite);
        let output = parse_with(
            "fn f() -> int { return 1; }\nfn f() -> char { return 'c'; }",
            config,
        );
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.functions["f"].return_type, Type::Char);
        assert_eq!(output.globals.get("f").map(|e| e.line()), Some(2));
    }

    #[test]
    fn test_duplicate_function_is_reported_before_its_body() {
        let output = parse("fn f() {}\nfn f() { let a: int;\n a = (;\n");
        let lines = output
            .diagnostics
            .iter()
            .map(|e| (e.category(), e.line))
            .collect::<Vec<_>>();
        assert_eq!(
            lines,
            [
                (ErrorCategory::Semantic, 2),
                (ErrorCategory::Syntactic, 3),
                (ErrorCategory::Syntactic, 3)
            ],
            "{:#?}",
            output.diagnostics
        );
        assert!(matches!(
            kinds(&output)[0],
            ErrorKind::Redeclaration { name, previous_line: 1 } if name == "f"
        ));
        assert!(output.functions["f"].body.is_empty());
        assert!(output.symbol_tables["f"].is_empty());
    }

    #[test]
    fn test_failed_redefinition_keeps_earlier_function() {
        let config = ParserConfig::new().redeclaration(RedeclarationPolicy::Overwrite);
        let output = parse_with(
            "fn f() -> int { let a: int; return a; }\nfn f() -> char { let b: char;",
            config,
        );
        assert_eq!(output.diagnostics.len(), 1, "{:#?}", output.diagnostics);
        assert_eq!(output.functions["f"].return_type, Type::Int);
        assert!(output.symbol_tables["f"].contains("a"));
        assert!(!output.symbol_tables["f"].contains("b"));
        assert_eq!(output.globals.get("f").map(|e| e.line()), Some(1));
    }

    #[test]
    fn test_missing_type() {
        let output = parse("fn f(a: bool) {}");
        assert!(matches!(
            kinds(&output)[..],
            [ErrorKind::ExpectedType(Some(token))] if token.lexeme() == "bool"
        ));
        assert_eq!(
            output.diagnostics[0].non_terminal_stack,
            ["FunctionDecl", "Params", "Type"]
        );
    }

    #[test]
    fn test_main_is_a_function_name() {
        let output = parse("fn main() -> int { return 0; }");
        assert!(output.diagnostics.is_empty());
        assert!(output.functions.contains_key("main"));
    }
}
