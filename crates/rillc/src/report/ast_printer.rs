use itertools::Itertools;
use rill_ast::block::Block;
use rill_ast::expr::FunctionCall;
use rill_ast::items::{FunctionDecl, Param, Program};
use rill_ast::statements::{
    Assign, ElseBranch, IfStmt, PrintlnStmt, ReturnStmt, VarDecl, WhileStmt,
};
use rill_ast::visitor::{self, Visitor};
use std::fmt;
use std::fmt::Write as _;

/// Prints a syntax tree as an indented outline, one node per line.
///
/// Expressions are printed inline, fully parenthesized.
#[derive(Debug, Default)]
pub struct AstPrinter {
    buffer: String,
    depth: usize,
}

impl AstPrinter {
    /// Prints a whole program
    pub fn print(program: &Program) -> String {
        let mut printer = Self::default();
        match printer.visit_program(program) {
            Ok(()) => printer.buffer,
            Err(fmt::Error) => String::new(),
        }
    }

    fn line(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        writeln!(self.buffer, "{:width$}{args}", "", width = self.depth * 2)
    }

    fn indented(&mut self, f: impl FnOnce(&mut Self) -> fmt::Result) -> fmt::Result {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

impl Visitor for AstPrinter {
    type Err = fmt::Error;

    fn visit_function_decl(&mut self, function: &FunctionDecl) -> Result<(), Self::Err> {
        self.line(format_args!(
            "FunctionDecl {} (line {})",
            function.signature(),
            function.line
        ))?;
        self.indented(|p| visitor::visit_function_decl(p, function))
    }

    fn visit_param(&mut self, param: &Param) -> Result<(), Self::Err> {
        self.line(format_args!("Param {param}"))
    }

    fn visit_block(&mut self, block: &Block) -> Result<(), Self::Err> {
        self.line(format_args!("Block (line {})", block.line()))?;
        self.indented(|p| visitor::visit_block(p, block))
    }

    fn visit_var_decl(&mut self, var_decl: &VarDecl) -> Result<(), Self::Err> {
        self.line(format_args!(
            "VarDecl {}: {}",
            var_decl.names.iter().join(", "),
            var_decl.ty
        ))
    }

    fn visit_assign(&mut self, assign: &Assign) -> Result<(), Self::Err> {
        self.line(format_args!("Assign {} = {}", assign.name, assign.value))
    }

    fn visit_if_stmt(&mut self, if_stmt: &IfStmt) -> Result<(), Self::Err> {
        self.line(format_args!("If {}", if_stmt.condition))?;
        self.indented(|p| p.visit_block(&if_stmt.then_branch))?;
        match &if_stmt.else_branch {
            None => Ok(()),
            Some(ElseBranch::Block(block)) => {
                self.line(format_args!("Else"))?;
                self.indented(|p| p.visit_block(block))
            }
            Some(ElseBranch::If(else_if)) => {
                self.line(format_args!("Else"))?;
                self.indented(|p| p.visit_if_stmt(else_if))
            }
        }
    }

    fn visit_while_stmt(&mut self, while_stmt: &WhileStmt) -> Result<(), Self::Err> {
        self.line(format_args!("While {}", while_stmt.condition))?;
        self.indented(|p| p.visit_block(&while_stmt.body))
    }

    fn visit_println_stmt(&mut self, println: &PrintlnStmt) -> Result<(), Self::Err> {
        let args = println.args.iter().join(", ");
        if args.is_empty() {
            self.line(format_args!("Println {:?}", println.format))
        } else {
            self.line(format_args!("Println {:?}, {args}", println.format))
        }
    }

    fn visit_return_stmt(&mut self, ret: &ReturnStmt) -> Result<(), Self::Err> {
        self.line(format_args!("Return {}", ret.value))
    }

    fn visit_function_call(&mut self, call: &FunctionCall) -> Result<(), Self::Err> {
        self.line(format_args!("Call {call}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_ast_parsing::parse_source;
    use rill_ast_parsing::parser::ParserConfig;

    #[test]
    fn test_print_program() {
        let output = parse_source(
            r#"fn max(a: int, b: int) -> int {
    if a > b { return a; } else if a == b { println("same"); } else { log(b); }
    while 0 { }
    return b;
}"#,
            &ParserConfig::default(),
        );
        assert!(!output.has_errors(), "{:#?}", output.diagnostics);
        let expected = r#"FunctionDecl fn max(a: int, b: int) -> int (line 1)
  Param a: int
  Param b: int
  Block (line 1)
    If (a > b)
      Block (line 2)
        Return a
    Else
      If (a == b)
        Block (line 2)
          Println "same"
        Else
          Block (line 2)
            Call log(b)
    While 0
      Block (line 3)
    Return b
"#;
        assert_eq!(AstPrinter::print(&output.program), expected);
    }
}
