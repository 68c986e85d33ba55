//! Blocks and statements

use crate::parser::{ErrorKind, Parser, SyntaxResult};
use crate::symbol_table::{SymbolEntry, SymbolKind};
use rill_ast::block::Block;
use rill_ast::expr::FunctionCall;
use rill_ast::statements::{
    Assign, ElseBranch, IfStmt, PrintlnStmt, ReturnStmt, Stmt, VarDecl, WhileStmt,
};
use rill_tokens::{Token, TokenKind};

impl Parser {
    /// Parses a block. A failing statement is reported and skipped, and parsing resumes at the
    /// next statement.
    pub(super) fn block(&mut self) -> SyntaxResult<Block> {
        self.rule("Block", |p| {
            let open = p.expect(TokenKind::LCurly)?;
            let mut statements = vec![];
            while !matches!(p.peek_kind(), None | Some(TokenKind::RCurly | TokenKind::Fn)) {
                match p.statement() {
                    Ok(stmt) => statements.push(stmt),
                    Err(error) => {
                        p.report(error);
                        p.synchronize();
                    }
                }
            }
            p.expect(TokenKind::RCurly)?;
            Ok(Block::new(open.line(), statements))
        })
    }

    fn statement(&mut self) -> SyntaxResult<Stmt> {
        let Some(token) = self.peek().cloned() else {
            return Err(self.error(ErrorKind::UnexpectedEof, self.tokens.last_line()));
        };
        match token.kind() {
            TokenKind::Let => self.var_decl().map(Stmt::VarDecl),
            TokenKind::Identifier
                if self.tokens.peek_nth(1).map(Token::kind) == Some(TokenKind::LParen) =>
            {
                self.call_stmt().map(Stmt::Call)
            }
            TokenKind::Identifier => self.assign().map(Stmt::Assign),
            TokenKind::If => self.if_stmt().map(Stmt::If),
            TokenKind::While => self.while_stmt().map(Stmt::While),
            TokenKind::Println => self.println_stmt().map(Stmt::Println),
            TokenKind::Return => self.return_stmt().map(Stmt::Return),
            TokenKind::LCurly => self.block().map(Stmt::Block),
            _ => {
                let line = token.line();
                Err(self.error(ErrorKind::InvalidStatement(token), line))
            }
        }
    }

    /// Names are only declared once the whole declaration, `;` included, has been read
    fn var_decl(&mut self) -> SyntaxResult<VarDecl> {
        self.rule("VarDecl", |p| {
            let let_token = p.expect(TokenKind::Let)?;
            let mut names = vec![p.expect(TokenKind::Identifier)?];
            while p.consume_if(TokenKind::Comma).is_some() {
                names.push(p.expect(TokenKind::Identifier)?);
            }
            p.expect(TokenKind::Colon)?;
            let ty = p.type_()?;
            p.expect(TokenKind::SemiColon)?;
            // the statement is complete, so a redeclaration needs no recovery
            for name in &names {
                let entry = SymbolEntry::new(name.lexeme(), ty, name.line(), SymbolKind::Variable);
                if let Err(error) = p.declare(entry) {
                    p.report(error);
                }
            }
            Ok(VarDecl::new(
                names.iter().map(|name| name.lexeme().to_string()),
                ty,
                let_token.line(),
            ))
        })
    }

    fn assign(&mut self) -> SyntaxResult<Assign> {
        self.rule("Assign", |p| {
            let target = p.expect(TokenKind::Identifier)?;
            p.expect(TokenKind::Assign)?;
            p.resolve(target.lexeme(), target.line())?;
            let value = p.expr()?;
            p.expect(TokenKind::SemiColon)?;
            Ok(Assign::new(target.lexeme(), value, target.line()))
        })
    }

    fn call_stmt(&mut self) -> SyntaxResult<FunctionCall> {
        self.rule("Call", |p| {
            let call = p.call()?;
            p.expect(TokenKind::SemiColon)?;
            Ok(call)
        })
    }

    fn if_stmt(&mut self) -> SyntaxResult<IfStmt> {
        self.rule("If", |p| {
            let if_token = p.expect(TokenKind::If)?;
            let condition = p.expr()?;
            let then_branch = p.block()?;
            let else_branch = if p.consume_if(TokenKind::Else).is_some() {
                if p.check(TokenKind::If) {
                    Some(ElseBranch::If(Box::new(p.if_stmt()?)))
                } else {
                    Some(ElseBranch::Block(p.block()?))
                }
            } else {
                None
            };
            Ok(IfStmt {
                condition,
                then_branch,
                else_branch,
                line: if_token.line(),
            })
        })
    }

    fn while_stmt(&mut self) -> SyntaxResult<WhileStmt> {
        self.rule("While", |p| {
            let while_token = p.expect(TokenKind::While)?;
            let condition = p.expr()?;
            let body = p.block()?;
            Ok(WhileStmt {
                condition,
                body,
                line: while_token.line(),
            })
        })
    }

    fn println_stmt(&mut self) -> SyntaxResult<PrintlnStmt> {
        self.rule("Println", |p| {
            let println = p.expect(TokenKind::Println)?;
            p.expect(TokenKind::LParen)?;
            let format = p.expect(TokenKind::FmtString)?;
            let args = if p.consume_if(TokenKind::Comma).is_some() {
                p.args()?
            } else {
                vec![]
            };
            p.expect(TokenKind::RParen)?;
            p.expect(TokenKind::SemiColon)?;
            let lexeme = format.lexeme();
            let format = lexeme
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(lexeme);
            Ok(PrintlnStmt {
                format: format.to_string(),
                args,
                line: println.line(),
            })
        })
    }

    fn return_stmt(&mut self) -> SyntaxResult<ReturnStmt> {
        self.rule("Return", |p| {
            let return_token = p.expect(TokenKind::Return)?;
            let value = p.expr()?;
            p.expect(TokenKind::SemiColon)?;
            Ok(ReturnStmt::new(value, return_token.line()))
        })
    }
}
