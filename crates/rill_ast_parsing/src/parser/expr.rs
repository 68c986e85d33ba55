//! Expressions. Every binary level is left associative.

use crate::parser::{ErrorKind, Parser, SyntaxResult};
use crate::symbol_table::SymbolKind;
use rill_ast::expr::{BinOp, BinaryOperator, Expr, FunctionCall, Literal, VarAccess};
use rill_ast::types::Type;
use rill_tokens::{Token, TokenKind};

fn relational_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Eq => Some(BinaryOperator::Eq),
        TokenKind::Neq => Some(BinaryOperator::Neq),
        TokenKind::Lt => Some(BinaryOperator::Lt),
        TokenKind::Lte => Some(BinaryOperator::Lte),
        TokenKind::Gt => Some(BinaryOperator::Gt),
        TokenKind::Gte => Some(BinaryOperator::Gte),
        _ => None,
    }
}

fn additive_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        _ => None,
    }
}

fn multiplicative_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Star => Some(BinaryOperator::Mult),
        TokenKind::Div => Some(BinaryOperator::Div),
        _ => None,
    }
}

impl Parser {
    pub(super) fn expr(&mut self) -> SyntaxResult<Expr> {
        self.rule("Expr", |p| {
            p.binary_level(relational_operator, |p| {
                p.binary_level(additive_operator, |p| {
                    p.binary_level(multiplicative_operator, Self::factor)
                })
            })
        })
    }

    /// `operand (op operand)*`, folded to the left
    fn binary_level(
        &mut self,
        operator: fn(TokenKind) -> Option<BinaryOperator>,
        mut operand: impl FnMut(&mut Self) -> SyntaxResult<Expr>,
    ) -> SyntaxResult<Expr> {
        let mut left = operand(self)?;
        while let Some(op) = self.peek_kind().and_then(operator) {
            self.consume()?;
            let right = operand(self)?;
            left = Expr::Binary(BinOp::new(left, op, right));
        }
        Ok(left)
    }

    fn factor(&mut self) -> SyntaxResult<Expr> {
        self.rule("Factor", |p| {
            let Some(token) = p.peek().cloned() else {
                return Err(p.error(ErrorKind::UnexpectedEof, p.tokens.last_line()));
            };
            let literal_type = match token.kind() {
                TokenKind::Identifier
                    if p.tokens.peek_nth(1).map(Token::kind) == Some(TokenKind::LParen) =>
                {
                    return p.call().map(Expr::Call);
                }
                TokenKind::Identifier => {
                    p.consume()?;
                    p.resolve(token.lexeme(), token.line())?;
                    return Ok(Expr::Var(VarAccess::new(token.lexeme(), token.line())));
                }
                TokenKind::LParen => {
                    p.consume()?;
                    let inner = p.expr()?;
                    p.expect(TokenKind::RParen)?;
                    return Ok(inner);
                }
                TokenKind::IntConst => Type::Int,
                TokenKind::FloatConst => Type::Float,
                TokenKind::CharLiteral => Type::Char,
                _ => {
                    let line = token.line();
                    return Err(p.error(ErrorKind::InvalidFactor(token), line));
                }
            };
            p.consume()?;
            Ok(Expr::Literal(Literal::new(
                token.lexeme(),
                literal_type,
                token.line(),
            )))
        })
    }

    /// `name '(' args ')'`
    pub(super) fn call(&mut self) -> SyntaxResult<FunctionCall> {
        let name = self.expect(TokenKind::Identifier)?;
        self.check_call_target(&name)?;
        self.expect(TokenKind::LParen)?;
        let args = self.args()?;
        self.expect(TokenKind::RParen)?;
        Ok(FunctionCall::new(name.lexeme(), args, name.line()))
    }

    /// A possibly empty, comma separated list of expressions
    pub(super) fn args(&mut self) -> SyntaxResult<Vec<Expr>> {
        self.rule("Args", |p| {
            let mut args = vec![];
            if p.check(TokenKind::RParen) {
                return Ok(args);
            }
            args.push(p.expr()?);
            while p.consume_if(TokenKind::Comma).is_some() {
                args.push(p.expr()?);
            }
            Ok(args)
        })
    }

    fn check_call_target(&self, name: &Token) -> SyntaxResult<()> {
        if !self.config.checks_call_targets()
            || self.current_function.as_deref() == Some(name.lexeme())
        {
            return Ok(());
        }
        match self.symbols.lookup(name.lexeme()) {
            Some(entry) if entry.kind() == SymbolKind::Function => Ok(()),
            _ => Err(self.error(
                ErrorKind::UndeclaredFunction {
                    name: name.lexeme().to_string(),
                },
                name.line(),
            )),
        }
    }
}
