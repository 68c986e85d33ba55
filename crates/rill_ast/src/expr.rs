//! expressions

use crate::types::Type;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// An expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(BinOp),
    Literal(Literal),
    Var(VarAccess),
    Call(FunctionCall),
}

impl Expr {
    /// The line this expression starts on
    pub fn line(&self) -> usize {
        match self {
            Expr::Binary(b) => b.left.line(),
            Expr::Literal(l) => l.line,
            Expr::Var(v) => v.line,
            Expr::Call(c) => c.line,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Binary(BinOp { left, op, right, .. }) => write!(f, "({left} {op} {right})"),
            Expr::Literal(literal) => write!(f, "{}", literal.value),
            Expr::Var(var) => write!(f, "{}", var.name),
            Expr::Call(call) => write!(f, "{call}"),
        }
    }
}

/// A binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mult,
    Div,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mult => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Eq => "==",
            BinaryOperator::Neq => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Lte => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Gte => ">=",
        }
    }

    /// Whether this operator compares its operands
    pub fn is_relational(&self) -> bool {
        !matches!(
            self,
            BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mult | BinaryOperator::Div
        )
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A binary operation, arithmetic or relational
#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    pub left: Box<Expr>,
    pub op: BinaryOperator,
    pub right: Box<Expr>,
}

impl BinOp {
    pub fn new(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Self {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// A literal constant. The lexeme is kept as written, no range validation is done.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: String,
    pub ty: Type,
    pub line: usize,
}

impl Literal {
    pub fn new(value: impl Into<String>, ty: Type, line: usize) -> Self {
        Self {
            value: value.into(),
            ty,
            line,
        }
    }
}

/// A read of a declared identifier
#[derive(Debug, Clone, PartialEq)]
pub struct VarAccess {
    pub name: String,
    pub line: usize,
}

impl VarAccess {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

/// A call to a function by name
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub line: usize,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = Expr>, line: usize) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().collect(),
            line,
        }
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.args.iter().join(", "))
    }
}
