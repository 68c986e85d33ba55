use crate::block::Block;
use crate::expr::{Expr, FunctionCall};
use crate::types::Type;

/// A statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDecl),
    Assign(Assign),
    If(IfStmt),
    While(WhileStmt),
    Println(PrintlnStmt),
    Return(ReturnStmt),
    /// A call evaluated only for its effects
    Call(FunctionCall),
    Block(Block),
}

impl Stmt {
    /// The line this statement starts on
    pub fn line(&self) -> usize {
        match self {
            Stmt::VarDecl(s) => s.line,
            Stmt::Assign(s) => s.line,
            Stmt::If(s) => s.line,
            Stmt::While(s) => s.line,
            Stmt::Println(s) => s.line,
            Stmt::Return(s) => s.line,
            Stmt::Call(s) => s.line,
            Stmt::Block(s) => s.line(),
        }
    }
}

/// `let a, b: int;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub names: Vec<String>,
    pub ty: Type,
    pub line: usize,
}

impl VarDecl {
    pub fn new(names: impl IntoIterator<Item = String>, ty: Type, line: usize) -> Self {
        Self {
            names: names.into_iter().collect(),
            ty,
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub name: String,
    pub value: Expr,
    pub line: usize,
}

impl Assign {
    pub fn new(name: impl Into<String>, value: Expr, line: usize) -> Self {
        Self {
            name: name.into(),
            value,
            line,
        }
    }
}

/// If statement
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Block,
    pub else_branch: Option<ElseBranch>,
    pub line: usize,
}

/// What follows an `else`
#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Block(Block),
    If(Box<IfStmt>),
}

/// while statement
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
    pub line: usize,
}

/// `println("fmt", args...);`
#[derive(Debug, Clone, PartialEq)]
pub struct PrintlnStmt {
    /// The format string without its surrounding quotes
    pub format: String,
    pub args: Vec<Expr>,
    pub line: usize,
}

/// Return from a function
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Expr,
    pub line: usize,
}

impl ReturnStmt {
    pub fn new(value: Expr, line: usize) -> Self {
        Self { value, line }
    }
}
