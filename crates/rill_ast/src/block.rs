use crate::statements::Stmt;

/// A block of statements
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    line: usize,
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(line: usize, statements: impl IntoIterator<Item = Stmt>) -> Self {
        Self {
            line,
            statements: statements.into_iter().collect(),
        }
    }

    /// Creates a new empty block
    pub const fn empty(line: usize) -> Self {
        Self {
            line,
            statements: vec![],
        }
    }

    /// The line of the opening brace
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
