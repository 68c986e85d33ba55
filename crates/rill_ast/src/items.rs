//! top level items

use crate::block::Block;
use crate::types::Type;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// The root of a parsed source file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub functions: Vec<FunctionDecl>,
}

impl Program {
    pub fn new(functions: impl IntoIterator<Item = FunctionDecl>) -> Self {
        Self {
            functions: functions.into_iter().collect(),
        }
    }

    /// Finds a function by name
    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// A function declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub body: Block,
    pub line: usize,
}

impl FunctionDecl {
    /// The signature of this function as written, e.g. `fn add(a: int, b: int) -> int`
    pub fn signature(&self) -> String {
        let params = self.params.iter().join(", ");
        match self.return_type {
            Type::Void => format!("fn {}({params})", self.name),
            ret => format!("fn {}({params}) -> {ret}", self.name),
        }
    }
}

/// A function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub line: usize,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type, line: usize) -> Self {
        Self {
            name: name.into(),
            ty,
            line,
        }
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}
