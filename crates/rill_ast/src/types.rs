//! The primitive types of rill

use std::fmt::{Display, Formatter};

/// A declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Type {
    Int,
    Float,
    Char,
    /// The return type of a function with no `-> Type` clause
    #[default]
    Void,
}

impl Type {
    /// The name of this type as written in source
    pub fn name(&self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Char => "char",
            Type::Void => "void",
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
