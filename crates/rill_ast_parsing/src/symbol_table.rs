//! Scoped symbol tables used while parsing.
//!
//! A [`SymbolTable`] is a stack of [`Scope`] frames. The outermost frame holds function entries
//! and is never popped. Each function pushes exactly one frame shared by its parameters and
//! every `let` in its body, nested blocks included.

use indexmap::IndexMap;
use rill_ast::types::Type;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing::{trace, warn};

/// What a symbol names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Function,
    Parameter,
    Variable,
}

impl SymbolKind {
    pub fn name(&self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Variable => "variable",
        }
    }
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A declared name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    name: String,
    ty: Type,
    line: usize,
    kind: SymbolKind,
}

impl SymbolEntry {
    /// Creates a new symbol entry
    pub fn new(name: impl Into<String>, ty: Type, line: usize, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            ty,
            line,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type. For functions this is the return type.
    pub fn ty(&self) -> Type {
        self.ty
    }

    /// The line the name was declared on
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }
}

impl Display for SymbolEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} {} (line {})",
            self.name, self.ty, self.kind, self.line
        )
    }
}

/// Builds a [`SymbolEntry`] whose type is only known after the name is.
///
/// Function entries start out as `void` and get their return type patched in once the
/// `-> Type` clause has been parsed.
#[derive(Debug, Clone)]
pub struct SymbolEntryBuilder {
    name: String,
    ty: Type,
    line: usize,
    kind: SymbolKind,
}

impl SymbolEntryBuilder {
    pub fn new(name: impl Into<String>, kind: SymbolKind, line: usize) -> Self {
        Self {
            name: name.into(),
            ty: Type::Void,
            line,
            kind,
        }
    }

    /// Sets the type of the entry
    pub fn ty(&mut self, ty: Type) -> &mut Self {
        self.ty = ty;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Freezes the entry
    pub fn build(self) -> SymbolEntry {
        SymbolEntry::new(self.name, self.ty, self.line, self.kind)
    }
}

/// A single frame of names, kept in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    entries: IndexMap<String, SymbolEntry>,
}

impl Scope {
    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates over the entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for entry in self.iter() {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// What happens when a name is declared twice in the same frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedeclarationPolicy {
    /// The second declaration is an error and the first one is kept
    #[default]
    Reject,
    /// The second declaration silently replaces the first
    Overwrite,
}

/// An error from adding an entry to a [`SymbolTable`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("{name:?} is already declared in this scope at line {previous_line}")]
    Redeclaration { name: String, previous_line: usize },
}

/// A stack of scope frames.
///
/// # Examples
/// ```
/// # use rill_ast::types::Type;
/// # use rill_ast_parsing::symbol_table::{SymbolEntry, SymbolKind, SymbolTable};
/// let mut table = SymbolTable::new();
/// table.enter_scope();
/// table.add_entry(SymbolEntry::new("x", Type::Int, 1, SymbolKind::Variable)).unwrap();
/// assert!(table.lookup("x").is_some());
/// let frame = table.exit_scope().unwrap();
/// assert!(frame.contains("x"));
/// assert!(table.lookup("x").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    policy: RedeclarationPolicy,
}

impl SymbolTable {
    /// Creates a symbol table containing only the global frame
    pub fn new() -> Self {
        Self::with_policy(RedeclarationPolicy::default())
    }

    pub fn with_policy(policy: RedeclarationPolicy) -> Self {
        Self {
            scopes: vec![Scope::default()],
            policy,
        }
    }

    /// Pushes a new innermost frame
    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
        trace!("entered scope, depth={}", self.depth());
    }

    /// Pops the innermost frame. The global frame can not be popped.
    pub fn exit_scope(&mut self) -> Option<Scope> {
        if self.scopes.len() <= 1 {
            warn!("refusing to exit the global scope");
            return None;
        }
        let scope = self.scopes.pop();
        trace!("exited scope, depth={}", self.depth());
        scope
    }

    /// Adds an entry to the innermost frame. Names in outer frames may be shadowed.
    pub fn add_entry(&mut self, entry: SymbolEntry) -> Result<(), SymbolError> {
        let policy = self.policy;
        let scope = self.current_scope_mut();
        if let Some(previous) = scope.get(entry.name()) {
            match policy {
                RedeclarationPolicy::Reject => {
                    return Err(SymbolError::Redeclaration {
                        name: entry.name,
                        previous_line: previous.line,
                    });
                }
                RedeclarationPolicy::Overwrite => {
                    trace!("overwriting {previous}");
                }
            }
        }
        scope.entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Finds a name, searching from the innermost frame outwards
    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// The innermost frame
    pub fn current_scope(&self) -> &Scope {
        self.scopes
            .last()
            .unwrap_or_else(|| unreachable!("the global scope is never popped"))
    }

    fn current_scope_mut(&mut self) -> &mut Scope {
        self.scopes
            .last_mut()
            .unwrap_or_else(|| unreachable!("the global scope is never popped"))
    }

    /// The outermost frame
    pub fn global_scope(&self) -> &Scope {
        &self.scopes[0]
    }

    /// The number of frames, including the global frame
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Consumes this table, returning the global frame
    pub fn into_global_scope(mut self) -> Scope {
        self.scopes.swap_remove(0)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
