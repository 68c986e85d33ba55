pub use crate::symbol_table::RedeclarationPolicy;

/// Options for a parser session.
///
/// # Examples
/// ```
/// # use rill_ast_parsing::parser::{ParserConfig, RedeclarationPolicy};
/// let config = ParserConfig::new()
///     .redeclaration(RedeclarationPolicy::Overwrite)
///     .check_call_targets(true);
/// assert!(config.checks_call_targets());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    redeclaration: RedeclarationPolicy,
    check_call_targets: bool,
}

impl ParserConfig {
    /// The default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how a name declared twice in one scope is handled
    pub fn redeclaration(mut self, policy: RedeclarationPolicy) -> Self {
        self.redeclaration = policy;
        self
    }

    /// When set, calls must name a declared function.
    ///
    /// The function being parsed is always callable, so recursion works.
    pub fn check_call_targets(mut self, check: bool) -> Self {
        self.check_call_targets = check;
        self
    }

    pub fn redeclaration_policy(&self) -> RedeclarationPolicy {
        self.redeclaration
    }

    pub fn checks_call_targets(&self) -> bool {
        self.check_call_targets
    }
}
