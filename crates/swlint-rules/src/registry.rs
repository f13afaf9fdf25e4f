//! Rule trait and registry for swlint JavaScript rules

use std::fmt;

use swlint_core::{Diagnostic, ShopwareVersion};
use tree_sitter::Tree;

/// Which Shopware codebase a rule targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Administration,
    Storefront,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Administration => "administration",
            Environment::Storefront => "storefront",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pattern detector with an optional auto-fix
pub trait Rule: Send + Sync {
    /// The unique identifier for this rule (e.g., "state-import")
    fn name(&self) -> &'static str;

    /// A short description of what this rule does
    fn description(&self) -> &'static str;

    /// The codebase this rule applies to
    fn environment(&self) -> Environment;

    /// Whether the rule can propose fixes at all
    fn fixable(&self) -> bool {
        false
    }

    /// Minimum Shopware version the rule applies to. A rule whose gate is
    /// not satisfied is excluded from the composed rule set entirely.
    fn min_shopware_version(&self) -> Option<ShopwareVersion> {
        None
    }

    /// Check a parsed file and return diagnostics
    fn check(&self, tree: &Tree, source: &str) -> Vec<Diagnostic>;
}

/// Registry of all available rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        let mut registry = Self { rules: Vec::new() };

        registry.register(Box::new(super::no_src_import::NoSrcImportRule));
        registry.register(Box::new(super::no_snippet_import::NoSnippetImportRule));
        registry.register(Box::new(super::state_import::StateImportRule));
        registry.register(Box::new(super::http_client::HttpClientRule));
        registry.register(Box::new(super::plugin_manager::PluginManagerRule));
        registry.register(Box::new(super::dom_access_helper::DomAccessHelperRule));
        registry.register(Box::new(super::query_string::QueryStringRule));

        registry
    }

    /// Create a registry holding only the rules of one environment
    pub fn for_environment(environment: Environment) -> Self {
        let mut registry = Self::new();
        registry.rules.retain(|r| r.environment() == environment);
        registry
    }

    /// Register a new rule
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Get all rule names
    pub fn all_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Iterate over the registered rules
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Consume the registry, yielding its rules
    pub fn into_rules(self) -> Vec<Box<dyn Rule>> {
        self.rules
    }

    /// Get all rules with their descriptions (for --list-rules)
    pub fn list_rules(&self) -> Vec<(&'static str, &'static str, Environment)> {
        self.rules
            .iter()
            .map(|r| (r.name(), r.description(), r.environment()))
            .collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_unique_names() {
        let registry = RuleRegistry::new();
        let mut names = registry.all_names();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn environment_split_covers_everything() {
        let all = RuleRegistry::new().all_names().len();
        let admin = RuleRegistry::for_environment(Environment::Administration)
            .all_names()
            .len();
        let storefront = RuleRegistry::for_environment(Environment::Storefront)
            .all_names()
            .len();
        assert_eq!(admin + storefront, all);
        assert!(admin > 0);
        assert!(storefront > 0);
    }
}
