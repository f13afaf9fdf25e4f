//! Style rule trait and registry
//!
//! Style rules run on raw SCSS text rather than a syntax tree; the severity
//! maps mirror the shipped stylelint configurations, where only the
//! administration enables the custom import rule.

use std::collections::BTreeMap;

use swlint_core::{Diagnostic, Severity};

/// A style rule over raw stylesheet source
pub trait StyleRule: Send + Sync {
    /// The unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Whether the rule can propose fixes
    fn fixable(&self) -> bool {
        false
    }

    /// Check stylesheet source and return diagnostics
    fn check(&self, source: &str) -> Vec<Diagnostic>;
}

/// Registry of all available style rules
pub struct StyleRuleRegistry {
    rules: Vec<Box<dyn StyleRule>>,
}

impl StyleRuleRegistry {
    pub fn new() -> Self {
        let mut registry = Self { rules: Vec::new() };
        registry.register(Box::new(super::scss_import::ScssExtensionImportRule));
        registry
    }

    pub fn register(&mut self, rule: Box<dyn StyleRule>) {
        self.rules.push(rule);
    }

    pub fn all_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn StyleRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Run the rules enabled by `severities` on one stylesheet.
    pub fn check(
        &self,
        source: &str,
        severities: &BTreeMap<String, Severity>,
    ) -> Vec<(Severity, Diagnostic)> {
        let mut results = Vec::new();

        for rule in self.rules() {
            let severity = severities
                .get(rule.name())
                .copied()
                .unwrap_or(Severity::Off);
            if severity == Severity::Off {
                continue;
            }

            results.extend(
                rule.check(source)
                    .into_iter()
                    .map(|diagnostic| (severity, diagnostic)),
            );
        }

        results
    }
}

impl Default for StyleRuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Base style severities for the administration stylesheets.
pub fn administration_severities() -> BTreeMap<String, Severity> {
    let mut severities = BTreeMap::new();
    severities.insert("no-scss-extension-import".to_string(), Severity::Error);
    severities
}

/// Base style severities for the storefront stylesheets.
///
/// The storefront config carries no custom rules.
pub fn storefront_severities() -> BTreeMap<String, Severity> {
    BTreeMap::new()
}
