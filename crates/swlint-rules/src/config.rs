//! Rule set composition
//!
//! An effective rule set is composed from the environment's base severity
//! map, local overrides (last write wins), and the Shopware version gate.
//! A gated rule is excluded from the severity map and the rule list
//! together, so it contributes no metadata at all; a rule set composed from
//! the same inputs is always identical.

use std::collections::BTreeMap;

use swlint_core::{Diagnostic, Severity, ShopwareVersion};
use tree_sitter::Tree;

use crate::registry::{Environment, Rule, RuleRegistry};

/// Base severities per environment, mirroring the shipped lint configs.
pub fn base_severities(environment: Environment) -> BTreeMap<String, Severity> {
    let mut severities = BTreeMap::new();

    match environment {
        Environment::Administration => {
            severities.insert("no-src-import".to_string(), Severity::Error);
            severities.insert("no-snippet-import".to_string(), Severity::Error);
            severities.insert("state-import".to_string(), Severity::Error);
        }
        Environment::Storefront => {
            severities.insert("no-http-client".to_string(), Severity::Error);
            severities.insert("migrate-plugin-manager".to_string(), Severity::Error);
            severities.insert("no-dom-access-helper".to_string(), Severity::Error);
            severities.insert("no-query-string".to_string(), Severity::Error);
        }
    }

    severities
}

/// A finding paired with the severity its rule is configured at.
#[derive(Debug, Clone)]
pub struct RatedDiagnostic {
    pub severity: Severity,
    pub diagnostic: Diagnostic,
}

/// The effective rule set for one lint invocation.
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
    severities: BTreeMap<String, Severity>,
}

impl RuleSet {
    /// Compose the effective rule set for an environment.
    ///
    /// `version` is the configured target platform version; `None` disables
    /// the gate, so a rule is excluded only when the comparison can actually
    /// be performed and shows the version below the rule's minimum.
    pub fn compose(
        environment: Environment,
        version: Option<&ShopwareVersion>,
        overrides: &BTreeMap<String, Severity>,
    ) -> Self {
        let mut severities = base_severities(environment);
        for (name, severity) in overrides {
            severities.insert(name.clone(), *severity);
        }

        let rules: Vec<Box<dyn Rule>> = RuleRegistry::for_environment(environment)
            .into_rules()
            .into_iter()
            .filter(|rule| match (rule.min_shopware_version(), version) {
                (Some(minimum), Some(configured)) => *configured >= minimum,
                _ => true,
            })
            .collect();

        severities.retain(|name, _| rules.iter().any(|rule| rule.name() == name.as_str()));

        Self { rules, severities }
    }

    /// The composed severity map
    pub fn severities(&self) -> &BTreeMap<String, Severity> {
        &self.severities
    }

    /// The configured severity of a rule
    pub fn severity(&self, rule: &str) -> Severity {
        self.severities.get(rule).copied().unwrap_or(Severity::Off)
    }

    /// The active (version-gated) rules
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Whether a rule survived the version gate
    pub fn contains(&self, rule: &str) -> bool {
        self.rules.iter().any(|r| r.name() == rule)
    }

    /// Run every enabled rule on a parsed file.
    pub fn check(&self, tree: &Tree, source: &str) -> Vec<RatedDiagnostic> {
        let mut results = Vec::new();

        for rule in self.rules() {
            let severity = self.severity(rule.name());
            if severity == Severity::Off {
                continue;
            }

            results.extend(rule.check(tree, source).into_iter().map(|diagnostic| {
                RatedDiagnostic {
                    severity,
                    diagnostic,
                }
            }));
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swlint_core::syntax::parse;

    fn no_overrides() -> BTreeMap<String, Severity> {
        BTreeMap::new()
    }

    fn version(s: &str) -> ShopwareVersion {
        s.parse().unwrap()
    }

    #[test]
    fn every_rule_has_a_base_severity() {
        for environment in [Environment::Administration, Environment::Storefront] {
            let severities = base_severities(environment);
            for rule in RuleRegistry::for_environment(environment).rules() {
                assert!(
                    severities.contains_key(rule.name()),
                    "missing base severity for {}",
                    rule.name()
                );
            }
        }
    }

    #[test]
    fn version_gate_excludes_rule_entirely() {
        let below = version("6.6.9.9");
        let set = RuleSet::compose(Environment::Administration, Some(&below), &no_overrides());

        assert!(!set.contains("state-import"));
        assert!(!set.severities().contains_key("state-import"));
        // Ungated rules stay.
        assert!(set.contains("no-src-import"));
    }

    #[test]
    fn version_gate_admits_exact_minimum_and_above() {
        for configured in ["6.7.0.0", "6.7.1.0", "6.8"] {
            let v = version(configured);
            let set = RuleSet::compose(Environment::Administration, Some(&v), &no_overrides());
            assert!(set.contains("state-import"), "expected at {configured}");
            assert!(set.severities().contains_key("state-import"));
        }
    }

    #[test]
    fn missing_version_disables_the_gate() {
        let set = RuleSet::compose(Environment::Administration, None, &no_overrides());
        assert!(set.contains("state-import"));
    }

    #[test]
    fn override_wins_and_leaves_the_rest() {
        let mut overrides = BTreeMap::new();
        overrides.insert("no-src-import".to_string(), Severity::Warn);

        let set = RuleSet::compose(Environment::Administration, None, &overrides);
        assert_eq!(set.severity("no-src-import"), Severity::Warn);
        assert_eq!(set.severity("no-snippet-import"), Severity::Error);
        assert_eq!(set.severity("state-import"), Severity::Error);
    }

    #[test]
    fn composition_is_deterministic() {
        let v = version("6.7.0.0");
        let mut overrides = BTreeMap::new();
        overrides.insert("state-import".to_string(), Severity::Warn);

        let a = RuleSet::compose(Environment::Administration, Some(&v), &overrides);
        let b = RuleSet::compose(Environment::Administration, Some(&v), &overrides);

        assert_eq!(a.severities(), b.severities());
        let names_a: Vec<&str> = a.rules().map(|r| r.name()).collect();
        let names_b: Vec<&str> = b.rules().map(|r| r.name()).collect();
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn off_rules_are_skipped_but_not_removed() {
        let mut overrides = BTreeMap::new();
        overrides.insert("state-import".to_string(), Severity::Off);

        let set = RuleSet::compose(Environment::Administration, None, &overrides);
        assert!(set.contains("state-import"));
        assert_eq!(set.severity("state-import"), Severity::Off);

        let source = "Shopware.State.get('x');";
        let tree = parse(source).unwrap();
        assert!(set.check(&tree, source).is_empty());
    }

    #[test]
    fn check_attaches_configured_severity() {
        let mut overrides = BTreeMap::new();
        overrides.insert("state-import".to_string(), Severity::Warn);
        let set = RuleSet::compose(Environment::Administration, None, &overrides);

        let source = "Shopware.State.get('x');";
        let tree = parse(source).unwrap();
        let results = set.check(&tree, source);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].severity, Severity::Warn);
        assert_eq!(results[0].diagnostic.rule, "state-import");
    }

    #[test]
    fn storefront_set_ignores_admin_sources() {
        let set = RuleSet::compose(Environment::Storefront, None, &no_overrides());
        let source = "Shopware.State.get('x');";
        let tree = parse(source).unwrap();
        assert!(set.check(&tree, source).is_empty());
    }
}
