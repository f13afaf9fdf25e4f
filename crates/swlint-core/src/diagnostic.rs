//! Diagnostics reported by rules

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::edit::EditGroup;
use crate::span::Span;

/// Severity assigned to a rule by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Off,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding tied to a source location, with an optional fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the rule that produced the finding
    pub rule: &'static str,
    /// The offending span
    pub span: Span,
    /// Human-readable message
    pub message: String,
    /// Proposed fix, if the rule could construct one safely
    pub fix: Option<EditGroup>,
}

impl Diagnostic {
    pub fn new(rule: &'static str, span: Span, message: impl Into<String>) -> Self {
        Self {
            rule,
            span,
            message: message.into(),
            fix: None,
        }
    }

    pub fn with_fix(mut self, fix: EditGroup) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn fixable(&self) -> bool {
        self.fix.as_ref().is_some_and(|f| !f.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::Edit;

    #[test]
    fn severity_serde_roundtrip() {
        let parsed: Severity = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(parsed, Severity::Warn);
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Off < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn fixable_requires_nonempty_group() {
        let span = Span::new(0, 4);
        let plain = Diagnostic::new("demo", span, "found");
        assert!(!plain.fixable());

        let fixed = plain
            .clone()
            .with_fix(EditGroup::single(Edit::replace(span, "ok")));
        assert!(fixed.fixable());
    }
}
