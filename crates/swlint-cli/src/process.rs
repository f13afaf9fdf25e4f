//! File processing logic for swlint

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use swlint_core::syntax;
use swlint_core::{apply_edit_groups, EditGroup, Severity};
use swlint_rules::RuleSet;
use swlint_style::StyleRuleRegistry;

use crate::output::DiagnosticInfo;

/// What kind of source a file holds, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Script,
    Stylesheet,
}

/// Classify a path; `None` means the file is not lintable.
pub fn file_kind(path: &Path) -> Option<FileKind> {
    match path.extension()?.to_str()? {
        "js" | "mjs" | "cjs" => Some(FileKind::Script),
        "scss" => Some(FileKind::Stylesheet),
        _ => None,
    }
}

/// Result of processing a single file
pub struct ProcessResult {
    /// Findings to report. In fix mode, fixed findings are omitted.
    pub diagnostics: Vec<DiagnosticInfo>,
    /// Fix groups applied
    pub fixed: usize,
    /// Fix groups skipped because they conflicted with an earlier fix
    pub skipped: usize,
    /// New file contents, when fixes changed the source
    pub new_source: Option<String>,
}

/// Process a single file with the composed rule sets.
pub fn process_file(
    path: &Path,
    rule_set: &RuleSet,
    style_registry: &StyleRuleRegistry,
    style_severities: &BTreeMap<String, Severity>,
    fix: bool,
) -> Result<ProcessResult> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let rated: Vec<(Severity, swlint_core::Diagnostic)> = match file_kind(path) {
        Some(FileKind::Script) => {
            let tree = syntax::parse(&source)
                .with_context(|| format!("Failed to parse file: {}", path.display()))?;
            rule_set
                .check(&tree, &source)
                .into_iter()
                .map(|r| (r.severity, r.diagnostic))
                .collect()
        }
        Some(FileKind::Stylesheet) => style_registry.check(&source, style_severities),
        None => Vec::new(),
    };

    if !fix {
        let diagnostics = rated
            .iter()
            .map(|(severity, diagnostic)| to_info(*severity, diagnostic, &source))
            .collect();
        return Ok(ProcessResult {
            diagnostics,
            fixed: 0,
            skipped: 0,
            new_source: None,
        });
    }

    let groups: Vec<EditGroup> = rated
        .iter()
        .filter_map(|(_, diagnostic)| diagnostic.fix.clone())
        .collect();

    let outcome = apply_edit_groups(&source, &groups)
        .with_context(|| format!("Failed to apply fixes to {}", path.display()))?;

    // Findings without a fix survive the rewrite and are still reported.
    let diagnostics = rated
        .iter()
        .filter(|(_, diagnostic)| !diagnostic.fixable())
        .map(|(severity, diagnostic)| to_info(*severity, diagnostic, &source))
        .collect();

    let new_source = (outcome.source != source).then_some(outcome.source);

    Ok(ProcessResult {
        diagnostics,
        fixed: outcome.applied,
        skipped: outcome.skipped,
        new_source,
    })
}

/// Write the processed result to the file
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

fn to_info(severity: Severity, diagnostic: &swlint_core::Diagnostic, source: &str) -> DiagnosticInfo {
    let (line, column) = offset_to_line_column(source, diagnostic.span.start);
    DiagnosticInfo {
        rule: diagnostic.rule.to_string(),
        severity,
        line,
        column,
        message: diagnostic.message.clone(),
        fixable: diagnostic.fixable(),
    }
}

/// Convert byte offset to line and column numbers (1-based)
fn offset_to_line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;

    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    (line, column)
}
