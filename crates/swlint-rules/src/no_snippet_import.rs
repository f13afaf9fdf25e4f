//! Rule: Remove snippet JSON imports
//!
//! Example:
//! ```js
//! // Before
//! import deDE from './snippet/de-DE.json';
//!
//! // After
//! (removed, snippet files are picked up automatically)
//! ```

use swlint_core::syntax::{self, NodeKind};
use swlint_core::{Diagnostic, Edit, EditGroup, Span};
use tree_sitter::Tree;

use crate::registry::{Environment, Rule};

const NAME: &str = "no-snippet-import";

const MESSAGE: &str =
    "Do not import snippet files, they are registered automatically.";

fn is_snippet_path(path: &str) -> bool {
    path.ends_with(".json") && path.split('/').any(|segment| segment == "snippet")
}

/// Check a parsed file for snippet JSON imports
pub fn check_no_snippet_import(tree: &Tree, source: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for node in syntax::walk(tree.root_node()) {
        if NodeKind::of(&node) != NodeKind::ImportStatement {
            continue;
        }
        let Some(path) = syntax::import_source(&node, source) else {
            continue;
        };

        if is_snippet_path(path) {
            diagnostics.push(
                Diagnostic::new(NAME, Span::of(&node), MESSAGE).with_fix(EditGroup::single(
                    Edit::remove(syntax::removal_span(&node, source)),
                )),
            );
        }
    }

    diagnostics
}

pub struct NoSnippetImportRule;

impl Rule for NoSnippetImportRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Remove snippet JSON imports, snippets load automatically"
    }

    fn environment(&self) -> Environment {
        Environment::Administration
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, tree: &Tree, source: &str) -> Vec<Diagnostic> {
        check_no_snippet_import(tree, source)
    }
}
