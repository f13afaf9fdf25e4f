//! Rule: Forbid imports from the administration source tree
//!
//! Example:
//! ```js
//! // Bad
//! import Criteria from 'src/core/data/criteria.data';
//!
//! // Good
//! const { Criteria } = Shopware.Data;
//! ```
//!
//! Plugins must not reach into `src/` of the administration bundle; the
//! public surface is the global `Shopware` object. Detection only, there
//! is no mechanical mapping from a deep import to the global API.

use swlint_core::syntax::{self, NodeKind};
use swlint_core::{Diagnostic, Span};
use tree_sitter::Tree;

use crate::registry::{Environment, Rule};

const NAME: &str = "no-src-import";

const MESSAGE: &str =
    "Do not import from 'src/', use the global Shopware object instead.";

/// Check a parsed file for imports out of the administration sources
pub fn check_no_src_import(tree: &Tree, source: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for node in syntax::walk(tree.root_node()) {
        if NodeKind::of(&node) != NodeKind::ImportStatement {
            continue;
        }
        let Some(path) = syntax::import_source(&node, source) else {
            continue;
        };

        if path == "src" || path.starts_with("src/") {
            diagnostics.push(Diagnostic::new(NAME, Span::of(&node), MESSAGE));
        }
    }

    diagnostics
}

pub struct NoSrcImportRule;

impl Rule for NoSrcImportRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbid imports from the administration 'src/' tree"
    }

    fn environment(&self) -> Environment {
        Environment::Administration
    }

    fn check(&self, tree: &Tree, source: &str) -> Vec<Diagnostic> {
        check_no_src_import(tree, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swlint_core::syntax::parse;

    fn check_src(source: &str) -> Vec<Diagnostic> {
        let tree = parse(source).unwrap();
        check_no_src_import(&tree, source)
    }

    #[test]
    fn flags_src_imports() {
        let source = "import Criteria from 'src/core/data/criteria.data';\n";
        let diagnostics = check_src(source);
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].fixable());
    }

    #[test]
    fn flags_each_occurrence() {
        let source = "import a from 'src/a';\nimport b from 'src/b';\n";
        assert_eq!(check_src(source).len(), 2);
    }

    #[test]
    fn relative_and_package_imports_are_fine() {
        assert_eq!(check_src("import a from './src/local';").len(), 0);
        assert_eq!(check_src("import b from 'lodash';").len(), 0);
        assert_eq!(check_src("import c from 'srcset';").len(), 0);
    }

    #[test]
    fn named_imports_are_flagged_too() {
        let source = "import { mapState } from 'src/app/service/map-state';\n";
        assert_eq!(check_src(source).len(), 1);
    }

    #[test]
    fn require_calls_are_not_imports() {
        assert_eq!(check_src("const a = require('src/thing');").len(), 0);
    }
}
