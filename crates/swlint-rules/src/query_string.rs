//! Rule: Replace the query-string package with URLSearchParams
//!
//! Example:
//! ```js
//! // Before
//! import queryString from 'query-string';
//! const params = queryString.parse(window.location.search);
//!
//! // After
//! const params = Object.fromEntries(new URLSearchParams(window.location.search));
//! ```
//!
//! `parse` and `stringify` calls with a single argument are rewritten;
//! other package methods are reported without a fix.

use std::collections::HashSet;

use swlint_core::syntax::{self, NodeKind};
use swlint_core::{Diagnostic, Edit, EditGroup, Span};
use tree_sitter::{Node, Tree};

use crate::registry::{Environment, Rule};

const NAME: &str = "no-query-string";

const IMPORT_PATH: &str = "query-string";
const IMPORT_MESSAGE: &str =
    "Do not use the query-string package, use URLSearchParams instead.";
const USE_MESSAGE: &str = "Use 'URLSearchParams' instead of the query-string package.";

/// Check a parsed file for query-string package usage
pub fn check_query_string(tree: &Tree, source: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut tracked: HashSet<String> = HashSet::new();

    for node in syntax::walk(tree.root_node()) {
        match NodeKind::of(&node) {
            NodeKind::ImportStatement => {
                if syntax::import_source(&node, source) != Some(IMPORT_PATH) {
                    continue;
                }

                let diagnostic = Diagnostic::new(NAME, Span::of(&node), IMPORT_MESSAGE);
                match syntax::default_import_name(&node, source) {
                    Some(name) => {
                        tracked.insert(name.to_string());
                        diagnostics.push(diagnostic.with_fix(EditGroup::single(Edit::remove(
                            syntax::removal_span(&node, source),
                        ))));
                    }
                    None => diagnostics.push(diagnostic),
                }
            }
            NodeKind::CallExpression => {
                check_call(&node, source, &tracked, &mut diagnostics);
            }
            _ => {}
        }
    }

    diagnostics
}

fn check_call(
    node: &Node<'_>,
    source: &str,
    tracked: &HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(callee) = node.child_by_field_name("function") else {
        return;
    };
    if NodeKind::of(&callee) != NodeKind::MemberExpression {
        return;
    }
    let Some(object) = callee.child_by_field_name("object") else {
        return;
    };
    if NodeKind::of(&object) != NodeKind::Identifier
        || !tracked.contains(syntax::text(&object, source))
    {
        return;
    }
    let Some(method) = callee.child_by_field_name("property") else {
        return;
    };
    if NodeKind::of(&method) != NodeKind::PropertyIdentifier {
        return;
    }

    let args = syntax::call_arguments(node);
    let diagnostic = Diagnostic::new(NAME, Span::of(node), USE_MESSAGE);

    let replacement = match (syntax::text(&method, source), args.as_slice()) {
        ("parse", [arg]) => Some(format!(
            "Object.fromEntries(new URLSearchParams({}))",
            syntax::text(arg, source)
        )),
        ("stringify", [arg]) => Some(format!(
            "new URLSearchParams({}).toString()",
            syntax::text(arg, source)
        )),
        _ => None,
    };

    diagnostics.push(match replacement {
        Some(code) => {
            diagnostic.with_fix(EditGroup::single(Edit::replace(Span::of(node), code)))
        }
        None => diagnostic,
    });
}

pub struct QueryStringRule;

impl Rule for QueryStringRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Replace the query-string package with URLSearchParams"
    }

    fn environment(&self) -> Environment {
        Environment::Storefront
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, tree: &Tree, source: &str) -> Vec<Diagnostic> {
        check_query_string(tree, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swlint_core::apply_edit_groups;
    use swlint_core::syntax::parse;

    fn check_src(source: &str) -> Vec<Diagnostic> {
        let tree = parse(source).unwrap();
        check_query_string(&tree, source)
    }

    fn transform(source: &str) -> String {
        let groups: Vec<EditGroup> = check_src(source).into_iter().filter_map(|d| d.fix).collect();
        apply_edit_groups(source, &groups).unwrap().source
    }

    #[test]
    fn rewrites_parse() {
        let source = "import queryString from 'query-string';\n\
                      const params = queryString.parse(window.location.search);\n";
        let diagnostics = check_src(source);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            transform(source),
            "const params = Object.fromEntries(new URLSearchParams(window.location.search));\n"
        );
    }

    #[test]
    fn rewrites_stringify() {
        let source = "import qs from 'query-string';\n\
                      const query = qs.stringify(filters);\n";
        assert_eq!(
            transform(source),
            "const query = new URLSearchParams(filters).toString();\n"
        );
    }

    #[test]
    fn other_methods_are_reported_without_fix() {
        let source = "import queryString from 'query-string';\n\
                      const parts = queryString.parseUrl(href);\n";
        let diagnostics = check_src(source);
        assert_eq!(diagnostics.len(), 2);
        assert!(!diagnostics[1].fixable());
    }

    #[test]
    fn two_argument_parse_is_reported_without_fix() {
        // An options argument has no URLSearchParams equivalent.
        let source = "import queryString from 'query-string';\n\
                      queryString.parse(search, { arrayFormat: 'bracket' });\n";
        let diagnostics = check_src(source);
        assert_eq!(diagnostics.len(), 2);
        assert!(!diagnostics[1].fixable());
    }

    #[test]
    fn unrelated_packages_are_ignored() {
        assert_eq!(check_src("import qs from 'qs';\nqs.parse(x);\n").len(), 0);
    }

    #[test]
    fn fix_is_idempotent() {
        let source = "import queryString from 'query-string';\n\
                      const params = queryString.parse(window.location.search);\n";
        let fixed = transform(source);
        assert_eq!(check_src(&fixed).len(), 0);
    }
}
