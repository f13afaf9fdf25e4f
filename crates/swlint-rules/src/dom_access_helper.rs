//! Rule: Replace the DomAccess helper with native DOM APIs
//!
//! Example:
//! ```js
//! // Before
//! import DomAccess from 'src/helper/dom-access.helper';
//! const item = DomAccess.querySelector(this.el, '.item');
//!
//! // After
//! const item = this.el.querySelector('.item');
//! ```
//!
//! Helper calls whose first argument is the element are rewritten to the
//! equivalent element method. Helper methods without a direct DOM
//! counterpart are reported without a fix.

use std::collections::HashSet;

use swlint_core::syntax::{self, NodeKind};
use swlint_core::{Diagnostic, Edit, EditGroup, Span};
use tree_sitter::{Node, Tree};

use crate::registry::{Environment, Rule};

const NAME: &str = "no-dom-access-helper";

const IMPORT_PATH: &str = "src/helper/dom-access.helper";
const IMPORT_MESSAGE: &str =
    "Do not import the DomAccess helper, use native DOM APIs instead.";
const USE_MESSAGE: &str = "Use native DOM APIs instead of the DomAccess helper.";

/// Helper methods that map 1:1 onto an element method.
const ELEMENT_METHODS: [&str; 3] = ["querySelector", "querySelectorAll", "getAttribute"];

/// Check a parsed file for DomAccess helper usage
pub fn check_dom_access_helper(tree: &Tree, source: &str) -> Vec<Diagnostic> {
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

    let method_name = syntax::text(&method, source);
    let args = syntax::call_arguments(node);

    let diagnostic = Diagnostic::new(NAME, Span::of(node), USE_MESSAGE);

    if ELEMENT_METHODS.contains(&method_name) && args.len() >= 2 {
        let element = syntax::text(&args[0], source);
        let rest: Vec<&str> = args[1..]
            .iter()
            .map(|arg| syntax::text(arg, source))
            .collect();
        let replacement = format!("{}.{}({})", element, method_name, rest.join(", "));

        diagnostics.push(
            diagnostic.with_fix(EditGroup::single(Edit::replace(Span::of(node), replacement))),
        );
    } else {
        diagnostics.push(diagnostic);
    }
}

pub struct DomAccessHelperRule;

impl Rule for DomAccessHelperRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Replace the DomAccess helper with native DOM APIs"
    }

    fn environment(&self) -> Environment {
        Environment::Storefront
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, tree: &Tree, source: &str) -> Vec<Diagnostic> {
        check_dom_access_helper(tree, source)
    }
}
