//! Rule: Replace `Shopware.State` with `Shopware.Store`
//!
//! Example:
//! ```js
//! // Before
//! Shopware.State.get('context');
//! const { State } = Shopware;
//!
//! // After
//! Shopware.Store.get('context');
//! const { Store } = Shopware;
//! ```
//!
//! Destructured bindings are tracked for the rest of the file. A shorthand
//! pattern renames the binding itself, so later uses are rewritten to
//! `Store` as well. An aliased pattern (`const { State: Renamed } =
//! Shopware`) keeps its user-chosen name; later uses of the alias are
//! reported but carry no fix, since the binding stays valid after the key
//! is rewritten.

use std::collections::HashMap;

use swlint_core::syntax::{self, NodeKind};
use swlint_core::{Diagnostic, Edit, EditGroup, ShopwareVersion, Span};
use tree_sitter::{Node, Tree};

use crate::registry::{Environment, Rule};

const NAME: &str = "state-import";

const DIRECT_MESSAGE: &str = "Do not use 'Shopware.State', use 'Shopware.Store' instead.";
const DESTRUCTURE_MESSAGE: &str =
    "Do not use destructured 'State', use destructured 'Store' instead.";
const USE_MESSAGE: &str = "Do not use destructured 'State', use 'Store' instead.";

/// How a tracked binding may be repaired at its use sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tracked {
    /// The binding itself was renamed to `Store`; uses follow.
    Rename,
    /// The binding kept its alias; uses are only reported.
    DetectOnly,
}

/// Check a parsed file for `Shopware.State` usage
pub fn check_state_import(tree: &Tree, source: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    // Local names bound by destructuring `State`, scoped to this single
    // file traversal and discarded afterwards.
    let mut tracked: HashMap<String, Tracked> = HashMap::new();

    for node in syntax::walk(tree.root_node()) {
        match NodeKind::of(&node) {
            NodeKind::MemberExpression => check_member(&node, source, &mut diagnostics),
            NodeKind::VariableDeclarator => {
                check_destructuring(&node, source, &mut tracked, &mut diagnostics);
            }
            NodeKind::Identifier => {
                check_tracked_use(&node, source, &tracked, &mut diagnostics);
            }
            _ => {}
        }
    }

    diagnostics
}

/// Returns the `State` property node of a `Shopware.State` member access.
fn shopware_state_property<'t>(node: &Node<'t>, source: &str) -> Option<Node<'t>> {
    let object = node.child_by_field_name("object")?;
    let property = node.child_by_field_name("property")?;

    let matches = NodeKind::of(&object) == NodeKind::Identifier
        && syntax::text(&object, source) == "Shopware"
        && NodeKind::of(&property) == NodeKind::PropertyIdentifier
        && syntax::text(&property, source) == "State";

    matches.then_some(property)
}

fn check_member(node: &Node<'_>, source: &str, diagnostics: &mut Vec<Diagnostic>) {
    if let Some(property) = shopware_state_property(node, source) {
        diagnostics.push(
            Diagnostic::new(NAME, Span::of(node), DIRECT_MESSAGE).with_fix(EditGroup::single(
                Edit::replace(Span::of(&property), "Store"),
            )),
        );
    }
}

fn check_destructuring(
    node: &Node<'_>,
    source: &str,
    tracked: &mut HashMap<String, Tracked>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(init) = node.child_by_field_name("value") else {
        return;
    };
    if NodeKind::of(&init) != NodeKind::Identifier || syntax::text(&init, source) != "Shopware" {
        return;
    }
    let Some(pattern) = node.child_by_field_name("name") else {
        return;
    };
    if NodeKind::of(&pattern) != NodeKind::ObjectPattern {
        return;
    }

    let mut cursor = pattern.walk();
    for property in pattern.named_children(&mut cursor) {
        match NodeKind::of(&property) {
            NodeKind::ShorthandPropertyIdentifierPattern
                if syntax::text(&property, source) == "State" =>
            {
                tracked.insert("State".to_string(), Tracked::Rename);
                diagnostics.push(
                    Diagnostic::new(NAME, Span::of(&property), DESTRUCTURE_MESSAGE).with_fix(
                        EditGroup::single(Edit::replace(Span::of(&property), "Store")),
                    ),
                );
            }
            NodeKind::PairPattern => {
                let Some(key) = property.child_by_field_name("key") else {
                    continue;
                };
                if NodeKind::of(&key) != NodeKind::PropertyIdentifier
                    || syntax::text(&key, source) != "State"
                {
                    continue;
                }

                if let Some(alias) = property.child_by_field_name("value") {
                    if NodeKind::of(&alias) == NodeKind::Identifier {
                        tracked.insert(
                            syntax::text(&alias, source).to_string(),
                            Tracked::DetectOnly,
                        );
                    }
                }

                diagnostics.push(
                    Diagnostic::new(NAME, Span::of(&property), DESTRUCTURE_MESSAGE)
                        .with_fix(EditGroup::single(Edit::replace(Span::of(&key), "Store"))),
                );
            }
            _ => {}
        }
    }
}

fn check_tracked_use(
    node: &Node<'_>,
    source: &str,
    tracked: &HashMap<String, Tracked>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(mode) = tracked.get(syntax::text(node, source)) else {
        return;
    };
    if !syntax::is_reference(node) {
        return;
    }

    let diagnostic = Diagnostic::new(NAME, Span::of(node), USE_MESSAGE);
    diagnostics.push(match mode {
        Tracked::Rename => {
            diagnostic.with_fix(EditGroup::single(Edit::replace(Span::of(node), "Store")))
        }
        Tracked::DetectOnly => diagnostic,
    });
}

pub struct StateImportRule;

impl Rule for StateImportRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Replace Shopware.State with Shopware.Store (and destructured State accordingly)"
    }

    fn environment(&self) -> Environment {
        Environment::Administration
    }

    fn fixable(&self) -> bool {
        true
    }

    fn min_shopware_version(&self) -> Option<ShopwareVersion> {
        Some(ShopwareVersion::new(6, 7, 0, 0))
    }

    fn check(&self, tree: &Tree, source: &str) -> Vec<Diagnostic> {
        check_state_import(tree, source)
    }
}
