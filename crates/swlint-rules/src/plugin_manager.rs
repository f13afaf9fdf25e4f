//! Rule: Migrate PluginManager imports to the window object
//!
//! Example:
//! ```js
//! // Before
//! import PluginManager from 'src/plugin-system/plugin.manager';
//! PluginManager.register('MyPlugin', MyPlugin, '[data-my-plugin]');
//!
//! // After
//! window.PluginManager.register('MyPlugin', MyPlugin, '[data-my-plugin]');
//! ```
//!
//! The imported binding name is tracked through the file so aliased default
//! imports are rewritten as well. When the statement has no default binding
//! the import is reported without a fix, since uses cannot be repaired.

use std::collections::HashSet;

use swlint_core::syntax::{self, NodeKind};
use swlint_core::{Diagnostic, Edit, EditGroup, Span};
use tree_sitter::Tree;

use crate::registry::{Environment, Rule};

const NAME: &str = "migrate-plugin-manager";

const IMPORT_PATH: &str = "src/plugin-system/plugin.manager";
const IMPORT_MESSAGE: &str =
    "Do not import the PluginManager, it is available as 'window.PluginManager'.";
const USE_MESSAGE: &str = "Use 'window.PluginManager' instead of the PluginManager import.";

/// Check a parsed file for PluginManager imports and uses
pub fn check_plugin_manager(tree: &Tree, source: &str) -> Vec<Diagnostic> {
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
            NodeKind::Identifier => {
                if !tracked.contains(syntax::text(&node, source)) {
                    continue;
                }
                if !syntax::is_reference(&node) {
                    continue;
                }

                diagnostics.push(
                    Diagnostic::new(NAME, Span::of(&node), USE_MESSAGE).with_fix(
                        EditGroup::single(Edit::replace(Span::of(&node), "window.PluginManager")),
                    ),
                );
            }
            _ => {}
        }
    }

    diagnostics
}

pub struct PluginManagerRule;

impl Rule for PluginManagerRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Use window.PluginManager instead of importing the plugin manager"
    }

    fn environment(&self) -> Environment {
        Environment::Storefront
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, tree: &Tree, source: &str) -> Vec<Diagnostic> {
        check_plugin_manager(tree, source)
    }
}
