//! swlint-rules: JavaScript rule implementations
//!
//! Administration rules:
//! - no-src-import: Forbid imports from the administration 'src/' tree
//! - no-snippet-import: Remove snippet JSON imports
//! - state-import: Replace Shopware.State with Shopware.Store (6.7+)
//!
//! Storefront rules:
//! - no-http-client: Transform the legacy HttpClient service to fetch
//! - migrate-plugin-manager: Use window.PluginManager instead of the import
//! - no-dom-access-helper: Replace the DomAccess helper with DOM APIs
//! - no-query-string: Replace the query-string package with URLSearchParams

pub mod config;
pub mod dom_access_helper;
pub mod http_client;
pub mod no_snippet_import;
pub mod no_src_import;
pub mod plugin_manager;
pub mod query_string;
pub mod registry;
pub mod state_import;

pub use config::{base_severities, RatedDiagnostic, RuleSet};
pub use registry::{Environment, Rule, RuleRegistry};
