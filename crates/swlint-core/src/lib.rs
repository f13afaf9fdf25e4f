//! swlint-core: Core abstractions for Shopware extension linting
//!
//! This crate provides:
//! - `Span`: a byte range into one source file
//! - `Edit` / `EditGroup`: span-based code modifications
//! - `apply_edits()` / `apply_edit_groups()`: conflict-checked application
//! - `Diagnostic` / `Severity`: rule findings and their configured levels
//! - `syntax`: tree-sitter JavaScript parsing and node access
//! - `ShopwareVersion`: the four-segment version used by rule gating

mod diagnostic;
mod edit;
mod span;
pub mod syntax;
mod version;

pub use diagnostic::{Diagnostic, Severity};
pub use edit::{apply_edit_groups, apply_edits, Edit, EditError, EditGroup, FixOutcome};
pub use span::Span;
pub use version::{ShopwareVersion, VersionError};
