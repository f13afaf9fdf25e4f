//! swlint-style: SCSS style rules
//!
//! The style-sheet counterpart of the JavaScript rule set. Rules here work
//! on raw source text with regular expressions; fixes go through the same
//! span-based edit engine as everything else.

pub mod registry;
pub mod scss_import;

pub use registry::{
    administration_severities, storefront_severities, StyleRule, StyleRuleRegistry,
};
