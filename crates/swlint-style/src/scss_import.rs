//! Rule: Forbid the explicit `.scss` extension on partial imports
//!
//! Example:
//! ```scss
//! // Before
//! @import 'component/base.scss';
//!
//! // After
//! @import 'component/base';
//! ```

use regex::Regex;

use swlint_core::{Diagnostic, Edit, EditGroup, Span};

use crate::registry::StyleRule;

const NAME: &str = "no-scss-extension-import";

const MESSAGE: &str = "Do not include the '.scss' extension when importing partials.";

/// Check SCSS source for imports carrying an explicit extension
pub fn check_scss_extension_import(source: &str) -> Vec<Diagnostic> {
    let path_re = Regex::new(r#"['"][^'"\n]+\.scss['"]"#).unwrap();

    let mut diagnostics = Vec::new();
    let mut offset = 0;

    for line in source.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with("@import") || trimmed.starts_with("@use") {
            for m in path_re.find_iter(line) {
                let quoted = m.as_str();
                if quoted.as_bytes().first() != quoted.as_bytes().last() {
                    continue;
                }

                let literal = Span::new(offset + m.start(), offset + m.end());
                // The `.scss` suffix sits right before the closing quote.
                let suffix = Span::new(literal.end - 6, literal.end - 1);

                diagnostics.push(
                    Diagnostic::new(NAME, literal, MESSAGE)
                        .with_fix(EditGroup::single(Edit::remove(suffix))),
                );
            }
        }
        offset += line.len();
    }

    diagnostics
}

pub struct ScssExtensionImportRule;

impl StyleRule for ScssExtensionImportRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbid the explicit .scss extension on partial imports"
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, source: &str) -> Vec<Diagnostic> {
        check_scss_extension_import(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swlint_core::apply_edit_groups;

    fn transform(source: &str) -> String {
        let groups: Vec<EditGroup> = check_scss_extension_import(source)
            .into_iter()
            .filter_map(|d| d.fix)
            .collect();
        apply_edit_groups(source, &groups).unwrap().source
    }

    #[test]
    fn strips_the_extension() {
        let source = "@import 'component/base.scss';\n";
        let diagnostics = check_scss_extension_import(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(transform(source), "@import 'component/base';\n");
    }

    #[test]
    fn double_quotes_and_use() {
        let source = "@use \"theme/colors.scss\";\n";
        assert_eq!(transform(source), "@use \"theme/colors\";\n");
    }

    #[test]
    fn comma_separated_imports() {
        let source = "@import 'a.scss', 'b.scss';\n";
        let diagnostics = check_scss_extension_import(source);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(transform(source), "@import 'a', 'b';\n");
    }

    #[test]
    fn extensionless_imports_are_fine() {
        assert!(check_scss_extension_import("@import 'component/base';\n").is_empty());
    }

    #[test]
    fn urls_outside_imports_are_ignored() {
        let source = ".a { background: url('texture.scss'); }\n";
        assert!(check_scss_extension_import(source).is_empty());
    }

    #[test]
    fn indented_import_is_matched() {
        let source = "    @import 'nested/part.scss';\n";
        assert_eq!(check_scss_extension_import(source).len(), 1);
    }

    #[test]
    fn fix_is_idempotent() {
        let source = "@import 'a.scss';\n@import 'b';\n";
        let fixed = transform(source);
        assert_eq!(fixed, "@import 'a';\n@import 'b';\n");
        assert!(check_scss_extension_import(&fixed).is_empty());
    }

    #[test]
    fn diagnostic_points_at_the_literal() {
        let source = "@import 'base.scss';\n";
        let diagnostics = check_scss_extension_import(source);
        let span = diagnostics[0].span;
        assert_eq!(&source[span.start..span.end], "'base.scss'");
    }
}
