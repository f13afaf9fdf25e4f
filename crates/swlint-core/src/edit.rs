//! Span-based source code editing
//!
//! An [`Edit`] replaces one byte span with new text. An [`EditGroup`] bundles
//! the edits belonging to a single diagnostic so they are applied atomically:
//! either every edit in the group lands, or the whole group is skipped.

use thiserror::Error;

use crate::span::Span;

/// Errors that can occur during edit application
#[derive(Error, Debug)]
pub enum EditError {
    #[error("overlapping edits detected at offset {0}")]
    OverlappingEdits(usize),

    #[error("edit span {start}..{end} out of bounds for source length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },
}

/// A single replace/remove/insert operation on the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// The source span to replace
    pub span: Span,
    /// The replacement text
    pub replacement: String,
}

impl Edit {
    /// Replace `span` with `text`.
    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            replacement: text.into(),
        }
    }

    /// Delete `span`.
    pub fn remove(span: Span) -> Self {
        Self {
            span,
            replacement: String::new(),
        }
    }

    /// Insert `text` at `offset`.
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            span: Span::empty(offset),
            replacement: text.into(),
        }
    }
}

/// All edits belonging to one diagnostic's fix.
///
/// Edits within a group must cover mutually disjoint spans; that is the
/// rule author's contract and is validated on application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditGroup {
    pub edits: Vec<Edit>,
}

impl EditGroup {
    pub fn new(edits: Vec<Edit>) -> Self {
        Self { edits }
    }

    pub fn single(edit: Edit) -> Self {
        Self { edits: vec![edit] }
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Smallest span containing every edit in the group.
    fn envelope(&self) -> Option<Span> {
        let start = self.edits.iter().map(|e| e.span.start).min()?;
        let end = self.edits.iter().map(|e| e.span.end).max()?;
        Some(Span::new(start, end))
    }
}

/// Outcome of applying a set of edit groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// The rewritten source
    pub source: String,
    /// Number of groups applied
    pub applied: usize,
    /// Number of groups skipped because they conflicted with an earlier group
    pub skipped: usize,
}

/// Apply edits to source code.
///
/// Edits are applied in reverse span order so earlier offsets stay valid
/// throughout. Overlapping or out-of-bounds edits are rejected.
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String, EditError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    let mut sorted: Vec<&Edit> = edits.iter().collect();
    sorted.sort_by(|a, b| b.span.start.cmp(&a.span.start).then(b.span.end.cmp(&a.span.end)));

    let source_len = source.len();
    let mut prev_start: Option<usize> = None;

    for edit in &sorted {
        if edit.span.end > source_len || edit.span.end < edit.span.start {
            return Err(EditError::SpanOutOfBounds {
                start: edit.span.start,
                end: edit.span.end,
                len: source_len,
            });
        }

        if let Some(prev) = prev_start {
            if edit.span.end > prev {
                return Err(EditError::OverlappingEdits(edit.span.start));
            }
        }

        prev_start = Some(edit.span.start);
    }

    let mut result = source.to_string();
    for edit in sorted {
        result.replace_range(edit.span.start..edit.span.end, &edit.replacement);
    }

    Ok(result)
}

/// Apply edit groups atomically, resolving conflicts between groups.
///
/// Groups are considered in span order; a group any of whose edits overlaps
/// an already-accepted edit is skipped whole rather than partially applied.
/// A group whose own edits overlap each other is a rule bug and returns an
/// error.
pub fn apply_edit_groups(source: &str, groups: &[EditGroup]) -> Result<FixOutcome, EditError> {
    let mut indexed: Vec<(Span, &EditGroup)> = groups
        .iter()
        .filter_map(|g| g.envelope().map(|env| (env, g)))
        .collect();
    indexed.sort_by_key(|(env, _)| (env.start, env.end));

    let mut accepted: Vec<Edit> = Vec::new();
    let mut applied = 0usize;
    let mut skipped = 0usize;

    for (_, group) in indexed {
        validate_group(group)?;

        let conflicts = group
            .edits
            .iter()
            .any(|edit| accepted.iter().any(|prior| prior.span.overlaps(&edit.span)));
        if conflicts {
            skipped += 1;
            continue;
        }

        accepted.extend(group.edits.iter().cloned());
        applied += 1;
    }

    let new_source = apply_edits(source, &accepted)?;

    Ok(FixOutcome {
        source: new_source,
        applied,
        skipped,
    })
}

fn validate_group(group: &EditGroup) -> Result<(), EditError> {
    for (i, a) in group.edits.iter().enumerate() {
        for b in group.edits.iter().skip(i + 1) {
            if a.span.overlaps(&b.span) {
                return Err(EditError::OverlappingEdits(a.span.start.max(b.span.start)));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_replacement() {
        let source = "Shopware.State.get('context');";
        let edit = Edit::replace(Span::new(9, 14), "Store");

        let result = apply_edits(source, &[edit]).unwrap();
        assert_eq!(result, "Shopware.Store.get('context');");
    }

    #[test]
    fn multiple_edits() {
        let source = "State.get('a'); State.commit('b');";
        let edits = vec![
            Edit::replace(Span::new(0, 5), "Store"),
            Edit::replace(Span::new(16, 21), "Store"),
        ];

        let result = apply_edits(source, &edits).unwrap();
        assert_eq!(result, "Store.get('a'); Store.commit('b');");
    }

    #[test]
    fn removal_and_insertion() {
        let source = "import a from 'b';\nrest();\n";
        let edits = vec![
            Edit::remove(Span::new(0, 19)),
            Edit::insert(source.len(), "done();\n"),
        ];

        let result = apply_edits(source, &edits).unwrap();
        assert_eq!(result, "rest();\ndone();\n");
    }

    #[test]
    fn empty_edits() {
        let source = "unchanged";
        let result = apply_edits(source, &[]).unwrap();
        assert_eq!(result, "unchanged");
    }

    #[test]
    fn out_of_bounds() {
        let source = "short";
        let edit = Edit::replace(Span::new(0, 100), "replacement");

        let result = apply_edits(source, &[edit]);
        assert!(matches!(result, Err(EditError::SpanOutOfBounds { .. })));
    }

    #[test]
    fn overlapping_edits_rejected() {
        let source = "abcdefgh";
        let edits = vec![
            Edit::replace(Span::new(0, 4), "x"),
            Edit::replace(Span::new(2, 6), "y"),
        ];

        let result = apply_edits(source, &edits);
        assert!(matches!(result, Err(EditError::OverlappingEdits(_))));
    }

    #[test]
    fn groups_apply_atomically() {
        let source = "aaa bbb ccc";
        let groups = vec![
            EditGroup::new(vec![
                Edit::replace(Span::new(0, 3), "xxx"),
                Edit::replace(Span::new(8, 11), "zzz"),
            ]),
            EditGroup::single(Edit::replace(Span::new(4, 7), "yyy")),
        ];

        let outcome = apply_edit_groups(source, &groups).unwrap();
        assert_eq!(outcome.source, "xxx yyy zzz");
        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn conflicting_group_is_skipped() {
        let source = "aaa bbb ccc";
        let groups = vec![
            EditGroup::single(Edit::replace(Span::new(0, 7), "first")),
            EditGroup::single(Edit::replace(Span::new(4, 11), "second")),
        ];

        let outcome = apply_edit_groups(source, &groups).unwrap();
        assert_eq!(outcome.source, "first ccc");
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn group_with_internal_overlap_is_an_error() {
        let source = "abcdefgh";
        let groups = vec![EditGroup::new(vec![
            Edit::replace(Span::new(0, 4), "x"),
            Edit::replace(Span::new(2, 6), "y"),
        ])];

        assert!(matches!(
            apply_edit_groups(source, &groups),
            Err(EditError::OverlappingEdits(_))
        ));
    }

    #[test]
    fn empty_group_is_ignored() {
        let outcome = apply_edit_groups("src", &[EditGroup::default()]).unwrap();
        assert_eq!(outcome.source, "src");
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.skipped, 0);
    }
}
