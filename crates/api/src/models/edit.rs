use super::span::TextSpan;
use crate::error::{EditError, EditResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Replace the bytes in `span` of the original source with `replacement`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct RewriteEdit {
    pub span: TextSpan,
    pub replacement: String,
}

impl RewriteEdit {
    pub fn new(span: TextSpan, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }
}

/// Check that no two edits touch the same bytes and all fit inside `source_len`.
pub fn check_disjoint(edits: &[RewriteEdit], source_len: usize) -> EditResult<()> {
    let mut sorted: Vec<&RewriteEdit> = edits.iter().collect();
    sorted.sort_by_key(|e| (e.span.start, e.span.end));

    for edit in &sorted {
        if edit.span.end > source_len || edit.span.start > edit.span.end {
            return Err(EditError::OutOfBounds {
                start: edit.span.start,
                end: edit.span.end,
                len: source_len,
            });
        }
    }

    for pair in sorted.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        // Two insertions at the same point would be order dependent.
        let same_point = a.span.is_empty() && b.span.is_empty() && a.span.start == b.span.start;
        if a.span.overlaps(&b.span) || same_point {
            return Err(EditError::Overlap {
                first: a.span,
                second: b.span,
            });
        }
    }
    Ok(())
}

/// Apply all edits in one pass, right-to-left by offset, without re-parsing.
pub fn apply_edits(source: &str, edits: &[RewriteEdit]) -> EditResult<String> {
    check_disjoint(edits, source.len())?;

    let mut sorted: Vec<&RewriteEdit> = edits.iter().collect();
    sorted.sort_by(|a, b| b.span.start.cmp(&a.span.start));

    let mut out = source.to_string();
    for edit in sorted {
        if !out.is_char_boundary(edit.span.start) || !out.is_char_boundary(edit.span.end) {
            return Err(EditError::NotCharBoundary {
                start: edit.span.start,
                end: edit.span.end,
            });
        }
        out.replace_range(edit.span.start..edit.span.end, &edit.replacement);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_apply_right_to_left() {
        let source = "String a = x; String b = y;";
        let edits = vec![
            RewriteEdit::new(TextSpan::new(0, 6), "var"),
            RewriteEdit::new(TextSpan::new(14, 20), "var"),
        ];
        assert_eq!(apply_edits(source, &edits).unwrap(), "var a = x; var b = y;");
    }

    #[test]
    fn overlapping_edits_are_rejected() {
        let edits = vec![
            RewriteEdit::new(TextSpan::new(0, 6), "var"),
            RewriteEdit::new(TextSpan::new(5, 8), "x"),
        ];
        let err = apply_edits("0123456789", &edits).unwrap_err();
        assert!(matches!(err, EditError::Overlap { .. }));
    }

    #[test]
    fn out_of_bounds_edit_is_rejected() {
        let edits = vec![RewriteEdit::new(TextSpan::new(3, 30), "x")];
        assert!(matches!(
            apply_edits("short", &edits),
            Err(EditError::OutOfBounds { len: 5, .. })
        ));
    }

    #[test]
    fn no_edits_returns_source_unchanged() {
        assert_eq!(apply_edits("int x;", &[]).unwrap(), "int x;");
    }
}
