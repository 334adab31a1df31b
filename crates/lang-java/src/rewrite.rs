//! Source edits for eligible declarations.
//!
//! Only two spans are ever touched: the declared type, which becomes `var`,
//! and the empty `<>` of a diamond constructor when the verdict asks for
//! explicit type arguments. Modifiers, annotations, comments and the
//! initializer text stay byte-for-byte.

use crate::parser::LocalDeclaration;
use varscope_api::models::{EligibilityVerdict, RewriteEdit};

pub const VAR_KEYWORD: &str = "var";

/// Edits turning `decl` into a `var` declaration. Empty unless `verdict` is
/// eligible.
pub fn build_edits(decl: &LocalDeclaration, verdict: &EligibilityVerdict) -> Vec<RewriteEdit> {
    let Some(hint) = verdict.hint() else {
        return Vec::new();
    };

    let mut edits = vec![RewriteEdit::new(decl.type_span(), VAR_KEYWORD)];
    if let Some(fill) = &hint.explicit_type_arguments {
        edits.push(RewriteEdit::new(fill.span, fill.text.clone()));
    }
    edits
}
