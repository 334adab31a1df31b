//! Conditional (`?:`) expressions.

use super::{InferStrategy, infer_expression};
use crate::inference::InferContext;
use crate::inference::context::MAX_INFERENCE_DEPTH;
use crate::inference::core::numeric::{binary_promotion, numeric_operand};
use crate::inference::core::subtyping::lub;
use crate::parser::utils::unparenthesize;
use tree_sitter::Node;
use varscope_api::models::TypeRef;

/// Type of `c ? a : b` from its two branches.
pub struct ConditionalInfer;

impl InferStrategy for ConditionalInfer {
    fn infer(&self, node: &Node, ctx: &InferContext) -> Option<TypeRef> {
        if node.kind() != "ternary_expression" {
            return None;
        }
        let then_node = node.child_by_field_name("consequence")?;
        let other_node = node.child_by_field_name("alternative")?;
        let then = infer_expression(&then_node, ctx)?;
        let other = infer_expression(&other_node, ctx)?;
        Some(branch_type(ctx, (&then_node, then), (&other_node, other)))
    }
}

fn branch_type(
    ctx: &InferContext,
    (a_node, a): (&Node, TypeRef),
    (b_node, b): (&Node, TypeRef),
) -> TypeRef {
    if a == b {
        return a;
    }
    match (&a, &b) {
        (TypeRef::Null, other) | (other, TypeRef::Null) => return other.boxed(),
        _ => {}
    }
    if a.unboxed().as_ref() == Some(&b) {
        return b;
    }
    if b.unboxed().as_ref() == Some(&a) {
        return a;
    }

    if let (Some(pa), Some(pb)) = (numeric_operand(&a), numeric_operand(&b)) {
        if let Some(narrow) = narrow_numeric(ctx, (a_node, &pa), (b_node, &pb)) {
            return narrow;
        }
        if let Some(promoted) = binary_promotion(&pa, &pb) {
            return promoted;
        }
    }

    lub(ctx.ts, &a.boxed(), &b.boxed())
}

/// The JLS 15.25 cases where numeric branches keep a type narrower than
/// `int`: `byte` with `short`, and a small type with an `int` constant that
/// fits it.
fn narrow_numeric(
    ctx: &InferContext,
    (a_node, a): (&Node, &TypeRef),
    (b_node, b): (&Node, &TypeRef),
) -> Option<TypeRef> {
    let constant_fits =
        |node: &Node, small: &str| int_constant(node, ctx, 0).is_some_and(|v| fits(small, v));
    match (a.primitive()?, b.primitive()?) {
        ("byte", "short") | ("short", "byte") => Some(TypeRef::raw("short")),
        (small, "int") if constant_fits(b_node, small) => Some(a.clone()),
        ("int", small) if constant_fits(a_node, small) => Some(b.clone()),
        _ => None,
    }
}

fn fits(small: &str, value: i64) -> bool {
    match small {
        "byte" => i8::try_from(value).is_ok(),
        "short" => i16::try_from(value).is_ok(),
        "char" => u16::try_from(value).is_ok(),
        _ => false,
    }
}

/// Value of an `int` constant expression: integer literals, signs, and
/// `final int` variables initialized with a constant.
fn int_constant(node: &Node, ctx: &InferContext, depth: usize) -> Option<i64> {
    if depth > MAX_INFERENCE_DEPTH {
        return None;
    }
    let node = unparenthesize(*node);
    match node.kind() {
        "decimal_integer_literal"
        | "hex_integer_literal"
        | "octal_integer_literal"
        | "binary_integer_literal" => int_literal(ctx.text(&node)),
        "unary_expression" => {
            let value = int_constant(&node.child_by_field_name("operand")?, ctx, depth + 1)?;
            match ctx.text(&node.child_by_field_name("operator")?) {
                "-" => Some(-value),
                "+" => Some(value),
                "~" => Some(!value),
                _ => None,
            }
        }
        "identifier" => {
            let scopes = ctx.scopes?;
            let scope = scopes.scope_at(&node);
            let binding = scopes.resolve(ctx.text(&node), node.start_byte(), scope)?;
            if !binding.is_final || binding.declared_type.primitive() != Some("int") {
                return None;
            }
            int_constant(&binding.initializer?, ctx, depth + 1)
        }
        _ => None,
    }
}

fn int_literal(text: &str) -> Option<i64> {
    if text.ends_with(['l', 'L']) {
        return None;
    }
    let digits = text.replace('_', "");
    let (radix, body) = match digits.get(..2) {
        Some("0x" | "0X") => (16, &digits[2..]),
        Some("0b" | "0B") => (2, &digits[2..]),
        _ if digits.len() > 1 && digits.starts_with('0') => (8, &digits[1..]),
        _ => (10, digits.as_str()),
    };
    let value = u32::from_str_radix(body, radix).ok()?;
    // Hex, octal and binary literals spell the two's complement bits.
    Some(if radix == 10 { i64::from(value) } else { i64::from(value as i32) })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::infer_local;

    fn shown(body: &str) -> Option<String> {
        infer_local("boolean flag;", body, "x").map(|t| t.to_string())
    }

    #[test]
    fn identical_branches() {
        assert_eq!(shown("Object x = flag ? \"a\" : \"b\";"), Some("String".into()));
    }

    #[test]
    fn null_branch_boxes_the_other_side() {
        assert_eq!(shown("Object x = flag ? 1 : null;"), Some("Integer".into()));
        assert_eq!(shown("Object x = flag ? null : \"s\";"), Some("String".into()));
    }

    #[test]
    fn numeric_branches_promote() {
        assert_eq!(shown("Object x = flag ? 1 : 2L;"), Some("long".into()));
        assert_eq!(
            shown("Integer i = 1; Object x = flag ? i : 2.0;"),
            Some("double".into())
        );
    }

    #[test]
    fn small_branch_with_fitting_int_constant_keeps_small_type() {
        assert_eq!(shown("Object x = flag ? 1 : 'c';"), Some("char".into()));
        assert_eq!(shown("byte b = 1; Object x = flag ? b : -128;"), Some("byte".into()));
        assert_eq!(shown("short s = 1; Object x = flag ? (0x10) : s;"), Some("short".into()));
        assert_eq!(
            shown("final int k = 7; Object x = flag ? k : 'c';"),
            Some("char".into())
        );
    }

    #[test]
    fn non_constant_or_oversized_ints_promote() {
        assert_eq!(shown("Object x = flag ? 70000 : 'c';"), Some("int".into()));
        assert_eq!(shown("byte b = 1; Object x = flag ? b : 128;"), Some("int".into()));
        assert_eq!(shown("int k = 7; Object x = flag ? k : 'c';"), Some("int".into()));
    }

    #[test]
    fn byte_and_short_meet_at_short() {
        assert_eq!(
            shown("byte b = 1; short s = 2; Object x = flag ? b : s;"),
            Some("short".into())
        );
        assert_eq!(
            shown("Byte b = 1; short s = 2; Object x = flag ? b : s;"),
            Some("short".into())
        );
    }

    #[test]
    fn primitive_and_its_wrapper_unbox() {
        assert_eq!(
            shown("byte b = 1; Byte w = 2; Object x = flag ? b : w;"),
            Some("byte".into())
        );
    }

    #[test]
    fn unrelated_references_meet_at_a_common_supertype() {
        assert_eq!(
            shown("Object x = flag ? new ArrayList<String>() : new LinkedList<String>();"),
            Some("AbstractList<String>".into())
        );
    }
}
