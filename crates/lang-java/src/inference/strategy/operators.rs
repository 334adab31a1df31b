//! Operator expressions: arithmetic, comparison, casts and assignments.

use super::{InferStrategy, infer_expression};
use crate::inference::InferContext;
use crate::inference::core::numeric::{binary_promotion, is_boolean, unary_promotion};
use tree_sitter::Node;
use varscope_api::models::TypeRef;

const STRING: &str = "java.lang.String";

pub struct OperatorInfer;

impl InferStrategy for OperatorInfer {
    fn infer(&self, node: &Node, ctx: &InferContext) -> Option<TypeRef> {
        match node.kind() {
            "parenthesized_expression" => {
                let mut cursor = node.walk();
                let inner = node.named_children(&mut cursor).next()?;
                infer_expression(&inner, ctx)
            }
            "cast_expression" => {
                // Intersection casts (`(A & B) x`) keep the first bound.
                let ty = ctx.parse_type(&node.child_by_field_name("type")?);
                (!ty.is_unknown()).then_some(ty)
            }
            "binary_expression" => binary(node, ctx),
            "unary_expression" => {
                let operator = ctx.text(&node.child_by_field_name("operator")?);
                if operator == "!" {
                    return Some(TypeRef::raw("boolean"));
                }
                let operand = infer_expression(&node.child_by_field_name("operand")?, ctx)?;
                unary_promotion(&operand)
            }
            "update_expression" => {
                let mut cursor = node.walk();
                let operand = node.named_children(&mut cursor).next()?;
                infer_expression(&operand, ctx)
            }
            "instanceof_expression" => Some(TypeRef::raw("boolean")),
            "assignment_expression" => infer_expression(&node.child_by_field_name("left")?, ctx),
            _ => None,
        }
    }
}

fn binary(node: &Node, ctx: &InferContext) -> Option<TypeRef> {
    let operator = ctx.text(&node.child_by_field_name("operator")?);
    match operator {
        "==" | "!=" | "<" | ">" | "<=" | ">=" | "&&" | "||" => {
            return Some(TypeRef::raw("boolean"));
        }
        _ => {}
    }

    let left = infer_expression(&node.child_by_field_name("left")?, ctx);
    let right = infer_expression(&node.child_by_field_name("right")?, ctx);

    if operator == "+" {
        let string = TypeRef::id(STRING);
        if left.as_ref() == Some(&string) || right.as_ref() == Some(&string) {
            return Some(string);
        }
    }

    let (left, right) = (left?, right?);
    match operator {
        "<<" | ">>" | ">>>" => unary_promotion(&left),
        "&" | "|" | "^" if is_boolean(&left) && is_boolean(&right) => {
            Some(TypeRef::raw("boolean"))
        }
        _ => binary_promotion(&left, &right),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::infer_local;
    use varscope_api::models::TypeRef;

    fn infer(body: &str) -> Option<TypeRef> {
        infer_local("", body, "x")
    }

    #[test]
    fn arithmetic_promotes_operands() {
        assert_eq!(infer("Object x = 1 + 2L;"), Some(TypeRef::raw("long")));
        assert_eq!(infer("byte b = 1; Object x = b * b;"), Some(TypeRef::raw("int")));
        assert_eq!(infer("Object x = 1 / 2.0f;"), Some(TypeRef::raw("float")));
        assert_eq!(infer("Integer i = 1; Object x = i + 1;"), Some(TypeRef::raw("int")));
        assert_eq!(infer("char c = 'a'; Object x = -c;"), Some(TypeRef::raw("int")));
        assert_eq!(infer("long v = 1; Object x = v >> 2;"), Some(TypeRef::raw("long")));
    }

    #[test]
    fn string_concatenation_wins_over_numbers() {
        assert_eq!(
            infer("Object x = \"n=\" + 1;"),
            Some(TypeRef::id("java.lang.String"))
        );
        assert_eq!(
            infer("Object x = 1 + 2 + \"\";"),
            Some(TypeRef::id("java.lang.String"))
        );
    }

    #[test]
    fn comparisons_and_logic_are_boolean() {
        assert_eq!(infer("Object x = 1 < 2;"), Some(TypeRef::raw("boolean")));
        assert_eq!(infer("Object x = !true;"), Some(TypeRef::raw("boolean")));
        assert_eq!(infer("Object x = true ^ false;"), Some(TypeRef::raw("boolean")));
        assert_eq!(infer("Object x = 6 & 3;"), Some(TypeRef::raw("int")));
    }

    #[test]
    fn casts_and_parentheses() {
        assert_eq!(infer("Object x = (short) 3;"), Some(TypeRef::raw("short")));
        assert_eq!(
            infer("Object o = null; Object x = ((String) o);"),
            Some(TypeRef::id("java.lang.String"))
        );
    }

    #[test]
    fn increments_keep_the_operand_type() {
        assert_eq!(infer("short s = 0; Object x = s++;"), Some(TypeRef::raw("short")));
    }
}
