use super::InferStrategy;
use crate::inference::InferContext;
use tree_sitter::Node;
use varscope_api::models::TypeRef;

/// Literal types, with Java's defaulting: a bare integer literal is `int`,
/// a bare floating literal is `double`.
pub struct LiteralInfer;

impl InferStrategy for LiteralInfer {
    fn infer(&self, node: &Node, ctx: &InferContext) -> Option<TypeRef> {
        match node.kind() {
            "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal" => {
                let text = ctx.text(node);
                if text.ends_with('L') || text.ends_with('l') {
                    Some(TypeRef::raw("long"))
                } else {
                    Some(TypeRef::raw("int"))
                }
            }
            "decimal_floating_point_literal" | "hex_floating_point_literal" => {
                let text = ctx.text(node);
                if text.ends_with('f') || text.ends_with('F') {
                    Some(TypeRef::raw("float"))
                } else {
                    Some(TypeRef::raw("double"))
                }
            }
            "true" | "false" => Some(TypeRef::raw("boolean")),
            "character_literal" => Some(TypeRef::raw("char")),
            "string_literal" | "text_block" => Some(TypeRef::id("java.lang.String")),
            "null_literal" => Some(TypeRef::Null),
            "class_literal" => {
                let mut cursor = node.walk();
                let type_node = node.named_children(&mut cursor).next()?;
                let ty = ctx.parse_type(&type_node);
                let arg = match ty.primitive() {
                    Some("void") => TypeRef::id("java.lang.Void"),
                    _ if ty.is_unknown() => return None,
                    _ => ty.boxed(),
                };
                Some(TypeRef::generic("java.lang.Class", vec![arg]))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::infer_local;

    fn infer(expr: &str) -> String {
        infer_local("", &format!("Object x = {expr};"), "x")
            .map(|t| t.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn numeric_literals_take_their_default_types() {
        assert_eq!(infer("100"), "int");
        assert_eq!(infer("100L"), "long");
        assert_eq!(infer("0xFF"), "int");
        assert_eq!(infer("1.0"), "double");
        assert_eq!(infer("1f"), "float");
        assert_eq!(infer("'a'"), "char");
    }

    #[test]
    fn reference_literals() {
        assert_eq!(infer("\"x\""), "String");
        assert_eq!(infer("null"), "null");
        assert_eq!(infer("int.class"), "Class<Integer>");
        assert_eq!(infer("String.class"), "Class<String>");
    }
}
