use crate::inference::InferContext;
use crate::inference::strategy::InferStrategy;
use tree_sitter::Node;
use varscope_api::models::TypeRef;

/// Infers a type name used as the receiver of a static access, as in
/// `Collections.emptyList()` or `java.util.Locale.ROOT`.
///
/// Runs last: a local or field with the same name always wins.
pub struct TypeIdentifierInfer;

impl InferStrategy for TypeIdentifierInfer {
    fn infer(&self, node: &Node, ctx: &InferContext) -> Option<TypeRef> {
        if !matches!(node.kind(), "identifier" | "field_access") || !is_receiver(node) {
            return None;
        }

        let name: String = ctx.text(node).split_whitespace().collect();
        let last = name.rsplit('.').next()?;
        if !last.starts_with(|c: char| c.is_ascii_uppercase()) {
            return None;
        }

        let fqn = ctx.ts.resolve_type_name(&name, &ctx.resolution_at(node))?;
        ctx.ts.get_type_info(&fqn)?;
        Some(TypeRef::Id(fqn))
    }
}

fn is_receiver(node: &Node) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    matches!(parent.kind(), "method_invocation" | "field_access")
        && parent.child_by_field_name("object") == Some(*node)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::infer_local;
    use varscope_api::models::TypeRef;

    #[test]
    fn qualified_static_receivers_resolve() {
        let ty = infer_local("", "Object x = java.util.Collections.emptySet();", "x");
        assert_eq!(ty.unwrap().to_string(), "Set<Object>");
    }

    #[test]
    fn plain_names_outside_receiver_position_do_not_resolve() {
        assert_eq!(infer_local("", "Object x = String;", "x"), None);
    }

    #[test]
    fn locals_shadow_type_names() {
        let ty = infer_local("", "int Math = 3; Object x = Math;", "x");
        assert_eq!(ty, Some(TypeRef::raw("int")));
    }
}
