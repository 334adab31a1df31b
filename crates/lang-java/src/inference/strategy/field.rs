//! Field access inference.

use super::method::specialize;
use super::{InferStrategy, infer_expression};
use crate::inference::{InferContext, MemberKind};
use tree_sitter::Node;
use varscope_api::models::TypeRef;

/// Infer type from field access expression (obj.field).
pub struct FieldAccessInfer;

impl InferStrategy for FieldAccessInfer {
    fn infer(&self, node: &Node, ctx: &InferContext) -> Option<TypeRef> {
        if node.kind() != "field_access" {
            return None;
        }

        // Get the receiver (object before the dot)
        let receiver = node.child_by_field_name("object")?;
        let name_node = node.child_by_field_name("field")?;
        let field_name = ctx.text(&name_node);

        let receiver_type = if receiver.kind() == "super" {
            super_type(&receiver, ctx)?
        } else {
            infer_expression(&receiver, ctx)?
        };

        if field_name == "length" && matches!(receiver_type, TypeRef::Array { .. }) {
            return Some(TypeRef::raw("int"));
        }

        field_type(ctx, &receiver_type, field_name)
    }
}

/// Type of field `name` as seen through `receiver`, with the receiver's type
/// arguments substituted.
pub(super) fn field_type(ctx: &InferContext, receiver: &TypeRef, name: &str) -> Option<TypeRef> {
    let fqn = receiver.erasure()?;
    let member = ctx
        .ts
        .find_member_in_hierarchy(fqn, name)
        .into_iter()
        .find(|m| m.kind == MemberKind::Field)?;
    Some(specialize(ctx, receiver, &member.declaring_type, &member.type_ref))
}

/// Superclass of the class enclosing `node`.
pub(super) fn super_type(node: &Node, ctx: &InferContext) -> Option<TypeRef> {
    let this = ctx.this_type(node)?;
    let sup = ctx.ts.get_superclass(this.erasure()?)?;
    Some(specialize(ctx, &this, this.erasure()?, &sup))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::infer_local;
    use varscope_api::models::TypeRef;

    #[test]
    fn static_jdk_fields() {
        let ty = infer_local("", "Object x = Integer.MAX_VALUE;", "x");
        assert_eq!(ty, Some(TypeRef::raw("int")));
        let out = infer_local("", "Object x = System.out;", "x");
        assert_eq!(out, Some(TypeRef::id("java.io.PrintStream")));
    }

    #[test]
    fn array_length_is_int() {
        let ty = infer_local("", "String[] parts = null; Object x = parts.length;", "x");
        assert_eq!(ty, Some(TypeRef::raw("int")));
    }

    #[test]
    fn fields_through_this_substitute_type_arguments() {
        let ty = infer_local(
            "static class Box<V> { V value; }\nBox<String> box;",
            "Object x = this.box.value;",
            "x",
        );
        assert_eq!(ty, Some(TypeRef::id("java.lang.String")));
    }
}
