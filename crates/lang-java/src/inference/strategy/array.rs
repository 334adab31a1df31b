//! Array creation and element access.

use super::{InferStrategy, infer_expression};
use crate::inference::InferContext;
use crate::parser::utils::count_dimensions;
use tree_sitter::Node;
use varscope_api::models::TypeRef;

/// `new T[n][]`, `new T[] {..}` and `a[i]`.
pub struct ArrayInfer;

impl InferStrategy for ArrayInfer {
    fn infer(&self, node: &Node, ctx: &InferContext) -> Option<TypeRef> {
        match node.kind() {
            "array_creation_expression" => {
                let type_node = node.child_by_field_name("type")?;
                let element = ctx.parse_type(&type_node);
                if element.is_unknown() {
                    return None;
                }
                let mut cursor = node.walk();
                let dimensions: usize = node
                    .children_by_field_name("dimensions", &mut cursor)
                    .map(|d| match d.kind() {
                        "dimensions_expr" => 1,
                        _ => count_dimensions(&d),
                    })
                    .sum();
                Some(TypeRef::array_of(element, dimensions.max(1)))
            }
            "array_access" => {
                let array = node.child_by_field_name("array")?;
                match infer_expression(&array, ctx)? {
                    TypeRef::Array {
                        element,
                        dimensions,
                    } if dimensions > 1 => Some(TypeRef::array_of(*element, dimensions - 1)),
                    TypeRef::Array { element, .. } => Some(*element),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::infer_local;

    fn shown(body: &str) -> Option<String> {
        infer_local("", body, "x").map(|t| t.to_string())
    }

    #[test]
    fn creation_counts_every_dimension() {
        assert_eq!(shown("Object x = new int[3][];"), Some("int[][]".into()));
        assert_eq!(shown("Object x = new String[] {\"a\"};"), Some("String[]".into()));
        assert_eq!(
            shown("Object x = new List<?>[2];").as_deref(),
            Some("List<?>[]")
        );
    }

    #[test]
    fn access_strips_one_dimension() {
        assert_eq!(
            shown("long[][] grid = null; Object x = grid[0];"),
            Some("long[]".into())
        );
        assert_eq!(
            shown("long[][] grid = null; Object x = grid[0][1];"),
            Some("long".into())
        );
    }
}
