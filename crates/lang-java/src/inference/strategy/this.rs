//! `this` expression inference.

use super::InferStrategy;
use crate::inference::InferContext;
use tree_sitter::Node;
use varscope_api::models::TypeRef;

/// Infer type of `this` expression.
pub struct ThisInfer;

impl InferStrategy for ThisInfer {
    fn infer(&self, node: &Node, ctx: &InferContext) -> Option<TypeRef> {
        if node.kind() != "this" {
            return None;
        }

        ctx.this_type(node)
    }
}
