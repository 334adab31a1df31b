//! Combinator implementations for InferStrategy.

use super::InferStrategy;
use crate::inference::InferContext;
use tree_sitter::Node;
use varscope_api::models::TypeRef;

/// Or-else combinator: try first, then second if first returns None.
pub struct OrElse<A, B> {
    first: A,
    second: B,
}

impl<A, B> OrElse<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: InferStrategy, B: InferStrategy> InferStrategy for OrElse<A, B> {
    fn infer(&self, node: &Node, ctx: &InferContext) -> Option<TypeRef> {
        self.first
            .infer(node, ctx)
            .or_else(|| self.second.infer(node, ctx))
    }
}
