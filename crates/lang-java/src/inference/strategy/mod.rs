//! Inference strategies using combinator pattern.
//!
//! Each strategy implements [`InferStrategy`] and can be combined using
//! `or_else()`.

mod array;
mod combinator;
mod conditional;
mod field;
mod literal;
mod local;
mod method;
mod new_expr;
mod operators;
mod this;
mod type_id;

pub use array::ArrayInfer;
pub use combinator::OrElse;
pub use conditional::ConditionalInfer;
pub use field::FieldAccessInfer;
pub use literal::LiteralInfer;
pub use local::LocalVarInfer;
pub use method::MethodCallInfer;
pub use new_expr::{NewExprInfer, diamond_arguments};
pub use operators::OperatorInfer;
pub use this::ThisInfer;
pub use type_id::TypeIdentifierInfer;

use crate::inference::InferContext;
use once_cell::sync::Lazy;
use tree_sitter::Node;
use varscope_api::models::TypeRef;

static EXPRESSION_INFERRER: Lazy<Box<dyn InferStrategy>> =
    Lazy::new(|| Box::new(build_expression_inferrer()));

/// A type inference strategy.
///
/// Strategies are composable using combinator methods.
/// Each strategy attempts to infer the type of an AST node.
pub trait InferStrategy: Sync + Send {
    /// Attempt to infer the type of the given node.
    ///
    /// Returns `None` if this strategy doesn't apply or can't determine the type.
    fn infer(&self, node: &Node, ctx: &InferContext) -> Option<TypeRef>;

    /// Combine with another strategy using "or" logic.
    ///
    /// If `self` returns `None`, try `other`.
    fn or_else<S: InferStrategy>(self, other: S) -> OrElse<Self, S>
    where
        Self: Sized,
    {
        OrElse::new(self, other)
    }
}

/// Build the default expression inferrer.
///
/// This combines all strategies in priority order.
pub fn build_expression_inferrer() -> impl InferStrategy {
    ThisInfer
        .or_else(LiteralInfer)
        .or_else(LocalVarInfer)
        .or_else(FieldAccessInfer)
        .or_else(MethodCallInfer)
        .or_else(NewExprInfer)
        .or_else(ArrayInfer)
        .or_else(OperatorInfer)
        .or_else(ConditionalInfer)
        .or_else(TypeIdentifierInfer)
}

/// Infer the type of an expression node.
///
/// This is the main entry point for expression type inference. Lambdas and
/// method references have no standalone type and yield `None`.
pub fn infer_expression(node: &Node, ctx: &InferContext) -> Option<TypeRef> {
    EXPRESSION_INFERRER.infer(node, ctx)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::inference::adapters::LayeredTypeSystem;
    use crate::inference::{InferContext, infer_expression};
    use crate::parser::{CompilationUnit, JavaParser};
    use crate::scope::ScopeTree;
    use varscope_api::models::TypeRef;

    /// Infer the initializer of local `name` declared in `body` (statements
    /// wrapped in a method of class `T`).
    pub fn infer_local(members: &str, body: &str, name: &str) -> Option<TypeRef> {
        let src = format!(
            "import java.util.*;\nclass T {{\n{members}\nvoid m() {{\n{body}\n}}\n}}\n"
        );
        let unit: CompilationUnit = JavaParser::new().parse(&src).expect("test source parses");
        let scopes = ScopeTree::build(&unit);
        let ts = LayeredTypeSystem::new(scopes.types());
        let ctx = InferContext::new(unit.source(), &ts, scopes.types().resolution_context())
            .with_scopes(&scopes);
        let decl = unit
            .declarations()
            .into_iter()
            .find(|d| d.name == name)
            .expect("declaration exists");
        infer_expression(&decl.initializer?, &ctx)
    }
}
