//! Local variable type inference.

use super::field::field_type;
use super::{InferStrategy, infer_expression};
use crate::inference::InferContext;
use crate::inference::core::subtyping::iteration_element;
use crate::scope::Binding;
use tree_sitter::Node;
use varscope_api::models::TypeRef;

/// Infer the type of a simple name: a binding from the scope tree, or a
/// field inherited by the enclosing class.
pub struct LocalVarInfer;

impl InferStrategy for LocalVarInfer {
    fn infer(&self, node: &Node, ctx: &InferContext) -> Option<TypeRef> {
        // Only works for identifier nodes
        if node.kind() != "identifier" {
            return None;
        }

        let scopes = ctx.scopes?;
        let name = ctx.text(node);
        let scope = scopes.scope_at(node);

        match scopes.resolve(name, node.start_byte(), scope) {
            Some(binding) => binding_type(binding, ctx),
            None => {
                let this = ctx.this_type(node)?;
                field_type(ctx, &this, name)
            }
        }
    }
}

/// Declared type, or for `var` bindings the type of the initializer
/// (the element type for an enhanced `for`).
fn binding_type(binding: &Binding, ctx: &InferContext) -> Option<TypeRef> {
    if !binding.is_var {
        return (!binding.declared_type.is_unknown()).then(|| binding.declared_type.clone());
    }

    let init = binding.initializer?;
    let inner = ctx.deeper()?;
    let ty = infer_expression(&init, &inner)?;
    if binding.element_of_initializer {
        iteration_element(ctx.ts, &ty)
    } else {
        Some(ty)
    }
}
