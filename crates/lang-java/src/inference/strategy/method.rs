//! Method invocation inference.

use super::field::super_type;
use super::{InferStrategy, infer_expression};
use crate::inference::core::subtyping::as_super;
use crate::inference::core::unification::{
    Substitution, bind_type_arguments, erase_free_variables,
};
use crate::inference::{InferContext, MemberInfo, MemberKind};
use crate::scope::ScopeKind;
use tree_sitter::Node;
use varscope_api::models::TypeRef;

const OBJECT: &str = "java.lang.Object";

/// Infer type from method invocation (obj.method() or method()).
pub struct MethodCallInfer;

impl InferStrategy for MethodCallInfer {
    fn infer(&self, node: &Node, ctx: &InferContext) -> Option<TypeRef> {
        if node.kind() != "method_invocation" {
            return None;
        }

        let name_node = node.child_by_field_name("name")?;
        let method_name = ctx.text(&name_node);
        let arg_types = argument_types(node, ctx);
        let explicit = explicit_type_arguments(node, ctx);

        for receiver in receivers(node, ctx)? {
            if let TypeRef::Array { .. } = receiver {
                if method_name == "clone" && arg_types.is_empty() {
                    return Some(receiver);
                }
            }
            if let Some(ty) = invoke(ctx, &receiver, method_name, &arg_types, &explicit) {
                return Some(ty);
            }
        }
        None
    }
}

/// Candidate receiver types, in lookup order. An unqualified call searches
/// the enclosing class first and then each outer class.
fn receivers(node: &Node, ctx: &InferContext) -> Option<Vec<TypeRef>> {
    let Some(object) = node.child_by_field_name("object") else {
        let mut out: Vec<TypeRef> = ctx.this_type(node).into_iter().collect();
        if let Some(scopes) = ctx.scopes {
            for scope in scopes.ancestors(scopes.scope_at(node)) {
                if let ScopeKind::Class(fqn) = &scope.kind {
                    let ty = scopes.types().this_type(fqn);
                    if !out.contains(&ty) {
                        out.push(ty);
                    }
                }
            }
        }
        return Some(out);
    };

    let receiver = if object.kind() == "super" {
        super_type(&object, ctx)?
    } else {
        infer_expression(&object, &ctx.deeper()?)?
    };
    Some(vec![receiver])
}

fn argument_types(node: &Node, ctx: &InferContext) -> Vec<TypeRef> {
    let Some(args) = node.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = args.walk();
    args.named_children(&mut cursor)
        .filter(|c| !c.is_extra())
        .map(|arg| infer_expression(&arg, ctx).unwrap_or(TypeRef::Unknown))
        .collect()
}

/// `Collections.<String>emptyList()`
fn explicit_type_arguments(node: &Node, ctx: &InferContext) -> Vec<TypeRef> {
    let Some(args) = node.child_by_field_name("type_arguments") else {
        return Vec::new();
    };
    let mut cursor = args.walk();
    args.named_children(&mut cursor)
        .map(|t| ctx.parse_type(&t))
        .collect()
}

fn invoke(
    ctx: &InferContext,
    receiver: &TypeRef,
    name: &str,
    arg_types: &[TypeRef],
    explicit: &[TypeRef],
) -> Option<TypeRef> {
    let fqn = match receiver {
        TypeRef::Array { .. } => OBJECT,
        other => other.erasure()?,
    };

    let candidates: Vec<MemberInfo> = ctx
        .ts
        .find_member_in_hierarchy(fqn, name)
        .into_iter()
        .filter(|m| m.kind == MemberKind::Method)
        .map(|m| specialize_member(ctx, receiver, m))
        .collect();
    if candidates.is_empty() {
        return None;
    }

    // Method type variables match anything during overload selection.
    let erased: Vec<MemberInfo> = candidates.iter().map(erase_method_variables).collect();
    let chosen = ctx.ts.resolve_method(&erased, arg_types)?;
    let index = erased.iter().position(|m| *m == chosen)?;
    let method = &candidates[index];

    let vars = &method.type_parameters;
    let subst = if !explicit.is_empty() && explicit.len() == vars.len() {
        let mut subst = Substitution::new();
        for (var, ty) in vars.iter().zip(explicit) {
            subst.insert(var.clone(), ty.clone());
        }
        subst
    } else {
        let params = expanded_parameters(method, arg_types);
        bind_type_arguments(ctx.ts, &params, arg_types, vars)
    };

    let result = erase_free_variables(&subst.apply(&method.type_ref), vars);
    tracing::trace!(method = %method.fqn, result = %result, "resolved call");
    Some(result)
}

/// Parameter types lined up with the arguments, spreading a trailing
/// varargs array over the extra arguments unless an array is passed as is.
fn expanded_parameters(method: &MemberInfo, arg_types: &[TypeRef]) -> Vec<TypeRef> {
    let params = method.parameters.as_deref().unwrap_or_default();
    let mut out: Vec<TypeRef> = params.iter().map(|p| p.type_ref.clone()).collect();
    let Some(last) = params.last() else {
        return out;
    };
    let arg_count = arg_types.len();
    let passes_array = arg_count == params.len()
        && matches!(arg_types.last(), Some(TypeRef::Array { .. } | TypeRef::Null));
    if !last.is_varargs || passes_array {
        return out;
    }
    let element = match &last.type_ref {
        TypeRef::Array {
            element,
            dimensions,
        } if *dimensions > 1 => TypeRef::array_of((**element).clone(), dimensions - 1),
        TypeRef::Array { element, .. } => (**element).clone(),
        other => other.clone(),
    };
    out.pop();
    while out.len() < arg_count {
        out.push(element.clone());
    }
    out
}

fn erase_method_variables(member: &MemberInfo) -> MemberInfo {
    let vars = &member.type_parameters;
    if vars.is_empty() {
        return member.clone();
    }
    let mut erased = member.clone();
    erased.type_ref = erase_free_variables(&member.type_ref, vars);
    if let Some(params) = &mut erased.parameters {
        for p in params {
            p.type_ref = erase_free_variables(&p.type_ref, vars);
        }
    }
    erased
}

fn specialize_member(ctx: &InferContext, receiver: &TypeRef, mut member: MemberInfo) -> MemberInfo {
    let declaring = member.declaring_type.clone();
    member.type_ref = specialize(ctx, receiver, &declaring, &member.type_ref);
    if let Some(params) = &mut member.parameters {
        for p in params {
            p.type_ref = specialize(ctx, receiver, &declaring, &p.type_ref);
        }
    }
    member
}

/// Rewrite `ty`, declared in `declaring`, as seen through `receiver`.
///
/// Class type variables are replaced by the receiver's type arguments
/// (captured: `? extends X` reads as `X`, other wildcards as `Object`).
/// Raw receivers and variables without an argument erase to `Object`.
pub(super) fn specialize(
    ctx: &InferContext,
    receiver: &TypeRef,
    declaring: &str,
    ty: &TypeRef,
) -> TypeRef {
    let params = ctx
        .ts
        .get_type_info(declaring)
        .map(|info| info.parameter_names())
        .unwrap_or_default();
    if params.is_empty() {
        return ty.clone();
    }

    let mut subst = Substitution::new();
    if let Some(view) = as_super(ctx.ts, receiver, declaring) {
        let args = view.type_args();
        if args.len() == params.len() {
            for (param, arg) in params.iter().zip(args) {
                subst.insert(param.clone(), capture(arg));
            }
        }
    }
    erase_free_variables(&subst.apply(ty), &params)
}

fn capture(arg: &TypeRef) -> TypeRef {
    match arg {
        TypeRef::Wildcard {
            bound: Some(bound),
            is_upper_bound: true,
        } => (**bound).clone(),
        TypeRef::Wildcard { .. } => TypeRef::id(OBJECT),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::infer_local;
    use varscope_api::models::TypeRef;

    fn shown(members: &str, body: &str) -> Option<String> {
        infer_local(members, body, "x").map(|t| t.to_string())
    }

    #[test]
    fn receiver_type_arguments_flow_into_return_types() {
        assert_eq!(
            shown("List<String> names;", "Object x = names.get(0);"),
            Some("String".into())
        );
        assert_eq!(
            shown("Map<String, List<Integer>> index;", "Object x = index.get(\"a\");"),
            Some("List<Integer>".into())
        );
    }

    #[test]
    fn inherited_methods_see_through_the_hierarchy() {
        assert_eq!(
            shown("ArrayList<String> names;", "Object x = names.iterator();"),
            Some("Iterator<String>".into())
        );
        assert_eq!(
            shown("Map<String, Long> m;", "Object x = m.entrySet();"),
            Some("Set<Entry<String, Long>>".into())
        );
    }

    #[test]
    fn generic_methods_bind_from_arguments() {
        assert_eq!(
            shown("", "Object x = Arrays.asList(\"a\", \"b\");"),
            Some("List<String>".into())
        );
        assert_eq!(
            shown("", "Object x = Collections.<Integer>emptyList();"),
            Some("List<Integer>".into())
        );
        assert_eq!(
            shown("", "Object x = Optional.of(1L);"),
            Some("Optional<Long>".into())
        );
    }

    #[test]
    fn overloads_pick_the_matching_signature() {
        assert_eq!(shown("", "Object x = Math.max(1, 2L);"), Some("long".into()));
        assert_eq!(shown("", "Object x = Math.max(1, 2);"), Some("int".into()));
    }

    #[test]
    fn raw_receivers_erase_to_object() {
        assert_eq!(
            shown("List raw;", "Object x = raw.get(0);"),
            Some("Object".into())
        );
    }

    #[test]
    fn own_methods_resolve_without_a_receiver() {
        assert_eq!(
            shown("long size() { return 0L; }", "Object x = size();"),
            Some("long".into())
        );
    }

    #[test]
    fn array_clone_keeps_the_array_type() {
        let ty = infer_local("", "int[] a = null; Object x = a.clone();", "x");
        assert_eq!(ty, Some(TypeRef::array_of(TypeRef::raw("int"), 1)));
    }
}
