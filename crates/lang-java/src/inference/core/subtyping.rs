//! Subtyping rules implementation.
//!
//! Determines if one type is a subtype of another.
//! Supports:
//! - Identity and `null`
//! - Primitives (widening)
//! - Classes and interfaces, including parameterized supertypes
//! - Wildcard containment on type arguments
//! - Arrays (covariant)

use super::type_system::JavaTypeSystem;
use super::unification::Substitution;
use varscope_api::models::TypeRef;

const OBJECT: &str = "java.lang.Object";
const MAX_DEPTH: usize = 32;

/// Check if `sub` is a subtype of `super_type`.
pub fn is_subtype<T: JavaTypeSystem + ?Sized>(sub: &TypeRef, super_type: &TypeRef, ts: &T) -> bool {
    if sub.contains_unknown() || super_type.contains_unknown() {
        return false;
    }

    if sub == super_type {
        return true;
    }

    // java.lang.Object is supertype of all reference types
    if super_type.erasure() == Some(OBJECT) && matches!(super_type, TypeRef::Id(_)) {
        return sub.is_reference();
    }

    match (sub, super_type) {
        (TypeRef::Null, sup) => sup.is_reference(),

        (TypeRef::Raw(s1), TypeRef::Raw(s2)) if sub.is_primitive() && super_type.is_primitive() => {
            is_primitive_subtype(s1, s2)
        }

        (TypeRef::Lub(members), sup) => members.iter().any(|m| is_subtype(m, sup, ts)),
        (sub, TypeRef::Lub(members)) => members.iter().all(|m| is_subtype(sub, m, ts)),

        (
            TypeRef::Array {
                element: e1,
                dimensions: d1,
            },
            TypeRef::Array {
                element: e2,
                dimensions: d2,
            },
        ) => {
            if d1 == d2 {
                e1.is_reference() && e2.is_reference() && is_subtype(e1, e2, ts)
            } else if d1 > d2 {
                // int[][] <: Object[]
                e2.erasure() == Some(OBJECT)
            } else {
                false
            }
        }

        (TypeRef::Id(_) | TypeRef::Generic { .. }, TypeRef::Id(super_id)) => {
            let Some(sub_id) = sub.erasure() else {
                return false;
            };
            is_class_subtype(sub_id, super_id, ts)
        }

        (TypeRef::Id(_) | TypeRef::Generic { .. }, TypeRef::Generic { args, .. }) => {
            let Some(super_fqn) = super_type.erasure() else {
                return false;
            };
            // A raw view never converts to a parameterized type without a warning.
            let Some(TypeRef::Generic { args: view_args, .. }) = as_super(ts, sub, super_fqn)
            else {
                return false;
            };
            view_args.len() == args.len()
                && args
                    .iter()
                    .zip(view_args.iter())
                    .all(|(outer, inner)| contains(outer, inner, ts))
        }

        // Unresolved simple names only match themselves (handled by identity).
        _ => false,
    }
}

/// Type-argument containment: does `outer` (possibly a wildcard) contain `inner`?
fn contains<T: JavaTypeSystem + ?Sized>(outer: &TypeRef, inner: &TypeRef, ts: &T) -> bool {
    if outer == inner {
        return true;
    }
    match outer {
        TypeRef::Wildcard { bound: None, .. } => true,
        TypeRef::Wildcard {
            bound: Some(bound),
            is_upper_bound: true,
        } => match inner {
            TypeRef::Wildcard {
                bound: Some(inner_bound),
                is_upper_bound: true,
            } => is_subtype(inner_bound, bound, ts),
            TypeRef::Wildcard { .. } => false,
            other => is_subtype(other, bound, ts),
        },
        TypeRef::Wildcard {
            bound: Some(bound),
            is_upper_bound: false,
        } => match inner {
            TypeRef::Wildcard {
                bound: Some(inner_bound),
                is_upper_bound: false,
            } => is_subtype(bound, inner_bound, ts),
            TypeRef::Wildcard { .. } => false,
            other => is_subtype(bound, other, ts),
        },
        _ => false,
    }
}

/// Assignment compatibility: identity, widening, boxing then widening,
/// unboxing then widening.
pub fn is_assignable<T: JavaTypeSystem + ?Sized>(value: &TypeRef, target: &TypeRef, ts: &T) -> bool {
    if matches!(target, TypeRef::Wildcard { bound: None, .. }) {
        return true;
    }
    if is_subtype(value, target, ts) {
        return true;
    }
    if value.is_primitive() && target.is_reference() {
        return is_subtype(&value.boxed(), target, ts);
    }
    if target.is_primitive() {
        if let Some(unboxed) = value.unboxed() {
            return unboxed == *target || is_subtype(&unboxed, target, ts);
        }
    }
    false
}

pub fn is_primitive_subtype(sub: &str, sup: &str) -> bool {
    match sub {
        "byte" => matches!(sup, "short" | "int" | "long" | "float" | "double"),
        "short" => matches!(sup, "int" | "long" | "float" | "double"),
        "char" => matches!(sup, "int" | "long" | "float" | "double"),
        "int" => matches!(sup, "long" | "float" | "double"),
        "long" => matches!(sup, "float" | "double"),
        "float" => matches!(sup, "double"),
        _ => false,
    }
}

fn is_class_subtype<T: JavaTypeSystem + ?Sized>(sub_fqn: &str, super_fqn: &str, ts: &T) -> bool {
    if sub_fqn == super_fqn {
        return true;
    }

    ts.walk_ancestors(sub_fqn).any(|ancestor| ancestor == super_fqn)
}

/// View `ty` as an instance of the ancestor `target`, carrying type
/// arguments through the hierarchy: `as_super(ArrayList<String>, "java.util.List")`
/// is `List<String>`. Raw types yield raw (erased) views.
pub fn as_super<T: JavaTypeSystem + ?Sized>(ts: &T, ty: &TypeRef, target: &str) -> Option<TypeRef> {
    as_super_at(ts, ty, target, 0)
}

fn as_super_at<T: JavaTypeSystem + ?Sized>(
    ts: &T,
    ty: &TypeRef,
    target: &str,
    depth: usize,
) -> Option<TypeRef> {
    if depth > MAX_DEPTH {
        return None;
    }
    let fqn = ty.erasure()?;
    if fqn == target {
        return Some(ty.clone());
    }
    if target == OBJECT {
        return Some(TypeRef::id(OBJECT));
    }

    let params = ts
        .get_type_info(fqn)
        .map(|info| info.parameter_names())
        .unwrap_or_default();
    let args = ty.type_args();
    let is_raw = !params.is_empty() && args.len() != params.len();

    let mut subst = Substitution::new();
    if !is_raw {
        for (param, arg) in params.iter().zip(args.iter()) {
            subst.insert(param.clone(), arg.clone());
        }
    }

    let supers = ts
        .get_superclass(fqn)
        .into_iter()
        .chain(ts.get_interfaces(fqn));
    for sup in supers {
        let sup = if is_raw {
            match sup.erasure() {
                Some(erased) => TypeRef::id(erased),
                None => continue,
            }
        } else {
            subst.apply(&sup)
        };
        if let Some(view) = as_super_at(ts, &sup, target, depth + 1) {
            return Some(view);
        }
    }
    None
}

/// Element type produced by iterating `ty` in an enhanced `for`.
pub fn iteration_element<T: JavaTypeSystem + ?Sized>(ts: &T, ty: &TypeRef) -> Option<TypeRef> {
    match ty {
        TypeRef::Array {
            element,
            dimensions,
        } => {
            if *dimensions > 1 {
                Some(TypeRef::array_of((**element).clone(), dimensions - 1))
            } else {
                Some((**element).clone())
            }
        }
        TypeRef::Id(_) | TypeRef::Generic { .. } => {
            let view = as_super(ts, ty, "java.lang.Iterable")?;
            match view.type_args().first() {
                Some(TypeRef::Wildcard {
                    bound: Some(bound),
                    is_upper_bound: true,
                }) => Some((**bound).clone()),
                Some(TypeRef::Wildcard { .. }) => Some(TypeRef::id(OBJECT)),
                Some(arg) => Some(arg.clone()),
                None => Some(TypeRef::id(OBJECT)),
            }
        }
        _ => None,
    }
}

/// Least upper bound of two reference types, simplified: the narrower of
/// the two when they are related, otherwise the first common proper
/// ancestor of `a` other than `Object`, otherwise `Lub([a, b])`.
pub fn lub<T: JavaTypeSystem + ?Sized>(ts: &T, a: &TypeRef, b: &TypeRef) -> TypeRef {
    if is_subtype(a, b, ts) {
        return b.clone();
    }
    if is_subtype(b, a, ts) {
        return a.clone();
    }

    if let (Some(ea), Some(eb)) = (a.erasure(), b.erasure()) {
        if ea == eb {
            let unbounded = TypeRef::Wildcard {
                bound: None,
                is_upper_bound: true,
            };
            let arity = a.type_args().len();
            return TypeRef::generic(ea, vec![unbounded; arity]);
        }

        for ancestor in ts.walk_ancestors(ea) {
            if ancestor == OBJECT {
                continue;
            }
            if let Some(view) = as_super(ts, a, &ancestor) {
                if is_subtype(b, &view, ts) {
                    return view;
                }
            }
        }
    }

    let mut members = Vec::new();
    for side in [a, b] {
        match side {
            TypeRef::Lub(inner) => members.extend(inner.iter().cloned()),
            other => members.push(other.clone()),
        }
    }
    members.dedup();
    TypeRef::Lub(members)
}
