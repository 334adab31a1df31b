//! Type unification and substitution.
//!
//! Handles generic type parameter resolution: receiver type arguments are
//! substituted into member signatures, and method type parameters are bound
//! from argument types.

use super::subtyping::{as_super, lub};
use super::type_system::JavaTypeSystem;
use std::collections::HashMap;
use varscope_api::models::TypeRef;

/// A map from type variables to concrete types.
#[derive(Debug, Default, Clone)]
pub struct Substitution {
    map: HashMap<String, TypeRef>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, var: String, ty: TypeRef) {
        self.map.insert(var, ty);
    }

    pub fn get(&self, var: &str) -> Option<&TypeRef> {
        self.map.get(var)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Apply this substitution to a type.
    pub fn apply(&self, ty: &TypeRef) -> TypeRef {
        match ty {
            TypeRef::Id(name) => self.map.get(name).cloned().unwrap_or_else(|| ty.clone()),
            TypeRef::Array {
                element,
                dimensions,
            } => TypeRef::array_of(self.apply(element), *dimensions),
            TypeRef::Generic { base, args } => TypeRef::Generic {
                base: Box::new(self.apply(base)),
                args: args.iter().map(|arg| self.apply(arg)).collect(),
            },
            TypeRef::Wildcard {
                bound,
                is_upper_bound,
            } => TypeRef::Wildcard {
                bound: bound.as_ref().map(|b| Box::new(self.apply(b))),
                is_upper_bound: *is_upper_bound,
            },
            TypeRef::Lub(members) => TypeRef::Lub(members.iter().map(|m| self.apply(m)).collect()),
            // Primitives and others remain unchanged
            _ => ty.clone(),
        }
    }
}

/// Bind the method type parameters `vars` by matching declared parameter
/// types against argument types. Conflicting bindings widen to their lub.
pub fn bind_type_arguments<T: JavaTypeSystem + ?Sized>(
    ts: &T,
    params: &[TypeRef],
    args: &[TypeRef],
    vars: &[String],
) -> Substitution {
    let mut subst = Substitution::new();
    if vars.is_empty() {
        return subst;
    }
    for (param, arg) in params.iter().zip(args.iter()) {
        bind(ts, param, arg, vars, &mut subst, 0);
    }
    subst
}

fn bind<T: JavaTypeSystem + ?Sized>(
    ts: &T,
    param: &TypeRef,
    arg: &TypeRef,
    vars: &[String],
    subst: &mut Substitution,
    depth: usize,
) {
    if depth > 16 || arg.contains_unknown() || matches!(arg, TypeRef::Null) {
        return;
    }

    match param {
        TypeRef::Id(var) if vars.contains(var) => {
            let arg = match arg {
                TypeRef::Wildcard {
                    bound: Some(bound),
                    is_upper_bound: true,
                } => (**bound).clone(),
                TypeRef::Wildcard { .. } => TypeRef::id("java.lang.Object"),
                other => other.boxed(),
            };
            let merged = match subst.get(var) {
                Some(existing) if *existing != arg => lub(ts, existing, &arg),
                _ => arg,
            };
            subst.insert(var.clone(), merged);
        }
        TypeRef::Wildcard {
            bound: Some(bound), ..
        } => bind(ts, bound, arg, vars, subst, depth + 1),
        TypeRef::Generic { args: pargs, .. } => {
            let Some(base) = param.erasure() else {
                return;
            };
            if let Some(TypeRef::Generic { args: aargs, .. }) = as_super(ts, arg, base) {
                for (p, a) in pargs.iter().zip(aargs.iter()) {
                    bind(ts, p, a, vars, subst, depth + 1);
                }
            }
        }
        TypeRef::Array {
            element,
            dimensions,
        } => {
            if let TypeRef::Array {
                element: arg_element,
                dimensions: arg_dims,
            } = arg
            {
                if arg_dims >= dimensions {
                    let rest = arg_dims - dimensions;
                    let inner = if rest == 0 {
                        (**arg_element).clone()
                    } else {
                        TypeRef::array_of((**arg_element).clone(), rest)
                    };
                    bind(ts, element, &inner, vars, subst, depth + 1);
                }
            }
        }
        _ => {}
    }
}

/// Replace every variable in `vars` that is still free in `ty` by `Object`.
pub fn erase_free_variables(ty: &TypeRef, vars: &[String]) -> TypeRef {
    let mut subst = Substitution::new();
    for var in vars {
        subst.insert(var.clone(), TypeRef::id("java.lang.Object"));
    }
    subst.apply(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_substitutes_nested_arguments() {
        let mut subst = Substitution::new();
        subst.insert("E".into(), TypeRef::id("java.lang.String"));
        let ty = TypeRef::generic(
            "java.util.List",
            vec![TypeRef::Wildcard {
                bound: Some(Box::new(TypeRef::id("E"))),
                is_upper_bound: true,
            }],
        );
        let applied = subst.apply(&ty);
        assert_eq!(applied.to_string(), "List<? extends String>");
    }

    #[test]
    fn free_variables_erase_to_object() {
        let ty = TypeRef::generic("java.util.List", vec![TypeRef::id("T")]);
        let erased = erase_free_variables(&ty, &["T".to_string()]);
        assert_eq!(
            erased,
            TypeRef::generic("java.util.List", vec![TypeRef::id("java.lang.Object")])
        );
    }
}
