//! Core trait definitions for the type system abstraction.
//!
//! These traits abstract away the data source, allowing the inference
//! engine to work with the built-in JDK table, the types declared in the
//! unit being analyzed, or mock implementations.

use super::types::{MemberInfo, ParameterInfo, TypeInfo, TypeResolutionContext};
use std::collections::{HashSet, VecDeque};
use varscope_api::models::TypeRef;

/// Hierarchy walks stop here; real Java hierarchies are far shallower.
const MAX_ANCESTOR_DEPTH: usize = 32;

/// Provides type information by FQN.
pub trait TypeProvider: Send + Sync {
    /// Get type info for a fully qualified name.
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo>;

    /// Resolve a simple or dotted type name to its FQN.
    fn resolve_type_name(&self, simple_name: &str, context: &TypeResolutionContext)
    -> Option<String>;
}

/// Provides inheritance relationship information.
///
/// Supertypes are returned in their generic form, expressed over the
/// declaring type's own type parameters (`ArrayList<E>` → `List<E>`).
pub trait InheritanceProvider: Send + Sync {
    /// Direct superclass. `None` for `java.lang.Object`, interfaces and unknown types.
    fn get_superclass(&self, fqn: &str) -> Option<TypeRef>;

    /// Interfaces directly implemented (or extended, for interfaces).
    fn get_interfaces(&self, fqn: &str) -> Vec<TypeRef>;

    /// Walk all ancestor types in BFS order (erased FQNs, no duplicates).
    fn walk_ancestors(&self, fqn: &str) -> Box<dyn Iterator<Item = String> + '_> {
        let mut seen = HashSet::from([fqn.to_string()]);
        let mut order = Vec::new();
        let mut queue = VecDeque::from([(fqn.to_string(), 0usize)]);
        while let Some((current, depth)) = queue.pop_front() {
            if depth >= MAX_ANCESTOR_DEPTH {
                continue;
            }
            let supers = self
                .get_superclass(&current)
                .into_iter()
                .chain(self.get_interfaces(&current));
            for sup in supers {
                if let Some(erased) = sup.erasure() {
                    if seen.insert(erased.to_string()) {
                        order.push(erased.to_string());
                        queue.push_back((erased.to_string(), depth + 1));
                    }
                }
            }
        }
        Box::new(order.into_iter())
    }
}

/// Provides member (field/method) lookup.
pub trait MemberProvider: Send + Sync {
    /// Members directly declared in the given type with the matching name.
    ///
    /// Does NOT search the inheritance hierarchy.
    fn get_members(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo>;

    /// All members directly declared in the given type.
    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo>;
}

/// The combined type system interface.
pub trait JavaTypeSystem: TypeProvider + InheritanceProvider + MemberProvider {
    /// Find a member in the type hierarchy.
    ///
    /// Searches the type itself first, then walks ancestors.
    fn find_member_in_hierarchy(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo> {
        let mut members = self.get_members(type_fqn, member_name);
        if !members.is_empty() {
            return members;
        }

        for ancestor in self.walk_ancestors(type_fqn) {
            members = self.get_members(&ancestor, member_name);
            if !members.is_empty() {
                return members;
            }
        }

        // Interfaces inherit Object's public methods too.
        if type_fqn != "java.lang.Object" {
            return self.get_members("java.lang.Object", member_name);
        }
        vec![]
    }

    /// Resolve the best matching method among candidates based on argument types.
    ///
    /// Follows the Java phases: strict (identity/subtyping), loose
    /// (boxing), then variable arity. `TypeRef::Unknown` arguments (lambdas,
    /// unresolved expressions) only match in a last pass and only when a
    /// single candidate of that arity remains.
    fn resolve_method(
        &self,
        candidates: &[MemberInfo],
        arg_types: &[TypeRef],
    ) -> Option<MemberInfo> {
        if candidates.is_empty() {
            return None;
        }

        let exact_fixed = collect_matching_candidates(candidates, |params| {
            matches_fixed_arity(params, arg_types, |arg, expected| arg == expected)
        });
        if !exact_fixed.is_empty() {
            return select_most_specific(self, exact_fixed, arg_types);
        }

        let subtype_fixed = collect_matching_candidates(candidates, |params| {
            matches_fixed_arity(params, arg_types, |arg, expected| {
                self.is_subtype(arg, expected)
            })
        });
        if !subtype_fixed.is_empty() {
            return select_most_specific(self, subtype_fixed, arg_types);
        }

        let loose_fixed = collect_matching_candidates(candidates, |params| {
            matches_fixed_arity(params, arg_types, |arg, expected| {
                self.is_assignable(arg, expected)
            })
        });
        if !loose_fixed.is_empty() {
            return select_most_specific(self, loose_fixed, arg_types);
        }

        let loose_varargs = collect_matching_candidates(candidates, |params| {
            matches_varargs_arity(params, arg_types, |arg, expected| {
                self.is_assignable(arg, expected)
            })
        });
        if !loose_varargs.is_empty() {
            return select_most_specific(self, loose_varargs, arg_types);
        }

        if arg_types.iter().any(TypeRef::contains_unknown) {
            let tolerant = collect_matching_candidates(candidates, |params| {
                matches_fixed_arity(params, arg_types, |arg, expected| {
                    arg.contains_unknown() || self.is_assignable(arg, expected)
                })
            });
            if tolerant.len() == 1 {
                return tolerant.into_iter().next();
            }
        }

        None
    }

    /// Check if sub is a subtype of super_type.
    ///
    /// Delegates to `subtyping::is_subtype` logic.
    fn is_subtype(&self, sub: &TypeRef, super_type: &TypeRef) -> bool {
        crate::inference::core::subtyping::is_subtype(sub, super_type, self)
    }

    /// Assignment compatibility: subtyping plus primitive widening and boxing.
    fn is_assignable(&self, value: &TypeRef, target: &TypeRef) -> bool {
        crate::inference::core::subtyping::is_assignable(value, target, self)
    }
}

// Blanket implementation: any type implementing all three traits gets JavaTypeSystem
impl<T: TypeProvider + InheritanceProvider + MemberProvider> JavaTypeSystem for T {}

fn matches_fixed_arity<F>(params: &[ParameterInfo], arg_types: &[TypeRef], mut matches: F) -> bool
where
    F: FnMut(&TypeRef, &TypeRef) -> bool,
{
    if params.len() != arg_types.len() {
        return false;
    }

    params
        .iter()
        .zip(arg_types.iter())
        .all(|(p, a)| matches(a, &p.type_ref))
}

fn matches_varargs_arity<F>(params: &[ParameterInfo], arg_types: &[TypeRef], mut matches: F) -> bool
where
    F: FnMut(&TypeRef, &TypeRef) -> bool,
{
    let Some(last_param) = params.last() else {
        return false;
    };

    if !last_param.is_varargs {
        return false;
    }

    let Some(element) = array_element(&last_param.type_ref) else {
        return false;
    };

    let fixed_count = params.len() - 1;
    if arg_types.len() < fixed_count {
        return false;
    }

    if !params[..fixed_count]
        .iter()
        .zip(arg_types[..fixed_count].iter())
        .all(|(p, a)| matches(a, &p.type_ref))
    {
        return false;
    }

    if arg_types.len() == fixed_count {
        return true;
    }

    // Direct array pass-through: foo(String[]) called with one String[] argument.
    if arg_types.len() == params.len() && matches(&arg_types[fixed_count], &last_param.type_ref) {
        return true;
    }

    arg_types[fixed_count..].iter().all(|a| matches(a, &element))
}

fn array_element(ty: &TypeRef) -> Option<TypeRef> {
    match ty {
        TypeRef::Array {
            element,
            dimensions,
        } if *dimensions > 1 => Some(TypeRef::array_of((**element).clone(), dimensions - 1)),
        TypeRef::Array { element, .. } => Some((**element).clone()),
        _ => None,
    }
}

fn collect_matching_candidates<F>(candidates: &[MemberInfo], mut matches: F) -> Vec<MemberInfo>
where
    F: FnMut(&[ParameterInfo]) -> bool,
{
    candidates
        .iter()
        .filter_map(|cand| {
            let params = cand.parameters.as_ref()?;
            if matches(params) {
                Some(cand.clone())
            } else {
                None
            }
        })
        .collect()
}

fn select_most_specific<T: JavaTypeSystem + ?Sized>(
    ts: &T,
    candidates: Vec<MemberInfo>,
    arg_types: &[TypeRef],
) -> Option<MemberInfo> {
    if candidates.len() <= 1 {
        return candidates.into_iter().next();
    }

    let mut best_idx = 0usize;
    let mut best_score = i32::MIN;

    for (i, cand) in candidates.iter().enumerate() {
        let mut score = 0i32;
        for (j, other) in candidates.iter().enumerate() {
            if i == j {
                continue;
            }
            let cand_more_specific = is_more_specific_than(ts, cand, other, arg_types);
            let other_more_specific = is_more_specific_than(ts, other, cand, arg_types);
            if cand_more_specific && !other_more_specific {
                score += 1;
            } else if other_more_specific && !cand_more_specific {
                score -= 1;
            }
        }

        if score > best_score {
            best_score = score;
            best_idx = i;
        }
    }

    candidates.get(best_idx).cloned()
}

fn is_more_specific_than<T: JavaTypeSystem + ?Sized>(
    ts: &T,
    left: &MemberInfo,
    right: &MemberInfo,
    arg_types: &[TypeRef],
) -> bool {
    let Some(left_types) = effective_param_types(left, arg_types.len()) else {
        return false;
    };
    let Some(right_types) = effective_param_types(right, arg_types.len()) else {
        return false;
    };
    if left_types.len() != right_types.len() {
        return false;
    }

    let mut strict = false;
    for (l, r) in left_types.iter().zip(right_types.iter()) {
        if l == r {
            continue;
        }
        if ts.is_subtype(l, r) {
            strict = true;
        } else {
            return false;
        }
    }
    strict
}

fn effective_param_types(member: &MemberInfo, arg_count: usize) -> Option<Vec<TypeRef>> {
    let params = member.parameters.as_ref()?;
    let Some(last) = params.last() else {
        return Some(vec![]);
    };

    if !last.is_varargs {
        if params.len() == arg_count {
            return Some(params.iter().map(|p| p.type_ref.clone()).collect());
        }
        return None;
    }

    let element = array_element(&last.type_ref)?;
    let fixed_count = params.len() - 1;
    if arg_count < fixed_count {
        return None;
    }

    let mut types = Vec::with_capacity(arg_count);
    for p in &params[..fixed_count] {
        types.push(p.type_ref.clone());
    }
    for _ in fixed_count..arg_count {
        types.push(element.clone());
    }
    Some(types)
}
