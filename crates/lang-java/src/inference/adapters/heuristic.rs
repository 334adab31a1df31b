use super::jdk::JdkTypeSystem;
use crate::inference::{
    InheritanceProvider, MemberInfo, MemberProvider, TypeInfo, TypeProvider, TypeResolutionContext,
};
use varscope_api::models::{PRIMITIVES, TypeRef};

/// A TypeProvider that resolves type names by convention, without any type table.
///
/// Follows the Java lookup order as far as a single file allows: types
/// declared in the unit, single-type imports, `java.lang`, on-demand imports
/// (checked against the JDK table), then the unit's own package.
pub struct HeuristicAdapter;

impl TypeProvider for HeuristicAdapter {
    fn get_type_info(&self, _fqn: &str) -> Option<TypeInfo> {
        None
    }

    fn resolve_type_name(&self, type_name: &str, ctx: &TypeResolutionContext) -> Option<String> {
        // 1. Primitives and type variables resolve to themselves
        if PRIMITIVES.contains(&type_name) || type_name == "void" {
            return Some(type_name.to_string());
        }
        if ctx.type_parameters.iter().any(|p| p == type_name) {
            return Some(type_name.to_string());
        }

        // 2. Dotted names (e.g. Map.Entry or com.example.Config)
        if let Some((first, rest)) = type_name.split_once('.') {
            if first.chars().next().is_some_and(char::is_lowercase) {
                return Some(type_name.to_string());
            }
            if let Some(first_fqn) = self.resolve_type_name(first, ctx) {
                if first_fqn != first {
                    return Some(format!("{first_fqn}.{rest}"));
                }
            }
            return Some(type_name.to_string());
        }

        let suffix = format!(".{type_name}");

        // 3. Types declared in this unit
        if let Some(fqn) = ctx
            .known_fqns
            .iter()
            .find(|fqn| fqn.as_str() == type_name || fqn.ends_with(&suffix))
        {
            return Some(fqn.clone());
        }

        // 4. Precise imports
        if let Some(imp) = ctx.imports.iter().find(|imp| imp.ends_with(&suffix)) {
            return Some(imp.clone());
        }

        // 5. java.lang (implicit import)
        let jdk = JdkTypeSystem::shared();
        let lang = format!("java.lang.{type_name}");
        if jdk.knows(&lang) {
            return Some(lang);
        }

        // 6. On-demand imports the JDK table can confirm
        for package in &ctx.on_demand {
            let candidate = format!("{package}.{type_name}");
            if jdk.knows(&candidate) {
                return Some(candidate);
            }
        }

        // 7. Current package
        match &ctx.package {
            Some(p) => Some(format!("{p}.{type_name}")),
            None => Some(type_name.to_string()),
        }
    }
}

impl InheritanceProvider for HeuristicAdapter {
    fn get_superclass(&self, _fqn: &str) -> Option<TypeRef> {
        None
    }

    fn get_interfaces(&self, _fqn: &str) -> Vec<TypeRef> {
        vec![]
    }
}

impl MemberProvider for HeuristicAdapter {
    fn get_members(&self, _type_fqn: &str, _member_name: &str) -> Vec<MemberInfo> {
        vec![]
    }

    fn get_all_members(&self, _type_fqn: &str) -> Vec<MemberInfo> {
        vec![]
    }
}
