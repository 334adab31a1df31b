//! Data structures for the type inference system.
//!
//! These are pure data types with no behavior logic.

use varscope_api::models::TypeRef;

/// Helper trait for TypeRef operations
pub trait TypeRefExt {
    fn as_fqn(&self) -> Option<String>;
}

impl TypeRefExt for TypeRef {
    fn as_fqn(&self) -> Option<String> {
        self.erasure().map(str::to_string)
    }
}

/// Information about a type (class, interface, enum, etc.)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Fully qualified name, e.g., "java.util.List"
    pub fqn: String,
    pub kind: TypeKind,
    /// Modifiers like public, abstract, final
    pub modifiers: Vec<String>,
    /// Generic type parameters, e.g., `<K, V>`
    pub type_parameters: Vec<TypeParameter>,
}

impl TypeInfo {
    pub fn parameter_names(&self) -> Vec<String> {
        self.type_parameters.iter().map(|p| p.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// A generic type parameter declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: String,
    /// Upper bounds as written, e.g. `["Comparable<T>"]`
    pub bounds: Vec<String>,
}

impl TypeParameter {
    pub fn unbounded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }
}

/// Information about a member (field, method, constructor)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    /// Simple name, e.g., "get" or "size"
    pub name: String,
    /// Fully qualified name, e.g., "java.util.List#get"
    pub fqn: String,
    pub kind: MemberKind,
    /// The type that declares this member (may differ from lookup type due to inheritance)
    pub declaring_type: String,
    /// Field type or method return type
    pub type_ref: TypeRef,
    /// Method parameters (None for fields)
    pub parameters: Option<Vec<ParameterInfo>>,
    /// Modifiers like public, static, final
    pub modifiers: Vec<String>,
    /// Method-level type parameters (`<T> T first(List<T>)`)
    pub type_parameters: Vec<String>,
}

impl MemberInfo {
    pub fn is_static(&self) -> bool {
        self.modifiers.iter().any(|m| m == "static")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
}

/// Information about a method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: String,
    pub type_ref: TypeRef,
    /// `String...`; `type_ref` is then the array type
    pub is_varargs: bool,
}

/// Everything needed to turn a simple name into an FQN.
#[derive(Debug, Clone, Default)]
pub struct TypeResolutionContext {
    pub package: Option<String>,
    /// Single-type imports, e.g. `java.util.List`
    pub imports: Vec<String>,
    /// Packages imported on demand (`import java.util.*`)
    pub on_demand: Vec<String>,
    /// Type parameters in scope (for generic methods/classes)
    pub type_parameters: Vec<String>,
    /// Types defined in the current file (FQN list)
    pub known_fqns: Vec<String>,
}

impl TypeResolutionContext {
    pub fn with_type_parameters(&self, extra: &[String]) -> Self {
        let mut ctx = self.clone();
        ctx.type_parameters.extend(extra.iter().cloned());
        ctx
    }
}
