use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PRIMITIVES: &[&str] = &[
    "byte", "short", "char", "int", "long", "float", "double", "boolean",
];

const BOXES: &[(&str, &str)] = &[
    ("byte", "java.lang.Byte"),
    ("short", "java.lang.Short"),
    ("char", "java.lang.Character"),
    ("int", "java.lang.Integer"),
    ("long", "java.lang.Long"),
    ("float", "java.lang.Float"),
    ("double", "java.lang.Double"),
    ("boolean", "java.lang.Boolean"),
];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, JsonSchema, Default)]
#[serde(tag = "kind", content = "data")]
pub enum TypeRef {
    /// Primitive (`int`, `void`, ...) or a name that could not be resolved
    Raw(String),

    /// Resolved reference type (FQN)
    Id(String),

    /// Generic instantiation (e.g., List<String>)
    Generic {
        base: Box<TypeRef>,
        args: Vec<TypeRef>,
    },

    /// Array type (e.g., String[])
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },

    /// Wildcard type argument (e.g., ? extends Number)
    Wildcard {
        bound: Option<Box<TypeRef>>,
        is_upper_bound: bool, // true: extends, false: super
    },

    /// Type of the `null` literal
    Null,

    /// Least upper bound of unrelated reference types, never denotable
    Lub(Vec<TypeRef>),

    #[default]
    Unknown,
}

impl TypeRef {
    /// Helper to create a Raw type
    pub fn raw(s: impl Into<String>) -> Self {
        TypeRef::Raw(s.into())
    }

    /// Helper to create an Id type
    pub fn id(s: impl Into<String>) -> Self {
        TypeRef::Id(s.into())
    }

    pub fn generic(base: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Generic {
            base: Box::new(TypeRef::Id(base.into())),
            args,
        }
    }

    pub fn array_of(element: TypeRef, dimensions: usize) -> Self {
        match element {
            TypeRef::Array {
                element,
                dimensions: inner,
            } => TypeRef::Array {
                element,
                dimensions: inner + dimensions,
            },
            other => TypeRef::Array {
                element: Box::new(other),
                dimensions,
            },
        }
    }

    /// The primitive keyword, if this is a primitive type.
    pub fn primitive(&self) -> Option<&str> {
        match self {
            TypeRef::Raw(name) if PRIMITIVES.contains(&name.as_str()) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.primitive().is_some()
    }

    pub fn is_numeric_primitive(&self) -> bool {
        matches!(self.primitive(), Some(p) if p != "boolean")
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TypeRef::Unknown)
    }

    /// True for anything that lives on the heap: classes, arrays, lubs and `null`.
    pub fn is_reference(&self) -> bool {
        match self {
            TypeRef::Id(_) | TypeRef::Generic { .. } | TypeRef::Array { .. } | TypeRef::Lub(_) => {
                true
            }
            TypeRef::Null => true,
            TypeRef::Raw(name) => !PRIMITIVES.contains(&name.as_str()) && name != "void",
            TypeRef::Wildcard { .. } | TypeRef::Unknown => false,
        }
    }

    /// FQN of the class part, ignoring type arguments.
    pub fn erasure(&self) -> Option<&str> {
        match self {
            TypeRef::Id(fqn) => Some(fqn.as_str()),
            TypeRef::Generic { base, .. } => base.erasure(),
            _ => None,
        }
    }

    pub fn type_args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Generic { args, .. } => args,
            _ => &[],
        }
    }

    /// Boxing conversion for primitives; reference types are returned unchanged.
    pub fn boxed(&self) -> TypeRef {
        match self.primitive() {
            Some(p) => BOXES
                .iter()
                .find(|(prim, _)| *prim == p)
                .map(|(_, wrapper)| TypeRef::id(*wrapper))
                .unwrap_or_else(|| self.clone()),
            None => self.clone(),
        }
    }

    /// Unboxing conversion for the eight wrapper classes.
    pub fn unboxed(&self) -> Option<TypeRef> {
        let fqn = match self {
            TypeRef::Id(fqn) => fqn.as_str(),
            _ => return None,
        };
        BOXES
            .iter()
            .find(|(_, wrapper)| *wrapper == fqn)
            .map(|(prim, _)| TypeRef::raw(*prim))
    }

    /// Whether this type mentions `Unknown` anywhere.
    pub fn contains_unknown(&self) -> bool {
        match self {
            TypeRef::Unknown => true,
            TypeRef::Generic { base, args } => {
                base.contains_unknown() || args.iter().any(TypeRef::contains_unknown)
            }
            TypeRef::Array { element, .. } => element.contains_unknown(),
            TypeRef::Wildcard { bound, .. } => bound.as_ref().is_some_and(|b| b.contains_unknown()),
            TypeRef::Lub(members) => members.iter().any(TypeRef::contains_unknown),
            _ => false,
        }
    }
}

fn simple_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}

/// Renders with simple class names, the way a type reads in source.
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Raw(name) => write!(f, "{name}"),
            TypeRef::Id(fqn) => write!(f, "{}", simple_name(fqn)),
            TypeRef::Generic { base, args } => {
                write!(f, "{base}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ">")
            }
            TypeRef::Array {
                element,
                dimensions,
            } => {
                write!(f, "{element}")?;
                for _ in 0..*dimensions {
                    write!(f, "[]")?;
                }
                Ok(())
            }
            TypeRef::Wildcard {
                bound,
                is_upper_bound,
            } => match bound {
                Some(b) if *is_upper_bound => write!(f, "? extends {b}"),
                Some(b) => write!(f, "? super {b}"),
                None => write!(f, "?"),
            },
            TypeRef::Null => write!(f, "null"),
            TypeRef::Lub(members) => {
                write!(f, "lub(")?;
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{m}")?;
                }
                write!(f, ")")
            }
            TypeRef::Unknown => write!(f, "<unknown>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxing_round_trips_for_every_primitive() {
        for p in PRIMITIVES {
            let prim = TypeRef::raw(*p);
            let boxed = prim.boxed();
            assert!(boxed.is_reference(), "{p} boxed to {boxed:?}");
            assert_eq!(boxed.unboxed(), Some(prim));
        }
    }

    #[test]
    fn display_uses_simple_names() {
        let ty = TypeRef::generic(
            "java.util.Map",
            vec![
                TypeRef::id("java.lang.String"),
                TypeRef::array_of(TypeRef::raw("int"), 2),
            ],
        );
        assert_eq!(ty.to_string(), "Map<String, int[][]>");
    }

    #[test]
    fn array_of_flattens_nested_arrays() {
        let inner = TypeRef::array_of(TypeRef::raw("int"), 1);
        assert_eq!(
            TypeRef::array_of(inner, 1),
            TypeRef::Array {
                element: Box::new(TypeRef::raw("int")),
                dimensions: 2
            }
        );
    }

    #[test]
    fn unresolved_raw_names_are_references() {
        assert!(TypeRef::raw("Widget").is_reference());
        assert!(!TypeRef::raw("long").is_reference());
        assert!(TypeRef::raw("long").is_numeric_primitive());
        assert!(!TypeRef::raw("boolean").is_numeric_primitive());
    }
}
