//! Static type inference for Java expressions.
//!
//! Expressions are typed by a chain of small [`InferStrategy`] values, each
//! handling a few node kinds and deferring to the next with `or_else`. They
//! all read the same immutable [`InferContext`] and look types up through a
//! [`JavaTypeSystem`]:
//!
//! ```text
//! TypeOracle ── per declaration: as written vs. what `var` would infer
//!     │
//!     ▼
//! InferStrategy chain ── literals, locals, calls, operators, ...
//!     │
//!     ▼
//! JavaTypeSystem ── LocalTypeIndex (this unit) over JdkTypeSystem
//! ```
//!
//! ```ignore
//! let scopes = ScopeTree::build(&unit);
//! let oracle = TypeOracle::new(&unit, &scopes);
//! for decl in unit.declarations() {
//!     println!("{:?}", oracle.compare(&decl));
//! }
//! ```

pub mod adapters;
pub mod context;
pub mod core;
pub mod oracle;
pub mod strategy;

// Re-export public API
pub use core::type_system::{InheritanceProvider, JavaTypeSystem, MemberProvider, TypeProvider};

pub use core::types::{
    MemberInfo, MemberKind, ParameterInfo, TypeInfo, TypeKind, TypeParameter, TypeRefExt,
    TypeResolutionContext,
};

pub use context::InferContext;
pub use oracle::{
    DiamondCompletion, Divergence, InferredType, InitializerShape, TypeOracle,
};
pub use strategy::{InferStrategy, infer_expression};
