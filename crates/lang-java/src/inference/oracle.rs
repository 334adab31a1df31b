//! Per-declaration type questions: what is written, and what `var` would infer.
//!
//! The oracle never looks at the declared type when inferring. The
//! initializer is typed on its own, exactly as the compiler would type it
//! once the declared type is gone.

use crate::inference::adapters::LayeredTypeSystem;
use crate::inference::core::numeric::binary_promotion;
use crate::inference::core::subtyping::{as_super, iteration_element};
use crate::inference::strategy::diamond_arguments;
use crate::inference::{InferContext, JavaTypeSystem, infer_expression};
use crate::parser::utils::{any_descendant, named_child_of_kind, span_of, unparenthesize};
use crate::parser::{CompilationUnit, DeclarationSite, LocalDeclaration};
use crate::scope::{AssignmentOp, ScopeTree, UnresolvedSymbol};
use serde::Serialize;
use tree_sitter::Node;
use varscope_api::models::{TypeArgumentFill, TypeRef};

/// Syntactic class of an initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitializerShape {
    Absent,
    Plain,
    /// `{1, 2, 3}` shorthand
    ArrayLiteral,
    NullLiteral,
    Lambda,
    MethodReference,
    AnonymousClass { diamond: bool },
    /// `new Foo<>(..)`
    DiamondConstructor,
    Conditional,
}

/// Explicit type arguments for a `<>` constructor, taken from the declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiamondCompletion {
    pub fill: TypeArgumentFill,
    /// Constructed type once the arguments are spelled out
    pub completed: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredType {
    /// What `var` would assign; `Unknown` when it cannot be determined
    pub ty: TypeRef,
    pub shape: InitializerShape,
    pub diamond: Option<DiamondCompletion>,
    /// A lambda or method reference appears anywhere in the initializer
    pub lambda_bearing: bool,
}

impl InferredType {
    /// The type the declaration would end up with after rewriting.
    pub fn effective(&self) -> &TypeRef {
        self.diamond
            .as_ref()
            .map(|d| &d.completed)
            .unwrap_or(&self.ty)
    }
}

/// How the declared type relates to the inferred one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    Identical,
    /// Different primitive kinds, or a primitive and its wrapper
    Primitive { declared: TypeRef, inferred: TypeRef },
    /// Declared type is a proper supertype of the inferred one
    Broader { declared: TypeRef, inferred: TypeRef },
    /// Neither is a subtype of the other
    Unrelated { declared: TypeRef, inferred: TypeRef },
    Unresolved,
}

/// Compare a declared type with the type `var` would infer.
pub fn divergence<T: JavaTypeSystem + ?Sized>(
    ts: &T,
    declared: &TypeRef,
    inferred: &TypeRef,
) -> Divergence {
    if declared.contains_unknown() || inferred.contains_unknown() {
        return Divergence::Unresolved;
    }
    if declared == inferred {
        return Divergence::Identical;
    }

    let primitive_pair = match (declared.is_primitive(), inferred.is_primitive()) {
        (true, true) => true,
        (true, false) => inferred.unboxed().as_ref() == Some(declared),
        (false, true) => declared.unboxed().as_ref() == Some(inferred),
        (false, false) => false,
    };
    if primitive_pair {
        return Divergence::Primitive {
            declared: declared.clone(),
            inferred: inferred.clone(),
        };
    }

    let narrowed = if inferred.is_primitive() {
        inferred.boxed()
    } else {
        inferred.clone()
    };
    if ts.is_subtype(&narrowed, declared) {
        Divergence::Broader {
            declared: declared.clone(),
            inferred: inferred.clone(),
        }
    } else {
        Divergence::Unrelated {
            declared: declared.clone(),
            inferred: inferred.clone(),
        }
    }
}

/// Answers type questions about the declarations of one unit.
pub struct TypeOracle<'a> {
    unit: &'a CompilationUnit,
    scopes: &'a ScopeTree<'a>,
    ts: Box<dyn JavaTypeSystem + 'a>,
}

impl<'a> TypeOracle<'a> {
    /// Oracle over the unit's own types layered on the built-in JDK table.
    pub fn new(unit: &'a CompilationUnit, scopes: &'a ScopeTree<'a>) -> Self {
        Self::with_type_system(unit, scopes, Box::new(LayeredTypeSystem::new(scopes.types())))
    }

    pub fn with_type_system(
        unit: &'a CompilationUnit,
        scopes: &'a ScopeTree<'a>,
        ts: Box<dyn JavaTypeSystem + 'a>,
    ) -> Self {
        Self { unit, scopes, ts }
    }

    pub fn type_system(&self) -> &dyn JavaTypeSystem {
        self.ts.as_ref()
    }

    pub fn scopes(&self) -> &ScopeTree<'a> {
        self.scopes
    }

    fn context(&self) -> InferContext<'_> {
        InferContext::new(
            self.unit.source(),
            self.ts.as_ref(),
            self.scopes.types().resolution_context(),
        )
        .with_scopes(self.scopes)
    }

    /// The declared type, resolved. `var` declarations yield `Unknown`.
    pub fn as_written_type(&self, decl: &LocalDeclaration) -> TypeRef {
        if let Some(binding) = self.scopes.binding_of(decl) {
            if !binding.declared_type.is_unknown() {
                return binding.declared_type.clone();
            }
        }
        self.context().parse_type(&decl.type_node)
    }

    /// What `var` would infer from the initializer alone.
    pub fn would_infer_type(&self, decl: &LocalDeclaration) -> InferredType {
        let Some(init) = decl.initializer else {
            return InferredType {
                ty: TypeRef::Unknown,
                shape: InitializerShape::Absent,
                diamond: None,
                lambda_bearing: false,
            };
        };

        let ctx = self.context();
        let lambda_bearing = any_descendant(&init, &|n: &Node| {
            matches!(n.kind(), "lambda_expression" | "method_reference")
        });

        if decl.site == DeclarationSite::EnhancedFor {
            let ty = infer_expression(&init, &ctx)
                .and_then(|iterable| iteration_element(ctx.ts, &iterable))
                .unwrap_or(TypeRef::Unknown);
            return InferredType {
                ty,
                shape: InitializerShape::Plain,
                diamond: None,
                lambda_bearing,
            };
        }

        let shape = classify(init);
        let ty = match shape {
            InitializerShape::NullLiteral => TypeRef::Null,
            InitializerShape::ArrayLiteral
            | InitializerShape::Lambda
            | InitializerShape::MethodReference
            | InitializerShape::Absent => TypeRef::Unknown,
            _ => infer_expression(&init, &ctx).unwrap_or(TypeRef::Unknown),
        };
        let diamond = match shape {
            InitializerShape::DiamondConstructor => self.diamond_completion(decl),
            _ => None,
        };

        tracing::trace!(name = %decl.name, ty = %ty, ?shape, "inferred initializer");
        InferredType {
            ty,
            shape,
            diamond,
            lambda_bearing,
        }
    }

    /// Explicit type arguments for a `<>` initializer, when the declared
    /// type's arguments carry over unchanged to the constructed class.
    pub fn diamond_completion(&self, decl: &LocalDeclaration) -> Option<DiamondCompletion> {
        let creation = unparenthesize(decl.initializer?);
        if creation.kind() != "object_creation_expression" {
            return None;
        }
        let created_node = creation.child_by_field_name("type")?;
        let empty = diamond_arguments(&created_node)?;

        let declared = self.as_written_type(decl);
        let TypeRef::Generic { args, .. } = &declared else {
            return None;
        };
        if args.iter().any(|a| matches!(a, TypeRef::Wildcard { .. })) {
            return None;
        }
        let declared_fqn = declared.erasure()?;

        let ctx = self.context();
        let created = ctx.parse_type(&created_node);
        let created_fqn = created.erasure()?;
        if created_fqn != declared_fqn {
            let params = self.ts.get_type_info(created_fqn)?.parameter_names();
            if params.len() != args.len() {
                return None;
            }
            let own: Vec<TypeRef> = params.iter().map(|p| TypeRef::id(p.clone())).collect();
            let view = as_super(
                self.ts.as_ref(),
                &TypeRef::generic(created_fqn, own.clone()),
                declared_fqn,
            )?;
            if view.type_args() != own.as_slice() {
                return None;
            }
        }

        let written = named_child_of_kind(&decl.type_node, "type_arguments")?;
        Some(DiamondCompletion {
            fill: TypeArgumentFill {
                span: span_of(&empty),
                text: self.unit.node_text(&written).to_string(),
            },
            completed: TypeRef::generic(created_fqn, args.clone()),
        })
    }

    /// Declared type against what the rewritten declaration would have.
    pub fn compare(&self, decl: &LocalDeclaration) -> Divergence {
        let declared = self.as_written_type(decl);
        let inferred = self.would_infer_type(decl);
        divergence(self.ts.as_ref(), &declared, inferred.effective())
    }

    pub fn divergence(&self, declared: &TypeRef, inferred: &TypeRef) -> Divergence {
        divergence(self.ts.as_ref(), declared, inferred)
    }

    /// Describe the first later write to the declared variable that would no
    /// longer compile (or would silently truncate) if its type became `target`.
    pub fn first_incompatible_assignment(
        &self,
        decl: &LocalDeclaration,
        target: &TypeRef,
    ) -> Option<String> {
        let binding = self.scopes.binding_of(decl)?;
        let ctx = self.context();
        let source = self.unit.source();

        for assignment in &binding.assignments {
            let text = source
                .get(assignment.span.start..assignment.span.end)
                .unwrap_or_default();
            let value = assignment
                .value
                .and_then(|v| infer_expression(&v, &ctx))
                .unwrap_or(TypeRef::Unknown);

            match &assignment.operator {
                AssignmentOp::Simple => {
                    if value.contains_unknown() {
                        return Some(format!("`{text}` assigns a value of unknown type"));
                    }
                    if !self.ts.is_assignable(&value, target) {
                        return Some(format!("`{text}` assigns {value}, not a {target}"));
                    }
                }
                AssignmentOp::Compound(op) if target.is_numeric_primitive() && !is_shift(op) => {
                    if value.contains_unknown() {
                        return Some(format!("`{text}` combines a value of unknown type"));
                    }
                    if let Some(promoted) = binary_promotion(target, &value) {
                        if promoted != *target {
                            return Some(format!("`{text}` computes {promoted}, wider than {target}"));
                        }
                    }
                }
                AssignmentOp::Compound(_) | AssignmentOp::Increment => {}
            }
        }
        None
    }

    /// Identifiers no binding or known member could account for.
    pub fn unresolved(&self) -> &[UnresolvedSymbol] {
        self.scopes.unresolved()
    }
}

fn is_shift(op: &str) -> bool {
    matches!(op, "<<=" | ">>=" | ">>>=")
}

fn classify(init: Node) -> InitializerShape {
    let node = unparenthesize(init);
    match node.kind() {
        "array_initializer" => InitializerShape::ArrayLiteral,
        "null_literal" => InitializerShape::NullLiteral,
        "lambda_expression" => InitializerShape::Lambda,
        "method_reference" => InitializerShape::MethodReference,
        "object_creation_expression" => {
            let diamond = node
                .child_by_field_name("type")
                .and_then(|t| diamond_arguments(&t))
                .is_some();
            if named_child_of_kind(&node, "class_body").is_some() {
                InitializerShape::AnonymousClass { diamond }
            } else if diamond {
                InitializerShape::DiamondConstructor
            } else {
                InitializerShape::Plain
            }
        }
        "ternary_expression" => {
            let branches = ["consequence", "alternative"]
                .iter()
                .filter_map(|f| node.child_by_field_name(f))
                .map(classify);
            for branch in branches {
                if matches!(
                    branch,
                    InitializerShape::Lambda | InitializerShape::MethodReference
                ) {
                    return branch;
                }
            }
            InitializerShape::Conditional
        }
        _ => InitializerShape::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::JavaParser;

    fn shapes(body: &str) -> Vec<InitializerShape> {
        let src = format!("import java.util.*;\nclass T {{ void m(boolean f) {{\n{body}\n}} }}");
        let unit = JavaParser::new().parse(&src).unwrap();
        unit.declarations()
            .iter()
            .map(|d| d.initializer.map(classify).unwrap_or(InitializerShape::Absent))
            .collect()
    }

    #[test]
    fn classifies_initializers() {
        let got = shapes(
            "int[] a = {1};\n\
             Object b = null;\n\
             Runnable c = () -> {};\n\
             Runnable d = (f ? System.out::println : null);\n\
             List<String> e = new ArrayList<>();\n\
             Object g = new Object() {};\n\
             Object h = f ? 1 : 2;\n\
             String i;",
        );
        assert_eq!(
            got,
            vec![
                InitializerShape::ArrayLiteral,
                InitializerShape::NullLiteral,
                InitializerShape::Lambda,
                InitializerShape::MethodReference,
                InitializerShape::DiamondConstructor,
                InitializerShape::AnonymousClass { diamond: false },
                InitializerShape::Conditional,
                InitializerShape::Absent,
            ]
        );
    }

    #[test]
    fn divergence_distinguishes_primitive_and_reference_changes() {
        let ts = crate::inference::adapters::JdkTypeSystem::shared();
        let long = TypeRef::raw("long");
        let int = TypeRef::raw("int");
        assert!(matches!(divergence(ts, &long, &int), Divergence::Primitive { .. }));
        assert!(matches!(
            divergence(ts, &TypeRef::id("java.lang.Integer"), &int),
            Divergence::Primitive { .. }
        ));

        let list = TypeRef::generic("java.util.List", vec![TypeRef::id("java.lang.String")]);
        let array_list =
            TypeRef::generic("java.util.ArrayList", vec![TypeRef::id("java.lang.String")]);
        assert!(matches!(divergence(ts, &list, &array_list), Divergence::Broader { .. }));
        assert!(matches!(
            divergence(ts, &array_list, &list),
            Divergence::Unrelated { .. }
        ));
        assert_eq!(divergence(ts, &list, &list), Divergence::Identical);
        assert_eq!(divergence(ts, &list, &TypeRef::Unknown), Divergence::Unresolved);
        assert!(matches!(
            divergence(ts, &TypeRef::id("java.lang.Object"), &int),
            Divergence::Broader { .. }
        ));
    }
}
