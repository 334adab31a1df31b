//! Numeric promotion (JLS 5.6) over primitive and boxed operands.

use varscope_api::models::TypeRef;

fn rank(primitive: &str) -> Option<u8> {
    match primitive {
        "byte" => Some(1),
        "short" => Some(2),
        "char" => Some(2),
        "int" => Some(3),
        "long" => Some(4),
        "float" => Some(5),
        "double" => Some(6),
        _ => None,
    }
}

/// The primitive an operand contributes to arithmetic, unboxing wrappers.
pub fn numeric_operand(ty: &TypeRef) -> Option<TypeRef> {
    let prim = if ty.is_primitive() {
        ty.clone()
    } else {
        ty.unboxed()?
    };
    prim.is_numeric_primitive().then_some(prim)
}

/// Unary numeric promotion: `byte`, `short`, `char` become `int`.
pub fn unary_promotion(ty: &TypeRef) -> Option<TypeRef> {
    let prim = numeric_operand(ty)?;
    match prim.primitive() {
        Some("byte" | "short" | "char") => Some(TypeRef::raw("int")),
        _ => Some(prim),
    }
}

/// Binary numeric promotion of two operand types.
pub fn binary_promotion(left: &TypeRef, right: &TypeRef) -> Option<TypeRef> {
    let l = numeric_operand(left)?;
    let r = numeric_operand(right)?;
    let lr = rank(l.primitive()?)?;
    let rr = rank(r.primitive()?)?;
    let wider = if lr >= rr { l } else { r };
    match wider.primitive() {
        Some("double" | "float" | "long") => Some(wider),
        _ => Some(TypeRef::raw("int")),
    }
}

/// Whether the type is `boolean` or `Boolean`.
pub fn is_boolean(ty: &TypeRef) -> bool {
    ty.primitive() == Some("boolean") || ty.unboxed().is_some_and(|p| p.primitive() == Some("boolean"))
}
