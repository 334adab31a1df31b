pub mod normalization;
pub mod numeric;
pub mod subtyping;
pub mod type_system;
pub mod types;
pub mod unification;
