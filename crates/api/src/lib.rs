//! Data model shared by the varscope analysis crates.

pub mod error;
pub mod models;

pub use error::{EditError, EditResult};
pub use models::*;
