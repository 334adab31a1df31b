pub mod edit;
pub mod options;
pub mod span;
pub mod types;
pub mod verdict;

pub use edit::*;
pub use options::*;
pub use span::*;
pub use types::*;
pub use verdict::*;
