//! Adapters that implement JavaTypeSystem for various data sources.

mod heuristic;
mod jdk;
mod layered;
mod local;

pub use heuristic::HeuristicAdapter;
pub use jdk::JdkTypeSystem;
pub use layered::LayeredTypeSystem;
pub use local::LocalTypeIndex;
