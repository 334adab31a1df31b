//! File-level services around the varscope analysis: configuration,
//! discovery, batch processing, caching and editor coordinates.

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod position;
pub mod processor;
pub mod scanner;

pub use cache::AnalysisCache;
pub use config::{ConfigError, ConfigIssue, LoadedConfig, load_options, load_options_file};
pub use error::{Result, VarscopeError};
pub use processor::{FileReport, FixMode, Refactorer};
pub use scanner::Scanner;
