use crate::config::ConfigError;
use thiserror::Error;
use varscope_api::EditError;
use varscope_java::ParseError;

#[derive(Error, Debug)]
pub enum VarscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parsing error: {0}")]
    Parse(#[from] ParseError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, VarscopeError>;
