
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SieveletError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Unknown attribute: {attribute}")]
    AttributeNotFound { attribute: String },
    #[error("Duplicate template key: {0}")]
    DuplicateKey(String),
    #[error("Unknown template key: {0}")]
    UnknownKey(String),
    #[error("Unknown field: {path}")]
    UnknownField { path: String },
    #[error("Parse error: {message}")]
    Parse { message: String, line: Option<usize>, col: Option<usize> },
}

pub type Result<T> = std::result::Result<T, SieveletError>;
