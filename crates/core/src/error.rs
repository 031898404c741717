//! Error types for homework status domain logic

use thiserror::Error;

/// Errors raised while inspecting a status API response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error("Missing key in response: {0}")]
    MissingKey(String),

    #[error("Response does not match the expected shape: {0}")]
    ShapeMismatch(String),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Result type alias for response checks
pub type ResponseResult<T> = Result<T, ResponseError>;
