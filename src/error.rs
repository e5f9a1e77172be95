use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(classroomview::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(classroomview::config))]
    Config(String),

    #[error("Fetch error: {0}")]
    #[diagnostic(code(classroomview::fetch))]
    Fetch(String),

    #[error("HTTP client error: {0}")]
    #[diagnostic(code(classroomview::http))]
    Http(#[from] reqwest::Error),

    #[error("Component error: {0}")]
    #[diagnostic(code(classroomview::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(classroomview::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(classroomview::serialization))]
    Serialization(String),

    #[error("Template error: {0}")]
    #[diagnostic(code(classroomview::template))]
    Template(#[from] askama::Error),

    #[error("Other error: {0}")]
    #[diagnostic(code(classroomview::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type GridResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create fetch errors
pub fn fetch_error(message: &str) -> Error {
    Error::Fetch(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
