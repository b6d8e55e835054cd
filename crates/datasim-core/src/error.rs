use thiserror::Error;

/// Core error type shared across datasim crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed field parameters, rejected when the field is built.
    #[error("validation error: {0}")]
    Validation(String),
    /// Unsupported output format or an unresolvable custom generator.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A date or datetime string could not be parsed.
    #[error("type coercion error: {0}")]
    TypeCoercion(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    pub fn type_coercion(message: impl Into<String>) -> Self {
        Error::TypeCoercion(message.into())
    }
}

/// Convenience alias for results returned by datasim crates.
pub type Result<T> = std::result::Result<T, Error>;
