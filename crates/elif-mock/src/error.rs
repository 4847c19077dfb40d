//! Error types for the mock record engine
//!
//! Only [`MockError::UnknownType`] can abort a `create`/`createList` call.
//! The remaining variants come from relationship accessors and configuration.

use std::fmt;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for mock server operations
pub type MockResult<T> = Result<T, MockError>;

/// Server method that triggered a name lookup.
///
/// Its `Display` form is the camelCase name used in error and warning messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Create,
    CreateList,
    Build,
    BuildList,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Create => "create",
            Method::CreateList => "createList",
            Method::Build => "build",
            Method::BuildList => "buildList",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error types for mock server operations
#[derive(Debug, Error)]
pub enum MockError {
    /// Neither a model nor a factory is registered for the requested name
    #[error("You called server.{method}('{requested}') but no model or factory was found.")]
    UnknownType { method: Method, requested: String },

    /// Accessor used a relationship name the model never declared
    #[error("The {model} model has no relationship named '{name}'")]
    UnknownRelationship { model: String, name: String },

    /// A belongsTo was read as hasMany, or the other way around
    #[error("Relationship '{name}' on {model} is {actual}, not {expected}")]
    WrongRelationshipKind {
        model: String,
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MockError {
    /// Create an unknown type error for the originally requested name
    pub fn unknown_type(method: Method, requested: impl Into<String>) -> Self {
        Self::UnknownType {
            method,
            requested: requested.into(),
        }
    }

    /// Returns true if this error aborted a creation call
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, Self::UnknownType { .. })
    }
}
