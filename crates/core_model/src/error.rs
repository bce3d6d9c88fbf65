//! Core error types used across the harness

use std::path::PathBuf;
use thiserror::Error;

/// Errors from identifier parsing and path/identifier conversion
#[derive(Debug, Error)]
pub enum ConventionError {
    /// The identifier does not follow the canonical namespaced form
    #[error("Invalid fixture identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    /// The path yields no segments a fixture identifier could be built from
    #[error("Path '{}' has no usable segments to derive a fixture identifier", .path.display())]
    UnrepresentablePath { path: PathBuf },
}

impl ConventionError {
    pub fn invalid_identifier(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        ConventionError::InvalidIdentifier {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    pub fn unrepresentable_path(path: impl Into<PathBuf>) -> Self {
        ConventionError::UnrepresentablePath { path: path.into() }
    }
}

/// Errors raised by provider constructors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A required constructor argument was not supplied
    #[error("Missing argument '{0}'")]
    MissingArgument(String),

    /// A constructor argument had the wrong type or an unusable value
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Construction failed for a provider-specific reason
    #[error("Construction failed: {0}")]
    Construction(String),
}

impl ProviderError {
    pub fn missing_argument(name: impl Into<String>) -> Self {
        ProviderError::MissingArgument(name.into())
    }

    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ProviderError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn construction(message: impl Into<String>) -> Self {
        ProviderError::Construction(message.into())
    }
}
