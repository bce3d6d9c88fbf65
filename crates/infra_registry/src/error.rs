//! Registry and loader error types

use core_model::FixtureId;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to find a provider in the registry
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// Nothing is registered under the identifier
    #[error("no provider is registered under '{identifier}' (registered: {})", registered_list(.registered))]
    NotRegistered {
        identifier: FixtureId,
        /// Identifiers that are registered, for diagnosis
        registered: Vec<String>,
    },
}

fn registered_list(registered: &[String]) -> String {
    if registered.is_empty() {
        "none".to_string()
    } else {
        registered.join(", ")
    }
}

/// Errors from unit loading and provider resolution
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A required load found no unit installed under the path
    #[error("No fixture unit is installed for '{}'", .path.display())]
    MissingUnit { path: PathBuf },

    /// A loaded unit did not register the expected provider
    #[error("Expected a provider under '{identifier}', but resolution failed: {source}")]
    UnresolvedProvider {
        identifier: FixtureId,
        #[source]
        source: LookupError,
    },
}
