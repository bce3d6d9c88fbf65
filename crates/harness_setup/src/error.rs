//! Setup and explicit-load errors
//!
//! All fatal conditions abort the current example's setup immediately and
//! name both the resolved file path and the expected identifier, so a
//! misconfigured spec tree is diagnosable from the message alone. Opting
//! out and a missing fixture unit are not errors; they surface as
//! [`crate::hook::SetupOutcome`] variants instead.

use std::path::PathBuf;
use thiserror::Error;

use core_model::{ConventionError, FixtureId, ProviderError};
use infra_registry::RegistryError;

/// Fatal failures during per-example setup
#[derive(Debug, Error)]
pub enum SetupError {
    /// The example's file path could not yield a canonical identifier
    #[error("Invalid spec path: {0}")]
    Convention(#[from] ConventionError),

    /// The fixture unit exists but did not register the expected provider
    #[error("Expected '{}' to define '{identifier}', but it does not: {source}", .unit_path.display())]
    UnresolvedProvider {
        unit_path: PathBuf,
        identifier: FixtureId,
        #[source]
        source: RegistryError,
    },

    /// Eager construction of the provider failed
    #[error("Failed to construct '{identifier}': {source}")]
    Construction {
        identifier: FixtureId,
        #[source]
        source: ProviderError,
    },
}

/// Fatal failures during explicit seeds loading
#[derive(Debug, Error)]
pub enum SeedsError {
    /// The requested name is not a well-formed identifier
    #[error("Invalid fixture identifier: {0}")]
    Identifier(#[from] ConventionError),

    /// The caller asserted a fixture must exist, and its file does not
    #[error("Expected to find test data for {identifier} in '{}', but that file doesn't exist", .path.display())]
    MissingFixtureFile {
        identifier: FixtureId,
        path: PathBuf,
    },

    /// Loading or resolution failed in the registry layer
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Construction of the provider failed
    #[error("Failed to construct '{identifier}': {source}")]
    Construction {
        identifier: FixtureId,
        #[source]
        source: ProviderError,
    },

    /// The provider built an instance of a different type than requested
    #[error("Expected '{identifier}' to provide {expected}")]
    TypeMismatch {
        identifier: FixtureId,
        expected: &'static str,
    },
}
