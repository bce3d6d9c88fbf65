//! Harness configuration

use serde::Deserialize;
use std::path::PathBuf;

use core_model::Convention;

/// Harness configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HarnessConfig {
    /// Root directory of the spec tree
    pub spec_root: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            spec_root: PathBuf::from("spec"),
        }
    }
}

impl HarnessConfig {
    /// Loads configuration from environment
    ///
    /// Recognizes `TEST_DATA_SPEC_ROOT`; unset variables fall back to the
    /// defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("spec_root", "spec")?
            .add_source(config::Environment::with_prefix("TEST_DATA"))
            .build()?
            .try_deserialize()
    }

    /// Returns the naming convention rooted at the configured spec root
    pub fn convention(&self) -> Convention {
        Convention::new(&self.spec_root)
    }
}
