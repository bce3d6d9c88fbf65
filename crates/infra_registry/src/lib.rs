//! Infrastructure Registry - process-wide fixture state
//!
//! This crate owns the one shared, mutable resource of the harness: the
//! loaded-units set and the provider registry. Units are installed into a
//! [`UnitCatalog`] keyed by their spec-relative path; loading a unit runs
//! its definition closure exactly once, populating the [`ProviderRegistry`]
//! with constructor handles keyed by canonical identifier.
//!
//! Loading the same unit twice never raises and never redefines, so
//! parallel example execution is safe.

pub mod error;
pub mod loader;
pub mod registry;
pub mod unit;

pub use error::{LookupError, RegistryError};
pub use loader::{LoadMode, UnitLoader};
pub use registry::{ProviderCtor, ProviderHandle, ProviderRegistry};
pub use unit::{FixtureUnit, UnitCatalog};
