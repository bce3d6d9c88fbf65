//! Harness Setup - convention-driven fixture injection for test examples
//!
//! This crate orchestrates the per-example flow: derive the fixture
//! identifier from the example's file path, discover and load the fixture
//! unit, resolve the provider, and expose it to the example's group scope
//! as a lazily- or eagerly-evaluated, override-aware binding. A separate
//! [`SeedsHelper`] loads the same fixtures explicitly, outside the
//! automatic flow.
//!
//! # Example
//!
//! ```rust,ignore
//! use harness_setup::{ExampleHook, HarnessConfig, TestContext};
//! use infra_registry::UnitLoader;
//!
//! let config = HarnessConfig::default();
//! let hook = ExampleHook::new(&config, UnitLoader::shared());
//!
//! let mut ctx = TestContext::builder()
//!     .file_path("spec/billing/invoices_spec.rs")
//!     .description("applies the invoice to the open cycle")
//!     .build();
//! let outcome = hook.run(&mut ctx)?;
//! ```

pub mod binding;
pub mod config;
pub mod context;
pub mod debug;
pub mod error;
pub mod hook;
pub mod seeds;

pub use binding::{LazyBinding, OverrideFn};
pub use config::HarnessConfig;
pub use context::{BindingScope, ExampleMetadata, TestContext, TestContextBuilder};
pub use debug::{DebugSink, DEBUG_ENV_TOGGLE};
pub use error::{SeedsError, SetupError};
pub use hook::{ExampleHook, SetupOutcome, CLASS_BINDING, INSTANCE_BINDING};
pub use seeds::SeedsHelper;
