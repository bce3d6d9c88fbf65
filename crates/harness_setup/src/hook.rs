//! Per-example setup hook
//!
//! Executed once for each test example at setup time. The hook decides,
//! in order: whether the example opted out, whether a fixture unit exists
//! for it, and how the provider instance should be bound (override, eager,
//! or lazy). The decision is made once per context and never re-evaluated
//! within the same example run.

use std::sync::Arc;

use core_model::{Convention, FixtureArgs, FixtureInstance};
use infra_registry::{LoadMode, UnitLoader};

use crate::binding::LazyBinding;
use crate::config::HarnessConfig;
use crate::context::TestContext;
use crate::debug::DebugSink;
use crate::error::SetupError;

/// Binding name exposing the resolved provider handle
pub const CLASS_BINDING: &str = "test_data_class";

/// Binding name exposing the provider instance
pub const INSTANCE_BINDING: &str = "test_data";

/// How setup concluded for one example
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// The example opted out via its `test_data` flag
    Disabled,
    /// No fixture unit file exists for the example; nothing to load
    NoFixtureUnit,
    /// Instance binding constructs the provider on first access
    BoundLazy,
    /// Provider was constructed at setup time
    BoundEager,
    /// Instance binding forwards to the context's override accessor
    BoundOverride,
}

/// Orchestrates convention resolution, unit loading, and binding
pub struct ExampleHook {
    convention: Convention,
    loader: UnitLoader,
}

impl ExampleHook {
    /// Creates a hook for the configured spec root
    pub fn new(config: &HarnessConfig, loader: UnitLoader) -> Self {
        ExampleHook {
            convention: config.convention(),
            loader,
        }
    }

    /// Runs setup for one example, with diagnostics per its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::UnresolvedProvider`] when a fixture unit
    /// exists but the expected provider cannot be resolved, and
    /// [`SetupError::Construction`] when eager construction fails. Both
    /// abort setup with no bindings registered.
    pub fn run(&self, ctx: &mut TestContext) -> Result<SetupOutcome, SetupError> {
        let debug = DebugSink::for_context(ctx.metadata());
        self.run_with_sink(ctx, &debug)
    }

    /// Runs setup with an explicit diagnostic sink
    pub fn run_with_sink(
        &self,
        ctx: &mut TestContext,
        debug: &DebugSink,
    ) -> Result<SetupOutcome, SetupError> {
        if !ctx.metadata().uses_test_data() {
            debug.emit(
                "opted_out",
                format!("spec opted out of test_data ({})", ctx.description()),
            );
            return Ok(SetupOutcome::Disabled);
        }

        let unit_path = self.convention.unit_path_for_spec(ctx.file_path());
        if !unit_path.exists() {
            debug.emit(
                "no_fixture_unit",
                format!("can't find {}, so assuming none to load", unit_path.display()),
            );
            return Ok(SetupOutcome::NoFixtureUnit);
        }

        let identifier = self.convention.path_to_identifier(ctx.file_path())?;
        debug.emit(
            "resolving",
            format!("loading '{identifier}' as the test data class"),
        );

        let unit_key = self.convention.spec_relative(&unit_path);
        let handle = self
            .loader
            .load_unit(&unit_key, LoadMode::Optional)
            .and_then(|()| self.loader.resolve_provider(&identifier))
            .map_err(|source| SetupError::UnresolvedProvider {
                unit_path: unit_path.clone(),
                identifier: identifier.clone(),
                source,
            })?;

        // Decide the instance binding before registering anything, so a
        // failed eager construction leaves no partial binding state.
        let (instance_binding, outcome) = if let Some(accessor) = ctx.override_provider() {
            debug.emit(
                "override",
                format!("test_data_override for '{}'", ctx.description()),
            );
            (
                LazyBinding::forwarded(Arc::clone(accessor)),
                SetupOutcome::BoundOverride,
            )
        } else if ctx.metadata().test_data_eager {
            debug.emit("eager", format!("constructing '{identifier}' at setup"));
            let value = handle
                .construct(&FixtureArgs::new())
                .map_err(|source| SetupError::Construction {
                    identifier: identifier.clone(),
                    source,
                })?;
            (LazyBinding::eager(value), SetupOutcome::BoundEager)
        } else {
            debug.emit(
                "lazy",
                format!("deferring construction of '{identifier}' to first access"),
            );
            let thunk_handle = handle.clone();
            (
                LazyBinding::lazy(move || thunk_handle.construct(&FixtureArgs::new())),
                SetupOutcome::BoundLazy,
            )
        };

        let class_value: FixtureInstance = Arc::new(handle);
        ctx.register_binding(CLASS_BINDING, LazyBinding::eager(class_value));
        ctx.register_binding(INSTANCE_BINDING, instance_binding);
        Ok(outcome)
    }
}
