//! Explicit fixture loading outside the per-example flow
//!
//! The seeds helper is for ad hoc use: seeding scripts, consoles, and
//! tests that want a fixture on demand. Unlike the automatic hook, an
//! explicit load asserts the fixture exists - a missing file is fatal -
//! and nothing is cached: repeated calls always re-resolve and
//! re-construct.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use core_model::{downcast, Convention, FixtureArgs, FixtureId, FixtureInstance, FixtureProvider};
use infra_registry::{LoadMode, UnitLoader};

use crate::debug::DebugSink;
use crate::error::SeedsError;

/// Explicit, parameterized, non-memoized fixture loader
pub struct SeedsHelper {
    convention: Convention,
    loader: UnitLoader,
    debug: DebugSink,
}

impl SeedsHelper {
    /// Creates a helper rooted at a spec directory
    pub fn new(spec_root: impl Into<PathBuf>, loader: UnitLoader) -> Self {
        SeedsHelper {
            convention: Convention::new(spec_root),
            loader,
            debug: DebugSink::from_env(),
        }
    }

    /// Creates a helper rooted at `<project_root>/spec`.
    ///
    /// Callers typically pass `env!("CARGO_MANIFEST_DIR")` as the project
    /// root.
    pub fn for_project(project_root: impl AsRef<Path>, loader: UnitLoader) -> Self {
        SeedsHelper::new(project_root.as_ref().join("spec"), loader)
    }

    /// Replaces the diagnostic sink; intended for tests
    pub fn with_debug_sink(mut self, debug: DebugSink) -> Self {
        self.debug = debug;
        self
    }

    /// Loads a fixture by name and constructs a fresh instance.
    ///
    /// The name is normalized by prefixing the root namespace when absent,
    /// so `Billing::Invoices` and `TestData::Billing::Invoices` load the
    /// same fixture.
    ///
    /// # Errors
    ///
    /// Returns [`SeedsError::MissingFixtureFile`] when no fixture-unit file
    /// exists at the derived path; the explicit call asserted it must.
    /// Registry and construction failures propagate as their own variants.
    pub fn load(&self, name: &str, args: &FixtureArgs) -> Result<FixtureInstance, SeedsError> {
        let identifier = FixtureId::parse(name)?.rooted();
        let path = self.convention.identifier_to_path(&identifier);

        if !path.exists() {
            self.debug.emit(
                "missing_fixture_file",
                format!("no file at {} for {identifier}", path.display()),
            );
            return Err(SeedsError::MissingFixtureFile { identifier, path });
        }

        self.debug.emit(
            "explicit_load",
            format!("loading {identifier} from {}", path.display()),
        );
        let unit_key = self.convention.spec_relative(&path);
        self.loader.load_unit(&unit_key, LoadMode::Required)?;
        let handle = self.loader.resolve_provider(&identifier)?;

        self.debug.emit(
            "constructing",
            format!("{identifier} with {} argument(s)", args.len()),
        );
        handle
            .construct(args)
            .map_err(|source| SeedsError::Construction { identifier, source })
    }

    /// Loads a fixture and downcasts it to the expected provider type.
    ///
    /// # Errors
    ///
    /// In addition to everything [`SeedsHelper::load`] raises, returns
    /// [`SeedsError::TypeMismatch`] when the built instance is not a `P`.
    pub fn load_as<P: FixtureProvider>(
        &self,
        name: &str,
        args: &FixtureArgs,
    ) -> Result<Arc<P>, SeedsError> {
        let identifier = FixtureId::parse(name)?.rooted();
        let instance = self.load(name, args)?;
        downcast::<P>(&instance).ok_or_else(|| SeedsError::TypeMismatch {
            identifier,
            expected: std::any::type_name::<P>(),
        })
    }
}
