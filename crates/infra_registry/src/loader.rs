//! Idempotent unit loader
//!
//! The loader ties the unit catalog to the provider registry and tracks
//! which units have already been loaded. Loading an already-loaded unit is
//! a no-op, never an error; the loaded-units set and the registry are the
//! process-wide shared resources, so the shared loader hands out clones of
//! the same state while isolated loaders give tests a fresh world.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use tracing::debug;

use core_model::FixtureId;

use crate::error::RegistryError;
use crate::registry::{ProviderHandle, ProviderRegistry};
use crate::unit::{FixtureUnit, UnitCatalog};

/// Policy for a load request whose path has no installed unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Tolerate an uninstalled path; used by automatic discovery
    Optional,
    /// Fail with [`RegistryError::MissingUnit`]; used by explicit loads
    Required,
}

static SHARED_CATALOG: Lazy<Arc<UnitCatalog>> = Lazy::new(|| Arc::new(UnitCatalog::new()));
static SHARED_REGISTRY: Lazy<Arc<ProviderRegistry>> =
    Lazy::new(|| Arc::new(ProviderRegistry::new()));
static SHARED_LOADED: Lazy<Arc<Mutex<HashSet<PathBuf>>>> =
    Lazy::new(|| Arc::new(Mutex::new(HashSet::new())));

/// Loader over a unit catalog, provider registry, and loaded-units set
#[derive(Debug, Clone)]
pub struct UnitLoader {
    catalog: Arc<UnitCatalog>,
    registry: Arc<ProviderRegistry>,
    loaded: Arc<Mutex<HashSet<PathBuf>>>,
}

impl UnitLoader {
    /// Returns a loader over the process-wide catalog and registry.
    ///
    /// Every call returns a handle to the same underlying state.
    pub fn shared() -> Self {
        UnitLoader {
            catalog: Arc::clone(&SHARED_CATALOG),
            registry: Arc::clone(&SHARED_REGISTRY),
            loaded: Arc::clone(&SHARED_LOADED),
        }
    }

    /// Returns a loader over fresh, private state.
    ///
    /// Intended for tests that must not observe units installed elsewhere
    /// in the process.
    pub fn isolated() -> Self {
        UnitLoader {
            catalog: Arc::new(UnitCatalog::new()),
            registry: Arc::new(ProviderRegistry::new()),
            loaded: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// The catalog this loader reads units from
    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    /// The registry this loader populates
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Installs a unit into this loader's catalog
    pub fn install(&self, unit: FixtureUnit) -> bool {
        self.catalog.install(unit)
    }

    /// Returns true when the unit at the path has already been loaded
    pub fn is_loaded(&self, path: &Path) -> bool {
        self.loaded
            .lock()
            .expect("loaded-units lock poisoned")
            .contains(path)
    }

    /// Loads the unit installed under a spec-relative path.
    ///
    /// Idempotent: a unit that has already been loaded is skipped without
    /// re-running its definition closure. A path with no installed unit is
    /// tolerated under [`LoadMode::Optional`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingUnit`] when the path has no installed
    /// unit and the mode is [`LoadMode::Required`].
    pub fn load_unit(&self, path: &Path, mode: LoadMode) -> Result<(), RegistryError> {
        let mut loaded = self.loaded.lock().expect("loaded-units lock poisoned");
        if loaded.contains(path) {
            debug!(target: "test_data", path = %path.display(), "unit already loaded");
            return Ok(());
        }
        match self.catalog.get(path) {
            Some(unit) => {
                unit.define_providers(&self.registry);
                loaded.insert(path.to_path_buf());
                debug!(target: "test_data", path = %path.display(), "unit loaded");
                Ok(())
            }
            None => match mode {
                LoadMode::Optional => {
                    debug!(
                        target: "test_data",
                        path = %path.display(),
                        "no unit installed, skipping optional load"
                    );
                    Ok(())
                }
                LoadMode::Required => Err(RegistryError::MissingUnit {
                    path: path.to_path_buf(),
                }),
            },
        }
    }

    /// Resolves the provider registered under an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnresolvedProvider`] carrying the identifier
    /// and the underlying lookup failure when no provider is registered.
    pub fn resolve_provider(&self, id: &FixtureId) -> Result<ProviderHandle, RegistryError> {
        self.registry
            .lookup(id)
            .map_err(|source| RegistryError::UnresolvedProvider {
                identifier: id.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::{FixtureArgs, FixtureProvider, ProviderError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Marker;

    impl FixtureProvider for Marker {
        fn build(_args: &FixtureArgs) -> Result<Self, ProviderError> {
            Ok(Marker)
        }
    }

    fn marker_id() -> FixtureId {
        FixtureId::parse("TestData::Billing::Invoices").unwrap()
    }

    #[test]
    fn test_load_runs_definition_exactly_once() {
        let loader = UnitLoader::isolated();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        loader.install(FixtureUnit::new(
            "billing/invoices.test_data.rs",
            move |registry| {
                counter.fetch_add(1, Ordering::SeqCst);
                registry.register::<Marker>(marker_id());
            },
        ));

        let path = Path::new("billing/invoices.test_data.rs");
        loader.load_unit(path, LoadMode::Optional).unwrap();
        loader.load_unit(path, LoadMode::Optional).unwrap();
        loader.load_unit(path, LoadMode::Required).unwrap();

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(loader.is_loaded(path));
    }

    #[test]
    fn test_optional_load_tolerates_missing_unit() {
        let loader = UnitLoader::isolated();
        let path = Path::new("billing/absent.test_data.rs");
        assert!(loader.load_unit(path, LoadMode::Optional).is_ok());
        assert!(!loader.is_loaded(path));
    }

    #[test]
    fn test_required_load_fails_on_missing_unit() {
        let loader = UnitLoader::isolated();
        let path = Path::new("billing/absent.test_data.rs");
        let err = loader.load_unit(path, LoadMode::Required).unwrap_err();
        assert!(matches!(err, RegistryError::MissingUnit { .. }));
        assert!(err.to_string().contains("billing/absent.test_data.rs"));
    }

    #[test]
    fn test_resolve_after_load() {
        let loader = UnitLoader::isolated();
        loader.install(FixtureUnit::new(
            "billing/invoices.test_data.rs",
            |registry| {
                registry.register::<Marker>(marker_id());
            },
        ));
        loader
            .load_unit(Path::new("billing/invoices.test_data.rs"), LoadMode::Optional)
            .unwrap();

        let handle = loader.resolve_provider(&marker_id()).unwrap();
        assert_eq!(handle.id(), &marker_id());
    }

    #[test]
    fn test_resolve_without_load_fails() {
        let loader = UnitLoader::isolated();
        let err = loader.resolve_provider(&marker_id()).unwrap_err();
        assert!(matches!(err, RegistryError::UnresolvedProvider { .. }));
        assert!(err.to_string().contains("TestData::Billing::Invoices"));
    }

    #[test]
    fn test_shared_loaders_see_the_same_state() {
        let first = UnitLoader::shared();
        let second = UnitLoader::shared();

        // Keyed uniquely so parallel tests over the shared state never clash
        let id = FixtureId::parse("TestData::SharedLoaderProbe").unwrap();
        first.install(FixtureUnit::new(
            "shared_loader_probe.test_data.rs",
            move |registry| {
                registry.register::<Marker>(
                    FixtureId::parse("TestData::SharedLoaderProbe").unwrap(),
                );
            },
        ));
        second
            .load_unit(Path::new("shared_loader_probe.test_data.rs"), LoadMode::Required)
            .unwrap();
        assert!(second.resolve_provider(&id).is_ok());
    }
}
