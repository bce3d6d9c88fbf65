//! Fixture units and the unit catalog
//!
//! A fixture unit is the loadable artifact that defines a provider: a file
//! on disk at the convention path, paired with a definition closure compiled
//! into the test binary. Units are installed into the catalog keyed by their
//! spec-relative path; the loader runs the closure when the unit is first
//! loaded.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::registry::ProviderRegistry;

type DefineFn = Box<dyn Fn(&ProviderRegistry) + Send + Sync>;

/// A loadable unit that defines fixture providers when loaded.
///
/// The definition closure must only register providers; it must not load
/// other units.
pub struct FixtureUnit {
    path: PathBuf,
    define: DefineFn,
}

impl FixtureUnit {
    /// Creates a unit for the given spec-relative path
    pub fn new(
        path: impl Into<PathBuf>,
        define: impl Fn(&ProviderRegistry) + Send + Sync + 'static,
    ) -> Self {
        FixtureUnit {
            path: path.into(),
            define: Box::new(define),
        }
    }

    /// The spec-relative path this unit is installed under
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs the unit's definition closure against a registry
    pub(crate) fn define_providers(&self, registry: &ProviderRegistry) {
        (self.define)(registry);
    }
}

impl fmt::Debug for FixtureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureUnit")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Catalog of installed units, keyed by spec-relative path
#[derive(Debug, Default)]
pub struct UnitCatalog {
    units: RwLock<HashMap<PathBuf, Arc<FixtureUnit>>>,
}

impl UnitCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        UnitCatalog::default()
    }

    /// Installs a unit.
    ///
    /// Installing a second unit under the same path keeps the first and
    /// returns `false`.
    pub fn install(&self, unit: FixtureUnit) -> bool {
        let mut units = self.units.write().expect("unit catalog lock poisoned");
        if units.contains_key(unit.path()) {
            return false;
        }
        units.insert(unit.path().to_path_buf(), Arc::new(unit));
        true
    }

    /// Returns the unit installed under a path
    pub fn get(&self, path: &Path) -> Option<Arc<FixtureUnit>> {
        self.units
            .read()
            .expect("unit catalog lock poisoned")
            .get(path)
            .cloned()
    }

    /// Returns true when a unit is installed under the path
    pub fn contains(&self, path: &Path) -> bool {
        self.units
            .read()
            .expect("unit catalog lock poisoned")
            .contains_key(path)
    }

    /// Returns all installed paths, sorted
    pub fn installed_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .units
            .read()
            .expect("unit catalog lock poisoned")
            .keys()
            .cloned()
            .collect();
        paths.sort();
        paths
    }
}
