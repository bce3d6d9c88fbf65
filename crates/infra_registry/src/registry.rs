//! Provider Registry
//!
//! A mapping from canonical fixture identifier to constructor handle,
//! populated when a unit loads and queried at resolution time. This is the
//! explicit replacement for global type-name scanning: nothing is found in
//! the registry that a unit did not put there.

use std::any::type_name;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use core_model::{FixtureArgs, FixtureId, FixtureInstance, FixtureProvider, ProviderError};

use crate::error::LookupError;

/// Type-erased constructor for a registered provider
pub type ProviderCtor = fn(&FixtureArgs) -> Result<FixtureInstance, ProviderError>;

/// A registered provider: identifier, concrete type name, and constructor.
///
/// Handles are what the instance bindings close over; `construct` builds a
/// fresh instance on every call.
#[derive(Debug, Clone)]
pub struct ProviderHandle {
    id: FixtureId,
    type_name: &'static str,
    ctor: ProviderCtor,
}

impl ProviderHandle {
    /// The canonical identifier this provider is registered under
    pub fn id(&self) -> &FixtureId {
        &self.id
    }

    /// The concrete Rust type backing the provider
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Constructs a fresh instance with the given arguments
    pub fn construct(&self, args: &FixtureArgs) -> Result<FixtureInstance, ProviderError> {
        (self.ctor)(args)
    }
}

fn construct_erased<P: FixtureProvider>(
    args: &FixtureArgs,
) -> Result<FixtureInstance, ProviderError> {
    P::build(args).map(|provider| Arc::new(provider) as FixtureInstance)
}

/// Process-scoped mapping from identifier to provider handle
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: RwLock<HashMap<FixtureId, ProviderHandle>>,
}

impl ProviderRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        ProviderRegistry::default()
    }

    /// Registers a provider type under an identifier.
    ///
    /// Registration never redefines: if the identifier is already taken,
    /// the existing handle is kept and `false` is returned. This makes a
    /// unit's definition closure safe to run from idempotent re-loads.
    pub fn register<P: FixtureProvider>(&self, id: FixtureId) -> bool {
        let mut providers = self.providers.write().expect("provider registry lock poisoned");
        if providers.contains_key(&id) {
            return false;
        }
        let handle = ProviderHandle {
            id: id.clone(),
            type_name: type_name::<P>(),
            ctor: construct_erased::<P>,
        };
        providers.insert(id, handle);
        true
    }

    /// Looks up the handle registered under an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotRegistered`] carrying the currently
    /// registered identifiers when nothing is found.
    pub fn lookup(&self, id: &FixtureId) -> Result<ProviderHandle, LookupError> {
        let providers = self.providers.read().expect("provider registry lock poisoned");
        providers
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::NotRegistered {
                identifier: id.clone(),
                registered: {
                    let mut ids: Vec<String> =
                        providers.keys().map(|k| k.to_string()).collect();
                    ids.sort();
                    ids
                },
            })
    }

    /// Returns true when a provider is registered under the identifier
    pub fn contains(&self, id: &FixtureId) -> bool {
        self.providers
            .read()
            .expect("provider registry lock poisoned")
            .contains_key(id)
    }

    /// Returns all registered identifiers, sorted
    pub fn registered_ids(&self) -> Vec<FixtureId> {
        let mut ids: Vec<FixtureId> = self
            .providers
            .read()
            .expect("provider registry lock poisoned")
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers
            .read()
            .expect("provider registry lock poisoned")
            .len()
    }

    /// Returns true when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
