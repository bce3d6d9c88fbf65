//! Test context and example metadata
//!
//! A [`TestContext`] is the identity of one test example: its file path,
//! description, recognized metadata flags, a group-scoped registry of named
//! bindings, and an optional override accessor. The override accessor is an
//! explicit capability - a context either carries one or it does not; the
//! hook never probes for it dynamically.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use core_model::FixtureInstance;

use crate::binding::{LazyBinding, OverrideFn};

/// Metadata flags recognized on a test example
///
/// `test_data` left unset means the mechanism is enabled.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExampleMetadata {
    /// Set to `false` to disable the mechanism for this example
    pub test_data: Option<bool>,
    /// Forces provider construction at setup instead of first access
    pub test_data_eager: bool,
    /// Enables per-example diagnostics
    pub debug_test_data: bool,
}

impl ExampleMetadata {
    /// Returns true unless the example explicitly opted out
    pub fn uses_test_data(&self) -> bool {
        self.test_data.unwrap_or(true)
    }
}

/// Named bindings registered for the enclosing example group
#[derive(Debug, Default)]
pub struct BindingScope {
    bindings: HashMap<String, LazyBinding>,
}

impl BindingScope {
    /// Creates an empty scope
    pub fn new() -> Self {
        BindingScope::default()
    }

    /// Registers a binding under a name, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, binding: LazyBinding) {
        self.bindings.insert(name.into(), binding);
    }

    /// Returns the binding registered under a name
    pub fn get(&self, name: &str) -> Option<&LazyBinding> {
        self.bindings.get(name)
    }

    /// Returns the registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true when no bindings are registered
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Identity of one test example
pub struct TestContext {
    file_path: PathBuf,
    description: String,
    metadata: ExampleMetadata,
    scope: BindingScope,
    override_provider: Option<OverrideFn>,
}

impl TestContext {
    /// Starts building a context
    pub fn builder() -> TestContextBuilder {
        TestContextBuilder::new()
    }

    /// The example's file path
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// The example's human-readable description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The example's recognized metadata flags
    pub fn metadata(&self) -> &ExampleMetadata {
        &self.metadata
    }

    /// The group-scoped bindings registered so far
    pub fn scope(&self) -> &BindingScope {
        &self.scope
    }

    /// Registers a binding in the group scope
    pub fn register_binding(&mut self, name: impl Into<String>, binding: LazyBinding) {
        self.scope.register(name, binding);
    }

    /// Returns a registered binding by name
    pub fn binding(&self, name: &str) -> Option<&LazyBinding> {
        self.scope.get(name)
    }

    /// The override accessor, when the context carries that capability
    pub fn override_provider(&self) -> Option<&OverrideFn> {
        self.override_provider.as_ref()
    }
}

impl fmt::Debug for TestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestContext")
            .field("file_path", &self.file_path)
            .field("description", &self.description)
            .field("metadata", &self.metadata)
            .field("bindings", &self.scope.names())
            .field("has_override", &self.override_provider.is_some())
            .finish()
    }
}

/// Builder for constructing test contexts
#[derive(Default)]
pub struct TestContextBuilder {
    file_path: PathBuf,
    description: String,
    metadata: ExampleMetadata,
    override_provider: Option<OverrideFn>,
}

impl TestContextBuilder {
    /// Creates a new builder with empty values
    pub fn new() -> Self {
        TestContextBuilder::default()
    }

    /// Sets the example's file path
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    /// Sets the example's description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the example's metadata flags
    pub fn metadata(mut self, metadata: ExampleMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Supplies the override-provider capability
    pub fn override_provider(
        mut self,
        accessor: impl Fn() -> FixtureInstance + Send + Sync + 'static,
    ) -> Self {
        self.override_provider = Some(Arc::new(accessor));
        self
    }

    /// Builds the context with an empty binding scope
    pub fn build(self) -> TestContext {
        TestContext {
            file_path: self.file_path,
            description: self.description,
            metadata: self.metadata,
            scope: BindingScope::new(),
            override_provider: self.override_provider,
        }
    }
}
