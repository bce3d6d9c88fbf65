//! Bidirectional naming convention between spec files and fixture units
//!
//! The convention ties three names together:
//!
//! ```text
//! spec file:   <specRoot>/billing/invoices_spec.rs
//! fixture unit: <specRoot>/billing/invoices.test_data.rs
//! identifier:  TestData::Billing::Invoices
//! ```
//!
//! Both directions are pure string/path transforms with no I/O, so the
//! round-trip property is cheap to verify: for any well-formed spec path,
//! converting to an identifier and back yields the path of its fixture-unit
//! counterpart.

use std::path::{Component, Path, PathBuf};

use crate::casing::{pascal_case, snake_case};
use crate::error::ConventionError;
use crate::identifier::{FixtureId, NAMESPACE_SEPARATOR, ROOT_NAMESPACE};

/// Suffix that marks a file as a spec
pub const SPEC_SUFFIX: &str = "_spec.rs";

/// Suffix that marks a file as a fixture unit
pub const UNIT_SUFFIX: &str = ".test_data.rs";

/// The path/identifier convention, rooted at a spec directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Convention {
    spec_root: PathBuf,
}

impl Default for Convention {
    fn default() -> Self {
        Convention::new("spec")
    }
}

impl Convention {
    /// Creates a convention rooted at the given spec directory
    pub fn new(spec_root: impl Into<PathBuf>) -> Self {
        Convention {
            spec_root: spec_root.into(),
        }
    }

    /// Returns the spec root directory
    pub fn spec_root(&self) -> &Path {
        &self.spec_root
    }

    /// Returns the portion of `path` below the spec root.
    ///
    /// A leading `./` on either side is ignored. A path outside the spec
    /// root is returned unchanged, mirroring the forgiving prefix strip of
    /// the identifier derivation.
    pub fn spec_relative(&self, path: &Path) -> PathBuf {
        let path = path.strip_prefix(".").unwrap_or(path);
        let root = self.spec_root.strip_prefix(".").unwrap_or(&self.spec_root);
        path.strip_prefix(root).unwrap_or(path).to_path_buf()
    }

    /// Derives the canonical fixture identifier for a spec file path.
    ///
    /// Strips the spec-root prefix and the `_spec.rs` suffix, PascalCases
    /// each remaining path segment, joins them with `::`, and prepends the
    /// root namespace. Pure - performs no filesystem access.
    ///
    /// # Errors
    ///
    /// Returns [`ConventionError::UnrepresentablePath`] when the path has no
    /// usable segments, or [`ConventionError::InvalidIdentifier`] when a
    /// segment cannot form a canonical identifier.
    pub fn path_to_identifier(&self, path: &Path) -> Result<FixtureId, ConventionError> {
        let relative = self.spec_relative(path);
        let mut segments: Vec<String> = Vec::new();
        for component in relative.components() {
            if let Component::Normal(segment) = component {
                segments.push(segment.to_string_lossy().into_owned());
            }
        }
        let file = segments
            .pop()
            .ok_or_else(|| ConventionError::unrepresentable_path(path))?;
        let stem = file
            .strip_suffix(SPEC_SUFFIX)
            .or_else(|| file.strip_suffix(".rs"))
            .unwrap_or(&file);
        if stem.is_empty() {
            return Err(ConventionError::unrepresentable_path(path));
        }
        segments.push(stem.to_string());

        let mut identifier = String::from(ROOT_NAMESPACE);
        for segment in &segments {
            identifier.push_str(NAMESPACE_SEPARATOR);
            identifier.push_str(&pascal_case(segment));
        }
        FixtureId::parse(identifier)
    }

    /// Maps an identifier back to its fixture-unit path under the spec root.
    ///
    /// The inverse of [`Convention::path_to_identifier`]: strips the root
    /// namespace, snake_cases each segment, joins them as path components,
    /// and appends the unit suffix.
    pub fn identifier_to_path(&self, identifier: &FixtureId) -> PathBuf {
        let segments = identifier.unrooted_segments();
        let mut path = self.spec_root.clone();
        let (leaf, directories) = segments
            .split_last()
            .expect("identifier always has at least one segment");
        for directory in directories {
            path.push(snake_case(directory));
        }
        path.push(format!("{}{UNIT_SUFFIX}", snake_case(leaf)));
        path
    }

    /// Returns the fixture-unit path that sits next to a spec file.
    ///
    /// `<dir>/invoices_spec.rs` maps to `<dir>/invoices.test_data.rs`; a
    /// file without the spec suffix is returned unchanged.
    pub fn unit_path_for_spec(&self, spec_path: &Path) -> PathBuf {
        let Some(name) = spec_path.file_name().map(|n| n.to_string_lossy()) else {
            return spec_path.to_path_buf();
        };
        match name.strip_suffix(SPEC_SUFFIX) {
            Some(stem) => spec_path.with_file_name(format!("{stem}{UNIT_SUFFIX}")),
            None => spec_path.to_path_buf(),
        }
    }
}
