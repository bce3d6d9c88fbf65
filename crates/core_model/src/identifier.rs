//! Canonical fixture identifiers
//!
//! A fixture identifier is a `::`-separated, PascalCase-segmented name rooted
//! at a fixed namespace, e.g. `TestData::Billing::Invoices`. Identifiers are
//! derived deterministically from spec file paths (see
//! [`crate::convention`]) and name exactly one fixture provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConventionError;

/// The fixed namespace every canonical identifier is rooted at
pub const ROOT_NAMESPACE: &str = "TestData";

/// Separator between identifier segments
pub const NAMESPACE_SEPARATOR: &str = "::";

/// A validated, canonical fixture identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureId(String);

impl FixtureId {
    /// Parses and validates an identifier.
    ///
    /// Each `::`-separated segment must be non-empty, consist of ASCII
    /// alphanumerics or underscores, and start with an uppercase letter.
    ///
    /// # Errors
    ///
    /// Returns [`ConventionError::InvalidIdentifier`] when any segment
    /// violates the canonical form.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ConventionError> {
        let value = value.as_ref();
        if value.is_empty() {
            return Err(ConventionError::invalid_identifier(value, "identifier is empty"));
        }
        for segment in value.split(NAMESPACE_SEPARATOR) {
            if segment.is_empty() {
                return Err(ConventionError::invalid_identifier(value, "empty segment"));
            }
            if !segment.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
                return Err(ConventionError::invalid_identifier(
                    value,
                    format!("segment '{segment}' must start with an uppercase letter"),
                ));
            }
            if !segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(ConventionError::invalid_identifier(
                    value,
                    format!("segment '{segment}' contains non-identifier characters"),
                ));
            }
        }
        Ok(FixtureId(value.to_string()))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `::`-separated segments in order
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(NAMESPACE_SEPARATOR)
    }

    /// Returns the segments with the root namespace stripped
    pub fn unrooted_segments(&self) -> Vec<&str> {
        let segments: Vec<&str> = self.segments().collect();
        if segments.len() > 1 && segments[0] == ROOT_NAMESPACE {
            segments[1..].to_vec()
        } else {
            segments
        }
    }

    /// Returns true if the identifier already carries the root namespace
    pub fn is_rooted(&self) -> bool {
        self.0 == ROOT_NAMESPACE
            || self
                .0
                .starts_with(&format!("{ROOT_NAMESPACE}{NAMESPACE_SEPARATOR}"))
    }

    /// Returns this identifier with the root namespace prefixed if absent.
    ///
    /// `Billing::Invoices` normalizes to `TestData::Billing::Invoices`;
    /// an already-rooted identifier is returned unchanged.
    pub fn rooted(&self) -> FixtureId {
        if self.is_rooted() {
            self.clone()
        } else {
            FixtureId(format!("{ROOT_NAMESPACE}{NAMESPACE_SEPARATOR}{}", self.0))
        }
    }

    /// Returns the final segment, the provider's own name
    pub fn leaf(&self) -> &str {
        self.segments().last().unwrap_or(&self.0)
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FixtureId {
    type Err = ConventionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FixtureId::parse(s)
    }
}

impl AsRef<str> for FixtureId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rooted_identifier() {
        let id = FixtureId::parse("TestData::Billing::Invoices").unwrap();
        assert_eq!(id.as_str(), "TestData::Billing::Invoices");
        assert!(id.is_rooted());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(FixtureId::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_segment() {
        assert!(FixtureId::parse("Billing::::Invoices").is_err());
        assert!(FixtureId::parse("Billing::").is_err());
    }

    #[test]
    fn test_parse_rejects_lowercase_segment() {
        let err = FixtureId::parse("billing::Invoices").unwrap_err();
        assert!(err.to_string().contains("billing"));
    }

    #[test]
    fn test_parse_rejects_non_identifier_characters() {
        assert!(FixtureId::parse("Billing::In-voices").is_err());
        assert!(FixtureId::parse("Billing::Invoices.rs").is_err());
    }

    #[test]
    fn test_rooted_prefixes_when_absent() {
        let id = FixtureId::parse("Billing::Invoices").unwrap();
        assert!(!id.is_rooted());
        assert_eq!(id.rooted().as_str(), "TestData::Billing::Invoices");
    }

    #[test]
    fn test_rooted_is_idempotent() {
        let id = FixtureId::parse("TestData::Billing").unwrap();
        assert_eq!(id.rooted(), id);
    }

    #[test]
    fn test_rooted_does_not_match_prefix_lookalike() {
        // "TestDataExtra" is a different namespace, not the root
        let id = FixtureId::parse("TestDataExtra::Invoices").unwrap();
        assert!(!id.is_rooted());
        assert_eq!(id.rooted().as_str(), "TestData::TestDataExtra::Invoices");
    }

    #[test]
    fn test_unrooted_segments() {
        let id = FixtureId::parse("TestData::Billing::Invoices").unwrap();
        assert_eq!(id.unrooted_segments(), vec!["Billing", "Invoices"]);

        let bare = FixtureId::parse("Billing::Invoices").unwrap();
        assert_eq!(bare.unrooted_segments(), vec!["Billing", "Invoices"]);
    }

    #[test]
    fn test_leaf() {
        let id = FixtureId::parse("TestData::Billing::Invoices").unwrap();
        assert_eq!(id.leaf(), "Invoices");
    }

    #[test]
    fn test_display_and_from_str_round_trip() {
        let id: FixtureId = "TestData::Billing::Invoices".parse().unwrap();
        assert_eq!(id.to_string(), "TestData::Billing::Invoices");
    }
}
