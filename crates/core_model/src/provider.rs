//! Provider abstractions for constructible fixture data
//!
//! A fixture provider is a plain type that knows how to build itself from a
//! set of keyword-style constructor arguments. Built instances are handed
//! around as type-erased [`FixtureInstance`] values and recovered with
//! [`downcast`].

use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::ProviderError;

/// A type-erased, shareable fixture instance
pub type FixtureInstance = Arc<dyn Any + Send + Sync>;

/// A constructible type whose instances serve as fixture data
pub trait FixtureProvider: Any + Send + Sync + Sized {
    /// Builds a fresh instance from keyword-style constructor arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when a required argument is missing or
    /// unusable, or when construction fails for a provider-specific reason.
    fn build(args: &FixtureArgs) -> Result<Self, ProviderError>;
}

/// Recovers a concrete provider instance from a type-erased one.
///
/// Returns `None` when the instance holds a different type.
pub fn downcast<T: Any + Send + Sync>(instance: &FixtureInstance) -> Option<Arc<T>> {
    Arc::clone(instance).downcast::<T>().ok()
}

/// Keyword-style constructor arguments for fixture providers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureArgs(BTreeMap<String, Value>);

impl FixtureArgs {
    /// Creates an empty argument set
    pub fn new() -> Self {
        FixtureArgs::default()
    }

    /// Inserts an argument, replacing any previous value under the name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Fluent variant of [`FixtureArgs::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the raw value for an argument
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns a string argument, if present and a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns an integer argument, if present and an integer
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Returns a boolean argument, if present and a boolean
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Returns a string argument or a missing-argument error
    pub fn require_str(&self, name: &str) -> Result<&str, ProviderError> {
        self.get_str(name)
            .ok_or_else(|| ProviderError::missing_argument(name))
    }

    /// Returns true when no arguments were supplied
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of supplied arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the arguments in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Builds a [`FixtureArgs`] from `name => value` pairs.
///
/// ```rust
/// use core_model::fixture_args;
///
/// let args = fixture_args! { "name" => "x", "count" => 3 };
/// assert_eq!(args.get_str("name"), Some("x"));
/// assert_eq!(args.get_i64("count"), Some(3));
/// ```
#[macro_export]
macro_rules! fixture_args {
    () => {
        $crate::FixtureArgs::new()
    };
    ($($name:literal => $value:expr),+ $(,)?) => {{
        let mut args = $crate::FixtureArgs::new();
        $(args.insert($name, $value);)+
        args
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Widget {
        label: String,
    }

    impl FixtureProvider for Widget {
        fn build(args: &FixtureArgs) -> Result<Self, ProviderError> {
            Ok(Widget {
                label: args.require_str("label")?.to_string(),
            })
        }
    }

    #[test]
    fn test_build_and_downcast() {
        let args = fixture_args! { "label" => "primary" };
        let widget = Widget::build(&args).unwrap();
        let instance: FixtureInstance = Arc::new(widget);

        let recovered = downcast::<Widget>(&instance).unwrap();
        assert_eq!(recovered.label, "primary");
    }

    #[test]
    fn test_downcast_wrong_type_is_none() {
        let instance: FixtureInstance = Arc::new(42u32);
        assert!(downcast::<Widget>(&instance).is_none());
    }

    #[test]
    fn test_missing_argument_error_names_the_argument() {
        let err = Widget::build(&FixtureArgs::new()).unwrap_err();
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn test_args_accessors() {
        let args = fixture_args! { "name" => "x", "count" => 3, "active" => true };
        assert_eq!(args.len(), 3);
        assert_eq!(args.get_str("name"), Some("x"));
        assert_eq!(args.get_i64("count"), Some(3));
        assert_eq!(args.get_bool("active"), Some(true));
        assert!(args.get("missing").is_none());
    }

    #[test]
    fn test_empty_args_macro() {
        let args = fixture_args! {};
        assert!(args.is_empty());
    }
}
