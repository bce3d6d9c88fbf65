//! Lazy fixture bindings
//!
//! A binding attaches a named fixture value to a test context. It moves
//! through a two-state machine, `Unevaluated` to `Evaluated`, at most once
//! per context: the lazy variant evaluates its thunk on first access, the
//! eager variant is already evaluated at construction, and the forwarded
//! variant pulls its value from a context-supplied override accessor
//! instead of constructing anything.

use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

use core_model::{FixtureInstance, ProviderError};

/// Accessor supplied by a context that overrides default construction
pub type OverrideFn = Arc<dyn Fn() -> FixtureInstance + Send + Sync>;

type Thunk = Box<dyn Fn() -> Result<FixtureInstance, ProviderError> + Send + Sync>;

enum State {
    Lazy {
        thunk: Thunk,
        cell: OnceCell<FixtureInstance>,
    },
    Eager {
        value: FixtureInstance,
    },
    Forwarded {
        accessor: OverrideFn,
        cell: OnceCell<FixtureInstance>,
    },
}

/// A memoized, possibly-overridden, possibly-eager fixture binding
pub struct LazyBinding {
    state: State,
}

impl LazyBinding {
    /// Creates a binding that evaluates `thunk` on first access.
    ///
    /// The thunk runs at most once on the success path; a failing thunk is
    /// not cached, so each access retries and reports the error.
    pub fn lazy(
        thunk: impl Fn() -> Result<FixtureInstance, ProviderError> + Send + Sync + 'static,
    ) -> Self {
        LazyBinding {
            state: State::Lazy {
                thunk: Box::new(thunk),
                cell: OnceCell::new(),
            },
        }
    }

    /// Creates a binding around an already-built value.
    ///
    /// No thunk is retained; the binding is evaluated from the start.
    pub fn eager(value: FixtureInstance) -> Self {
        LazyBinding {
            state: State::Eager { value },
        }
    }

    /// Creates a binding that forwards to an override accessor.
    ///
    /// Default construction is bypassed entirely; the accessor's value is
    /// memoized on first access.
    pub fn forwarded(accessor: OverrideFn) -> Self {
        LazyBinding {
            state: State::Forwarded {
                accessor,
                cell: OnceCell::new(),
            },
        }
    }

    /// Returns the bound value, evaluating it on first access.
    ///
    /// Subsequent calls return the identical cached instance.
    ///
    /// # Errors
    ///
    /// Returns the thunk's [`ProviderError`] when lazy construction fails.
    pub fn get(&self) -> Result<FixtureInstance, ProviderError> {
        match &self.state {
            State::Lazy { thunk, cell } => {
                if let Some(value) = cell.get() {
                    return Ok(Arc::clone(value));
                }
                let value = thunk()?;
                Ok(Arc::clone(cell.get_or_init(|| value)))
            }
            State::Eager { value } => Ok(Arc::clone(value)),
            State::Forwarded { accessor, cell } => {
                Ok(Arc::clone(cell.get_or_init(|| accessor())))
            }
        }
    }

    /// Returns true once the binding holds its evaluated value
    pub fn is_evaluated(&self) -> bool {
        match &self.state {
            State::Lazy { cell, .. } => cell.get().is_some(),
            State::Eager { .. } => true,
            State::Forwarded { cell, .. } => cell.get().is_some(),
        }
    }

    /// Returns true when the binding forwards to an override accessor
    pub fn is_forwarded(&self) -> bool {
        matches!(self.state, State::Forwarded { .. })
    }
}

impl fmt::Debug for LazyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match &self.state {
            State::Lazy { .. } => "Lazy",
            State::Eager { .. } => "Eager",
            State::Forwarded { .. } => "Forwarded",
        };
        f.debug_struct("LazyBinding")
            .field("variant", &variant)
            .field("evaluated", &self.is_evaluated())
            .finish()
    }
}
