//! Testing utilities for code built on flowline's containers and runners.
//!
//! # Examples
//!
//! ## Assertion Macros
//!
//! ```rust
//! use flowline::{Maybe, Outcome, assert_some, assert_none, assert_ok, assert_error};
//!
//! let value = assert_some!(Maybe::some(42));
//! assert_eq!(value, 42);
//! assert_none!(Maybe::<i32>::none());
//!
//! assert_ok!(Outcome::<_, String>::ok(1));
//! assert_error!(Outcome::<i32, _>::error("bad"), "bad");
//! ```
//!
//! ## CallLog
//!
//! ```rust
//! use flowline::testing::CallLog;
//!
//! let log = CallLog::new();
//! let writer = log.clone();
//! writer.record("first");
//! writer.record("second");
//!
//! assert_eq!(log.entries(), vec!["first", "second"]);
//! ```

use std::sync::{Arc, Mutex, PoisonError};

/// A shared, ordered record of calls.
///
/// Clones share the same log, so one clone can be moved into each
/// [`Handler`](crate::Handler) while the test keeps another to inspect.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.into());
    }

    /// A snapshot of every entry, in the order recorded.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of entries recorded so far.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Assert that a `Maybe` holds a value, and evaluate to it.
///
/// This macro will panic if the container is `None`.
///
/// # Example
///
/// ```rust
/// use flowline::{Maybe, assert_some};
///
/// let value = assert_some!(Maybe::some("x"));
/// assert_eq!(value, "x");
/// ```
#[macro_export]
macro_rules! assert_some {
    ($maybe:expr) => {
        match $maybe {
            $crate::Maybe::Some(v) => v,
            $crate::Maybe::None => {
                panic!("Expected Some, got None");
            }
        }
    };
}

/// Assert that a `Maybe` is empty.
///
/// This macro will panic if the container is `Some`.
///
/// # Example
///
/// ```rust
/// use flowline::{Maybe, assert_none};
///
/// assert_none!(Maybe::<i32>::none());
/// ```
#[macro_export]
macro_rules! assert_none {
    ($maybe:expr) => {
        match $maybe {
            $crate::Maybe::None => {}
            $crate::Maybe::Some(v) => {
                panic!("Expected None, got Some: {:?}", v);
            }
        }
    };
}

/// Assert that an `Outcome` succeeded, and evaluate to its value.
///
/// This macro will panic if the outcome is an `Error`.
///
/// # Example
///
/// ```rust
/// use flowline::{Outcome, assert_ok};
///
/// let value = assert_ok!(Outcome::<_, String>::ok(3));
/// assert_eq!(value, 3);
/// ```
#[macro_export]
macro_rules! assert_ok {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Ok(v) => v,
            $crate::Outcome::Error(e) => {
                panic!("Expected Ok, got Error: {:?}", e);
            }
        }
    };
}

/// Assert that an `Outcome` failed, optionally with a specific error.
///
/// Without an expected value, evaluates to the error.
///
/// # Example
///
/// ```rust
/// use flowline::{Outcome, assert_error};
///
/// let e = assert_error!(Outcome::<i32, _>::error("timeout"));
/// assert_eq!(e, "timeout");
///
/// assert_error!(Outcome::<i32, _>::error("timeout"), "timeout");
/// ```
#[macro_export]
macro_rules! assert_error {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Error(e) => e,
            $crate::Outcome::Ok(v) => {
                panic!("Expected Error, got Ok: {:?}", v);
            }
        }
    };
    ($outcome:expr, $expected:expr) => {
        match $outcome {
            $crate::Outcome::Error(e) => {
                assert_eq!(e, $expected);
            }
            $crate::Outcome::Ok(v) => {
                panic!("Expected Error {:?}, got Ok: {:?}", $expected, v);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;
#[cfg(feature = "proptest")]
use proptest::strategy::LazyJust;

#[cfg(feature = "proptest")]
use crate::{Maybe, Outcome};

#[cfg(feature = "proptest")]
impl<T> Arbitrary for Maybe<T>
where
    T: Arbitrary + 'static,
{
    type Parameters = T::Parameters;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            1 => LazyJust::new(|| Maybe::None),
            3 => any_with::<T>(args).prop_map(Maybe::Some),
        ]
        .boxed()
    }
}

#[cfg(feature = "proptest")]
impl<T, E> Arbitrary for Outcome<T, E>
where
    T: Arbitrary + 'static,
    E: Arbitrary + 'static,
{
    type Parameters = (T::Parameters, E::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (t_params, e_params) = args;
        prop_oneof![
            any_with::<T>(t_params).prop_map(Outcome::Ok),
            any_with::<E>(e_params).prop_map(Outcome::Error),
        ]
        .boxed()
    }
}
