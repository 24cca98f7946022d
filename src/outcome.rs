//! Success or domain failure: `Ok(T)` or `Error(E)`.
//!
//! `Outcome<T, E>` is right-biased the same way [`Maybe`] is "Some-biased":
//! [`map`](Outcome::map) and [`bind`](Outcome::bind) work on `Ok` and carry an
//! `Error` through untouched, while [`map_error`](Outcome::map_error) is the
//! dual. [`Outcome::bind_all`] collects *every* error instead of stopping at
//! the first one.
//!
//! ```rust
//! use flowline::Outcome;
//!
//! fn parse(s: &str) -> Outcome<i32, String> {
//!     s.parse::<i32>().map_err(|e| format!("{s}: {e}")).into()
//! }
//!
//! let doubled = parse("21").map(|n| n * 2).reduce_error(|_| 0);
//! assert_eq!(doubled, 42);
//!
//! let all = Outcome::bind_all(["1", "x", "3", "y"].into_iter().map(parse));
//! assert_eq!(all.unwrap_error().len(), 2);
//! ```

use std::fmt;

use crate::{Maybe, Unit};

/// The result of a computation that either succeeded (`Ok`) or failed (`Error`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome<T, E> {
    /// The success value
    Ok(T),
    /// The domain failure
    Error(E),
}

impl<T, E> Outcome<T, E> {
    // ========== Constructors ==========

    /// Wrap a success value.
    #[inline]
    pub fn ok(value: T) -> Self {
        Outcome::Ok(value)
    }

    /// Wrap an error value.
    #[inline]
    pub fn error(error: E) -> Self {
        Outcome::Error(error)
    }

    /// Convert a standard `Result`.
    #[inline]
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Outcome::Ok(v),
            Err(e) => Outcome::Error(e),
        }
    }

    // ========== Predicates ==========

    /// Returns `true` on success.
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    /// Returns `true` on failure.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    // ========== Extractors ==========

    /// Borrow both branches.
    #[inline]
    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Outcome::Ok(v) => Outcome::Ok(v),
            Outcome::Error(e) => Outcome::Error(e),
        }
    }

    /// Convert into a standard `Result`, so `?` can be used.
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Outcome::Ok(v) => Ok(v),
            Outcome::Error(e) => Err(e),
        }
    }

    /// The success value, if any. The error is discarded.
    #[inline]
    pub fn into_maybe(self) -> Maybe<T> {
        match self {
            Outcome::Ok(v) => Maybe::Some(v),
            Outcome::Error(_) => Maybe::None,
        }
    }

    /// The error value, if any. The success value is discarded.
    #[inline]
    pub fn into_error_maybe(self) -> Maybe<E> {
        match self {
            Outcome::Ok(_) => Maybe::None,
            Outcome::Error(e) => Maybe::Some(e),
        }
    }

    /// Return the success value.
    ///
    /// # Panics
    ///
    /// Panics if called on an `Error`, printing the error.
    #[inline]
    #[track_caller]
    pub fn unwrap(self) -> T
    where
        E: fmt::Debug,
    {
        match self {
            Outcome::Ok(v) => v,
            Outcome::Error(e) => {
                panic!("called `Outcome::unwrap()` on an `Error` value: {:?}", e)
            }
        }
    }

    /// Return the error value.
    ///
    /// # Panics
    ///
    /// Panics if called on an `Ok`, printing the success value.
    ///
    /// ```rust,should_panic
    /// use flowline::Outcome;
    ///
    /// Outcome::<i32, String>::ok(1).unwrap_error();
    /// ```
    #[inline]
    #[track_caller]
    pub fn unwrap_error(self) -> E
    where
        T: fmt::Debug,
    {
        match self {
            Outcome::Ok(v) => {
                panic!("called `Outcome::unwrap_error()` on an `Ok` value: {:?}", v)
            }
            Outcome::Error(e) => e,
        }
    }

    /// Return the success value, panicking with `msg` on `Error`.
    #[inline]
    #[track_caller]
    pub fn expect(self, msg: &str) -> T {
        match self {
            Outcome::Ok(v) => v,
            Outcome::Error(_) => panic!("{}", msg),
        }
    }

    // ========== Matching ==========

    /// Apply exactly one of the two branches.
    #[doc(alias = "match")]
    #[inline]
    pub fn fold<R, O, F>(self, when_ok: O, when_error: F) -> R
    where
        O: FnOnce(T) -> R,
        F: FnOnce(E) -> R,
    {
        match self {
            Outcome::Ok(v) => when_ok(v),
            Outcome::Error(e) => when_error(e),
        }
    }

    // ========== Transformations ==========

    /// Transform the success value; an `Error` passes through.
    ///
    /// ```rust
    /// use flowline::Outcome;
    ///
    /// let ok: Outcome<i32, &str> = Outcome::ok(2);
    /// assert_eq!(ok.map(|x| x * 3), Outcome::ok(6));
    ///
    /// let err: Outcome<i32, &str> = Outcome::error("bad");
    /// assert_eq!(err.map(|x| x * 3), Outcome::error("bad"));
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Ok(v) => Outcome::Ok(f(v)),
            Outcome::Error(e) => Outcome::Error(e),
        }
    }

    /// Transform the error value; an `Ok` passes through.
    ///
    /// ```rust
    /// use flowline::Outcome;
    ///
    /// let err: Outcome<i32, &str> = Outcome::error("bad");
    /// assert_eq!(err.map_error(str::len), Outcome::error(3));
    /// ```
    #[inline]
    pub fn map_error<E2, F>(self, f: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Outcome::Ok(v) => Outcome::Ok(v),
            Outcome::Error(e) => Outcome::Error(f(e)),
        }
    }

    /// Chain a fallible computation. Short-circuits on `Error`.
    #[inline]
    pub fn bind<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        match self {
            Outcome::Ok(v) => f(v),
            Outcome::Error(e) => Outcome::Error(e),
        }
    }

    /// Recover from an `Error` with another fallible computation.
    #[inline]
    pub fn or_else<E2, F>(self, f: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> Outcome<T, E2>,
    {
        match self {
            Outcome::Ok(v) => Outcome::Ok(v),
            Outcome::Error(e) => f(e),
        }
    }

    // ========== Reduction ==========

    /// Extract the success value or fall back to `alternate`.
    #[inline]
    pub fn reduce(self, alternate: T) -> T {
        match self {
            Outcome::Ok(v) => v,
            Outcome::Error(_) => alternate,
        }
    }

    /// Extract the success value or compute a fallback, ignoring the error.
    #[inline]
    pub fn reduce_with<F>(self, alternate: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Outcome::Ok(v) => v,
            Outcome::Error(_) => alternate(),
        }
    }

    /// Extract the success value or derive a fallback from the error.
    #[inline]
    pub fn reduce_error<F>(self, alternate: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Outcome::Ok(v) => v,
            Outcome::Error(e) => alternate(e),
        }
    }

    // ========== Side Effects ==========

    /// Run one side effect per branch and hand the container back.
    #[inline]
    pub fn tap<O, F>(self, when_ok: O, when_error: F) -> Self
    where
        O: FnOnce(&T),
        F: FnOnce(&E),
    {
        match &self {
            Outcome::Ok(v) => when_ok(v),
            Outcome::Error(e) => when_error(e),
        }
        self
    }

    /// Observe the success value, if any.
    #[inline]
    pub fn tap_ok<O>(self, when_ok: O) -> Self
    where
        O: FnOnce(&T),
    {
        self.tap(when_ok, |_| {})
    }

    /// Observe the error value, if any.
    #[inline]
    pub fn tap_error<F>(self, when_error: F) -> Self
    where
        F: FnOnce(&E),
    {
        self.tap(|_| {}, when_error)
    }

    /// Run every handler against the success value, in slice order.
    pub fn tap_each(self, handlers: &[&dyn Fn(&T)]) -> Self {
        if let Outcome::Ok(v) = &self {
            for handler in handlers {
                handler(v);
            }
        }
        self
    }

    /// Run one side effect per branch and end the chain.
    #[inline]
    pub fn effect<O, F>(self, when_ok: O, when_error: F) -> Unit
    where
        O: FnOnce(T),
        F: FnOnce(E),
    {
        match self {
            Outcome::Ok(v) => when_ok(v),
            Outcome::Error(e) => when_error(e),
        }
        Unit
    }

    /// Consume the success value, if any, and end the chain.
    #[inline]
    pub fn effect_ok<O>(self, when_ok: O) -> Unit
    where
        O: FnOnce(T),
    {
        self.effect(when_ok, |_| {})
    }

    /// Consume the error value, if any, and end the chain.
    #[inline]
    pub fn effect_error<F>(self, when_error: F) -> Unit
    where
        F: FnOnce(E),
    {
        self.effect(|_| {}, when_error)
    }

    // ========== Collection Utilities ==========

    /// Collect a sequence of outcomes.
    ///
    /// Yields `Ok` with every success value when all elements are `Ok`.
    /// Otherwise yields `Error` with every error, in order. Never stops early.
    ///
    /// ```rust
    /// use flowline::Outcome;
    ///
    /// let mixed = vec![Outcome::ok(1), Outcome::ok(2), Outcome::error("a"), Outcome::error("b")];
    /// assert_eq!(Outcome::bind_all(mixed), Outcome::error(vec!["a", "b"]));
    ///
    /// let clean: Vec<Outcome<i32, &str>> = vec![Outcome::ok(1), Outcome::ok(2), Outcome::ok(3)];
    /// assert_eq!(Outcome::bind_all(clean), Outcome::ok(vec![1, 2, 3]));
    /// ```
    pub fn bind_all<I>(outcomes: I) -> Outcome<Vec<T>, Vec<E>>
    where
        I: IntoIterator<Item = Outcome<T, E>>,
    {
        let mut successes = Vec::new();
        let mut failures = Vec::new();

        for outcome in outcomes {
            match outcome {
                Outcome::Ok(v) => successes.push(v),
                Outcome::Error(e) => failures.push(e),
            }
        }

        if failures.is_empty() {
            Outcome::Ok(successes)
        } else {
            Outcome::Error(failures)
        }
    }
}

impl<T, E> Outcome<Outcome<T, E>, E> {
    /// Remove one level of nesting.
    #[inline]
    pub fn flatten(self) -> Outcome<T, E> {
        self.bind(|inner| inner)
    }
}

// ========== Trait Implementations ==========

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Outcome::from_result(result)
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}

impl<T, E> IntoIterator for Outcome<T, E> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_maybe().into_option().into_iter()
    }
}

// ========== Free Constructors ==========

/// Shorthand for [`Outcome::ok`].
#[inline]
pub fn ok<T, E>(value: T) -> Outcome<T, E> {
    Outcome::Ok(value)
}

/// Shorthand for [`Outcome::error`].
#[inline]
pub fn error<T, E>(error: E) -> Outcome<T, E> {
    Outcome::Error(error)
}

/// Shorthand for [`Outcome::bind_all`].
pub fn bind_all<T, E, I>(outcomes: I) -> Outcome<Vec<T>, Vec<E>>
where
    I: IntoIterator<Item = Outcome<T, E>>,
{
    Outcome::bind_all(outcomes)
}
