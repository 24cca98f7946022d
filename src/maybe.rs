//! An optional value: `Some(T)` or `None`.
//!
//! `Maybe<T>` carries the same information as [`std::option::Option`], but its
//! combinator surface matches [`Outcome`](crate::Outcome) name for name, and
//! each combinator has an async twin in [`crate::handler`].
//!
//! # Combinators
//!
//! - `Some` is transformed, `None` is inert: [`map`](Maybe::map),
//!   [`bind`](Maybe::bind) and [`filter`](Maybe::filter) never touch `None`.
//! - [`fold`](Maybe::fold) and [`reduce`](Maybe::reduce) leave the container
//!   and always produce a plain value.
//! - [`tap`](Maybe::tap) observes and hands the container back;
//!   [`effect`](Maybe::effect) observes and ends the chain with [`Unit`].
//!
//! ```rust
//! use flowline::Maybe;
//!
//! let label = Maybe::from_option("42".parse::<i32>().ok())
//!     .filter(|n| *n > 0)
//!     .map(|n| n * 2)
//!     .fold(|n| format!("got {n}"), || "nothing".to_string());
//!
//! assert_eq!(label, "got 84");
//! ```

use crate::{Outcome, Unit};

/// A value that is either present (`Some`) or absent (`None`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Maybe<T> {
    /// A present value
    Some(T),
    /// No value
    None,
}

impl<T> Maybe<T> {
    // ========== Constructors ==========

    /// Wrap a present value.
    ///
    /// ```rust
    /// use flowline::Maybe;
    ///
    /// assert!(Maybe::some(1).is_some());
    /// ```
    #[inline]
    pub fn some(value: T) -> Self {
        Maybe::Some(value)
    }

    /// The absent value.
    ///
    /// ```rust
    /// use flowline::Maybe;
    ///
    /// assert!(Maybe::<i32>::none().is_none());
    /// ```
    #[inline]
    pub fn none() -> Self {
        Maybe::None
    }

    /// Lift a nullable value. A missing value collapses into `None`.
    ///
    /// ```rust
    /// use flowline::Maybe;
    ///
    /// assert_eq!(Maybe::from_option(Some(3)), Maybe::some(3));
    /// assert_eq!(Maybe::<i32>::from_option(None), Maybe::none());
    /// ```
    #[inline]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Maybe::Some(v),
            None => Maybe::None,
        }
    }

    // ========== Predicates ==========

    /// Returns `true` if a value is present.
    #[inline]
    pub fn is_some(&self) -> bool {
        matches!(self, Maybe::Some(_))
    }

    /// Returns `true` if no value is present.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Maybe::None)
    }

    // ========== Extractors ==========

    /// Borrow the payload.
    #[inline]
    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Maybe::Some(v) => Maybe::Some(v),
            Maybe::None => Maybe::None,
        }
    }

    /// Convert into a standard `Option`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Maybe::Some(v) => Some(v),
            Maybe::None => None,
        }
    }

    /// Return the payload.
    ///
    /// # Panics
    ///
    /// Panics if called on `None`. Branch on [`is_some`](Maybe::is_some) or use
    /// [`reduce`](Maybe::reduce) instead.
    ///
    /// ```rust
    /// use flowline::Maybe;
    ///
    /// assert_eq!(Maybe::some(7).unwrap(), 7);
    /// ```
    #[inline]
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Maybe::Some(v) => v,
            Maybe::None => panic!("called `Maybe::unwrap()` on a `None` value"),
        }
    }

    /// Return the payload, panicking with `msg` if called on `None`.
    #[inline]
    #[track_caller]
    pub fn expect(self, msg: &str) -> T {
        match self {
            Maybe::Some(v) => v,
            Maybe::None => panic!("{}", msg),
        }
    }

    // ========== Matching ==========

    /// Apply exactly one of the two branches.
    ///
    /// ```rust
    /// use flowline::Maybe;
    ///
    /// let n = Maybe::some(2).fold(|x| x * 10, || 0);
    /// assert_eq!(n, 20);
    ///
    /// let n = Maybe::<i32>::none().fold(|x| x * 10, || 0);
    /// assert_eq!(n, 0);
    /// ```
    #[doc(alias = "match")]
    #[inline]
    pub fn fold<R, S, N>(self, when_some: S, when_none: N) -> R
    where
        S: FnOnce(T) -> R,
        N: FnOnce() -> R,
    {
        match self {
            Maybe::Some(v) => when_some(v),
            Maybe::None => when_none(),
        }
    }

    // ========== Transformations ==========

    /// Transform the payload; `None` passes through.
    ///
    /// ```rust
    /// use flowline::Maybe;
    ///
    /// assert_eq!(Maybe::some(2).map(|x| x + 1), Maybe::some(3));
    /// assert_eq!(Maybe::<i32>::none().map(|x| x + 1), Maybe::none());
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Maybe::Some(v) => Maybe::Some(f(v)),
            Maybe::None => Maybe::None,
        }
    }

    /// Chain a computation that may itself produce nothing.
    ///
    /// ```rust
    /// use flowline::Maybe;
    ///
    /// fn half(x: i32) -> Maybe<i32> {
    ///     if x % 2 == 0 { Maybe::some(x / 2) } else { Maybe::none() }
    /// }
    ///
    /// assert_eq!(Maybe::some(8).bind(half).bind(half), Maybe::some(2));
    /// assert_eq!(Maybe::some(3).bind(half), Maybe::none());
    /// ```
    #[inline]
    pub fn bind<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> Maybe<U>,
    {
        match self {
            Maybe::Some(v) => f(v),
            Maybe::None => Maybe::None,
        }
    }

    /// Keep the payload only if it satisfies `predicate`.
    ///
    /// ```rust
    /// use flowline::Maybe;
    ///
    /// assert_eq!(Maybe::some(4).filter(|x| x % 2 == 0), Maybe::some(4));
    /// assert_eq!(Maybe::some(3).filter(|x| x % 2 == 0), Maybe::none());
    /// ```
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Maybe::Some(v) if predicate(&v) => Maybe::Some(v),
            _ => Maybe::None,
        }
    }

    /// Keep `self` if present, otherwise compute a replacement.
    #[inline]
    pub fn or_else<F>(self, f: F) -> Self
    where
        F: FnOnce() -> Maybe<T>,
    {
        match self {
            Maybe::Some(v) => Maybe::Some(v),
            Maybe::None => f(),
        }
    }

    // ========== Reduction ==========

    /// Extract the payload or fall back to `alternate`.
    ///
    /// ```rust
    /// use flowline::Maybe;
    ///
    /// assert_eq!(Maybe::some(5).reduce(0), 5);
    /// assert_eq!(Maybe::<i32>::none().reduce(0), 0);
    /// ```
    #[inline]
    pub fn reduce(self, alternate: T) -> T {
        match self {
            Maybe::Some(v) => v,
            Maybe::None => alternate,
        }
    }

    /// Extract the payload or compute the fallback lazily.
    #[inline]
    pub fn reduce_with<F>(self, alternate: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Maybe::Some(v) => v,
            Maybe::None => alternate(),
        }
    }

    // ========== Side Effects ==========

    /// Run one side effect per branch and hand the container back.
    ///
    /// ```rust
    /// use flowline::Maybe;
    ///
    /// let mut seen = Vec::new();
    /// let value = Maybe::some(1)
    ///     .tap(|x| seen.push(*x), || {})
    ///     .map(|x| x + 1);
    ///
    /// assert_eq!(value, Maybe::some(2));
    /// assert_eq!(seen, vec![1]);
    /// ```
    #[inline]
    pub fn tap<S, N>(self, when_some: S, when_none: N) -> Self
    where
        S: FnOnce(&T),
        N: FnOnce(),
    {
        match &self {
            Maybe::Some(v) => when_some(v),
            Maybe::None => when_none(),
        }
        self
    }

    /// Observe the payload, if any.
    #[inline]
    pub fn tap_some<S>(self, when_some: S) -> Self
    where
        S: FnOnce(&T),
    {
        self.tap(when_some, || {})
    }

    /// Run `when_none` if there is no payload.
    #[inline]
    pub fn tap_none<N>(self, when_none: N) -> Self
    where
        N: FnOnce(),
    {
        self.tap(|_| {}, when_none)
    }

    /// Run every handler against the payload, in slice order.
    ///
    /// ```rust
    /// use std::cell::RefCell;
    /// use flowline::Maybe;
    ///
    /// let log = RefCell::new(Vec::new());
    /// let first = |x: &i32| log.borrow_mut().push(format!("first {x}"));
    /// let second = |x: &i32| log.borrow_mut().push(format!("second {x}"));
    ///
    /// Maybe::some(1).tap_each(&[&first, &second]);
    /// assert_eq!(*log.borrow(), vec!["first 1", "second 1"]);
    /// ```
    pub fn tap_each(self, handlers: &[&dyn Fn(&T)]) -> Self {
        if let Maybe::Some(v) = &self {
            for handler in handlers {
                handler(v);
            }
        }
        self
    }

    /// Run one side effect per branch and end the chain.
    #[inline]
    pub fn effect<S, N>(self, when_some: S, when_none: N) -> Unit
    where
        S: FnOnce(T),
        N: FnOnce(),
    {
        match self {
            Maybe::Some(v) => when_some(v),
            Maybe::None => when_none(),
        }
        Unit
    }

    /// Consume the payload, if any, and end the chain.
    #[inline]
    pub fn effect_some<S>(self, when_some: S) -> Unit
    where
        S: FnOnce(T),
    {
        self.effect(when_some, || {})
    }

    /// Run `when_none` if there is no payload and end the chain.
    #[inline]
    pub fn effect_none<N>(self, when_none: N) -> Unit
    where
        N: FnOnce(),
    {
        self.effect(|_| {}, when_none)
    }

    /// Run every handler against the payload, in slice order, and end the chain.
    pub fn effect_each(self, handlers: &[&dyn Fn(&T)]) -> Unit {
        Unit::discard(self.tap_each(handlers))
    }

    // ========== Conversions ==========

    /// Turn absence into a specific error.
    ///
    /// ```rust
    /// use flowline::{Maybe, Outcome};
    ///
    /// assert_eq!(Maybe::some(1).ok_or("missing"), Outcome::ok(1));
    /// assert_eq!(Maybe::<i32>::none().ok_or("missing"), Outcome::error("missing"));
    /// ```
    #[inline]
    pub fn ok_or<E>(self, error: E) -> Outcome<T, E> {
        match self {
            Maybe::Some(v) => Outcome::Ok(v),
            Maybe::None => Outcome::Error(error),
        }
    }

    /// Turn absence into an error computed on demand.
    #[inline]
    pub fn ok_or_else<E, F>(self, error: F) -> Outcome<T, E>
    where
        F: FnOnce() -> E,
    {
        match self {
            Maybe::Some(v) => Outcome::Ok(v),
            Maybe::None => Outcome::Error(error()),
        }
    }

    // ========== Iterator Support ==========

    /// Iterate over the payload (zero or one item).
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.as_ref().into_option().into_iter()
    }
}

impl<T> Maybe<Maybe<T>> {
    /// Remove one level of nesting.
    #[inline]
    pub fn flatten(self) -> Maybe<T> {
        self.bind(|inner| inner)
    }
}

// ========== Trait Implementations ==========

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::None
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        Maybe::from_option(value)
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(value: Maybe<T>) -> Self {
        value.into_option()
    }
}

impl<T> IntoIterator for Maybe<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_option().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Maybe<T> {
    type Item = &'a T;
    type IntoIter = std::option::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_ref().into_option().into_iter()
    }
}

// ========== Free Constructors ==========

/// Shorthand for [`Maybe::some`].
#[inline]
pub fn some<T>(value: T) -> Maybe<T> {
    Maybe::Some(value)
}

/// Shorthand for [`Maybe::none`].
#[inline]
pub fn none<T>() -> Maybe<T> {
    Maybe::None
}

/// Shorthand for [`Maybe::from_option`].
#[inline]
pub fn optional_from_nullable<T>(value: Option<T>) -> Maybe<T> {
    Maybe::from_option(value)
}
