//! The `Unit` marker value.
//!
//! Side-effect-only combinators such as [`Maybe::effect`](crate::Maybe::effect)
//! return `Unit` so a chain always ends in a concrete value.
//!
//! ```rust
//! use flowline::{Maybe, Unit};
//!
//! let done = Maybe::some(3).effect(|n| println!("{n}"), || println!("nothing"));
//! assert_eq!(done, Unit);
//! ```

use std::fmt;

/// A valueless marker. Every `Unit` equals every other `Unit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit;

impl Unit {
    /// Discard `value` and produce `Unit`.
    #[inline]
    pub fn discard<T>(_value: T) -> Self {
        Unit
    }
}

impl From<()> for Unit {
    fn from(_: ()) -> Self {
        Unit
    }
}

impl From<Unit> for () {
    fn from(_: Unit) -> Self {}
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("()")
    }
}
