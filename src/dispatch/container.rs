//! The two-branch shape shared by [`Maybe`] and [`Outcome`].

use crate::{Maybe, Outcome};

/// Which branch a container is in, with its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch<T, A> {
    /// `Some` / `Ok`
    Primary(T),
    /// `None` / `Error`
    Alternate(A),
}

/// A container with a value-carrying primary branch and an alternate branch.
///
/// `Maybe<T>` has alternate payload `()`; `Outcome<T, E>` has `E`. The async
/// combinators in [`combinators`](super::combinators) are written once against
/// this trait.
pub trait Container: Sized {
    /// Payload of the primary branch.
    type Value;
    /// Payload of the alternate branch.
    type Alt;
    /// The same container shape holding a different primary payload.
    type Rebind<U>: Container<Value = U, Alt = Self::Alt>;

    /// Split into a branch.
    fn into_branch(self) -> Branch<Self::Value, Self::Alt>;

    /// Build the primary branch.
    fn primary(value: Self::Value) -> Self;

    /// Build the alternate branch.
    fn alternate(alt: Self::Alt) -> Self;
}

impl<T> Container for Maybe<T> {
    type Value = T;
    type Alt = ();
    type Rebind<U> = Maybe<U>;

    fn into_branch(self) -> Branch<T, ()> {
        match self {
            Maybe::Some(v) => Branch::Primary(v),
            Maybe::None => Branch::Alternate(()),
        }
    }

    fn primary(value: T) -> Self {
        Maybe::Some(value)
    }

    fn alternate(_: ()) -> Self {
        Maybe::None
    }
}

impl<T, E> Container for Outcome<T, E> {
    type Value = T;
    type Alt = E;
    type Rebind<U> = Outcome<U, E>;

    fn into_branch(self) -> Branch<T, E> {
        match self {
            Outcome::Ok(v) => Branch::Primary(v),
            Outcome::Error(e) => Branch::Alternate(e),
        }
    }

    fn primary(value: T) -> Self {
        Outcome::Ok(value)
    }

    fn alternate(alt: E) -> Self {
        Outcome::Error(alt)
    }
}
