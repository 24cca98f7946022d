//! The async combinators, written once for every [`Container`].
//!
//! Each function is the same three steps: split the container into its
//! branch, call the handler for that branch, await the handler's [`Step`]
//! (which completes immediately for synchronous handlers).
//!
//! [`Step`]: crate::handler::Step

use super::container::{Branch, Container};
use crate::{Handler, Unit};

/// Transform the primary payload; the alternate branch passes through.
pub async fn map<C, U>(container: C, f: Handler<'_, C::Value, U>) -> C::Rebind<U>
where
    C: Container,
{
    match container.into_branch() {
        Branch::Primary(value) => <C::Rebind<U>>::primary(f.call(value).await),
        Branch::Alternate(alt) => <C::Rebind<U>>::alternate(alt),
    }
}

/// Chain a handler that returns a container of the same shape.
///
/// The result type only has to agree on the alternate payload, so a
/// `Maybe<T>` binds to any `Maybe<U>` and an `Outcome<T, E>` to any
/// `Outcome<U, E>`.
pub async fn bind<C, R>(container: C, f: Handler<'_, C::Value, R>) -> R
where
    C: Container,
    R: Container<Alt = C::Alt>,
{
    match container.into_branch() {
        Branch::Primary(value) => f.call(value).await,
        Branch::Alternate(alt) => R::alternate(alt),
    }
}

/// Apply exactly one of two handlers.
pub async fn fold<C, R>(
    container: C,
    when_primary: Handler<'_, C::Value, R>,
    when_alternate: Handler<'_, C::Alt, R>,
) -> R
where
    C: Container,
{
    match container.into_branch() {
        Branch::Primary(value) => when_primary.call(value).await,
        Branch::Alternate(alt) => when_alternate.call(alt).await,
    }
}

/// Extract the primary payload or derive one from the alternate branch.
pub async fn reduce<C>(container: C, alternate: Handler<'_, C::Alt, C::Value>) -> C::Value
where
    C: Container,
{
    match container.into_branch() {
        Branch::Primary(value) => value,
        Branch::Alternate(alt) => alternate.call(alt).await,
    }
}

/// Run a side effect for the current branch and return the container.
pub async fn tap<C>(
    container: C,
    when_primary: Handler<'_, C::Value, ()>,
    when_alternate: Handler<'_, C::Alt, ()>,
) -> C
where
    C: Container,
    C::Value: Clone,
    C::Alt: Clone,
{
    match container.into_branch() {
        Branch::Primary(value) => {
            when_primary.call(value.clone()).await;
            C::primary(value)
        }
        Branch::Alternate(alt) => {
            when_alternate.call(alt.clone()).await;
            C::alternate(alt)
        }
    }
}

/// Run a side effect for the current branch, consuming the container.
pub async fn effect<C>(
    container: C,
    when_primary: Handler<'_, C::Value, ()>,
    when_alternate: Handler<'_, C::Alt, ()>,
) -> Unit
where
    C: Container,
{
    match container.into_branch() {
        Branch::Primary(value) => when_primary.call(value).await,
        Branch::Alternate(alt) => when_alternate.call(alt).await,
    }
    Unit
}
