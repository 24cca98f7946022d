//! Combinators on *pending* containers: futures that resolve to a
//! [`Maybe`] or an [`Outcome`].
//!
//! Each method awaits the container first and then runs the same code as
//! the resolved form, so a chain can cross into async code and keep going:
//!
//! ```rust
//! use flowline::prelude::*;
//!
//! async fn load(id: u32) -> Maybe<String> {
//!     if id == 0 { Maybe::none() } else { Maybe::some(format!("row-{id}")) }
//! }
//!
//! # tokio_test::block_on(async {
//! let size = load(3)
//!     .map_async(Handler::from_fn(|row: String| row.len()))
//!     .reduce_async(Handler::value(0))
//!     .await;
//! assert_eq!(size, 5);
//! # });
//! ```

use std::future::Future;

use futures::future::BoxFuture;

use super::combinators;
use super::container::Container;
use crate::{Handler, Maybe, Outcome, Unit};

/// Async combinators for any future whose output is a [`Container`].
pub trait ContainerFutureExt<C>: Future<Output = C> + Send + Sized
where
    C: Container + Send,
{
    /// Await the container, then [`map`](combinators::map) it.
    fn map_async<'a, U>(self, f: Handler<'a, C::Value, U>) -> BoxFuture<'a, C::Rebind<U>>
    where
        Self: 'a,
        C: 'a,
        C::Value: Send + 'a,
        C::Alt: Send + 'a,
        C::Rebind<U>: Send,
        U: Send + 'a,
    {
        Box::pin(async move { combinators::map(self.await, f).await })
    }

    /// Await the container, then [`bind`](combinators::bind) it.
    fn bind_async<'a, R>(self, f: Handler<'a, C::Value, R>) -> BoxFuture<'a, R>
    where
        Self: 'a,
        C: 'a,
        C::Value: Send + 'a,
        C::Alt: Send + 'a,
        R: Container<Alt = C::Alt> + Send + 'a,
    {
        Box::pin(async move { combinators::bind(self.await, f).await })
    }

    /// Await the container, then [`fold`](combinators::fold) it.
    fn fold_async<'a, R>(
        self,
        when_primary: Handler<'a, C::Value, R>,
        when_alternate: Handler<'a, C::Alt, R>,
    ) -> BoxFuture<'a, R>
    where
        Self: 'a,
        C: 'a,
        C::Value: Send + 'a,
        C::Alt: Send + 'a,
        R: Send + 'a,
    {
        Box::pin(async move { combinators::fold(self.await, when_primary, when_alternate).await })
    }

    /// Await the container, then [`reduce`](combinators::reduce) it.
    fn reduce_async<'a>(self, alternate: Handler<'a, C::Alt, C::Value>) -> BoxFuture<'a, C::Value>
    where
        Self: 'a,
        C: 'a,
        C::Value: Send + 'a,
        C::Alt: Send + 'a,
    {
        Box::pin(async move { combinators::reduce(self.await, alternate).await })
    }

    /// Await the container, then [`tap`](combinators::tap) it.
    fn tap_async<'a>(
        self,
        when_primary: Handler<'a, C::Value, ()>,
        when_alternate: Handler<'a, C::Alt, ()>,
    ) -> BoxFuture<'a, C>
    where
        Self: 'a,
        C: 'a,
        C::Value: Clone + Send + 'a,
        C::Alt: Clone + Send + 'a,
    {
        Box::pin(async move { combinators::tap(self.await, when_primary, when_alternate).await })
    }

    /// Await the container, then run [`effect`](combinators::effect) on it.
    fn effect_async<'a>(
        self,
        when_primary: Handler<'a, C::Value, ()>,
        when_alternate: Handler<'a, C::Alt, ()>,
    ) -> BoxFuture<'a, Unit>
    where
        Self: 'a,
        C: 'a,
        C::Value: Send + 'a,
        C::Alt: Send + 'a,
    {
        Box::pin(
            async move { combinators::effect(self.await, when_primary, when_alternate).await },
        )
    }
}

impl<C, F> ContainerFutureExt<C> for F
where
    F: Future<Output = C> + Send,
    C: Container + Send,
{
}

/// `Maybe`-only combinators on a pending `Maybe`.
pub trait MaybeFutureExt<T>: Future<Output = Maybe<T>> + Send + Sized
where
    T: Send,
{
    /// Await the container, then [`filter_async`](Maybe::filter_async) it.
    fn filter_async<'a>(self, predicate: Handler<'a, T, bool>) -> BoxFuture<'a, Maybe<T>>
    where
        Self: 'a,
        T: Clone + 'a,
    {
        Box::pin(async move { self.await.filter_async(predicate).await })
    }
}

impl<T, F> MaybeFutureExt<T> for F
where
    F: Future<Output = Maybe<T>> + Send,
    T: Send,
{
}

/// `Outcome`-only combinators on a pending `Outcome`.
pub trait OutcomeFutureExt<T, E>: Future<Output = Outcome<T, E>> + Send + Sized
where
    T: Send,
    E: Send,
{
    /// Await the container, then [`map_error_async`](Outcome::map_error_async) it.
    fn map_error_async<'a, E2>(self, f: Handler<'a, E, E2>) -> BoxFuture<'a, Outcome<T, E2>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        E2: Send + 'a,
    {
        Box::pin(async move { self.await.map_error_async(f).await })
    }
}

impl<T, E, F> OutcomeFutureExt<T, E> for F
where
    F: Future<Output = Outcome<T, E>> + Send,
    T: Send,
    E: Send,
{
}
