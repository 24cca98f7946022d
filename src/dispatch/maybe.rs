//! Async combinators on a resolved [`Maybe`].

use super::combinators;
use crate::{Handler, Maybe, Unit};

impl<T> Maybe<T> {
    /// Async twin of [`map`](Maybe::map).
    ///
    /// ```rust
    /// use flowline::{Handler, Maybe};
    ///
    /// # tokio_test::block_on(async {
    /// let len = Maybe::some("flow".to_string())
    ///     .map_async(Handler::from_async(|s: String| async move { s.len() }))
    ///     .await;
    /// assert_eq!(len, Maybe::some(4));
    /// # });
    /// ```
    pub async fn map_async<U>(self, f: Handler<'_, T, U>) -> Maybe<U> {
        combinators::map(self, f).await
    }

    /// Async twin of [`bind`](Maybe::bind).
    pub async fn bind_async<U>(self, f: Handler<'_, T, Maybe<U>>) -> Maybe<U> {
        combinators::bind(self, f).await
    }

    /// Async twin of [`fold`](Maybe::fold).
    ///
    /// ```rust
    /// use flowline::{Handler, Maybe};
    ///
    /// # tokio_test::block_on(async {
    /// let text = Maybe::<i32>::none()
    ///     .fold_async(
    ///         Handler::from_fn(|n: i32| n.to_string()),
    ///         Handler::thunk_async(|| async { "empty".to_string() }),
    ///     )
    ///     .await;
    /// assert_eq!(text, "empty");
    /// # });
    /// ```
    #[doc(alias = "match_async")]
    pub async fn fold_async<R>(
        self,
        when_some: Handler<'_, T, R>,
        when_none: Handler<'_, (), R>,
    ) -> R {
        combinators::fold(self, when_some, when_none).await
    }

    /// Async twin of [`reduce_with`](Maybe::reduce_with).
    pub async fn reduce_async(self, alternate: Handler<'_, (), T>) -> T {
        combinators::reduce(self, alternate).await
    }

    /// Async twin of [`filter`](Maybe::filter). The predicate sees a clone.
    pub async fn filter_async(self, predicate: Handler<'_, T, bool>) -> Maybe<T>
    where
        T: Clone,
    {
        match self {
            Maybe::Some(value) => {
                if predicate.call(value.clone()).await {
                    Maybe::Some(value)
                } else {
                    Maybe::None
                }
            }
            Maybe::None => Maybe::None,
        }
    }

    /// Async twin of [`tap`](Maybe::tap). The `Some` handler sees a clone.
    pub async fn tap_async(
        self,
        when_some: Handler<'_, T, ()>,
        when_none: Handler<'_, (), ()>,
    ) -> Maybe<T>
    where
        T: Clone,
    {
        combinators::tap(self, when_some, when_none).await
    }

    /// Async twin of [`tap_some`](Maybe::tap_some).
    pub async fn tap_some_async(self, when_some: Handler<'_, T, ()>) -> Maybe<T>
    where
        T: Clone,
    {
        self.tap_async(when_some, Handler::value(())).await
    }

    /// Async twin of [`tap_none`](Maybe::tap_none).
    pub async fn tap_none_async(self, when_none: Handler<'_, (), ()>) -> Maybe<T> {
        if self.is_none() {
            when_none.call(()).await;
        }
        self
    }

    /// Async twin of [`effect`](Maybe::effect).
    pub async fn effect_async(
        self,
        when_some: Handler<'_, T, ()>,
        when_none: Handler<'_, (), ()>,
    ) -> Unit {
        combinators::effect(self, when_some, when_none).await
    }

    /// Async twin of [`effect_some`](Maybe::effect_some).
    pub async fn effect_some_async(self, when_some: Handler<'_, T, ()>) -> Unit {
        self.effect_async(when_some, Handler::value(())).await
    }

    /// Async twin of [`effect_none`](Maybe::effect_none).
    pub async fn effect_none_async(self, when_none: Handler<'_, (), ()>) -> Unit {
        self.effect_async(Handler::value(()), when_none).await
    }
}
