//! Async combinators on a resolved [`Outcome`].

use super::combinators;
use crate::{Handler, Outcome, Unit};

impl<T, E> Outcome<T, E> {
    /// Async twin of [`map`](Outcome::map).
    pub async fn map_async<U>(self, f: Handler<'_, T, U>) -> Outcome<U, E> {
        combinators::map(self, f).await
    }

    /// Async twin of [`bind`](Outcome::bind).
    ///
    /// ```rust
    /// use flowline::{Handler, Outcome};
    ///
    /// async fn lookup(id: u32) -> Outcome<String, String> {
    ///     if id == 1 {
    ///         Outcome::ok("alice".to_string())
    ///     } else {
    ///         Outcome::error(format!("no user {id}"))
    ///     }
    /// }
    ///
    /// # tokio_test::block_on(async {
    /// let found = Outcome::<u32, String>::ok(1).bind_async(Handler::from_async(lookup)).await;
    /// assert_eq!(found, Outcome::ok("alice".to_string()));
    ///
    /// let missing = Outcome::<u32, String>::ok(2).bind_async(Handler::from_async(lookup)).await;
    /// assert_eq!(missing, Outcome::error("no user 2".to_string()));
    /// # });
    /// ```
    pub async fn bind_async<U>(self, f: Handler<'_, T, Outcome<U, E>>) -> Outcome<U, E> {
        combinators::bind(self, f).await
    }

    /// Async twin of [`map_error`](Outcome::map_error).
    pub async fn map_error_async<E2>(self, f: Handler<'_, E, E2>) -> Outcome<T, E2> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(value),
            Outcome::Error(error) => Outcome::Error(f.call(error).await),
        }
    }

    /// Async twin of [`fold`](Outcome::fold).
    #[doc(alias = "match_async")]
    pub async fn fold_async<R>(
        self,
        when_ok: Handler<'_, T, R>,
        when_error: Handler<'_, E, R>,
    ) -> R {
        combinators::fold(self, when_ok, when_error).await
    }

    /// Async twin of [`reduce_error`](Outcome::reduce_error).
    ///
    /// Use [`Handler::thunk`] or [`Handler::value`] for the error-blind shapes.
    pub async fn reduce_async(self, alternate: Handler<'_, E, T>) -> T {
        combinators::reduce(self, alternate).await
    }

    /// Async twin of [`tap`](Outcome::tap). Handlers see clones.
    pub async fn tap_async(
        self,
        when_ok: Handler<'_, T, ()>,
        when_error: Handler<'_, E, ()>,
    ) -> Outcome<T, E>
    where
        T: Clone,
        E: Clone,
    {
        combinators::tap(self, when_ok, when_error).await
    }

    /// Async twin of [`tap_ok`](Outcome::tap_ok).
    pub async fn tap_ok_async(self, when_ok: Handler<'_, T, ()>) -> Outcome<T, E>
    where
        T: Clone,
    {
        let observed = match &self {
            Outcome::Ok(value) => Some(value.clone()),
            Outcome::Error(_) => None,
        };
        if let Some(value) = observed {
            when_ok.call(value).await;
        }
        self
    }

    /// Async twin of [`tap_error`](Outcome::tap_error).
    pub async fn tap_error_async(self, when_error: Handler<'_, E, ()>) -> Outcome<T, E>
    where
        E: Clone,
    {
        let observed = match &self {
            Outcome::Ok(_) => None,
            Outcome::Error(error) => Some(error.clone()),
        };
        if let Some(error) = observed {
            when_error.call(error).await;
        }
        self
    }

    /// Async twin of [`effect`](Outcome::effect).
    pub async fn effect_async(
        self,
        when_ok: Handler<'_, T, ()>,
        when_error: Handler<'_, E, ()>,
    ) -> Unit {
        combinators::effect(self, when_ok, when_error).await
    }

    /// Async twin of [`effect_ok`](Outcome::effect_ok).
    pub async fn effect_ok_async(self, when_ok: Handler<'_, T, ()>) -> Unit {
        self.effect_async(when_ok, Handler::value(())).await
    }

    /// Async twin of [`effect_error`](Outcome::effect_error).
    pub async fn effect_error_async(self, when_error: Handler<'_, E, ()>) -> Unit {
        self.effect_async(Handler::value(()), when_error).await
    }
}
