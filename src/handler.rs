//! One function type for "sync or async, with or without an argument".
//!
//! Every async combinator in this crate takes a [`Handler`] instead of a bare
//! closure. A handler is built from a plain function, an async function, or a
//! nullary variant of either, and calling it always yields a [`Step`]: a future
//! that is already complete when the handler was synchronous. The combinators
//! are written once against `Step` and never care which kind they were given.
//!
//! | Handler kind       | Constructor                |
//! |--------------------|----------------------------|
//! | `A -> T`           | [`Handler::from_fn`]       |
//! | `A -> impl Future` | [`Handler::from_async`]    |
//! | `() -> T`          | [`Handler::thunk`]         |
//! | `() -> impl Future`| [`Handler::thunk_async`]   |
//! | constant `T`       | [`Handler::value`]         |
//!
//! ```rust
//! use flowline::{Handler, Maybe};
//!
//! # tokio_test::block_on(async {
//! let sync = Maybe::some(2).map_async(Handler::from_fn(|x: i32| x * 10)).await;
//! let asynch = Maybe::some(2)
//!     .map_async(Handler::from_async(|x: i32| async move { x * 10 }))
//!     .await;
//!
//! assert_eq!(sync, asynch);
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt};

/// The result of calling a [`Handler`]: a value that is ready now, or later.
///
/// Awaiting a ready step completes on the first poll without suspending.
#[must_use = "a `Step` does nothing unless awaited"]
pub struct Step<'a, T> {
    inner: StepInner<'a, T>,
}

enum StepInner<'a, T> {
    Ready(Option<T>),
    Pending(BoxFuture<'a, T>),
}

impl<'a, T> Step<'a, T> {
    /// A step that is already complete.
    #[inline]
    pub fn ready(value: T) -> Self {
        Step {
            inner: StepInner::Ready(Some(value)),
        }
    }

    /// A step that completes when `future` does.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'a,
    {
        Step {
            inner: StepInner::Pending(future.boxed()),
        }
    }

    /// Returns `true` if awaiting this step would not suspend.
    pub fn is_ready(&self) -> bool {
        matches!(self.inner, StepInner::Ready(Some(_)))
    }

    /// Take the value out without awaiting, or get the step back.
    pub fn into_ready(self) -> Result<T, Self> {
        match self.inner {
            StepInner::Ready(Some(value)) => Ok(value),
            inner => Err(Step { inner }),
        }
    }

    /// Transform the eventual value. A ready step stays ready.
    pub fn map<U, F>(self, f: F) -> Step<'a, U>
    where
        T: 'a,
        F: FnOnce(T) -> U + Send + 'a,
    {
        match self.inner {
            StepInner::Ready(Some(value)) => Step::ready(f(value)),
            StepInner::Ready(None) => Step {
                inner: StepInner::Ready(None),
            },
            StepInner::Pending(future) => Step::pending(future.map(f)),
        }
    }
}

// The ready value is never pinned in place.
impl<T> Unpin for Step<'_, T> {}

impl<T> Future for Step<'_, T> {
    type Output = T;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        match &mut self.inner {
            StepInner::Ready(value) => {
                Poll::Ready(value.take().expect("`Step` polled after completion"))
            }
            StepInner::Pending(future) => future.as_mut().poll(cx),
        }
    }
}

impl<T> fmt::Debug for Step<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.inner {
            StepInner::Ready(Some(_)) => "ready",
            StepInner::Ready(None) => "taken",
            StepInner::Pending(_) => "pending",
        };
        f.debug_struct("Step").field("state", &state).finish()
    }
}

type HandlerFn<'a, A, T> = Box<dyn FnOnce(A) -> Step<'a, T> + Send + 'a>;

/// A single-use function from `A` to `T` that may or may not need to await.
///
/// # Examples
///
/// ```rust
/// use flowline::Handler;
///
/// # tokio_test::block_on(async {
/// let double = Handler::from_fn(|x: i32| x * 2);
/// assert_eq!(double.call(21).await, 42);
///
/// let fetch = Handler::from_async(|id: u32| async move { format!("user-{id}") });
/// assert_eq!(fetch.call(7).await, "user-7");
///
/// // Nullary handlers ignore whatever input they are given.
/// let fallback: Handler<'_, (), i32> = Handler::thunk(|| 0);
/// assert_eq!(fallback.call(()).await, 0);
/// # });
/// ```
pub struct Handler<'a, A, T> {
    f: HandlerFn<'a, A, T>,
}

impl<'a, A, T> Handler<'a, A, T> {
    /// Wrap a synchronous function of the input.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce(A) -> T + Send + 'a,
    {
        Handler {
            f: Box::new(move |input| Step::ready(f(input))),
        }
    }

    /// Wrap an asynchronous function of the input.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: FnOnce(A) -> Fut + Send + 'a,
        Fut: Future<Output = T> + Send + 'a,
    {
        Handler {
            f: Box::new(move |input| Step::pending(f(input))),
        }
    }

    /// Wrap a synchronous function that ignores the input.
    pub fn thunk<F>(f: F) -> Self
    where
        F: FnOnce() -> T + Send + 'a,
    {
        Handler {
            f: Box::new(move |_| Step::ready(f())),
        }
    }

    /// Wrap an asynchronous function that ignores the input.
    pub fn thunk_async<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = T> + Send + 'a,
    {
        Handler {
            f: Box::new(move |_| Step::pending(f())),
        }
    }

    /// A handler that ignores the input and yields `value`.
    pub fn value(value: T) -> Self
    where
        T: Send + 'a,
    {
        Handler::thunk(move || value)
    }

    /// Wrap a function that already produces a [`Step`].
    pub fn from_step<F>(f: F) -> Self
    where
        F: FnOnce(A) -> Step<'a, T> + Send + 'a,
    {
        Handler { f: Box::new(f) }
    }

    /// Invoke the handler.
    #[inline]
    pub fn call(self, input: A) -> Step<'a, T> {
        (self.f)(input)
    }

    /// Post-process the handler's output.
    pub fn map<U, F>(self, f: F) -> Handler<'a, A, U>
    where
        A: 'a,
        T: 'a,
        F: FnOnce(T) -> U + Send + 'a,
    {
        Handler {
            f: Box::new(move |input| self.call(input).map(f)),
        }
    }
}

impl<A, T> fmt::Debug for Handler<'_, A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("f", &"<function>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_sync_handler_is_ready_immediately() {
        let step = Handler::from_fn(|x: i32| x + 1).call(1);
        assert!(step.is_ready());
        assert_eq!(step.into_ready().ok(), Some(2));
    }

    #[test]
    fn test_async_handler_is_pending() {
        let step = Handler::from_async(|x: i32| async move { x + 1 }).call(1);
        assert!(!step.is_ready());
        assert!(step.into_ready().is_err());
    }

    #[tokio::test]
    async fn test_all_constructors_resolve() {
        assert_eq!(Handler::from_fn(|x: i32| x * 2).call(4).await, 8);
        assert_eq!(
            Handler::from_async(|x: i32| async move { x * 2 }).call(4).await,
            8
        );
        assert_eq!(Handler::<i32, i32>::thunk(|| 1).call(99).await, 1);
        assert_eq!(
            Handler::<i32, i32>::thunk_async(|| async { 2 }).call(99).await,
            2
        );
        assert_eq!(Handler::<(), &str>::value("v").call(()).await, "v");
        assert_eq!(
            Handler::from_step(|x: i32| Step::ready(x - 1)).call(1).await,
            0
        );
    }

    #[tokio::test]
    async fn test_map_keeps_ready_steps_ready() {
        let step = Handler::from_fn(|x: i32| x + 1).map(|x| x * 10).call(1);
        assert!(step.is_ready());
        assert_eq!(step.await, 20);

        let pending = Handler::from_async(|x: i32| async move { x + 1 })
            .map(|x| x * 10)
            .call(1);
        assert_eq!(pending.await, 20);
    }

    #[tokio::test]
    async fn test_handler_body_runs_only_when_called() {
        let ran = Arc::new(AtomicBool::new(false));
        let ran_clone = ran.clone();
        let handler = Handler::thunk_async(move || async move {
            ran_clone.store(true, Ordering::SeqCst);
        });
        assert!(!ran.load(Ordering::SeqCst));

        let step: Step<'_, ()> = handler.call(());
        step.await;
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_debug_does_not_leak_internals() {
        let handler = Handler::from_fn(|x: i32| x);
        assert_eq!(format!("{:?}", handler), "Handler { f: \"<function>\" }");
        assert_eq!(
            format!("{:?}", Step::ready(1)),
            "Step { state: \"ready\" }"
        );
    }
}
