//! Run a fallible computation and turn both `Err` and panics into a value.
//!
//! The wrapper has three stages:
//!
//! 1. [`try_`] / [`try_async`] wrap the computation. `.run()` executes it
//!    straight away into an `Outcome<T, Fault<E>>`.
//! 2. `.catch(handler)` maps any [`Fault`] back into a plain `T`.
//! 3. `.finally_(cleanup)` registers cleanup that runs exactly once, whichever
//!    branch was taken and even if the catch handler itself panics.
//!
//! Nothing runs until `.run()` or `.invoke()` is called.
//!
//! # Examples
//!
//! ```rust
//! use flowline::try_;
//! use std::io;
//!
//! let parsed = try_(|| "42".parse::<i32>().map_err(|e| io::Error::other(e)))
//!     .catch(|_| -1)
//!     .invoke();
//! assert_eq!(parsed, 42);
//!
//! let message = try_(|| -> Result<String, io::Error> { panic!("boom") })
//!     .catch(|fault| fault.message())
//!     .invoke();
//! assert_eq!(message, "boom");
//! ```

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;

use crate::fault::{panic_message, Fault};
use crate::{Handler, Outcome};

fn captured<T, E>(result: Result<Result<T, E>, Box<dyn std::any::Any + Send>>) -> Outcome<T, Fault<E>> {
    match result {
        Ok(Ok(value)) => Outcome::Ok(value),
        Ok(Err(error)) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("guarded computation returned an error");
            Outcome::Error(Fault::Error(error))
        }
        Err(payload) => {
            let message = panic_message(&*payload);
            #[cfg(feature = "tracing")]
            tracing::warn!("guarded computation panicked: {}", message);
            Outcome::Error(Fault::Panic(message))
        }
    }
}

// ==================== Sync ====================

/// Wrap a synchronous computation.
pub fn try_<F, T, E>(f: F) -> Try<F>
where
    F: FnOnce() -> Result<T, E>,
{
    Try { f }
}

/// A guarded synchronous computation. See the [module docs](self).
#[must_use = "nothing runs until `run` or `invoke` is called"]
pub struct Try<F> {
    f: F,
}

impl<F> Try<F> {
    /// Execute now, capturing `Err` and panics as [`Fault`].
    ///
    /// ```rust
    /// use flowline::{try_, Fault, Outcome};
    ///
    /// let outcome = try_(|| Err::<i32, _>("nope")).run();
    /// assert_eq!(outcome, Outcome::error(Fault::Error("nope")));
    /// ```
    pub fn run<T, E>(self) -> Outcome<T, Fault<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        captured(panic::catch_unwind(AssertUnwindSafe(self.f)))
    }

    /// Alias for [`run`](Try::run).
    pub fn into_outcome<T, E>(self) -> Outcome<T, Fault<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.run()
    }

    /// Recover from any fault with `handler`.
    pub fn catch<H, T, E>(self, handler: H) -> Catch<F, H>
    where
        F: FnOnce() -> Result<T, E>,
        H: FnOnce(Fault<E>) -> T,
    {
        Catch {
            f: self.f,
            handler,
        }
    }
}

/// A guarded computation with a recovery handler.
#[must_use = "nothing runs until `invoke` is called"]
pub struct Catch<F, H> {
    f: F,
    handler: H,
}

impl<F, H> Catch<F, H> {
    /// Run the computation, recovering from any fault.
    pub fn invoke<T, E>(self) -> T
    where
        F: FnOnce() -> Result<T, E>,
        H: FnOnce(Fault<E>) -> T,
    {
        Try { f: self.f }.run().reduce_error(self.handler)
    }

    /// Register cleanup that runs once after the computation and handler.
    ///
    /// ```rust
    /// use std::cell::Cell;
    /// use flowline::try_;
    ///
    /// let cleaned = Cell::new(0);
    /// let value = try_(|| Err::<i32, &str>("bad"))
    ///     .catch(|_| 0)
    ///     .finally_(|| cleaned.set(cleaned.get() + 1))
    ///     .invoke();
    ///
    /// assert_eq!(value, 0);
    /// assert_eq!(cleaned.get(), 1);
    /// ```
    pub fn finally_<C>(self, cleanup: C) -> Finally<F, H, C>
    where
        C: FnOnce(),
    {
        Finally {
            catch: self,
            cleanup,
        }
    }
}

/// A guarded computation with recovery and cleanup.
#[must_use = "nothing runs until `invoke` is called"]
pub struct Finally<F, H, C> {
    catch: Catch<F, H>,
    cleanup: C,
}

impl<F, H, C> Finally<F, H, C>
where
    C: FnOnce(),
{
    /// Run the computation and handler, then the cleanup.
    ///
    /// If the handler panics, the cleanup still runs and the panic is
    /// resumed afterwards.
    pub fn invoke<T, E>(self) -> T
    where
        F: FnOnce() -> Result<T, E>,
        H: FnOnce(Fault<E>) -> T,
    {
        let catch = self.catch;
        let result = panic::catch_unwind(AssertUnwindSafe(|| catch.invoke()));

        (self.cleanup)();

        match result {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

// ==================== Async ====================

/// Wrap an asynchronous computation.
///
/// ```rust
/// use flowline::{try_async, Handler};
///
/// # tokio_test::block_on(async {
/// let value = try_async(|| async { Err::<u32, String>("offline".to_string()) })
///     .catch(Handler::from_fn(|fault: flowline::Fault<String>| fault.message().len() as u32))
///     .invoke()
///     .await;
/// assert_eq!(value, 7);
/// # });
/// ```
pub fn try_async<F, Fut, T, E>(f: F) -> TryAsync<F>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    TryAsync { f }
}

/// A guarded asynchronous computation.
#[must_use = "nothing runs until `run` or `invoke` is awaited"]
pub struct TryAsync<F> {
    f: F,
}

impl<F> TryAsync<F> {
    /// Execute, capturing `Err` and panics (including panics while polling)
    /// as [`Fault`].
    pub async fn run<Fut, T, E>(self) -> Outcome<T, Fault<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let f = self.f;
        captured(AssertUnwindSafe(async move { f().await }).catch_unwind().await)
    }

    /// Alias for [`run`](TryAsync::run).
    pub async fn into_outcome<Fut, T, E>(self) -> Outcome<T, Fault<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.run().await
    }

    /// Recover from any fault with `handler`, which may be sync or async.
    pub fn catch<'a, T, E>(self, handler: Handler<'a, Fault<E>, T>) -> CatchAsync<'a, F, E, T> {
        CatchAsync { f: self.f, handler }
    }
}

/// A guarded asynchronous computation with a recovery handler.
#[must_use = "nothing runs until `invoke` is awaited"]
pub struct CatchAsync<'a, F, E, T> {
    f: F,
    handler: Handler<'a, Fault<E>, T>,
}

impl<'a, F, E, T> CatchAsync<'a, F, E, T> {
    /// Run the computation, recovering from any fault.
    pub async fn invoke<Fut>(self) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        TryAsync { f: self.f }
            .run()
            .await
            .reduce_async(self.handler)
            .await
    }

    /// Register cleanup that runs once after the computation and handler.
    pub fn finally_(self, cleanup: Handler<'a, (), ()>) -> FinallyAsync<'a, F, E, T> {
        FinallyAsync {
            catch: self,
            cleanup,
        }
    }
}

/// A guarded asynchronous computation with recovery and cleanup.
#[must_use = "nothing runs until `invoke` is awaited"]
pub struct FinallyAsync<'a, F, E, T> {
    catch: CatchAsync<'a, F, E, T>,
    cleanup: Handler<'a, (), ()>,
}

impl<F, E, T> FinallyAsync<'_, F, E, T> {
    /// Run the computation and handler, then await the cleanup.
    ///
    /// If the handler panics, the cleanup still runs and the panic is
    /// resumed afterwards.
    pub async fn invoke<Fut>(self) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let result = AssertUnwindSafe(self.catch.invoke()).catch_unwind().await;

        self.cleanup.call(()).await;

        match result {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

impl<F> std::fmt::Debug for Try<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Try").finish_non_exhaustive()
    }
}

impl<F, H> std::fmt::Debug for Catch<F, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catch").finish_non_exhaustive()
    }
}

impl<F, H, C> std::fmt::Debug for Finally<F, H, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Finally").finish_non_exhaustive()
    }
}

impl<F> std::fmt::Debug for TryAsync<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TryAsync").finish_non_exhaustive()
    }
}

impl<F, E, T> std::fmt::Debug for CatchAsync<'_, F, E, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatchAsync")
            .field("handler", &self.handler)
            .finish_non_exhaustive()
    }
}

impl<F, E, T> std::fmt::Debug for FinallyAsync<'_, F, E, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinallyAsync")
            .field("cleanup", &self.cleanup)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn parse(input: &str) -> Result<i32, io::Error> {
        input
            .parse::<i32>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    #[test]
    fn test_success_value_passes_through_catch() {
        let value = try_(|| Ok::<_, io::Error>("42".to_string()))
            .catch(|fault| fault.message())
            .invoke();
        assert_eq!(value, "42");
    }

    #[test]
    fn test_error_message_reaches_catch() {
        let value = try_(|| Err::<String, _>(io::Error::other("boom")))
            .catch(|fault| fault.message())
            .invoke();
        assert_eq!(value, "boom");
    }

    #[test]
    fn test_panic_message_reaches_catch() {
        let value = try_(|| -> Result<String, io::Error> { panic!("boom") })
            .catch(|fault| {
                assert!(fault.is_panic());
                fault.message()
            })
            .invoke();
        assert_eq!(value, "boom");
    }

    #[test]
    fn test_formatted_panic_message() {
        let outcome = try_(|| -> Result<(), io::Error> { panic!("bad index {}", 3) }).run();
        let fault = outcome.unwrap_error();
        assert!(fault.is_panic());
        assert_eq!(fault.message(), "bad index 3");
    }

    #[test]
    fn test_run_captures_error_as_fault() {
        let outcome = try_(|| parse("x")).run();
        assert!(outcome.is_error());
        assert!(!outcome.unwrap_error().is_panic());

        let outcome = try_(|| parse("7")).into_outcome();
        assert_eq!(outcome.into_result().ok(), Some(7));
    }

    #[test]
    fn test_finally_runs_once_on_success() {
        let cleaned = AtomicUsize::new(0);
        let value = try_(|| parse("5"))
            .catch(|_| 0)
            .finally_(|| {
                cleaned.fetch_add(1, Ordering::SeqCst);
            })
            .invoke();
        assert_eq!(value, 5);
        assert_eq!(cleaned.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_finally_runs_once_on_error_and_panic() {
        let cleaned = AtomicUsize::new(0);

        let on_error = try_(|| parse("nope"))
            .catch(|_| -1)
            .finally_(|| {
                cleaned.fetch_add(1, Ordering::SeqCst);
            })
            .invoke();

        let on_panic = try_(|| -> Result<i32, io::Error> { panic!("crash") })
            .catch(|_| -2)
            .finally_(|| {
                cleaned.fetch_add(1, Ordering::SeqCst);
            })
            .invoke();

        assert_eq!((on_error, on_panic), (-1, -2));
        assert_eq!(cleaned.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_finally_runs_when_handler_panics() {
        let cleaned = AtomicUsize::new(0);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            try_(|| parse("nope"))
                .catch(|_| -> i32 { panic!("handler failed") })
                .finally_(|| {
                    cleaned.fetch_add(1, Ordering::SeqCst);
                })
                .invoke()
        }));

        assert!(result.is_err());
        assert_eq!(cleaned.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_nothing_runs_until_invoked() {
        let calls = AtomicUsize::new(0);
        let pipeline = try_(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, io::Error>(())
        })
        .catch(|_| ());

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        pipeline.invoke();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_async_success_and_error() {
        let ok = try_async(|| async { parse("12") })
            .catch(Handler::from_fn(|_: Fault<io::Error>| 0))
            .invoke()
            .await;
        assert_eq!(ok, 12);

        let message = try_async(|| async { Err::<String, _>(io::Error::other("boom")) })
            .catch(Handler::from_async(|fault: Fault<io::Error>| async move {
                fault.message()
            }))
            .invoke()
            .await;
        assert_eq!(message, "boom");
    }

    #[tokio::test]
    async fn test_async_panic_while_polling_is_captured() {
        let outcome = try_async(|| async {
            tokio::task::yield_now().await;
            if true {
                panic!("boom");
            }
            Ok::<i32, io::Error>(1)
        })
        .run()
        .await;

        assert_eq!(
            outcome.map_error(|fault| fault.message()),
            Outcome::error("boom".to_string())
        );
    }

    #[tokio::test]
    async fn test_async_panic_before_first_poll_is_captured() {
        fn exploding() -> std::future::Ready<Result<i32, io::Error>> {
            panic!("boom early")
        }

        let outcome = try_async(exploding).into_outcome().await;
        assert!(outcome.unwrap_error().is_panic());
    }

    #[tokio::test]
    async fn test_async_finally_runs_once_on_every_branch() {
        let cleaned = Arc::new(AtomicUsize::new(0));
        let cleanup = || {
            let cleaned = cleaned.clone();
            Handler::thunk_async(move || async move {
                cleaned.fetch_add(1, Ordering::SeqCst);
            })
        };

        let success = try_async(|| async { parse("1") })
            .catch(Handler::value(0))
            .finally_(cleanup())
            .invoke()
            .await;

        let failure = try_async(|| async { parse("x") })
            .catch(Handler::value(-1))
            .finally_(cleanup())
            .invoke()
            .await;

        let panicked = try_async(|| async {
            if true {
                panic!("crash");
            }
            parse("1")
        })
        .catch(Handler::value(-2))
        .finally_(cleanup())
        .invoke()
        .await;

        assert_eq!((success, failure, panicked), (1, -1, -2));
        assert_eq!(cleaned.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_async_finally_runs_when_handler_panics() {
        let cleaned = Arc::new(AtomicUsize::new(0));
        let counter = cleaned.clone();

        let result = AssertUnwindSafe(async {
            try_async(|| async { parse("x") })
                .catch(Handler::from_fn(|_: Fault<io::Error>| -> i32 {
                    panic!("handler failed")
                }))
                .finally_(Handler::thunk(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }))
                .invoke()
                .await
        })
        .catch_unwind()
        .await;

        assert!(result.is_err());
        assert_eq!(cleaned.load(Ordering::SeqCst), 1);
    }
}
