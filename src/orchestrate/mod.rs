//! Run a list of actions over one input, sequentially or in parallel, with
//! cooperative cancellation.
//!
//! An action is a [`Handler`] from the input to `()`, so the same list can
//! mix sync and async, unary and nullary actions. A run moves through
//! `Pending -> Running -> Completed | Cancelled`:
//!
//! - The [`CancellationToken`] is checked before each sequential step and
//!   before each parallel launch. Once it is cancelled no further action
//!   starts.
//! - An action that has started always finishes. Nothing is interrupted.
//! - Cancellation is reported as [`Completion::Cancelled`], not as an error.
//! - A panic inside an action propagates to the caller.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use flowline::{run_sequential, CancellationToken, Completion, Handler};
//!
//! # tokio_test::block_on(async {
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let token = CancellationToken::new();
//!
//! let (a, b, stop) = (seen.clone(), seen.clone(), token.clone());
//! let actions = vec![
//!     Handler::from_fn(move |x: i32| a.lock().unwrap().push(x)),
//!     Handler::from_fn(move |_: i32| stop.cancel()),
//!     Handler::from_async(move |x: i32| async move { b.lock().unwrap().push(x * 10) }),
//! ];
//!
//! let completion = run_sequential(7, actions, &token).await;
//! assert_eq!(completion, Completion::Cancelled);
//! assert_eq!(*seen.lock().unwrap(), vec![7]);
//! # });
//! ```

use std::convert::Infallible;

use futures::stream::{FuturesUnordered, StreamExt};

use crate::Handler;

mod config;

pub use config::ParallelConfig;
pub use tokio_util::sync::CancellationToken;

/// An action over input `A`.
pub type Action<'a, A> = Handler<'a, A, ()>;

/// An action over input `A` that can fail with `E`.
pub type TryAction<'a, A, E> = Handler<'a, A, Result<(), E>>;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Completion {
    /// Every action ran.
    Completed,
    /// The token was cancelled and at least one action never started.
    Cancelled,
}

impl Completion {
    /// Returns `true` if every action ran.
    pub fn is_completed(&self) -> bool {
        matches!(self, Completion::Completed)
    }

    /// Returns `true` if the run stopped early.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Completion::Cancelled)
    }
}

/// What an action hands back to the runner.
trait ActionOutput {
    type Error;

    fn into_result(self) -> Result<(), Self::Error>;
}

impl ActionOutput for () {
    type Error = Infallible;

    fn into_result(self) -> Result<(), Infallible> {
        Ok(())
    }
}

impl<E> ActionOutput for Result<(), E> {
    type Error = E;

    fn into_result(self) -> Result<(), E> {
        self
    }
}

fn settle(result: Result<Completion, Infallible>) -> Completion {
    match result {
        Ok(completion) => completion,
        Err(never) => match never {},
    }
}

// ==================== Sequential ====================

/// Run `actions` one after another, each on a clone of `input`.
///
/// Each action (including its future) finishes before the next starts.
pub async fn run_sequential<'a, A, I>(input: A, actions: I, cancel: &CancellationToken) -> Completion
where
    A: Clone + 'a,
    I: IntoIterator<Item = Action<'a, A>>,
{
    settle(drive_sequential(input, actions, cancel).await)
}

/// [`run_sequential`] for actions that take no input.
pub async fn run_sequential_unit<'a, I>(actions: I, cancel: &CancellationToken) -> Completion
where
    I: IntoIterator<Item = Action<'a, ()>>,
{
    run_sequential((), actions, cancel).await
}

/// Run fallible `actions` one after another, stopping at the first error.
///
/// Actions after a failing one are never started.
pub async fn try_run_sequential<'a, A, E: 'a, I>(
    input: A,
    actions: I,
    cancel: &CancellationToken,
) -> Result<Completion, E>
where
    A: Clone + 'a,
    I: IntoIterator<Item = TryAction<'a, A, E>>,
{
    drive_sequential(input, actions, cancel).await
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
async fn drive_sequential<'a, A, R, I>(
    input: A,
    actions: I,
    cancel: &CancellationToken,
) -> Result<Completion, R::Error>
where
    A: Clone + 'a,
    R: ActionOutput + 'a,
    I: IntoIterator<Item = Handler<'a, A, R>>,
{
    #[cfg(feature = "tracing")]
    tracing::debug!("sequential run started");

    for (index, action) in actions.into_iter().enumerate() {
        if cancel.is_cancelled() {
            #[cfg(feature = "tracing")]
            tracing::debug!("sequential run cancelled before action {}", index);
            return Ok(Completion::Cancelled);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("running action {}", index);

        action.call(input.clone()).await.into_result()?;
    }

    Ok(Completion::Completed)
}

// ==================== Parallel ====================

/// Run `actions` concurrently on clones of `input`, at most
/// `config.max_concurrency()` at a time.
///
/// All actions are polled on the calling task; nothing is spawned. A
/// handler built with [`Handler::from_fn`] or [`Handler::thunk`] runs
/// inline when it is launched, so synchronous actions execute one after
/// another. Blocking or CPU-heavy work belongs in an async handler that
/// hands it off, for example through `tokio::task::spawn_blocking`.
/// Completion order is unspecified.
pub async fn run_parallel<'a, A, I>(
    input: A,
    actions: I,
    cancel: &CancellationToken,
    config: &ParallelConfig,
) -> Completion
where
    A: Clone + 'a,
    I: IntoIterator<Item = Action<'a, A>>,
{
    settle(drive_parallel(input, actions, cancel, config).await)
}

/// [`run_parallel`] for actions that take no input.
pub async fn run_parallel_unit<'a, I>(
    actions: I,
    cancel: &CancellationToken,
    config: &ParallelConfig,
) -> Completion
where
    I: IntoIterator<Item = Action<'a, ()>>,
{
    run_parallel((), actions, cancel, config).await
}

/// Run fallible `actions` concurrently.
///
/// The first error stops further launches. Actions already in flight are
/// allowed to finish, then that first error is returned. Synchronous
/// handlers run inline on the calling task, as in [`run_parallel`].
pub async fn try_run_parallel<'a, A, E: 'a, I>(
    input: A,
    actions: I,
    cancel: &CancellationToken,
    config: &ParallelConfig,
) -> Result<Completion, E>
where
    A: Clone + 'a,
    I: IntoIterator<Item = TryAction<'a, A, E>>,
{
    drive_parallel(input, actions, cancel, config).await
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
async fn drive_parallel<'a, A, R, I>(
    input: A,
    actions: I,
    cancel: &CancellationToken,
    config: &ParallelConfig,
) -> Result<Completion, R::Error>
where
    A: Clone + 'a,
    R: ActionOutput + 'a,
    I: IntoIterator<Item = Handler<'a, A, R>>,
{
    let limit = config.max_concurrency();

    #[cfg(feature = "tracing")]
    tracing::debug!("parallel run started with max concurrency {}", limit);

    // Child of the caller's token so a failure can stop launches without
    // cancelling the caller's token.
    let stop = cancel.child_token();
    let mut queued = actions.into_iter().enumerate();
    let mut in_flight = FuturesUnordered::new();
    let mut launching = true;
    let mut skipped = false;
    let mut first_error = None;

    loop {
        while launching && in_flight.len() < limit {
            match queued.next() {
                Some((index, _)) if stop.is_cancelled() => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("parallel run cancelled before action {}", index);
                    skipped = true;
                    launching = false;
                }
                Some((index, action)) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("launching action {}", index);
                    in_flight.push(action.call(input.clone()));
                }
                None => launching = false,
            }
        }

        match in_flight.next().await {
            Some(output) => {
                if let Err(error) = output.into_result() {
                    if first_error.is_none() {
                        stop.cancel();
                        first_error = Some(error);
                    }
                }
            }
            None => break,
        }
    }

    match first_error {
        Some(error) => Err(error),
        None if skipped => Ok(Completion::Cancelled),
        None => Ok(Completion::Completed),
    }
}
