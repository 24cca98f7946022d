//! # flowline
//!
//! Optional and fallible values that compose the same way whether the next
//! step is synchronous or asynchronous, plus a small task runner with
//! cooperative cancellation and a Try/Catch wrapper that turns panics into
//! values.
//!
//! - [`Maybe<T>`] is a value or nothing; [`Outcome<T, E>`] is a value or an
//!   error. Both carry `map`, `bind`, `fold`, `reduce`, `tap` and `effect`.
//! - Every combinator has an `_async` twin taking a [`Handler`], which can
//!   wrap a sync or async function with or without an argument. Futures
//!   resolving to a container get the same twins via [`ContainerFutureExt`].
//! - [`run_sequential`] and [`run_parallel`] run a list of actions over one
//!   input, stopping early when a [`CancellationToken`] is cancelled.
//! - [`try_`] and [`try_async`] capture both `Err` and panics as a [`Fault`].
//!
//! ## Quick Example
//!
//! ```rust
//! use flowline::prelude::*;
//!
//! fn parse_port(raw: &str) -> Outcome<u16, String> {
//!     raw.parse::<u16>()
//!         .map_err(|e| format!("bad port {raw:?}: {e}"))
//!         .into()
//! }
//!
//! async fn reachable(port: u16) -> Outcome<u16, String> {
//!     if port >= 1024 {
//!         Outcome::ok(port)
//!     } else {
//!         Outcome::error(format!("port {port} is privileged"))
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let port = parse_port("8080")
//!     .bind_async(Handler::from_async(reachable))
//!     .await
//!     .fold(|p| format!("listening on {p}"), |e| format!("refused: {e}"));
//! assert_eq!(port, "listening on 8080");
//!
//! let refused = parse_port("80")
//!     .bind_async(Handler::from_async(reachable))
//!     .await
//!     .reduce_error(|e| { assert!(e.contains("privileged")); 0 });
//! assert_eq!(refused, 0);
//! # });
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod dispatch;
pub mod fault;
pub mod handler;
pub mod maybe;
pub mod orchestrate;
pub mod outcome;
pub mod testing;
pub mod try_catch;
pub mod unit;

// Re-exports
pub use dispatch::{Container, ContainerFutureExt, MaybeFutureExt, OutcomeFutureExt};
pub use fault::Fault;
pub use handler::{Handler, Step};
pub use maybe::{none, optional_from_nullable, some, Maybe};
pub use orchestrate::{
    run_parallel, run_parallel_unit, run_sequential, run_sequential_unit, try_run_parallel,
    try_run_sequential, Action, CancellationToken, Completion, ParallelConfig, TryAction,
};
pub use outcome::{bind_all, error, ok, Outcome};
pub use try_catch::{try_, try_async};
pub use unit::Unit;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dispatch::{ContainerFutureExt, MaybeFutureExt, OutcomeFutureExt};
    pub use crate::fault::Fault;
    pub use crate::handler::Handler;
    pub use crate::maybe::Maybe;
    pub use crate::orchestrate::{CancellationToken, Completion, ParallelConfig};
    pub use crate::outcome::Outcome;
    pub use crate::try_catch::{try_, try_async};
    pub use crate::unit::Unit;
}
