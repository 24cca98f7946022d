//! Async combinator dispatch.
//!
//! Every synchronous combinator on [`Maybe`](crate::Maybe) and
//! [`Outcome`](crate::Outcome) has an `_async` twin that accepts a
//! [`Handler`](crate::Handler). There are two places the twins live:
//!
//! | Container is...                  | Methods come from                        |
//! |----------------------------------|------------------------------------------|
//! | already resolved                 | inherent `*_async` methods               |
//! | a future resolving to a container| [`ContainerFutureExt`] (plus the `Maybe`/`Outcome` specific traits) |
//!
//! Both forms funnel into the generic functions in [`combinators`], which are
//! written once against the [`Container`] trait. Whether the handler is
//! sync or async, unary or nullary, is decided when the `Handler` is built,
//! so none of these functions branch on it.
//!
//! Sync and async forms agree on every input:
//!
//! ```rust
//! use flowline::{Handler, Outcome};
//!
//! # tokio_test::block_on(async {
//! let input: Outcome<i32, String> = Outcome::ok(20);
//!
//! let sync = input.clone().map(|x| x + 1);
//! let asynch = input
//!     .map_async(Handler::from_async(|x: i32| async move { x + 1 }))
//!     .await;
//!
//! assert_eq!(sync, asynch);
//! # });
//! ```

pub mod combinators;
mod container;
mod ext;
mod maybe;
mod outcome;

pub use container::{Branch, Container};
pub use ext::{ContainerFutureExt, MaybeFutureExt, OutcomeFutureExt};
