//! Faults captured by [`try_`](crate::try_catch::try_) and friends.
//!
//! A computation handed to the Try wrapper can go wrong two ways: it returns
//! `Err(e)`, or it panics. Both become a [`Fault`], which is an ordinary value
//! from then on.
//!
//! # Examples
//!
//! ```
//! use flowline::fault::Fault;
//! use std::io;
//!
//! let fault: Fault<io::Error> = Fault::Error(io::Error::other("disk full"));
//! assert_eq!(fault.message(), "disk full");
//!
//! let panic: Fault<io::Error> = Fault::Panic("index out of bounds".to_string());
//! assert!(panic.is_panic());
//! ```

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;

use crate::Maybe;

/// A failure intercepted while running a guarded computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault<E> {
    /// The computation returned an error
    Error(E),
    /// The computation panicked; holds the panic message
    Panic(String),
}

impl<E> Fault<E> {
    /// Returns `true` if the computation panicked.
    pub fn is_panic(&self) -> bool {
        matches!(self, Fault::Panic(_))
    }

    /// The returned error, if the fault was not a panic.
    pub fn into_error(self) -> Maybe<E> {
        match self {
            Fault::Error(e) => Maybe::Some(e),
            Fault::Panic(_) => Maybe::None,
        }
    }

    /// Transform the error payload.
    pub fn map<E2, F>(self, f: F) -> Fault<E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Fault::Error(e) => Fault::Error(f(e)),
            Fault::Panic(msg) => Fault::Panic(msg),
        }
    }

    /// The top-level message: the error's `Display` text or the panic message.
    pub fn message(&self) -> String
    where
        E: fmt::Display,
    {
        match self {
            Fault::Error(e) => e.to_string(),
            Fault::Panic(msg) => msg.clone(),
        }
    }

    /// The message of the deepest cause in the error's `source()` chain.
    pub fn root_message(&self) -> String
    where
        E: StdError + 'static,
    {
        match self {
            Fault::Error(e) => innermost_message(e),
            Fault::Panic(msg) => msg.clone(),
        }
    }
}

impl<E: fmt::Display> fmt::Display for Fault<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Error(e) => write!(f, "{}", e),
            Fault::Panic(msg) => write!(f, "panicked: {}", msg),
        }
    }
}

impl<E: StdError + 'static> StdError for Fault<E> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Fault::Error(e) => Some(e),
            Fault::Panic(_) => None,
        }
    }
}

/// Walk `source()` links to the last one and return its message.
///
/// ```
/// use flowline::fault::innermost_message;
/// use std::fmt;
///
/// #[derive(Debug)]
/// struct Outer(std::io::Error);
///
/// impl fmt::Display for Outer {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "loading config failed")
///     }
/// }
///
/// impl std::error::Error for Outer {
///     fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
///         Some(&self.0)
///     }
/// }
///
/// let err = Outer(std::io::Error::other("permission denied"));
/// assert_eq!(innermost_message(&err), "permission denied");
/// ```
pub fn innermost_message(error: &(dyn StdError + 'static)) -> String {
    let mut current = error;
    while let Some(next) = current.source() {
        current = next;
    }
    current.to_string()
}

/// Render a caught panic payload as text.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug)]
    struct Wrapped {
        label: &'static str,
        cause: Option<Box<dyn StdError + 'static>>,
    }

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.label)
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.cause.as_deref()
        }
    }

    #[test]
    fn test_message_for_error_and_panic() {
        let err: Fault<&str> = Fault::Error("boom");
        assert_eq!(err.message(), "boom");

        let panic: Fault<&str> = Fault::Panic("oops".to_string());
        assert_eq!(panic.message(), "oops");
    }

    #[test]
    fn test_display_format() {
        assert_eq!(Fault::Error("bad input").to_string(), "bad input");
        assert_eq!(
            Fault::<&str>::Panic("oops".to_string()).to_string(),
            "panicked: oops"
        );
    }

    #[test]
    fn test_innermost_message_walks_chain() {
        let err = Wrapped {
            label: "outer",
            cause: Some(Box::new(Wrapped {
                label: "middle",
                cause: Some(Box::new(io::Error::other("root cause"))),
            })),
        };
        assert_eq!(innermost_message(&err), "root cause");
    }

    #[test]
    fn test_innermost_message_without_source() {
        let err = io::Error::other("alone");
        assert_eq!(innermost_message(&err), "alone");
    }

    #[test]
    fn test_root_message() {
        let fault = Fault::Error(Wrapped {
            label: "outer",
            cause: Some(Box::new(io::Error::other("inner"))),
        });
        assert_eq!(fault.message(), "outer");
        assert_eq!(fault.root_message(), "inner");
    }

    #[test]
    fn test_error_trait_source() {
        let fault = Fault::Error(io::Error::other("x"));
        assert!(fault.source().is_some());

        let panic: Fault<io::Error> = Fault::Panic("p".to_string());
        assert!(panic.source().is_none());
    }

    #[test]
    fn test_into_error_and_map() {
        assert_eq!(Fault::Error(3).map(|n| n * 2).into_error(), Maybe::Some(6));
        assert_eq!(Fault::<i32>::Panic("p".into()).into_error(), Maybe::None);
    }

    #[test]
    fn test_panic_message_payloads() {
        let static_str: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(static_str.as_ref()), "static");

        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");

        let other: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic payload");
    }
}
