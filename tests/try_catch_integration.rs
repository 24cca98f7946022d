//! Integration tests for the Try/Catch wrapper

use std::error::Error;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use flowline::fault::innermost_message;
use flowline::testing::CallLog;
use flowline::{assert_error, assert_ok, try_, try_async, Fault, Handler, Outcome};

#[derive(Debug)]
struct ConfigError {
    key: &'static str,
    source: io::Error,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not read {}", self.key)
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

fn read_setting(key: &'static str) -> Result<String, ConfigError> {
    match key {
        "port" => Ok("8080".to_string()),
        _ => Err(ConfigError {
            key,
            source: io::Error::new(io::ErrorKind::NotFound, format!("{key}.conf missing")),
        }),
    }
}

#[test]
fn value_path_returns_the_value() {
    let port = try_(|| read_setting("port"))
        .catch(|fault| fault.message())
        .invoke();
    assert_eq!(port, "8080");
}

#[test]
fn error_path_exposes_top_and_root_messages() {
    let fault = assert_error!(try_(|| read_setting("host")).run());

    assert!(!fault.is_panic());
    assert_eq!(fault.message(), "could not read host");
    assert_eq!(fault.root_message(), "host.conf missing");

    let inner = fault.into_error().unwrap();
    assert_eq!(innermost_message(&inner), "host.conf missing");
}

#[test]
fn panic_path_becomes_a_fault() {
    let outcome = try_(|| -> Result<u32, ConfigError> {
        let values: Vec<u32> = Vec::new();
        Ok(values[3])
    })
    .into_outcome();

    let fault = assert_error!(outcome);
    assert!(fault.is_panic());
    assert!(fault.message().contains("index out of bounds"));
}

#[test]
fn catch_recovers_with_a_default() {
    let timeout = try_(|| read_setting("timeout").map(|s| s.parse::<u64>().unwrap_or(0)))
        .catch(|_| 30)
        .invoke();
    assert_eq!(timeout, 30);
}

#[test]
fn finally_runs_after_catch_in_order() {
    let log = CallLog::new();

    let value = try_(|| {
        log.record("try");
        read_setting("missing")
    })
    .catch(|fault| {
        log.record("catch");
        fault.message()
    })
    .finally_(|| log.record("finally"))
    .invoke();

    assert_eq!(value, "could not read missing");
    assert_eq!(log.entries(), vec!["try", "catch", "finally"]);
}

#[test]
fn fault_map_keeps_panics() {
    let mapped: Fault<String> = Fault::<io::Error>::Panic("p".to_string()).map(|e| e.to_string());
    assert_eq!(mapped, Fault::Panic("p".to_string()));
    assert_eq!(mapped.to_string(), "panicked: p");
}

#[tokio::test]
async fn async_value_and_error_paths() {
    let port = try_async(|| async { read_setting("port") })
        .catch(Handler::from_fn(|fault: Fault<ConfigError>| fault.message()))
        .invoke()
        .await;
    assert_eq!(port, "8080");

    let root = try_async(|| async { read_setting("db") })
        .catch(Handler::from_async(|fault: Fault<ConfigError>| async move {
            fault.root_message()
        }))
        .invoke()
        .await;
    assert_eq!(root, "db.conf missing");
}

#[tokio::test]
async fn async_run_returns_an_outcome() {
    let ok = try_async(|| async { read_setting("port") }).run().await;
    assert_eq!(assert_ok!(ok), "8080");

    let panicked: Outcome<String, Fault<ConfigError>> = try_async(|| async {
        tokio::task::yield_now().await;
        let nothing: Option<String> = None;
        Ok(nothing.expect("setting was never loaded"))
    })
    .run()
    .await;
    let fault = assert_error!(panicked);
    assert_eq!(fault.message(), "setting was never loaded");
}

#[tokio::test]
async fn async_finally_runs_exactly_once_per_invoke() {
    let cleanups = Arc::new(AtomicUsize::new(0));
    let log = CallLog::new();

    for key in ["port", "missing"] {
        let cleanups = cleanups.clone();
        let log = log.clone();
        let value = try_async(move || async move { read_setting(key) })
            .catch(Handler::value("fallback".to_string()))
            .finally_(Handler::thunk_async(move || async move {
                cleanups.fetch_add(1, Ordering::SeqCst);
                log.record("cleanup");
            }))
            .invoke()
            .await;
        assert!(value == "8080" || value == "fallback");
    }

    assert_eq!(cleanups.load(Ordering::SeqCst), 2);
    assert_eq!(log.len(), 2);
}
