//! Test utilities for wpreadme
//!
//! Compiled for unit tests and, through the `test-utils` feature, for the
//! integration tests. Nothing here touches the network:
//! - [`init_test_logging`] wires `tracing` to the test writer once
//! - [`MockFetcher`] serves canned bodies and counts requests per target
//! - [`fixtures`] holds sample readmes and provider payloads
//!
//! # Example
//!
//! ```rust,no_run
//! use wpreadme_cli::test_utils::{MockFetcher, fixtures};
//!
//! let fetcher = MockFetcher::new()
//!     .with_response("https://api.github.com/users/alice", fixtures::GITHUB_ALICE);
//! assert_eq!(fetcher.total_calls(), 0);
//! ```

pub mod fixtures;

use anyhow::Result;
use dashmap::DashMap;
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::core::ReadmeError;
use crate::source::{FetchRequest, TextFetcher};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG` if set, otherwise stays
/// silent. Safe to call from every test.
///
/// ```bash
/// RUST_LOG=wpreadme_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

#[derive(Debug, Clone)]
enum Canned {
    Body(String),
    Failure,
}

/// In-memory [`TextFetcher`].
///
/// Targets without a canned response fail like an HTTP 404. Clones share
/// responses, counters and the request log.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    responses: Arc<DashMap<String, Canned>>,
    calls: Arc<DashMap<String, usize>>,
    log: Arc<Mutex<Vec<FetchRequest>>>,
}

impl MockFetcher {
    /// A fetcher with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `target`.
    #[must_use]
    pub fn with_response(self, target: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(target.into(), Canned::Body(body.into()));
        self
    }

    /// Fail every request for `target` with a network error.
    #[must_use]
    pub fn with_failure(self, target: impl Into<String>) -> Self {
        self.responses.insert(target.into(), Canned::Failure);
        self
    }

    /// Requests made for `target`.
    pub fn calls(&self, target: &str) -> usize {
        self.calls.get(target).map_or(0, |c| *c)
    }

    /// Requests made in total.
    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|c| *c.value()).sum()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

impl TextFetcher for MockFetcher {
    fn fetch<'a>(&'a self, request: &'a FetchRequest) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            *self.calls.entry(request.target.clone()).or_insert(0) += 1;
            if let Ok(mut log) = self.log.lock() {
                log.push(request.clone());
            }

            match self.responses.get(&request.target).map(|r| r.value().clone()) {
                Some(Canned::Body(body)) => Ok(body),
                Some(Canned::Failure) => Err(ReadmeError::NetworkError {
                    operation: format!("GET {}", request.target),
                    reason: "connection refused".to_string(),
                }
                .into()),
                None => Err(ReadmeError::NetworkError {
                    operation: format!("GET {}", request.target),
                    reason: "HTTP 404 Not Found".to_string(),
                }
                .into()),
            }
        })
    }
}
