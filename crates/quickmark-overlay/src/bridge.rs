//! Message bridge between the overlay and the host.
//!
//! The `Bridge` trait is surface-independent and returns boxed futures, so
//! the controller can spawn them and tests can substitute a mock.
//!
//! ## Degradation
//!
//! Errors are returned to the controller, which never shows them: a failed
//! search becomes an empty result list and a failed open becomes a negative
//! acknowledgement.

use futures::future::BoxFuture;
use quickmark_core::{
    BridgeError, Disposition, Request, Response, SearchResult, DEFAULT_TIMEOUT_MS,
};
use quickmark_host::{Background, TabId};
use std::sync::Arc;
use std::time::Duration;

// =============================================================================
// Bridge Trait
// =============================================================================

/// Requests the overlay sends to the host.
///
/// Requests are independent: nothing orders one against another.
pub trait Bridge: Send + Sync {
    /// Resolve a query to bookmarks.
    fn search(&self, query: String) -> BoxFuture<'static, Result<Vec<SearchResult>, BridgeError>>;

    /// Navigate to `url`. Resolves to the host's acknowledgement.
    fn open(
        &self,
        url: String,
        disposition: Disposition,
    ) -> BoxFuture<'static, Result<bool, BridgeError>>;
}

// =============================================================================
// Host Bridge
// =============================================================================

/// Bridge that talks to an in-process `Background` over the JSON wire format.
///
/// Every request is bounded by a timeout.
pub struct HostBridge {
    background: Arc<Background>,
    tab: Option<TabId>,
    timeout: Duration,
}

impl HostBridge {
    /// Create a bridge for the overlay living in `tab`.
    pub fn new(background: Arc<Background>, tab: Option<TabId>) -> Self {
        Self {
            background,
            tab,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Create with a custom timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn send(&self, request: Request) -> BoxFuture<'static, Result<Response, BridgeError>> {
        let background = self.background.clone();
        let tab = self.tab;
        let timeout = self.timeout;

        Box::pin(async move {
            let payload = serde_json::to_string(&request)
                .map_err(|e| BridgeError::Channel(e.to_string()))?;

            let reply = tokio::time::timeout(timeout, background.handle_json(&payload, tab))
                .await
                .map_err(|_| BridgeError::Timeout { duration: timeout })?;

            serde_json::from_str(&reply).map_err(|e| BridgeError::UnexpectedResponse(e.to_string()))
        })
    }
}

impl Bridge for HostBridge {
    fn search(&self, query: String) -> BoxFuture<'static, Result<Vec<SearchResult>, BridgeError>> {
        let reply = self.send(Request::Search { query });
        Box::pin(async move {
            match reply.await? {
                Response::Search(response) => Ok(response.results),
                Response::Open(other) => Err(BridgeError::UnexpectedResponse(format!(
                    "search answered with {:?}",
                    other
                ))),
            }
        })
    }

    fn open(
        &self,
        url: String,
        disposition: Disposition,
    ) -> BoxFuture<'static, Result<bool, BridgeError>> {
        let reply = self.send(Request::Open {
            url: Some(url),
            disposition,
        });
        Box::pin(async move {
            match reply.await? {
                Response::Open(response) => Ok(response.ok),
                Response::Search(_) => Err(BridgeError::UnexpectedResponse(
                    "open answered with search results".to_string(),
                )),
            }
        })
    }
}

// =============================================================================
// Mock Bridge for Testing
// =============================================================================

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Mock bridge for testing.
    ///
    /// Every call is recorded. Results and delays can be set per query.
    #[derive(Default)]
    pub struct MockBridge {
        pub results: Arc<Mutex<Vec<SearchResult>>>,
        pub results_by_query: Arc<Mutex<HashMap<String, Vec<SearchResult>>>>,
        pub delays: Arc<Mutex<HashMap<String, Duration>>>,
        pub fail_search: Arc<Mutex<bool>>,
        pub open_ok: Arc<Mutex<bool>>,
        pub search_calls: Arc<Mutex<Vec<String>>>,
        pub open_calls: Arc<Mutex<Vec<(String, Disposition)>>>,
    }

    impl MockBridge {
        /// Create a mock that finds nothing and accepts every open.
        pub fn new() -> Self {
            let mock = Self::default();
            *mock.open_ok.lock() = true;
            mock
        }

        /// Results for any query without a specific entry.
        pub fn with_results(self, results: Vec<SearchResult>) -> Self {
            *self.results.lock() = results;
            self
        }

        /// Results for one query.
        pub fn with_results_for(self, query: &str, results: Vec<SearchResult>) -> Self {
            self.results_by_query
                .lock()
                .insert(query.to_string(), results);
            self
        }

        /// Delay the reply to one query.
        pub fn with_delay_for(self, query: &str, delay: Duration) -> Self {
            self.delays.lock().insert(query.to_string(), delay);
            self
        }

        /// Make every search fail.
        pub fn with_failing_search(self) -> Self {
            *self.fail_search.lock() = true;
            self
        }

        /// Set the acknowledgement returned by `open`.
        pub fn with_open_ok(self, ok: bool) -> Self {
            *self.open_ok.lock() = ok;
            self
        }

        pub fn search_calls(&self) -> Vec<String> {
            self.search_calls.lock().clone()
        }

        pub fn open_calls(&self) -> Vec<(String, Disposition)> {
            self.open_calls.lock().clone()
        }
    }

    impl Bridge for MockBridge {
        fn search(
            &self,
            query: String,
        ) -> BoxFuture<'static, Result<Vec<SearchResult>, BridgeError>> {
            self.search_calls.lock().push(query.clone());

            let delay = self.delays.lock().get(&query).copied();
            let fail = *self.fail_search.lock();
            let results = self
                .results_by_query
                .lock()
                .get(&query)
                .cloned()
                .unwrap_or_else(|| self.results.lock().clone());

            Box::pin(async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                if fail {
                    return Err(BridgeError::Provider("mock failure".to_string()));
                }
                Ok(results)
            })
        }

        fn open(
            &self,
            url: String,
            disposition: Disposition,
        ) -> BoxFuture<'static, Result<bool, BridgeError>> {
            self.open_calls.lock().push((url, disposition));
            let ok = *self.open_ok.lock();
            Box::pin(async move { Ok(ok) })
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
