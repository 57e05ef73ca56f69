// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};

use super::{BasePageFetcher, FetchError, FetchedPage, ServerDeps};

// =============================================================================
// Mock Page Fetcher
// =============================================================================

/// Canned outcome for one fetch
#[derive(Debug, Clone)]
enum MockResponse {
    Page(FetchedPage),
    Timeout,
    Status(u16),
    Hang,
}

/// Page fetcher that replays queued responses in order
///
/// With nothing queued it answers 200 with an empty body.
#[derive(Clone, Default)]
pub struct MockPageFetcher {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    fetch_calls: Arc<Mutex<Vec<String>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful fetch
    pub fn with_page(self, status_code: u16, body: &str) -> Self {
        self.push(MockResponse::Page(FetchedPage {
            status_code,
            body: body.to_string(),
        }));
        self
    }

    /// Queue a fetch that times out
    pub fn with_timeout(self) -> Self {
        self.push(MockResponse::Timeout);
        self
    }

    /// Queue a fetch that never completes
    pub fn with_hang(self) -> Self {
        self.push(MockResponse::Hang);
        self
    }

    /// Queue a fetch that gets a non-2xx status
    pub fn with_status_error(self, status_code: u16) -> Self {
        self.push(MockResponse::Status(status_code));
        self
    }

    /// Get all URLs that were fetched
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.lock().unwrap().clone()
    }

    /// Check if a URL was fetched
    pub fn was_fetched(&self, url: &str) -> bool {
        self.fetch_calls.lock().unwrap().iter().any(|u| u == url)
    }

    fn push(&self, response: MockResponse) {
        self.responses.lock().unwrap().push(response);
    }
}

#[async_trait]
impl BasePageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        // Record the call
        self.fetch_calls.lock().unwrap().push(url.to_string());

        let next = {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                None
            } else {
                Some(responses.remove(0))
            }
        };

        match next {
            None => Ok(FetchedPage {
                status_code: 200,
                body: String::new(),
            }),
            Some(MockResponse::Page(page)) => Ok(page),
            Some(MockResponse::Timeout) => Err(FetchError::Timeout),
            Some(MockResponse::Status(code)) => Err(FetchError::Status(code)),
            Some(MockResponse::Hang) => std::future::pending().await,
        }
    }
}

// =============================================================================
// TestDependencies builder
// =============================================================================

/// Builder for ServerDeps with mock services
#[derive(Default)]
pub struct TestDependencies {
    page_fetcher: MockPageFetcher,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_fetcher(mut self, fetcher: MockPageFetcher) -> Self {
        self.page_fetcher = fetcher;
        self
    }

    /// Build ServerDeps over the given pool
    pub fn into_server_deps(self, db_pool: PgPool) -> ServerDeps {
        ServerDeps::new(db_pool, Arc::new(self.page_fetcher))
    }
}
