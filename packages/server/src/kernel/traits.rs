// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
//
// Naming convention: Base* for trait names (e.g., BasePageFetcher)

use async_trait::async_trait;
use thiserror::Error;

// =============================================================================
// Page Fetcher Trait (Infrastructure - outbound HTTP)
// =============================================================================

/// A fetched page with a 2xx status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status_code: u16,
    pub body: String,
}

/// Why a page could not be fetched
///
/// Callers treat every variant the same way (the check failed); the variant
/// only goes to the logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait BasePageFetcher: Send + Sync {
    /// GET `url` once, without retries
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
