//! Server dependencies (using traits for testability)
//!
//! The single dependency container handed to activities and handlers. It is
//! built once at startup; nothing in it is mutable per request.

use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::kernel::{BasePageFetcher, HttpPageFetcher};

/// Server dependencies accessible to activities
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub page_fetcher: Arc<dyn BasePageFetcher>,
}

impl ServerDeps {
    pub fn new(db_pool: PgPool, page_fetcher: Arc<dyn BasePageFetcher>) -> Self {
        Self {
            db_pool,
            page_fetcher,
        }
    }

    /// Production dependencies: real HTTP fetcher with the given timeout
    pub fn production(db_pool: PgPool, fetch_timeout: Duration) -> Result<Self> {
        let fetcher = HttpPageFetcher::new(fetch_timeout)?;
        Ok(Self::new(db_pool, Arc::new(fetcher)))
    }
}
