//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use page_analyzer_core::common::UrlId;
use page_analyzer_core::domains::urls::{NewUrlCheck, Url, UrlCheck};
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// A normalized site name no other test uses
pub fn unique_site() -> String {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let stamp = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("https://site-{stamp}-{n}.example.com")
}

/// Create a test url
pub async fn create_test_url(pool: &PgPool, name: &str) -> Result<Url> {
    Url::create(name, pool).await
}

/// Record a test check with the given status and metadata
pub async fn create_test_check(
    pool: &PgPool,
    url_id: UrlId,
    status_code: i32,
    title: &str,
) -> Result<UrlCheck> {
    UrlCheck::create(
        NewUrlCheck {
            url_id,
            status_code,
            h1: format!("{title} heading"),
            title: title.to_string(),
            description: format!("{title} description"),
        },
        pool,
    )
    .await
}

/// Number of checks stored for a url
pub async fn count_checks(pool: &PgPool, url_id: UrlId) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url_checks WHERE url_id = $1")
        .bind(url_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Number of url rows with the given name
pub async fn count_urls_named(pool: &PgPool, name: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
