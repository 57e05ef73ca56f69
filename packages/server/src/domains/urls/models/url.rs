use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::common::UrlId;

/// Url - a submitted site, stored normalized to `scheme://host`
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Url {
    pub id: UrlId,
    pub name: String,
    pub created_at: NaiveDate,
}

/// Result of [`Url::find_or_create`]
#[derive(Debug, Clone)]
pub struct UrlUpsert {
    pub url: Url,
    /// `false` when the name was already stored
    pub created: bool,
}

#[derive(FromRow)]
struct UrlUpsertRow {
    id: UrlId,
    name: String,
    created_at: NaiveDate,
    created: bool,
}

impl From<UrlUpsertRow> for UrlUpsert {
    fn from(row: UrlUpsertRow) -> Self {
        Self {
            url: Url {
                id: row.id,
                name: row.name,
                created_at: row.created_at,
            },
            created: row.created,
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Url {
    /// Find url by ID
    pub async fn find_by_id(id: UrlId, pool: &PgPool) -> Result<Option<Self>> {
        let url = sqlx::query_as::<_, Url>("SELECT * FROM urls WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(url)
    }

    /// Find url by its exact normalized name
    pub async fn find_by_name(name: &str, pool: &PgPool) -> Result<Option<Self>> {
        let url = sqlx::query_as::<_, Url>("SELECT * FROM urls WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?;
        Ok(url)
    }

    /// Find all urls, newest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let urls = sqlx::query_as::<_, Url>("SELECT * FROM urls ORDER BY id DESC")
            .fetch_all(pool)
            .await?;
        Ok(urls)
    }

    /// Insert a new url
    ///
    /// Fails with a unique violation if the name is already stored. Use
    /// [`Url::find_or_create`] for user submissions.
    pub async fn create(name: &str, pool: &PgPool) -> Result<Self> {
        let url = sqlx::query_as::<_, Url>(
            "INSERT INTO urls (name, created_at) VALUES ($1, CURRENT_DATE) RETURNING *",
        )
        .bind(name)
        .fetch_one(pool)
        .await?;
        Ok(url)
    }

    /// Find or create a url (handles race conditions)
    ///
    /// Uses INSERT ... ON CONFLICT so two concurrent submissions of the same
    /// name both end up with the same row. `xmax = 0` only holds for a row
    /// this statement inserted.
    pub async fn find_or_create(name: &str, pool: &PgPool) -> Result<UrlUpsert> {
        let row = sqlx::query_as::<_, UrlUpsertRow>(
            r#"
            INSERT INTO urls (name, created_at)
            VALUES ($1, CURRENT_DATE)
            ON CONFLICT (name) DO UPDATE
            SET name = EXCLUDED.name  -- No-op update to return existing row
            RETURNING id, name, created_at, (xmax = 0) AS created
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await?;
        Ok(row.into())
    }
}
