use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::common::{UrlCheckId, UrlId};

/// UrlCheck - one successful fetch of a url and what it contained
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UrlCheck {
    pub id: UrlCheckId,
    pub url_id: UrlId,
    pub status_code: Option<i32>,
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDate,
}

/// Values for a new check row
#[derive(Debug, Clone)]
pub struct NewUrlCheck {
    pub url_id: UrlId,
    pub status_code: i32,
    pub h1: String,
    pub title: String,
    pub description: String,
}

/// The most recent check of a url, as shown in the list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestCheck {
    pub status_code: Option<i32>,
    pub created_at: NaiveDate,
}

/// A url joined with its latest check; `latest_check` is `None` until the
/// url has been checked at least once
#[derive(Debug, Clone, Serialize)]
pub struct UrlWithLatestCheck {
    pub id: UrlId,
    pub name: String,
    pub created_at: NaiveDate,
    pub latest_check: Option<LatestCheck>,
}

#[derive(FromRow)]
struct UrlWithLatestCheckRow {
    id: UrlId,
    name: String,
    created_at: NaiveDate,
    last_status_code: Option<i32>,
    last_checked_at: Option<NaiveDate>,
}

impl From<UrlWithLatestCheckRow> for UrlWithLatestCheck {
    fn from(row: UrlWithLatestCheckRow) -> Self {
        // url_checks.created_at is NOT NULL, so a date means a joined check
        let latest_check = row.last_checked_at.map(|created_at| LatestCheck {
            status_code: row.last_status_code,
            created_at,
        });

        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            latest_check,
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl UrlCheck {
    /// Record a check
    pub async fn create(check: NewUrlCheck, pool: &PgPool) -> Result<Self> {
        let check = sqlx::query_as::<_, UrlCheck>(
            r#"
            INSERT INTO url_checks (url_id, status_code, h1, title, description, created_at)
            VALUES ($1, $2, $3, $4, $5, CURRENT_DATE)
            RETURNING *
            "#,
        )
        .bind(check.url_id)
        .bind(check.status_code)
        .bind(check.h1)
        .bind(check.title)
        .bind(check.description)
        .fetch_one(pool)
        .await?;
        Ok(check)
    }

    /// All checks of a url, newest first
    pub async fn find_by_url_id(url_id: UrlId, pool: &PgPool) -> Result<Vec<Self>> {
        let checks = sqlx::query_as::<_, UrlCheck>(
            r#"
            SELECT * FROM url_checks
            WHERE url_id = $1
            ORDER BY id DESC, created_at DESC
            "#,
        )
        .bind(url_id)
        .fetch_all(pool)
        .await?;
        Ok(checks)
    }
}

impl UrlWithLatestCheck {
    /// Every url exactly once, newest first, with its most recent check
    ///
    /// Checks from the same day are ordered by id, so the latest insert wins.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, UrlWithLatestCheckRow>(
            r#"
            SELECT
                urls.id,
                urls.name,
                urls.created_at,
                latest.status_code AS last_status_code,
                latest.created_at AS last_checked_at
            FROM urls
            LEFT JOIN (
                SELECT DISTINCT ON (url_id) url_id, status_code, created_at
                FROM url_checks
                ORDER BY url_id, created_at DESC, id DESC
            ) AS latest ON latest.url_id = urls.id
            ORDER BY urls.id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
