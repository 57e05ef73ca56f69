//! Postgres connection pool setup

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;

use crate::Config;

/// Embedded schema migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Connect a pool whose acquires and statements are bounded by the store timeout
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let statement_timeout_ms = config.store_timeout.as_millis().to_string();

    let connect_options = PgConnectOptions::from_str(&config.database_url)
        .context("DATABASE_URL is not a valid Postgres connection string")?
        .options([("statement_timeout", statement_timeout_ms)]);

    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(config.store_timeout)
        .connect_with(connect_options)
        .await
        .context("Failed to connect to database")
}
