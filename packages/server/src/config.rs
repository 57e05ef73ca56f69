use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    pub port: u16,
    pub database_max_connections: u32,
    pub fetch_timeout: Duration,
    pub store_timeout: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            secret_key: env::var("SECRET_KEY").context("SECRET_KEY must be set")?,
            port: parse_var("PORT", 8000)?,
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 10)?,
            fetch_timeout: Duration::from_secs(parse_var("FETCH_TIMEOUT_SECS", 10)?),
            store_timeout: Duration::from_secs(parse_var("STORE_TIMEOUT_SECS", 5)?),
            request_timeout: Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", 30)?),
        })
    }
}

/// Read an optional numeric variable, falling back to `default` when unset
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a valid number")),
        Err(_) => Ok(default),
    }
}
