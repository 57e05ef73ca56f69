//! CLI for applying and inspecting schema migrations
//!
//! The server applies pending migrations on startup; this binary does the
//! same without starting it, or reports what has been applied.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use page_analyzer_core::config::Config;
use page_analyzer_core::kernel::{connect_pool, MIGRATOR};
use sqlx::migrate::Migrate;

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Schema migration CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply all pending migrations
    Run,

    /// List migrations and whether they are applied
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Run => {
            MIGRATOR
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations complete");
        }
        Commands::Status => {
            let mut conn = pool.acquire().await.context("Failed to acquire connection")?;
            conn.ensure_migrations_table()
                .await
                .context("Failed to prepare migrations table")?;
            let applied = conn
                .list_applied_migrations()
                .await
                .context("Failed to list applied migrations")?;

            for migration in MIGRATOR.iter() {
                let state = if applied.iter().any(|a| a.version == migration.version) {
                    "applied"
                } else {
                    "pending"
                };
                println!("{:>16}  {:<8}  {}", migration.version, state, migration.description);
            }
        }
    }

    Ok(())
}
