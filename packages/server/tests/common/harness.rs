//! Test harness with testcontainers for integration testing.
//!
//! Uses one shared Postgres container across all tests of a binary.
//! The container and migrations are initialized on the first test, then reused.

use anyhow::{Context, Result};
use axum::Router;
use page_analyzer_core::kernel::{MockPageFetcher, TestDependencies, MIGRATOR};
use page_analyzer_core::server::build_app;
use sqlx::PgPool;
use std::time::Duration;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Secret used to sign flash cookies in tests
pub const TEST_SECRET_KEY: &str = "test_secret_key";

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    /// Start Postgres and run migrations. Called once, on the first test.
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        MIGRATOR
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness that manages test infrastructure.
///
/// Each test gets a fresh pool over the shared database, so tests must not
/// assume the tables are empty; use [`super::unique_site`] for names.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let app = ctx.app(MockPageFetcher::new());
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: PgPool,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self { db_pool })
    }

    /// The full router, with `fetcher` standing in for the network
    pub fn app(&self, fetcher: MockPageFetcher) -> Router {
        self.app_with_timeout(fetcher, Duration::from_secs(30))
    }

    /// Same router with a custom whole-request timeout
    pub fn app_with_timeout(&self, fetcher: MockPageFetcher, request_timeout: Duration) -> Router {
        let deps = TestDependencies::new()
            .mock_fetcher(fetcher)
            .into_server_deps(self.db_pool.clone());

        build_app(deps, TEST_SECRET_KEY, request_timeout).expect("Failed to build app")
    }
}
