use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;
use std::time::Duration;

use crate::server::app::AppState;

/// Longest the database may take to answer before the service is unhealthy
const DATABASE_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl DatabaseHealth {
    fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// GET /health - 200 while the database answers, 503 otherwise
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = probe_database(&state.deps.db_pool).await;

    let (status_code, status) = if database.is_ok() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (status_code, Json(HealthResponse { status, database }))
}

async fn probe_database(pool: &PgPool) -> DatabaseHealth {
    let error = match tokio::time::timeout(
        DATABASE_PROBE_TIMEOUT,
        sqlx::query("SELECT 1").execute(pool),
    )
    .await
    {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(format!("Query failed: {e}")),
        Err(_) => Some(format!("Query timeout (>{}s)", DATABASE_PROBE_TIMEOUT.as_secs())),
    };

    DatabaseHealth {
        status: if error.is_none() { "ok" } else { "error" },
        error,
    }
}
