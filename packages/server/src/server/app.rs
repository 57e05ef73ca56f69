//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::Extension,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::flash::FlashSigner;
use crate::server::routes::{
    create_check_handler, create_url_handler, health_handler, index_handler, list_urls_handler,
    not_found_handler, show_url_handler,
};
use crate::server::static_files::static_handler;
use crate::server::templates::Templates;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
    pub templates: Arc<Templates>,
    pub flash: FlashSigner,
}

/// Build the Axum application router
///
/// Everything request handlers need is constructed here, once, and handed to
/// them through the `AppState` extension.
pub fn build_app(deps: ServerDeps, secret_key: &str, request_timeout: Duration) -> Result<Router> {
    let app_state = AppState {
        deps,
        templates: Arc::new(Templates::new()?),
        flash: FlashSigner::new(secret_key),
    };

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/urls", get(list_urls_handler).post(create_url_handler))
        .route("/urls/:id", get(show_url_handler))
        .route("/urls/:id/checks", post(create_check_handler))
        // Health check
        .route("/health", get(health_handler))
        .route("/static/*path", get(static_handler))
        .fallback(not_found_handler)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
