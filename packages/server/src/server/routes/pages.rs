use axum::{extract::Extension, http::HeaderMap, response::Response};
use minijinja::context;

use crate::server::app::AppState;
use crate::server::error::AppError;

/// Home page with the submission form
pub async fn index_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let incoming = state.flash.take(&headers);

    let html = state.templates.render(
        "index.html",
        context! {
            messages => incoming.messages(),
            url => "",
        },
    )?;

    Ok(incoming.into_page(html))
}

/// Fallback for unknown routes
pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}
