use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use super::error::AppError;

// Embed the stylesheet directory at compile time
#[derive(RustEmbed)]
#[folder = "static/"]
pub struct StaticAssets;

/// Serve an embedded asset under /static
pub async fn static_handler(Path(path): Path<String>) -> Result<Response, AppError> {
    let path = path.trim_start_matches('/');

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Ok(([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response())
        }
        None => Err(AppError::NotFound),
    }
}
