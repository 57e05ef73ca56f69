// HTTP server setup (Axum + server-rendered HTML)
pub mod app;
pub mod error;
pub mod flash;
pub mod routes;
pub mod static_files;
pub mod templates;

pub use app::*;
pub use error::AppError;
