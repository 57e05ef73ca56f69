//! Urls domain - submitted sites and the checks run against them

pub mod activities;
pub mod extraction;
pub mod models;
pub mod validation;

pub use activities::{run_check, submit_url, CheckOutcome, SubmitOutcome};
pub use extraction::{extract_page_metadata, PageMetadata};
pub use models::{LatestCheck, NewUrlCheck, Url, UrlCheck, UrlUpsert, UrlWithLatestCheck};
pub use validation::{normalize_url, validate_url, UrlValidationError};
