//! URL submission: validate, normalize, then find-or-create.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::domains::urls::models::Url;
use crate::domains::urls::validation::{normalize_url, validate_url, UrlValidationError};

/// What happened to a submission
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Input rejected, nothing stored
    Invalid(UrlValidationError),
    /// The normalized name was already stored
    Existing(Url),
    /// A new url row was inserted
    Created(Url),
}

/// Handle a raw form submission.
///
/// Surrounding whitespace is ignored. Duplicate detection is a single upsert,
/// so concurrent submissions of one site never produce two rows.
pub async fn submit_url(raw: &str, pool: &PgPool) -> Result<SubmitOutcome> {
    let raw = raw.trim();

    if let Err(error) = validate_url(raw) {
        info!(error = %error, "Rejected url submission");
        return Ok(SubmitOutcome::Invalid(error));
    }

    let name = match normalize_url(raw) {
        Ok(name) => name,
        Err(error) => {
            info!(error = %error, "Rejected url submission after normalization");
            return Ok(SubmitOutcome::Invalid(error));
        }
    };

    let upsert = Url::find_or_create(&name, pool).await?;

    if upsert.created {
        info!(url_id = %upsert.url.id, name = %upsert.url.name, "Url created");
        Ok(SubmitOutcome::Created(upsert.url))
    } else {
        info!(url_id = %upsert.url.id, name = %upsert.url.name, "Url already exists");
        Ok(SubmitOutcome::Existing(upsert.url))
    }
}
