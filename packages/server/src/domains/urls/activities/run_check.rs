//! Url check: fetch the page, extract metadata, record the check.

use anyhow::Result;
use tracing::{info, warn};

use crate::domains::urls::extraction::extract_page_metadata;
use crate::domains::urls::models::{NewUrlCheck, Url, UrlCheck};
use crate::kernel::{FetchError, ServerDeps};

/// What happened to a check
#[derive(Debug)]
pub enum CheckOutcome {
    /// The page answered 2xx and the check was stored
    Recorded(UrlCheck),
    /// The fetch failed; nothing was stored
    Failed(FetchError),
}

/// Run one check of `url`.
///
/// Fetch and insert run one after the other. Fetch failures are an outcome,
/// not an error; only store failures return `Err`.
pub async fn run_check(url: &Url, deps: &ServerDeps) -> Result<CheckOutcome> {
    let page = match deps.page_fetcher.fetch(&url.name).await {
        Ok(page) => page,
        Err(error) => {
            warn!(url_id = %url.id, name = %url.name, error = %error, "Url check failed");
            return Ok(CheckOutcome::Failed(error));
        }
    };

    let metadata = extract_page_metadata(&page.body);

    let check = UrlCheck::create(
        NewUrlCheck {
            url_id: url.id,
            status_code: i32::from(page.status_code),
            h1: metadata.h1,
            title: metadata.title,
            description: metadata.description,
        },
        &deps.db_pool,
    )
    .await?;

    info!(
        url_id = %url.id,
        check_id = %check.id,
        status_code = page.status_code,
        "Url check recorded"
    );

    Ok(CheckOutcome::Recorded(check))
}
