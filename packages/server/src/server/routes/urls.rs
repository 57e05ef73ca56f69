//! Url routes: list, detail, submission and checks.

use axum::{
    body::Body,
    extract::{Extension, Path},
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, StatusCode,
    },
    response::Response,
    Form,
};
use minijinja::context;
use serde::Deserialize;

use crate::common::UrlId;
use crate::domains::urls::{
    run_check, submit_url, CheckOutcome, SubmitOutcome, Url, UrlCheck, UrlWithLatestCheck,
};
use crate::server::app::AppState;
use crate::server::error::AppError;
use crate::server::flash::Flash;

const URL_ADDED: &str = "Страница успешно добавлена";
const URL_EXISTS: &str = "Страница уже существует";
const CHECK_RECORDED: &str = "Страница успешно проверена";
const CHECK_FAILED: &str = "Произошла ошибка при проверке";

#[derive(Debug, Deserialize)]
pub struct SubmitUrlForm {
    #[serde(default)]
    pub url: String,
}

/// GET /urls - every url with its latest check
pub async fn list_urls_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let urls = UrlWithLatestCheck::find_all(&state.deps.db_pool).await?;
    let incoming = state.flash.take(&headers);

    let html = state.templates.render(
        "urls.html",
        context! {
            messages => incoming.messages(),
            urls => urls,
        },
    )?;

    Ok(incoming.into_page(html))
}

/// GET /urls/:id - url details and check history
pub async fn show_url_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let url = find_url(&state, &id).await?;
    let checks = UrlCheck::find_by_url_id(url.id, &state.deps.db_pool).await?;
    let incoming = state.flash.take(&headers);

    let html = state.templates.render(
        "url.html",
        context! {
            messages => incoming.messages(),
            url => url,
            checks => checks,
        },
    )?;

    Ok(incoming.into_page(html))
}

/// POST /urls - submit a site
pub async fn create_url_handler(
    Extension(state): Extension<AppState>,
    Form(form): Form<SubmitUrlForm>,
) -> Result<Response, AppError> {
    match submit_url(&form.url, &state.deps.db_pool).await? {
        SubmitOutcome::Invalid(error) => {
            redirect_with_flash(&state, "/", Flash::danger(error.to_string()))
        }
        SubmitOutcome::Existing(url) => {
            redirect_with_flash(&state, &url_path(url.id), Flash::info(URL_EXISTS))
        }
        SubmitOutcome::Created(url) => {
            redirect_with_flash(&state, &url_path(url.id), Flash::success(URL_ADDED))
        }
    }
}

/// POST /urls/:id/checks - fetch the page and record a check
pub async fn create_check_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let url = find_url(&state, &id).await?;
    let location = url_path(url.id);

    match run_check(&url, &state.deps).await? {
        CheckOutcome::Recorded(_) => {
            redirect_with_flash(&state, &location, Flash::success(CHECK_RECORDED))
        }
        CheckOutcome::Failed(_) => {
            redirect_with_flash(&state, &location, Flash::danger(CHECK_FAILED))
        }
    }
}

/// Look up a url by its path segment; non-numeric ids are simply unknown
async fn find_url(state: &AppState, raw_id: &str) -> Result<Url, AppError> {
    let id = UrlId::parse(raw_id).map_err(|_| AppError::NotFound)?;

    Url::find_by_id(id, &state.deps.db_pool)
        .await?
        .ok_or(AppError::NotFound)
}

fn url_path(id: UrlId) -> String {
    format!("/urls/{id}")
}

/// 302 to `location`, carrying `flash` to the next page
fn redirect_with_flash(state: &AppState, location: &str, flash: Flash) -> Result<Response, AppError> {
    let cookie = state.flash.set_cookie(&flash)?;

    Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, location)
        .header(SET_COOKIE, cookie)
        .body(Body::empty())
        .map_err(|e| AppError::Internal(e.into()))
}
