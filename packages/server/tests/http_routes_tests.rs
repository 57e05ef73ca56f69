mod common;

use axum::http::StatusCode;
use common::*;
use std::time::Duration;
use page_analyzer_core::domains::urls::{Url, UrlCheck};
use page_analyzer_core::kernel::MockPageFetcher;
use test_context::test_context;

fn form_for(raw: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("url", raw)
        .finish()
}

/// Id at the end of a `/urls/{id}` location
fn id_from_location(location: &str) -> i64 {
    location
        .strip_prefix("/urls/")
        .and_then(|id| id.parse().ok())
        .expect("Expected /urls/{id} location")
}

// =============================================================================
// Tests: pages
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_home_page_renders_form(ctx: &TestHarness) {
    let app = ctx.app(MockPageFetcher::new());

    let response = get(&app, "/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"name="url""#));
    assert!(response.set_cookie.is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_unknown_url_id_is_404(ctx: &TestHarness) {
    let app = ctx.app(MockPageFetcher::new());

    assert_eq!(get(&app, "/urls/9223372036854775807", None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/urls/not-a-number", None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        post_form(&app, "/urls/9223372036854775807/checks", "").await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(get(&app, "/no/such/route", None).await.status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_health_and_static_assets(ctx: &TestHarness) {
    let app = ctx.app(MockPageFetcher::new());

    let health = get(&app, "/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&health.body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"]["status"], "ok");
    assert!(json["database"].get("error").is_none());

    let css = get(&app, "/static/style.css", None).await;
    assert_eq!(css.status, StatusCode::OK);
    assert!(css.body.contains(".alert"));

    assert_eq!(get(&app, "/static/missing.css", None).await.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Tests: submission
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_submit_new_url_redirects_to_detail(ctx: &TestHarness) {
    let app = ctx.app(MockPageFetcher::new());
    let name = unique_site();

    let response = post_form(&app, "/urls", &form_for(&format!("{name}/path?x=1"))).await;

    assert_eq!(response.status, StatusCode::FOUND);
    let location = response.location.clone().expect("Expected redirect");
    let id = id_from_location(&location);
    assert_eq!(count_urls_named(&ctx.db_pool, &name).await.unwrap(), 1);

    let detail = follow(&app, &response).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Страница успешно добавлена"));
    assert!(detail.body.contains("alert-success"));
    assert!(detail.body.contains(&format!("/urls/{id}/checks")));

    // The notice is consumed by the page that showed it
    let cookie = detail.set_cookie.expect("Expected flash cookie to be cleared");
    assert!(cookie.contains("Max-Age=0"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_submit_duplicate_redirects_to_existing(ctx: &TestHarness) {
    let app = ctx.app(MockPageFetcher::new());
    let name = unique_site();

    let first = post_form(&app, "/urls", &form_for(&name)).await;
    let second = post_form(&app, "/urls", &form_for(&format!("{name}/other"))).await;

    assert_eq!(second.status, StatusCode::FOUND);
    assert_eq!(second.location, first.location);
    assert_eq!(count_urls_named(&ctx.db_pool, &name).await.unwrap(), 1);

    let detail = follow(&app, &second).await;
    assert!(detail.body.contains("Страница уже существует"));
    assert!(detail.body.contains("alert-info"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_submit_invalid_url_redirects_home_with_notice(ctx: &TestHarness) {
    let app = ctx.app(MockPageFetcher::new());

    let response = post_form(&app, "/urls", &form_for("wrong url")).await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location.as_deref(), Some("/"));

    let home = follow(&app, &response).await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("Некорректный URL"));
    assert!(home.body.contains("alert-danger"));

    let too_long = format!("https://example.com/{}", "a".repeat(300));
    let response = post_form(&app, "/urls", &form_for(&too_long)).await;
    assert_eq!(response.location.as_deref(), Some("/"));
    let home = follow(&app, &response).await;
    assert!(home.body.contains("URL превышает 255 символов"));

    // Short enough as typed, too long once the host is punycode
    let label = "абвгдежзийклмнопрстуфхцчшщыэюяёъ";
    let expands = format!("https://{}.рф", vec![label; 6].join("."));
    let response = post_form(&app, "/urls", &form_for(&expands)).await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location.as_deref(), Some("/"));
    let home = follow(&app, &response).await;
    assert!(home.body.contains("URL превышает 255 символов"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_submit_without_field_is_malformed(ctx: &TestHarness) {
    let app = ctx.app(MockPageFetcher::new());

    let response = post_form(&app, "/urls", "").await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location.as_deref(), Some("/"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_forged_flash_cookie_is_ignored(ctx: &TestHarness) {
    let app = ctx.app(MockPageFetcher::new());

    let home = get(&app, "/", Some("flash=eyJhbGciOiJIUzI1NiJ9.e30.forged")).await;

    assert_eq!(home.status, StatusCode::OK);
    assert!(!home.body.contains("alert-"));
    assert!(home.set_cookie.unwrap().contains("Max-Age=0"));
}

// =============================================================================
// Tests: checks
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_check_records_page_metadata(ctx: &TestHarness) {
    let url = create_test_url(&ctx.db_pool, &unique_site()).await.unwrap();
    let fetcher = MockPageFetcher::new().with_page(
        200,
        r#"<title>T</title><h1>H</h1><meta name="description" content="D">"#,
    );
    let app = ctx.app(fetcher.clone());

    let path = format!("/urls/{}/checks", url.id);
    let response = post_form(&app, &path, "").await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location, Some(format!("/urls/{}", url.id)));
    assert!(fetcher.was_fetched(&url.name));

    let checks = UrlCheck::find_by_url_id(url.id, &ctx.db_pool).await.unwrap();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0].status_code, Some(200));
    assert_eq!(checks[0].title.as_deref(), Some("T"));
    assert_eq!(checks[0].h1.as_deref(), Some("H"));
    assert_eq!(checks[0].description.as_deref(), Some("D"));

    let detail = follow(&app, &response).await;
    assert!(detail.body.contains("Страница успешно проверена"));
    assert!(detail.body.contains("<td class=\"text-break\">T</td>"));

    let list = get(&app, "/urls", None).await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.body.contains(&format!("href=\"/urls/{}\"", url.id)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_failed_check_shows_notice_and_records_nothing(ctx: &TestHarness) {
    let url = create_test_url(&ctx.db_pool, &unique_site()).await.unwrap();
    let app = ctx.app(MockPageFetcher::new().with_timeout());

    let path = format!("/urls/{}/checks", url.id);
    let response = post_form(&app, &path, "").await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location, Some(format!("/urls/{}", url.id)));
    assert_eq!(count_checks(&ctx.db_pool, url.id).await.unwrap(), 0);

    let detail = follow(&app, &response).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Произошла ошибка при проверке"));
    assert!(detail.body.contains("alert-danger"));

    // Still there, still unchecked
    let stored = Url::find_by_id(url.id, &ctx.db_pool).await.unwrap();
    assert!(stored.is_some());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_hanging_check_hits_request_timeout(ctx: &TestHarness) {
    let url = create_test_url(&ctx.db_pool, &unique_site()).await.unwrap();
    let fetcher = MockPageFetcher::new().with_hang();
    let app = ctx.app_with_timeout(fetcher.clone(), Duration::from_millis(200));

    let path = format!("/urls/{}/checks", url.id);
    let response = post_form(&app, &path, "").await;

    assert_eq!(response.status, StatusCode::REQUEST_TIMEOUT);
    assert!(fetcher.was_fetched(&url.name));
    assert_eq!(count_checks(&ctx.db_pool, url.id).await.unwrap(), 0);
}
