//! Helpers for driving the router in-process.

use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

/// A response reduced to what the tests look at
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// `name=value` of the flash cookie this response sets, if any
    pub fn flash_cookie(&self) -> Option<String> {
        let cookie = self.set_cookie.as_deref()?;
        let pair = cookie.split(';').next()?.trim();
        (pair.starts_with("flash=") && pair.len() > "flash=".len()).then(|| pair.to_string())
    }
}

pub async fn get(app: &Router, path: &str, cookie: Option<&str>) -> TestResponse {
    let mut request = Request::builder().method("GET").uri(path);
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }
    send(app, request.body(Body::empty()).unwrap()).await
}

pub async fn post_form(app: &Router, path: &str, form: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

/// Follow a redirect the way a browser would, sending the flash cookie along
pub async fn follow(app: &Router, response: &TestResponse) -> TestResponse {
    let location = response.location.as_deref().expect("response is not a redirect");
    get(app, location, response.flash_cookie().as_deref()).await
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let header = |name: axum::http::HeaderName| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let location = header(LOCATION);
    let set_cookie = header(SET_COOKIE);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        location,
        set_cookie,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}
