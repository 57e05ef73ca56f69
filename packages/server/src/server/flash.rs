//! One-shot flash notices carried in a signed cookie.
//!
//! A redirecting handler attaches a notice; the next rendered page reads it,
//! shows it once and clears the cookie. The cookie value is an HS256 JWT so a
//! client cannot forge notices, and it expires after a minute.

use anyhow::Result;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Response};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cookie holding the pending notice
pub const FLASH_COOKIE: &str = "flash";

/// Seconds a notice stays readable
const FLASH_TTL_SECONDS: i64 = 60;

const ISSUER: &str = "page-analyzer/flash";

/// Notice category, rendered as the Bootstrap alert class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Info,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Info,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Danger,
            message: message.into(),
        }
    }
}

/// JWT claims - the notice plus expiry
#[derive(Debug, Serialize, Deserialize)]
struct FlashClaims {
    category: FlashCategory,
    message: String,
    exp: i64,
    iat: i64,
    iss: String,
}

/// Signs and verifies flash cookies
#[derive(Clone)]
pub struct FlashSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl FlashSigner {
    /// Create a signer from the application secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a notice into a token
    pub fn sign(&self, flash: &Flash) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::seconds(FLASH_TTL_SECONDS);

        let claims = FlashClaims {
            category: flash.category,
            message: flash.message.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: ISSUER.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify a token; `None` if forged, expired or garbage
    pub fn verify(&self, token: &str) -> Option<Flash> {
        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);
        validation.leeway = 0;

        match decode::<FlashClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(Flash {
                category: data.claims.category,
                message: data.claims.message,
            }),
            Err(e) => {
                debug!(error = %e, "Discarding invalid flash cookie");
                None
            }
        }
    }

    /// `Set-Cookie` value carrying `flash` to the next page
    pub fn set_cookie(&self, flash: &Flash) -> Result<HeaderValue> {
        let token = self.sign(flash)?;
        let cookie = format!(
            "{FLASH_COOKIE}={token}; Path=/; Max-Age={FLASH_TTL_SECONDS}; HttpOnly; SameSite=Lax"
        );
        Ok(HeaderValue::from_str(&cookie)?)
    }

    /// Read the pending notice (if any) from request headers
    pub fn take(&self, headers: &HeaderMap) -> IncomingFlash {
        match flash_cookie_value(headers) {
            Some(token) => IncomingFlash {
                flash: self.verify(token),
                had_cookie: true,
            },
            None => IncomingFlash {
                flash: None,
                had_cookie: false,
            },
        }
    }
}

/// `Set-Cookie` value that removes the flash cookie
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

fn flash_cookie_value(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == FLASH_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// The notice read for the page being rendered
#[derive(Debug)]
pub struct IncomingFlash {
    flash: Option<Flash>,
    had_cookie: bool,
}

impl IncomingFlash {
    /// Notices to render (zero or one)
    pub fn messages(&self) -> Vec<Flash> {
        self.flash.iter().cloned().collect()
    }

    /// Wrap rendered HTML, clearing the cookie if the request carried one
    pub fn into_page(self, html: String) -> Response {
        let mut response = Html(html).into_response();
        if self.had_cookie {
            response.headers_mut().append(SET_COOKIE, clear_cookie());
        }
        response
    }
}
