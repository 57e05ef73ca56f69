//! Submitted URL validation and normalization.

use std::net::IpAddr;

use thiserror::Error;
use url::{Host, Url};

/// Longest URL accepted from the submission form, in characters.
pub const MAX_URL_LENGTH: usize = 255;

/// Why a submitted URL was rejected.
///
/// The `Display` text is shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UrlValidationError {
    #[error("URL превышает 255 символов")]
    TooLong,

    #[error("Некорректный URL")]
    Malformed,
}

/// Check that `raw` is a length-bounded http(s) URL with a real host.
///
/// Length is checked first, so an over-long string is always `TooLong`.
pub fn validate_url(raw: &str) -> Result<(), UrlValidationError> {
    if raw.chars().count() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    if raw.is_empty() || raw.chars().any(char::is_whitespace) {
        return Err(UrlValidationError::Malformed);
    }

    let url = parse_http_url(raw)?;

    match url.host() {
        Some(Host::Domain(domain)) if is_valid_domain(domain) => Ok(()),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(()),
        _ => Err(UrlValidationError::Malformed),
    }
}

/// Reduce a URL to `scheme://host[:port]`.
///
/// Scheme and host are lowercased, credentials, path, query and fragment are
/// dropped, and the port is kept only when it is not the scheme default.
/// Normalizing an already normalized URL returns it unchanged.
///
/// IDNA hosts are emitted as punycode, which can make the result longer than
/// the input; a result over `MAX_URL_LENGTH` is `TooLong`.
pub fn normalize_url(raw: &str) -> Result<String, UrlValidationError> {
    let url = parse_http_url(raw.trim())?;
    let host = url.host_str().ok_or(UrlValidationError::Malformed)?;

    let mut normalized = format!("{}://{}", url.scheme(), host);
    // Url::port() is None for the scheme's default port
    if let Some(port) = url.port() {
        normalized.push(':');
        normalized.push_str(&port.to_string());
    }

    if normalized.chars().count() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    Ok(normalized)
}

fn parse_http_url(raw: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(raw).map_err(|_| UrlValidationError::Malformed)?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(UrlValidationError::Malformed),
    }
}

/// A domain needs at least two labels and an alphabetic (or punycode) TLD.
fn is_valid_domain(domain: &str) -> bool {
    // Bracket-less IPv6 never reaches here; dotted quads are parsed as Ipv4
    if domain.parse::<IpAddr>().is_ok() {
        return true;
    }

    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }

    let tld = labels[labels.len() - 1];
    tld.starts_with("xn--") || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
