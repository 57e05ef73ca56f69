//! Page metadata extraction from fetched HTML.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// Longest value stored for any extracted field, in characters.
pub const MAX_FIELD_LENGTH: usize = 255;

/// Metadata recorded for a single check.
///
/// Missing elements come back as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub h1: String,
    pub description: String,
}

/// Extract title, first h1 and meta description from an HTML document.
///
/// html5ever recovers from any input, so malformed markup never fails; it
/// just yields fewer fields.
pub fn extract_page_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    PageMetadata {
        title: first_text(&document, "title"),
        h1: first_text(&document, "h1"),
        description: meta_description(&document),
    }
}

/// Text content of the first element matching `selector`
fn first_text(document: &Html, selector: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|el| clean(&element_text(el)))
        .unwrap_or_default()
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// `content` of the first `<meta name="description">` that has one
fn meta_description(document: &Html) -> String {
    let Ok(selector) = Selector::parse("meta[name]") else {
        return String::new();
    };

    document
        .select(&selector)
        .filter(|el| {
            el.value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
        })
        .find_map(|el| el.value().attr("content"))
        .map(clean)
        .unwrap_or_default()
}

/// Trim, then cap at `MAX_FIELD_LENGTH` characters
fn clean(value: &str) -> String {
    value.trim().chars().take(MAX_FIELD_LENGTH).collect()
}
