//! Landing-page detection and download-link extraction.
//!
//! A landing page is a small HTML wrapper that links to the real file. Large
//! HTML bodies are treated as the content itself, whatever they contain.

mod links;

pub use links::{find_download_link, rank_download_links, LinkCandidate, LinkPattern, LINK_PATTERNS};

use scraper::{Html, Selector};

use crate::http::HttpResponse;

/// HTML bodies at or above this size are never landing pages.
pub const LANDING_PAGE_MAX_BYTES: usize = 1_000_000;

/// Substrings of link text or href that suggest a download link.
pub const LANDING_KEYWORDS: [&str; 8] = [
    "download",
    "get file",
    "direct link",
    "pdf",
    ".zip",
    ".tar",
    ".csv",
    ".json",
];

/// Parses the response body as HTML.
pub(crate) fn parse_body(response: &HttpResponse) -> Html {
    Html::parse_document(&String::from_utf8_lossy(&response.body))
}

/// True if `response` looks like an HTML wrapper around the real content.
///
/// Requires a `text/html` content type, a body (and declared length) under
/// [`LANDING_PAGE_MAX_BYTES`], and an `<a>` or `<button>` whose visible text
/// or href contains one of [`LANDING_KEYWORDS`].
pub fn is_likely_landing_page(response: &HttpResponse) -> bool {
    let content_type = response.content_type().unwrap_or_default().to_ascii_lowercase();
    if !content_type.contains("text/html") {
        return false;
    }

    let declared = response.head.headers.content_length().unwrap_or(0);
    if response.body.len() >= LANDING_PAGE_MAX_BYTES || declared >= LANDING_PAGE_MAX_BYTES as u64 {
        return false;
    }

    let Ok(selector) = Selector::parse("a, button") else {
        return false;
    };
    let document = parse_body(response);
    document.select(&selector).any(|element| {
        let text = element.text().collect::<String>().to_lowercase();
        let href = element
            .value()
            .attr("href")
            .unwrap_or_default()
            .to_lowercase();
        LANDING_KEYWORDS
            .iter()
            .any(|keyword| text.contains(keyword) || href.contains(keyword))
    })
}
