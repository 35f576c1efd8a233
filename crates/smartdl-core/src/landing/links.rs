//! Scores anchors on a landing page and picks the likeliest download link.

use scraper::Selector;
use url::Url;

use super::parse_body;
use crate::http::HttpResponse;

/// A match rule tested against the lower-cased absolute URL and link text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPattern {
    Suffix(&'static str),
    Contains(&'static str),
}

impl LinkPattern {
    fn matches(&self, haystack: &str) -> bool {
        match self {
            LinkPattern::Suffix(s) => haystack.ends_with(s),
            LinkPattern::Contains(s) => haystack.contains(s),
        }
    }
}

/// Pattern weights. A pattern contributes once per link when it matches
/// either the URL or the visible text.
pub const LINK_PATTERNS: [(LinkPattern, u32); 8] = [
    (LinkPattern::Suffix(".pdf"), 10),
    (LinkPattern::Contains("download"), 8),
    (LinkPattern::Suffix(".zip"), 7),
    (LinkPattern::Suffix(".tar.gz"), 7),
    (LinkPattern::Suffix(".csv"), 6),
    (LinkPattern::Suffix(".json"), 6),
    (LinkPattern::Contains("/raw/"), 5),
    (LinkPattern::Contains("/blob/"), 3),
];

/// A scored anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    pub url: String,
    pub score: u32,
}

fn score_link(url: &str, text: &str) -> u32 {
    LINK_PATTERNS
        .iter()
        .filter(|(pattern, _)| pattern.matches(url) || pattern.matches(text))
        .map(|(_, points)| points)
        .sum()
}

/// Every `<a href>` with a positive score, best first. Equal scores keep
/// document order.
pub fn rank_download_links(base_url: &str, response: &HttpResponse) -> Vec<LinkCandidate> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    let base = Url::parse(base_url).ok();
    let document = parse_body(response);

    let mut candidates: Vec<LinkCandidate> = document
        .select(&selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.trim();
            let absolute = base
                .as_ref()
                .and_then(|b| b.join(href).ok())
                .map(|u| u.to_string())
                .unwrap_or_else(|| href.to_string());
            let text = anchor.text().collect::<String>().trim().to_lowercase();
            let score = score_link(&absolute.to_lowercase(), &text);
            (score > 0).then_some(LinkCandidate {
                url: absolute,
                score,
            })
        })
        .collect();

    // Stable: first among equal scores stays first.
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

/// The highest-scoring absolute download URL on the page, if any scores.
pub fn find_download_link(base_url: &str, response: &HttpResponse) -> Option<String> {
    let best = rank_download_links(base_url, response).into_iter().next()?;
    tracing::debug!(url = %best.url, score = best.score, "picked download link");
    Some(best.url)
}
