//! String-level URL rewrites applied before any network call.
//!
//! Hosting platforms that render files inside an HTML "blob" viewer get
//! rewritten to the URL that serves the raw bytes. Rules are independent of
//! each other and a no-op when their markers are absent.

/// One host-specific rewrite: when the URL contains both markers, every
/// `(from, to)` replacement is applied in order.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    pub name: &'static str,
    pub host_marker: &'static str,
    pub path_marker: &'static str,
    pub replacements: &'static [(&'static str, &'static str)],
}

impl RewriteRule {
    pub fn matches(&self, url: &str) -> bool {
        url.contains(self.host_marker) && url.contains(self.path_marker)
    }

    pub fn apply(&self, url: &str) -> String {
        if !self.matches(url) {
            return url.to_string();
        }
        self.replacements
            .iter()
            .fold(url.to_string(), |acc, (from, to)| acc.replace(from, to))
    }
}

/// Built-in host rules. Add a platform by appending an entry.
pub const HOST_REWRITES: &[RewriteRule] = &[
    RewriteRule {
        name: "github-blob",
        host_marker: "github.com",
        path_marker: "/blob/",
        replacements: &[("github.com", "raw.githubusercontent.com"), ("/blob/", "/")],
    },
    RewriteRule {
        name: "huggingface-blob",
        host_marker: "huggingface.co",
        path_marker: "/blob/",
        replacements: &[("/blob/", "/resolve/")],
    },
];

/// Tracking parameters removed wherever they appear in the query.
const TRACKING_PARAMS: &[&str] = &["utm_source=chatgpt.com"];

/// Removes known tracking parameters, whether first (`?`) or later (`&`).
/// A leading parameter hands its `?` to whatever follows it.
pub fn strip_tracking_params(url: &str) -> String {
    let mut out = url.to_string();
    for param in TRACKING_PARAMS {
        out = out.replace(&format!("?{param}&"), "?");
        out = out.replace(&format!("?{param}"), "");
        out = out.replace(&format!("&{param}"), "");
    }
    out
}

/// Applies every host rule in [`HOST_REWRITES`].
pub fn rewrite_known_hosts(url: &str) -> String {
    HOST_REWRITES.iter().fold(url.to_string(), |acc, rule| {
        let next = rule.apply(&acc);
        if next != acc {
            tracing::debug!(rule = rule.name, from = %acc, to = %next, "rewrote url");
        }
        next
    })
}

/// Full normalization: tracking params stripped, then host rewrites.
pub fn normalize_url(url: &str) -> String {
    rewrite_known_hosts(&strip_tracking_params(url))
}
