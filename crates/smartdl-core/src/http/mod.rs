//! HTTP collaborator: HEAD probes, bounded GETs, and streamed downloads.
//!
//! The engine talks to [`HttpClient`]; [`CurlClient`] is the libcurl-backed
//! implementation. Transport failures are errors, while HTTP error statuses
//! on probes come back as ordinary responses so callers can inspect them.

mod client;
mod curl_client;
mod error;
mod parse;

pub use client::{BodySink, HttpClient};
pub use curl_client::{ClientOptions, CurlClient};
pub use error::HttpError;
pub use parse::parse_header_lines;

/// Response headers in arrival order with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders(Vec<(String, String)>);

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// First value for `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("content-type")
    }

    pub fn content_length(&self) -> Option<u64> {
        self.get("content-length")?.trim().parse().ok()
    }

    pub fn content_disposition(&self) -> Option<&str> {
        self.get("content-disposition")
    }
}

impl<K, V> FromIterator<(K, V)> for ResponseHeaders
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Status line and headers of the final response after redirects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u32,
    /// Effective URL after redirects.
    pub final_url: String,
    pub headers: ResponseHeaders,
}

impl ResponseHead {
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.content_type()
    }
}

/// A response with whatever part of the body was read (empty for HEAD).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub head: ResponseHead,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn content_type(&self) -> Option<&str> {
        self.head.content_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let headers: ResponseHeaders = [
            ("Content-Type", "application/pdf"),
            ("content-length", " 2048 "),
            ("Content-Disposition", "attachment; filename=a.pdf"),
        ]
        .into_iter()
        .collect();
        assert_eq!(headers.get("CONTENT-TYPE"), Some("application/pdf"));
        assert_eq!(headers.content_length(), Some(2048));
        assert_eq!(
            headers.content_disposition(),
            Some("attachment; filename=a.pdf")
        );
        assert_eq!(headers.get("etag"), None);
    }

    #[test]
    fn first_value_wins() {
        let mut headers = ResponseHeaders::new();
        headers.push("Content-Type", "text/html");
        headers.push("content-type", "text/plain");
        assert_eq!(headers.content_type(), Some("text/html"));
    }

    #[test]
    fn error_status() {
        let head = ResponseHead {
            status: 404,
            ..ResponseHead::default()
        };
        assert!(head.is_error());
        assert!(!ResponseHead {
            status: 200,
            ..ResponseHead::default()
        }
        .is_error());
    }
}
