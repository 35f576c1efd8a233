//! HTTP client errors.

use std::io;

/// Failure of a single HTTP exchange.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// libcurl reported a transport failure (DNS, connect, timeout, TLS...).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// Transport failure reported by a non-curl client.
    #[error("{0}")]
    Transport(String),
    /// The server answered with an error status on a download.
    #[error("{method} {url} returned HTTP {code}")]
    Status {
        method: &'static str,
        url: String,
        code: u32,
    },
    /// The body sink rejected a chunk (e.g. disk full).
    #[error("writing response body: {0}")]
    Sink(#[source] io::Error),
}
