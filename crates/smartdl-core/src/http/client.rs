//! Client seam used by the download engine.

use std::io;

use super::{HttpError, HttpResponse, ResponseHead};

/// Receives a streamed response body.
pub trait BodySink {
    /// Called for every body chunk in order. `head` is the final response's
    /// status line and headers.
    fn write_chunk(&mut self, head: &ResponseHead, chunk: &[u8]) -> io::Result<()>;

    /// Called once after the last chunk, including for empty bodies.
    fn finish(&mut self, head: &ResponseHead) -> io::Result<()>;
}

/// Blocking HTTP client. All requests follow redirects.
pub trait HttpClient {
    /// HEAD request. Error statuses are returned as responses.
    fn head(&self, url: &str) -> Result<HttpResponse, HttpError>;

    /// GET that keeps at most `limit` body bytes and stops reading after
    /// that. Error statuses are returned as responses.
    fn get_prefix(&self, url: &str, limit: usize) -> Result<HttpResponse, HttpError>;

    /// Streamed GET into `sink`. An error status is [`HttpError::Status`] and
    /// no body is delivered.
    fn get_stream(&self, url: &str, sink: &mut dyn BodySink) -> Result<ResponseHead, HttpError>;
}
