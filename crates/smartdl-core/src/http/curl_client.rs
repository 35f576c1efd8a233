//! libcurl-backed [`HttpClient`].
//!
//! One `Easy` handle is reused for every request so connections to the same
//! host are kept alive between the probe, the filename HEAD and the download.
//! The handle sits in a `RefCell`: a client serves one caller at a time.

use std::cell::RefCell;
use std::io;
use std::time::Duration;

use curl::easy::Easy;

use super::client::{BodySink, HttpClient};
use super::parse::parse_header_lines;
use super::{HttpError, HttpResponse, ResponseHead};

/// Minimum transfer rate (bytes/sec) below which a streamed download is
/// considered stalled.
const LOW_SPEED_LIMIT: u32 = 1024;

/// Request settings shared by every call of one client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub user_agent: String,
    /// Whole-request timeout for HEAD and prefix GETs. Streamed GETs have no
    /// overall deadline: the same duration is the stall window, and a body
    /// slower than `LOW_SPEED_LIMIT` for that long is aborted.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_redirects: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: "DownloadAgent/1.0".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(15),
            max_redirects: 5,
        }
    }
}

#[derive(Debug)]
pub struct CurlClient {
    easy: RefCell<Easy>,
    options: ClientOptions,
}

impl Default for CurlClient {
    fn default() -> Self {
        Self::new(ClientOptions::default())
    }
}

impl CurlClient {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            easy: RefCell::new(Easy::new()),
            options,
        }
    }

    /// Resets the handle (keeping its connection cache) and applies options.
    fn prepare(&self, easy: &mut Easy, url: &str, streaming: bool) -> Result<(), HttpError> {
        easy.reset();
        easy.url(url)?;
        easy.useragent(&self.options.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.options.max_redirects)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        if streaming {
            // Large bodies may legitimately take longer than the probe timeout.
            easy.low_speed_limit(LOW_SPEED_LIMIT)?;
            easy.low_speed_time(self.options.timeout)?;
        } else {
            easy.timeout(self.options.timeout)?;
        }
        Ok(())
    }

    fn read_head(easy: &mut Easy, url: &str, lines: &[String]) -> Result<ResponseHead, HttpError> {
        let (parsed_status, headers) = parse_header_lines(lines);
        let status = match easy.response_code()? {
            0 => parsed_status,
            code => code,
        };
        let final_url = easy.effective_url()?.unwrap_or(url).to_string();
        Ok(ResponseHead {
            status,
            final_url,
            headers,
        })
    }
}

fn header_line(data: &[u8]) -> String {
    String::from_utf8_lossy(data).trim_end().to_string()
}

impl HttpClient for CurlClient {
    fn head(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let mut easy = self.easy.borrow_mut();
        self.prepare(&mut easy, url, false)?;
        easy.nobody(true)?;

        let mut lines = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                lines.push(header_line(data));
                true
            })?;
            transfer.perform()?;
        }

        let head = Self::read_head(&mut easy, url, &lines)?;
        tracing::debug!(url, status = head.status, "HEAD");
        Ok(HttpResponse {
            head,
            body: Vec::new(),
        })
    }

    fn get_prefix(&self, url: &str, limit: usize) -> Result<HttpResponse, HttpError> {
        let mut easy = self.easy.borrow_mut();
        self.prepare(&mut easy, url, false)?;

        let mut lines = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        let mut truncated = false;
        let outcome = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                lines.push(header_line(data));
                true
            })?;
            transfer.write_function(|data| {
                let room = limit.saturating_sub(body.len());
                body.extend_from_slice(&data[..data.len().min(room)]);
                if body.len() >= limit {
                    // Short write makes curl abort the transfer.
                    truncated = true;
                    return Ok(0);
                }
                Ok(data.len())
            })?;
            transfer.perform()
        };

        match outcome {
            Ok(()) => {}
            Err(e) if truncated && e.is_write_error() => {}
            Err(e) => return Err(e.into()),
        }

        let head = Self::read_head(&mut easy, url, &lines)?;
        tracing::debug!(url, status = head.status, bytes = body.len(), truncated, "GET prefix");
        Ok(HttpResponse { head, body })
    }

    fn get_stream(&self, url: &str, sink: &mut dyn BodySink) -> Result<ResponseHead, HttpError> {
        let mut easy = self.easy.borrow_mut();
        self.prepare(&mut easy, url, true)?;
        easy.fail_on_error(true)?;

        let lines = RefCell::new(Vec::new());
        let mut current: Option<ResponseHead> = None;
        let mut sink_error: Option<io::Error> = None;
        let outcome = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                lines.borrow_mut().push(header_line(data));
                true
            })?;
            transfer.write_function(|data| {
                let head = current.get_or_insert_with(|| {
                    let (status, headers) = parse_header_lines(&lines.borrow());
                    ResponseHead {
                        status,
                        final_url: url.to_string(),
                        headers,
                    }
                });
                match sink.write_chunk(head, data) {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        sink_error = Some(e);
                        Ok(0)
                    }
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = sink_error {
            return Err(HttpError::Sink(e));
        }
        if let Err(e) = outcome {
            if e.is_http_returned_error() {
                return Err(HttpError::Status {
                    method: "GET",
                    url: url.to_string(),
                    code: easy.response_code()?,
                });
            }
            return Err(e.into());
        }

        let head = Self::read_head(&mut easy, url, &lines.borrow())?;
        if head.is_error() {
            return Err(HttpError::Status {
                method: "GET",
                url: url.to_string(),
                code: head.status,
            });
        }
        sink.finish(&head).map_err(HttpError::Sink)?;
        tracing::debug!(url, status = head.status, "GET stream complete");
        Ok(head)
    }
}
