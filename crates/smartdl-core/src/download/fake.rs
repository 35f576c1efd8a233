//! In-memory [`HttpClient`] for engine tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::http::{BodySink, HttpClient, HttpError, HttpResponse, ResponseHead, ResponseHeaders};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeRoute {
    status: u32,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    head_status: Option<u32>,
    head_fails: bool,
    prefix_fails: bool,
}

impl FakeRoute {
    pub(crate) fn ok(content_type: &str, body: &[u8]) -> Self {
        Self {
            status: 200,
            headers: vec![
                ("Content-Type".to_string(), content_type.to_string()),
                ("Content-Length".to_string(), body.len().to_string()),
            ],
            body: body.to_vec(),
            ..Self::default()
        }
    }

    pub(crate) fn status(mut self, status: u32) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// HEAD answers with `status` while GET keeps the route's status.
    pub(crate) fn head_status(mut self, status: u32) -> Self {
        self.head_status = Some(status);
        self
    }

    pub(crate) fn head_fails(mut self) -> Self {
        self.head_fails = true;
        self
    }

    pub(crate) fn prefix_fails(mut self) -> Self {
        self.prefix_fails = true;
        self
    }

    fn head(&self, url: &str, status: u32) -> ResponseHead {
        ResponseHead {
            status,
            final_url: url.to_string(),
            headers: self.headers.iter().cloned().collect::<ResponseHeaders>(),
        }
    }
}

/// Serves registered routes; unknown URLs fail like an unreachable host.
#[derive(Debug, Default)]
pub(crate) struct FakeClient {
    routes: HashMap<String, FakeRoute>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl FakeClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(mut self, url: &str, route: FakeRoute) -> Self {
        self.routes.insert(url.to_string(), route);
        self
    }

    /// Shared log of `"METHOD url"` lines, readable after the client moves.
    pub(crate) fn calls(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.calls)
    }

    fn lookup(&self, method: &str, url: &str) -> Result<&FakeRoute, HttpError> {
        self.calls.borrow_mut().push(format!("{method} {url}"));
        self.routes
            .get(url)
            .ok_or_else(|| HttpError::Transport(format!("could not resolve host for {url}")))
    }
}

impl HttpClient for FakeClient {
    fn head(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let route = self.lookup("HEAD", url)?;
        if route.head_fails {
            return Err(HttpError::Transport("operation timed out".to_string()));
        }
        Ok(HttpResponse {
            head: route.head(url, route.head_status.unwrap_or(route.status)),
            body: Vec::new(),
        })
    }

    fn get_prefix(&self, url: &str, limit: usize) -> Result<HttpResponse, HttpError> {
        let route = self.lookup("PREFIX", url)?;
        if route.prefix_fails {
            return Err(HttpError::Transport("connection reset".to_string()));
        }
        Ok(HttpResponse {
            head: route.head(url, route.status),
            body: route.body[..route.body.len().min(limit)].to_vec(),
        })
    }

    fn get_stream(&self, url: &str, sink: &mut dyn BodySink) -> Result<ResponseHead, HttpError> {
        let route = self.lookup("GET", url)?;
        if route.status >= 400 {
            return Err(HttpError::Status {
                method: "GET",
                url: url.to_string(),
                code: route.status,
            });
        }
        let head = route.head(url, route.status);
        for chunk in route.body.chunks(5) {
            sink.write_chunk(&head, chunk).map_err(HttpError::Sink)?;
        }
        sink.finish(&head).map_err(HttpError::Sink)?;
        Ok(head)
    }
}
