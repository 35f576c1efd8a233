//! Download orchestration: normalize, resolve landing pages, name, stream.

use anyhow::Context;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use super::filename::{ensure_extension_matches_content, generate_filename, CONTENT_SAMPLE_LEN};
use super::{DownloadError, DownloadMetadata, DownloadRequest, DownloadResult, ResolvedTarget};
use crate::config::SmartdlConfig;
use crate::extension::ExtensionResolver;
use crate::http::{BodySink, CurlClient, HttpClient, HttpError, HttpResponse, ResponseHead};
use crate::landing::{find_download_link, is_likely_landing_page, LANDING_PAGE_MAX_BYTES};
use crate::url_model::{normalize_url, strip_tracking_params};

/// Downloads URLs into a directory, one at a time.
///
/// Holds the HTTP client, the extension resolver and the default target
/// directory. Not `Sync`: share it by giving each thread its own engine.
pub struct DownloadEngine {
    client: Box<dyn HttpClient>,
    resolver: ExtensionResolver,
    default_download_dir: PathBuf,
}

impl DownloadEngine {
    /// libcurl client and signature router configured from `config`.
    pub fn new(config: &SmartdlConfig) -> Self {
        Self::with_client(config, CurlClient::new(config.client_options()))
    }

    /// Engine over a caller-supplied client.
    pub fn with_client<C>(config: &SmartdlConfig, client: C) -> Self
    where
        C: HttpClient + 'static,
    {
        Self {
            client: Box::new(client),
            resolver: ExtensionResolver::with_router(config.router()),
            default_download_dir: config.default_download_dir(),
        }
    }

    pub fn with_resolver(mut self, resolver: ExtensionResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_default_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.default_download_dir = dir.into();
        self
    }

    pub fn default_download_dir(&self) -> &Path {
        &self.default_download_dir
    }

    /// See [`generate_filename`].
    pub fn generate_filename(
        &self,
        url: &str,
        context: Option<&str>,
        response: Option<&HttpResponse>,
        explicit_extension: Option<&str>,
    ) -> String {
        generate_filename(&self.resolver, url, context, response, explicit_extension)
    }

    /// Applies host rewrites, then follows a landing page to its download
    /// link when one is found. Never fails: probe problems become warnings.
    pub fn resolve_download_url(&self, url: &str) -> ResolvedTarget {
        let url = normalize_url(url);
        let mut warnings = Vec::new();

        let probe = match self.probe(&url) {
            Ok(probe) => probe,
            Err(e) => {
                tracing::warn!(url = %url, "probe failed: {}", e);
                warnings.push(format!(
                    "Warning: Could not verify URL ({e}). Will attempt download anyway."
                ));
                return ResolvedTarget {
                    final_url: url,
                    warnings,
                };
            }
        };

        if !is_likely_landing_page(&probe) {
            return ResolvedTarget {
                final_url: url,
                warnings,
            };
        }

        let base = if probe.head.final_url.is_empty() {
            url.as_str()
        } else {
            probe.head.final_url.as_str()
        };
        let final_url = match find_download_link(base, &probe) {
            Some(link) => {
                let link = normalize_url(&link);
                tracing::info!(page = %url, link = %link, "landing page resolved");
                warnings.push(format!("Detected landing page, found download link: {link}"));
                link
            }
            None => {
                tracing::info!(page = %url, "landing page without download link");
                warnings.push(
                    "Warning: This appears to be a landing page, but couldn't find download link. Please verify."
                        .to_string(),
                );
                url
            }
        };

        ResolvedTarget {
            final_url,
            warnings,
        }
    }

    /// HEAD, falling back to a bounded GET when HEAD fails or is refused.
    /// An HTML HEAD answer is re-fetched with a bounded GET so its links can
    /// be inspected.
    fn probe(&self, url: &str) -> Result<HttpResponse, HttpError> {
        match self.client.head(url) {
            Ok(head) if !head.head.is_error() => {
                if !needs_body(&head) {
                    return Ok(head);
                }
                match self.client.get_prefix(url, LANDING_PAGE_MAX_BYTES) {
                    Ok(full) => Ok(full),
                    Err(e) => {
                        tracing::debug!(url, "bounded GET after HEAD failed: {}", e);
                        Ok(head)
                    }
                }
            }
            Ok(head) => {
                tracing::debug!(url, status = head.head.status, "HEAD refused, probing with GET");
                self.client.get_prefix(url, LANDING_PAGE_MAX_BYTES)
            }
            Err(e) => {
                tracing::debug!(url, "HEAD failed, probing with GET: {}", e);
                self.client.get_prefix(url, LANDING_PAGE_MAX_BYTES)
            }
        }
    }

    /// Downloads one URL.
    ///
    /// Warnings from landing-page resolution and extension correction are
    /// collected in the result; only directory creation and the final GET
    /// are fatal.
    pub fn download(&self, request: &DownloadRequest) -> Result<DownloadResult, DownloadError> {
        let url = strip_tracking_params(&request.url);
        let ResolvedTarget {
            final_url,
            mut warnings,
        } = self.resolve_download_url(&url);

        let target_dir = request
            .target_directory
            .clone()
            .unwrap_or_else(|| self.default_download_dir.clone());
        fs::create_dir_all(&target_dir).map_err(|source| DownloadError::CreateDir {
            path: target_dir.clone(),
            source,
        })?;

        let user_filename = request
            .filename_override
            .as_deref()
            .filter(|name| !name.is_empty());
        let filename = match user_filename {
            Some(name) => name.to_string(),
            None => {
                let head = match self.client.head(&final_url) {
                    Ok(r) if !r.head.is_error() => Some(r),
                    Ok(r) => {
                        tracing::debug!(url = %final_url, status = r.head.status, "ignoring HEAD for naming");
                        None
                    }
                    Err(e) => {
                        tracing::debug!(url = %final_url, "HEAD for naming failed: {}", e);
                        None
                    }
                };
                self.generate_filename(&final_url, request.context.as_deref(), head.as_ref(), None)
            }
        };

        tracing::debug!(url = %final_url, filename = %filename, dir = %target_dir.display(), "starting download");
        let mut sink = FileSink::new(
            &self.resolver,
            &target_dir,
            &final_url,
            filename,
            user_filename.is_some(),
        );
        let head = self
            .client
            .get_stream(&final_url, &mut sink)
            .map_err(|source| DownloadError::Transfer {
                url: final_url.clone(),
                source,
            })?;

        let (path, adjusted) = sink.into_outcome();
        warnings.extend(adjusted);
        tracing::info!(url = %final_url, path = %path.display(), "downloaded");

        let metadata = DownloadMetadata {
            content_type: head.content_type().map(str::to_string),
            content_length: head.headers.content_length(),
            final_url: final_url.clone(),
        };
        Ok(DownloadResult {
            path: Some(path),
            url: final_url,
            warnings,
            metadata: Some(metadata),
        })
    }

    /// Downloads `urls` in order. A failing URL yields a failure record and
    /// the batch continues.
    ///
    /// `contexts`, when given, must have one entry per URL; otherwise
    /// nothing is fetched.
    pub fn download_multiple(
        &self,
        urls: &[String],
        contexts: Option<&[String]>,
        download_dir: Option<&Path>,
    ) -> Result<Vec<DownloadResult>, DownloadError> {
        if let Some(contexts) = contexts {
            if contexts.len() != urls.len() {
                return Err(DownloadError::InvalidInput(
                    "contexts must be same length as urls".to_string(),
                ));
            }
        }

        let mut results = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            let request = DownloadRequest {
                url: url.clone(),
                context: contexts.and_then(|c| c.get(i)).cloned(),
                target_directory: download_dir.map(Path::to_path_buf),
                filename_override: None,
            };
            match self.download(&request) {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::warn!(url = %url, "batch item failed: {}", e);
                    results.push(DownloadResult::failed(url, &e));
                }
            }
        }

        let ok = results.iter().filter(|r| r.is_success()).count();
        tracing::info!(total = results.len(), ok, "batch finished");
        Ok(results)
    }
}

/// True when a successful HEAD answer is HTML small enough to be a
/// landing page but carries no body to inspect.
fn needs_body(response: &HttpResponse) -> bool {
    let html = response
        .content_type()
        .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
        .unwrap_or(false);
    let small = response
        .head
        .headers
        .content_length()
        .map_or(true, |len| len < LANDING_PAGE_MAX_BYTES as u64);
    html && small && response.body.is_empty()
}

/// Writes the streamed body to `dir`. The first [`CONTENT_SAMPLE_LEN`]
/// bytes are held back until the filename's extension has been checked
/// against them; only then is the file created.
struct FileSink<'a> {
    resolver: &'a ExtensionResolver,
    dir: &'a Path,
    url: &'a str,
    filename: String,
    user_supplied: bool,
    pending: Vec<u8>,
    file: Option<BufWriter<File>>,
    path: Option<PathBuf>,
    warning: Option<String>,
}

impl<'a> FileSink<'a> {
    fn new(
        resolver: &'a ExtensionResolver,
        dir: &'a Path,
        url: &'a str,
        filename: String,
        user_supplied: bool,
    ) -> Self {
        Self {
            resolver,
            dir,
            url,
            filename,
            user_supplied,
            pending: Vec::with_capacity(CONTENT_SAMPLE_LEN),
            file: None,
            path: None,
            warning: None,
        }
    }

    /// Settles the filename from the buffered sample, creates the file and
    /// writes the sample to it.
    fn open(&mut self, head: &ResponseHead) -> io::Result<()> {
        let (filename, warning) = ensure_extension_matches_content(
            self.resolver,
            &self.filename,
            self.url,
            Some(head),
            &self.pending,
            self.user_supplied,
        );
        // Content-Disposition names are kept verbatim, so they may carry
        // separators or `..`; joining those could land outside `dir`.
        if !is_plain_file_name(&filename) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "refusing to write {filename:?} outside {}",
                    self.dir.display()
                ),
            ));
        }
        let path = self.dir.join(&filename);
        let mut file = BufWriter::new(File::create(&path)?);
        file.write_all(&self.pending)?;
        self.pending = Vec::new();
        self.filename = filename;
        self.warning = warning;
        self.path = Some(path);
        self.file = Some(file);
        Ok(())
    }

    /// Final path and the rename warning, if any.
    fn into_outcome(mut self) -> (PathBuf, Option<String>) {
        let path = self
            .path
            .take()
            .unwrap_or_else(|| self.dir.join(&self.filename));
        (path, self.warning.take())
    }
}

/// A single normal path component: no root, no `..`, no separators.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

impl BodySink for FileSink<'_> {
    fn write_chunk(&mut self, head: &ResponseHead, chunk: &[u8]) -> io::Result<()> {
        if let Some(file) = self.file.as_mut() {
            return file.write_all(chunk);
        }
        self.pending.extend_from_slice(chunk);
        if self.pending.len() >= CONTENT_SAMPLE_LEN {
            self.open(head)?;
        }
        Ok(())
    }

    fn finish(&mut self, head: &ResponseHead) -> io::Result<()> {
        // Short and empty bodies are still pending here.
        if self.file.is_none() {
            self.open(head)?;
        }
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// One-shot download with default settings; returns the saved path.
pub fn download_content(
    url: &str,
    context: Option<&str>,
    download_dir: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let engine = DownloadEngine::new(&SmartdlConfig::default());
    let mut request = DownloadRequest::new(url);
    request.context = context.map(str::to_string);
    request.target_directory = download_dir.map(Path::to_path_buf);
    let result = engine.download(&request)?;
    result.path.context("download produced no file")
}
