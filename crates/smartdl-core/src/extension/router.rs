//! Pluggable extension routing.
//!
//! A router gets a look at the URL, a content sample, the content type and
//! any explicit hint, and may claim an extension before the generic
//! content-type and URL-suffix rules run.

use std::collections::BTreeSet;

use super::{extension_for_content_type, normalize_extension};
use crate::url_model::url_suffix;

/// Everything a router may inspect.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteRequest<'a> {
    pub url: &'a str,
    pub content: &'a [u8],
    pub content_type: &'a str,
    pub explicit_extension: Option<&'a str>,
}

/// Strategy that may claim an extension for a download.
///
/// Returning `None` defers to the content-type and URL-suffix rules.
/// Placeholder answers are discarded by the resolver.
pub trait ExtensionRouter {
    fn route(&self, request: &RouteRequest<'_>) -> Option<String>;
}

impl<F> ExtensionRouter for F
where
    F: Fn(&RouteRequest<'_>) -> Option<String>,
{
    fn route(&self, request: &RouteRequest<'_>) -> Option<String> {
        self(request)
    }
}

/// URL suffixes trusted over the server's content type by default.
pub const DEFAULT_PRIORITY_EXTENSIONS: [&str; 7] =
    [".pdf", ".md", ".ipynb", ".docx", ".xlsx", ".pptx", ".epub"];

/// Built-in router: explicit hint, then priority URL suffixes, then magic
/// bytes in the content sample.
///
/// Priority suffixes cover servers that label documents as `text/html` or
/// `text/plain` (arXiv PDFs, raw Markdown).
#[derive(Debug, Clone)]
pub struct SignatureRouter {
    priority_extensions: BTreeSet<String>,
}

impl Default for SignatureRouter {
    fn default() -> Self {
        Self::with_priority_extensions(DEFAULT_PRIORITY_EXTENSIONS)
    }
}

impl SignatureRouter {
    pub fn with_priority_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let priority_extensions = extensions
            .into_iter()
            .filter_map(|e| normalize_extension(Some(e.as_ref())))
            .map(|e| e.to_ascii_lowercase())
            .collect();
        Self {
            priority_extensions,
        }
    }

    pub fn priority_extensions(&self) -> impl Iterator<Item = &str> {
        self.priority_extensions.iter().map(String::as_str)
    }
}

impl ExtensionRouter for SignatureRouter {
    fn route(&self, request: &RouteRequest<'_>) -> Option<String> {
        if let Some(explicit) = normalize_extension(request.explicit_extension) {
            return Some(explicit);
        }

        let suffix = url_suffix(request.url);
        if self
            .priority_extensions
            .contains(&suffix.to_ascii_lowercase())
        {
            return Some(suffix);
        }

        let sniffed = sniff_signature(request.content)?;
        if sniffed == ".zip" && is_zip_container(request.content_type) {
            return None;
        }
        Some(sniffed.to_string())
    }
}

/// Formats stored as zip archives; their declared type beats the zip magic.
const ZIP_CONTAINER_EXTENSIONS: [&str; 4] = [".docx", ".xlsx", ".pptx", ".epub"];

fn is_zip_container(content_type: &str) -> bool {
    extension_for_content_type(content_type).is_some_and(is_zip_container_extension)
}

/// True for `.docx`, `.xlsx`, `.pptx` and `.epub` in any case.
pub fn is_zip_container_extension(ext: &str) -> bool {
    ZIP_CONTAINER_EXTENSIONS
        .iter()
        .any(|container| container.eq_ignore_ascii_case(ext))
}

/// Identifies common formats from their leading bytes.
pub fn sniff_signature(content: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"%PDF-", ".pdf"),
        (b"PK\x03\x04", ".zip"),
        (b"\x1f\x8b", ".gz"),
        (b"BZh", ".bz2"),
        (b"\xfd7zXZ\x00", ".xz"),
        (b"7z\xbc\xaf\x27\x1c", ".7z"),
        (b"\x89PNG\r\n\x1a\n", ".png"),
        (b"\xff\xd8\xff", ".jpg"),
        (b"GIF87a", ".gif"),
        (b"GIF89a", ".gif"),
        (b"SQLite format 3\x00", ".sqlite"),
        (b"PAR1", ".parquet"),
    ];

    if let Some((_, ext)) = SIGNATURES.iter().find(|(magic, _)| content.starts_with(magic)) {
        return Some(*ext);
    }
    if content.len() >= 12 && &content[..4] == b"RIFF" && &content[8..12] == b"WEBP" {
        return Some(".webp");
    }
    if content.len() >= 262 && &content[257..262] == b"ustar" {
        return Some(".tar");
    }
    if looks_like_html(content) {
        return Some(".html");
    }
    None
}

fn looks_like_html(content: &[u8]) -> bool {
    let head = &content[..content.len().min(64)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start().to_ascii_lowercase();
    text.starts_with("<!doctype html") || text.starts_with("<html")
}
