//! Filename generation and post-download extension correction.

use crate::extension::{
    is_placeholder_extension, is_zip_container_extension, ExtensionInput, ExtensionResolver,
};
use crate::http::{HttpResponse, ResponseHead};
use crate::url_model::{
    parse_content_disposition_filename, sanitize_filename, split_suffix, url_stem,
    DEFAULT_MAX_FILENAME_LEN,
};

/// Leading body bytes handed to the router for signature sniffing.
pub const CONTENT_SAMPLE_LEN: usize = 512;

/// Stem used when neither context nor URL yields one.
pub const DEFAULT_STEM: &str = "download";

/// First [`CONTENT_SAMPLE_LEN`] bytes of `body`.
pub fn content_sample(body: &[u8]) -> &[u8] {
    &body[..body.len().min(CONTENT_SAMPLE_LEN)]
}

/// Picks a filename for `url`.
///
/// A `Content-Disposition` filename on `response` is returned verbatim.
/// Otherwise the stem comes from the sanitized `context`, else the sanitized
/// URL stem, else `"download"`, and the resolver's extension is appended
/// unless the stem already ends with it.
pub fn generate_filename(
    resolver: &ExtensionResolver,
    url: &str,
    context: Option<&str>,
    response: Option<&HttpResponse>,
    explicit_extension: Option<&str>,
) -> String {
    if let Some(name) = response
        .and_then(|r| r.head.headers.content_disposition())
        .and_then(parse_content_disposition_filename)
    {
        return name;
    }

    let stem = context
        .map(|c| sanitize_filename(c, DEFAULT_MAX_FILENAME_LEN))
        .filter(|s| !s.is_empty())
        .or_else(|| {
            url_stem(url)
                .map(|s| sanitize_filename(&s, DEFAULT_MAX_FILENAME_LEN))
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_STEM.to_string());

    let input = ExtensionInput {
        url,
        content_type: response.map(|r| r.content_type().unwrap_or_default()),
        content: response.map(|r| content_sample(&r.body)).unwrap_or_default(),
        explicit_extension,
    };
    let decision = resolver.resolve(&input);
    append_extension(stem, &decision.extension)
}

fn append_extension(stem: String, extension: &str) -> String {
    if ends_with_ignore_case(&stem, extension) {
        stem
    } else {
        stem + extension
    }
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Re-checks `filename` against the real response once the first bytes are
/// in.
///
/// Returns the name to use and, when it changed, a warning. The extension is
/// replaced only if detection finds a different non-placeholder extension
/// and the name was generated or the user-supplied name has no extension or
/// a placeholder one.
pub fn ensure_extension_matches_content(
    resolver: &ExtensionResolver,
    filename: &str,
    url: &str,
    head: Option<&ResponseHead>,
    sample: &[u8],
    user_supplied: bool,
) -> (String, Option<String>) {
    let Some(head) = head else {
        return (filename.to_string(), None);
    };

    let content_type = head.content_type().unwrap_or_default();
    let input = ExtensionInput {
        url,
        content_type: Some(content_type),
        content: content_sample(sample),
        explicit_extension: None,
    };
    let Some(detected) = resolver.detect(&input) else {
        return (filename.to_string(), None);
    };

    let (stem, current) = split_suffix(filename);
    if current.eq_ignore_ascii_case(&detected.extension) {
        return (filename.to_string(), None);
    }
    // Office and EPUB files are zip archives; the magic bytes can't tell them apart.
    if detected.extension == ".zip" && is_zip_container_extension(current) {
        return (filename.to_string(), None);
    }

    let replaceable =
        !user_supplied || current.is_empty() || is_placeholder_extension(current);
    if !replaceable {
        return (filename.to_string(), None);
    }

    let renamed = format!("{stem}{}", detected.extension);
    let shown_type = if content_type.trim().is_empty() {
        "unknown"
    } else {
        content_type
    };
    let warning = format!(
        "Adjusted filename extension to match detected content type ({shown_type}): {filename} -> {renamed}"
    );
    tracing::debug!(from = filename, to = %renamed, "extension corrected");
    (renamed, Some(warning))
}
