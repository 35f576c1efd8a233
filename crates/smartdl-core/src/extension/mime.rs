//! MIME type to file extension mapping.

/// `(essence, extension)` pairs; the first match wins.
const MIME_EXTENSIONS: &[(&str, &str)] = &[
    ("application/pdf", ".pdf"),
    ("text/html", ".html"),
    ("application/xhtml+xml", ".xhtml"),
    ("text/plain", ".txt"),
    ("text/markdown", ".md"),
    ("text/x-markdown", ".md"),
    ("text/csv", ".csv"),
    ("text/tab-separated-values", ".tsv"),
    ("application/json", ".json"),
    ("application/ld+json", ".jsonld"),
    ("application/x-ndjson", ".jsonl"),
    ("application/x-ipynb+json", ".ipynb"),
    ("application/xml", ".xml"),
    ("text/xml", ".xml"),
    ("application/yaml", ".yaml"),
    ("application/x-yaml", ".yaml"),
    ("text/yaml", ".yaml"),
    ("text/css", ".css"),
    ("text/javascript", ".js"),
    ("application/javascript", ".js"),
    ("text/x-python", ".py"),
    ("application/x-python-code", ".pyc"),
    ("application/rtf", ".rtf"),
    ("application/zip", ".zip"),
    ("application/gzip", ".gz"),
    ("application/x-gzip", ".gz"),
    ("application/x-tar", ".tar"),
    ("application/x-bzip2", ".bz2"),
    ("application/x-xz", ".xz"),
    ("application/x-7z-compressed", ".7z"),
    ("application/vnd.rar", ".rar"),
    ("application/x-rar-compressed", ".rar"),
    ("application/msword", ".doc"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".docx",
    ),
    ("application/vnd.ms-excel", ".xls"),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".xlsx",
    ),
    ("application/vnd.ms-powerpoint", ".ppt"),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ".pptx",
    ),
    ("application/epub+zip", ".epub"),
    ("application/vnd.apache.parquet", ".parquet"),
    ("application/x-parquet", ".parquet"),
    ("application/vnd.sqlite3", ".sqlite"),
    ("application/x-sqlite3", ".sqlite"),
    ("application/octet-stream", ".bin"),
    ("image/png", ".png"),
    ("image/jpeg", ".jpg"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
    ("image/svg+xml", ".svg"),
    ("image/tiff", ".tiff"),
    ("image/bmp", ".bmp"),
    ("audio/mpeg", ".mp3"),
    ("audio/wav", ".wav"),
    ("audio/x-wav", ".wav"),
    ("audio/ogg", ".ogg"),
    ("audio/flac", ".flac"),
    ("video/mp4", ".mp4"),
    ("video/webm", ".webm"),
    ("video/quicktime", ".mov"),
];

/// Infers a file extension from a `Content-Type` value.
///
/// Parameters such as `; charset=utf-8` are ignored and matching is
/// case-insensitive. Unknown or empty types yield `None`. Placeholder results
/// (`application/octet-stream` → `.bin`) are returned as-is; callers filter
/// them through [`super::normalize_extension`].
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let essence = match content_type.parse::<::mime::Mime>() {
        Ok(m) => m.essence_str().to_string(),
        Err(_) => content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase(),
    };
    if essence.is_empty() {
        return None;
    }
    MIME_EXTENSIONS
        .iter()
        .find(|(m, _)| *m == essence)
        .map(|(_, ext)| *ext)
}
