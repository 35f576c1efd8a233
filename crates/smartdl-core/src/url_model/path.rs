//! Filename pieces from URL paths.

/// Extracts the last path segment from a URL for use as a filename hint.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Splits a filename into `(stem, suffix)`.
///
/// The suffix runs from the last `.` and includes it. Names whose only dot is
/// the first character (`.bashrc`) or the last one (`notes.`) have no suffix.
pub fn split_suffix(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 && i < name.len() - 1 => (&name[..i], &name[i..]),
        _ => (name, ""),
    }
}

/// Suffix of the last path segment of `url`, or `""`.
pub fn url_suffix(url: &str) -> String {
    filename_from_url_path(url)
        .map(|name| split_suffix(&name).1.to_string())
        .unwrap_or_default()
}

/// Stem of the last path segment of `url`, if there is one.
pub fn url_stem(url: &str) -> Option<String> {
    let name = filename_from_url_path(url)?;
    Some(split_suffix(&name).0.to_string())
}
