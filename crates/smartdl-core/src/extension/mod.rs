//! Extension reconciliation: MIME mapping, byte sniffing, and the priority
//! policy that picks one extension out of conflicting signals.

mod mime;
mod resolve;
mod router;

pub use self::mime::extension_for_content_type;
pub use resolve::{ExtensionDecision, ExtensionInput, ExtensionResolver, ExtensionSource};
pub use router::{
    is_zip_container_extension, sniff_signature, ExtensionRouter, RouteRequest, SignatureRouter,
    DEFAULT_PRIORITY_EXTENSIONS,
};

/// Extensions that mean "unknown type" and yield to any stronger signal.
pub const PLACEHOLDER_EXTENSIONS: [&str; 4] = [".bin", ".tmp", ".dat", ".download"];

/// Extension used when nothing better is known.
pub const FALLBACK_EXTENSION: &str = ".bin";

/// True if `ext` (with or without the leading dot) is a placeholder.
pub fn is_placeholder_extension(ext: &str) -> bool {
    let dotted = if ext.starts_with('.') {
        ext.to_ascii_lowercase()
    } else {
        format!(".{}", ext.to_ascii_lowercase())
    };
    PLACEHOLDER_EXTENSIONS.contains(&dotted.as_str())
}

/// Returns the extension with a leading dot, or `None` when it is empty or a
/// placeholder. Case is preserved.
pub fn normalize_extension(ext: Option<&str>) -> Option<String> {
    let ext = ext?.trim();
    if ext.is_empty() || ext == "." || is_placeholder_extension(ext) {
        return None;
    }
    if ext.starts_with('.') {
        Some(ext.to_string())
    } else {
        Some(format!(".{ext}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_case_insensitive() {
        assert!(is_placeholder_extension(".bin"));
        assert!(is_placeholder_extension("BIN"));
        assert!(is_placeholder_extension(".Download"));
        assert!(!is_placeholder_extension(".pdf"));
        assert!(!is_placeholder_extension(""));
    }

    #[test]
    fn normalize_adds_dot_and_drops_placeholders() {
        assert_eq!(normalize_extension(Some("json")).as_deref(), Some(".json"));
        assert_eq!(normalize_extension(Some(".PDF")).as_deref(), Some(".PDF"));
        assert_eq!(normalize_extension(Some(".tmp")), None);
        assert_eq!(normalize_extension(Some("dat")), None);
        assert_eq!(normalize_extension(Some("")), None);
        assert_eq!(normalize_extension(None), None);
    }
}
