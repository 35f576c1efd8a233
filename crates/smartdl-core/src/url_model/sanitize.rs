//! Portable filename sanitization.

/// Default cap on generated filename length, in characters.
pub const DEFAULT_MAX_FILENAME_LEN: usize = 200;

/// Characters rejected by at least one common filesystem.
const FORBIDDEN: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Turns arbitrary text into a name that is safe on common filesystems.
///
/// - Replaces `<>:"/\|?*` and control characters with `_`
/// - Collapses runs of whitespace and underscores into one `_`
/// - Trims leading/trailing underscores
/// - Truncates to `max_len` characters (never inside a code point)
///
/// The output is a fixed point: sanitizing it again returns it unchanged.
pub fn sanitize_filename(name: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let separator =
            c == '_' || c.is_whitespace() || c.is_control() || FORBIDDEN.contains(&c);

        if separator {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches('_');
    let truncated = match trimmed.char_indices().nth(max_len) {
        Some((idx, _)) => &trimmed[..idx],
        None => trimmed,
    };
    // Truncation may expose an underscore at the new end.
    truncated.trim_end_matches('_').to_string()
}
