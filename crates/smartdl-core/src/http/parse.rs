//! Parse raw HTTP response header lines.

use super::ResponseHeaders;

/// Parses collected header lines into a status code and headers.
///
/// When redirects are followed, the lines of every hop arrive in sequence.
/// Each status line (`HTTP/...`) starts a new block, so only the final
/// response's headers are kept. Status is 0 if no status line was seen.
pub fn parse_header_lines(lines: &[String]) -> (u32, ResponseHeaders) {
    let mut status = 0;
    let mut headers = ResponseHeaders::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            status = line
                .split_whitespace()
                .nth(1)
                .and_then(|code| code.parse().ok())
                .unwrap_or(0);
            headers = ResponseHeaders::new();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push(name.trim(), value.trim());
        }
    }

    (status, headers)
}
