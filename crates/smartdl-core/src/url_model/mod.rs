//! URL modeling and filename pieces.
//!
//! Host-specific URL rewrites, filename sanitization, Content-Disposition
//! parsing, and stem/suffix extraction from URL paths.

mod content_disposition;
mod path;
mod rewrite;
mod sanitize;

pub use content_disposition::parse_content_disposition_filename;
pub use path::{filename_from_url_path, split_suffix, url_stem, url_suffix};
pub use rewrite::{
    normalize_url, rewrite_known_hosts, strip_tracking_params, RewriteRule, HOST_REWRITES,
};
pub use sanitize::{sanitize_filename, DEFAULT_MAX_FILENAME_LEN};
