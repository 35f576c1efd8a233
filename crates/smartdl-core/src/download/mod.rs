//! Download orchestration.
//!
//! [`DownloadEngine`] ties the pieces together for one URL: normalize it,
//! follow a landing page to its real download link, pick a filename, then
//! stream the body to disk, correcting the extension once the first bytes
//! show what the content really is.

mod engine;
mod error;
mod filename;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use engine::{download_content, DownloadEngine};
pub use error::DownloadError;
pub use filename::{
    content_sample, ensure_extension_matches_content, generate_filename, CONTENT_SAMPLE_LEN,
    DEFAULT_STEM,
};
pub use types::{DownloadMetadata, DownloadRequest, DownloadResult, ResolvedTarget};
