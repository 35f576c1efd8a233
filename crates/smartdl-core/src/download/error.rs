//! Download errors.

use std::io;
use std::path::PathBuf;

use crate::http::HttpError;

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Caller broke an input contract; raised before any network call.
    #[error("{0}")]
    InvalidInput(String),
    #[error("could not create download directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The final GET failed or its body could not be written.
    #[error("Failed to download {url}: {source}")]
    Transfer {
        url: String,
        #[source]
        source: HttpError,
    },
}
