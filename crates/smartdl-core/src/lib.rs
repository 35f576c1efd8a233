pub mod config;
pub mod logging;

pub mod agent;
pub mod download;
pub mod extension;
pub mod http;
pub mod landing;
pub mod url_model;

pub use download::{download_content, DownloadEngine, DownloadError, DownloadRequest, DownloadResult};
