use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::extension::{SignatureRouter, DEFAULT_PRIORITY_EXTENSIONS};
use crate::http::ClientOptions;

/// Environment variable overriding the default download directory.
pub const DOWNLOAD_DIR_ENV: &str = "SMARTDL_DOWNLOAD_DIR";

/// Extension routing settings (optional `[routing]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// URL suffixes trusted over the server's content type (e.g. ".pdf").
    pub priority_extensions: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            priority_extensions: DEFAULT_PRIORITY_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Global configuration loaded from `~/.config/smartdl/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartdlConfig {
    /// Default target directory; the user's Downloads folder when unset.
    pub download_dir: Option<PathBuf>,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Per-request timeout for probes; stall timeout for downloads.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Maximum redirects followed per request.
    pub max_redirects: u32,
    /// Optional routing overrides; built-in defaults when missing.
    pub routing: Option<RoutingConfig>,
}

impl Default for SmartdlConfig {
    fn default() -> Self {
        Self {
            download_dir: None,
            user_agent: "DownloadAgent/1.0".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 15,
            max_redirects: 5,
            routing: None,
        }
    }
}

impl SmartdlConfig {
    /// Target directory when a request names none.
    ///
    /// `SMARTDL_DOWNLOAD_DIR` wins over `download_dir`, which wins over the
    /// platform Downloads folder.
    pub fn default_download_dir(&self) -> PathBuf {
        if let Some(dir) = std::env::var_os(DOWNLOAD_DIR_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(dir);
        }
        if let Some(dir) = &self.download_dir {
            return dir.clone();
        }
        dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .unwrap_or_else(|| PathBuf::from("Downloads"))
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_redirects: self.max_redirects,
        }
    }

    pub fn router(&self) -> SignatureRouter {
        match &self.routing {
            Some(routing) => SignatureRouter::with_priority_extensions(&routing.priority_extensions),
            None => SignatureRouter::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("smartdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SmartdlConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<SmartdlConfig> {
    if !path.exists() {
        let default_cfg = SmartdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SmartdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = SmartdlConfig::default();
        assert_eq!(cfg.user_agent, "DownloadAgent/1.0");
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.max_redirects, 5);
        assert!(cfg.download_dir.is_none());
        assert!(cfg.routing.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = SmartdlConfig {
            download_dir: Some(PathBuf::from("/srv/downloads")),
            routing: Some(RoutingConfig::default()),
            ..SmartdlConfig::default()
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: SmartdlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml = r#"
            timeout_secs = 5
            download_dir = "/tmp/dl"

            [routing]
            priority_extensions = [".json", "xml"]
        "#;
        let cfg: SmartdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.connect_timeout_secs, 15);
        assert_eq!(cfg.download_dir.as_deref(), Some(Path::new("/tmp/dl")));
        let exts: Vec<_> = cfg.router().priority_extensions().map(String::from).collect();
        assert_eq!(exts, vec![".json", ".xml"]);
    }

    #[test]
    fn client_options_follow_config() {
        let cfg = SmartdlConfig {
            timeout_secs: 7,
            max_redirects: 2,
            ..SmartdlConfig::default()
        };
        let opts = cfg.client_options();
        assert_eq!(opts.timeout, Duration::from_secs(7));
        assert_eq!(opts.max_redirects, 2);
    }

    #[test]
    fn load_or_init_creates_then_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, SmartdlConfig::default());

        fs::write(&path, "user_agent = \"custom/2\"\n").unwrap();
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(loaded.user_agent, "custom/2");
    }
}
