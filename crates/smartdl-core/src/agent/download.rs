//! `DownloadAgent`: the download engine behind three tools.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;

use super::{json_schema, list_files, Agent, ToolDefinition, ToolResult};
use crate::config::SmartdlConfig;
use crate::download::{DownloadEngine, DownloadError, DownloadRequest};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DownloadContentArgs {
    url: String,
    context: Option<String>,
    download_dir: Option<PathBuf>,
    filename: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DownloadMultipleArgs {
    urls: Vec<String>,
    contexts: Option<Vec<String>>,
    download_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListDownloadsArgs {
    download_dir: Option<PathBuf>,
    pattern: Option<String>,
}

/// Exposes `download_content`, `download_multiple` and `list_downloads`.
pub struct DownloadAgent {
    engine: DownloadEngine,
}

impl DownloadAgent {
    pub fn new(engine: DownloadEngine) -> Self {
        Self { engine }
    }

    pub fn from_config(config: &SmartdlConfig) -> Self {
        Self::new(DownloadEngine::new(config))
    }

    pub fn engine(&self) -> &DownloadEngine {
        &self.engine
    }

    fn download_content(&self, args: DownloadContentArgs) -> ToolResult {
        let request = DownloadRequest {
            url: args.url.clone(),
            context: args.context,
            target_directory: args.download_dir,
            filename_override: args.filename,
        };
        match self.engine.download(&request) {
            Ok(result) => {
                let path = result
                    .path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                let metadata = result
                    .metadata
                    .as_ref()
                    .and_then(|m| serde_json::to_value(m).ok())
                    .unwrap_or_else(|| json!({}));
                ToolResult::success(
                    json!({ "path": path, "url": result.url }),
                    format!("Downloaded successfully to: {path}"),
                )
                .with_warnings(result.warnings)
                .with_metadata(metadata)
            }
            Err(e @ DownloadError::Transfer { .. }) => ToolResult::error(e.to_string()),
            Err(e) => ToolResult::error(format!("Failed to download {}: {e}", args.url)),
        }
    }

    fn download_multiple(&self, args: DownloadMultipleArgs) -> ToolResult {
        let results = match self.engine.download_multiple(
            &args.urls,
            args.contexts.as_deref(),
            args.download_dir.as_deref(),
        ) {
            Ok(results) => results,
            Err(e) => return ToolResult::error(format!("Failed to download files: {e}")),
        };

        let total = results.len();
        let successful = results.iter().filter(|r| r.is_success()).count();
        let failed = total - successful;
        let mut message = format!("Downloaded {successful}/{total} files");
        if failed > 0 {
            message.push_str(&format!(" ({failed} failed)"));
        }
        let results = match serde_json::to_value(&results) {
            Ok(value) => value,
            Err(e) => return ToolResult::error(format!("Failed to download files: {e}")),
        };
        ToolResult::success(
            json!({
                "results": results,
                "total": total,
                "successful": successful,
                "failed": failed,
            }),
            message,
        )
    }

    fn list_downloads(&self, args: ListDownloadsArgs) -> ToolResult {
        let dir = args
            .download_dir
            .unwrap_or_else(|| self.engine.default_download_dir().to_path_buf());
        if !dir.exists() {
            return ToolResult::error(format!("Directory does not exist: {}", dir.display()));
        }
        let pattern = args.pattern.as_deref().unwrap_or("*");
        match list_files(&dir, pattern) {
            Ok(files) => {
                let total = files.len();
                ToolResult::success(
                    json!({
                        "directory": dir.display().to_string(),
                        "files": files,
                        "total": total,
                    }),
                    format!("Found {total} files in {}", dir.display()),
                )
            }
            Err(e) => ToolResult::error(format!("Failed to list files: {e:#}")),
        }
    }
}

/// Missing or `null` arguments count as an empty object.
fn parse_args<T: DeserializeOwned>(tool: &str, arguments: &Value) -> Result<T, ToolResult> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments.clone()
    };
    serde_json::from_value(arguments)
        .map_err(|e| ToolResult::error(format!("Invalid arguments for {tool}: {e}")))
}

fn string_prop(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn string_list_prop(description: &str) -> Value {
    json!({ "type": "array", "items": { "type": "string" }, "description": description })
}

impl Agent for DownloadAgent {
    fn tools(&self) -> Vec<ToolDefinition> {
        let dir_help = "Optional: directory to download to. Defaults to the Downloads folder";
        vec![
            ToolDefinition {
                name: "download_content".to_string(),
                description: "Download content from a URL. Landing pages are detected and \
                    followed to the actual download link, and the filename is built from \
                    the given context. Handles PDFs, datasets and other content types, with \
                    special support for GitHub and Hugging Face file URLs."
                    .to_string(),
                parameters: json_schema(
                    json!({
                        "url": string_prop("URL to download from"),
                        "context": string_prop(
                            "Context about the content (title, description) used to build a meaningful filename"
                        ),
                        "download_dir": string_prop(dir_help),
                        "filename": string_prop("Optional: exact filename, skips automatic naming"),
                    }),
                    &["url"],
                ),
            },
            ToolDefinition {
                name: "download_multiple".to_string(),
                description: "Download several URLs in one call and return the path of every \
                    downloaded file. Each URL may have its own context for naming."
                    .to_string(),
                parameters: json_schema(
                    json!({
                        "urls": string_list_prop("URLs to download"),
                        "contexts": string_list_prop(
                            "Optional: one context per URL for filename generation"
                        ),
                        "download_dir": string_prop(dir_help),
                    }),
                    &["urls"],
                ),
            },
            ToolDefinition {
                name: "list_downloads".to_string(),
                description: "List files in the downloads directory to see what has already \
                    been downloaded."
                    .to_string(),
                parameters: json_schema(
                    json!({
                        "download_dir": string_prop(
                            "Optional: directory to list. Defaults to the Downloads folder"
                        ),
                        "pattern": string_prop(
                            "Optional: glob pattern to filter files (e.g. \"*.pdf\", \"**/*.csv\")"
                        ),
                    }),
                    &[],
                ),
            },
        ]
    }

    fn execute_tool(&self, name: &str, arguments: &Value) -> ToolResult {
        tracing::debug!(tool = name, "executing tool");
        let result = match name {
            "download_content" => parse_args(name, arguments).map(|a| self.download_content(a)),
            "download_multiple" => parse_args(name, arguments).map(|a| self.download_multiple(a)),
            "list_downloads" => parse_args(name, arguments).map(|a| self.list_downloads(a)),
            _ => Err(ToolResult::error(format!("Unknown tool: {name}"))),
        };
        result.unwrap_or_else(|failure| failure)
    }

    fn metadata(&self) -> Value {
        json!({
            "name": "DownloadAgent",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Downloads content with context-aware naming and landing-page link resolution",
        })
    }
}
