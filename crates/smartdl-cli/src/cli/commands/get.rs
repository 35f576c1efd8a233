//! `smartdl get <url>` – download one URL.

use anyhow::Result;
use serde_json::json;
use smartdl_core::agent::{Agent, DownloadAgent};
use std::path::PathBuf;

use super::{check, print_json, print_warnings};

pub fn run_get(
    agent: &DownloadAgent,
    url: String,
    context: Option<String>,
    dir: Option<PathBuf>,
    filename: Option<String>,
    json: bool,
) -> Result<()> {
    let args = json!({
        "url": url,
        "context": context,
        "download_dir": dir.map(|d| d.to_string_lossy().into_owned()),
        "filename": filename,
    });
    let result = agent.execute_tool("download_content", &args);
    if json {
        print_json(&result)?;
        return check(&result);
    }
    check(&result)?;
    print_warnings(&result);
    if let Some(path) = result.data["path"].as_str() {
        println!("{path}");
    }
    Ok(())
}
