//! `smartdl list` – show files in the download directory.

use anyhow::Result;
use serde_json::json;
use smartdl_core::agent::{Agent, DownloadAgent};
use std::path::PathBuf;

use super::{check, print_json};

pub fn run_list(
    agent: &DownloadAgent,
    dir: Option<PathBuf>,
    pattern: String,
    json: bool,
) -> Result<()> {
    let args = json!({
        "download_dir": dir.map(|d| d.to_string_lossy().into_owned()),
        "pattern": pattern,
    });
    let result = agent.execute_tool("list_downloads", &args);
    if json {
        print_json(&result)?;
        return check(&result);
    }
    check(&result)?;

    let files = result.data["files"].as_array().cloned().unwrap_or_default();
    if files.is_empty() {
        println!("No files matching {pattern:?}.");
        return Ok(());
    }
    println!("{:<12} {}", "SIZE", "NAME");
    for file in &files {
        println!(
            "{:<12} {}",
            file["size_formatted"].as_str().unwrap_or("-"),
            file["name"].as_str().unwrap_or_default()
        );
    }
    Ok(())
}
