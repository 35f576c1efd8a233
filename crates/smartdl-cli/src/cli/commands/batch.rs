//! `smartdl batch <urls…>` – download several URLs in order.

use anyhow::Result;
use serde_json::json;
use smartdl_core::agent::{Agent, DownloadAgent};
use std::path::PathBuf;

use super::{check, print_json};

pub fn run_batch(
    agent: &DownloadAgent,
    urls: Vec<String>,
    contexts: Vec<String>,
    dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let contexts = (!contexts.is_empty()).then_some(contexts);
    let args = json!({
        "urls": urls,
        "contexts": contexts,
        "download_dir": dir.map(|d| d.to_string_lossy().into_owned()),
    });
    let result = agent.execute_tool("download_multiple", &args);
    if json {
        print_json(&result)?;
        return check(&result);
    }
    check(&result)?;

    let items = result.data["results"].as_array().cloned().unwrap_or_default();
    for item in &items {
        let url = item["url"].as_str().unwrap_or_default();
        match item["path"].as_str() {
            Some(path) => println!("ok      {path}"),
            None => println!("failed  {url}"),
        }
        if let Some(warnings) = item["warnings"].as_array() {
            for warning in warnings.iter().filter_map(|w| w.as_str()) {
                println!("        {warning}");
            }
        }
    }
    if let Some(message) = &result.message {
        println!("{message}");
    }
    Ok(())
}
