//! `smartdl tools` and `smartdl call` – the raw agent tool surface.

use anyhow::{Context, Result};
use serde_json::Value;
use smartdl_core::agent::{Agent, DownloadAgent};

use super::{check, print_json};

pub fn run_tools(agent: &DownloadAgent) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&agent.tools())?);
    Ok(())
}

pub fn run_call(agent: &DownloadAgent, tool: &str, args: &str) -> Result<()> {
    let arguments: Value =
        serde_json::from_str(args).with_context(|| format!("parse arguments for {tool}"))?;
    let result = agent.execute_tool(tool, &arguments);
    print_json(&result)?;
    check(&result)
}
