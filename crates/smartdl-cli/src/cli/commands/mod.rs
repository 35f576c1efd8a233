//! CLI command handlers. Each goes through the agent tool surface so the
//! CLI and tool callers see the same behavior.

mod batch;
mod get;
mod list;
mod tools;

pub use batch::run_batch;
pub use get::run_get;
pub use list::run_list;
pub use tools::{run_call, run_tools};

use anyhow::Result;
use smartdl_core::agent::ToolResult;

/// Prints `result` as pretty JSON.
fn print_json(result: &ToolResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

/// Turns a failed tool result into an error for the exit code.
fn check(result: &ToolResult) -> Result<()> {
    if result.success {
        return Ok(());
    }
    anyhow::bail!(
        "{}",
        result.message.as_deref().unwrap_or("tool call failed")
    )
}

fn print_warnings(result: &ToolResult) {
    for warning in &result.warnings {
        eprintln!("warning: {warning}");
    }
}
