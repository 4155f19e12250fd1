use std::path::Path;

use anyhow::Context;
use tracenav::styling::println;

use super::load_trace;

/// Print the parsed trace as pretty JSON. An empty trace is still printed.
pub(crate) fn handle_dump(file: &Path) -> anyhow::Result<()> {
    let trace = load_trace(file)?;
    let json = serde_json::to_string_pretty(&trace).context("Failed to serialize trace")?;
    println!("{json}");
    Ok(())
}
