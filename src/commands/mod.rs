pub(crate) mod dump;
pub(crate) mod show;
pub(crate) mod step;
pub(crate) mod summary;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracenav::trace::{self, Trace};

pub(crate) use dump::handle_dump;
pub(crate) use show::handle_show;
pub(crate) use step::handle_step;
pub(crate) use summary::handle_summary;

/// Errors surfaced by command handlers.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CommandError {
    #[error("no trace entries found in {source_name}")]
    EmptyTrace { source_name: String },

    #[error("cannot read the trace from stdin while reading commands from it")]
    StdinConflict,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' needs a number, got '{value}'")]
    InvalidNumber { command: String, value: String },
}

pub(crate) fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read and parse a log file, or stdin for `-`.
pub(crate) fn load_trace(path: &Path) -> anyhow::Result<Trace> {
    let text = if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin()
            .lock()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    Ok(trace::parse(&text))
}

/// Like [`load_trace`], but an empty trace is an error.
pub(crate) fn load_nonempty_trace(path: &Path) -> anyhow::Result<Trace> {
    let trace = load_trace(path)?;
    if trace.is_empty() {
        let source_name = if is_stdin(path) {
            "stdin".to_string()
        } else {
            path.display().to_string()
        };
        return Err(CommandError::EmptyTrace { source_name }.into());
    }
    Ok(trace)
}

/// Convert a 1-based entry number from the command line to an index.
pub(crate) fn entry_index(entry: usize) -> usize {
    entry.saturating_sub(1)
}
