use std::path::Path;

use tracenav::styling::println;
use tracenav::trace;

use super::load_nonempty_trace;

pub(crate) fn handle_summary(file: &Path) -> anyhow::Result<()> {
    let trace = load_nonempty_trace(file)?;
    let summary = trace::analyze(&trace);
    println!("{}", trace::render_summary(&summary));
    Ok(())
}
