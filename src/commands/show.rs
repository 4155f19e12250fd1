use std::path::Path;

use tracenav::config::ViewerConfig;
use tracenav::styling::print;
use tracenav::trace::{self, Cursor};

use super::{entry_index, load_nonempty_trace};

pub(crate) fn handle_show(
    file: &Path,
    entry: usize,
    zoom: Option<usize>,
    config: &ViewerConfig,
) -> anyhow::Result<()> {
    let trace = load_nonempty_trace(file)?;
    let mut cursor = Cursor::step_to(&trace, entry_index(entry));
    if let Some(zoom) = zoom {
        cursor = cursor.zoom_to(&trace, zoom);
    }
    print!("{}", trace::render_view(&trace, cursor, config));
    Ok(())
}
