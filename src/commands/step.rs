//! Line-driven navigation session.
//!
//! Reads one command per line and re-renders the view after each, so it works
//! both at a terminal and with scripted input piped in.

use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use tracenav::config::ViewerConfig;
use tracenav::styling::{format_hint, format_warning};
use tracenav::trace::{self, Cursor, Direction, Trace};

use super::{CommandError, entry_index, is_stdin, load_nonempty_trace};

/// One navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepCommand {
    Step(Direction),
    Navigate(Direction),
    ZoomUp,
    ZoomDown,
    /// 1-based entry number
    Goto(usize),
    Zoom(usize),
    Quit,
}

impl FromStr for StepCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = words.next().unwrap_or_default();
        let number = |value: Option<&str>| {
            let value = value.unwrap_or_default();
            value.parse::<usize>().map_err(|_| CommandError::InvalidNumber {
                command: command.to_string(),
                value: value.to_string(),
            })
        };

        match command {
            "s" | "step" => Ok(Self::Step(Direction::Next)),
            "b" | "back" => Ok(Self::Step(Direction::Prev)),
            "n" | "next" => Ok(Self::Navigate(Direction::Next)),
            "p" | "prev" => Ok(Self::Navigate(Direction::Prev)),
            "u" | "up" => Ok(Self::ZoomUp),
            "d" | "down" => Ok(Self::ZoomDown),
            "g" | "goto" => number(words.next()).map(Self::Goto),
            "z" | "zoom" => number(words.next()).map(Self::Zoom),
            "q" | "quit" => Ok(Self::Quit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

impl StepCommand {
    fn apply(self, trace: &Trace, cursor: Cursor) -> Cursor {
        match self {
            Self::Step(direction) => cursor.step(trace, direction),
            Self::Navigate(direction) => cursor.navigate(trace, direction),
            Self::ZoomUp => cursor.zoom_up(trace),
            Self::ZoomDown => cursor.zoom_down(trace),
            Self::Goto(entry) => Cursor::step_to(trace, entry_index(entry)),
            Self::Zoom(zoom) => cursor.zoom_to(trace, zoom),
            Self::Quit => cursor,
        }
    }
}

pub(crate) fn handle_step(file: &Path, entry: usize, config: &ViewerConfig) -> anyhow::Result<()> {
    if is_stdin(file) {
        return Err(CommandError::StdinConflict.into());
    }
    let trace = load_nonempty_trace(file)?;
    let cursor = Cursor::step_to(&trace, entry_index(entry));

    let stdin = std::io::stdin();
    let mut stdout = anstream::stdout();
    run_session(&trace, cursor, config, stdin.lock(), &mut stdout)?;
    Ok(())
}

/// Render, then apply commands from `input` until `quit` or end of input.
///
/// Returns the final cursor.
pub(crate) fn run_session<R: BufRead, W: Write>(
    trace: &Trace,
    mut cursor: Cursor,
    config: &ViewerConfig,
    input: R,
    out: &mut W,
) -> anyhow::Result<Cursor> {
    write!(out, "{}", trace::render_view(trace, cursor, config)).context("Failed to write view")?;

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<StepCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", format_warning(&e.to_string()))?;
                continue;
            }
        };
        if command == StepCommand::Quit {
            break;
        }

        let next = command.apply(trace, cursor);
        log::debug!("{command:?}: {cursor:?} -> {next:?}");
        writeln!(out)?;
        if next == cursor
            && let StepCommand::Navigate(direction) = command
        {
            writeln!(
                out,
                "{}",
                format_hint(&format!("No {direction} step at depth {}", cursor.zoom))
            )?;
        }
        cursor = next;
        write!(out, "{}", trace::render_view(trace, cursor, config))?;
    }

    Ok(cursor)
}
