//! Text rendering for trace summaries and the view at a cursor.
//!
//! Output carries ANSI styles from [`crate::styling`]; print it through
//! `anstream` so they are stripped when stdout isn't a terminal.

use std::fmt::{self, Display, Formatter};

use serde_json::Value;

use super::analyze::TraceSummary;
use super::model::{Frame, StringId, Trace, resolve_filename, resolve_source};
use super::navigate::{Cursor, current_entry};
use crate::config::ViewerConfig;
use crate::styling::{CURRENT, GUTTER, HINT, WARNING};

/// Render a summary to a string.
pub fn render_summary(summary: &TraceSummary) -> String {
    SummaryDisplay(summary).to_string()
}

/// Render the entry, stack, source excerpt and values at `cursor`.
pub fn render_view(trace: &Trace, cursor: Cursor, config: &ViewerConfig) -> String {
    ViewDisplay {
        trace,
        cursor: cursor.clamped(trace),
        config,
    }
    .to_string()
}

struct SummaryDisplay<'a>(&'a TraceSummary);

impl Display for SummaryDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f, "============================================================")?;
        writeln!(f, "                      TRACE SUMMARY")?;
        writeln!(f, "============================================================")?;

        writeln!(f, "\nOVERVIEW")?;
        writeln!(f, "--------")?;
        writeln!(f, "{:<18}{}", "Entries:", summary.entry_count)?;
        if summary.stackless > 0 {
            writeln!(f, "{:<18}{}", "Without stack:", summary.stackless)?;
        }
        writeln!(f, "{:<18}{}", "Max stack depth:", summary.max_depth)?;
        writeln!(f, "{:<18}{}", "Interned strings:", summary.interned)?;
        writeln!(f, "{:<18}{}", "Source files:", summary.sources)?;

        writeln!(f, "\nTARGETS")?;
        writeln!(f, "-------")?;
        writeln!(f, "{:<40} {:>6}", "Target", "Count")?;
        writeln!(f, "{:<40} {:>6}", "-".repeat(40), "------")?;
        for target in &summary.targets {
            writeln!(f, "{:<40} {:>6}", truncate(&target.name, 40), target.count)?;
        }

        writeln!(f, "\nFILES")?;
        writeln!(f, "-----")?;
        writeln!(f, "{:<40} {:>7} {:>6} {:>7}", "File", "Entries", "Lines", "Source")?;
        writeln!(
            f,
            "{:<40} {:>7} {:>6} {:>7}",
            "-".repeat(40),
            "-------",
            "------",
            "-------"
        )?;
        for file in &summary.files {
            writeln!(
                f,
                "{:<40} {:>7} {:>6} {:>7}",
                truncate(&display_filename(&file.name, file.id), 40),
                file.entries,
                file.lines,
                if file.has_source { "yes" } else { "no" }
            )?;
        }

        if !summary.unresolved.is_empty() {
            let ids: Vec<String> = summary.unresolved.iter().map(|id| id.to_string()).collect();
            writeln!(
                f,
                "\n{WARNING}Unresolved filename ids: {}{WARNING:#}",
                ids.join(", ")
            )?;
        }
        Ok(())
    }
}

struct ViewDisplay<'a> {
    trace: &'a Trace,
    cursor: Cursor,
    config: &'a ViewerConfig,
}

impl Display for ViewDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Some(entry) = current_entry(self.trace, self.cursor) else {
            return writeln!(f, "{HINT}(no entries){HINT:#}");
        };
        writeln!(
            f,
            "Entry {}/{}  {CURRENT}{}{CURRENT:#}",
            self.cursor.index + 1,
            self.trace.len(),
            entry.target
        )?;

        writeln!(f, "\nStack:")?;
        if entry.stack.is_empty() {
            writeln!(f, "  {HINT}(empty){HINT:#}")?;
        }
        for (depth, frame) in entry.stack.iter().enumerate() {
            let location = self.location(frame);
            if depth == self.cursor.zoom {
                writeln!(f, "{CURRENT}> {depth:>3}  {}  {location}{CURRENT:#}", frame.name)?;
            } else {
                writeln!(f, "  {depth:>3}  {}  {location}", frame.name)?;
            }
        }

        if let Some(frame) = entry.stack.get(self.cursor.zoom) {
            self.fmt_source(f, frame)?;
            if self.config.show_locals && !frame.locals.is_empty() {
                writeln!(f, "\nLocals:")?;
                for (name, value) in &frame.locals {
                    writeln!(f, "  {name} = {}", self.value(value))?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "args:   {}", self.value(&entry.args))?;
        writeln!(f, "kwargs: {}", self.value(&entry.kwargs))?;
        writeln!(f, "ret:    {}", self.value(&entry.ret))?;
        if let Some(user_args) = &entry.user_args {
            writeln!(f, "user_args:   {}", self.value(user_args))?;
        }
        if let Some(user_kwargs) = &entry.user_kwargs {
            writeln!(f, "user_kwargs: {}", self.value(user_kwargs))?;
        }
        Ok(())
    }
}

impl ViewDisplay<'_> {
    fn location(&self, frame: &Frame) -> String {
        let name = display_filename(resolve_filename(self.trace, frame.filename), frame.filename);
        format!("{name}:{}", frame.line)
    }

    fn value(&self, value: &Value) -> String {
        truncate(&value.to_string(), self.config.max_value_width)
    }

    /// Source lines around the frame's line, which is one-based.
    fn fmt_source(&self, f: &mut Formatter<'_>, frame: &Frame) -> fmt::Result {
        let filename = display_filename(resolve_filename(self.trace, frame.filename), frame.filename);
        writeln!(f, "\nSource: {filename}")?;

        let source = resolve_source(self.trace, frame.filename);
        if source.is_empty() {
            return writeln!(f, "  {HINT}(source not captured){HINT:#}");
        }

        let line = frame.line as usize;
        let context = self.config.context_lines;
        let first = line.saturating_sub(context).max(1);
        let last = line.saturating_add(context);
        let width = last.to_string().len();

        for (number, text) in source
            .lines()
            .enumerate()
            .map(|(i, text)| (i + 1, text))
            .skip(first - 1)
            .take_while(|(number, _)| *number <= last)
        {
            if number == line {
                writeln!(f, "{CURRENT}> {number:>width$} | {text}{CURRENT:#}")?;
            } else {
                writeln!(f, "  {GUTTER}{number:>width$} |{GUTTER:#} {text}")?;
            }
        }
        Ok(())
    }
}

fn display_filename(name: &str, id: StringId) -> String {
    if name.is_empty() {
        format!("<unknown #{id}>")
    } else {
        name.to_string()
    }
}

/// Truncate to `max_len` characters, marking the cut with `…`.
fn truncate(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len.saturating_sub(1)) {
        Some((byte_idx, _)) if s.chars().count() > max_len => format!("{}…", &s[..byte_idx]),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{analyze::analyze, parse::parse};

    fn plain(s: &str) -> String {
        anstream::adapter::strip_str(s).to_string()
    }

    fn sample() -> Trace {
        parse(include_str!("testdata/sample.log"))
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("ééééé", 3), "éé…");
    }

    #[test]
    fn test_render_view_small() {
        let text = [
            r#"I0101 00:00:00.000000 1a.py:1] {"str":["m.py",0]}"#,
            r#"I0101 00:00:00.000000 1a.py:1] {"dump_source":{"filename":0},"has_payload":""}"#,
            "\tdef f():",
            "\t    g()",
            "\t    return 1",
            r#"I0101 00:00:00.000000 1a.py:1] {"eager_dispatch":{"target":"g","stack":[{"name":"f","filename":0,"line":2,"locals":{}}],"args":[],"kwargs":{},"ret":null}}"#,
        ]
        .join("\n");
        let trace = parse(&text);
        let config = ViewerConfig {
            context_lines: 1,
            ..ViewerConfig::default()
        };
        let output = plain(&render_view(&trace, Cursor::step_to(&trace, 0), &config));
        insta::assert_snapshot!(output, @r"
        Entry 1/1  g

        Stack:
        >   0  f  m.py:2

        Source: m.py
          1 | def f():
        > 2 |     g()
          3 |     return 1

        args:   []
        kwargs: {}
        ret:    null
        ");
    }

    #[test]
    fn test_render_view_marks_zoomed_frame() {
        let trace = sample();
        let cursor = Cursor::step_to(&trace, 1).zoom_up(&trace);
        let output = plain(&render_view(&trace, cursor, &ViewerConfig::default()));
        assert!(output.contains(">   1  main  main.py:8"), "{output}");
        assert!(output.contains(">  8 |     y = m(x)"), "{output}");
        assert!(output.contains("Locals:\n  m = \"Module()\""), "{output}");
    }

    #[test]
    fn test_render_view_hides_locals_when_disabled() {
        let trace = sample();
        let config = ViewerConfig {
            show_locals: false,
            ..ViewerConfig::default()
        };
        let output = plain(&render_view(&trace, Cursor::step_to(&trace, 1), &config));
        assert!(!output.contains("Locals:"));
    }

    #[test]
    fn test_render_view_missing_source_and_name() {
        let text = r#"I0101 00:00:00.000000 1a.py:1] {"eager_dispatch":{"target":"t","stack":[{"name":"f","filename":9,"line":3}]}}"#;
        let trace = parse(text);
        let output = plain(&render_view(&trace, Cursor::default(), &ViewerConfig::default()));
        assert!(output.contains("f  <unknown #9>:3"));
        assert!(output.contains("(source not captured)"));
    }

    #[test]
    fn test_render_view_empty_trace() {
        let output = plain(&render_view(
            &Trace::default(),
            Cursor::default(),
            &ViewerConfig::default(),
        ));
        assert_eq!(output, "(no entries)\n");
    }

    #[test]
    fn test_render_view_truncates_values() {
        let trace = sample();
        let config = ViewerConfig {
            max_value_width: 10,
            ..ViewerConfig::default()
        };
        let output = plain(&render_view(&trace, Cursor::step_to(&trace, 1), &config));
        assert!(output.contains("args:   [{\"dtype\"…"), "{output}");
    }

    #[test]
    fn test_render_summary() {
        let output = plain(&render_summary(&analyze(&sample())));
        assert!(output.contains("TRACE SUMMARY"));
        assert!(output.contains("Entries:          6"));
        assert!(output.contains("torch.matmul"));
        assert!(output.contains("model.py"));
        assert!(!output.contains("Unresolved"));
    }
}
