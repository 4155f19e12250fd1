//! Call-tree traces reconstructed from structured execution logs.
//!
//! An instrumented program writes glog-style lines whose JSON metadata interns
//! filenames, dumps source files and records each dispatched call together
//! with its full call stack. This module turns that text into a [`Trace`] and
//! lets a caller walk it while staying at a chosen stack depth.
//!
//! # Usage
//!
//! ```ignore
//! use tracenav::trace::{Cursor, Direction, parse};
//!
//! let trace = parse(&log_text);
//! let cursor = Cursor::step_to(&trace, 0).zoom_up(&trace);
//! let cursor = cursor.navigate(&trace, Direction::Next);
//! ```

pub mod analyze;
pub mod display;
pub mod model;
pub mod navigate;
pub mod parse;

// Re-export main types for convenience
pub use analyze::{TraceSummary, analyze};
pub use display::{render_summary, render_view};
pub use model::{Entry, Frame, StringId, Trace, resolve_filename, resolve_source};
pub use navigate::{Cursor, Direction, current_entry, current_frame};
pub use parse::{Record, parse, parse_line};
