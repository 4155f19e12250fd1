//! Trace data model: interned ids, stack frames, dispatch entries.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Producer-assigned id of an interned string (usually a filename).
///
/// Only meaningful within the [`Trace`] it was parsed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringId(pub u64);

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One stack level at the time an entry was recorded.
///
/// `line` is one-based; 0 means the producer did not know the line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,
    pub filename: StringId,
    pub line: u32,
    #[serde(default)]
    pub locals: IndexMap<String, Value>,
}

/// Frames compare by position only; captured locals are ignored.
impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.filename == other.filename && self.line == other.line
    }
}

impl Eq for Frame {}

/// One traced call event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub target: String,
    /// Outermost frame first, innermost last. Empty stacks are kept but
    /// can't be navigated.
    #[serde(default)]
    pub stack: Vec<Frame>,
    #[serde(default)]
    pub args: Value,
    #[serde(default)]
    pub kwargs: Value,
    #[serde(default)]
    pub ret: Value,
    /// Only present on entries decoded from the flat record shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_args: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_kwargs: Option<Value>,
}

impl Entry {
    /// Index of the innermost frame, or 0 for an empty stack.
    pub fn innermost_depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }
}

/// Result of parsing one log. Immutable once built.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Trace {
    pub entries: Vec<Entry>,
    pub sourcemap: BTreeMap<StringId, String>,
    pub strtable: BTreeMap<StringId, String>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Look up an interned string. Unknown ids resolve to `""`.
pub fn resolve_filename(trace: &Trace, id: StringId) -> &str {
    trace.strtable.get(&id).map(String::as_str).unwrap_or_default()
}

/// Look up dumped source text for a filename id. Unknown ids resolve to `""`.
pub fn resolve_source(trace: &Trace, filename: StringId) -> &str {
    trace
        .sourcemap
        .get(&filename)
        .map(String::as_str)
        .unwrap_or_default()
}
