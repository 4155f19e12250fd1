//! Parse structured glog-style logs into a [`Trace`].
//!
//! Each record line looks like:
//!
//! ```text
//! I0101 00:00:00.000000 1file.py:10] {"str": ["foo.py", 5]}
//! ```
//!
//! The JSON object after the header says what kind of record it is. Records
//! that set `has_payload` are followed by zero or more tab-prefixed lines
//! which together form a multi-line payload (used for dumped source files).
//!
//! Parsing never fails. Lines that don't match the header, whose JSON doesn't
//! parse, or whose known properties have the wrong shape are skipped.

use std::iter::Peekable;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, de::Error as _, de::IgnoredAny};
use serde_json::{Map, Value};

use super::model::{Entry, Frame, StringId, Trace};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<level>[VIWEC])(?P<month>[0-9]{2})(?P<day>[0-9]{2}) (?P<hour>[0-9]{2}):(?P<minute>[0-9]{2}):(?P<second>[0-9]{2})\.(?P<micros>[0-9]{6}) (?P<thread>[0-9]+)(?P<pathname>[^:]+):(?P<line>[0-9]+)\] (?P<payload>.)",
    )
    .expect("log header pattern is valid")
});

/// Log severity code from the first character of a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Severity {
    Verbose,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "V" => Some(Self::Verbose),
            "I" => Some(Self::Info),
            "W" => Some(Self::Warning),
            "E" => Some(Self::Error),
            "C" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// A line whose header matched. `metadata` is the unparsed JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub severity: Severity,
    pub pathname: &'a str,
    pub line: u32,
    pub metadata: &'a str,
}

/// Match the header of a single line.
///
/// The metadata slice starts at the first character after `] `, so it
/// includes the payload-opening character matched by the header.
pub fn parse_line(line: &str) -> Option<LogLine<'_>> {
    let caps = HEADER.captures(line)?;
    let severity = Severity::from_code(caps.name("level")?.as_str())?;
    let payload_start = caps.name("payload")?.start();
    Some(LogLine {
        severity,
        pathname: caps.name("pathname")?.as_str(),
        line: caps.name("line")?.as_str().parse().ok()?,
        metadata: &line[payload_start..],
    })
}

/// One decoded piece of metadata.
#[derive(Debug, Clone)]
pub enum Record {
    /// `{"str": [literal, id]}`
    StringIntern { literal: String, id: StringId },
    /// `{"dump_source": {"filename": id}}`, source text is the payload
    SourceDump { filename: StringId },
    /// `{"eager_dispatch": {...}}` with a `stack`
    DispatchEvent(Entry),
    /// `{"eager_dispatch": {...}}` in the flat shape, normalized to a
    /// single-frame entry
    FlatDispatchEvent(Entry),
    /// Valid metadata carrying none of the known properties
    Unrecognized,
}

/// Schema of the metadata object. Unknown properties are ignored.
#[derive(Debug, Deserialize)]
struct Metadata {
    #[serde(default, deserialize_with = "present")]
    has_payload: bool,
    #[serde(default)]
    str: Option<(String, StringId)>,
    #[serde(default)]
    dump_source: Option<SourceDump>,
    #[serde(default)]
    eager_dispatch: Option<Dispatch>,
}

#[derive(Debug, Deserialize)]
struct SourceDump {
    filename: StringId,
}

/// `eager_dispatch` comes in two shapes. An object carrying any of the flat
/// keys must be a valid flat record; anything else is the canonical shape.
#[derive(Debug)]
enum Dispatch {
    Flat(FlatEntry),
    Stacked(Entry),
}

const FLAT_KEYS: [&str; 3] = ["func", "user_filename", "user_line"];

impl<'de> Deserialize<'de> for Dispatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        let is_flat = FLAT_KEYS.iter().any(|key| object.contains_key(*key));
        let value = Value::Object(object);
        if is_flat {
            FlatEntry::deserialize(value)
                .map(Self::Flat)
                .map_err(D::Error::custom)
        } else {
            Entry::deserialize(value)
                .map(Self::Stacked)
                .map_err(D::Error::custom)
        }
    }
}

/// Older producer shape: a single user frame flattened into the record.
#[derive(Debug, Deserialize)]
struct FlatEntry {
    func: String,
    user_filename: StringId,
    user_line: u32,
    #[serde(default)]
    args: Value,
    #[serde(default)]
    kwargs: Value,
    #[serde(default)]
    ret: Value,
    #[serde(default)]
    user_args: Option<Value>,
    #[serde(default)]
    user_kwargs: Option<Value>,
}

impl From<FlatEntry> for Entry {
    fn from(flat: FlatEntry) -> Self {
        Entry {
            target: flat.func,
            stack: vec![Frame {
                name: String::new(),
                filename: flat.user_filename,
                line: flat.user_line,
                locals: Default::default(),
            }],
            args: flat.args,
            kwargs: flat.kwargs,
            ret: flat.ret,
            user_args: flat.user_args,
            user_kwargs: flat.user_kwargs,
        }
    }
}

/// Any value, including `null`, counts as present.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    IgnoredAny::deserialize(deserializer).map(|_| true)
}

impl Metadata {
    fn into_records(self) -> Vec<Record> {
        let mut records = Vec::new();
        if let Some((literal, id)) = self.str {
            records.push(Record::StringIntern { literal, id });
        }
        if let Some(dump) = self.dump_source {
            records.push(Record::SourceDump {
                filename: dump.filename,
            });
        }
        if let Some(dispatch) = self.eager_dispatch {
            records.push(match dispatch {
                Dispatch::Flat(flat) => Record::FlatDispatchEvent(flat.into()),
                Dispatch::Stacked(entry) => Record::DispatchEvent(entry),
            });
        }
        if records.is_empty() {
            records.push(Record::Unrecognized);
        }
        records
    }
}

/// Decode a metadata JSON object.
///
/// Returns whether the record announced a payload, and the records it holds.
/// `None` when the text isn't JSON or doesn't fit the schema. A key repeated
/// in one object keeps its last value.
pub fn decode_metadata(json: &str) -> Option<(bool, Vec<Record>)> {
    let decoded = serde_json::from_str::<Value>(json).and_then(Metadata::deserialize);
    match decoded {
        Ok(metadata) => Some((metadata.has_payload, metadata.into_records())),
        Err(e) => {
            log::debug!("Skipping record with unusable metadata: {e}");
            None
        }
    }
}

/// Consume the tab-prefixed lines directly following a record.
///
/// Stops at the first line without a leading tab, leaving it for the caller.
fn take_payload<'a, I>(lines: &mut Peekable<I>) -> String
where
    I: Iterator<Item = &'a str>,
{
    let continuation: Vec<&str> =
        std::iter::from_fn(|| lines.next_if(|line| line.starts_with('\t')).map(|line| &line[1..]))
            .collect();
    continuation.join("\n")
}

/// Accumulates records in log order.
#[derive(Default)]
struct TraceBuilder {
    trace: Trace,
    /// Location of the last entry, when it came from a flat record
    last_flat_location: Option<(StringId, u32)>,
}

impl TraceBuilder {
    fn apply(&mut self, record: Record, payload: &str) {
        match record {
            // Later definitions of the same id overwrite earlier ones.
            Record::StringIntern { literal, id } => {
                self.trace.strtable.insert(id, literal);
            }
            Record::SourceDump { filename } => {
                self.trace.sourcemap.insert(filename, payload.to_string());
            }
            Record::DispatchEvent(entry) => {
                self.last_flat_location = None;
                self.trace.entries.push(entry);
            }
            // Consecutive flat records at one user location fold into the first.
            Record::FlatDispatchEvent(entry) => {
                let location = entry.stack.first().map(|frame| (frame.filename, frame.line));
                if location.is_some() && location == self.last_flat_location {
                    log::trace!("Folding {} into the previous entry", entry.target);
                    return;
                }
                self.last_flat_location = location;
                self.trace.entries.push(entry);
            }
            Record::Unrecognized => {}
        }
    }

    fn finish(self) -> Trace {
        self.trace
    }
}

/// Parse a whole log into a [`Trace`].
pub fn parse(text: &str) -> Trace {
    let mut builder = TraceBuilder::default();
    let mut lines = text.split('\n').peekable();

    while let Some(line) = lines.next() {
        let Some(log_line) = parse_line(line) else {
            continue;
        };
        let Some((has_payload, records)) = decode_metadata(log_line.metadata) else {
            continue;
        };
        let payload = if has_payload {
            let payload = take_payload(&mut lines);
            log::trace!(
                "{}:{} carried a {}-byte payload",
                log_line.pathname,
                log_line.line,
                payload.len()
            );
            payload
        } else {
            String::new()
        };
        for record in records {
            builder.apply(record, &payload);
        }
    }

    let trace = builder.finish();
    log::debug!(
        "Parsed {} entries, {} interned strings, {} source files",
        trace.entries.len(),
        trace.strtable.len(),
        trace.sourcemap.len()
    );
    trace
}
