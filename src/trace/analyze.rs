//! Summarize a parsed trace.

use std::collections::{BTreeSet, HashMap};

use super::model::{StringId, Trace, resolve_filename};

/// How often one dispatch target was called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetStats {
    pub name: String,
    pub count: usize,
}

/// Activity attributed to one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub id: StringId,
    /// Resolved filename, empty if the id was never interned
    pub name: String,
    /// Entries whose innermost frame is in this file
    pub entries: usize,
    /// Distinct lines seen in innermost frames
    pub lines: usize,
    pub has_source: bool,
}

/// Complete summary of a trace.
#[derive(Debug)]
pub struct TraceSummary {
    pub entry_count: usize,
    /// Entries with an empty stack (not navigable)
    pub stackless: usize,
    pub max_depth: usize,
    pub interned: usize,
    pub sources: usize,
    /// Calls grouped by target, most frequent first
    pub targets: Vec<TargetStats>,
    /// Files by innermost-frame activity, busiest first
    pub files: Vec<FileStats>,
    /// Filename ids referenced by frames but never interned
    pub unresolved: Vec<StringId>,
}

/// Analyze a trace and produce a summary.
pub fn analyze(trace: &Trace) -> TraceSummary {
    TraceSummary {
        entry_count: trace.entries.len(),
        stackless: trace.entries.iter().filter(|e| e.stack.is_empty()).count(),
        max_depth: trace.entries.iter().map(|e| e.stack.len()).max().unwrap_or(0),
        interned: trace.strtable.len(),
        sources: trace.sourcemap.len(),
        targets: compute_target_stats(trace),
        files: compute_file_stats(trace),
        unresolved: compute_unresolved(trace),
    }
}

fn compute_target_stats(trace: &Trace) -> Vec<TargetStats> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in &trace.entries {
        *counts.entry(entry.target.as_str()).or_default() += 1;
    }

    let mut stats: Vec<TargetStats> = counts
        .into_iter()
        .map(|(name, count)| TargetStats {
            name: name.to_string(),
            count,
        })
        .collect();
    // Ties break by name so output is stable
    stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    stats
}

fn compute_file_stats(trace: &Trace) -> Vec<FileStats> {
    let mut groups: HashMap<StringId, (usize, BTreeSet<u32>)> = HashMap::new();
    for frame in trace.entries.iter().filter_map(|e| e.stack.last()) {
        let (count, lines) = groups.entry(frame.filename).or_default();
        *count += 1;
        lines.insert(frame.line);
    }

    let mut stats: Vec<FileStats> = groups
        .into_iter()
        .map(|(id, (entries, lines))| FileStats {
            id,
            name: resolve_filename(trace, id).to_string(),
            entries,
            lines: lines.len(),
            has_source: trace.sourcemap.contains_key(&id),
        })
        .collect();
    stats.sort_by(|a, b| b.entries.cmp(&a.entries).then_with(|| a.id.cmp(&b.id)));
    stats
}

fn compute_unresolved(trace: &Trace) -> Vec<StringId> {
    let referenced: BTreeSet<StringId> = trace
        .entries
        .iter()
        .flat_map(|e| e.stack.iter().map(|f| f.filename))
        .collect();
    referenced
        .into_iter()
        .filter(|id| !trace.strtable.contains_key(id))
        .collect()
}
