//! Stack-aware navigation over a [`Trace`].
//!
//! A [`Cursor`] selects an entry and a zoom depth within that entry's stack
//! (0 is the outermost frame). Every operation takes a cursor by value and
//! returns the new one; nothing here mutates the trace or keeps state.
//!
//! Out-of-range cursors are clamped rather than rejected, so any cursor the
//! caller holds is safe to pass back in, even after reloading a shorter trace.

use serde::Serialize;

use super::model::{Entry, Frame, Trace};

/// Direction of travel through the entry sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// The neighbouring index in this direction, if it is in `0..len`.
    fn advance(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Direction::Next => index.checked_add(1).filter(|&j| j < len),
            Direction::Prev => index.checked_sub(1),
        }
    }
}

/// Navigation position: entry index plus focused stack depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Cursor {
    pub index: usize,
    pub zoom: usize,
}

impl Cursor {
    pub fn new(index: usize, zoom: usize) -> Self {
        Self { index, zoom }
    }

    /// Pull `index` and `zoom` back into range for `trace`.
    pub fn clamped(self, trace: &Trace) -> Self {
        let Some(last) = trace.entries.len().checked_sub(1) else {
            return Self::default();
        };
        let index = self.index.min(last);
        let zoom = self.zoom.min(trace.entries[index].innermost_depth());
        Self { index, zoom }
    }

    /// Jump to entry `index`, focusing its innermost frame.
    pub fn step_to(trace: &Trace, index: usize) -> Self {
        let Some(last) = trace.entries.len().checked_sub(1) else {
            return Self::default();
        };
        let index = index.min(last);
        Self {
            index,
            zoom: trace.entries[index].innermost_depth(),
        }
    }

    /// Move to the adjacent entry regardless of zoom, then behave like
    /// [`Cursor::step_to`]. At either end this only re-focuses the innermost
    /// frame of the current entry.
    pub fn step(self, trace: &Trace, direction: Direction) -> Self {
        let current = self.clamped(trace);
        let index = direction
            .advance(current.index, trace.entries.len())
            .unwrap_or(current.index);
        Self::step_to(trace, index)
    }

    /// Focus the caller of the current frame. No-op at the outermost frame.
    pub fn zoom_up(self, trace: &Trace) -> Self {
        let current = self.clamped(trace);
        Self {
            zoom: current.zoom.saturating_sub(1),
            ..current
        }
    }

    /// Focus the callee of the current frame. No-op at the innermost frame.
    pub fn zoom_down(self, trace: &Trace) -> Self {
        let current = self.clamped(trace);
        Self {
            zoom: current.zoom + 1,
            ..current
        }
        .clamped(trace)
    }

    pub fn zoom_to(self, trace: &Trace, zoom: usize) -> Self {
        Self { zoom, ..self }.clamped(trace)
    }

    /// Find the next observable step at the current zoom depth.
    ///
    /// Scans in `direction` for an entry that shares every frame above the
    /// zoomed one and whose zoomed frame has moved to a new line (or is the
    /// innermost frame of that entry). The scan gives up, leaving the cursor
    /// where it is, as soon as the enclosing frames differ or the zoomed
    /// frame belongs to another function.
    ///
    /// Repeated calls from the same line (a call in a loop, say) are not a
    /// step at a shallow zoom until the line changes or the zoomed frame
    /// becomes the innermost one.
    pub fn navigate(self, trace: &Trace, direction: Direction) -> Self {
        let current = self.clamped(trace);
        let Some(entry) = trace.entries.get(current.index) else {
            return current;
        };
        let Some(focused) = entry.stack.get(current.zoom) else {
            return current;
        };
        let zoom = current.zoom;
        let path = &entry.stack[..zoom];

        let mut j = current.index;
        while let Some(next) = direction.advance(j, trace.entries.len()) {
            j = next;
            let stack = &trace.entries[j].stack;

            // Enclosing frames returned, or we left the subtree of interest.
            if stack.len() < path.len() || stack[..path.len()] != *path {
                return current;
            }
            let Some(candidate) = stack.get(zoom) else {
                return current;
            };
            let innermost = zoom + 1 == stack.len();

            // Deeper activity under the same line.
            if candidate == focused && !innermost {
                continue;
            }
            // Control left this function at this depth.
            if candidate.filename != focused.filename || candidate.name != focused.name {
                return current;
            }
            if candidate.line != focused.line || innermost {
                return Self { index: j, zoom };
            }
        }

        current
    }
}

/// The entry under the cursor, if the trace has any.
pub fn current_entry(trace: &Trace, cursor: Cursor) -> Option<&Entry> {
    let cursor = cursor.clamped(trace);
    trace.entries.get(cursor.index)
}

/// The frame at the cursor's zoom depth, if the entry has a stack.
pub fn current_frame(trace: &Trace, cursor: Cursor) -> Option<&Frame> {
    let cursor = cursor.clamped(trace);
    current_entry(trace, cursor)?.stack.get(cursor.zoom)
}
