//! The document: an ordered list of [`Line`]s plus edit bookkeeping.
//!
//! Every mutating operation re-renders the lines it touched and re-runs syntax highlighting,
//! walking forward while the block-comment state leaving a line differs from the state the next
//! line was last classified with.

use crate::highlight::{highlight_line, Highlight};
use crate::row::{Line, DEFAULT_TAB_STOP};
use crate::syntax::SyntaxProfile;
use std::cmp::min;

/// Split raw file bytes into lines, stripping `\n` and any trailing `\r`.
///
/// A final newline does not start an extra empty line.
pub fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut lines: Vec<Vec<u8>> = bytes
        .split(|&b| b == b'\n')
        .map(|l| {
            let end = l.iter().rposition(|&b| b != b'\r').map_or(0, |p| p + 1);
            l[..end].to_vec()
        })
        .collect();
    if bytes.is_empty() || bytes.ends_with(b"\n") {
        lines.pop();
    }
    lines
}

/// The document buffer.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Line>,
    dirty: usize,
    syntax: Option<SyntaxProfile>,
    tab_stop: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP)
    }
}

impl Document {
    /// Create an empty document (zero lines).
    pub fn new(tab_stop: usize) -> Self {
        Self {
            lines: Vec::new(),
            dirty: 0,
            syntax: None,
            tab_stop: tab_stop.max(1),
        }
    }

    /// Build a document from already-split lines. The result is clean.
    pub fn from_lines<I, L>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let mut doc = Self::new(tab_stop);
        doc.lines = lines
            .into_iter()
            .enumerate()
            .map(|(i, raw)| Line::new(i, raw.into(), doc.tab_stop))
            .collect();
        doc.rehighlight_all();
        doc
    }

    /// The save image: every line followed by a single `\n`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for line in &self.lines {
            out.extend_from_slice(&line.raw);
            out.push(b'\n');
        }
        out
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, at: usize) -> Option<&Line> {
        self.lines.get(at)
    }

    /// Raw length of line `at`, or 0 past the end.
    pub fn line_len(&self, at: usize) -> usize {
        self.lines.get(at).map_or(0, Line::len)
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Number of edits since load or the last save.
    pub fn dirty(&self) -> usize {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = 0;
    }

    pub fn syntax(&self) -> Option<&SyntaxProfile> {
        self.syntax.as_ref()
    }

    /// Switch syntax profile and reclassify every line.
    pub fn set_syntax(&mut self, syntax: Option<SyntaxProfile>) {
        self.syntax = syntax;
        self.rehighlight_all();
    }

    /// Mutable highlight row, for transient overlays that do not count as edits.
    pub fn highlight_mut(&mut self, at: usize) -> Option<&mut [Highlight]> {
        self.lines.get_mut(at).map(|l| l.highlight.as_mut_slice())
    }

    /// Insert a new line at `at` (0..=line_count). Out of range is ignored.
    pub fn insert_line(&mut self, at: usize, bytes: &[u8]) {
        if at > self.lines.len() {
            return;
        }
        let mut line = Line::new(at, bytes.to_vec(), self.tab_stop);
        // The line now following this one was classified against this seed.
        line.open_comment = self.exit_state_before(at);
        self.lines.insert(at, line);
        self.reindex_from(at + 1);
        self.cascade(at, at);
        self.dirty += 1;
    }

    /// Remove line `at`. Out of range is ignored.
    pub fn delete_line(&mut self, at: usize) {
        if at >= self.lines.len() {
            return;
        }
        self.lines.remove(at);
        self.reindex_from(at);
        if at < self.lines.len() {
            self.cascade(at, at);
        }
        self.dirty += 1;
    }

    /// Insert byte `ch` at `col` on line `row`; a column past the end appends.
    pub fn insert_char(&mut self, row: usize, col: usize, ch: u8) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let col = min(col, line.raw.len());
        line.raw.insert(col, ch);
        self.touch(row);
    }

    /// Delete the byte at `col` on line `row`. Out of range is ignored.
    pub fn delete_char(&mut self, row: usize, col: usize) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        if col >= line.raw.len() {
            return;
        }
        line.raw.remove(col);
        self.touch(row);
    }

    /// Append `bytes` to the end of line `row`.
    pub fn append_bytes(&mut self, row: usize, bytes: &[u8]) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        line.raw.extend_from_slice(bytes);
        self.touch(row);
    }

    /// Split line `row` at `col`; the new line `row + 1` holds the suffix.
    pub fn split_line(&mut self, row: usize, col: usize) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let col = min(col, line.raw.len());
        let suffix = line.raw.split_off(col);
        let seed = line.open_comment;
        line.render(self.tab_stop);

        let mut tail = Line::new(row + 1, suffix, self.tab_stop);
        tail.open_comment = seed;
        self.lines.insert(row + 1, tail);
        self.reindex_from(row + 2);
        self.cascade(row, row + 1);
        self.dirty += 1;
    }

    /// Append line `row` to line `row - 1` and remove it. Returns the join column on the
    /// previous line, or `None` when there is no previous line.
    pub fn join_with_previous(&mut self, row: usize) -> Option<usize> {
        if row == 0 || row >= self.lines.len() {
            return None;
        }
        let line = self.lines.remove(row);
        let prev = &mut self.lines[row - 1];
        let join_col = prev.raw.len();
        prev.raw.extend_from_slice(&line.raw);
        // The line after the removed one was classified against the removed line's exit state.
        prev.open_comment = line.open_comment;
        prev.render(self.tab_stop);
        self.reindex_from(row);
        self.cascade(row - 1, row - 1);
        self.dirty += 1;
        Some(join_col)
    }

    fn touch(&mut self, row: usize) {
        self.lines[row].render(self.tab_stop);
        self.cascade(row, row);
        self.dirty += 1;
    }

    fn reindex_from(&mut self, at: usize) {
        for (i, line) in self.lines.iter_mut().enumerate().skip(at) {
            line.index = i;
        }
    }

    fn exit_state_before(&self, at: usize) -> bool {
        at.checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .is_some_and(|l| l.open_comment)
    }

    fn rehighlight_all(&mut self) {
        if !self.lines.is_empty() {
            let last = self.lines.len() - 1;
            self.cascade(0, last);
        }
    }

    /// Reclassify lines `start..=through` unconditionally, then keep walking forward while a
    /// line's exit state differs from its stored one. Returns the number of lines visited.
    fn cascade(&mut self, start: usize, through: usize) -> usize {
        let mut at = start;
        let mut visited = 0;
        while at < self.lines.len() {
            let seed = self.exit_state_before(at);
            let line = &mut self.lines[at];
            let exit = match &self.syntax {
                Some(profile) => {
                    let (hl, exit) = highlight_line(&line.rendered, profile, seed);
                    line.highlight = hl;
                    exit
                }
                None => {
                    line.highlight = vec![Highlight::Normal; line.rendered.len()];
                    false
                }
            };
            let changed = line.open_comment != exit;
            line.open_comment = exit;
            visited += 1;
            if !changed && at >= through {
                break;
            }
            at += 1;
        }
        if visited > 1 {
            tracing::trace!(start, visited, "highlight cascade");
        }
        visited
    }
}
