//! Line-wise yank buffer.
//!
//! Holds whole lines only. A yank replaces the previous contents. When enabled, yanked text is
//! also pushed to the system clipboard; that copy is write-only and failures are ignored.

use crate::buffer::Document;

#[derive(Default)]
pub struct Clipboard {
    lines: Vec<Vec<u8>>,
    system: Option<arboard::Clipboard>,
}

impl Clipboard {
    pub fn new(use_system: bool) -> Self {
        let system = if use_system {
            arboard::Clipboard::new()
                .map_err(|e| tracing::warn!("system clipboard unavailable: {e}"))
                .ok()
        } else {
            None
        };
        Self {
            lines: Vec::new(),
            system,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    /// Copy up to `count` lines starting at `at`. Returns how many lines were taken.
    ///
    /// A start past the last line takes nothing and leaves the buffer as it was.
    pub fn yank(&mut self, doc: &Document, at: usize, count: usize) -> usize {
        if at >= doc.line_count() || count == 0 {
            return 0;
        }
        let end = at.saturating_add(count).min(doc.line_count());
        let taken = &doc.lines()[at..end];
        self.lines = taken.iter().map(|l| l.raw.clone()).collect();
        self.mirror();
        tracing::debug!(at, lines = self.lines.len(), "yank");
        self.lines.len()
    }

    /// Yank, then delete the yanked lines. Returns how many lines were removed.
    pub fn cut(&mut self, doc: &mut Document, at: usize, count: usize) -> usize {
        let taken = self.yank(doc, at, count);
        for _ in 0..taken {
            doc.delete_line(at);
        }
        taken
    }

    /// Insert the buffered lines right after line `after`. Returns how many lines were pasted,
    /// or `None` when there is nothing to paste.
    pub fn paste(&self, doc: &mut Document, after: usize) -> Option<usize> {
        if self.lines.is_empty() {
            return None;
        }
        let start = after.saturating_add(1).min(doc.line_count());
        for (i, line) in self.lines.iter().enumerate() {
            doc.insert_line(start + i, line);
        }
        tracing::debug!(start, lines = self.lines.len(), "paste");
        Some(self.lines.len())
    }

    fn mirror(&mut self) {
        let Some(system) = self.system.as_mut() else {
            return;
        };
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(&String::from_utf8_lossy(line));
            text.push('\n');
        }
        if let Err(e) = system.set_text(text) {
            tracing::warn!("system clipboard write failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines(lines.iter().map(|l| l.as_bytes()), 8)
    }

    fn raw(doc: &Document) -> Vec<String> {
        doc.lines()
            .iter()
            .map(|l| String::from_utf8_lossy(&l.raw).into_owned())
            .collect()
    }

    #[test]
    fn yank_then_paste_duplicates_block() {
        let mut d = doc(&["a", "b", "c", "d"]);
        let mut cb = Clipboard::new(false);
        assert_eq!(cb.yank(&d, 1, 2), 2);
        assert_eq!(cb.paste(&mut d, 2), Some(2));
        assert_eq!(raw(&d), ["a", "b", "c", "b", "c", "d"]);
    }

    #[test]
    fn yank_is_clamped_to_document_end() {
        let d = doc(&["a", "b"]);
        let mut cb = Clipboard::new(false);
        assert_eq!(cb.yank(&d, 1, 10), 1);
        assert_eq!(cb.lines(), [b"b".to_vec()]);
    }

    #[test]
    fn yank_past_the_end_keeps_the_buffer() {
        let d = doc(&["a", "b"]);
        let mut cb = Clipboard::new(false);
        cb.yank(&d, 0, 1);
        assert_eq!(cb.yank(&d, 2, 1), 0);
        assert_eq!(cb.yank(&d, 0, 0), 0);
        assert_eq!(cb.lines(), [b"a".to_vec()]);

        let mut d = doc(&["a", "b"]);
        assert_eq!(cb.cut(&mut d, 2, 3), 0);
        assert_eq!(raw(&d), ["a", "b"]);
        assert_eq!(cb.len(), 1);
    }

    #[test]
    fn yank_replaces_previous_contents() {
        let d = doc(&["a", "b"]);
        let mut cb = Clipboard::new(false);
        cb.yank(&d, 0, 2);
        cb.yank(&d, 1, 1);
        assert_eq!(cb.len(), 1);
    }

    #[test]
    fn cut_removes_lines() {
        let mut d = doc(&["a", "b", "c"]);
        let mut cb = Clipboard::new(false);
        assert_eq!(cb.cut(&mut d, 0, 2), 2);
        assert_eq!(raw(&d), ["c"]);
        assert_eq!(cb.paste(&mut d, 0), Some(2));
        assert_eq!(raw(&d), ["c", "a", "b"]);
    }

    #[test]
    fn paste_into_empty_document() {
        let src = doc(&["x"]);
        let mut cb = Clipboard::new(false);
        cb.yank(&src, 0, 1);
        let mut d = Document::default();
        assert_eq!(cb.paste(&mut d, 0), Some(1));
        assert_eq!(raw(&d), ["x"]);
    }

    #[test]
    fn empty_paste_is_noop() {
        let mut d = doc(&["a"]);
        let cb = Clipboard::new(false);
        assert_eq!(cb.paste(&mut d, 0), None);
        assert!(!d.is_dirty());
    }
}
