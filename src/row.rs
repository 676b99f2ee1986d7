//! A single document line and the mapping between logical and render columns.
//!
//! Lines are stored as raw bytes. The rendered form expands every tab to the next multiple of the
//! tab stop, so a logical (byte) column and the screen column it lands on differ whenever a tab
//! precedes it.

use crate::highlight::Highlight;

/// Tab stop used when no configuration overrides it.
pub const DEFAULT_TAB_STOP: usize = 8;

/// One line of the document.
///
/// Invariants kept by [`crate::buffer::Document`]: `highlight.len() == rendered.len()`,
/// `rendered.len() >= raw.len()` and `index` equals the line's storage position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub index: usize,
    pub raw: Vec<u8>,
    pub rendered: Vec<u8>,
    pub highlight: Vec<Highlight>,
    /// Whether a block comment is still open at the end of this line.
    pub open_comment: bool,
}

impl Line {
    /// Create a line and derive its rendered form. Highlighting starts out all-normal.
    pub fn new(index: usize, raw: Vec<u8>, tab_stop: usize) -> Self {
        let mut line = Self {
            index,
            raw,
            ..Self::default()
        };
        line.render(tab_stop);
        line
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Rebuild `rendered` from `raw` and reset `highlight` to the new length.
    pub fn render(&mut self, tab_stop: usize) {
        let tab_stop = tab_stop.max(1);
        self.rendered.clear();
        for &b in &self.raw {
            if b == b'\t' {
                self.rendered.push(b' ');
                while self.rendered.len() % tab_stop != 0 {
                    self.rendered.push(b' ');
                }
            } else {
                self.rendered.push(b);
            }
        }
        self.highlight = vec![Highlight::Normal; self.rendered.len()];
    }

    /// Render column of logical column `col` (clamped to the line length).
    pub fn logical_to_render(&self, col: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        self.raw
            .iter()
            .take(col)
            .fold(0, |rx, &b| match b {
                b'\t' => rx + tab_stop - rx % tab_stop,
                _ => rx + 1,
            })
    }

    /// Smallest logical column whose cumulative render width exceeds `render_col`.
    ///
    /// Every render column inside a tab's expansion maps back to that tab, so this is only a
    /// true inverse of [`Line::logical_to_render`] on tab-free text. Columns past the end of
    /// the line map to the line length.
    pub fn render_to_logical(&self, render_col: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut cur = 0;
        for (cx, &b) in self.raw.iter().enumerate() {
            cur += match b {
                b'\t' => tab_stop - cur % tab_stop,
                _ => 1,
            };
            if cur > render_col {
                return cx;
            }
        }
        self.raw.len()
    }
}
