//! Incremental search over rendered line text.
//!
//! [`SearchState`] is fed the current query after every keystroke of the search prompt. It keeps
//! the last matched line and a direction so arrow keys step between matches, and it overlays the
//! current match with [`Highlight::Match`], restoring the line's own classes on the next update.

use crate::buffer::Document;
use crate::highlight::Highlight;
use crate::input::{Direction, Key};

/// Scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

/// Where a match was found: line index and render column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    pub row: usize,
    pub render_col: usize,
}

#[derive(Debug, Default)]
pub struct SearchState {
    last_match: Option<usize>,
    direction: SearchDirection,
    saved: Option<(usize, Vec<Highlight>)>,
}

/// Byte offset of the first occurrence of `needle` in `haystack`.
pub fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    /// Put back the highlight row saved under the current overlay, if any.
    pub fn restore(&mut self, doc: &mut Document) {
        if let Some((row, hl)) = self.saved.take() {
            if let Some(dst) = doc.highlight_mut(row) {
                if dst.len() == hl.len() {
                    dst.copy_from_slice(&hl);
                }
            }
        }
    }

    /// Process one prompt update. `key` is the key that produced `query`.
    pub fn update(&mut self, doc: &mut Document, query: &[u8], key: Key) -> Option<SearchHit> {
        self.restore(doc);

        match key {
            Key::Enter | Key::Escape => {
                self.last_match = None;
                self.direction = SearchDirection::Forward;
                return None;
            }
            Key::Arrow(Direction::Right | Direction::Down) => {
                self.direction = SearchDirection::Forward;
            }
            Key::Arrow(Direction::Left | Direction::Up) => {
                self.direction = SearchDirection::Backward;
            }
            _ => {
                self.last_match = None;
                self.direction = SearchDirection::Forward;
            }
        }

        if self.last_match.is_none() {
            self.direction = SearchDirection::Forward;
        }
        if query.is_empty() {
            return None;
        }

        let n = doc.line_count();
        let mut current = self.last_match;
        for _ in 0..n {
            let next = match (current, self.direction) {
                (None, _) => 0,
                (Some(c), SearchDirection::Forward) => (c + 1) % n,
                (Some(0), SearchDirection::Backward) => n - 1,
                (Some(c), SearchDirection::Backward) => c - 1,
            };
            current = Some(next);

            let Some(line) = doc.line(next) else { break };
            let Some(col) = find_bytes(&line.rendered, query) else {
                continue;
            };

            self.last_match = Some(next);
            if let Some(hl) = doc.highlight_mut(next) {
                self.saved = Some((next, hl.to_vec()));
                hl[col..col + query.len()].fill(Highlight::Match);
            }
            tracing::debug!(row = next, col, "search hit");
            return Some(SearchHit {
                row: next,
                render_col: col,
            });
        }
        None
    }
}
