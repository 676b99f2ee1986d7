//! Common types used throughout the editor.

use crossterm::cursor::SetCursorStyle;
use std::time::{Duration, Instant};

/// A position in the document.
///
/// - `y`: line index (0-based). May equal the line count (the virtual line past the end).
/// - `x`: **byte index** within that line's raw text. This is *not* a render column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub y: usize,
    pub x: usize,
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Editing mode. Keys mean different things in each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation and single-key commands (`i`, `:`, `/`, `d`, `y`, `p`, ...).
    #[default]
    Command,
    /// Text entry.
    Insert,
}

impl Mode {
    /// Cursor shape drawn at the start of every frame.
    pub fn cursor_style(self) -> SetCursorStyle {
        match self {
            Self::Command => SetCursorStyle::BlinkingBlock,
            Self::Insert => SetCursorStyle::BlinkingBar,
        }
    }
}

/// Short-lived status message shown in the message bar.
#[derive(Clone, Debug)]
pub struct StatusMsg {
    pub text: String,
    pub at: Instant,
}

impl StatusMsg {
    /// Longest message kept, in bytes.
    pub const MAX_LEN: usize = 79;

    pub fn new(text: &str) -> Self {
        Self {
            text: crate::utils::truncate_at_boundary(text, Self::MAX_LEN).to_string(),
            at: Instant::now(),
        }
    }

    /// A message is shown only while it is younger than `ttl`.
    pub fn is_live(&self, ttl: Duration) -> bool {
        !self.text.is_empty() && self.at.elapsed() < ttl
    }
}

/// What the event loop should do after a key has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}
