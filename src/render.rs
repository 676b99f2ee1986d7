//! Rendering: composing one full terminal frame.
//!
//! A frame is built in memory (text rows, status bar, message bar, cursor placement) and handed
//! to the terminal in a single write, so the screen never shows a half-drawn state.

use crate::buffer::Document;
use crate::highlight::Highlight;
use crate::types::{Mode, Pos};
use crossterm::{
    cursor,
    style::{self, Color},
    terminal::{self, ClearType},
    QueueableCommand,
};
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

/// Rows reserved under the text area for the status and message bars.
pub const BAR_ROWS: usize = 2;

/// Longest filename shown in the status bar, in columns.
const STATUS_NAME_WIDTH: usize = 20;

const WELCOME: &[(usize, &str)] = &[
    (0, "THOR - The Text EdiTHOR"),
    (2, concat!("version ", env!("CARGO_PKG_VERSION"))),
    (3, "made by OrangeXarot"),
    (5, ":help     prints help commands"),
    (6, ":q                  exits thor"),
    (7, ":w              saves the file"),
    (8, ":creds  prints all the credits"),
];

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub rowoff: usize,
    pub coloff: usize,
    /// Text rows (terminal rows minus the two bars).
    pub rows: usize,
    pub cols: usize,
}

impl Viewport {
    pub fn new(term_rows: usize, cols: usize) -> Self {
        Self {
            rowoff: 0,
            coloff: 0,
            rows: term_rows.saturating_sub(BAR_ROWS),
            cols,
        }
    }

    /// Adopt a new terminal size, keeping the offsets.
    pub fn resize(&mut self, term_rows: usize, cols: usize) {
        self.rows = term_rows.saturating_sub(BAR_ROWS);
        self.cols = cols;
    }

    /// Move the offsets so the cursor is visible. Returns the cursor's render column.
    pub fn scroll(&mut self, doc: &Document, cursor: Pos) -> usize {
        let rx = doc
            .line(cursor.y)
            .map_or(0, |l| l.logical_to_render(cursor.x, doc.tab_stop()));

        if cursor.y < self.rowoff {
            self.rowoff = cursor.y;
        }
        if self.rows > 0 && cursor.y >= self.rowoff + self.rows {
            self.rowoff = cursor.y + 1 - self.rows;
        }
        if rx < self.coloff {
            self.coloff = rx;
        }
        if self.cols > 0 && rx >= self.coloff + self.cols {
            self.coloff = rx + 1 - self.cols;
        }
        rx
    }
}

/// How far down the document the view is, as shown in the status bar.
pub fn scroll_percent(rowoff: usize, line_count: usize, rows: usize) -> usize {
    if line_count <= rows {
        return 100;
    }
    (100 * rowoff / (line_count - rows)).min(100)
}

/// Longest prefix of `s` whose display width fits in `max` columns.
pub fn fit_width(s: &str, max: usize) -> &str {
    let mut width = 0;
    for (i, ch) in s.char_indices() {
        width += ch.width().unwrap_or(0);
        if width > max {
            return &s[..i];
        }
    }
    s
}

fn display_width(s: &str) -> usize {
    s.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Everything a frame depends on.
pub struct FrameState<'a> {
    pub doc: &'a Document,
    pub viewport: &'a Viewport,
    pub cursor: Pos,
    /// Cursor render column, as returned by [`Viewport::scroll`].
    pub rx: usize,
    pub filename: Option<&'a str>,
    /// The live status message, if any.
    pub message: Option<&'a str>,
    pub mode: Mode,
}

/// Compose one full frame.
pub fn build_frame(state: &FrameState<'_>) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(state.viewport.rows * (state.viewport.cols + 16));

    out.queue(state.mode.cursor_style())?;
    out.queue(cursor::Hide)?;
    out.queue(cursor::MoveTo(0, 0))?;

    draw_rows(&mut out, state)?;
    draw_status_bar(&mut out, state)?;
    draw_message_bar(&mut out, state)?;

    let vp = state.viewport;
    let x = to_u16(state.rx.saturating_sub(vp.coloff));
    let y = to_u16(state.cursor.y.saturating_sub(vp.rowoff));
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(cursor::Show)?;
    Ok(out)
}

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

fn tilde(out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(style::SetForegroundColor(Color::Blue))?;
    out.queue(style::Print('~'))?;
    out.queue(style::ResetColor)?;
    Ok(())
}

fn draw_rows(out: &mut Vec<u8>, state: &FrameState<'_>) -> io::Result<()> {
    let vp = state.viewport;
    let doc = state.doc;

    for y in 0..vp.rows {
        match doc.line(y + vp.rowoff) {
            Some(line) => {
                let start = vp.coloff.min(line.rendered.len());
                let end = (start + vp.cols).min(line.rendered.len());
                draw_text(out, &line.rendered[start..end], &line.highlight[start..end])?;
            }
            None => {
                let banner = (doc.line_count() == 0)
                    .then(|| WELCOME.iter().find(|(at, _)| vp.rows / 3 + at == y))
                    .flatten();
                match banner {
                    Some((_, text)) => draw_centered_banner(out, text, vp.cols)?,
                    None => tilde(out)?,
                }
            }
        }
        out.queue(terminal::Clear(ClearType::UntilNewLine))?;
        out.write_all(b"\r\n")?;
    }
    Ok(())
}

fn draw_centered_banner(out: &mut Vec<u8>, text: &str, cols: usize) -> io::Result<()> {
    let text = fit_width(text, cols);
    let mut padding = (cols - display_width(text)) / 2;
    if padding > 0 {
        tilde(out)?;
        padding -= 1;
    }
    out.extend(std::iter::repeat(b' ').take(padding));
    out.write_all(text.as_bytes())
}

fn draw_text(out: &mut Vec<u8>, text: &[u8], hl: &[Highlight]) -> io::Result<()> {
    let mut current: Option<Highlight> = None;
    for (&c, &h) in text.iter().zip(hl) {
        if c.is_ascii_control() {
            let sym = if c <= 26 { b'@' } else { b'?' };
            out.write_all(b"\x1b[7m")?;
            out.push(sym);
            out.write_all(b"\x1b[m")?;
            if let Some(cur) = current {
                set_color(out, cur)?;
            }
        } else if h == Highlight::Normal {
            if current.take().is_some() {
                out.write_all(b"\x1b[39m\x1b[49m")?;
            }
            out.push(c);
        } else {
            if current.map(Highlight::color_code) != Some(h.color_code()) {
                if current.and_then(Highlight::forced_foreground).is_some() {
                    out.write_all(b"\x1b[49m")?;
                }
                current = Some(h);
                set_color(out, h)?;
            }
            out.push(c);
        }
    }
    out.write_all(b"\x1b[39m\x1b[49m")
}

fn set_color(out: &mut Vec<u8>, h: Highlight) -> io::Result<()> {
    match h.forced_foreground() {
        Some(fg) => write!(out, "\x1b[{fg};{}m", h.color_code()),
        None => write!(out, "\x1b[{}m", h.color_code()),
    }
}

fn draw_status_bar(out: &mut Vec<u8>, state: &FrameState<'_>) -> io::Result<()> {
    let vp = state.viewport;
    let doc = state.doc;

    let name = match state.filename {
        Some(f) => fit_width(f, STATUS_NAME_WIDTH),
        None => "[New File]",
    };
    let dirty = if doc.is_dirty() { "*" } else { "" };
    let left = format!(" {name}{dirty} - {} lines", doc.line_count());

    let filetype = match doc.syntax() {
        Some(s) => s.name.as_str(),
        None => "filetype not detected",
    };
    let percent = scroll_percent(vp.rowoff, doc.line_count(), vp.rows);
    let right = format!(
        "{filetype} | {percent}% {},{} ",
        state.cursor.y + 1,
        state.cursor.x + 1
    );

    out.queue(style::SetAttribute(style::Attribute::Reverse))?;
    let left = fit_width(&left, vp.cols);
    out.write_all(left.as_bytes())?;

    let mut len = display_width(left);
    let rlen = display_width(&right);
    while len < vp.cols {
        if vp.cols - len == rlen {
            out.write_all(right.as_bytes())?;
            break;
        }
        out.push(b' ');
        len += 1;
    }
    out.queue(style::SetAttribute(style::Attribute::Reset))?;
    out.write_all(b"\r\n")
}

fn draw_message_bar(out: &mut Vec<u8>, state: &FrameState<'_>) -> io::Result<()> {
    out.queue(terminal::Clear(ClearType::UntilNewLine))?;
    let Some(msg) = state.message.filter(|m| !m.is_empty()) else {
        return Ok(());
    };
    let cols = state.viewport.cols;
    let msg = fit_width(msg, cols);
    let padding = (cols - display_width(msg)) / 2;
    out.extend(std::iter::repeat(b' ').take(padding));
    out.write_all(msg.as_bytes())
}
