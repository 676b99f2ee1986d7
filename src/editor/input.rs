//! Key dispatch for both modes, and the cursor-relative editing operations.

use super::Editor;
use crate::input::{ctrl, ByteSource, Direction, Key};
use crate::terminal::Terminal;
use crate::types::{Flow, Mode, Pos};
use anyhow::Result;

/// Closing byte inserted after an opening bracket or quote.
fn closer(b: u8) -> Option<u8> {
    match b {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        b'"' => Some(b'"'),
        b'\'' => Some(b'\''),
        _ => None,
    }
}

impl<S: ByteSource, T: Terminal> Editor<S, T> {
    /// Read one key and act on it.
    pub fn process_keypress(&mut self) -> Result<Flow> {
        let key = self.read_key()?;
        match self.mode {
            Mode::Insert => {
                self.insert_mode_key(key);
                Ok(Flow::Continue)
            }
            Mode::Command => self.command_mode_key(key),
        }
    }

    fn insert_mode_key(&mut self, key: Key) {
        self.set_status("-- INSERT MODE --");
        match key {
            Key::Enter => self.insert_newline(),
            Key::Home => self.go_home(),
            Key::End => self.go_end(),
            Key::Backspace => self.delete_left(),
            Key::Delete => {
                self.move_cursor(Direction::Right);
                self.delete_left();
            }
            Key::PageUp | Key::PageDown => self.page(key),
            Key::Arrow(dir) => self.move_cursor(dir),
            Key::Tab => {
                for _ in 0..self.config.soft_tab_width {
                    self.insert_char(b' ');
                }
            }
            Key::ScrollUp | Key::ScrollDown => self.scroll_view(key),
            Key::Escape => self.set_mode(Mode::Command),
            Key::Byte(b) if b == ctrl(b'l') => self.set_mode(Mode::Command),
            Key::Byte(b) => match closer(b).filter(|_| self.config.auto_pair) {
                Some(close) => {
                    self.insert_char(b);
                    self.insert_char(close);
                    self.move_cursor(Direction::Left);
                }
                None => self.insert_char(b),
            },
            Key::ShiftArrow(_) => {}
        }
    }

    fn command_mode_key(&mut self, key: Key) -> Result<Flow> {
        match key {
            Key::Delete => {
                self.move_cursor(Direction::Right);
                self.delete_left();
            }
            Key::Byte(b'x') => {
                self.move_cursor(Direction::Right);
                self.delete_left();
                self.set_status("Too lazy to enter insert mode huh?");
            }
            Key::Byte(b'X') => self.delete_left(),
            Key::PageUp | Key::PageDown => self.page(key),
            Key::Byte(b'g') => {
                self.cursor.y = 0;
                self.clamp_cursor_x();
                self.set_status("The Beginning Of Time");
            }
            Key::Byte(b'G') => {
                self.cursor.y = self.doc.line_count();
                self.clamp_cursor_x();
                self.set_status("The End Of Time");
            }
            Key::Arrow(dir) => self.move_cursor(dir),
            Key::Byte(b',') => self.move_cursor_by(Direction::Left, 5),
            Key::Byte(b'.') => self.move_cursor_by(Direction::Right, 5),
            Key::ShiftArrow(dir) => self.move_cursor_by(dir, 4),
            Key::ScrollUp | Key::ScrollDown => self.scroll_view(key),
            Key::Home => self.go_home(),
            Key::End => self.go_end(),
            Key::Byte(b'i') => self.set_mode(Mode::Insert),
            Key::Byte(b':') => return self.command_prompt(),
            Key::Byte(b'/') => self.find()?,
            Key::Byte(b'o') => {
                let at = (self.cursor.y + 1).min(self.doc.line_count());
                self.doc.insert_line(at, b"");
                self.cursor.y = at;
                self.cursor.x = 0;
                self.set_mode(Mode::Insert);
            }
            Key::Byte(b'O') => {
                let at = self.cursor.y.min(self.doc.line_count());
                self.doc.insert_line(at, b"");
                self.cursor.y = at;
                self.cursor.x = 0;
                self.set_mode(Mode::Insert);
            }
            Key::Byte(b'd') => self.delete_prompt()?,
            Key::Byte(b'y') => self.yank_prompt()?,
            Key::Byte(b'p') => self.paste(),
            _ => {}
        }
        Ok(Flow::Continue)
    }

    /// Insert `b` at the cursor, creating a line first when the cursor is past the end.
    pub fn insert_char(&mut self, b: u8) {
        if self.cursor.y == self.doc.line_count() {
            self.doc.insert_line(self.cursor.y, b"");
        }
        self.doc.insert_char(self.cursor.y, self.cursor.x, b);
        self.cursor.x += 1;
    }

    /// Break the line at the cursor. At column 0 an empty line is opened above instead.
    pub fn insert_newline(&mut self) {
        if self.cursor.x == 0 {
            self.doc.insert_line(self.cursor.y, b"");
        } else {
            self.doc.split_line(self.cursor.y, self.cursor.x);
        }
        self.cursor.y += 1;
        self.cursor.x = 0;
    }

    /// Delete the byte left of the cursor, joining with the previous line at column 0.
    pub fn delete_left(&mut self) {
        let Pos { y, x } = self.cursor;
        if y >= self.doc.line_count() || (x == 0 && y == 0) {
            return;
        }
        if x > 0 {
            self.doc.delete_char(y, x - 1);
            self.cursor.x -= 1;
        } else if let Some(col) = self.doc.join_with_previous(y) {
            self.cursor.y -= 1;
            self.cursor.x = col;
        }
    }
}
