//! One-line prompts in the message bar.

use super::Editor;
use crate::input::{ctrl, ByteSource, Key};
use crate::terminal::Terminal;
use anyhow::Result;

impl<S: ByteSource, T: Terminal> Editor<S, T> {
    /// Read a line of input shown after `label` in the message bar.
    ///
    /// Returns `None` when the user presses Escape. Enter on an empty buffer keeps prompting.
    /// `callback`, when given, sees the buffer and the key after every keystroke, including the
    /// final Enter or Escape.
    pub fn prompt(
        &mut self,
        label: &str,
        callback: Option<fn(&mut Self, &str, Key)>,
    ) -> Result<Option<String>> {
        let mut buf = String::new();
        loop {
            self.set_status(format!("{label}{buf}"));
            self.refresh_screen()?;

            let key = self.read_key()?;
            match key {
                Key::Delete | Key::Backspace => {
                    buf.pop();
                }
                Key::Byte(b) if b == ctrl(b'h') => {
                    buf.pop();
                }
                Key::Escape => {
                    self.set_status("");
                    if let Some(cb) = callback {
                        cb(self, &buf, key);
                    }
                    return Ok(None);
                }
                Key::Enter if !buf.is_empty() => {
                    self.set_status("");
                    if let Some(cb) = callback {
                        cb(self, &buf, key);
                    }
                    return Ok(Some(buf));
                }
                Key::Byte(b) if b.is_ascii() && !b.is_ascii_control() => buf.push(char::from(b)),
                _ => {}
            }

            if let Some(cb) = callback {
                cb(self, &buf, key);
            }
        }
    }
}
