//! Line yank, cut and paste commands.

use super::Editor;
use crate::input::{ByteSource, Direction};
use crate::terminal::Terminal;
use crate::utils::parse_count;
use anyhow::Result;

/// How many lines a `d`/`y` prompt answer asks for. Repeating the command key means one line.
fn line_count_answer(answer: &str, repeat: char) -> Option<usize> {
    let mut chars = answer.chars();
    if chars.next() == Some(repeat) && chars.next().is_none() {
        return Some(1);
    }
    parse_count(answer).filter(|&n| n > 0)
}

impl<S: ByteSource, T: Terminal> Editor<S, T> {
    /// `d`: cut lines starting at the cursor line.
    pub(crate) fn delete_prompt(&mut self) -> Result<()> {
        let Some(answer) = self.prompt("Deleting: ", None)? else {
            return Ok(());
        };
        let Some(count) = line_count_answer(&answer, 'd') else {
            return Ok(());
        };

        let removed = self.clipboard.cut(&mut self.doc, self.cursor.y, count);
        if removed == 0 {
            return Ok(());
        }
        self.cursor.y = self.cursor.y.min(self.doc.line_count());
        self.clamp_cursor_x();
        self.set_status(format!("Deleted {removed} lines"));
        Ok(())
    }

    /// `y`: copy lines starting at the cursor line.
    pub(crate) fn yank_prompt(&mut self) -> Result<()> {
        let Some(answer) = self.prompt("Yanking: ", None)? else {
            return Ok(());
        };
        let Some(count) = line_count_answer(&answer, 'y') else {
            return Ok(());
        };

        let taken = self.clipboard.yank(&self.doc, self.cursor.y, count);
        if taken > 0 {
            self.set_status(format!("Yanked {taken} lines"));
        }
        Ok(())
    }

    /// `p`: paste the yank buffer below the cursor line and move down past it.
    pub(crate) fn paste(&mut self) {
        match self.clipboard.paste(&mut self.doc, self.cursor.y) {
            None => self.set_status("Nothing in Yank Buffer"),
            Some(n) => {
                self.move_cursor_by(Direction::Down, n);
                self.set_status(format!("Pasted {n} lines"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::tests::{drive, editor, status, text};

    #[test]
    fn answers() {
        assert_eq!(line_count_answer("d", 'd'), Some(1));
        assert_eq!(line_count_answer("dd", 'd'), None);
        assert_eq!(line_count_answer("3", 'd'), Some(3));
        assert_eq!(line_count_answer("0", 'y'), None);
        assert_eq!(line_count_answer("y", 'd'), None);
        assert_eq!(line_count_answer("x2", 'y'), None);
    }

    #[test]
    fn yank_and_paste_line() {
        let mut ed = editor(&["a", "b", "c"], b"yy\rp");
        drive(&mut ed);
        assert_eq!(text(&ed), ["a", "a", "b", "c"]);
        assert_eq!(ed.cursor.y, 1);
        assert_eq!(status(&ed), "Pasted 1 lines");
    }

    #[test]
    fn yank_count_then_paste() {
        let mut ed = editor(&["a", "b", "c"], b"y2\r\x1b[Bp");
        drive(&mut ed);
        assert_eq!(text(&ed), ["a", "b", "a", "b", "c"]);
        assert_eq!(ed.cursor.y, 3);
    }

    #[test]
    fn delete_lines_into_buffer() {
        let mut ed = editor(&["a", "b", "c"], b"\x1b[Bd5\r");
        drive(&mut ed);
        assert_eq!(text(&ed), ["a"]);
        assert_eq!(ed.cursor.y, 1);
        assert_eq!(status(&ed), "Deleted 2 lines");

        let mut ed = editor(&["a", "b", "c"], b"dd\rp");
        drive(&mut ed);
        assert_eq!(text(&ed), ["b", "a", "c"]);
    }

    #[test]
    fn bad_answers_are_ignored() {
        let mut ed = editor(&["a", "b"], b"dx\r");
        drive(&mut ed);
        assert_eq!(text(&ed), ["a", "b"]);
        assert!(!ed.doc.is_dirty());
    }

    #[test]
    fn yank_and_cut_on_the_virtual_last_line_keep_the_buffer() {
        let mut ed = editor(&["a", "b"], b"yy\rGyy\rdd\rgp");
        drive(&mut ed);
        assert_eq!(ed.clipboard.len(), 1);
        assert_eq!(text(&ed), ["a", "a", "b"]);
        assert_eq!(status(&ed), "Pasted 1 lines");
    }

    #[test]
    fn paste_with_empty_buffer() {
        let mut ed = editor(&["a"], b"p");
        drive(&mut ed);
        assert_eq!(status(&ed), "Nothing in Yank Buffer");
        assert_eq!(text(&ed), ["a"]);
    }
}
