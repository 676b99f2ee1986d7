//! Cursor movement, paging and scroll keys.

use super::Editor;
use crate::input::{ByteSource, Direction, Key};
use crate::terminal::Terminal;

impl<S: ByteSource, T: Terminal> Editor<S, T> {
    /// Move the cursor one step. Left/right wrap across line ends; the cursor may rest on the
    /// virtual line just past the last one.
    pub fn move_cursor(&mut self, dir: Direction) {
        let count = self.doc.line_count();
        let p = &mut self.cursor;
        match dir {
            Direction::Left => {
                if p.x > 0 {
                    p.x -= 1;
                } else if p.y > 0 {
                    p.y -= 1;
                    p.x = self.doc.line_len(p.y);
                }
            }
            Direction::Right => {
                if p.y < count {
                    if p.x < self.doc.line_len(p.y) {
                        p.x += 1;
                    } else {
                        p.y += 1;
                        p.x = 0;
                    }
                }
            }
            Direction::Up => p.y = p.y.saturating_sub(1),
            Direction::Down => {
                if p.y < count {
                    p.y += 1;
                }
            }
        }
        self.clamp_cursor_x();
    }

    pub(crate) fn move_cursor_by(&mut self, dir: Direction, times: usize) {
        for _ in 0..times {
            self.move_cursor(dir);
        }
    }

    /// Keep the cursor column within its line.
    pub(crate) fn clamp_cursor_x(&mut self) {
        let len = self.doc.line_len(self.cursor.y);
        if self.cursor.x > len {
            self.cursor.x = len;
        }
    }

    /// Page Up/Down: jump to the edge of the screen, then a full screen further.
    pub(crate) fn page(&mut self, key: Key) {
        let rows = self.viewport.rows;
        let dir = if key == Key::PageUp {
            self.cursor.y = self.viewport.rowoff;
            Direction::Up
        } else {
            let bottom = (self.viewport.rowoff + rows).saturating_sub(1);
            self.cursor.y = bottom.min(self.doc.line_count());
            Direction::Down
        };
        self.move_cursor_by(dir, rows);
    }

    /// Scroll the view one line without moving the cursor, unless it would leave the screen.
    pub(crate) fn scroll_view(&mut self, key: Key) {
        let vp = &mut self.viewport;
        match key {
            Key::ScrollDown => {
                if vp.rowoff >= self.doc.line_count() {
                    return;
                }
                if self.cursor.y == vp.rowoff {
                    self.cursor.y += 1;
                }
                vp.rowoff += 1;
            }
            Key::ScrollUp => {
                if vp.rowoff == 0 {
                    return;
                }
                if vp.rows > 0 && self.cursor.y == vp.rowoff + vp.rows - 1 {
                    self.cursor.y -= 1;
                }
                vp.rowoff -= 1;
            }
            _ => return,
        }
        self.clamp_cursor_x();
    }

    pub(crate) fn go_home(&mut self) {
        self.cursor.x = 0;
    }

    pub(crate) fn go_end(&mut self) {
        if self.cursor.y < self.doc.line_count() {
            self.cursor.x = self.doc.line_len(self.cursor.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::editor::tests::{drive, editor};
    use crate::types::Pos;

    const LEFT: &[u8] = b"\x1b[D";
    const RIGHT: &[u8] = b"\x1b[C";
    const UP: &[u8] = b"\x1b[A";
    const DOWN: &[u8] = b"\x1b[B";

    fn keys(parts: &[&[u8]]) -> Vec<u8> {
        parts.concat()
    }

    #[test]
    fn right_wraps_to_next_line_and_left_wraps_back() {
        let mut ed = editor(&["ab", "c"], &keys(&[RIGHT, RIGHT, RIGHT]));
        drive(&mut ed);
        assert_eq!(ed.cursor, Pos { y: 1, x: 0 });

        let mut ed = editor(&["ab", "c"], &keys(&[DOWN, LEFT]));
        drive(&mut ed);
        assert_eq!(ed.cursor, Pos { y: 0, x: 2 });
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut ed = editor(&["long line", "ab"], &keys(&[b"\x1b[F", DOWN]));
        drive(&mut ed);
        assert_eq!(ed.cursor, Pos { y: 1, x: 2 });
    }

    #[test]
    fn cursor_can_rest_past_the_last_line() {
        let mut ed = editor(&["a"], &keys(&[DOWN, DOWN, DOWN]));
        drive(&mut ed);
        assert_eq!(ed.cursor, Pos { y: 1, x: 0 });
        let mut ed = editor(&["a"], &keys(&[UP]));
        drive(&mut ed);
        assert_eq!(ed.cursor, Pos::default());
    }

    #[test]
    fn comma_and_period_move_five() {
        let mut ed = editor(&["0123456789"], b"..,");
        drive(&mut ed);
        assert_eq!(ed.cursor.x, 5);
    }

    #[test]
    fn shifted_arrows_move_four() {
        let lines = ["x"; 10];
        let mut ed = editor(&lines, b"\x1b[1;2B");
        drive(&mut ed);
        assert_eq!(ed.cursor.y, 4);
    }

    #[test]
    fn g_and_shift_g_jump_to_ends() {
        let mut ed = editor(&["a", "b", "c"], b"G");
        drive(&mut ed);
        assert_eq!(ed.cursor.y, 3);
        let mut ed = editor(&["abc", "b", "c"], b"\x1b[FGg");
        drive(&mut ed);
        assert_eq!(ed.cursor, Pos { y: 0, x: 0 });
    }

    #[test]
    fn page_down_moves_a_screen() {
        let lines = ["x"; 50];
        // 12-row terminal leaves 10 text rows
        let mut ed = editor(&lines, b"\x1b[6~");
        drive(&mut ed);
        assert_eq!(ed.cursor.y, 19);
        let mut ed = editor(&lines, b"\x1b[6~\x1b[5~");
        drive(&mut ed);
        assert_eq!(ed.cursor.y, 0);
    }

    #[test]
    fn scroll_keys_drag_the_cursor_at_the_edges() {
        let lines = ["x"; 50];
        let mut ed = editor(&lines, &[5, 5]);
        drive(&mut ed);
        assert_eq!(ed.viewport.rowoff, 2);
        assert_eq!(ed.cursor.y, 2);

        let mut ed = editor(&lines, &[5, 25]);
        drive(&mut ed);
        assert_eq!(ed.viewport.rowoff, 0);
        assert_eq!(ed.cursor.y, 1);
    }

    #[test]
    fn scroll_up_at_top_does_nothing() {
        let mut ed = editor(&["a", "b"], &[25]);
        drive(&mut ed);
        assert_eq!((ed.viewport.rowoff, ed.cursor.y), (0, 0));
    }

    #[test]
    fn home_and_end() {
        let mut ed = editor(&["hello"], b"\x1b[F");
        drive(&mut ed);
        assert_eq!(ed.cursor.x, 5);
        let mut ed = editor(&["hello"], b"\x1b[F\x1b[H");
        drive(&mut ed);
        assert_eq!(ed.cursor.x, 0);
    }
}
