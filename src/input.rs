//! Raw terminal bytes to logical keys.
//!
//! The decoder pulls one byte at a time from a [`ByteSource`] with a short timeout. A lone ESC
//! followed by silence is the Escape key; ESC followed by a recognized VT100/xterm sequence is a
//! navigation key. Unknown sequences collapse to Escape.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// Cursor direction for arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A decoded key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Any byte without a dedicated meaning (printable text and control bytes).
    Byte(u8),
    Arrow(Direction),
    ShiftArrow(Direction),
    Home,
    End,
    Delete,
    Backspace,
    PageUp,
    PageDown,
    ScrollUp,
    ScrollDown,
    Escape,
    Enter,
    Tab,
}

/// The byte a Ctrl-chord produces for an ASCII letter.
pub const fn ctrl(b: u8) -> u8 {
    b & 0x1f
}

const ESC: u8 = 0x1b;
const SCROLL_UP: u8 = 25;
const SCROLL_DOWN: u8 = 5;
const BACKSPACE: u8 = 127;

/// Blocking byte input with a per-read timeout.
pub trait ByteSource {
    /// Read one byte, waiting at most `timeout`. `Ok(None)` means the wait timed out.
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

/// Scripted input: bytes are handed out in order, then every read times out.
impl ByteSource for VecDeque<u8> {
    fn read_byte(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
        Ok(self.pop_front())
    }
}

/// Decodes keys from a byte source.
pub struct KeyDecoder<S> {
    source: S,
    timeout: Duration,
}

impl<S: ByteSource> KeyDecoder<S> {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);

    pub fn new(source: S) -> Self {
        Self::with_timeout(source, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(source: S, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Block until a key is available.
    ///
    /// Timeouts on the first byte are retried; read errors propagate.
    pub fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Some(key) = self.try_read_key()? {
                return Ok(key);
            }
        }
    }

    /// Like [`KeyDecoder::read_key`] but gives up after one timeout on the first byte.
    pub fn try_read_key(&mut self) -> io::Result<Option<Key>> {
        let Some(first) = self.next()? else {
            return Ok(None);
        };
        let key = match first {
            ESC => self.read_escape()?,
            b'\r' => Key::Enter,
            b'\t' => Key::Tab,
            BACKSPACE => Key::Backspace,
            SCROLL_UP => Key::ScrollUp,
            SCROLL_DOWN => Key::ScrollDown,
            b => Key::Byte(b),
        };
        Ok(Some(key))
    }

    fn next(&mut self) -> io::Result<Option<u8>> {
        self.source.read_byte(self.timeout)
    }

    fn read_escape(&mut self) -> io::Result<Key> {
        let Some(first) = self.next()? else {
            return Ok(Key::Escape);
        };
        let Some(second) = self.next()? else {
            return Ok(Key::Escape);
        };

        let key = match (first, second) {
            (b'[', d) if d.is_ascii_digit() => return self.read_numbered(d),
            (b'[', b'A') => Key::Arrow(Direction::Up),
            (b'[', b'B') => Key::Arrow(Direction::Down),
            (b'[', b'C') => Key::Arrow(Direction::Right),
            (b'[', b'D') => Key::Arrow(Direction::Left),
            (b'[' | b'O', b'H') => Key::Home,
            (b'[' | b'O', b'F') => Key::End,
            (b'[', b'P') => Key::Delete,
            _ => Key::Escape,
        };
        Ok(key)
    }

    /// `ESC [ <digit> ...`: either `<digit> ~` or the modified-arrow form `1 ; 2 <A-D>`.
    fn read_numbered(&mut self, digit: u8) -> io::Result<Key> {
        let Some(third) = self.next()? else {
            return Ok(Key::Escape);
        };
        if third == b'~' {
            return Ok(match digit {
                b'1' | b'7' => Key::Home,
                b'4' | b'8' => Key::End,
                b'3' => Key::Delete,
                b'5' => Key::PageUp,
                b'6' => Key::PageDown,
                _ => Key::Escape,
            });
        }
        if digit != b'1' || third != b';' {
            return Ok(Key::Escape);
        }
        let Some(modifier) = self.next()? else {
            return Ok(Key::Escape);
        };
        let Some(last) = self.next()? else {
            return Ok(Key::Escape);
        };
        if modifier != b'2' {
            return Ok(Key::Escape);
        }
        Ok(match last {
            b'A' => Key::ShiftArrow(Direction::Up),
            b'B' => Key::ShiftArrow(Direction::Down),
            b'C' => Key::ShiftArrow(Direction::Right),
            b'D' => Key::ShiftArrow(Direction::Left),
            _ => Key::Escape,
        })
    }
}
