//! Editor: the main application state and the read-dispatch-render loop.

mod builtin_commands;
mod clipboard;
mod file_ops;
mod input;
mod movement;
mod prompt;

use crate::buffer::Document;
use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::input::{ByteSource, Key, KeyDecoder};
use crate::render::{build_frame, FrameState, Viewport};
use crate::search::SearchState;
use crate::syntax::SyntaxProfile;
use crate::terminal::Terminal;
use crate::types::{Flow, Mode, Pos, StatusMsg};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub use builtin_commands::Command;

/// The top-level application state.
pub struct Editor<S, T> {
    /// The document being edited.
    pub doc: Document,
    /// Cursor position; `x` is a byte column in the raw line.
    pub cursor: Pos,
    pub viewport: Viewport,
    pub mode: Mode,
    /// Path we'll save to.
    pub filename: Option<PathBuf>,
    /// Short-lived status message.
    pub(crate) status: Option<StatusMsg>,
    pub(crate) clipboard: Clipboard,
    pub(crate) search: SearchState,
    profiles: Vec<SyntaxProfile>,
    config: Config,
    keys: KeyDecoder<S>,
    term: T,
}

impl<S: ByteSource, T: Terminal> Editor<S, T> {
    /// Create an editor with an empty, unnamed document.
    pub fn new(source: S, mut term: T, config: Config) -> Result<Self> {
        let (rows, cols) = term.size().context("Failed to query window size")?;
        Ok(Self {
            doc: Document::new(config.tab_stop),
            cursor: Pos::default(),
            viewport: Viewport::new(rows, cols),
            mode: Mode::default(),
            filename: None,
            status: None,
            clipboard: Clipboard::new(config.system_clipboard),
            search: SearchState::new(),
            profiles: config.profiles(),
            config,
            keys: KeyDecoder::new(source),
            term,
        })
    }

    /// Loop until the user quits: draw, read one key, act on it.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.refresh_screen()?;
            if self.process_keypress()? == Flow::Quit {
                tracing::info!("quit");
                return Ok(());
            }
        }
    }

    /// Draw a full frame and write it in one go.
    pub fn refresh_screen(&mut self) -> Result<()> {
        let (rows, cols) = self.term.size().context("Failed to query window size")?;
        self.viewport.resize(rows, cols);
        let rx = self.viewport.scroll(&self.doc, self.cursor);

        let ttl = self.config.status_timeout();
        let filename = self.filename.as_ref().map(|p| p.to_string_lossy());
        let state = FrameState {
            doc: &self.doc,
            viewport: &self.viewport,
            cursor: self.cursor,
            rx,
            filename: filename.as_deref(),
            message: self
                .status
                .as_ref()
                .filter(|s| s.is_live(ttl))
                .map(|s| s.text.as_str()),
            mode: self.mode,
        };
        let frame = build_frame(&state).context("Failed to compose frame")?;
        self.term
            .write_frame(&frame)
            .context("Failed to write frame")?;
        Ok(())
    }

    /// Show a message in the message bar.
    pub fn set_status(&mut self, msg: impl AsRef<str>) {
        self.status = Some(StatusMsg::new(msg.as_ref()));
    }

    pub(crate) fn read_key(&mut self) -> Result<Key> {
        self.keys.read_key().context("Failed to read input")
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        match mode {
            Mode::Insert => self.set_status("-- INSERT MODE --"),
            Mode::Command => self.set_status(""),
        }
        tracing::debug!(?mode, "mode change");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::terminal::MemoryTerminal;
    use std::collections::VecDeque;
    use std::io;
    use std::time::Duration;

    /// Scripted keyboard: hands out its bytes, times out for a while, then reports EOF so a
    /// test that never quits still finishes.
    pub struct Script {
        bytes: VecDeque<u8>,
        idle: usize,
    }

    impl ByteSource for Script {
        fn read_byte(&mut self, _: Duration) -> io::Result<Option<u8>> {
            if let Some(b) = self.bytes.pop_front() {
                return Ok(Some(b));
            }
            self.idle += 1;
            if self.idle > 32 {
                let eof = io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted");
                return Err(eof);
            }
            Ok(None)
        }
    }

    impl Script {
        fn new(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.iter().copied().collect(),
                idle: 0,
            }
        }
    }

    pub type TestEditor = Editor<Script, MemoryTerminal>;

    pub fn editor_with(lines: &[&str], input: &[u8], config: Config) -> TestEditor {
        let term = MemoryTerminal::new(12, 60);
        let mut ed = Editor::new(Script::new(input), term, config).unwrap();
        ed.doc = Document::from_lines(lines.iter().map(|l| l.as_bytes()), ed.config.tab_stop);
        ed
    }

    pub fn editor(lines: &[&str], input: &[u8]) -> TestEditor {
        editor_with(lines, input, Config::default())
    }

    /// Run the loop until quit or until the script runs dry. Returns whether it quit.
    pub fn drive(ed: &mut TestEditor) -> bool {
        ed.run().is_ok()
    }

    pub fn text(ed: &TestEditor) -> Vec<String> {
        ed.doc
            .lines()
            .iter()
            .map(|l| String::from_utf8_lossy(&l.raw).into_owned())
            .collect()
    }

    pub fn status(ed: &TestEditor) -> String {
        ed.status.clone().map(|s| s.text).unwrap_or_default()
    }

    #[test]
    fn first_frame_shows_welcome_and_quit_works() {
        let mut ed = editor(&[], b":q\r");
        assert!(drive(&mut ed));
        assert!(ed.term.frames[0].windows(7).any(|w| w == b"EdiTHOR"));
    }

    #[test]
    fn every_cycle_writes_exactly_one_frame() {
        let mut ed = editor(&["abc"], b"ll:q\r");
        assert!(drive(&mut ed));
        // three top-level cycles, plus two prompt redraws for ":q"
        assert_eq!(ed.term.frames.len(), 5);
    }

    #[test]
    fn status_shows_in_frame() {
        let mut ed = editor(&["abc"], b"i");
        drive(&mut ed);
        assert_eq!(status(&ed), "-- INSERT MODE --");
        assert!(ed.term.last_frame().contains("-- INSERT MODE --"));
        assert!(ed.term.last_frame().starts_with("\x1b[5 q"));
    }

    #[test]
    fn expired_status_is_not_drawn() {
        let cfg = Config {
            status_timeout_secs: 0,
            ..Config::default()
        };
        let mut ed = editor_with(&["abc"], b"i", cfg);
        drive(&mut ed);
        assert!(!ed.term.last_frame().contains("INSERT MODE"));
    }

    #[test]
    fn window_size_failure_is_fatal() {
        struct Broken;
        impl Terminal for Broken {
            fn size(&mut self) -> io::Result<(usize, usize)> {
                Err(io::Error::other("no tty"))
            }
            fn write_frame(&mut self, _: &[u8]) -> io::Result<()> {
                Ok(())
            }
        }
        let result = Editor::new(Script::new(b""), Broken, Config::default());
        assert!(result.is_err());
    }
}
