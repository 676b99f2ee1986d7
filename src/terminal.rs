//! Terminal setup and teardown, plus the byte-level input and frame-output seams.

use crate::input::ByteSource;
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style,
    terminal::{self, ClearType},
    ExecutableCommand,
};
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// RAII guard for terminal state.
///
/// Raw mode and the alternate screen are entered in `new()` and left again in `Drop`, so the
/// shell gets its terminal back even when the editor exits through an error.
pub struct TerminalGuard;

impl TerminalGuard {
    /// Enable raw mode and switch to the alternate screen.
    pub fn new(stdout: &mut Stdout) -> Result<Self> {
        terminal::enable_raw_mode().context("enable_raw_mode failed")?;
        stdout.execute(terminal::EnterAlternateScreen)?;
        stdout.execute(terminal::Clear(ClearType::All))?;
        stdout.flush()?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    /// Always restore terminal state when exiting the editor.
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.execute(style::ResetColor);
        let _ = stdout.execute(cursor::SetCursorStyle::DefaultUserShape);
        let _ = stdout.execute(cursor::Show);
        let _ = stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

/// Where frames go and where the window size comes from.
pub trait Terminal {
    /// Window size as `(rows, cols)`.
    fn size(&mut self) -> io::Result<(usize, usize)>;

    /// Write one complete frame and flush it.
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>;
}

/// The process's controlling terminal.
pub struct StdoutTerminal {
    out: Stdout,
}

impl StdoutTerminal {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for StdoutTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for StdoutTerminal {
    fn size(&mut self) -> io::Result<(usize, usize)> {
        let (cols, rows) = terminal::size()?;
        if cols == 0 {
            return Err(io::Error::other("terminal reports zero columns"));
        }
        Ok((usize::from(rows), usize::from(cols)))
    }

    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        let mut lock = self.out.lock();
        lock.write_all(frame)?;
        lock.flush()
    }
}

/// Standard input read byte by byte with `poll(2)` providing the timeout.
pub struct StdinSource;

impl ByteSource for StdinSource {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        let mut fds = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };
        let millis = libc::c_int::try_from(timeout.as_millis()).unwrap_or(libc::c_int::MAX);

        // SAFETY: `fds` is a valid pollfd for the duration of the call and nfds is 1.
        let ready = unsafe { libc::poll(&mut fds, 1, millis) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(None);
            }
            return Err(err);
        }
        if ready == 0 {
            return Ok(None);
        }

        let mut byte = 0u8;
        // SAFETY: reading at most one byte into a live, writable u8.
        let n = unsafe { libc::read(libc::STDIN_FILENO, std::ptr::addr_of_mut!(byte).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed")),
            _ => {
                let err = io::Error::last_os_error();
                match err.kind() {
                    io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => Ok(None),
                    _ => Err(err),
                }
            }
        }
    }
}

/// Fixed-size terminal that records every frame, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryTerminal {
    pub rows: usize,
    pub cols: usize,
    pub frames: Vec<Vec<u8>>,
}

#[cfg(test)]
impl MemoryTerminal {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            frames: Vec::new(),
        }
    }

    /// The most recent frame, lossily decoded.
    pub fn last_frame(&self) -> String {
        self.frames
            .last()
            .map(|f| String::from_utf8_lossy(f).into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Terminal for MemoryTerminal {
    fn size(&mut self) -> io::Result<(usize, usize)> {
        Ok((self.rows, self.cols))
    }

    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.frames.push(frame.to_vec());
        Ok(())
    }
}
