//! Raw-mode terminal session guard.

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::{cursor, execute, terminal};
use std::io::{self, Write};

/// Puts the terminal into raw mode with a hidden cursor, an alternate
/// screen, and mouse capture; everything is restored on drop, including on
/// error and panic unwinds.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;
        Ok(Self)
    }

    /// Current usable cell grid, or `None` when no terminal is attached.
    pub fn size() -> Option<(u16, u16)> {
        terminal::size().ok()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Write adapter that expands `\n` to `\r\n`.
///
/// Raw mode disables the kernel's output post-processing, so a bare line
/// feed no longer returns the carriage; without this the frame rows would
/// staircase. Each incoming write is translated into one write on the
/// inner sink, preserving whole-frame writes.
pub struct RawWriter<W: Write> {
    inner: W,
    translated: Vec<u8>,
}

impl<W: Write> RawWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            translated: Vec::new(),
        }
    }
}

impl<W: Write> Write for RawWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.translated.clear();
        self.translated.reserve(data.len());
        for &byte in data {
            if byte == b'\n' {
                self.translated.push(b'\r');
            }
            self.translated.push(byte);
        }
        self.inner.write_all(&self.translated)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
