//! Real terminal backend: crossterm raw mode and input decoding, with
//! the engine's own escape sequences for everything drawn.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;

use crate::error::Result;
use crate::event::{InputEvent, Key};
use crate::geometry::Size;

use super::ansi;
use super::traits::Terminal;

/// Terminal backend for a real tty.
///
/// Raw-mode toggling, size probing, and key decoding go through
/// crossterm; screen control and drawing are emitted as the exact byte
/// sequences of the engine's contract. Crossterm's event reader performs
/// the escape-sequence disambiguation for arrow keys and the bare-ESC
/// grace period.
pub struct AnsiBackend {
    entered: bool,
}

impl AnsiBackend {
    /// Create a new backend. The terminal is untouched until
    /// [`Terminal::enter`].
    pub fn new() -> Self {
        Self { entered: false }
    }
}

impl Default for AnsiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for AnsiBackend {
    fn size(&self) -> Result<Size> {
        let (cols, rows) = terminal::size()?;
        Ok(Size::new(cols, rows))
    }

    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            terminal::enable_raw_mode()?;
            io::stdout().write_all(ansi::ENTER_SEQUENCE)?;
            io::stdout().flush()?;
            self.entered = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            io::stdout().write_all(ansi::LEAVE_SEQUENCE)?;
            io::stdout().flush()?;
            terminal::disable_raw_mode()?;
            self.entered = false;
        }
        Ok(())
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        io::stdout().write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                Ok(decode_key(key.code).map(InputEvent::Key))
            }
            Event::Resize(cols, rows) => Ok(Some(InputEvent::Resize(cols, rows))),
            _ => Ok(None),
        }
    }
}

impl Drop for AnsiBackend {
    fn drop(&mut self) {
        // Restores the terminal even when unwinding from a panic.
        let _ = self.leave();
    }
}

/// Map a crossterm key code onto the engine's key set.
fn decode_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}
