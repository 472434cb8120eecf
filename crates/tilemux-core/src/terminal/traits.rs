//! Terminal driver trait.

use std::time::Duration;

use crate::error::Result;
use crate::event::InputEvent;
use crate::geometry::Size;

/// Abstraction over terminal backends.
///
/// The terminal is a process-wide singleton owned by the event loop;
/// nothing else writes to it.
pub trait Terminal {
    /// Current terminal size in cells.
    fn size(&self) -> Result<Size>;

    /// Take ownership of the screen: raw input mode, alternate screen,
    /// wrap off, cursor hidden, cleared.
    fn enter(&mut self) -> Result<()>;

    /// Give the screen back: restore wrap, cursor, main buffer, and
    /// cooked input. Must run on every exit path.
    fn leave(&mut self) -> Result<()>;

    /// Write raw bytes to the terminal.
    fn write_raw(&mut self, data: &[u8]) -> Result<()>;

    /// Flush buffered output to the terminal.
    fn flush(&mut self) -> Result<()>;

    /// Wait up to `timeout` for one input event.
    ///
    /// Returns `None` when the timeout elapses without input. A zero
    /// timeout polls and returns immediately.
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>>;
}
