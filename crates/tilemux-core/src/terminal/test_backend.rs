//! In-memory terminal backend for testing.

use std::collections::VecDeque;
use std::time::Duration;

use crate::error::Result;
use crate::event::InputEvent;
use crate::geometry::Size;

use super::ansi;
use super::traits::Terminal;

/// In-memory terminal backend.
///
/// All output bytes (including the enter/leave sequences) are captured
/// for inspection, and input events are served from a scripted queue
/// without waiting.
pub struct TestBackend {
    size: Size,
    output: Vec<u8>,
    events: VecDeque<InputEvent>,
    entered: bool,
}

impl TestBackend {
    /// Create a new test backend with the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: Size::new(width, height),
            output: Vec::new(),
            events: VecDeque::new(),
            entered: false,
        }
    }

    /// Bytes written to this backend so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Drop captured output.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Queue an input event for a later poll.
    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Simulate a resize. Callers usually also queue the matching
    /// [`InputEvent::Resize`].
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.size = Size::new(width, height);
    }

    /// Whether the backend currently owns the screen.
    pub fn is_entered(&self) -> bool {
        self.entered
    }
}

impl Terminal for TestBackend {
    fn size(&self) -> Result<Size> {
        Ok(self.size)
    }

    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            self.output.extend_from_slice(ansi::ENTER_SEQUENCE);
            self.entered = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            self.output.extend_from_slice(ansi::LEAVE_SEQUENCE);
            self.entered = false;
        }
        Ok(())
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        self.output.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn poll_event(&mut self, _timeout: Duration) -> Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }
}
