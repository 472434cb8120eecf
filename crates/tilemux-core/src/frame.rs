//! Frame lifecycle — retained cell state, diffing, and terminal output.
//!
//! The frame keeps the current and previously flushed screen contents.
//! Callers paint boxes into the current buffer and flush; only cells
//! that changed since the last flush reach the terminal, so redrawing a
//! single box touches nothing else on screen.

use crate::buffer::ScreenBuffer;
use crate::error::Result;
use crate::geometry::Size;
use crate::renderer::Renderer;
use crate::terminal::{ansi, Terminal};

/// Double-buffered frame state.
pub struct Frame {
    current: ScreenBuffer,
    previous: ScreenBuffer,
    renderer: Renderer,
    size: Size,
}

impl Frame {
    /// Create a frame for the given terminal size.
    pub fn new(size: Size) -> Self {
        Self {
            current: ScreenBuffer::new(size),
            previous: ScreenBuffer::new(size),
            renderer: Renderer::new(),
            size,
        }
    }

    /// Current frame dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The buffer to paint into.
    pub fn buffer_mut(&mut self) -> &mut ScreenBuffer {
        &mut self.current
    }

    /// The buffer as last painted.
    pub fn buffer(&self) -> &ScreenBuffer {
        &self.current
    }

    /// Flush changed cells to the terminal.
    pub fn flush(&mut self, terminal: &mut dyn Terminal) -> Result<()> {
        let changes = self.current.diff(&self.previous);
        let output = self.renderer.render(&changes);
        if !output.is_empty() {
            terminal.write_raw(output.as_bytes())?;
            terminal.flush()?;
        }
        self.previous = self.current.clone();
        Ok(())
    }

    /// Clear the screen and forget retained contents.
    ///
    /// The caller repaints the full tree afterwards; the next flush
    /// emits everything visible.
    pub fn full_clear(&mut self, terminal: &mut dyn Terminal) -> Result<()> {
        terminal.write_raw(ansi::CLEAR_SEQUENCE)?;
        self.current.clear();
        self.previous.clear();
        Ok(())
    }

    /// Handle a terminal resize: rebuild both buffers at the new size.
    pub fn handle_resize(&mut self, new_size: Size) {
        self.size = new_size;
        self.current.resize(new_size);
        self.previous.resize(new_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::color::Style;
    use crate::terminal::TestBackend;

    #[test]
    fn first_flush_emits_painted_cells() {
        let mut backend = TestBackend::new(10, 5);
        let mut frame = Frame::new(Size::new(10, 5));
        frame.buffer_mut().set(0, 0, Cell::new('A', Style::default()));
        assert!(frame.flush(&mut backend).is_ok());
        let out = String::from_utf8_lossy(backend.output()).into_owned();
        assert!(out.contains('A'));
    }

    #[test]
    fn unchanged_cells_flush_nothing() {
        let mut backend = TestBackend::new(10, 5);
        let mut frame = Frame::new(Size::new(10, 5));
        frame.buffer_mut().set(0, 0, Cell::new('A', Style::default()));
        assert!(frame.flush(&mut backend).is_ok());
        backend.clear_output();

        assert!(frame.flush(&mut backend).is_ok());
        assert!(backend.output().is_empty());
    }

    #[test]
    fn partial_repaint_touches_only_changes() {
        let mut backend = TestBackend::new(10, 5);
        let mut frame = Frame::new(Size::new(10, 5));
        frame.buffer_mut().set(0, 0, Cell::new('A', Style::default()));
        frame.buffer_mut().set(5, 2, Cell::new('B', Style::default()));
        assert!(frame.flush(&mut backend).is_ok());
        backend.clear_output();

        frame.buffer_mut().set(5, 2, Cell::new('C', Style::default()));
        assert!(frame.flush(&mut backend).is_ok());
        let out = String::from_utf8_lossy(backend.output()).into_owned();
        assert!(out.contains('C'));
        assert!(!out.contains('A'));
    }

    #[test]
    fn full_clear_emits_clear_and_forgets() {
        let mut backend = TestBackend::new(10, 5);
        let mut frame = Frame::new(Size::new(10, 5));
        frame.buffer_mut().set(0, 0, Cell::new('A', Style::default()));
        assert!(frame.flush(&mut backend).is_ok());
        backend.clear_output();

        assert!(frame.full_clear(&mut backend).is_ok());
        let out = backend.output().to_vec();
        assert_eq!(out, b"\x1b[2J");

        // Repainting the same cell re-emits it after a clear.
        backend.clear_output();
        frame.buffer_mut().set(0, 0, Cell::new('A', Style::default()));
        assert!(frame.flush(&mut backend).is_ok());
        let out = String::from_utf8_lossy(backend.output()).into_owned();
        assert!(out.contains('A'));
    }

    #[test]
    fn resize_rebuilds_buffers() {
        let mut frame = Frame::new(Size::new(10, 5));
        frame.buffer_mut().set(0, 0, Cell::new('A', Style::default()));
        frame.handle_resize(Size::new(20, 8));
        assert_eq!(frame.size(), Size::new(20, 8));
        assert_eq!(frame.buffer().size(), Size::new(20, 8));
        assert!(frame.buffer().get(0, 0).is_some_and(Cell::is_blank));
    }
}
