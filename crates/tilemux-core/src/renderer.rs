//! ANSI escape sequence renderer.
//!
//! Takes cell changes from the buffer diff and produces terminal output
//! with minimal escape sequences.

use crate::buffer::CellChange;
use crate::color::Style;
use crate::terminal::ansi;

/// Renders cell changes into ANSI escape sequences.
#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer;

impl Renderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render a set of cell changes into a string of ANSI escape sequences.
    ///
    /// Cursor moves are elided for consecutive cells on the same row, and
    /// SGR sequences are emitted only when the style actually changes. The
    /// output always leaves the terminal with attributes reset.
    pub fn render(&self, changes: &[CellChange]) -> String {
        if changes.is_empty() {
            return String::new();
        }

        let mut output = String::with_capacity(changes.len() * 8);
        let mut last_x: Option<u16> = None;
        let mut last_y: Option<u16> = None;
        let mut last_style = Style::default();

        for change in changes {
            // Only emit a cursor move when not already at the position.
            let at_cursor =
                matches!((last_x, last_y), (Some(lx), Some(ly)) if ly == change.y && lx == change.x);
            if !at_cursor {
                // ANSI cursor positions are 1-based.
                output.push_str(&ansi::cursor_to(change.y + 1, change.x + 1));
            }

            if change.cell.style != last_style {
                if !last_style.is_plain() {
                    output.push_str(ansi::RESET_SEQUENCE);
                }
                if let Some(fg) = change.cell.style.fg.fg_seq() {
                    output.push_str(&fg);
                }
                if let Some(bg) = change.cell.style.bg.bg_seq() {
                    output.push_str(&bg);
                }
                last_style = change.cell.style.clone();
            }

            output.push(change.cell.ch);
            last_x = Some(change.x + 1);
            last_y = Some(change.y);
        }

        if !last_style.is_plain() {
            output.push_str(ansi::RESET_SEQUENCE);
        }

        output
    }
}
