//! Box painting: borders, fills, titles, and wrapped body text.
//!
//! All primitives write cells into a [`ScreenBuffer`]; escape-sequence
//! emission happens later from the buffer diff.

use crate::buffer::ScreenBuffer;
use crate::cell::Cell;
use crate::color::{Color, Style};
use crate::error::{CoreError, Result};
use crate::geometry::Rect;
use crate::store::{keys, Entity, Store};

/// Heavy box-drawing corner, top-left.
pub const CORNER_TOP_LEFT: char = '┏';
/// Heavy box-drawing corner, top-right.
pub const CORNER_TOP_RIGHT: char = '┓';
/// Heavy box-drawing corner, bottom-left.
pub const CORNER_BOTTOM_LEFT: char = '┗';
/// Heavy box-drawing corner, bottom-right.
pub const CORNER_BOTTOM_RIGHT: char = '┛';
/// Heavy horizontal border line.
pub const LINE_HORIZONTAL: char = '━';
/// Heavy vertical border line.
pub const LINE_VERTICAL: char = '┃';

/// Draw a border on the rectangle's boundary.
///
/// Rectangles with width or height below 2 draw nothing.
pub fn draw_border(buf: &mut ScreenBuffer, rect: Rect, color: &Color) {
    if rect.is_degenerate() {
        return;
    }
    let style = Style::fg(color.clone());
    let (left, top) = (rect.x1, rect.y1);
    let (right, bottom) = (rect.x2 - 1, rect.y2 - 1);

    buf.set(left, top, Cell::new(CORNER_TOP_LEFT, style.clone()));
    buf.set(right, top, Cell::new(CORNER_TOP_RIGHT, style.clone()));
    buf.set(left, bottom, Cell::new(CORNER_BOTTOM_LEFT, style.clone()));
    buf.set(right, bottom, Cell::new(CORNER_BOTTOM_RIGHT, style.clone()));

    for x in (left + 1)..right {
        buf.set(x, top, Cell::new(LINE_HORIZONTAL, style.clone()));
        buf.set(x, bottom, Cell::new(LINE_HORIZONTAL, style.clone()));
    }
    for y in (top + 1)..bottom {
        buf.set(left, y, Cell::new(LINE_VERTICAL, style.clone()));
        buf.set(right, y, Cell::new(LINE_VERTICAL, style.clone()));
    }
}

/// Paint a box's interior (exclusive of the border) with one glyph.
pub fn draw_fill(buf: &mut ScreenBuffer, rect: Rect, glyph: char, color: &Color) {
    let interior = rect.inset(1);
    let style = Style::fg(color.clone());
    for y in interior.y1..interior.y2 {
        for x in interior.x1..interior.x2 {
            buf.set(x, y, Cell::new(glyph, style.clone()));
        }
    }
}

/// Write the title at interior offset (1, 1), truncated to the interior
/// width.
pub fn draw_title(buf: &mut ScreenBuffer, rect: Rect, text: &str, color: &Color) {
    let interior = rect.inset(1);
    if interior.width() == 0 || interior.height() == 0 {
        return;
    }
    let style = Style::fg(color.clone());
    for (i, ch) in text.chars().take(usize::from(interior.width())).enumerate() {
        buf.set(interior.x1 + i as u16, interior.y1, Cell::new(ch, style.clone()));
    }
}

/// Render body text into the rectangle inset by two cells.
///
/// The text's literal newlines separate lines; each line is hard-wrapped
/// to the interior width and rows past the interior height are
/// discarded.
pub fn draw_body(buf: &mut ScreenBuffer, rect: Rect, text: &str, color: &Color) {
    let area = rect.inset(2);
    let width = area.width();
    let height = area.height();
    if width == 0 || height == 0 {
        return;
    }
    let style = Style::fg(color.clone());

    let mut row = 0u16;
    'lines: for line in text.split('\n') {
        if row >= height {
            break;
        }
        let mut col = 0u16;
        for ch in line.chars() {
            if col == width {
                row += 1;
                col = 0;
                if row >= height {
                    break 'lines;
                }
            }
            buf.set(area.x1 + col, area.y1 + row, Cell::new(ch, style.clone()));
            col += 1;
        }
        row += 1;
    }
}

/// Everything needed to paint one box.
#[derive(Clone, Debug)]
pub struct BoxSkin {
    /// Absolute rectangle.
    pub rect: Rect,
    /// Declared border color.
    pub border_color: Color,
    /// Fill glyph and color, when the box is filled.
    pub fill: Option<(char, Color)>,
    /// Title text.
    pub title: String,
    /// Title color.
    pub title_color: Color,
    /// Current body text.
    pub body: String,
    /// Body text color.
    pub text_color: Color,
}

impl BoxSkin {
    /// Read a box's paintable state out of the store.
    ///
    /// Fails if the box has no resolved absolute rectangle yet.
    pub fn from_store(store: &Store, bx: Entity) -> Result<Self> {
        let rect = store.get_cells(bx, keys::ABS_RECT).ok_or_else(|| {
            CoreError::Geometry("box has no resolved rectangle".into())
        })?;
        let color = |key: &str| store.get_color(bx, key).cloned().unwrap_or_default();
        let fill = if store.get_bool(bx, keys::FILL).unwrap_or(false) {
            Some((
                store.get_char(bx, keys::FILL_CHAR).unwrap_or('█'),
                color(keys::FILL_COLOR),
            ))
        } else {
            None
        };
        Ok(Self {
            rect,
            border_color: color(keys::BORDER_COLOR),
            fill,
            title: store.get_str(bx, keys::TITLE).unwrap_or_default().to_string(),
            title_color: color(keys::TITLE_COLOR),
            body: store.get_str(bx, keys::BODY).unwrap_or_default().to_string(),
            text_color: color(keys::TEXT_COLOR),
        })
    }
}

/// Paint one box: border, interior, title, body.
///
/// The focused box's border takes the focus color instead of its
/// declared one. Unfilled boxes blank their interior so stale body text
/// never survives a redraw.
pub fn draw_box(buf: &mut ScreenBuffer, skin: &BoxSkin, focused: bool, focus_color: &Color) {
    let border_color = if focused {
        focus_color
    } else {
        &skin.border_color
    };
    draw_border(buf, skin.rect, border_color);
    match &skin.fill {
        Some((glyph, color)) => draw_fill(buf, skin.rect, *glyph, color),
        None => draw_fill(buf, skin.rect, ' ', &Color::Default),
    }
    draw_title(buf, skin.rect, &skin.title, &skin.title_color);
    draw_body(buf, skin.rect, &skin.body, &skin.text_color);
}
