//! The sixteen-color ANSI model used for borders, fills, titles, and body
//! text.
//!
//! Configuration documents name colors by the eight base names; values that
//! already look like an SGR escape pass through untouched, and unknown
//! names render with no color change.

/// One of the eight base ANSI color names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedColor {
    /// ANSI black (SGR 30/40).
    Black,
    /// ANSI red (SGR 31/41).
    Red,
    /// ANSI green (SGR 32/42).
    Green,
    /// ANSI yellow (SGR 33/43).
    Yellow,
    /// ANSI blue (SGR 34/44).
    Blue,
    /// ANSI magenta (SGR 35/45).
    Magenta,
    /// ANSI cyan (SGR 36/46).
    Cyan,
    /// ANSI white (SGR 37/47).
    White,
}

impl NamedColor {
    /// Offset of this color within the SGR 30-37 / 40-47 ranges.
    pub fn ansi_offset(&self) -> u8 {
        match self {
            Self::Black => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
            Self::Magenta => 5,
            Self::Cyan => 6,
            Self::White => 7,
        }
    }

    /// Look up a color by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "black" => Some(Self::Black),
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            "blue" => Some(Self::Blue),
            "magenta" => Some(Self::Magenta),
            "cyan" => Some(Self::Cyan),
            "white" => Some(Self::White),
            _ => None,
        }
    }
}

/// A drawable color.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// No color change; the terminal's current default.
    Default,
    /// One of the sixteen-color ANSI names.
    Named(NamedColor),
    /// An already-encoded SGR string passed through verbatim.
    Raw(String),
}

impl Color {
    /// Parse a configuration color value.
    ///
    /// Known names map to [`Color::Named`]; strings containing an escape
    /// byte pass through as [`Color::Raw`]; anything else is
    /// [`Color::Default`] (no color change).
    pub fn parse(value: &str) -> Self {
        if value.contains('\x1b') {
            return Self::Raw(value.to_string());
        }
        match NamedColor::from_name(value) {
            Some(named) => Self::Named(named),
            None => Self::Default,
        }
    }

    /// The SGR sequence selecting this color as foreground, if any.
    pub fn fg_seq(&self) -> Option<String> {
        match self {
            Self::Default => None,
            Self::Named(c) => Some(format!("\x1b[{}m", 30 + c.ansi_offset())),
            Self::Raw(s) => Some(s.clone()),
        }
    }

    /// The SGR sequence selecting this color as background, if any.
    pub fn bg_seq(&self) -> Option<String> {
        match self {
            Self::Default => None,
            Self::Named(c) => Some(format!("\x1b[{}m", 40 + c.ansi_offset())),
            Self::Raw(s) => Some(s.clone()),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::Default
    }
}

/// Foreground and background color of a cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
}

impl Style {
    /// A style with the given foreground and default background.
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            bg: Color::Default,
        }
    }

    /// Returns true if this style changes nothing.
    pub fn is_plain(&self) -> bool {
        self.fg == Color::Default && self.bg == Color::Default
    }
}
