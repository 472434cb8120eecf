//! The escape sequences the engine emits, byte for byte.

/// Enter the alternate screen, disable line wrap, hide the cursor, clear.
pub const ENTER_SEQUENCE: &[u8] = b"\x1b[?1049h\x1b[?7l\x1b[?25l\x1b[2J";

/// Restore wrap and cursor, clear, reset scroll region, leave the
/// alternate screen.
pub const LEAVE_SEQUENCE: &[u8] = b"\x1b[?7h\x1b[?25h\x1b[2J\x1b[;r\x1b[?1049l";

/// Clear the whole screen.
pub const CLEAR_SEQUENCE: &[u8] = b"\x1b[2J";

/// Reset all SGR attributes.
pub const RESET_SEQUENCE: &str = "\x1b[0m";

/// Move the cursor to the given 1-based position.
pub fn cursor_to(row: u16, col: u16) -> String {
    format!("\x1b[{row};{col}H")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_move_is_one_based() {
        assert_eq!(cursor_to(1, 1), "\x1b[1;1H");
        assert_eq!(cursor_to(24, 80), "\x1b[24;80H");
    }

    #[test]
    fn lifecycle_sequences_are_exact() {
        assert_eq!(ENTER_SEQUENCE, b"\x1b[?1049h\x1b[?7l\x1b[?25l\x1b[2J");
        assert_eq!(
            LEAVE_SEQUENCE,
            b"\x1b[?7h\x1b[?25h\x1b[2J\x1b[;r\x1b[?1049l"
        );
    }
}
