//! Key-to-action mapping for the event loop.

use tilemux_core::event::Key;

/// Result of dispatching one key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    /// No action; the key is reserved.
    None,
    /// Begin graceful shutdown.
    Quit,
    /// Move focus to the next selectable box.
    FocusNext,
    /// Move focus to the previous selectable box.
    FocusPrev,
}

/// Map a key press onto its action.
///
/// `Up`/`Left` walk backwards through the selectable boxes and
/// `Down`/`Right` forwards; `q` quits; everything else is reserved.
pub fn action_for(key: Key) -> InputAction {
    match key {
        Key::Char('q') => InputAction::Quit,
        Key::Up | Key::Left => InputAction::FocusPrev,
        Key::Down | Key::Right => InputAction::FocusNext,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn q_quits() {
        assert_eq!(action_for(Key::Char('q')), InputAction::Quit);
    }

    #[test]
    fn arrows_traverse_focus() {
        assert_eq!(action_for(Key::Up), InputAction::FocusPrev);
        assert_eq!(action_for(Key::Left), InputAction::FocusPrev);
        assert_eq!(action_for(Key::Down), InputAction::FocusNext);
        assert_eq!(action_for(Key::Right), InputAction::FocusNext);
    }

    #[test]
    fn other_keys_are_reserved() {
        assert_eq!(action_for(Key::Char('x')), InputAction::None);
        assert_eq!(action_for(Key::Char('Q')), InputAction::None);
        assert_eq!(action_for(Key::Escape), InputAction::None);
    }
}
