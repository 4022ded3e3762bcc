use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::Action;
use crate::error::AppError;

/// Which surface currently owns the keyboard. Ordered from the innermost
/// overlay outwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputContext {
    /// Shortcuts popover; swallows everything except its own close keys.
    Shortcuts,
    Search,
    Modal,
    Listing,
}

/// Event handler trait for modular processing.
pub trait EventHandler: Send {
    /// Check if this handler takes the key in the given context.
    fn can_handle(&self, context: InputContext, key: &KeyEvent) -> bool;

    /// Process the key and return actions.
    fn handle(&mut self, key: KeyEvent) -> Result<Vec<Action>, AppError>;

    /// Handler priority for ordering (lower numbers run first).
    fn priority(&self) -> u8 {
        100
    }

    /// Handler name for debugging.
    fn name(&self) -> &'static str;
}

/// Strip state that varies by terminal so lookups match the bindings.
pub fn normalize(key: KeyEvent) -> KeyEvent {
    let modifiers = match key.code {
        // Shifted punctuation ('?', uppercase) arrives with SHIFT on some terminals.
        KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
        _ => key.modifiers,
    };
    KeyEvent::new(key.code, modifiers)
}

pub fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn alt(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::ALT)
}

pub fn arrow_key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn enter_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
}

pub fn backspace_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)
}

pub fn escape_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_is_dropped_for_chars_only() {
        let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(normalize(shifted), key('?'));

        let alt_left = KeyEvent::new(KeyCode::Left, KeyModifiers::ALT | KeyModifiers::SHIFT);
        assert_eq!(normalize(alt_left).modifiers, KeyModifiers::ALT | KeyModifiers::SHIFT);
    }
}
