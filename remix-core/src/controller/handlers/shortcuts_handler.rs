// remix-core/src/controller/handlers/shortcuts_handler.rs
// Shortcuts popover: captures Escape so nothing underneath reacts

use crossterm::event::KeyEvent;
use tracing::trace;

use super::*;
use crate::config::KeyConfig;
use crate::controller::actions::Action;
use crate::error::AppError;

pub struct ShortcutsHandler {
    toggle: KeyEvent,
}

impl ShortcutsHandler {
    pub fn new(keys: &KeyConfig) -> Self {
        Self {
            toggle: key(keys.shortcuts),
        }
    }
}

impl EventHandler for ShortcutsHandler {
    fn can_handle(&self, context: InputContext, _key: &KeyEvent) -> bool {
        context == InputContext::Shortcuts
    }

    fn handle(&mut self, key_event: KeyEvent) -> Result<Vec<Action>, AppError> {
        if key_event == escape_key() || key_event == self.toggle {
            return Ok(vec![Action::CloseShortcuts]);
        }
        trace!(key = ?key_event, "Key swallowed by shortcuts popover");
        Ok(vec![Action::NoOp])
    }

    fn priority(&self) -> u8 {
        5
    }

    fn name(&self) -> &'static str {
        "ShortcutsHandler"
    }
}
