// remix-core/src/controller/handlers/keyboard_handler.rs
// Bindings that hold in every context

use ahash::AHashMap;
use crossterm::event::KeyEvent;

use super::*;
use crate::controller::actions::Action;
use crate::error::AppError;

pub struct KeyboardHandler {
    emergency_bindings: AHashMap<KeyEvent, Action>,
}

impl Default for KeyboardHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardHandler {
    pub fn new() -> Self {
        let mut emergency_bindings = AHashMap::with_capacity(1);
        emergency_bindings.insert(ctrl('c'), Action::Quit);
        Self { emergency_bindings }
    }
}

impl EventHandler for KeyboardHandler {
    fn can_handle(&self, _context: InputContext, key: &KeyEvent) -> bool {
        self.emergency_bindings.contains_key(key)
    }

    fn handle(&mut self, key: KeyEvent) -> Result<Vec<Action>, AppError> {
        Ok(self.emergency_bindings.get(&key).cloned().into_iter().collect())
    }

    fn priority(&self) -> u8 {
        0
    }

    fn name(&self) -> &'static str {
        "KeyboardHandler"
    }
}
