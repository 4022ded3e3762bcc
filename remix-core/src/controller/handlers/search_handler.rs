// remix-core/src/controller/handlers/search_handler.rs
// Search overlay: free text input plus a few reserved keys

use ahash::AHashMap;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;
use crate::controller::actions::Action;
use crate::error::AppError;

pub struct SearchHandler {
    bindings: AHashMap<KeyEvent, Action>,
}

impl Default for SearchHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchHandler {
    pub fn new() -> Self {
        let mut bindings = AHashMap::with_capacity(8);
        bindings.insert(escape_key(), Action::CloseSearch);
        bindings.insert(enter_key(), Action::SearchOpen);
        bindings.insert(backspace_key(), Action::SearchBackspace);
        bindings.insert(arrow_key(KeyCode::Down), Action::SearchNext);
        bindings.insert(arrow_key(KeyCode::Up), Action::SearchPrev);
        bindings.insert(ctrl('r'), Action::SearchRemix);
        bindings.insert(ctrl('k'), Action::CloseSearch);
        Self { bindings }
    }
}

impl EventHandler for SearchHandler {
    fn can_handle(&self, context: InputContext, _key: &KeyEvent) -> bool {
        context == InputContext::Search
    }

    fn handle(&mut self, key_event: KeyEvent) -> Result<Vec<Action>, AppError> {
        if let Some(action) = self.bindings.get(&key_event).cloned() {
            return Ok(vec![action]);
        }
        match key_event.code {
            KeyCode::Char(c)
                if !key_event
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Ok(vec![Action::SearchInput(c)])
            }
            _ => Ok(vec![Action::NoOp]),
        }
    }

    fn priority(&self) -> u8 {
        10
    }

    fn name(&self) -> &'static str {
        "SearchHandler"
    }
}
