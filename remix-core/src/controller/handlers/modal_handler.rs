// remix-core/src/controller/handlers/modal_handler.rs
// Resource modal bindings

use ahash::AHashMap;
use crossterm::event::{KeyCode, KeyEvent};

use super::*;
use crate::config::KeyConfig;
use crate::controller::actions::Action;
use crate::error::AppError;
use crate::model::modal::Direction;

pub struct ModalHandler {
    bindings: AHashMap<KeyEvent, Action>,
}

impl ModalHandler {
    pub fn new(keys: &KeyConfig) -> Self {
        let mut bindings = AHashMap::with_capacity(12);

        bindings.insert(escape_key(), Action::CloseModal);
        bindings.insert(arrow_key(KeyCode::Left), Action::NavigateModal(Direction::Prev));
        bindings.insert(arrow_key(KeyCode::Right), Action::NavigateModal(Direction::Next));
        bindings.insert(key(keys.remix), Action::RemixCurrent);
        bindings.insert(key(keys.share), Action::ShareCurrent);
        bindings.insert(key(keys.shortcuts), Action::ToggleShortcuts);
        bindings.insert(ctrl('k'), Action::OpenSearch);
        bindings.insert(key(keys.search), Action::OpenSearch);

        // History
        bindings.insert(alt(KeyCode::Left), Action::HistoryBack);
        bindings.insert(alt(KeyCode::Right), Action::HistoryForward);
        bindings.insert(backspace_key(), Action::HistoryBack);

        Self { bindings }
    }
}

impl EventHandler for ModalHandler {
    fn can_handle(&self, context: InputContext, key: &KeyEvent) -> bool {
        context == InputContext::Modal && self.bindings.contains_key(key)
    }

    fn handle(&mut self, key_event: KeyEvent) -> Result<Vec<Action>, AppError> {
        Ok(self.bindings.get(&key_event).cloned().into_iter().collect())
    }

    fn priority(&self) -> u8 {
        20
    }

    fn name(&self) -> &'static str {
        "ModalHandler"
    }
}
