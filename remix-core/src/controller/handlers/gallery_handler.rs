// remix-core/src/controller/handlers/gallery_handler.rs
// Listing bindings: card selection, category chips, global shortcuts

use ahash::AHashMap;
use crossterm::event::{KeyCode, KeyEvent};

use super::*;
use crate::config::KeyConfig;
use crate::controller::actions::Action;
use crate::error::AppError;
use crate::model::modal::Direction;

pub struct GalleryHandler {
    bindings: AHashMap<KeyEvent, Action>,
}

impl GalleryHandler {
    pub fn new(keys: &KeyConfig) -> Self {
        let mut bindings = AHashMap::with_capacity(20);

        // Cards
        bindings.insert(arrow_key(KeyCode::Up), Action::MoveSelectionUp);
        bindings.insert(arrow_key(KeyCode::Down), Action::MoveSelectionDown);
        bindings.insert(enter_key(), Action::OpenSelected);
        bindings.insert(key(keys.remix), Action::RemixSelected);

        // Chips
        bindings.insert(arrow_key(KeyCode::Left), Action::MoveChipCursor(Direction::Prev));
        bindings.insert(arrow_key(KeyCode::Right), Action::MoveChipCursor(Direction::Next));
        bindings.insert(key(' '), Action::ToggleChip);
        bindings.insert(key('a'), Action::ClearChips);

        // Overlays
        bindings.insert(ctrl('k'), Action::OpenSearch);
        bindings.insert(key(keys.search), Action::OpenSearch);
        bindings.insert(key(keys.shortcuts), Action::ToggleShortcuts);

        // History
        bindings.insert(alt(KeyCode::Left), Action::HistoryBack);
        bindings.insert(alt(KeyCode::Right), Action::HistoryForward);
        bindings.insert(backspace_key(), Action::HistoryBack);

        bindings.insert(key('q'), Action::Quit);

        Self { bindings }
    }
}

impl EventHandler for GalleryHandler {
    fn can_handle(&self, context: InputContext, key: &KeyEvent) -> bool {
        context == InputContext::Listing && self.bindings.contains_key(key)
    }

    fn handle(&mut self, key_event: KeyEvent) -> Result<Vec<Action>, AppError> {
        Ok(self.bindings.get(&key_event).cloned().into_iter().collect())
    }

    fn priority(&self) -> u8 {
        30
    }

    fn name(&self) -> &'static str {
        "GalleryHandler"
    }
}
