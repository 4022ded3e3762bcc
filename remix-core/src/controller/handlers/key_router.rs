// remix-core/src/controller/handlers/key_router.rs
// Routes key events through the handler chain for the active context

use crossterm::event::KeyEvent;
use tracing::{debug, trace, warn};

use super::gallery_handler::GalleryHandler;
use super::keyboard_handler::KeyboardHandler;
use super::modal_handler::ModalHandler;
use super::search_handler::SearchHandler;
use super::shortcuts_handler::ShortcutsHandler;
use super::*;
use crate::config::KeyConfig;
use crate::controller::actions::Action;

/// Chains handlers in priority order; the first handler that accepts the
/// key in the current context and yields actions wins.
pub struct KeyRouter {
    handlers: Vec<Box<dyn EventHandler>>,
    total_events_processed: u64,
    unhandled_events: u64,
}

impl std::fmt::Debug for KeyRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRouter")
            .field("handler_names", &self.handler_names())
            .field("total_events_processed", &self.total_events_processed)
            .field("unhandled_events", &self.unhandled_events)
            .finish()
    }
}

impl KeyRouter {
    pub fn new(keys: &KeyConfig) -> Self {
        let mut handlers: Vec<Box<dyn EventHandler>> = vec![
            Box::new(KeyboardHandler::new()),
            Box::new(ShortcutsHandler::new(keys)),
            Box::new(SearchHandler::new()),
            Box::new(ModalHandler::new(keys)),
            Box::new(GalleryHandler::new(keys)),
        ];
        handlers.sort_by_key(|h| h.priority());

        debug!(
            handler_names = ?handlers.iter().map(|h| h.name()).collect::<Vec<_>>(),
            "KeyRouter initialized"
        );

        Self {
            handlers,
            total_events_processed: 0,
            unhandled_events: 0,
        }
    }

    pub fn route(&mut self, context: InputContext, key_event: KeyEvent) -> Vec<Action> {
        self.total_events_processed += 1;
        let key_event = normalize(key_event);

        for handler in &mut self.handlers {
            if !handler.can_handle(context, &key_event) {
                continue;
            }
            match handler.handle(key_event) {
                Ok(actions) if !actions.is_empty() => {
                    trace!(
                        handler_name = handler.name(),
                        ?context,
                        ?actions,
                        "Key handled"
                    );
                    return actions;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(handler_name = handler.name(), error = %e, "Handler failed");
                }
            }
        }

        self.unhandled_events += 1;
        trace!(?context, key = ?key_event, "No handler took the key");
        Vec::new()
    }

    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn unhandled_events(&self) -> u64 {
        self.unhandled_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::modal::Direction;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn router() -> KeyRouter {
        KeyRouter::new(&KeyConfig::default())
    }

    #[test]
    fn handlers_are_ordered_by_priority() {
        assert_eq!(
            router().handler_names(),
            [
                "KeyboardHandler",
                "ShortcutsHandler",
                "SearchHandler",
                "ModalHandler",
                "GalleryHandler"
            ]
        );
    }

    #[test]
    fn modal_bindings() {
        let mut router = router();
        let ctx = InputContext::Modal;

        assert_eq!(router.route(ctx, escape_key()), [Action::CloseModal]);
        assert_eq!(
            router.route(ctx, arrow_key(KeyCode::Left)),
            [Action::NavigateModal(Direction::Prev)]
        );
        assert_eq!(
            router.route(ctx, arrow_key(KeyCode::Right)),
            [Action::NavigateModal(Direction::Next)]
        );
        assert_eq!(router.route(ctx, key('r')), [Action::RemixCurrent]);
        assert_eq!(router.route(ctx, key('s')), [Action::ShareCurrent]);
        assert_eq!(router.route(ctx, ctrl('k')), [Action::OpenSearch]);
        assert_eq!(router.route(ctx, key('/')), [Action::OpenSearch]);
        assert!(router.route(ctx, key('q')).is_empty());
    }

    #[test]
    fn shortcuts_popover_suppresses_modal_keys() {
        let mut router = router();
        let ctx = InputContext::Shortcuts;

        assert_eq!(router.route(ctx, escape_key()), [Action::CloseShortcuts]);
        assert_eq!(router.route(ctx, arrow_key(KeyCode::Right)), [Action::NoOp]);
        assert_eq!(router.route(ctx, key('r')), [Action::NoOp]);
        assert_eq!(
            router.route(ctx, KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            [Action::CloseShortcuts]
        );
        assert_eq!(router.route(ctx, ctrl('c')), [Action::Quit]);
    }

    #[test]
    fn search_takes_text() {
        let mut router = router();
        let ctx = InputContext::Search;

        assert_eq!(router.route(ctx, key('q')), [Action::SearchInput('q')]);
        assert_eq!(
            router.route(ctx, KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            [Action::SearchInput('A')]
        );
        assert_eq!(router.route(ctx, ctrl('r')), [Action::SearchRemix]);
        assert_eq!(router.route(ctx, escape_key()), [Action::CloseSearch]);
    }

    #[test]
    fn listing_bindings() {
        let mut router = router();
        let ctx = InputContext::Listing;

        assert_eq!(router.route(ctx, ctrl('k')), [Action::OpenSearch]);
        assert_eq!(router.route(ctx, key('/')), [Action::OpenSearch]);
        assert_eq!(router.route(ctx, key(' ')), [Action::ToggleChip]);
        assert_eq!(router.route(ctx, alt(KeyCode::Left)), [Action::HistoryBack]);
        assert_eq!(router.route(ctx, key('q')), [Action::Quit]);
        assert!(router.route(ctx, key('z')).is_empty());
        assert_eq!(router.unhandled_events(), 1);
    }

    #[test]
    fn remapped_keys_follow_config() {
        let keys = KeyConfig {
            remix: 'x',
            ..KeyConfig::default()
        };
        let mut router = KeyRouter::new(&keys);
        assert_eq!(router.route(InputContext::Modal, key('x')), [Action::RemixCurrent]);
        assert!(router.route(InputContext::Modal, key('r')).is_empty());
    }
}
