// remix-core/src/model/app_state.rs
// Single owner of library, navigation and notification state

use std::sync::Arc;

use clipr::ClipboardPayload;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::controller::actions::Action;
use crate::controller::clipboard_worker::ClipboardWorker;
use crate::controller::event_loop::TaskResult;
use crate::controller::handlers::InputContext;
use crate::data::Catalog;
use crate::model::history::{HistoryEvent, HistorySubscription, SessionHistory};
use crate::model::library::ResourceLibraryStore;
use crate::model::modal::{Direction, ModalNavigator};
use crate::model::resource::{Resource, ResourceKey};
use crate::model::route::Route;
use crate::model::search_index::{SearchIndex, SearchOverlayState};
use crate::model::toast::{ToastKind, ToastScheduler, ToastScope};
use crate::model::ui_state::{NotificationLevel, UiState};

/// Where the open modal took its backing list from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackingSource {
    Gallery,
    Search,
}

#[derive(Debug)]
pub struct AppState {
    pub store: ResourceLibraryStore,
    pub search_index: SearchIndex,
    pub history: SessionHistory,
    pub modal: ModalNavigator,
    pub toasts: ToastScheduler,
    pub ui: UiState,
    config: Arc<Config>,
    clipboard: ClipboardWorker,
    /// Route listener of the app itself; renders every popped route.
    router: HistorySubscription,
    backing_source: BackingSource,
}

impl AppState {
    /// Build the state and render `initial` the way a fresh page load would.
    pub fn new(
        catalog: Catalog,
        config: Arc<Config>,
        clipboard: ClipboardWorker,
        task_tx: UnboundedSender<TaskResult>,
        initial: Route,
    ) -> Self {
        let search_index = SearchIndex::new(&catalog.categories);
        let store = ResourceLibraryStore::new(catalog.categories, catalog.resources);
        let mut history = SessionHistory::new(initial.clone());
        let router = history.subscribe();
        let toasts = ToastScheduler::new(config.toast.clone(), task_tx);

        let mut state = Self {
            store,
            search_index,
            history,
            modal: ModalNavigator::new(),
            toasts,
            ui: UiState::default(),
            config,
            clipboard,
            router,
            backing_source: BackingSource::Gallery,
        };
        state.render_route(initial);
        state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Innermost surface that currently owns the keyboard.
    pub fn input_context(&self) -> InputContext {
        if self.ui.shortcuts_open {
            InputContext::Shortcuts
        } else if self.ui.search_open() {
            InputContext::Search
        } else if self.modal.is_open() {
            InputContext::Modal
        } else {
            InputContext::Listing
        }
    }

    /// Resources currently shown in the gallery, in collection order.
    pub fn gallery(&self) -> Vec<&Resource> {
        self.store.filtered_resources()
    }

    pub fn selected_resource(&self) -> Option<&Resource> {
        self.gallery().get(self.ui.selected).copied()
    }

    /// Search results over the full collection; chips do not apply.
    pub fn search_results(&self) -> Vec<&Resource> {
        let input = self.ui.search.as_ref().map_or("", |s| s.input.as_str());
        self.search_index.query(self.store.resources(), input)
    }

    fn search_hit(&self) -> Option<&Resource> {
        let selected = self.ui.search.as_ref()?.selected;
        self.search_results().get(selected).copied()
    }

    /// Apply one action. Returns `false` once the application should exit.
    pub fn dispatch(&mut self, action: Action) -> bool {
        if !matches!(action, Action::TaskResult(_) | Action::Resize(..) | Action::NoOp) {
            self.ui.notification = None;
        }

        match action {
            Action::Quit => return false,
            Action::NoOp | Action::Resize(..) => {}

            Action::MoveSelectionUp => self.ui.select_prev(),
            Action::MoveSelectionDown => {
                let len = self.gallery().len();
                self.ui.select_next(len);
            }
            Action::MoveChipCursor(direction) => {
                let chips = self.store.categories().len();
                self.ui.move_chip_cursor(direction, chips);
            }
            Action::ToggleChip => self.toggle_chip_at_cursor(),
            Action::ClearChips => {
                self.store.clear_selection();
                self.after_filter_change();
            }

            Action::OpenSelected => self.open_selected(),
            Action::RemixSelected => {
                if let Some(resource) = self.selected_resource() {
                    let key = resource.identity();
                    self.remix(&key, ToastScope::Gallery);
                }
            }

            Action::CloseModal => self.close_modal(),
            Action::NavigateModal(direction) => self.navigate_modal(direction),
            Action::RemixCurrent => {
                if let Some(key) = self.modal.current_key().cloned() {
                    self.remix(&key, ToastScope::Modal);
                }
            }
            Action::ShareCurrent => self.share_current(),

            Action::OpenSearch => {
                self.ui.search = Some(SearchOverlayState::default());
            }
            Action::CloseSearch => self.close_search(),
            Action::SearchInput(c) => {
                if let Some(search) = self.ui.search.as_mut() {
                    search.push_char(c);
                }
            }
            Action::SearchBackspace => {
                if let Some(search) = self.ui.search.as_mut() {
                    search.backspace();
                }
            }
            Action::SearchNext => {
                let count = self.search_results().len();
                if let Some(search) = self.ui.search.as_mut() {
                    search.select_next(count);
                }
            }
            Action::SearchPrev => {
                if let Some(search) = self.ui.search.as_mut() {
                    search.select_prev();
                }
            }
            Action::SearchOpen => self.open_search_hit(),
            Action::SearchRemix => {
                if let Some(resource) = self.search_hit() {
                    let key = resource.identity();
                    self.remix(&key, ToastScope::Search);
                }
            }

            Action::ToggleShortcuts => self.ui.shortcuts_open = !self.ui.shortcuts_open,
            Action::CloseShortcuts => self.ui.shortcuts_open = false,

            Action::HistoryBack => {
                self.history.back();
            }
            Action::HistoryForward => {
                self.history.forward();
            }

            Action::TaskResult(result) => self.on_task_result(result),
        }

        self.sync_history();
        true
    }

    fn toggle_chip_at_cursor(&mut self) {
        if self.ui.chip_cursor == 0 {
            self.store.clear_selection();
        } else if let Some(category) = self.store.categories().get(self.ui.chip_cursor - 1) {
            let id = category.id.clone();
            self.store.toggle_category(&id);
        }
        self.after_filter_change();
    }

    fn after_filter_change(&mut self) {
        let len = self.gallery().len();
        self.ui.clamp_selection(len);
        if self.modal.is_open() && self.backing_source == BackingSource::Gallery {
            let backing = self.store.filtered_keys();
            self.modal.resync(backing, &mut self.history);
            if !self.modal.is_open() {
                self.toasts.cancel_scope(ToastScope::Modal);
            }
        }
    }

    fn open_selected(&mut self) {
        let Some(key) = self.selected_resource().map(Resource::identity) else {
            return;
        };
        let backing = self.store.filtered_keys();
        self.backing_source = BackingSource::Gallery;
        self.modal.open(key, backing, &mut self.history);
    }

    fn open_search_hit(&mut self) {
        let Some(key) = self.search_hit().map(Resource::identity) else {
            return;
        };
        let backing = self.search_results().iter().map(|r| r.identity()).collect();
        self.close_search();
        self.backing_source = BackingSource::Search;
        self.modal.open(key, backing, &mut self.history);
    }

    fn close_search(&mut self) {
        self.ui.search = None;
        self.toasts.cancel_scope(ToastScope::Search);
    }

    fn close_modal(&mut self) {
        self.modal.close(&mut self.history);
        self.toasts.cancel_scope(ToastScope::Modal);
    }

    fn navigate_modal(&mut self, direction: Direction) {
        if let Some(key) = self.modal.navigate(direction, &mut self.history).cloned()
            && self.backing_source == BackingSource::Gallery
            && let Some(index) = self.gallery().iter().position(|r| r.identity() == key)
        {
            self.ui.selected = index;
        }
    }

    /// Copy the resource payload to the clipboard. Resources without a
    /// payload are skipped without a write or a toast.
    #[instrument(level = "debug", skip(self))]
    fn remix(&mut self, key: &ResourceKey, scope: ToastScope) {
        let Some(payload) = self
            .store
            .resource(key.as_str())
            .and_then(|r| r.payload.clone())
        else {
            debug!(key = %key, "Remix unavailable without a payload");
            return;
        };
        self.clipboard.write_payload(payload, key.clone(), scope);
    }

    fn share_current(&mut self) {
        let Some(key) = self.modal.current_key().cloned() else {
            return;
        };
        let url = Route::Resource(key.clone()).share_url(&self.config.share.site_origin);
        self.clipboard.write_link(url, key, ToastScope::Modal);
    }

    fn on_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::ToastExpired { generation } => {
                self.toasts.expire(generation);
            }
            TaskResult::ClipboardWrite {
                toast,
                scope,
                key,
                success,
            } => {
                if !success {
                    warn!(
                        marker = "CLIPBOARD_WRITE_FAILED",
                        key = %key,
                        ?toast,
                        "Clipboard write failed"
                    );
                    return;
                }
                if !self.scope_visible(scope) {
                    debug!(key = %key, ?scope, "Owner closed before the write finished");
                    return;
                }
                self.toasts.show(toast, scope);
            }
        }
    }

    fn scope_visible(&self, scope: ToastScope) -> bool {
        match scope {
            ToastScope::Gallery => true,
            ToastScope::Search => self.ui.search_open(),
            ToastScope::Modal => self.modal.is_open(),
        }
    }

    /// Deliver pending history events: the modal's listener first, then the
    /// route renderer.
    fn sync_history(&mut self) {
        loop {
            if self.modal.poll_history(&mut self.history) {
                self.toasts.cancel_scope(ToastScope::Modal);
            }

            let mut popped = Vec::new();
            while let Ok(HistoryEvent::PopState(route)) = self.router.rx.try_recv() {
                popped.push(route);
            }
            if popped.is_empty() {
                break;
            }
            for route in popped {
                self.render_route(route);
            }
        }
    }

    /// Render a route: a resource route opens its modal over the listing, an
    /// unknown key falls back to the listing with a notification.
    fn render_route(&mut self, route: Route) {
        let Route::Resource(key) = route else {
            return;
        };

        if self.store.resource(key.as_str()).is_none() {
            warn!(marker = "UNKNOWN_RESOURCE_ROUTE", key = %key, "Unknown resource route");
            self.history.replace(Route::Listing);
            self.ui
                .notify(format!("Resource not found: {key}"), NotificationLevel::Warning);
            return;
        }

        let filtered = self.store.filtered_keys();
        let backing = if filtered.contains(&key) {
            filtered
        } else {
            vec![key.clone()]
        };
        info!(key = %key, "Rendering resource route");
        self.backing_source = BackingSource::Gallery;
        self.modal.open_deep_link(key, backing, &mut self.history);
    }

    /// Payload of the open resource, if it has one.
    pub fn current_payload(&self) -> Option<&ClipboardPayload> {
        self.modal.current_resource(&self.store)?.payload.as_ref()
    }
}
