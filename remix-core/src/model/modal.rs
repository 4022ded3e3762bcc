//! Detail modal state machine, kept in step with the session history.
//!
//! ```text
//!   Closed --open(key)----------> Open(key, Pushed)     push /resource/key
//!   Closed --open_deep_link(key)> Open(key, DeepLink)   no push
//!   Open   --navigate(dir)------> Open(key')            replace entry
//!   Open   --close--------------> Closed                back, or push /
//!   Open   --PopState-----------> Closed                unconditional
//! ```
//!
//! While open the navigator owns exactly one history listener; it is
//! released on every path back to `Closed`.

use tracing::{debug, info};

use crate::model::history::{HistoryEvent, HistorySubscription, SessionHistory};
use crate::model::library::ResourceLibraryStore;
use crate::model::resource::{Resource, ResourceKey};
use crate::model::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOrigin {
    /// Opened from the gallery or search; a history entry was pushed.
    Pushed,
    /// Opened by rendering a route (startup deep link or a history pop).
    DeepLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open {
        key: ResourceKey,
        origin: ModalOrigin,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// How a close was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseVia {
    HistoryBack,
    PushListing,
}

#[derive(Debug, Default)]
pub struct ModalNavigator {
    state: ModalState,
    backing: Vec<ResourceKey>,
    listener: Option<HistorySubscription>,
}

impl ModalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn current_key(&self) -> Option<&ResourceKey> {
        match &self.state {
            ModalState::Open { key, .. } => Some(key),
            ModalState::Closed => None,
        }
    }

    pub fn origin(&self) -> Option<ModalOrigin> {
        match &self.state {
            ModalState::Open { origin, .. } => Some(*origin),
            ModalState::Closed => None,
        }
    }

    pub fn backing(&self) -> &[ResourceKey] {
        &self.backing
    }

    /// Prev/next are disabled for backing lists of zero or one entries.
    pub fn can_navigate(&self) -> bool {
        self.is_open() && self.backing.len() > 1
    }

    /// 1-based position of the current key and the backing length.
    pub fn position(&self) -> Option<(usize, usize)> {
        let key = self.current_key()?;
        let idx = self.backing.iter().position(|k| k == key)?;
        Some((idx + 1, self.backing.len()))
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Open from a user selection, pushing the resource route.
    pub fn open(
        &mut self,
        key: ResourceKey,
        backing: Vec<ResourceKey>,
        history: &mut SessionHistory,
    ) {
        let route = Route::Resource(key.clone());
        if self.is_open() {
            history.replace(route);
        } else {
            history.push(route);
        }
        self.enter(key, backing, ModalOrigin::Pushed, history);
    }

    /// Open while rendering a route; the history already points here.
    pub fn open_deep_link(
        &mut self,
        key: ResourceKey,
        backing: Vec<ResourceKey>,
        history: &mut SessionHistory,
    ) {
        self.enter(key, backing, ModalOrigin::DeepLink, history);
    }

    fn enter(
        &mut self,
        key: ResourceKey,
        backing: Vec<ResourceKey>,
        origin: ModalOrigin,
        history: &mut SessionHistory,
    ) {
        self.backing = if backing.is_empty() {
            vec![key.clone()]
        } else {
            backing
        };
        if self.listener.is_none() {
            self.listener = Some(history.subscribe());
        }
        info!(
            marker = "MODAL_OPENED",
            key = %key,
            ?origin,
            backing = self.backing.len(),
            "Resource modal opened"
        );
        self.state = ModalState::Open { key, origin };
    }

    /// Step through the backing list circularly, replacing the history entry.
    /// No-op when closed, when the list has fewer than two entries, or when
    /// the current key is not in the list.
    pub fn navigate(
        &mut self,
        direction: Direction,
        history: &mut SessionHistory,
    ) -> Option<&ResourceKey> {
        if !self.can_navigate() {
            return None;
        }
        let ModalState::Open { key, .. } = &mut self.state else {
            return None;
        };
        let len = self.backing.len();
        let idx = self.backing.iter().position(|k| k == key)?;
        let next = match direction {
            Direction::Prev => (idx + len - 1) % len,
            Direction::Next => (idx + 1) % len,
        };

        *key = self.backing[next].clone();
        debug!(key = %key, ?direction, index = next, "Modal navigated");
        history.replace(Route::Resource(key.clone()));
        Some(&*key)
    }

    /// Close the modal. Goes back in history whenever an earlier entry
    /// exists in this session, otherwise pushes the listing route.
    pub fn close(&mut self, history: &mut SessionHistory) -> Option<CloseVia> {
        if !self.is_open() {
            return None;
        }
        self.release(history);

        let via = if history.can_go_back() {
            history.back();
            CloseVia::HistoryBack
        } else {
            history.push(Route::Listing);
            CloseVia::PushListing
        };
        info!(marker = "MODAL_CLOSED", ?via, "Resource modal closed");
        Some(via)
    }

    /// Apply a history event: any pop forces `Closed`.
    pub fn on_history_event(&mut self, event: &HistoryEvent, history: &mut SessionHistory) {
        match event {
            HistoryEvent::PopState(route) => {
                if self.is_open() {
                    debug!(route = %route, "History pop closed the modal");
                    self.release(history);
                }
            }
        }
    }

    /// Drain events delivered to the modal's listener. Returns whether the
    /// modal was closed by one of them.
    pub fn poll_history(&mut self, history: &mut SessionHistory) -> bool {
        let mut events = Vec::new();
        if let Some(listener) = self.listener.as_mut() {
            while let Ok(event) = listener.rx.try_recv() {
                events.push(event);
            }
        }

        let was_open = self.is_open();
        for event in &events {
            self.on_history_event(event, history);
        }
        was_open && !self.is_open()
    }

    /// Swap in a new backing list. Closes when the current key vanished.
    pub fn resync(&mut self, backing: Vec<ResourceKey>, history: &mut SessionHistory) {
        let Some(key) = self.current_key() else {
            self.backing = backing;
            return;
        };
        if backing.contains(key) {
            self.backing = backing;
        } else {
            debug!(key = %key, "Current resource left the backing list");
            self.backing = backing;
            self.close(history);
        }
    }

    /// Resolve the current key against the full collection. `None` renders
    /// nothing.
    pub fn current_resource<'a>(&self, store: &'a ResourceLibraryStore) -> Option<&'a Resource> {
        store.resource(self.current_key()?.as_str())
    }

    fn release(&mut self, history: &mut SessionHistory) {
        if let Some(listener) = self.listener.take() {
            history.unsubscribe(listener.id);
        }
        self.state = ModalState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resource::Category;

    fn keys(names: &[&str]) -> Vec<ResourceKey> {
        names.iter().map(|n| ResourceKey::from(*n)).collect()
    }

    fn key(name: &str) -> ResourceKey {
        ResourceKey::from(name)
    }

    #[test]
    fn open_pushes_and_back_closes() {
        let mut history = SessionHistory::default();
        let mut modal = ModalNavigator::new();

        modal.open(key("b"), keys(&["a", "b", "c"]), &mut history);
        assert_eq!(history.current(), &Route::Resource(key("b")));
        assert_eq!(modal.origin(), Some(ModalOrigin::Pushed));
        assert_eq!(modal.position(), Some((2, 3)));

        history.back();
        assert!(modal.poll_history(&mut history));
        assert_eq!(modal.state(), &ModalState::Closed);
        assert_eq!(history.subscriber_count(), 0);
    }

    #[test]
    fn arrow_right_five_times_over_three() {
        let mut history = SessionHistory::default();
        let mut modal = ModalNavigator::new();
        modal.open(key("a"), keys(&["a", "b", "c"]), &mut history);

        for _ in 0..5 {
            modal.navigate(Direction::Next, &mut history);
        }
        assert_eq!(modal.current_key(), Some(&key("c")));
        assert_eq!(history.len(), 2, "navigation replaces entries");
        assert_eq!(history.current(), &Route::Resource(key("c")));
    }

    #[test]
    fn prev_then_next_round_trips_and_wraps() {
        let mut history = SessionHistory::default();
        let mut modal = ModalNavigator::new();
        let backing = keys(&["a", "b", "c", "d"]);

        for start in &backing {
            modal.open(start.clone(), backing.clone(), &mut history);
            modal.navigate(Direction::Prev, &mut history);
            modal.navigate(Direction::Next, &mut history);
            assert_eq!(modal.current_key(), Some(start));
        }

        modal.open(key("a"), backing.clone(), &mut history);
        assert_eq!(modal.navigate(Direction::Prev, &mut history), Some(&key("d")));
        assert_eq!(modal.navigate(Direction::Next, &mut history), Some(&key("a")));
    }

    #[test]
    fn singleton_backing_disables_navigation() {
        let mut history = SessionHistory::default();
        let mut modal = ModalNavigator::new();
        modal.open(key("solo"), Vec::new(), &mut history);

        assert_eq!(modal.backing(), &keys(&["solo"])[..]);
        assert!(!modal.can_navigate());
        assert_eq!(modal.navigate(Direction::Next, &mut history), None);
        assert_eq!(modal.current_key(), Some(&key("solo")));
    }

    #[test]
    fn close_after_push_goes_back() {
        let mut history = SessionHistory::default();
        let mut modal = ModalNavigator::new();
        modal.open(key("a"), keys(&["a", "b"]), &mut history);
        modal.navigate(Direction::Next, &mut history);

        assert_eq!(modal.close(&mut history), Some(CloseVia::HistoryBack));
        assert_eq!(history.current(), &Route::Listing);
        assert!(history.can_go_forward());
        assert_eq!(modal.close(&mut history), None);
    }

    #[test]
    fn close_after_cold_deep_link_pushes_listing() {
        let mut history = SessionHistory::new(Route::Resource(key("x")));
        let mut modal = ModalNavigator::new();
        modal.open_deep_link(key("x"), Vec::new(), &mut history);
        assert_eq!(history.len(), 1, "deep links do not push");

        assert_eq!(modal.close(&mut history), Some(CloseVia::PushListing));
        assert_eq!(history.current(), &Route::Listing);
        assert!(history.can_go_back());
    }

    #[test]
    fn one_listener_across_repeated_cycles() {
        let mut history = SessionHistory::default();
        let mut modal = ModalNavigator::new();

        for _ in 0..4 {
            modal.open(key("a"), keys(&["a", "b"]), &mut history);
            modal.navigate(Direction::Next, &mut history);
            assert_eq!(history.subscriber_count(), 1);
            modal.close(&mut history);
            assert_eq!(history.subscriber_count(), 0);
            assert!(!modal.has_listener());
        }
    }

    #[test]
    fn popstate_always_closes() {
        let mut history = SessionHistory::default();
        let mut modal = ModalNavigator::new();
        modal.open(key("a"), keys(&["a"]), &mut history);

        modal.on_history_event(&HistoryEvent::PopState(Route::Resource(key("a"))), &mut history);
        assert!(!modal.is_open());
        assert_eq!(history.subscriber_count(), 0);
    }

    #[test]
    fn resync_closes_when_key_disappears() {
        let mut history = SessionHistory::default();
        let mut modal = ModalNavigator::new();
        modal.open(key("b"), keys(&["a", "b", "c"]), &mut history);

        modal.resync(keys(&["b", "c"]), &mut history);
        assert!(modal.is_open());
        assert_eq!(modal.position(), Some((1, 2)));

        modal.resync(keys(&["c"]), &mut history);
        assert!(!modal.is_open());
        assert_eq!(history.current(), &Route::Listing);
    }

    #[test]
    fn unresolvable_key_renders_nothing() {
        let store = ResourceLibraryStore::new(
            vec![Category::new("a", "Apps")],
            vec![Resource::new("1", "One").with_slug("one")],
        );
        let mut history = SessionHistory::default();
        let mut modal = ModalNavigator::new();

        modal.open(key("one"), Vec::new(), &mut history);
        assert_eq!(modal.current_resource(&store).map(|r| r.name.as_str()), Some("One"));

        modal.open(key("ghost"), Vec::new(), &mut history);
        assert!(modal.current_resource(&store).is_none());
    }
}
