//! Session history: a back/forward stack of routes that publishes pops to
//! subscribers as messages instead of exposing shared mutable state.

use slab::Slab;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::model::route::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// The cursor moved via back/forward and now rests on this route.
    PopState(Route),
}

pub type ListenerId = usize;

#[derive(Debug)]
pub struct HistorySubscription {
    pub id: ListenerId,
    pub rx: mpsc::UnboundedReceiver<HistoryEvent>,
}

#[derive(Debug)]
pub struct SessionHistory {
    entries: Vec<Route>,
    cursor: usize,
    listeners: Slab<mpsc::UnboundedSender<HistoryEvent>>,
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new(Route::Listing)
    }
}

impl SessionHistory {
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            listeners: Slab::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.entries[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Append a route, discarding any forward entries.
    pub fn push(&mut self, route: Route) {
        self.entries.truncate(self.cursor + 1);
        debug!(route = %route, depth = self.entries.len() + 1, "History push");
        self.entries.push(route);
        self.cursor = self.entries.len() - 1;
    }

    /// Overwrite the current entry in place.
    pub fn replace(&mut self, route: Route) {
        trace!(route = %route, "History replace");
        self.entries[self.cursor] = route;
    }

    pub fn back(&mut self) -> Option<&Route> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        self.pop_state();
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Route> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        self.pop_state();
        Some(self.current())
    }

    pub fn subscribe(&mut self) -> HistorySubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.listeners.insert(tx);
        trace!(listener = id, "History listener registered");
        HistorySubscription { id, rx }
    }

    /// Returns whether the listener was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.try_remove(id).is_some();
        trace!(listener = id, removed, "History listener removed");
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn pop_state(&mut self) {
        let event = HistoryEvent::PopState(self.current().clone());
        debug!(route = %self.current(), listeners = self.listeners.len(), "History pop");

        // Receivers dropped without unsubscribing are pruned here.
        let closed: Vec<ListenerId> = self
            .listeners
            .iter()
            .filter(|(_, tx)| tx.send(event.clone()).is_err())
            .map(|(id, _)| id)
            .collect();
        for id in closed {
            self.listeners.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resource::ResourceKey;

    fn resource(key: &str) -> Route {
        Route::Resource(ResourceKey::from(key))
    }

    #[test]
    fn push_back_forward() {
        let mut history = SessionHistory::default();
        history.push(resource("a"));
        assert!(history.can_go_back());

        assert_eq!(history.back(), Some(&Route::Listing));
        assert!(!history.can_go_back());
        assert_eq!(history.back(), None);

        assert_eq!(history.forward(), Some(&resource("a")));
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn replace_does_not_grow_the_stack() {
        let mut history = SessionHistory::default();
        history.push(resource("a"));
        history.replace(resource("b"));
        history.replace(resource("c"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), &resource("c"));
    }

    #[test]
    fn push_truncates_forward_entries() {
        let mut history = SessionHistory::default();
        history.push(resource("a"));
        history.back();
        history.push(resource("b"));

        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn pops_are_delivered_to_subscribers() {
        let mut history = SessionHistory::default();
        let mut sub = history.subscribe();
        history.push(resource("a"));
        assert!(sub.rx.try_recv().is_err(), "push is not a pop");

        history.back();
        assert_eq!(sub.rx.try_recv(), Ok(HistoryEvent::PopState(Route::Listing)));
    }

    #[test]
    fn unsubscribe_and_dropped_receivers() {
        let mut history = SessionHistory::default();
        let kept = history.subscribe();
        let dropped = history.subscribe();
        assert_eq!(history.subscriber_count(), 2);

        drop(dropped.rx);
        history.push(resource("a"));
        history.back();
        assert_eq!(history.subscriber_count(), 1);

        assert!(history.unsubscribe(kept.id));
        assert!(!history.unsubscribe(kept.id));
        assert_eq!(history.subscriber_count(), 0);
    }
}
