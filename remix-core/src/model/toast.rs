//! Single-slot, auto-dismissing toast.
//!
//! Every `show` owns its own timer and aborts the previous one; expiry is a
//! message posted back to the event loop and is ignored unless it carries
//! the generation currently on screen.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::config::ToastConfig;
use crate::controller::event_loop::TaskResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    /// Share link placed on the clipboard.
    Copy,
    /// Resource payload placed on the clipboard.
    Remix,
}

impl ToastKind {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Copy => "Link copied to clipboard",
            Self::Remix => "Resource copied. Paste in Figma to remix.",
        }
    }
}

/// Owner of a toast; closing the owner cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastScope {
    Gallery,
    Search,
    Modal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub scope: ToastScope,
    pub expires_at: Instant,
    pub generation: u64,
}

impl Toast {
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

#[derive(Debug)]
pub struct ToastScheduler {
    current: Option<Toast>,
    timer: Option<JoinHandle<()>>,
    generation: u64,
    config: ToastConfig,
    task_tx: UnboundedSender<TaskResult>,
}

impl ToastScheduler {
    pub fn new(config: ToastConfig, task_tx: UnboundedSender<TaskResult>) -> Self {
        Self {
            current: None,
            timer: None,
            generation: 0,
            config,
            task_tx,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn duration_for(&self, kind: ToastKind) -> Duration {
        match kind {
            ToastKind::Copy => self.config.copy_duration,
            ToastKind::Remix => self.config.remix_duration,
        }
    }

    /// Show a toast with the configured duration for its kind.
    pub fn show(&mut self, kind: ToastKind, scope: ToastScope) -> u64 {
        let duration = self.duration_for(kind);
        self.show_for(kind, duration, scope)
    }

    /// Preempt whatever is visible. Must run inside a tokio runtime.
    pub fn show_for(&mut self, kind: ToastKind, duration: Duration, scope: ToastScope) -> u64 {
        self.abort_timer();
        self.generation += 1;
        let generation = self.generation;

        self.current = Some(Toast {
            kind,
            scope,
            expires_at: Instant::now() + duration,
            generation,
        });

        let tx = self.task_tx.clone();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = tx.send(TaskResult::ToastExpired { generation });
        }));

        debug!(
            marker = "TOAST_SHOWN",
            ?kind,
            ?scope,
            generation,
            duration_ms = duration.as_millis() as u64,
            "Toast scheduled"
        );
        generation
    }

    /// Clear the toast if `generation` is still the visible one.
    pub fn expire(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(toast) if toast.generation == generation => {
                trace!(generation, "Toast expired");
                self.current = None;
                self.timer = None;
                true
            }
            _ => {
                trace!(generation, "Stale toast expiry ignored");
                false
            }
        }
    }

    /// Cancel the toast and its timer if `scope` owns it.
    pub fn cancel_scope(&mut self, scope: ToastScope) -> bool {
        if self.current.as_ref().is_some_and(|toast| toast.scope == scope) {
            self.dismiss();
            return true;
        }
        false
    }

    pub fn dismiss(&mut self) {
        self.abort_timer();
        self.current = None;
    }

    fn abort_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for ToastScheduler {
    fn drop(&mut self) {
        self.abort_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn scheduler() -> (ToastScheduler, mpsc::UnboundedReceiver<TaskResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ToastScheduler::new(ToastConfig::default(), tx), rx)
    }

    async fn next_expiry(rx: &mut mpsc::UnboundedReceiver<TaskResult>) -> u64 {
        match rx.recv().await {
            Some(TaskResult::ToastExpired { generation }) => generation,
            other => panic!("unexpected task result: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn toast_dismisses_itself() {
        let (mut toasts, mut rx) = scheduler();
        let generation = toasts.show(ToastKind::Copy, ToastScope::Gallery);
        assert_eq!(
            toasts.current().map(Toast::message),
            Some("Link copied to clipboard")
        );

        let started = Instant::now();
        assert_eq!(next_expiry(&mut rx).await, generation);
        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert!(toasts.expire(generation));
        assert!(toasts.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn new_toast_preempts_and_owns_its_timer() {
        let (mut toasts, mut rx) = scheduler();
        let first = toasts.show(ToastKind::Copy, ToastScope::Modal);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        let second = toasts.show(ToastKind::Remix, ToastScope::Modal);
        assert_ne!(first, second);

        // The copy timer would have fired at 1500ms; it was aborted.
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
        assert!(!toasts.expire(first));
        assert_eq!(toasts.current().map(|t| t.kind), Some(ToastKind::Remix));

        assert_eq!(next_expiry(&mut rx).await, second);
        assert!(toasts.expire(second));
    }

    #[tokio::test(start_paused = true)]
    async fn closing_the_modal_cancels_its_toast() {
        let (mut toasts, mut rx) = scheduler();
        toasts.show(ToastKind::Remix, ToastScope::Search);
        assert!(!toasts.cancel_scope(ToastScope::Modal));

        toasts.show(ToastKind::Remix, ToastScope::Modal);
        assert!(toasts.cancel_scope(ToastScope::Modal));
        assert!(toasts.current().is_none());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn durations_follow_config() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let config = ToastConfig {
            copy_duration: Duration::from_millis(10),
            remix_duration: Duration::from_millis(20),
        };
        let toasts = ToastScheduler::new(config, tx);
        assert_eq!(toasts.duration_for(ToastKind::Copy), Duration::from_millis(10));
        assert_eq!(toasts.duration_for(ToastKind::Remix), Duration::from_millis(20));
    }
}
