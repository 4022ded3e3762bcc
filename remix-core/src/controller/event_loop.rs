//! ``src/controller/event_loop.rs``
//! ============================================================================
//! # Event Loop
//!
//! Merges terminal input and background completions into one `Action`
//! stream. Terminal keys go through the `KeyRouter` for the current input
//! context; completions arrive as `TaskResult` messages.

use std::time::Instant;

use crossterm::event::{Event as TermEvent, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use crate::controller::actions::Action;
use crate::controller::handlers::{InputContext, KeyRouter};
use crate::model::resource::ResourceKey;
use crate::model::toast::{ToastKind, ToastScope};

/// Completion messages posted by background work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// A toast timer ran out.
    ToastExpired { generation: u64 },

    /// A clipboard write finished on the blocking pool.
    ClipboardWrite {
        toast: ToastKind,
        scope: ToastScope,
        key: ResourceKey,
        success: bool,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnap {
    pub tasks: u64,
    pub keys: u64,
    pub unhandled: u64,
}

pub struct EventLoop {
    task_rx: mpsc::UnboundedReceiver<TaskResult>,
    event_stream: EventStream,
    router: KeyRouter,
    metrics: MetricsSnap,
    started: Instant,
}

impl EventLoop {
    pub fn new(task_rx: mpsc::UnboundedReceiver<TaskResult>, router: KeyRouter) -> Self {
        info!(handlers = ?router.handler_names(), "Event loop initialized");
        Self {
            task_rx,
            event_stream: EventStream::new(),
            router,
            metrics: MetricsSnap::default(),
            started: Instant::now(),
        }
    }

    /// Wait for the next terminal event or task completion. `context` picks
    /// the key bindings in force. Returns `None` when both sources closed.
    pub async fn next_actions(&mut self, context: InputContext) -> Option<Vec<Action>> {
        tokio::select! {
            maybe_event = self.event_stream.next() => {
                let event = maybe_event?.ok()?;
                trace!(?event, "Terminal event received");
                Some(self.map_terminal_event(event, context))
            }
            Some(result) = self.task_rx.recv() => {
                self.metrics.tasks += 1;
                trace!(?result, "Task result received");
                Some(vec![Action::TaskResult(result)])
            }
        }
    }

    fn map_terminal_event(&mut self, event: TermEvent, context: InputContext) -> Vec<Action> {
        match event {
            TermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                self.metrics.keys += 1;
                let actions = self.router.route(context, key);
                if actions.is_empty() {
                    self.metrics.unhandled += 1;
                }
                actions
            }
            TermEvent::Resize(w, h) => vec![Action::Resize(w, h)],
            other => {
                debug!(event = ?other, "Ignoring terminal event");
                Vec::new()
            }
        }
    }

    pub fn snapshot_metrics(&self) -> MetricsSnap {
        self.metrics
    }

    pub fn uptime(&self) -> std::time::Duration {
        self.started.elapsed()
    }
}
