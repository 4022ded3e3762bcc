//! Runs clipboard writes on the blocking pool and reports completion back
//! to the event loop as `TaskResult::ClipboardWrite`.

use std::sync::{Arc, Mutex};

use clipr::{ClipboardBackend, ClipboardCodec, ClipboardConfig, ClipboardPayload};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::controller::event_loop::TaskResult;
use crate::model::resource::ResourceKey;
use crate::model::toast::{ToastKind, ToastScope};

type SharedCodec = Arc<Mutex<ClipboardCodec<Box<dyn ClipboardBackend>>>>;

#[derive(Clone)]
pub struct ClipboardWorker {
    codec: SharedCodec,
    task_tx: UnboundedSender<TaskResult>,
}

impl std::fmt::Debug for ClipboardWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardWorker").finish_non_exhaustive()
    }
}

enum Write {
    Payload(ClipboardPayload),
    Link(String),
}

impl ClipboardWorker {
    pub fn new(
        backend: Box<dyn ClipboardBackend>,
        config: ClipboardConfig,
        task_tx: UnboundedSender<TaskResult>,
    ) -> Self {
        Self {
            codec: Arc::new(Mutex::new(ClipboardCodec::new(backend, config))),
            task_tx,
        }
    }

    /// Place a resource payload on the clipboard as rich HTML.
    pub fn write_payload(
        &self,
        payload: ClipboardPayload,
        key: ResourceKey,
        scope: ToastScope,
    ) -> JoinHandle<()> {
        self.spawn(Write::Payload(payload), ToastKind::Remix, key, scope)
    }

    /// Place a share link on the clipboard as plain text.
    pub fn write_link(&self, url: String, key: ResourceKey, scope: ToastScope) -> JoinHandle<()> {
        self.spawn(Write::Link(url), ToastKind::Copy, key, scope)
    }

    fn spawn(
        &self,
        write: Write,
        toast: ToastKind,
        key: ResourceKey,
        scope: ToastScope,
    ) -> JoinHandle<()> {
        let codec = Arc::clone(&self.codec);
        let task_tx = self.task_tx.clone();

        tokio::task::spawn_blocking(move || {
            let success = match codec.lock() {
                Ok(mut codec) => match &write {
                    Write::Payload(payload) => codec.write(payload),
                    Write::Link(url) => codec.write_text(url),
                },
                Err(_) => {
                    warn!(marker = "CLIPBOARD_LOCK_POISONED", "Clipboard codec lock poisoned");
                    false
                }
            };
            debug!(key = %key, ?toast, success, "Clipboard write finished");
            let _ = task_tx.send(TaskResult::ClipboardWrite {
                toast,
                scope,
                key,
                success,
            });
        })
    }
}
