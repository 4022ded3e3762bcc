//! Rich-HTML clipboard codec
//!
//! Moves an opaque HTML payload between a paste and the clipboard without
//! touching its content. The only work done here is MIME tagging: capture
//! reads `text/html` (never falls back to plain text) and write places the
//! payload back as `text/html`, so a design tool can rebuild vector nodes
//! from the metadata embedded in the markup.

use crate::clipboard::ClipboardBackend;
use crate::config::ClipboardConfig;
use crate::error::{ClipError, ClipResult};
use crate::payload::{ClipboardPayload, MimeType, PasteEvent};
use tracing::{debug, instrument, warn};

#[derive(Debug)]
pub struct ClipboardCodec<B> {
    backend: B,
    config: ClipboardConfig,
}

impl<B: ClipboardBackend> ClipboardCodec<B> {
    pub fn new(backend: B, config: ClipboardConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &ClipboardConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Extract the rich-HTML payload from a paste.
    ///
    /// Plain-text-only pastes yield `None`. When a payload is produced the
    /// event's default insertion is suppressed so the payload replaces it.
    #[instrument(level = "debug", skip_all, fields(offered = event.mime_types().count()))]
    pub fn capture(&self, event: &mut PasteEvent) -> Option<ClipboardPayload> {
        let html = event.get(&MimeType::TextHtml)?;

        if html.len() > self.config.max_payload_bytes {
            warn!(
                marker = "CLIPBOARD_CAPTURE_REJECTED",
                size = html.len(),
                max = self.config.max_payload_bytes,
                "Pasted HTML exceeds payload limit"
            );
            return None;
        }

        let payload = ClipboardPayload::new(html)?;
        event.prevent_default();
        debug!(bytes = payload.len(), "Captured rich-HTML payload");
        Some(payload)
    }

    /// Place `payload` on the clipboard as `text/html`.
    ///
    /// Returns `false` when the platform refuses; the failure is logged and
    /// otherwise swallowed.
    pub fn write(&mut self, payload: &ClipboardPayload) -> bool {
        match self.try_write(payload) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    marker = "CLIPBOARD_WRITE_FAILED",
                    backend = self.backend.name(),
                    error = %err,
                    "Rich-HTML clipboard write failed"
                );
                false
            }
        }
    }

    pub fn try_write(&mut self, payload: &ClipboardPayload) -> ClipResult<()> {
        if payload.as_str().trim().is_empty() {
            return Err(ClipError::EmptyPayload);
        }
        let alt = self.config.html_alt_text.as_deref();
        self.backend.set_html(payload.as_str(), alt)?;
        debug!(
            backend = self.backend.name(),
            bytes = payload.len(),
            "Wrote text/html to clipboard"
        );
        Ok(())
    }

    /// Place plain text on the clipboard (used for share links).
    pub fn write_text(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        match self.backend.set_text(text) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    marker = "CLIPBOARD_WRITE_FAILED",
                    backend = self.backend.name(),
                    error = %err,
                    "Plain-text clipboard write failed"
                );
                false
            }
        }
    }

    /// Snapshot the clipboard as a paste event carrying every representation
    /// the backend can read.
    pub fn read_paste_event(&mut self) -> ClipResult<PasteEvent> {
        let mut event = PasteEvent::new();
        if let Some(html) = self.backend.get_html()? {
            event = event.with(MimeType::TextHtml, html);
        }
        if let Some(text) = self.backend.get_text()? {
            event = event.with(MimeType::TextPlain, text);
        }
        Ok(event)
    }
}
