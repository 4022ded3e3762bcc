//! # clipr - Rich-HTML clipboard codec
//!
//! Captures the `text/html` representation of a paste and writes it back to
//! the clipboard unchanged, so structured data (vector layers copied from a
//! design tool) survives a round trip through a plain string field.
//!
//! ## Key Features
//! - Opaque payload passthrough with MIME tagging on both sides
//! - Plain-text-only pastes rejected, never degraded
//! - Non-fatal writes: denial is reported as `false`, not a panic
//! - Swappable backends (platform clipboard, in-memory)

pub mod clipboard;
pub mod codec;
pub mod config;
pub mod error;
pub mod payload;

// Re-export main types for easy use
pub use clipboard::{ClipboardBackend, MemoryClipboard, SystemClipboard};
pub use codec::ClipboardCodec;
pub use config::ClipboardConfig;
pub use error::{ClipError, ClipResult};
pub use payload::{ClipboardPayload, MimeType, PasteEvent};
