//! Clipboard backends: the platform clipboard and an in-memory stand-in

use crate::error::{ClipError, ClipResult};
use crate::payload::MimeType;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::trace;

/// Minimal surface the codec needs from a clipboard.
pub trait ClipboardBackend: Send {
    /// Replace the clipboard with a `text/html` representation.
    fn set_html(&mut self, html: &str, alt_text: Option<&str>) -> ClipResult<()>;

    /// Replace the clipboard with a `text/plain` representation.
    fn set_text(&mut self, text: &str) -> ClipResult<()>;

    fn get_html(&mut self) -> ClipResult<Option<String>>;

    fn get_text(&mut self) -> ClipResult<Option<String>>;

    fn name(&self) -> &'static str;
}

impl<B: ClipboardBackend + ?Sized> ClipboardBackend for Box<B> {
    fn set_html(&mut self, html: &str, alt_text: Option<&str>) -> ClipResult<()> {
        (**self).set_html(html, alt_text)
    }

    fn set_text(&mut self, text: &str) -> ClipResult<()> {
        (**self).set_text(text)
    }

    fn get_html(&mut self) -> ClipResult<Option<String>> {
        (**self).get_html()
    }

    fn get_text(&mut self) -> ClipResult<Option<String>> {
        (**self).get_text()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Platform clipboard via `arboard`.
///
/// A handle is opened per operation so the backend stays `Send` on every
/// platform. On X11 and Wayland the selection lives only as long as its
/// owner; a holding clipboard blocks each write until another client takes
/// the selection over, so a short-lived process does not drop its contents
/// on exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard {
    hold: bool,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes block until the contents are replaced by another owner.
    pub fn holding() -> Self {
        Self { hold: true }
    }

    pub fn holds_until_replaced(&self) -> bool {
        self.hold
    }

    fn open() -> ClipResult<arboard::Clipboard> {
        arboard::Clipboard::new().map_err(ClipError::from)
    }
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn set(clipboard: &mut arboard::Clipboard, hold: bool) -> arboard::Set<'_> {
    use arboard::SetExtLinux;

    let set = clipboard.set();
    if hold { set.wait() } else { set }
}

// Other platforms keep the contents after the writer exits.
#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn set(clipboard: &mut arboard::Clipboard, _hold: bool) -> arboard::Set<'_> {
    clipboard.set()
}

fn missing_as_none(result: Result<String, arboard::Error>) -> ClipResult<Option<String>> {
    match result {
        Ok(content) => Ok(Some(content)),
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

impl ClipboardBackend for SystemClipboard {
    fn set_html(&mut self, html: &str, alt_text: Option<&str>) -> ClipResult<()> {
        trace!(bytes = html.len(), hold = self.hold, "system clipboard: set text/html");
        let mut clipboard = Self::open()?;
        set(&mut clipboard, self.hold).html(html, alt_text)?;
        Ok(())
    }

    fn set_text(&mut self, text: &str) -> ClipResult<()> {
        trace!(bytes = text.len(), hold = self.hold, "system clipboard: set text/plain");
        let mut clipboard = Self::open()?;
        set(&mut clipboard, self.hold).text(text)?;
        Ok(())
    }

    fn get_html(&mut self) -> ClipResult<Option<String>> {
        missing_as_none(Self::open()?.get().html())
    }

    fn get_text(&mut self) -> ClipResult<Option<String>> {
        missing_as_none(Self::open()?.get_text())
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

#[derive(Debug, Default)]
struct MemoryContents {
    representations: IndexMap<MimeType, String>,
    writes: usize,
    deny_access: bool,
}

/// Clipboard kept in process memory. Clones share the same contents, so a
/// test can hand one clone to the codec and inspect the other.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    inner: Arc<Mutex<MemoryContents>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose every access fails like a platform permission denial.
    pub fn denying() -> Self {
        let clipboard = Self::new();
        clipboard.set_deny_access(true);
        clipboard
    }

    fn lock(&self) -> MutexGuard<'_, MemoryContents> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_deny_access(&self, deny: bool) {
        self.lock().deny_access = deny;
    }

    pub fn representation(&self, mime: &MimeType) -> Option<String> {
        self.lock().representations.get(mime).cloned()
    }

    pub fn mime_types(&self) -> Vec<MimeType> {
        self.lock().representations.keys().cloned().collect()
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn replace(&self, entries: impl IntoIterator<Item = (MimeType, String)>) -> ClipResult<()> {
        let mut contents = self.lock();
        if contents.deny_access {
            return Err(ClipError::access_denied("memory clipboard denies access"));
        }
        contents.representations = entries.into_iter().collect();
        contents.writes += 1;
        Ok(())
    }

    fn read(&self, mime: &MimeType) -> ClipResult<Option<String>> {
        let contents = self.lock();
        if contents.deny_access {
            return Err(ClipError::access_denied("memory clipboard denies access"));
        }
        Ok(contents.representations.get(mime).cloned())
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn set_html(&mut self, html: &str, alt_text: Option<&str>) -> ClipResult<()> {
        let mut entries = vec![(MimeType::TextHtml, html.to_owned())];
        if let Some(alt) = alt_text {
            entries.push((MimeType::TextPlain, alt.to_owned()));
        }
        self.replace(entries)
    }

    fn set_text(&mut self, text: &str) -> ClipResult<()> {
        self.replace([(MimeType::TextPlain, text.to_owned())])
    }

    fn get_html(&mut self) -> ClipResult<Option<String>> {
        self.read(&MimeType::TextHtml)
    }

    fn get_text(&mut self) -> ClipResult<Option<String>> {
        self.read(&MimeType::TextPlain)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_holding_clipboard_waits_for_replacement() {
        assert!(SystemClipboard::holding().holds_until_replaced());
        assert!(!SystemClipboard::new().holds_until_replaced());
        assert!(!SystemClipboard::default().holds_until_replaced());
    }

    #[test]
    fn clones_share_contents() {
        let observer = MemoryClipboard::new();
        let mut writer = observer.clone();

        writer.set_html("<p>x</p>", None).unwrap();
        assert_eq!(
            observer.representation(&MimeType::TextHtml).as_deref(),
            Some("<p>x</p>")
        );
        assert_eq!(observer.mime_types(), vec![MimeType::TextHtml]);
        assert_eq!(observer.write_count(), 1);
    }

    #[test]
    fn text_write_replaces_html() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.set_html("<p>x</p>", Some("x")).unwrap();
        clipboard.set_text("https://example.com").unwrap();

        assert_eq!(clipboard.get_html().unwrap(), None);
        assert_eq!(
            clipboard.get_text().unwrap().as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn denial_fails_reads_and_writes() {
        let mut clipboard = MemoryClipboard::denying();
        assert!(matches!(
            clipboard.set_html("<p/>", None),
            Err(ClipError::AccessDenied(_))
        ));
        assert!(clipboard.get_text().is_err());
        assert_eq!(clipboard.write_count(), 0);
    }
}
