//! MIME-tagged clipboard content and the opaque rich-HTML payload

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clipboard representation formats the codec knows how to tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MimeType {
    TextHtml,
    TextPlain,
    Other(CompactString),
}

impl MimeType {
    pub fn as_str(&self) -> &str {
        match self {
            MimeType::TextHtml => "text/html",
            MimeType::TextPlain => "text/plain",
            MimeType::Other(mime) => mime.as_str(),
        }
    }

    pub fn parse(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "text/html" => MimeType::TextHtml,
            "text/plain" => MimeType::TextPlain,
            other => MimeType::Other(CompactString::from(other)),
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rich-HTML clipboard payload carried verbatim between paste and copy.
///
/// The content is never inspected or rewritten; it is only guaranteed to
/// contain something other than whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClipboardPayload(String);

impl ClipboardPayload {
    /// Returns `None` for empty or whitespace-only content.
    pub fn new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self(content))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ClipboardPayload {
    type Error = crate::ClipError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(crate::ClipError::EmptyPayload)
    }
}

impl From<ClipboardPayload> for String {
    fn from(payload: ClipboardPayload) -> Self {
        payload.0
    }
}

impl AsRef<str> for ClipboardPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A paste as seen by the receiving widget: every representation the
/// platform offered, plus whether the default insertion was suppressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteEvent {
    representations: IndexMap<MimeType, String>,
    default_prevented: bool,
}

impl PasteEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Terminal bracketed pastes only ever carry plain text.
    pub fn from_plain_text(text: impl Into<String>) -> Self {
        Self::new().with(MimeType::TextPlain, text)
    }

    #[must_use]
    pub fn with(mut self, mime: MimeType, data: impl Into<String>) -> Self {
        self.representations.insert(mime, data.into());
        self
    }

    pub fn get(&self, mime: &MimeType) -> Option<&str> {
        self.representations.get(mime).map(String::as_str)
    }

    pub fn mime_types(&self) -> impl Iterator<Item = &MimeType> {
        self.representations.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.representations.is_empty()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_payloads_do_not_exist() {
        assert!(ClipboardPayload::new("").is_none());
        assert!(ClipboardPayload::new(" \n\t").is_none());
        let payload = ClipboardPayload::new("  <b>x</b>  ").unwrap();
        assert_eq!(payload.as_str(), "  <b>x</b>  ");
    }

    #[test]
    fn payload_deserialization_rejects_blank() {
        let ok: ClipboardPayload = serde_json::from_str("\"<meta>\"").unwrap();
        assert_eq!(ok.as_str(), "<meta>");
        assert!(serde_json::from_str::<ClipboardPayload>("\"   \"").is_err());
    }

    #[test]
    fn mime_parse_is_case_insensitive() {
        assert_eq!(MimeType::parse("Text/HTML"), MimeType::TextHtml);
        assert_eq!(MimeType::parse("text/plain"), MimeType::TextPlain);
        assert_eq!(
            MimeType::parse("image/png"),
            MimeType::Other(CompactString::from("image/png"))
        );
    }

    #[test]
    fn paste_event_keeps_offer_order() {
        let event = PasteEvent::new()
            .with(MimeType::TextPlain, "plain")
            .with(MimeType::TextHtml, "<p>rich</p>");
        let order: Vec<&str> = event.mime_types().map(MimeType::as_str).collect();
        assert_eq!(order, ["text/plain", "text/html"]);
        assert!(!event.default_prevented());
    }
}
