//! Catalog entities: resources, categories, tags and their routing identity

use std::borrow::Borrow;
use std::fmt;

use clipr::ClipboardPayload;
use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize};

/// Label used when a resource has no source name.
pub const DEFAULT_SOURCE_LABEL: &str = "Original source";

/// Key addressing a resource in routes and list lookups (slug, else id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceKey(CompactString);

impl ResourceKey {
    pub fn new(key: impl Into<CompactString>) -> Self {
        Self(key.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ResourceKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CompactString,
    pub title: String,
}

impl Category {
    pub fn new(id: impl Into<CompactString>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id")]
    pub id: CompactString,
    pub title: String,
}

impl Tag {
    pub fn new(id: impl Into<CompactString>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A cataloged design asset. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "_id")]
    pub id: CompactString,
    pub name: String,
    #[serde(default)]
    pub slug: Option<CompactString>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    #[serde(default, rename = "figmaCode", deserialize_with = "blank_payload_as_none")]
    pub payload: Option<ClipboardPayload>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub category_ref: Option<CompactString>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<Tag>,
}

fn blank_payload_as_none<'de, D>(deserializer: D) -> Result<Option<ClipboardPayload>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(ClipboardPayload::new))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Tag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Tag>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

/// Routing identity of a resource: its slug when present and non-blank,
/// otherwise its id. Defined for every resource.
pub fn identity_of(resource: &Resource) -> ResourceKey {
    match resource.slug.as_deref().map(str::trim) {
        Some(slug) if !slug.is_empty() => ResourceKey::new(slug),
        _ => ResourceKey::new(resource.id.clone()),
    }
}

impl Resource {
    pub fn new(id: impl Into<CompactString>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: None,
            image_url: None,
            image_alt: None,
            payload: None,
            source_url: None,
            source_name: None,
            category_ref: None,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<CompactString>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category_id: impl Into<CompactString>) -> Self {
        self.category_ref = Some(category_id.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    #[must_use]
    pub fn with_payload(mut self, html: impl Into<String>) -> Self {
        self.payload = ClipboardPayload::new(html);
        self
    }

    #[inline]
    pub fn identity(&self) -> ResourceKey {
        identity_of(self)
    }

    /// Remix actions are enabled only when a payload exists.
    #[inline]
    pub fn can_remix(&self) -> bool {
        self.payload.is_some()
    }

    pub fn display_alt(&self) -> &str {
        self.image_alt.as_deref().unwrap_or(&self.name)
    }

    pub fn source_label(&self) -> &str {
        self.source_name.as_deref().unwrap_or(DEFAULT_SOURCE_LABEL)
    }

    pub fn tag_titles(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_prefers_slug() {
        let with_slug = Resource::new("abc123", "Media widgets").with_slug("media-widgets");
        assert_eq!(identity_of(&with_slug).as_str(), "media-widgets");

        let without = Resource::new("abc123", "Media widgets");
        assert_eq!(identity_of(&without).as_str(), "abc123");
    }

    #[test]
    fn blank_slug_falls_back_to_id() {
        let blank = Resource::new("abc123", "x").with_slug("  ");
        assert_eq!(blank.identity().as_str(), "abc123");
    }

    #[test]
    fn deserializes_query_projection() {
        let json = r#"{
            "_id": "r1",
            "name": "Alpha Button",
            "slug": null,
            "imageUrl": "https://cdn.example/a.png",
            "imageAlt": null,
            "figmaCode": "   ",
            "categoryRef": "cat-ui",
            "sourceUrl": "https://figma.com/community/file/1",
            "sourceName": null,
            "tags": null
        }"#;
        let resource: Resource = serde_json::from_str(json).unwrap();

        assert_eq!(resource.identity().as_str(), "r1");
        assert!(!resource.can_remix());
        assert!(resource.tags.is_empty());
        assert_eq!(resource.display_alt(), "Alpha Button");
        assert_eq!(resource.source_label(), DEFAULT_SOURCE_LABEL);
        assert_eq!(resource.category_ref.as_deref(), Some("cat-ui"));
    }

    #[test]
    fn payload_survives_deserialization_verbatim() {
        let json = r#"{"_id":"r2","name":"x","figmaCode":"<meta charset=\"utf-8\"> <span/>"}"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(
            resource.payload.as_ref().map(ClipboardPayload::as_str),
            Some("<meta charset=\"utf-8\"> <span/>")
        );
    }
}
