//!
//!  ``src/model/search_index.rs``
//!
//! Substring matcher over the full resource collection. Search is never
//! narrowed by the gallery's category selection.

use ahash::AHashMap;
use compact_str::CompactString;

use crate::model::resource::{Category, Resource};

#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    category_titles: AHashMap<CompactString, String>,
}

impl SearchIndex {
    #[must_use]
    pub fn new(categories: &[Category]) -> Self {
        let category_titles = categories
            .iter()
            .map(|category| (category.id.clone(), category.title.clone()))
            .collect();
        Self { category_titles }
    }

    pub fn category_title(&self, category_id: &str) -> Option<&str> {
        self.category_titles.get(category_id).map(String::as_str)
    }

    /// Case-insensitive substring match against name, tag titles and the
    /// resolved category title. Blank queries return everything; matches
    /// keep input order.
    pub fn query<'a>(&self, resources: &'a [Resource], text: &str) -> Vec<&'a Resource> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return resources.iter().collect();
        }

        resources
            .iter()
            .filter(|resource| self.matches(resource, &needle))
            .collect()
    }

    fn matches(&self, resource: &Resource, needle: &str) -> bool {
        if resource.name.to_lowercase().contains(needle) {
            return true;
        }
        if resource
            .tag_titles()
            .any(|title| title.to_lowercase().contains(needle))
        {
            return true;
        }
        resource
            .category_ref
            .as_deref()
            .and_then(|id| self.category_title(id))
            .is_some_and(|title| title.to_lowercase().contains(needle))
    }
}

/// Transient state of the search overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOverlayState {
    pub input: String,
    pub selected: usize,
}

impl SearchOverlayState {
    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.selected = 0;
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.selected = 0;
    }

    pub fn select_next(&mut self, result_count: usize) {
        if result_count > 0 {
            self.selected = (self.selected + 1).min(result_count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resource::Tag;

    fn fixture() -> (Vec<Category>, Vec<Resource>) {
        let categories = vec![
            Category::new("c-ui", "Interface"),
            Category::new("c-ill", "Illustrations"),
        ];
        let resources = vec![
            Resource::new("1", "Alpha Button")
                .with_category("c-ui")
                .with_tag(Tag::new("t-icon", "Icon")),
            Resource::new("2", "Beta Card").with_category("c-ill"),
            Resource::new("3", "Gamma Slider"),
        ];
        (categories, resources)
    }

    fn names<'a>(hits: &[&'a Resource]) -> Vec<&'a str> {
        hits.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let (categories, resources) = fixture();
        let index = SearchIndex::new(&categories);

        assert_eq!(
            names(&index.query(&resources, "")),
            ["Alpha Button", "Beta Card", "Gamma Slider"]
        );
        assert_eq!(index.query(&resources, "   \t").len(), 3);
    }

    #[test]
    fn matching_ignores_case() {
        let (categories, resources) = fixture();
        let index = SearchIndex::new(&categories);

        for query in ["alpha", "ALPHA BUTTON", "icon", "IcOn"] {
            assert_eq!(names(&index.query(&resources, query)), ["Alpha Button"], "{query}");
        }
    }

    #[test]
    fn category_title_is_searched() {
        let (categories, resources) = fixture();
        let index = SearchIndex::new(&categories);

        assert_eq!(names(&index.query(&resources, "illustr")), ["Beta Card"]);
        // Category ids are not searchable, only titles
        assert!(index.query(&resources, "c-ill").is_empty());
    }

    #[test]
    fn matches_keep_input_order() {
        let (categories, resources) = fixture();
        let index = SearchIndex::new(&categories);

        assert_eq!(
            names(&index.query(&resources, "a")),
            ["Alpha Button", "Beta Card", "Gamma Slider"]
        );
        assert!(index.query(&resources, "zzz").is_empty());
    }

    #[test]
    fn overlay_selection_is_clamped() {
        let mut overlay = SearchOverlayState::default();
        overlay.select_next(2);
        overlay.select_next(2);
        assert_eq!(overlay.selected, 1);

        overlay.push_char('x');
        assert_eq!(overlay.selected, 0);
        overlay.select_prev();
        assert_eq!(overlay.selected, 0);
        overlay.select_next(0);
        assert_eq!(overlay.selected, 0);
    }
}
