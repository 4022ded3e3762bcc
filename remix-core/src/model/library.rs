//! Resource library state: immutable collections plus the category selection
//! that derives the gallery view.

use ahash::{AHashMap, AHashSet};
use compact_str::CompactString;
use tracing::debug;

use crate::model::resource::{Category, Resource, ResourceKey};

/// Set of active category ids. Empty means "show all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    active: AHashSet<CompactString>,
}

impl SelectionState {
    pub fn contains(&self, category_id: &str) -> bool {
        self.active.contains(category_id)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Flip membership; returns whether the id is now selected.
    pub fn toggle(&mut self, category_id: &str) -> bool {
        if self.active.remove(category_id) {
            false
        } else {
            self.active.insert(CompactString::from(category_id));
            true
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// A resource matches an empty selection, or a selection holding its
    /// category. Uncategorized resources never match a non-empty selection.
    pub fn matches(&self, resource: &Resource) -> bool {
        if self.active.is_empty() {
            return true;
        }
        resource
            .category_ref
            .as_deref()
            .is_some_and(|category| self.active.contains(category))
    }
}

/// Derived gallery view: the input order restricted to matches.
pub fn filtered_resources<'a>(
    resources: &'a [Resource],
    selection: &SelectionState,
) -> Vec<&'a Resource> {
    resources
        .iter()
        .filter(|resource| selection.matches(resource))
        .collect()
}

#[derive(Debug, Clone)]
pub struct ResourceLibraryStore {
    categories: Vec<Category>,
    resources: Vec<Resource>,
    by_key: AHashMap<ResourceKey, usize>,
    category_titles: AHashMap<CompactString, usize>,
    selection: SelectionState,
}

impl ResourceLibraryStore {
    pub fn new(categories: Vec<Category>, resources: Vec<Resource>) -> Self {
        let by_key = resources
            .iter()
            .enumerate()
            .map(|(idx, resource)| (resource.identity(), idx))
            .collect();
        let category_titles = categories
            .iter()
            .enumerate()
            .map(|(idx, category)| (category.id.clone(), idx))
            .collect();

        debug!(
            categories = categories.len(),
            resources = resources.len(),
            "Resource library seeded"
        );

        Self {
            categories,
            resources,
            by_key,
            category_titles,
            selection: SelectionState::default(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn is_selected(&self, category_id: &str) -> bool {
        self.selection.contains(category_id)
    }

    /// Unknown ids are accepted; they simply match nothing.
    pub fn toggle_category(&mut self, category_id: &str) -> bool {
        let selected = self.selection.toggle(category_id);
        debug!(
            category = category_id,
            selected,
            active = self.selection.len(),
            "Category toggled"
        );
        selected
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn filtered_resources(&self) -> Vec<&Resource> {
        filtered_resources(&self.resources, &self.selection)
    }

    pub fn filtered_keys(&self) -> Vec<ResourceKey> {
        self.filtered_resources()
            .into_iter()
            .map(Resource::identity)
            .collect()
    }

    /// Lookup by identity over the full collection, regardless of filter.
    pub fn resource(&self, key: &str) -> Option<&Resource> {
        self.by_key.get(key).map(|&idx| &self.resources[idx])
    }

    pub fn category_title(&self, category_id: &str) -> Option<&str> {
        self.category_titles
            .get(category_id)
            .map(|&idx| self.categories[idx].title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ResourceLibraryStore {
        let categories = vec![Category::new("a", "Apps"), Category::new("b", "Buttons")];
        let resources = vec![
            Resource::new("1", "One").with_category("a"),
            Resource::new("2", "Two").with_category("b"),
            Resource::new("3", "Three").with_category("a"),
            Resource::new("4", "Four").with_category("b"),
            Resource::new("5", "Five").with_category("a"),
        ];
        ResourceLibraryStore::new(categories, resources)
    }

    fn ids(view: &[&Resource]) -> Vec<String> {
        view.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn empty_selection_shows_everything_in_order() {
        let store = store();
        assert_eq!(ids(&store.filtered_resources()), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn chip_scenario_from_three_and_two() {
        let mut store = store();

        store.toggle_category("a");
        assert_eq!(ids(&store.filtered_resources()), ["1", "3", "5"]);

        store.toggle_category("b");
        assert_eq!(store.filtered_resources().len(), 5);

        store.toggle_category("a");
        assert_eq!(ids(&store.filtered_resources()), ["2", "4"]);
    }

    #[test]
    fn toggle_twice_is_identity() {
        let mut store = store();
        store.toggle_category("b");
        let before = store.selection().clone();

        store.toggle_category("a");
        store.toggle_category("a");
        assert_eq!(store.selection(), &before);
    }

    #[test]
    fn unknown_category_filters_to_nothing() {
        let mut store = store();
        assert!(store.toggle_category("ghost"));
        assert!(store.filtered_resources().is_empty());
        assert!(store.is_selected("ghost"));
    }

    #[test]
    fn uncategorized_never_matches_a_selection() {
        let categories = vec![Category::new("a", "Apps")];
        let resources = vec![
            Resource::new("1", "Loose"),
            Resource::new("2", "Filed").with_category("a"),
        ];
        let mut store = ResourceLibraryStore::new(categories, resources);
        assert_eq!(store.filtered_resources().len(), 2);

        store.toggle_category("a");
        assert_eq!(ids(&store.filtered_resources()), ["2"]);
    }

    #[test]
    fn lookup_ignores_the_filter() {
        let mut store = store();
        store.toggle_category("b");
        assert_eq!(store.resource("1").map(|r| r.name.as_str()), Some("One"));
        assert_eq!(store.category_title("a"), Some("Apps"));
        assert_eq!(store.category_title("zzz"), None);

        store.clear_selection();
        assert!(store.selection().is_empty());
    }
}
