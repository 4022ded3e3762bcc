//! Catalog loading and load-time validation.

use std::path::PathBuf;

use ahash::AHashMap;
use thiserror::Error;
use tracing::{info, instrument};

use crate::data::source::ResourceSource;
use crate::model::resource::{Category, Resource, ResourceKey};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two resources resolve to the same routing identity.
    #[error("Resources {first} and {second} share the identity '{key}'")]
    DuplicateIdentity {
        key: ResourceKey,
        first: String,
        second: String,
    },

    #[error("Resource {id} has a blank name")]
    BlankName { id: String },

    #[error("Category {id} has a blank title")]
    BlankCategoryTitle { id: String },

    #[error("Data source error: {0}")]
    Source(String),
}

/// Validated category and resource collections.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub resources: Vec<Resource>,
}

impl Catalog {
    /// Fetch both collections concurrently, then validate.
    #[instrument(level = "info", skip_all, fields(source = %source.describe()))]
    pub async fn load(source: &dyn ResourceSource) -> Result<Self, CatalogError> {
        let (categories, resources) =
            futures::try_join!(source.categories(), source.resources())?;
        let catalog = Self::new(categories, resources)?;
        info!(
            marker = "CATALOG_LOADED",
            categories = catalog.categories.len(),
            resources = catalog.resources.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    pub fn new(categories: Vec<Category>, resources: Vec<Resource>) -> Result<Self, CatalogError> {
        validate(&categories, &resources)?;
        Ok(Self {
            categories,
            resources,
        })
    }
}

fn validate(categories: &[Category], resources: &[Resource]) -> Result<(), CatalogError> {
    if let Some(category) = categories.iter().find(|c| c.title.trim().is_empty()) {
        return Err(CatalogError::BlankCategoryTitle {
            id: category.id.to_string(),
        });
    }

    let mut seen: AHashMap<ResourceKey, &Resource> = AHashMap::with_capacity(resources.len());
    for resource in resources {
        if resource.name.trim().is_empty() {
            return Err(CatalogError::BlankName {
                id: resource.id.to_string(),
            });
        }

        let key = resource.identity();
        if let Some(first) = seen.get(&key) {
            return Err(CatalogError::DuplicateIdentity {
                key,
                first: first.id.to_string(),
                second: resource.id.to_string(),
            });
        }
        seen.insert(key, resource);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::StaticSource;

    #[tokio::test]
    async fn load_orders_categories_and_keeps_resources() {
        let source = StaticSource::new(
            vec![Category::new("b", "Buttons"), Category::new("a", "Apps")],
            vec![Resource::new("2", "Two"), Resource::new("1", "One")],
        );
        let catalog = Catalog::load(&source).await.unwrap();

        assert_eq!(catalog.categories[0].title, "Apps");
        assert_eq!(catalog.resources[0].name, "Two");
    }

    #[test]
    fn slug_colliding_with_id_is_rejected() {
        let err = Catalog::new(
            Vec::new(),
            vec![
                Resource::new("hero", "Hero"),
                Resource::new("x1", "Other").with_slug("hero"),
            ],
        )
        .unwrap_err();

        match err {
            CatalogError::DuplicateIdentity { key, first, second } => {
                assert_eq!(key.as_str(), "hero");
                assert_eq!((first.as_str(), second.as_str()), ("hero", "x1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(matches!(
            Catalog::new(Vec::new(), vec![Resource::new("1", "  ")]),
            Err(CatalogError::BlankName { .. })
        ));
        assert!(matches!(
            Catalog::new(vec![Category::new("c", "")], Vec::new()),
            Err(CatalogError::BlankCategoryTitle { .. })
        ));
    }
}
