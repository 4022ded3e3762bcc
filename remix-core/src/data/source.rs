//! Read-only query boundary for catalog data.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs as TokioFs;
use tracing::{debug, instrument};

use crate::data::catalog::CatalogError;
use crate::model::resource::{Category, Resource, identity_of};

/// The three queries the library needs from its data backend.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// All categories, ordered by title.
    async fn categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// All resources in stable rank order.
    async fn resources(&self) -> Result<Vec<Resource>, CatalogError>;

    /// One resource whose slug or id equals `identity`.
    async fn resource_by_identity(&self, identity: &str) -> Result<Option<Resource>, CatalogError>;

    fn describe(&self) -> String;
}

/// On-disk dataset layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Dataset {
    fn sorted_categories(mut self) -> Vec<Category> {
        self.categories
            .sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        self.categories
    }

    /// Match on the routing identity (trimmed slug, blank slugs ignored) or
    /// on the raw id.
    fn find(self, identity: &str) -> Option<Resource> {
        self.resources.into_iter().find(|resource| {
            identity_of(resource).as_str() == identity || resource.id == identity
        })
    }
}

/// Dataset exported from the CMS as a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    async fn read(&self) -> Result<Dataset, CatalogError> {
        let text = TokioFs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;
        let dataset: Dataset =
            serde_json::from_str(&text).map_err(|source| CatalogError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            categories = dataset.categories.len(),
            resources = dataset.resources.len(),
            "Dataset read"
        );
        Ok(dataset)
    }
}

#[async_trait]
impl ResourceSource for JsonFileSource {
    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.read().await?.sorted_categories())
    }

    async fn resources(&self) -> Result<Vec<Resource>, CatalogError> {
        Ok(self.read().await?.resources)
    }

    async fn resource_by_identity(&self, identity: &str) -> Result<Option<Resource>, CatalogError> {
        Ok(self.read().await?.find(identity))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process dataset, used for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    dataset: Dataset,
}

impl StaticSource {
    pub fn new(categories: Vec<Category>, resources: Vec<Resource>) -> Self {
        Self {
            dataset: Dataset {
                categories,
                resources,
            },
        }
    }
}

#[async_trait]
impl ResourceSource for StaticSource {
    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.dataset.clone().sorted_categories())
    }

    async fn resources(&self) -> Result<Vec<Resource>, CatalogError> {
        Ok(self.dataset.resources.clone())
    }

    async fn resource_by_identity(&self, identity: &str) -> Result<Option<Resource>, CatalogError> {
        Ok(self.dataset.clone().find(identity))
    }

    fn describe(&self) -> String {
        "static dataset".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const DATASET: &str = r#"{
        "categories": [
            {"_id": "c2", "title": "Widgets"},
            {"_id": "c1", "title": "Icons"}
        ],
        "resources": [
            {"_id": "r2", "name": "Newest", "slug": "newest", "categoryRef": "c2", "tags": [{"_id": "t1", "title": "Dark"}]},
            {"_id": "r1", "name": "Oldest", "slug": null, "figmaCode": "<meta charset=\"utf-8\">"}
        ]
    }"#;

    fn dataset_file() -> NamedTempFile {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), DATASET).unwrap();
        file
    }

    #[tokio::test]
    async fn categories_are_ordered_by_title() {
        let file = dataset_file();
        let source = JsonFileSource::new(file.path());

        let titles: Vec<String> = source
            .categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, ["Icons", "Widgets"]);
    }

    #[tokio::test]
    async fn resources_keep_file_order() {
        let file = dataset_file();
        let source = JsonFileSource::new(file.path());

        let resources = source.resources().await.unwrap();
        assert_eq!(resources[0].name, "Newest");
        assert_eq!(resources[0].tags[0].title, "Dark");
        assert!(resources[1].can_remix());
    }

    #[tokio::test]
    async fn lookup_matches_slug_or_id() {
        let file = dataset_file();
        let source = JsonFileSource::new(file.path());

        assert!(source.resource_by_identity("newest").await.unwrap().is_some());
        assert!(source.resource_by_identity("r2").await.unwrap().is_some());
        assert!(source.resource_by_identity("r1").await.unwrap().is_some());
        assert!(source.resource_by_identity("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lookup_uses_trimmed_slug() {
        let source = StaticSource::new(
            Vec::new(),
            vec![
                Resource::new("r1", "Hero").with_slug(" hero "),
                Resource::new("r2", "Blank slug").with_slug("   "),
            ],
        );

        let hero = source.resource_by_identity("hero").await.unwrap();
        assert_eq!(hero.map(|r| r.id.to_string()).as_deref(), Some("r1"));
        assert!(source.resource_by_identity("   ").await.unwrap().is_none());
        assert!(source.resource_by_identity("r2").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unreadable_and_malformed_files_error() {
        let missing = JsonFileSource::new("/definitely/not/here.json");
        assert!(matches!(
            missing.resources().await,
            Err(CatalogError::Io { .. })
        ));

        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{ not json").unwrap();
        let broken = JsonFileSource::new(file.path());
        assert!(matches!(
            broken.categories().await,
            Err(CatalogError::Parse { .. })
        ));
    }
}
