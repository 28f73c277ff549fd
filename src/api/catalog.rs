use super::client::StoreClient;
use crate::content::catalog::CatalogSection;
use crate::content::normalize::normalize_catalog;
use crate::core::prelude::*;
use serde_json::Value;

const COLLECTION: &str = "catalog-sections";

impl StoreClient {
    /// All catalog sections, normalized. Records that cannot be repaired are
    /// skipped with a warning.
    pub async fn list_catalogs(&self) -> Result<Vec<CatalogSection>> {
        let items = match self.get(COLLECTION).await? {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => {
                return Err(AppError::Decode(format!(
                    "{} list is not an array: {}",
                    COLLECTION, other
                )))
            }
        };

        Ok(items
            .into_iter()
            .filter_map(|item| match normalize_catalog(item) {
                Ok(section) => Some(section),
                Err(e) => {
                    log::warn!("Skipping unreadable catalog record: {}", e);
                    None
                }
            })
            .collect())
    }

    pub async fn get_catalog(&self, id: &str) -> Result<CatalogSection> {
        let value = self.get(&format!("{}/{}", COLLECTION, id)).await?;
        normalize_catalog(value)
    }

    /// Full-document overwrite; the last writer wins.
    pub async fn save_catalog(&self, id: &str, section: &CatalogSection) -> Result<()> {
        self.put(&format!("{}/{}", COLLECTION, id), section).await?;
        log::info!("Catalog section {} saved", id);
        Ok(())
    }
}
