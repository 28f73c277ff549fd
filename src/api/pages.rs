use super::client::StoreClient;
use crate::content::normalize::normalize_page;
use crate::content::page::StaticPage;
use crate::core::prelude::*;
use serde_json::Value;

const COLLECTION: &str = "static-pages";

impl StoreClient {
    pub async fn list_static_pages(&self) -> Result<Vec<StaticPage>> {
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
            .filter_map(|item| match normalize_page(item) {
                Ok(page) => Some(page),
                Err(e) => {
                    log::warn!("Skipping unreadable static page: {}", e);
                    None
                }
            })
            .collect())
    }

    pub async fn save_static_page(&self, page: &StaticPage) -> Result<()> {
        self.post(&format!("{}/{}", COLLECTION, page.page), page)
            .await?;
        log::info!("Static page {} saved", page.page);
        Ok(())
    }
}
