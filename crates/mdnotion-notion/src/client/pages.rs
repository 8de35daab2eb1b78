//! Page operations for Notion API.

use tracing::info;

use super::{Method, NotionClient};
use crate::api::DestinationCreator;
use crate::error::NotionError;
use crate::types::{CreatePageRequest, PageObject};

impl DestinationCreator for NotionClient {
    fn create_page(&self, parent_id: &str, title: &str) -> Result<String, NotionError> {
        info!("Creating page '{}' under {}", title, parent_id);

        let request = CreatePageRequest::new(parent_id, title);
        let page: PageObject = self.send_json(Method::Post, "pages", &request)?;

        info!("Created page {}", page.id);
        Ok(page.id)
    }
}
