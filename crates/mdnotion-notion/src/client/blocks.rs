//! Block append operations for Notion API.

use mdnotion_blocks::Block;
use serde::de::IgnoredAny;
use tracing::info;

use super::{Method, NotionClient};
use crate::api::BlockAppender;
use crate::error::NotionError;
use crate::types::AppendChildrenRequest;

impl BlockAppender for NotionClient {
    fn append_blocks(&self, page_id: &str, blocks: &[Block]) -> Result<(), NotionError> {
        info!("Appending {} block(s) to page {}", blocks.len(), page_id);

        let request = AppendChildrenRequest { children: blocks };
        let _: IgnoredAny = self.send_json(
            Method::Patch,
            &format!("blocks/{page_id}/children"),
            &request,
        )?;
        Ok(())
    }
}
