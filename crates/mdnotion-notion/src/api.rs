//! Notion API boundary.
//!
//! The upload driver only talks to Notion through these traits, so it can be
//! exercised against an in-memory implementation.

use mdnotion_blocks::Block;

use crate::error::NotionError;

/// Candidate page returned by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Page ID.
    pub id: String,
    /// Plain-text page title (empty if untitled).
    pub title: String,
}

/// Finds existing pages by text query.
pub trait DestinationResolver {
    /// Search pages matching `query`, best match first.
    fn search(&self, query: &str) -> Result<Vec<Destination>, NotionError>;
}

/// Creates child pages.
pub trait DestinationCreator {
    /// Create a page titled `title` under `parent_id` and return its ID.
    fn create_page(&self, parent_id: &str, title: &str) -> Result<String, NotionError>;
}

/// Appends blocks to a page.
pub trait BlockAppender {
    /// Append `blocks` to the end of `page_id`, in order.
    fn append_blocks(&self, page_id: &str, blocks: &[Block]) -> Result<(), NotionError>;
}
