//! Page syncer for Notion.
//!
//! This module provides the [`PageSyncer`] struct that encapsulates the entire
//! workflow for publishing a markdown file as a new Notion page:
//!
//! 1. Convert markdown to Notion blocks
//! 2. Resolve the parent page (explicit ID or title search)
//! 3. Create the page
//! 4. Append blocks in ordered batches
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mdnotion_notion::{NotionClient, PageSyncer, SyncConfig};
//!
//! let client = NotionClient::new("https://api.notion.com/v1", "2022-06-28", "secret_token");
//! let syncer = PageSyncer::new(&client, SyncConfig::default());
//!
//! // Publish under an explicit parent page
//! let result = syncer.sync("Release Notes", "# Title\n\nContent", Some("parent-page-id"))?;
//! println!("{}", result.url);
//!
//! // Or dry-run to preview the upload plan
//! let dry_run = syncer.dry_run("Release Notes", "# Title\n\nContent");
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod result;

pub use error::SyncError;
pub use executor::{PageSyncer, page_url, search_query, title_from_path};
pub use result::{DocumentOutcome, DryRunResult, SyncResult};

use mdnotion_blocks::ConvertOptions;
use mdnotion_config::{Config, MAX_BATCH_SIZE};

/// Configuration for publishing markdown as Notion pages.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Blocks per append request.
    pub batch_size: usize,
    /// Parent page used when none is passed to [`PageSyncer::sync`].
    pub parent_id: Option<String>,
    /// Markdown conversion options.
    pub convert: ConvertOptions,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_SIZE,
            parent_id: None,
            convert: ConvertOptions::default(),
        }
    }
}

impl SyncConfig {
    /// Build from loaded application configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            batch_size: config.upload.batch_size,
            parent_id: config.notion.parent_id.clone(),
            convert: ConvertOptions {
                preserve_heading_1: config.convert.preserve_heading_1,
                preserve_numbered_lists: config.convert.preserve_numbered_lists,
            },
        }
    }
}
