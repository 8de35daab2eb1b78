//! Page syncer implementation.

use std::path::{Path, PathBuf};

use mdnotion_blocks::{Conversion, convert};
use tracing::{debug, info, warn};

use crate::api::{BlockAppender, DestinationCreator, DestinationResolver};

use super::SyncConfig;
use super::error::SyncError;
use super::result::{DocumentOutcome, DryRunResult, SyncResult};

/// Words of the title used to search for a parent page.
const SEARCH_WORDS: usize = 2;

/// Handles publishing markdown documents as Notion pages.
pub struct PageSyncer<'a, C> {
    client: &'a C,
    config: SyncConfig,
}

impl<'a, C> PageSyncer<'a, C>
where
    C: DestinationResolver + DestinationCreator + BlockAppender,
{
    /// Create a new page syncer.
    #[must_use]
    pub fn new(client: &'a C, config: SyncConfig) -> Self {
        Self { client, config }
    }

    /// Publish markdown content as a new page titled `title`.
    ///
    /// This method:
    /// 1. Converts markdown to Notion blocks
    /// 2. Resolves the parent page (argument, then config, then title search)
    /// 3. Creates the page
    /// 4. Appends blocks in batches, each only after the previous succeeded
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no parent page is given and the search finds none
    /// - Notion API calls fail
    pub fn sync(
        &self,
        title: &str,
        markdown_text: &str,
        parent_id: Option<&str>,
    ) -> Result<SyncResult, SyncError> {
        let Conversion {
            document,
            diagnostics,
        } = self.convert(markdown_text);
        for diagnostic in &diagnostics {
            warn!("{}: {}", title, diagnostic);
        }

        let parent_id = self.resolve_parent(title, parent_id)?;
        let page_id = self.client.create_page(&parent_id, title)?;

        let total = document.len();
        let mut uploaded = 0;
        let mut chunk_count = 0;
        for chunk in document.chunks(self.config.batch_size) {
            info!(
                "Uploading blocks {}-{} of {}",
                uploaded + 1,
                uploaded + chunk.len(),
                total
            );
            self.client
                .append_blocks(&page_id, chunk)
                .map_err(|source| SyncError::Upload {
                    page_id: page_id.clone(),
                    uploaded,
                    total,
                    source,
                })?;
            uploaded += chunk.len();
            chunk_count += 1;
        }

        info!("Uploaded {} blocks to page {}", total, page_id);
        Ok(SyncResult {
            url: page_url(&page_id),
            page_id,
            title: title.to_owned(),
            block_count: total,
            chunk_count,
            diagnostics,
        })
    }

    /// Convert and plan batches without calling the API.
    #[must_use]
    pub fn dry_run(&self, title: &str, markdown_text: &str) -> DryRunResult {
        let Conversion {
            document,
            diagnostics,
        } = self.convert(markdown_text);

        let mut chunks = Vec::new();
        let mut start = 0;
        for chunk in document.chunks(self.config.batch_size) {
            chunks.push(start..start + chunk.len());
            start += chunk.len();
        }

        DryRunResult {
            title: title.to_owned(),
            block_count: document.len(),
            chunks,
            diagnostics,
        }
    }

    /// Publish a markdown file, titled after its file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or syncing fails.
    pub fn sync_file(&self, path: &Path, parent_id: Option<&str>) -> Result<SyncResult, SyncError> {
        let markdown_text = std::fs::read_to_string(path)?;
        let title = title_from_path(path);
        info!("Processing {} as '{}'", path.display(), title);
        self.sync(&title, &markdown_text, parent_id)
    }

    /// Publish several files in order.
    ///
    /// A failure for one file is recorded in its outcome and does not stop
    /// the remaining files.
    pub fn sync_all<P: AsRef<Path>>(
        &self,
        paths: &[P],
        parent_id: Option<&str>,
    ) -> Vec<DocumentOutcome> {
        paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                let result = self.sync_file(path, parent_id);
                if let Err(err) = &result {
                    warn!("Failed to sync {}: {}", path.display(), err);
                }
                DocumentOutcome {
                    path: PathBuf::from(path),
                    result,
                }
            })
            .collect()
    }

    fn convert(&self, markdown_text: &str) -> Conversion {
        convert(markdown_text, &self.config.convert)
    }

    /// Pick the parent page: explicit argument, configured default, or the
    /// first search hit for the title's leading words.
    fn resolve_parent(&self, title: &str, parent_id: Option<&str>) -> Result<String, SyncError> {
        if let Some(id) = parent_id.or(self.config.parent_id.as_deref()) {
            return Ok(id.to_owned());
        }

        let query = search_query(title);
        let found = self.client.search(&query)?;
        let Some(parent) = found.into_iter().next() else {
            return Err(SyncError::NoDestination { query });
        };

        debug!("Using parent page '{}' ({})", parent.title, parent.id);
        Ok(parent.id)
    }
}

/// Page title for a markdown file: its stem with underscores as spaces.
#[must_use]
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace('_', " "))
        .unwrap_or_default()
}

/// Search query for finding a parent page: the first two words of the title.
#[must_use]
pub fn search_query(title: &str) -> String {
    title
        .split_whitespace()
        .take(SEARCH_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Browser URL of a page.
#[must_use]
pub fn page_url(page_id: &str) -> String {
    format!("https://www.notion.so/{}", page_id.replace('-', ""))
}
