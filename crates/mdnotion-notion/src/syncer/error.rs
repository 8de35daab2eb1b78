//! Error types for page syncing.

use crate::error::NotionError;

/// Error publishing a single document.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// No parent page given and the title search found nothing.
    #[error("no parent page found for '{query}' (pass a parent page ID)")]
    NoDestination {
        /// Query used for the search.
        query: String,
    },

    /// The page was created but a batch of blocks failed to upload.
    #[error("upload to page {page_id} stopped after {uploaded} of {total} blocks")]
    Upload {
        /// Created page ID.
        page_id: String,
        /// Blocks appended before the failure.
        uploaded: usize,
        /// Total blocks in the document.
        total: usize,
        /// Underlying API error.
        #[source]
        source: NotionError,
    },

    /// Notion API error.
    #[error("Notion API error: {0}")]
    Notion(#[from] NotionError),

    /// I/O error (reading the markdown file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
