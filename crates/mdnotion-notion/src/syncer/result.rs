//! Result types for page syncing.

use std::ops::Range;
use std::path::PathBuf;

use mdnotion_blocks::Diagnostic;

use super::SyncError;

/// Result of publishing a document.
#[derive(Debug)]
pub struct SyncResult {
    /// Created page ID.
    pub page_id: String,
    /// Page title.
    pub title: String,
    /// Browser URL of the page.
    pub url: String,
    /// Number of top-level blocks uploaded.
    pub block_count: usize,
    /// Number of append requests made.
    pub chunk_count: usize,
    /// Lossy conversions noticed along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of a dry-run (no API calls made).
#[derive(Debug)]
pub struct DryRunResult {
    /// Page title that would be used.
    pub title: String,
    /// Number of top-level blocks.
    pub block_count: usize,
    /// Block index ranges of each append request.
    pub chunks: Vec<Range<usize>>,
    /// Lossy conversions noticed along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of one document in a batch.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// Markdown file.
    pub path: PathBuf,
    /// Sync result for this file.
    pub result: Result<SyncResult, SyncError>,
}
