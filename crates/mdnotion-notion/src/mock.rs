//! In-memory Notion API for testing.
//!
//! Records every boundary call so tests can assert on order and content.

use std::sync::Mutex;

use mdnotion_blocks::Block;

use crate::api::{BlockAppender, Destination, DestinationCreator, DestinationResolver};
use crate::error::NotionError;

/// A recorded boundary call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Search { query: String },
    Create { parent_id: String, title: String },
    Append { page_id: String, count: usize },
}

/// Mock Notion API.
///
/// Created pages get sequential IDs `page-1`, `page-2`, ...
#[derive(Debug, Default)]
pub(crate) struct MockNotion {
    search_results: Vec<Destination>,
    fail_append_after: Option<usize>,
    calls: Mutex<Vec<Call>>,
    appended: Mutex<Vec<Block>>,
    pages_created: Mutex<usize>,
}

impl MockNotion {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Return this page from every search.
    pub(crate) fn with_search_result(mut self, id: &str, title: &str) -> Self {
        self.search_results.push(Destination {
            id: id.to_owned(),
            title: title.to_owned(),
        });
        self
    }

    /// Let `successes` append calls succeed, then fail with HTTP 400.
    pub(crate) fn fail_append_after(mut self, successes: usize) -> Self {
        self.fail_append_after = Some(successes);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Every block appended so far, across all pages.
    pub(crate) fn appended(&self) -> Vec<Block> {
        self.appended.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn append_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, Call::Append { .. }))
            .count()
    }
}

impl DestinationResolver for MockNotion {
    fn search(&self, query: &str) -> Result<Vec<Destination>, NotionError> {
        self.record(Call::Search {
            query: query.to_owned(),
        });
        Ok(self.search_results.clone())
    }
}

impl DestinationCreator for MockNotion {
    fn create_page(&self, parent_id: &str, title: &str) -> Result<String, NotionError> {
        self.record(Call::Create {
            parent_id: parent_id.to_owned(),
            title: title.to_owned(),
        });
        let mut created = self.pages_created.lock().unwrap();
        *created += 1;
        Ok(format!("page-{created}"))
    }
}

impl BlockAppender for MockNotion {
    fn append_blocks(&self, page_id: &str, blocks: &[Block]) -> Result<(), NotionError> {
        let previous = self.append_count();
        self.record(Call::Append {
            page_id: page_id.to_owned(),
            count: blocks.len(),
        });
        if self.fail_append_after.is_some_and(|limit| previous >= limit) {
            return Err(NotionError::HttpResponse {
                status: 400,
                body: r#"{"object":"error","code":"validation_error"}"#.to_owned(),
            });
        }
        self.appended.lock().unwrap().extend_from_slice(blocks);
        Ok(())
    }
}
