//! Notion integration for mdnotion.
//!
//! Provides the API boundary ([`DestinationResolver`], [`DestinationCreator`],
//! [`BlockAppender`]), a blocking HTTP implementation of it
//! ([`NotionClient`]) and the upload driver ([`PageSyncer`]) that turns
//! Markdown files into new Notion pages.

mod api;
mod client;
mod error;
#[cfg(test)]
mod mock;
mod syncer;
mod types;

pub use api::{BlockAppender, Destination, DestinationCreator, DestinationResolver};
pub use client::NotionClient;
pub use error::NotionError;
pub use syncer::{
    DocumentOutcome, DryRunResult, PageSyncer, SyncConfig, SyncError, SyncResult, page_url,
    search_query, title_from_path,
};
