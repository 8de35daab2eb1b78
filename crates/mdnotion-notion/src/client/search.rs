//! Page search for Notion API.

use tracing::info;

use super::{Method, NotionClient};
use crate::api::{Destination, DestinationResolver};
use crate::error::NotionError;
use crate::types::{SearchFilter, SearchRequest, SearchResponse};

impl DestinationResolver for NotionClient {
    fn search(&self, query: &str) -> Result<Vec<Destination>, NotionError> {
        info!("Searching pages for '{}'", query);

        let request = SearchRequest {
            query,
            filter: SearchFilter::pages(),
        };
        let response: SearchResponse = self.send_json(Method::Post, "search", &request)?;

        info!("Found {} page(s) for '{}'", response.results.len(), query);
        Ok(response
            .results
            .into_iter()
            .map(|page| Destination {
                title: page.title(),
                id: page.id,
            })
            .collect())
    }
}
