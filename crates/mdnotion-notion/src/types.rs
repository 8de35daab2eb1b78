//! Notion API request and response types.
//!
//! Responses only include fields that are actually used.
//! Serde ignores unknown fields from the API response.

use mdnotion_blocks::Block;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `POST /search` request.
#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub query: &'a str,
    pub filter: SearchFilter,
}

/// Restricts search results to one object type.
#[derive(Debug, Serialize)]
pub(crate) struct SearchFilter {
    pub property: &'static str,
    pub value: &'static str,
}

impl SearchFilter {
    pub(crate) fn pages() -> Self {
        Self {
            property: "object",
            value: "page",
        }
    }
}

/// `POST /search` response.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub results: Vec<PageObject>,
}

/// Page object as returned by search and page creation.
#[derive(Debug, Deserialize)]
pub(crate) struct PageObject {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl PageObject {
    /// Plain text of the page's title property.
    ///
    /// The title property name varies (`title`, `Name`, ...), so it is found
    /// by type rather than by key.
    pub(crate) fn title(&self) -> String {
        self.properties
            .values()
            .find(|prop| prop.get("type").and_then(Value::as_str) == Some("title"))
            .and_then(|prop| prop.get("title"))
            .and_then(Value::as_array)
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part.get("plain_text").and_then(Value::as_str))
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// `POST /pages` request.
#[derive(Debug, Serialize)]
pub(crate) struct CreatePageRequest<'a> {
    pub parent: PageParent<'a>,
    pub properties: TitleProperties<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PageParent<'a> {
    pub page_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TitleProperties<'a> {
    pub title: [TitleText<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(crate) struct TitleText<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: TitleContent<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TitleContent<'a> {
    pub content: &'a str,
}

impl<'a> CreatePageRequest<'a> {
    pub(crate) fn new(parent_id: &'a str, title: &'a str) -> Self {
        Self {
            parent: PageParent { page_id: parent_id },
            properties: TitleProperties {
                title: [TitleText {
                    kind: "text",
                    text: TitleContent { content: title },
                }],
            },
        }
    }
}

/// `PATCH /blocks/{id}/children` request.
#[derive(Debug, Serialize)]
pub(crate) struct AppendChildrenRequest<'a> {
    pub children: &'a [Block],
}
