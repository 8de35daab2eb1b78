//! Markdown to Notion block conversion.
//!
//! Converts Markdown source into a flat sequence of [`Block`] values that map
//! one-to-one onto Notion API block objects.
//!
//! # Architecture
//!
//! Conversion runs in a single pass over the document lines:
//! - [`convert`] classifies lines into blocks (headings, list items, code
//!   fences, tables, paragraphs)
//! - [`parse_table`] turns a run of pipe-delimited lines into a [`Table`]
//! - [`parse_inline`] turns one line of text into styled [`TextRun`]s
//!
//! The [`wire`] module serializes blocks into the JSON shape expected by the
//! `blocks/{id}/children` endpoint.
//!
//! Recognition is best-effort: unmatched delimiters degrade to literal text,
//! malformed table rows are dropped and unterminated code fences run to the
//! end of the document. Nothing in this crate fails on input text.
//!
//! # Example
//!
//! ```
//! use mdnotion_blocks::{Block, segment};
//!
//! let document = segment("# Title\n\nSome **bold** text");
//! assert_eq!(document.len(), 2);
//! assert!(matches!(document.blocks()[0], Block::Heading { level: 2, .. }));
//! ```

mod block;
mod inline;
mod segment;
mod table;
pub mod wire;

pub use block::{Block, Document, RichText, TextRun, TextStyle};
pub use inline::parse_inline;
pub use segment::{ConvertOptions, Conversion, Diagnostic, DiagnosticKind, convert, segment};
pub use table::{Table, TableError, parse_table};
