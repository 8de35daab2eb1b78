//! Notion API JSON representation of blocks.
//!
//! Every block serializes as `{"object": "block", "type": T, T: {...}}`.
//! Rich text runs become `text` objects with the five annotation flags and
//! the default color.
//!
//! # Example
//!
//! ```
//! use mdnotion_blocks::segment;
//!
//! let document = segment("## Hi");
//! let json = serde_json::to_value(&document.blocks()[0]).unwrap();
//! assert_eq!(json["type"], "heading_2");
//! assert_eq!(json["heading_2"]["rich_text"][0]["text"]["content"], "Hi");
//! ```

use serde::{Serialize, Serializer};

use crate::block::{Block, TextRun, TextStyle};
use crate::table::Table;

/// Maximum characters Notion accepts in a single text object.
pub const MAX_TEXT_LENGTH: usize = 2000;

/// Language used for fences with no tag or a tag Notion does not know.
const PLAIN_TEXT: &str = "plain text";

/// Code languages accepted by the Notion API.
const LANGUAGES: &[&str] = &[
    "abap", "arduino", "bash", "basic", "c", "clojure", "coffeescript", "c++", "c#", "css",
    "dart", "diff", "docker", "elixir", "elm", "erlang", "flow", "fortran", "f#", "gherkin",
    "glsl", "go", "graphql", "groovy", "haskell", "html", "java", "javascript", "json", "julia",
    "kotlin", "latex", "less", "lisp", "livescript", "lua", "makefile", "markdown", "markup",
    "matlab", "mermaid", "nix", "objective-c", "ocaml", "pascal", "perl", "php", "plain text",
    "powershell", "prolog", "protobuf", "python", "r", "reason", "ruby", "rust", "sass",
    "scala", "scheme", "scss", "shell", "sql", "swift", "typescript", "vb.net", "verilog",
    "vhdl", "visual basic", "webassembly", "xml", "yaml",
];

/// Map a fence info string onto a Notion code language.
///
/// Common short aliases are expanded; unknown languages fall back to
/// `plain text` since the API rejects them.
#[must_use]
pub fn notion_language(tag: &str) -> &'static str {
    let tag = tag.trim().to_lowercase();
    let canonical = match tag.as_str() {
        "py" | "python3" => "python",
        "js" | "jsx" | "mjs" => "javascript",
        "ts" | "tsx" => "typescript",
        "sh" | "zsh" | "console" => "shell",
        "rs" => "rust",
        "yml" => "yaml",
        "cpp" | "cxx" | "hpp" => "c++",
        "cs" | "csharp" => "c#",
        "fs" | "fsharp" => "f#",
        "dockerfile" => "docker",
        "md" => "markdown",
        "golang" => "go",
        "rb" => "ruby",
        "kt" | "kts" => "kotlin",
        "ps1" | "pwsh" => "powershell",
        "proto" => "protobuf",
        "objc" => "objective-c",
        "make" => "makefile",
        other => other,
    };
    LANGUAGES
        .iter()
        .find(|lang| **lang == canonical)
        .copied()
        .unwrap_or(PLAIN_TEXT)
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireBlock::from_block(self).serialize(serializer)
    }
}

#[derive(Serialize)]
struct WireBlock<'a> {
    object: &'static str,
    #[serde(rename = "type")]
    block_type: &'static str,
    #[serde(flatten)]
    body: Body<'a>,
}

#[derive(Serialize)]
enum Body<'a> {
    #[serde(rename = "heading_1")]
    Heading1(TextBody<'a>),
    #[serde(rename = "heading_2")]
    Heading2(TextBody<'a>),
    #[serde(rename = "heading_3")]
    Heading3(TextBody<'a>),
    #[serde(rename = "paragraph")]
    Paragraph(TextBody<'a>),
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem(TextBody<'a>),
    #[serde(rename = "numbered_list_item")]
    NumberedListItem(TextBody<'a>),
    #[serde(rename = "code")]
    Code(CodeBody<'a>),
    #[serde(rename = "table")]
    Table(TableBody<'a>),
    #[serde(rename = "table_row")]
    TableRow(TableRowBody<'a>),
}

#[derive(Serialize)]
struct TextBody<'a> {
    rich_text: Vec<WireText<'a>>,
}

#[derive(Serialize)]
struct CodeBody<'a> {
    rich_text: Vec<WireText<'a>>,
    language: &'static str,
}

#[derive(Serialize)]
struct TableBody<'a> {
    table_width: usize,
    has_column_header: bool,
    has_row_header: bool,
    children: Vec<WireBlock<'a>>,
}

#[derive(Serialize)]
struct TableRowBody<'a> {
    cells: Vec<Vec<WireText<'a>>>,
}

#[derive(Serialize)]
struct WireText<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextContent<'a>,
    annotations: Annotations,
}

#[derive(Serialize)]
struct TextContent<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<Link<'a>>,
}

#[derive(Serialize)]
struct Link<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct Annotations {
    bold: bool,
    italic: bool,
    strikethrough: bool,
    underline: bool,
    code: bool,
    color: &'static str,
}

impl From<TextStyle> for Annotations {
    fn from(style: TextStyle) -> Self {
        Self {
            bold: style.bold,
            italic: style.italic,
            strikethrough: style.strikethrough,
            underline: style.underline,
            code: style.code,
            color: "default",
        }
    }
}

impl<'a> WireBlock<'a> {
    fn new(block_type: &'static str, body: Body<'a>) -> Self {
        Self {
            object: "block",
            block_type,
            body,
        }
    }

    fn from_block(block: &'a Block) -> Self {
        let body = match block {
            Block::Heading { level: 1, text } => Body::Heading1(text_body(text)),
            Block::Heading { level: 2, text } => Body::Heading2(text_body(text)),
            Block::Heading { text, .. } => Body::Heading3(text_body(text)),
            Block::Paragraph { text } => Body::Paragraph(text_body(text)),
            Block::BulletItem { text } => Body::BulletedListItem(text_body(text)),
            Block::NumberedItem { text } => Body::NumberedListItem(text_body(text)),
            Block::CodeBlock { language, text } => Body::Code(CodeBody {
                rich_text: split_run(text, None, TextStyle::default()),
                language: notion_language(language),
            }),
            Block::Table(table) => Body::Table(table_body(table)),
        };
        Self::new(block.type_name(), body)
    }
}

fn text_body(runs: &[TextRun]) -> TextBody<'_> {
    TextBody {
        rich_text: runs
            .iter()
            .flat_map(|run| split_run(&run.content, run.link.as_deref(), run.style))
            .collect(),
    }
}

fn table_body(table: &Table) -> TableBody<'_> {
    let children = std::iter::once(&table.header_row)
        .chain(&table.data_rows)
        .map(|row| {
            WireBlock::new(
                "table_row",
                Body::TableRow(TableRowBody {
                    cells: row
                        .iter()
                        .map(|cell| split_run(cell, None, TextStyle::default()))
                        .collect(),
                }),
            )
        })
        .collect();

    TableBody {
        table_width: table.column_count,
        has_column_header: true,
        has_row_header: false,
        children,
    }
}

/// One text object per [`MAX_TEXT_LENGTH`] characters of `content`.
///
/// Empty content still yields a single empty text object.
fn split_run<'a>(content: &'a str, link: Option<&'a str>, style: TextStyle) -> Vec<WireText<'a>> {
    let text = |content: &'a str| WireText {
        kind: "text",
        text: TextContent {
            content,
            link: link.map(|url| Link { url }),
        },
        annotations: style.into(),
    };

    let mut pieces = Vec::new();
    let mut rest = content;
    while let Some((offset, _)) = rest.char_indices().nth(MAX_TEXT_LENGTH) {
        let (head, tail) = rest.split_at(offset);
        pieces.push(text(head));
        rest = tail;
    }
    pieces.push(text(rest));
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConvertOptions, convert, segment};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn to_json(block: &Block) -> Value {
        serde_json::to_value(block).unwrap()
    }

    fn plain_annotations() -> Value {
        json!({
            "bold": false,
            "italic": false,
            "strikethrough": false,
            "underline": false,
            "code": false,
            "color": "default"
        })
    }

    #[test]
    fn test_paragraph_with_link() {
        let block = Block::Paragraph {
            text: vec![TextRun::plain("see "), TextRun::link("docs", "https://d.io")],
        };
        assert_eq!(
            to_json(&block),
            json!({
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [
                        {
                            "type": "text",
                            "text": {"content": "see "},
                            "annotations": plain_annotations()
                        },
                        {
                            "type": "text",
                            "text": {"content": "docs", "link": {"url": "https://d.io"}},
                            "annotations": plain_annotations()
                        }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_bold_annotation() {
        let block = Block::BulletItem {
            text: vec![TextRun::styled("b", TextStyle::bold())],
        };
        let json = to_json(&block);
        assert_eq!(json["type"], "bulleted_list_item");
        let annotations = &json["bulleted_list_item"]["rich_text"][0]["annotations"];
        assert_eq!(annotations["bold"], true);
        assert_eq!(annotations["code"], false);
        assert_eq!(annotations["color"], "default");
    }

    #[test]
    fn test_heading_types() {
        let document = segment("# a\n## b\n### c");
        let types: Vec<Value> = document
            .blocks()
            .iter()
            .map(|b| to_json(b)["type"].clone())
            .collect();
        assert_eq!(types, vec![json!("heading_2"), json!("heading_2"), json!("heading_3")]);
    }

    #[test]
    fn test_preserved_heading_1_and_numbered_item() {
        let options = ConvertOptions {
            preserve_heading_1: true,
            preserve_numbered_lists: true,
        };
        let document = convert("# Title\n1. first", &options).document;
        let text = |content: &str| {
            json!([{
                "type": "text",
                "text": {"content": content},
                "annotations": plain_annotations()
            }])
        };

        assert_eq!(
            to_json(&document.blocks()[0]),
            json!({
                "object": "block",
                "type": "heading_1",
                "heading_1": {"rich_text": text("Title")}
            })
        );
        assert_eq!(
            to_json(&document.blocks()[1]),
            json!({
                "object": "block",
                "type": "numbered_list_item",
                "numbered_list_item": {"rich_text": text("first")}
            })
        );
    }

    #[test]
    fn test_code_block() {
        let block = Block::CodeBlock {
            language: "py".to_owned(),
            text: "print(1)\nprint(2)".to_owned(),
        };
        let json = to_json(&block);
        assert_eq!(json["code"]["language"], "python");
        assert_eq!(
            json["code"]["rich_text"][0]["text"]["content"],
            "print(1)\nprint(2)"
        );
    }

    #[test]
    fn test_table_rows_include_header() {
        let block = Block::Table(Table {
            column_count: 2,
            header_row: vec!["a".to_owned(), "b".to_owned()],
            data_rows: vec![vec!["1".to_owned(), "2".to_owned()]],
        });
        let json = to_json(&block);
        assert_eq!(json["type"], "table");
        assert_eq!(json["table"]["table_width"], 2);
        assert_eq!(json["table"]["has_column_header"], true);
        assert_eq!(json["table"]["has_row_header"], false);

        let children = json["table"]["children"].as_array().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0]["type"], "table_row");
        assert_eq!(
            children[0]["table_row"]["cells"][1][0]["text"]["content"],
            "b"
        );
        assert_eq!(
            children[1]["table_row"]["cells"][0][0]["text"]["content"],
            "1"
        );
    }

    #[test]
    fn test_long_text_split() {
        let content = "é".repeat(MAX_TEXT_LENGTH * 2 + 5);
        let block = Block::CodeBlock {
            language: String::new(),
            text: content.clone(),
        };
        let json = to_json(&block);
        let pieces = json["code"]["rich_text"].as_array().unwrap();
        assert_eq!(pieces.len(), 3);

        let joined: String = pieces
            .iter()
            .map(|p| p["text"]["content"].as_str().unwrap())
            .collect();
        assert_eq!(joined, content);
        assert_eq!(
            pieces[0]["text"]["content"].as_str().unwrap().chars().count(),
            MAX_TEXT_LENGTH
        );
    }

    #[test]
    fn test_empty_run_kept() {
        let json = to_json(&Block::Paragraph {
            text: vec![TextRun::plain("")],
        });
        assert_eq!(json["paragraph"]["rich_text"][0]["text"]["content"], "");
    }

    #[test]
    fn test_notion_language() {
        assert_eq!(notion_language("rust"), "rust");
        assert_eq!(notion_language("RS"), "rust");
        assert_eq!(notion_language("yml"), "yaml");
        assert_eq!(notion_language("cpp"), "c++");
        assert_eq!(notion_language("plain text"), "plain text");
        assert_eq!(notion_language("toml"), "plain text");
        assert_eq!(notion_language(""), "plain text");
    }
}
