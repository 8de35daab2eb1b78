//! Line-oriented block segmentation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, Document};
use crate::inline::parse_inline;
use crate::table::{TableError, parse_table};

const FENCE: &str = "```";
const DEFAULT_LANGUAGE: &str = "plain text";

static NUMBERED_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s").unwrap());

/// Options that widen the produced block vocabulary.
///
/// With the defaults, `#` headings become level 2 and numbered items become
/// bullets, matching the block types every Notion integration accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Keep `# ` headings at level 1 instead of downgrading them to level 2.
    pub preserve_heading_1: bool,
    /// Emit [`Block::NumberedItem`] for `1. ` lines instead of bullets.
    pub preserve_numbered_lists: bool,
}

/// Result of converting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub document: Document,
    /// Lossy spots noticed during conversion. Never affects `document`.
    pub diagnostics: Vec<Diagnostic>,
}

/// Something the converter recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line where the affected construct starts.
    pub line: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Pipe lines whose header had no cells; nothing was emitted for them.
    EmptyTableHeader,
    /// Table rows dropped because their cell count did not match the header.
    DroppedTableRows { count: usize },
    /// Code fence never closed; it runs to the end of the document.
    UnterminatedCodeFence,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::EmptyTableHeader => {
                write!(f, "line {}: table header has no cells, skipped", self.line)
            }
            DiagnosticKind::DroppedTableRows { count } => write!(
                f,
                "line {}: dropped {count} table row(s) with wrong cell count",
                self.line
            ),
            DiagnosticKind::UnterminatedCodeFence => {
                write!(f, "line {}: code fence is never closed", self.line)
            }
        }
    }
}

/// Convert a document with default options.
///
/// # Example
///
/// ```
/// use mdnotion_blocks::{Block, segment};
///
/// let document = segment("```py\ncode\n```");
/// assert_eq!(
///     document.blocks(),
///     &[Block::CodeBlock { language: "py".to_owned(), text: "code".to_owned() }]
/// );
/// ```
#[must_use]
pub fn segment(text: &str) -> Document {
    convert(text, &ConvertOptions::default()).document
}

/// Convert a Markdown document into blocks.
///
/// Lines are classified in priority order: code fence, table, heading,
/// bullet, numbered item, paragraph. Blank lines produce nothing.
#[must_use]
pub fn convert(text: &str, options: &ConvertOptions) -> Conversion {
    let lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut segmenter = Segmenter {
        lines,
        pos: 0,
        options,
        blocks: Vec::new(),
        diagnostics: Vec::new(),
    };
    segmenter.run();

    Conversion {
        document: Document::new(segmenter.blocks),
        diagnostics: segmenter.diagnostics,
    }
}

struct Segmenter<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    options: &'a ConvertOptions,
    blocks: Vec<Block>,
    diagnostics: Vec<Diagnostic>,
}

impl Segmenter<'_> {
    fn run(&mut self) {
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];

            if let Some(language) = line.strip_prefix(FENCE) {
                self.code_block(language);
            } else if self.at_table() {
                self.table();
            } else {
                if let Some(block) = self.line_block(line) {
                    self.blocks.push(block);
                }
                self.pos += 1;
            }
        }
    }

    /// Consume a fenced code block, both fence lines included.
    fn code_block(&mut self, language: &str) {
        let start = self.pos;
        let language = match language.trim() {
            "" => DEFAULT_LANGUAGE,
            tag => tag,
        };

        self.pos += 1;
        let body_start = self.pos;
        while self.pos < self.lines.len() && !self.lines[self.pos].starts_with(FENCE) {
            self.pos += 1;
        }
        let text = self.lines[body_start..self.pos].join("\n");

        if self.pos < self.lines.len() {
            self.pos += 1;
        } else {
            self.diagnose(start, DiagnosticKind::UnterminatedCodeFence);
        }

        self.blocks.push(Block::CodeBlock {
            language: language.to_owned(),
            text,
        });
    }

    /// Current and next line both contain a pipe.
    fn at_table(&self) -> bool {
        self.lines[self.pos].contains('|')
            && self
                .lines
                .get(self.pos + 1)
                .is_some_and(|next| next.contains('|'))
    }

    /// Consume every consecutive pipe line and emit a table if it parses.
    fn table(&mut self) {
        let start = self.pos;
        while self.pos < self.lines.len() && self.lines[self.pos].contains('|') {
            self.pos += 1;
        }
        let lines = &self.lines[start..self.pos];

        match parse_table(lines) {
            Ok(table) => {
                let dropped = lines.len() - 2 - table.data_rows.len();
                if dropped > 0 {
                    self.diagnose(start, DiagnosticKind::DroppedTableRows { count: dropped });
                }
                self.blocks.push(Block::Table(table));
            }
            Err(TableError::EmptyHeader) => self.diagnose(start, DiagnosticKind::EmptyTableHeader),
            // At least two lines are always collected.
            Err(TableError::MissingSeparator) => {}
        }
    }

    /// Classify a single line that is neither a fence nor part of a table.
    fn line_block(&self, line: &str) -> Option<Block> {
        if let Some(rest) = line.strip_prefix("### ") {
            return Some(heading(3, rest));
        }
        if let Some(rest) = line.strip_prefix("## ") {
            return Some(heading(2, rest));
        }
        if let Some(rest) = line.strip_prefix("# ") {
            let level = if self.options.preserve_heading_1 { 1 } else { 2 };
            return Some(heading(level, rest));
        }
        if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            return Some(Block::BulletItem {
                text: parse_inline(rest),
            });
        }
        if let Some(marker) = NUMBERED_ITEM_RE.find(line) {
            let text = parse_inline(&line[marker.end()..]);
            return Some(if self.options.preserve_numbered_lists {
                Block::NumberedItem { text }
            } else {
                Block::BulletItem { text }
            });
        }
        if line.trim().is_empty() {
            return None;
        }
        Some(Block::Paragraph {
            text: parse_inline(line),
        })
    }

    fn diagnose(&mut self, index: usize, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic {
            line: index + 1,
            kind,
        });
    }
}

fn heading(level: u8, text: &str) -> Block {
    Block::Heading {
        level,
        text: parse_inline(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{TextRun, TextStyle};
    use crate::table::Table;
    use pretty_assertions::assert_eq;

    fn plain(text: &str) -> Vec<TextRun> {
        vec![TextRun::plain(text)]
    }

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn test_heading_blank_paragraph() {
        assert_eq!(
            segment("# Title\n\nSome text").blocks(),
            &[
                Block::Heading {
                    level: 2,
                    text: plain("Title")
                },
                Block::Paragraph {
                    text: plain("Some text")
                },
            ]
        );
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(
            segment("## Two\n### Three\n#### Four").blocks(),
            &[
                Block::Heading {
                    level: 2,
                    text: plain("Two")
                },
                Block::Heading {
                    level: 3,
                    text: plain("Three")
                },
                Block::Paragraph {
                    text: plain("#### Four")
                },
            ]
        );
    }

    #[test]
    fn test_heading_without_space_is_paragraph() {
        assert_eq!(
            segment("#hashtag").blocks(),
            &[Block::Paragraph {
                text: plain("#hashtag")
            }]
        );
    }

    #[test]
    fn test_code_fence() {
        assert_eq!(
            segment("```py\ncode\n```").blocks(),
            &[Block::CodeBlock {
                language: "py".to_owned(),
                text: "code".to_owned(),
            }]
        );
    }

    #[test]
    fn test_code_fence_verbatim_and_default_language() {
        let conversion = convert(
            "```\n# not a heading\n**raw** | x\n  indented\n```\nafter",
            &ConvertOptions::default(),
        );
        assert_eq!(
            conversion.document.blocks(),
            &[
                Block::CodeBlock {
                    language: "plain text".to_owned(),
                    text: "# not a heading\n**raw** | x\n  indented".to_owned(),
                },
                Block::Paragraph {
                    text: plain("after")
                },
            ]
        );
        assert!(conversion.diagnostics.is_empty());
    }

    #[test]
    fn test_unterminated_code_fence() {
        let conversion = convert("intro\n```rust\nfn main() {}\nlet x = 1;", &ConvertOptions::default());
        assert_eq!(
            conversion.document.blocks()[1],
            Block::CodeBlock {
                language: "rust".to_owned(),
                text: "fn main() {}\nlet x = 1;".to_owned(),
            }
        );
        assert_eq!(
            conversion.diagnostics,
            vec![Diagnostic {
                line: 2,
                kind: DiagnosticKind::UnterminatedCodeFence
            }]
        );
    }

    #[test]
    fn test_bullets_and_numbered_items() {
        assert_eq!(
            segment("- one\n* two\n3. three\n10.\tten").blocks(),
            &[
                Block::BulletItem { text: plain("one") },
                Block::BulletItem { text: plain("two") },
                Block::BulletItem {
                    text: plain("three")
                },
                Block::BulletItem { text: plain("ten") },
            ]
        );
    }

    #[test]
    fn test_number_without_space_is_paragraph() {
        assert_eq!(
            segment("3.14 is pi").blocks(),
            &[Block::Paragraph {
                text: plain("3.14 is pi")
            }]
        );
    }

    #[test]
    fn test_inline_parsing_in_textual_blocks() {
        assert_eq!(
            segment("- **key**: value").blocks(),
            &[Block::BulletItem {
                text: vec![
                    TextRun::styled("key", TextStyle::bold()),
                    TextRun::plain(": value"),
                ]
            }]
        );
    }

    #[test]
    fn test_table_then_paragraph() {
        let conversion = convert(
            "| a | b |\n|---|---|\n| 1 | 2 |\n| 3 |\nnext",
            &ConvertOptions::default(),
        );
        assert_eq!(
            conversion.document.blocks(),
            &[
                Block::Table(Table {
                    column_count: 2,
                    header_row: cells(&["a", "b"]),
                    data_rows: vec![cells(&["1", "2"])],
                }),
                Block::Paragraph {
                    text: plain("next")
                },
            ]
        );
        assert_eq!(
            conversion.diagnostics,
            vec![Diagnostic {
                line: 1,
                kind: DiagnosticKind::DroppedTableRows { count: 1 }
            }]
        );
    }

    #[test]
    fn test_single_pipe_line_is_paragraph() {
        assert_eq!(
            segment("a | b\n\nc | d").blocks(),
            &[
                Block::Paragraph {
                    text: plain("a | b")
                },
                Block::Paragraph {
                    text: plain("c | d")
                },
            ]
        );
    }

    #[test]
    fn test_empty_table_header_emits_nothing() {
        let conversion = convert("text\n| |\n|-|\n|x|\nend", &ConvertOptions::default());
        assert_eq!(
            conversion.document.blocks(),
            &[
                Block::Paragraph {
                    text: plain("text")
                },
                Block::Paragraph { text: plain("end") },
            ]
        );
        assert_eq!(
            conversion.diagnostics,
            vec![Diagnostic {
                line: 2,
                kind: DiagnosticKind::EmptyTableHeader
            }]
        );
    }

    #[test]
    fn test_pipe_list_items_become_table() {
        // Table detection takes priority over list items.
        let document = segment("- a | b\n- c | d");
        assert!(matches!(document.blocks(), [Block::Table(_)]));
    }

    #[test]
    fn test_blank_and_whitespace_lines_skipped() {
        assert!(segment("\n   \n\t\n").is_empty());
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            segment("## Title\r\nbody\r\n").blocks(),
            &[
                Block::Heading {
                    level: 2,
                    text: plain("Title")
                },
                Block::Paragraph { text: plain("body") },
            ]
        );
    }

    #[test]
    fn test_preserve_options() {
        let options = ConvertOptions {
            preserve_heading_1: true,
            preserve_numbered_lists: true,
        };
        let conversion = convert("# Top\n1. first", &options);
        assert_eq!(
            conversion.document.blocks(),
            &[
                Block::Heading {
                    level: 1,
                    text: plain("Top")
                },
                Block::NumberedItem {
                    text: plain("first")
                },
            ]
        );
    }

    #[test]
    fn test_segment_is_deterministic() {
        let text = "# A\n\n- b\n\n| x | y |\n|---|---|\n| 1 | 2 |\n\n```\nz\n```\n";
        assert_eq!(segment(text), segment(text));
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic {
            line: 4,
            kind: DiagnosticKind::DroppedTableRows { count: 2 },
        };
        assert_eq!(
            diagnostic.to_string(),
            "line 4: dropped 2 table row(s) with wrong cell count"
        );
    }
}
