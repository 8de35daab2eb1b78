//! Block and rich text value types.

use crate::table::Table;

/// Independent style flags of a text run.
///
/// Color is not modelled; runs are always serialized with the default color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

impl TextStyle {
    /// Style with only `bold` set.
    #[must_use]
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    /// Style with only `code` set.
    #[must_use]
    pub fn code() -> Self {
        Self {
            code: true,
            ..Self::default()
        }
    }

    /// Whether every flag is unset.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A contiguous span of text sharing one style and link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub content: String,
    pub style: TextStyle,
    pub link: Option<String>,
}

impl TextRun {
    /// Unstyled run without a link.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: TextStyle::default(),
            link: None,
        }
    }

    /// Run with the given style and no link.
    pub fn styled(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            style,
            link: None,
        }
    }

    /// Unstyled run pointing at `url`.
    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: TextStyle::default(),
            link: Some(url.into()),
        }
    }

    /// Whether adjacent text may be merged into this run.
    pub(crate) fn is_mergeable(&self) -> bool {
        self.link.is_none() && self.style.is_plain()
    }
}

/// Ordered sequence of text runs, in render order.
pub type RichText = Vec<TextRun>;

/// One structural unit of a Notion page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading. Level 1 only appears when explicitly preserved.
    Heading { level: u8, text: RichText },
    Paragraph { text: RichText },
    BulletItem { text: RichText },
    /// Numbered list item; only produced when numbered lists are preserved.
    NumberedItem { text: RichText },
    /// Fenced code, kept verbatim.
    CodeBlock { language: String, text: String },
    Table(Table),
}

impl Block {
    /// Notion block type name (`heading_2`, `paragraph`, ...).
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Heading { level: 1, .. } => "heading_1",
            Self::Heading { level: 2, .. } => "heading_2",
            Self::Heading { .. } => "heading_3",
            Self::Paragraph { .. } => "paragraph",
            Self::BulletItem { .. } => "bulleted_list_item",
            Self::NumberedItem { .. } => "numbered_list_item",
            Self::CodeBlock { .. } => "code",
            Self::Table(_) => "table",
        }
    }
}

/// Converted Markdown document.
///
/// Immutable once built; produced by [`convert`](crate::convert).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub(crate) fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Split blocks into consecutive batches of at most `size` blocks.
    ///
    /// A zero `size` is treated as one.
    pub fn chunks(&self, size: usize) -> std::slice::Chunks<'_, Block> {
        self.blocks.chunks(size.max(1))
    }
}
