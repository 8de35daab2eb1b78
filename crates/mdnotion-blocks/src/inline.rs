//! Inline span parsing.
//!
//! Turns one line of Markdown into styled text runs. Recognizes `**bold**`,
//! `` `code` `` and `[text](url)`; styles do not nest.

use crate::block::{RichText, TextRun, TextStyle};

const BOLD: &str = "**";

/// Parse a single line of inline Markdown into rich text.
///
/// At each position bold, inline code and links are tried in that order.
/// Anything unmatched is literal text; adjacent plain runs are merged.
/// Never fails and never returns an empty sequence: empty input yields one
/// run with empty content.
///
/// # Example
///
/// ```
/// use mdnotion_blocks::{TextRun, TextStyle, parse_inline};
///
/// let runs = parse_inline("a `code` b");
/// assert_eq!(
///     runs,
///     vec![
///         TextRun::plain("a "),
///         TextRun::styled("code", TextStyle::code()),
///         TextRun::plain(" b"),
///     ]
/// );
/// ```
#[must_use]
pub fn parse_inline(text: &str) -> RichText {
    let mut runs = RichText::new();
    let mut pos = 0;

    while pos < text.len() {
        if let Some((run, next)) = bold_at(text, pos)
            .or_else(|| code_at(text, pos))
            .or_else(|| link_at(text, pos))
        {
            runs.push(run);
            pos = next;
            continue;
        }

        let marker = next_marker(text, pos);
        if marker == pos {
            // Marker without a valid closing: take one character literally.
            let width = text[pos..].chars().next().map_or(1, char::len_utf8);
            push_plain(&mut runs, &text[pos..pos + width]);
            pos += width;
        } else {
            push_plain(&mut runs, &text[pos..marker]);
            pos = marker;
        }
    }

    if runs.is_empty() {
        runs.push(TextRun::plain(text));
    }
    runs
}

/// `**content**` starting at `pos`.
fn bold_at(text: &str, pos: usize) -> Option<(TextRun, usize)> {
    if !text[pos..].starts_with(BOLD) {
        return None;
    }
    let start = pos + BOLD.len();
    let end = start + text[start..].find(BOLD)?;
    Some((
        TextRun::styled(&text[start..end], TextStyle::bold()),
        end + BOLD.len(),
    ))
}

/// `` `content` `` starting at `pos`, rejecting doubled backticks on either side.
fn code_at(text: &str, pos: usize) -> Option<(TextRun, usize)> {
    let bytes = text.as_bytes();
    if bytes[pos] != b'`' || (pos > 0 && bytes[pos - 1] == b'`') {
        return None;
    }
    let start = pos + 1;
    let end = start + text[start..].find('`')?;
    if bytes.get(end + 1) == Some(&b'`') {
        return None;
    }
    Some((
        TextRun::styled(&text[start..end], TextStyle::code()),
        end + 1,
    ))
}

/// `[content](url)` starting at `pos`.
fn link_at(text: &str, pos: usize) -> Option<(TextRun, usize)> {
    let bytes = text.as_bytes();
    if bytes[pos] != b'[' {
        return None;
    }
    let close_bracket = pos + text[pos..].find(']')?;
    if bytes.get(close_bracket + 1) != Some(&b'(') {
        return None;
    }
    let url_start = close_bracket + 2;
    let close_paren = url_start + text[url_start..].find(')')?;
    Some((
        TextRun::link(&text[pos + 1..close_bracket], &text[url_start..close_paren]),
        close_paren + 1,
    ))
}

/// Byte offset of the nearest opening marker at or after `pos`.
fn next_marker(text: &str, pos: usize) -> usize {
    let rest = &text[pos..];
    [rest.find(BOLD), rest.find('`'), rest.find('[')]
        .into_iter()
        .flatten()
        .min()
        .map_or(text.len(), |offset| pos + offset)
}

fn push_plain(runs: &mut RichText, content: &str) {
    match runs.last_mut() {
        Some(last) if last.is_mergeable() => last.content.push_str(content),
        _ => runs.push(TextRun::plain(content)),
    }
}
