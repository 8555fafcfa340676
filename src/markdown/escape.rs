//! Markdown escaping utilities.
//!
//! These functions handle escaping special Markdown characters and calculating
//! appropriate fence/tick lengths for code blocks and inline code.

use std::borrow::Cow;

/// Escape special Markdown characters in text.
///
/// Escapes characters that have special meaning in Markdown:
/// - Backslash: `\\`
/// - Emphasis: `*`, `_`
/// - Links: `[`, `]`
/// - Code: `` ` ``
/// - Headings: `#` (only at line start)
/// - Tables: `|`
/// - HTML: `<`, `>`
/// - Images: `!` (when followed by `[`)
///
/// # Examples
/// ```
/// use folio::markdown::escape::escape_markdown;
///
/// assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
/// assert_eq!(escape_markdown("[link]"), "\\[link\\]");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);
    let mut chars = text.chars().peekable();
    let mut at_line_start = true;

    while let Some(c) = chars.next() {
        match c {
            '\\' | '*' | '_' | '[' | ']' | '`' | '|' | '<' | '>' => {
                result.push('\\');
                result.push(c);
            }
            '#' if at_line_start => result.push_str("\\#"),
            '!' if chars.peek() == Some(&'[') => result.push_str("\\!"),
            _ => result.push(c),
        }
        at_line_start = c == '\n';
    }

    result
}

/// Escapes text that would otherwise start a list item or block quote
/// when placed at the beginning of a line (`1986. `, `- `, `+ `, `> `).
///
/// # Examples
/// ```
/// use folio::markdown::escape::escape_line_start;
///
/// assert_eq!(escape_line_start("1986. A year"), "1986\\. A year");
/// assert_eq!(escape_line_start("- dash"), "\\- dash");
/// assert_eq!(escape_line_start("plain"), "plain");
/// ```
pub fn escape_line_start(text: &str) -> Cow<'_, str> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();

    if digits > 0 && matches!(text.as_bytes().get(digits), Some(b'.' | b')')) {
        Cow::Owned(format!("{}\\{}", &text[..digits], &text[digits..]))
    } else if text.starts_with(['-', '+', '=']) {
        Cow::Owned(format!("\\{text}"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Escapes a value placed inside a double-quoted HTML attribute.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape_html(value, true)
}

/// Escapes HTML text content (`&`, `<`, `>`).
pub fn escape_text(value: &str) -> Cow<'_, str> {
    escape_html(value, false)
}

fn escape_html(value: &str, quotes: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (quotes && c == '"');
    if !value.contains(needs_escape) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if quotes => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Calculate the minimum fence length needed for a code block.
///
/// Returns the smallest number of fence characters (at least 3) that
/// doesn't appear as a run in the content.
///
/// # Examples
/// ```
/// use folio::markdown::escape::calculate_fence_length;
///
/// assert_eq!(calculate_fence_length("let x = 1;", '`'), 3);
/// assert_eq!(calculate_fence_length("```rust\ncode\n```", '`'), 4);
/// ```
pub fn calculate_fence_length(content: &str, fence_char: char) -> usize {
    longest_run(content, fence_char).max(2) + 1
}

/// Calculate the minimum backtick count needed for inline code.
///
/// Returns the smallest number of backticks (at least 1) that doesn't
/// appear as a run in the content.
pub fn calculate_inline_code_ticks(content: &str) -> usize {
    longest_run(content, '`') + 1
}

fn longest_run(content: &str, target: char) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == target {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }
    max_run
}
