//! Markup tree → Markdown rendering.
//!
//! Pure string accumulation: no I/O is performed and nothing outside the
//! [`RenderContext`] is mutated, so each conversion owns its side lists.

use crate::markdown::escape::{
    calculate_fence_length, calculate_inline_code_ticks, escape_line_start, escape_markdown,
};
use crate::markdown::{ConversionSettings, FootnoteRef, ImageRef, tokens};
use crate::markup::{Element, Node};
use crate::util::str::collapse_whitespace;
use std::collections::HashSet;

/// Document metadata; dropped along with its content.
const METADATA_ELEMENTS: &[&str] = &[
    "head", "title", "meta", "link", "script", "style", "template", "noscript", "base",
];

/// Generic containers that may be unwrapped when carrying converter classes.
const GENERIC_CONTAINERS: &[&str] = &["div", "span", "font", "section"];

/// Elements rendered as their own block.
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "blockquote", "pre", "table", "dl",
    "figure", "hr", "div", "section", "article", "aside", "header", "footer", "main", "nav",
    "address", "center",
];

/// Tracks list context for numbering.
#[derive(Debug, Clone)]
struct ListContext {
    /// Whether this is an ordered list.
    is_ordered: bool,
    /// Current item counter.
    counter: usize,
}

/// Context for rendering a single chapter.
pub(super) struct RenderContext<'a> {
    settings: &'a ConversionSettings,
    preserve_ids: Option<&'a HashSet<String>>,
    // Accumulated output
    output: String,
    images: Vec<ImageRef>,
    footnotes: Vec<FootnoteRef>,
    // Formatting state
    line_prefix: String,
    list_stack: Vec<ListContext>,
    at_line_start: bool,
    has_line_content: bool,
    pending_newline: bool,
}

impl<'a> RenderContext<'a> {
    pub(super) fn new(
        settings: &'a ConversionSettings,
        preserve_ids: Option<&'a HashSet<String>>,
    ) -> Self {
        Self {
            settings,
            preserve_ids,
            output: String::new(),
            images: Vec::new(),
            footnotes: Vec::new(),
            line_prefix: String::new(),
            list_stack: Vec::new(),
            at_line_start: true,
            has_line_content: false,
            pending_newline: false,
        }
    }

    /// Consumes the context, returning the raw output and side lists.
    pub(super) fn finish(self) -> (String, Vec<ImageRef>, Vec<FootnoteRef>) {
        (self.output, self.images, self.footnotes)
    }

    pub(super) fn walk_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Text(text) => self.write_text(text),
                Node::Element(el) => self.walk_element(el),
            }
        }
    }

    fn walk_element(&mut self, el: &Element) {
        if self.is_removed(el) {
            return;
        }
        let name = el.local_name().to_ascii_lowercase();

        if name != "li" {
            self.write_anchor_if_preserved(el, BLOCK_ELEMENTS.contains(&name.as_str()));
        }

        // Image rule
        if name == "img" || (name == "image" && el.attr_local("href").is_some()) {
            self.write_image(el);
            return;
        }
        if name == "svg" {
            for image in el.descendants().filter(|el| el.is_local_name("image")) {
                self.write_image(image);
            }
            return;
        }
        // Footnote-reference rule
        if name == "a" && self.is_footnote_ref(el) {
            self.write_footnote(el);
            return;
        }
        // Page-break marker
        if self.is_page_break(el) {
            self.write_rule();
            return;
        }
        // Converter styling wrappers
        if self.is_non_content_wrapper(el, &name) {
            self.walk_nodes(el.children());
            return;
        }

        match name.as_str() {
            "p" | "address" | "center" => self.write_block(el, ""),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = usize::from(name.as_bytes()[1] - b'0');
                self.write_block(el, &"#".repeat(level));
            }
            "ul" | "ol" => self.write_list(el, name == "ol"),
            "li" => self.write_list_item(el),
            "blockquote" => self.write_blockquote(el),
            "pre" => self.write_code_block(el),
            "code" | "kbd" | "samp" | "tt" => self.write_inline_code(el),
            "em" | "i" | "cite" | "dfn" | "var" => self.write_inline(el, "*"),
            "strong" | "b" => self.write_inline(el, "**"),
            "del" | "s" | "strike" => self.write_inline(el, "~~"),
            "a" => self.write_link(el),
            "br" => self.write_hard_break(),
            "hr" => self.write_rule(),
            "table" => self.write_table(el),
            "dl" => {
                self.start_block();
                self.walk_nodes(el.children());
                self.end_block();
            }
            "dt" => {
                self.start_block();
                self.write_inline(el, "**");
                self.pending_newline = false;
                self.write_newline();
            }
            "dd" => {
                if !self.at_line_start {
                    self.write_newline();
                }
                self.ensure_line_started();
                self.output.push_str(": ");
                self.walk_nodes(el.children());
                self.end_block();
            }
            "figcaption" | "caption" => {
                self.start_block();
                self.write_inline(el, "*");
                self.end_block();
            }
            _ if BLOCK_ELEMENTS.contains(&name.as_str()) => {
                self.start_block();
                self.walk_nodes(el.children());
                self.end_block();
            }
            _ => self.walk_nodes(el.children()),
        }
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Rule predicates
    ////////////////////////////////////////////////////////////////////////////////

    /// Document metadata and page-list navigation.
    fn is_removed(&self, el: &Element) -> bool {
        METADATA_ELEMENTS.iter().any(|name| el.is_local_name(name))
            || (el.is_local_name("nav") && el.has_token("epub:type", "page-list"))
            || el.attr("role") == Some("doc-pagelist")
            // Print page-number markers; not a visual break
            || el.has_token("epub:type", "pagebreak")
            || el.attr("role") == Some("doc-pagebreak")
    }

    fn is_footnote_ref(&self, el: &Element) -> bool {
        let Some(href) = el.attr("href").map(str::trim) else {
            return false;
        };

        (href.len() > 1 && href.starts_with('#'))
            || el.has_token("epub:type", "noteref")
            || el.attr("role") == Some("doc-noteref")
            || self
                .settings
                .footnote_markers
                .iter()
                .any(|marker| el.class_contains(marker))
    }

    fn is_page_break(&self, el: &Element) -> bool {
        el.name().eq_ignore_ascii_case("mbp:pagebreak")
            || self
                .settings
                .page_break_classes
                .iter()
                .any(|class| el.has_class(class))
    }

    fn is_non_content_wrapper(&self, el: &Element, name: &str) -> bool {
        GENERIC_CONTAINERS.contains(&name)
            && self
                .settings
                .non_content_markers
                .iter()
                .any(|marker| el.class_contains(marker))
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Custom tokens
    ////////////////////////////////////////////////////////////////////////////////

    /// Emits `<a id>` if the element is a navigation target.
    fn write_anchor_if_preserved(&mut self, el: &Element, block: bool) {
        let Some(id) = el
            .id()
            .filter(|id| self.preserve_ids.is_some_and(|ids| ids.contains(*id)))
        else {
            return;
        };

        if block {
            self.start_block();
            self.ensure_line_started();
            self.output.push_str(&tokens::anchor(id));
            self.write_newline();
        } else {
            self.flush_pending_block();
            self.ensure_line_started();
            self.output.push_str(&tokens::anchor(id));
        }
    }

    fn write_image(&mut self, el: &Element) {
        let non_empty = |value: Option<&str>| value.map(str::to_owned);
        let image = ImageRef {
            href: el
                .attr("src")
                .or_else(|| el.attr_local("href"))
                .unwrap_or_default()
                .trim()
                .to_owned(),
            alt: non_empty(el.attr("alt")),
            title: non_empty(el.attr("title")),
            width: non_empty(el.attr("width")),
            height: non_empty(el.attr("height")),
        };

        self.flush_pending_block();
        self.ensure_line_started();
        self.output.push_str(&tokens::image(&image));
        self.has_line_content = true;
        self.images.push(image);
    }

    fn write_footnote(&mut self, el: &Element) {
        let footnote = FootnoteRef {
            href: el.attr("href").unwrap_or_default().trim().to_owned(),
            id: el.id().map(str::to_owned),
            label: el.normalized_text(),
        };

        self.flush_pending_block();
        self.ensure_line_started();
        self.output.push_str(&tokens::footnote(&footnote));
        self.has_line_content = true;
        self.footnotes.push(footnote);
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Blocks
    ////////////////////////////////////////////////////////////////////////////////

    /// A paragraph-like block with an optional marker (`##`).
    fn write_block(&mut self, el: &Element, marker: &str) {
        self.start_block();
        if !marker.is_empty() {
            self.ensure_line_started();
            self.output.push_str(marker);
            self.output.push(' ');
        }
        self.walk_nodes(el.children());
        self.end_block();
    }

    fn write_list(&mut self, el: &Element, is_ordered: bool) {
        let start = el
            .attr("start")
            .and_then(|start| start.trim().parse::<usize>().ok())
            .unwrap_or(1);

        // A nested list directly follows its parent item's text
        if !self.list_stack.is_empty() && !self.pending_newline {
            if !self.at_line_start {
                self.write_newline();
            }
        } else {
            self.start_block();
        }
        self.list_stack.push(ListContext {
            is_ordered,
            counter: start.saturating_sub(1),
        });
        self.walk_nodes(el.children());
        self.list_stack.pop();
        self.end_block();
    }

    fn write_list_item(&mut self, el: &Element) {
        if !self.at_line_start {
            self.write_newline();
        }
        self.pending_newline = false;
        self.ensure_line_started();

        // Get bullet/number from parent list
        let bullet = match self.list_stack.last_mut() {
            Some(list) => {
                list.counter += 1;
                if list.is_ordered {
                    format!("{}. ", list.counter)
                } else {
                    String::from("- ")
                }
            }
            None => String::from("- "),
        };
        self.output.push_str(&bullet);

        // Set continuation indent for subsequent lines
        let old_prefix = self.line_prefix.clone();
        self.line_prefix.push_str(&" ".repeat(bullet.len()));

        self.write_anchor_if_preserved(el, false);
        self.walk_nodes(el.children());

        self.line_prefix = old_prefix;
        self.pending_newline = false;
        if !self.at_line_start {
            self.write_newline();
        }
    }

    fn write_blockquote(&mut self, el: &Element) {
        self.start_block();

        let old_prefix = self.line_prefix.clone();
        self.line_prefix.push_str("> ");
        if !self.at_line_start {
            self.output.push_str("> ");
        }

        self.walk_nodes(el.children());

        self.line_prefix = old_prefix;
        self.end_block();
    }

    fn write_code_block(&mut self, el: &Element) {
        let text = el.text_content();
        let text = text.strip_prefix('\n').unwrap_or(&text);
        let language = std::iter::once(el)
            .chain(el.elements().filter(|child| child.is_local_name("code")))
            .filter_map(|el| el.attr("class"))
            .flat_map(str::split_whitespace)
            .find_map(|class| class.strip_prefix("language-"))
            .unwrap_or_default();
        let fence = "`".repeat(calculate_fence_length(text, '`'));

        self.start_block();
        self.ensure_line_started();
        self.output.push_str(&fence);
        self.output.push_str(language);
        self.write_newline();

        for line in text.trim_end_matches('\n').lines() {
            self.ensure_line_started();
            self.output.push_str(line);
            self.write_newline();
        }

        self.ensure_line_started();
        self.output.push_str(&fence);
        self.end_block();
    }

    fn write_rule(&mut self) {
        self.start_block();
        self.ensure_line_started();
        self.output.push_str("---");
        self.end_block();
    }

    /// Renders a table as a GitHub-flavored Markdown table;
    /// the first row is used as the header.
    fn write_table(&mut self, el: &Element) {
        let mut rows = Vec::new();
        for row in table_rows(el) {
            let mut cells = Vec::with_capacity(row.len());
            for cell in row {
                let text = self.capture_isolated(|ctx| ctx.walk_nodes(cell.children()));
                cells.push(text.split_whitespace().collect::<Vec<_>>().join(" "));
            }
            if !cells.is_empty() {
                rows.push(cells);
            }
        }

        let columns = rows.iter().map(Vec::len).max().unwrap_or_default();
        if columns == 0 {
            return;
        }

        self.start_block();
        for (index, row) in rows.iter().enumerate() {
            self.ensure_line_started();
            self.output.push('|');
            for column in 0..columns {
                self.output.push(' ');
                self.output.push_str(row.get(column).map_or("", String::as_str));
                self.output.push_str(" |");
            }
            self.write_newline();

            if index == 0 {
                self.ensure_line_started();
                self.output.push('|');
                self.output.push_str(&" --- |".repeat(columns));
                self.write_newline();
            }
        }
        self.end_block();
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Inlines
    ////////////////////////////////////////////////////////////////////////////////

    /// Wraps rendered children in `marker`, keeping surrounding whitespace
    /// outside the delimiters.
    fn write_inline(&mut self, el: &Element, marker: &str) {
        self.flush_pending_block();
        self.ensure_line_started();

        let inner = self.capture(|ctx| ctx.walk_nodes(el.children()));
        let trimmed = inner.trim();

        if trimmed.is_empty() || trimmed.contains('\n') {
            self.output.push_str(&inner);
            return;
        }
        let leading = &inner[..inner.len() - inner.trim_start().len()];
        let trailing = &inner[inner.trim_end().len()..];

        self.output.push_str(leading);
        self.output.push_str(marker);
        self.output.push_str(trimmed);
        self.output.push_str(marker);
        self.output.push_str(trailing);
    }

    fn write_inline_code(&mut self, el: &Element) {
        let content = el.text_content();
        let content = content.split_whitespace().collect::<Vec<_>>().join(" ");
        if content.is_empty() {
            return;
        }
        let ticks = "`".repeat(calculate_inline_code_ticks(&content));
        let spacer = if content.starts_with('`') || content.ends_with('`') {
            " "
        } else {
            ""
        };

        self.flush_pending_block();
        self.ensure_line_started();
        self.output
            .push_str(&format!("{ticks}{spacer}{content}{spacer}{ticks}"));
        self.has_line_content = true;
    }

    fn write_link(&mut self, el: &Element) {
        let href = el.attr("href").map(str::trim).unwrap_or_default();

        // Skip link formatting if the target is empty (named anchors)
        if href.is_empty() {
            self.walk_nodes(el.children());
            return;
        }

        self.flush_pending_block();
        self.ensure_line_started();
        let text = self.capture(|ctx| ctx.walk_nodes(el.children()));
        let destination = if href.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
            format!("<{href}>")
        } else {
            href.to_owned()
        };

        self.output.push('[');
        self.output.push_str(text.trim());
        self.output.push_str("](");
        self.output.push_str(&destination);
        self.output.push(')');
        self.has_line_content = true;
    }

    fn write_text(&mut self, text: &str) {
        let collapsed = collapse_whitespace(text);
        let has_leading = collapsed.starts_with(' ');
        let has_trailing = collapsed.ends_with(' ');
        let words = collapsed.trim_matches(' ');

        if words.is_empty() {
            // Inter-element whitespace
            if !text.is_empty() && self.has_line_content && !self.pending_newline {
                self.push_space();
            }
            return;
        }

        self.flush_pending_block();
        self.ensure_line_started();

        if has_leading && self.has_line_content {
            self.push_space();
        }

        let escaped = escape_markdown(words);
        if self.has_line_content {
            self.output.push_str(&escaped);
        } else {
            self.output.push_str(&escape_line_start(&escaped));
        }
        self.has_line_content = true;

        if has_trailing {
            self.push_space();
        }
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Output state
    ////////////////////////////////////////////////////////////////////////////////

    /// Renders into a scratch buffer and returns it, leaving the main
    /// output untouched.
    fn capture(&mut self, render: impl FnOnce(&mut Self)) -> String {
        let saved = std::mem::take(&mut self.output);
        render(self);
        std::mem::replace(&mut self.output, saved)
    }

    /// Like [`Self::capture`], but starting from a fresh line state
    /// (used for table cells) that is restored afterward.
    fn capture_isolated(&mut self, render: impl FnOnce(&mut Self)) -> String {
        let saved = (
            self.at_line_start,
            self.has_line_content,
            self.pending_newline,
            std::mem::take(&mut self.line_prefix),
        );
        self.at_line_start = false;
        self.has_line_content = false;
        self.pending_newline = false;

        let captured = self.capture(render);

        (
            self.at_line_start,
            self.has_line_content,
            self.pending_newline,
            self.line_prefix,
        ) = saved;
        captured
    }

    fn push_space(&mut self) {
        if !self.output.ends_with(' ') {
            self.output.push(' ');
        }
    }

    /// Ensure we're ready to write content (write prefix if at line start).
    fn ensure_line_started(&mut self) {
        if self.at_line_start {
            self.output.push_str(&self.line_prefix);
            self.at_line_start = false;
        }
    }

    fn write_newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
        self.has_line_content = false;
    }

    /// Write a hard line break (backslash in markdown).
    fn write_hard_break(&mut self) {
        if self.has_line_content {
            self.output.push('\\');
        }
        self.write_newline();
    }

    /// Inline content following a closed block starts a new paragraph.
    fn flush_pending_block(&mut self) {
        if self.pending_newline {
            self.start_block();
        }
    }

    /// Start a new block element, separated from preceding content by a
    /// blank line (prefixed, so block quotes stay contiguous).
    fn start_block(&mut self) {
        if self.pending_newline || self.has_line_content {
            if !self.at_line_start {
                self.write_newline();
            }
            self.output.push_str(self.line_prefix.trim_end());
            self.write_newline();
            self.pending_newline = false;
        }
    }

    /// End a block element.
    fn end_block(&mut self) {
        self.pending_newline = true;
    }
}

/// Cells of each row, excluding rows of nested tables.
fn table_rows(table: &Element) -> Vec<Vec<&Element>> {
    fn collect<'a>(el: &'a Element, rows: &mut Vec<Vec<&'a Element>>) {
        for child in el.elements() {
            if child.is_local_name("tr") {
                rows.push(
                    child
                        .elements()
                        .filter(|cell| cell.is_local_name("td") || cell.is_local_name("th"))
                        .collect(),
                );
            } else if !child.is_local_name("table") {
                // thead, tbody, tfoot
                collect(child, rows);
            }
        }
    }

    let mut rows = Vec::new();
    collect(table, &mut rows);
    rows
}

#[cfg(test)]
mod tests {
    use crate::markdown::{ConversionSettings, MarkdownConverter, MarkdownResult};
    use std::collections::HashSet;

    fn convert(body: &str) -> MarkdownResult {
        convert_preserving(body, &[])
    }

    fn convert_preserving(body: &str, ids: &[&str]) -> MarkdownResult {
        let settings = ConversionSettings::default();
        let ids: HashSet<String> = ids.iter().map(|&id| id.to_owned()).collect();

        MarkdownConverter::new(&settings, Some(&ids))
            .convert_str(&format!(
                r#"<html xmlns:epub="http://www.idpf.org/2007/ops"><head><title>Ignored</title></head><body>{body}</body></html>"#
            ))
            .unwrap()
    }

    #[test]
    fn test_paragraphs_and_headings() {
        let result = convert("<h1>Chapter One</h1>\n<p>Hello,\n  <b>World</b>!</p>\n<p>Second</p>");

        assert_eq!("# Chapter One\n\nHello, **World**!\n\nSecond", result.content());
        assert_eq!(Some("Chapter One"), result.title());
    }

    #[test]
    fn test_emphasis_whitespace_stays_outside() {
        let result = convert("<p>a<em> b </em>c</p>");
        assert_eq!("a *b* c", result.content());
    }

    #[test]
    fn test_non_breaking_spaces_survive() {
        let result = convert("<p>a&nbsp;&nbsp;b</p><p>x <b>y</b>&nbsp;z</p><p>c \n&#160; d</p>");
        assert_eq!(
            "a\u{a0}\u{a0}b\n\nx **y**\u{a0}z\n\nc \u{a0} d",
            result.content()
        );
    }

    #[test]
    fn test_lists() {
        let result = convert(
            "<ol start=\"3\"><li>Three</li><li>Four<ul><li>Nested</li></ul></li></ol><p>After</p>",
        );
        assert_eq!("3. Three\n4. Four\n   - Nested\n\nAfter", result.content());
    }

    #[test]
    fn test_blockquote_and_rule() {
        let result = convert("<blockquote><p>Quoted</p></blockquote><hr/><p>Next</p>");
        assert_eq!("> Quoted\n\n---\n\nNext", result.content());
    }

    #[test]
    fn test_code() {
        let result = convert(
            "<p>Use <code>cargo</code> now</p><pre><code class=\"language-rust\">fn main() {}\n</code></pre>",
        );
        assert_eq!("Use `cargo` now\n\n```rust\nfn main() {}\n```", result.content());
    }

    #[test]
    fn test_links() {
        let result = convert(r#"<p><a href="https://example.com">site</a> and <a href="ch2.xhtml">next</a></p>"#);
        assert_eq!("[site](https://example.com) and [next](ch2.xhtml)", result.content());
        assert!(result.footnotes().is_empty());
    }

    #[test]
    fn test_table() {
        let result = convert("<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>");
        assert_eq!("| A | B |\n| --- | --- |\n| 1 | 2 |", result.content());
    }

    #[test]
    fn test_images_collected_in_order() {
        let result = convert(
            r#"<p>Before <img src="../images/a.png" alt="A"/> after</p>
               <p><img src="../images/b.png" width="10" height="20"/></p>
               <svg><image xlink:href="../images/c.svg"/></svg>"#,
        );
        let hrefs: Vec<_> = result.images().iter().map(|image| image.href()).collect();

        assert_eq!(vec!["../images/a.png", "../images/b.png", "../images/c.svg"], hrefs);
        assert_eq!(Some("10"), result.images()[1].width());
        assert!(result.content().contains(
            "Before <epub-image href=\"../images/a.png\" alt=\"A\"></epub-image> after"
        ));
        // Standalone image tokens are separated from prose
        assert!(result.content().contains(
            "after\n\n<epub-image href=\"../images/b.png\" width=\"10\" height=\"20\"></epub-image>\n\n"
        ));
    }

    #[test]
    fn test_footnote_references() {
        let result = convert(
            r##"<p>Text<a id="r1" href="#n1"><sup>1</sup></a> and
                <a epub:type="noteref" href="notes.xhtml#n2">[2]</a>.</p>"##,
        );
        let footnotes: Vec<_> = result
            .footnotes()
            .iter()
            .map(|note| (note.href(), note.id(), note.label()))
            .collect();

        assert_eq!(
            vec![("#n1", Some("r1"), "1"), ("notes.xhtml#n2", None, "[2]")],
            footnotes
        );
        assert_eq!(
            "Text<epub-footnote href=\"#n1\" id=\"r1\">1</epub-footnote> and <epub-footnote href=\"notes.xhtml#n2\">[2]</epub-footnote>.",
            result.content()
        );
    }

    #[test]
    fn test_cleanup_rules() {
        let result = convert(
            r#"<nav epub:type="page-list"><ol><li><a href="c.xhtml#p1">1</a></li></ol></nav>
               <div class="calibre3"><span class="calibre_7">Kept</span> text</div>
               <script>alert(1)</script>
               <div class="page-break"></div>
               <p>Next<span epub:type="pagebreak" id="p2" title="2"/></p>"#,
        );
        assert_eq!("Kept text\n\n---\n\nNext", result.content());
    }

    #[test]
    fn test_preserved_anchor_precedes_heading() {
        let result = convert_preserving(
            r#"<p>Intro</p><h2 id="s2">Section Two</h2><p id="other">Body <span id="s3">here</span></p>"#,
            &["s2", "s3"],
        );
        assert_eq!(
            "Intro\n\n<a id=\"s2\"></a>\n## Section Two\n\nBody <a id=\"s3\"></a>here",
            result.content()
        );
    }

    #[test]
    fn test_markdown_escaping() {
        let result = convert("<p>*bold* and _italic_</p><p>1986. A year</p>");
        assert_eq!("\\*bold\\* and \\_italic\\_\n\n1986\\. A year", result.content());
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let body = r##"<h1 id="a">T</h1><p>x<a href="#n">1</a><img src="i.png"/></p>"##;
        let first = convert_preserving(body, &["a"]);
        let second = convert_preserving(body, &["a"]);

        assert_eq!(first, second);
    }
}
