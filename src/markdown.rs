//! Chapter XHTML to Markdown conversion.
//!
//! A chapter is walked once, in document order, producing Markdown text plus
//! two side lists: the images and the footnote references encountered.
//! Both are also left in the text as inert HTML-syntax tokens
//! (see [`tokens`]) so a display layer can materialize them later.
//!
//! - [`settings`]: Heuristic lists (non-content classes, footnote markers).
//! - [`escape`]: Markdown escaping and code fence sizing.
//! - [`tokens`]: The custom image/footnote/anchor tokens.
//!
//! Conversion is a pure function of the chapter text and the set of ids to
//! preserve: converting the same input twice yields identical results.

pub mod escape;
mod postprocess;
mod render;
pub mod settings;
mod title;
pub mod tokens;

use crate::markup::Document;
use crate::parser::ParserResult;
use render::RenderContext;
use std::collections::HashSet;

pub use settings::{ConversionSettings, ConversionSettingsBuilder};

/// An image encountered during conversion, with attributes as authored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ImageRef {
    pub(crate) href: String,
    pub(crate) alt: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) width: Option<String>,
    pub(crate) height: Option<String>,
}

impl ImageRef {
    /// The unresolved `src` (or SVG `href`), relative to the chapter.
    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }

    pub fn height(&self) -> Option<&str> {
        self.height.as_deref()
    }
}

/// A footnote reference encountered during conversion.
///
/// The footnote body is not resolved; `href` points at it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FootnoteRef {
    pub(crate) href: String,
    pub(crate) id: Option<String>,
    pub(crate) label: String,
}

impl FootnoteRef {
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The `id` of the referencing link itself (a back-link target).
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The rendered text of the link (e.g. `1`, `*`).
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The Markdown rendition of a chapter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkdownResult {
    pub(crate) content: String,
    pub(crate) images: Vec<ImageRef>,
    pub(crate) footnotes: Vec<FootnoteRef>,
    pub(crate) title: Option<String>,
}

impl MarkdownResult {
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Images in document order.
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    /// Footnote references in document order.
    pub fn footnotes(&self) -> &[FootnoteRef] {
        &self.footnotes
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

/// Converts a single chapter.
///
/// A converter is consumed by [`Self::convert`], so every conversion
/// starts from empty side lists.
///
/// # Examples
/// ```
/// # use folio::markdown::{ConversionSettings, MarkdownConverter};
/// # use std::collections::HashSet;
/// let settings = ConversionSettings::default();
/// let preserve = HashSet::from([String::from("s2")]);
///
/// let result = MarkdownConverter::new(&settings, Some(&preserve))
///     .convert_str(r##"<html><body><h2 id="s2">Two</h2><p>Text<a href="#n1">1</a></p></body></html>"##)
///     .unwrap();
///
/// assert_eq!(Some("Two"), result.title());
/// assert!(result.content().starts_with("<a id=\"s2\"></a>\n## Two"));
/// assert_eq!("1", result.footnotes()[0].label());
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownConverter<'a> {
    settings: &'a ConversionSettings,
    preserve_ids: Option<&'a HashSet<String>>,
}

impl<'a> MarkdownConverter<'a> {
    /// `preserve_ids` are element ids to keep as `<a id>` anchors;
    /// typically the table-of-contents targets within this chapter.
    pub fn new(settings: &'a ConversionSettings, preserve_ids: Option<&'a HashSet<String>>) -> Self {
        Self {
            settings,
            preserve_ids: preserve_ids.filter(|ids| !ids.is_empty()),
        }
    }

    pub fn convert(self, document: &Document) -> MarkdownResult {
        let title = title::probe(document, self.settings);
        let mut ctx = RenderContext::new(self.settings, self.preserve_ids);

        match document.body() {
            Some(body) => ctx.walk_nodes(body.children()),
            None => ctx.walk_nodes(document.children()),
        }

        let (content, images, footnotes) = ctx.finish();
        let content = postprocess::finalize(&content);

        tracing::debug!(
            len = content.len(),
            images = images.len(),
            footnotes = footnotes.len(),
            "converted chapter to markdown",
        );

        MarkdownResult {
            content,
            images,
            footnotes,
            title,
        }
    }

    /// Parses `text` and converts it.
    ///
    /// # Errors
    /// [`FormatError::Unparsable`](crate::errors::FormatError::Unparsable)
    /// when the markup cannot be tokenized.
    pub fn convert_str(self, text: &str) -> ParserResult<MarkdownResult> {
        Ok(self.convert(&Document::parse(text)?))
    }
}
