//! Self-contained chapter HTML.
//!
//! The alternate path to [`markdown`](crate::markdown): instead of converting a
//! chapter, every stylesheet and image it references is embedded so the HTML
//! can be displayed without access to the archive.
//!
//! - Linked stylesheets become `<style>` blocks whose `url(...)` references
//!   are resolved against the stylesheet's own directory.
//! - Images (`<img src>`, SVG `<image href>`) and stylesheet resources
//!   (fonts, backgrounds) are registered in a [`BlobStore`] and referenced
//!   by handle.
//! - A reference that cannot be resolved is left untouched and reported
//!   through [`InlinedChapter::missing_assets`].
//!
//! Handles belong to the returned [`InlinedChapter`] and are revoked when it
//! is [released](InlinedChapter::release) or dropped.

mod blob;
mod css;
mod mime;
mod patch;

pub use blob::{BLOB_SCHEME, Blob, BlobStore};

use crate::ebook::archive::FileHandle;
use crate::ebook::errors::{EbookError, EbookResult};
use crate::inline::patch::TextPatch;
use crate::util::uri;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Chapter HTML with its external references embedded.
///
/// Owns every handle created while inlining; they are revoked from the
/// [`BlobStore`] exactly once, either by [`Self::release`] or on drop.
///
/// # Examples
/// ```no_run
/// # use folio::errors::EbookResult;
/// # use folio::inline::BlobStore;
/// # use folio::Epub;
/// # use std::sync::Arc;
/// # fn main() -> EbookResult<()> {
/// let epub = Epub::open("tests/ebooks/example_epub")?;
/// let store = Arc::new(BlobStore::new());
///
/// let chapter = epub.inline_chapter(0, &store)?;
/// println!("{}", chapter.html());
///
/// // Frees every handle the chapter references
/// chapter.release();
/// assert!(store.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct InlinedChapter {
    html: String,
    handles: Vec<String>,
    missing: Vec<String>,
    store: Arc<BlobStore>,
}

impl InlinedChapter {
    fn new(store: &Arc<BlobStore>) -> Self {
        Self {
            html: String::new(),
            handles: Vec::new(),
            missing: Vec::new(),
            store: Arc::clone(store),
        }
    }

    /// The rewritten HTML.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Handle URLs owned by this chapter, in creation order.
    pub fn handles(&self) -> &[String] {
        &self.handles
    }

    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    /// References (as written) that could not be found in the archive.
    pub fn missing_assets(&self) -> &[String] {
        &self.missing
    }

    /// Revokes every handle and returns the HTML.
    ///
    /// The returned HTML still contains the (now dangling) handle URLs.
    pub fn release(mut self) -> String {
        self.revoke_handles();
        std::mem::take(&mut self.html)
    }

    fn embed(&mut self, bytes: &[u8], path: &str) -> String {
        let url = self.store.create(bytes, mime::from_path(path));
        self.handles.push(url.clone());
        url
    }

    fn revoke_handles(&mut self) {
        for url in self.handles.drain(..) {
            self.store.revoke(&url);
        }
    }
}

impl Drop for InlinedChapter {
    fn drop(&mut self) {
        self.revoke_handles();
    }
}

impl Debug for InlinedChapter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlinedChapter")
            .field("len", &self.html.len())
            .field("handles", &self.handles)
            .field("missing", &self.missing)
            .finish()
    }
}

/// A shared flag to abandon an in-flight inlining operation.
///
/// # Examples
/// ```
/// # use folio::inline::CancelFlag;
/// let flag = CancelFlag::new();
/// let worker_flag = flag.clone();
///
/// flag.cancel();
/// assert!(worker_flag.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Embeds the stylesheets and images referenced by `chapter`.
///
/// On cancellation, the partially built [`InlinedChapter`] is dropped,
/// revoking every handle created so far.
pub(crate) fn inline_chapter(
    chapter: &FileHandle<'_>,
    store: &Arc<BlobStore>,
    cancel: Option<&CancelFlag>,
) -> EbookResult<InlinedChapter> {
    let mut inliner = Inliner {
        chapter,
        cancel,
        output: InlinedChapter::new(store),
    };
    let html = inliner.inline_html(chapter.content())?;
    let mut output = inliner.output;
    output.html = html;

    tracing::debug!(
        chapter = chapter.archive_path(),
        handles = output.handles.len(),
        missing = output.missing.len(),
        "inlined chapter assets",
    );
    Ok(output)
}

struct Inliner<'a, 'b> {
    chapter: &'b FileHandle<'a>,
    cancel: Option<&'b CancelFlag>,
    output: InlinedChapter,
}

impl Inliner<'_, '_> {
    fn inline_html(&mut self, html: &str) -> EbookResult<String> {
        let chapter = self.chapter;
        let mut edits = TextPatch::default();

        for tag in patch::asset_tags(html) {
            if tag.is_stylesheet() {
                let Some(href) = tag.attribute("href") else {
                    continue;
                };
                let href = href.value();
                if let Some(style) = self.inline_stylesheet(&href)? {
                    let media = tag
                        .attribute("media")
                        .map(|media| format!(" media=\"{}\"", media.raw.replace('"', "&quot;")))
                        .unwrap_or_default();
                    edits.replace(tag.range.clone(), format!("<style{media}>\n{style}\n</style>"));
                }
            } else if let Some(source) = tag.image_source() {
                if let Some(url) = self.embed(&source.value(), chapter.base_dir())? {
                    edits.replace(source.range.clone(), url);
                }
            }
        }

        // Existing style blocks resolve against the chapter itself
        for block in patch::style_blocks(html) {
            let css = &html[block.clone()];
            let rewritten = self.rewrite_css(css, chapter.base_dir())?;
            if rewritten != css {
                edits.replace(block, rewritten);
            }
        }

        Ok(edits.apply(html))
    }

    /// The stylesheet at `href` with its resources embedded,
    /// or [`None`] if it is not present.
    fn inline_stylesheet(&mut self, href: &str) -> EbookResult<Option<String>> {
        if uri::is_external(href) {
            return Ok(None);
        }
        self.check_cancelled()?;

        let path = self.chapter.resolve(uri::path(href));
        let Some(css) = self.chapter.archive().read_text(&path) else {
            self.record_missing(href, &path);
            return Ok(None);
        };

        self.rewrite_css(&css, &uri::base_dir(&path)).map(Some)
    }

    fn rewrite_css(&mut self, css: &str, base_dir: &str) -> EbookResult<String> {
        let mut edits = TextPatch::default();

        // Unembedded references are re-emitted as written, in the quoted form
        for reference in css::url_references(css) {
            let url = self
                .embed(reference.href, base_dir)?
                .unwrap_or_else(|| reference.href.to_owned());
            edits.replace(reference.range, css::url(&url));
        }

        Ok(if edits.is_empty() {
            css.to_owned()
        } else {
            edits.apply(css)
        })
    }

    /// Registers the resource at `href` (relative to `base_dir`),
    /// returning its handle URL.
    fn embed(&mut self, href: &str, base_dir: &str) -> EbookResult<Option<String>> {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') || uri::is_external(href) {
            return Ok(None);
        }
        self.check_cancelled()?;

        let path = uri::resolve(base_dir, uri::path(href));
        match self.chapter.archive().read_bytes(&path) {
            Some(bytes) => Ok(Some(self.output.embed(bytes, &path))),
            None => {
                self.record_missing(href, &path);
                Ok(None)
            }
        }
    }

    fn record_missing(&mut self, href: &str, path: &str) {
        tracing::warn!(
            chapter = self.chapter.archive_path(),
            %href,
            %path,
            "missing asset; keeping original reference",
        );
        self.output.missing.push(href.to_owned());
    }

    fn check_cancelled(&self) -> EbookResult<()> {
        if self.cancel.is_some_and(CancelFlag::is_cancelled) {
            tracing::debug!(
                chapter = self.chapter.archive_path(),
                released = self.output.handles.len(),
                "inlining cancelled",
            );
            return Err(EbookError::Cancelled);
        }
        Ok(())
    }
}
