//! The Electronic Publication ([`Epub`]) module.
//!
//! Supports EPUB versions `2` and `3`.
//!
//! For more information regarding the EPUB standard, see:
//! <https://www.w3.org/TR/epub>

mod consts;
pub mod errors;
pub mod manifest;
pub mod metadata;
mod parser;
pub mod spine;
pub mod toc;

use crate::ebook::archive::{Archive, FileHandle};
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::manifest::EpubManifest;
use crate::ebook::epub::metadata::EpubMetadata;
use crate::ebook::epub::parser::{EpubParser, ParsedContent};
use crate::ebook::epub::spine::EpubSpine;
use crate::ebook::epub::toc::{FragmentIdIndex, Toc, TocKind};
use crate::ebook::errors::{EbookError, EbookResult};
use crate::inline::{self, BlobStore, CancelFlag, InlinedChapter};
use crate::markdown::{ConversionSettings, MarkdownConverter, MarkdownResult};
use crate::markup::Document;
use crate::util::uri;
use std::fmt::{Debug, Formatter};
use std::io::{Read, Seek};
use std::path::Path;
use std::sync::Arc;

/// Electronic Publication (EPUB)
///
/// Provides access to the following contents of an epub:
/// - [`EpubMetadata`]: Metadata details (epub version, title, language, identifiers)
/// - [`EpubManifest`]: Manifest resources (XHTML, images, CSS)
/// - [`EpubSpine`]: Canonical reading order
/// - [`Toc`]: Flattened table of contents
///
/// Chapters are addressed by their index within the spine and may be
/// converted to Markdown ([`Self::to_markdown`]) or to self-contained
/// HTML ([`Self::inline_chapter`]).
///
/// An [`Epub`] is immutable once opened and is `Send + Sync`;
/// chapters may be converted from several threads at once.
///
/// # Configuration
/// Parsing can be configured using [`EpubSettings`].
///
/// # Renditions
/// Multi-rendition EPUBs are not fully supported,
/// and the first OPF `rootfile` will always be selected.
///
/// # Examples
/// - Reading the contents of an epub:
/// ```no_run
/// # use folio::errors::EbookResult;
/// # use folio::Epub;
/// # fn main() -> EbookResult<()> {
/// let epub = Epub::open("book.epub")?;
///
/// println!("{}", epub.metadata().get_text("title"));
///
/// for index in 0..epub.chapter_paths().len() {
///     let chapter = epub.to_markdown(index)?;
///     println!("{}", chapter.content());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Epub {
    archive: Archive,
    settings: EpubSettings,
    package_path: String,
    metadata: EpubMetadata,
    manifest: EpubManifest,
    spine: EpubSpine,
    toc: Option<Toc>,
    fragment_ids: FragmentIdIndex,
}

impl Epub {
    /// Opens an [`Epub`] from the given [`Path`] with default [`EpubSettings`].
    ///
    /// The provided path may be an EPUB **file** or **directory** containing the
    /// contents of an unzipped EPUB.
    ///
    /// # Errors
    /// - [`ArchiveError`](EbookError::Archive): Missing or invalid EPUB files.
    /// - [`FormatError`](EbookError::Format): Malformed EPUB content.
    ///
    /// A missing table of contents is **not** an error; see [`Self::toc`].
    pub fn open(path: impl AsRef<Path>) -> EbookResult<Self> {
        Self::open_with(path, EpubSettings::default())
    }

    /// Opens an [`Epub`] from the given [`Path`] with the specified [`EpubSettings`].
    ///
    /// See [`Self::open`] for more details.
    ///
    /// # Examples
    /// ```no_run
    /// # use folio::epub::{Epub, EpubSettings};
    /// # use folio::epub::toc::TocKind;
    /// # fn main() -> folio::errors::EbookResult<()> {
    /// let epub = Epub::open_with(
    ///     "book.epub",
    ///     EpubSettings::builder().preferred_toc(TocKind::Ncx),
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open_with(path: impl AsRef<Path>, settings: impl Into<EpubSettings>) -> EbookResult<Self> {
        Self::from_archive_with(Archive::open(path)?, settings)
    }

    /// Opens an EPUB from any implementation of [`Read`] + [`Seek`]
    /// (e.g. [`std::io::Cursor`] over downloaded bytes).
    pub fn read<R: Read + Seek>(reader: R) -> EbookResult<Self> {
        Self::read_with(reader, EpubSettings::default())
    }

    /// See [`Self::read`].
    pub fn read_with<R: Read + Seek>(reader: R, settings: impl Into<EpubSettings>) -> EbookResult<Self> {
        Self::from_archive_with(Archive::read(reader)?, settings)
    }

    /// Builds an [`Epub`] from an already loaded [`Archive`].
    pub fn from_archive(archive: Archive) -> EbookResult<Self> {
        Self::from_archive_with(archive, EpubSettings::default())
    }

    /// See [`Self::from_archive`].
    pub fn from_archive_with(archive: Archive, settings: impl Into<EpubSettings>) -> EbookResult<Self> {
        let settings = settings.into();
        let ParsedContent {
            package_path,
            metadata,
            manifest,
            spine,
            toc,
        } = EpubParser::new(&settings, &archive).parse()?;

        let fragment_ids = toc.as_ref().map(Toc::fragment_ids).unwrap_or_default();

        Ok(Self {
            archive,
            settings,
            package_path,
            metadata,
            manifest,
            spine,
            toc,
            fragment_ids,
        })
    }

    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    pub fn settings(&self) -> &EpubSettings {
        &self.settings
    }

    /// The absolute archive path of the package `.opf` file.
    pub fn package_path(&self) -> &str {
        &self.package_path
    }

    /// The directory that package hrefs resolve against.
    pub fn package_dir(&self) -> String {
        uri::base_dir(&self.package_path)
    }

    pub fn metadata(&self) -> &EpubMetadata {
        &self.metadata
    }

    pub fn manifest(&self) -> &EpubManifest {
        &self.manifest
    }

    pub fn spine(&self) -> &EpubSpine {
        &self.spine
    }

    /// The table of contents built at open time.
    ///
    /// # Errors
    /// [`EpubError::MissingToc`] when neither a navigation document nor an
    /// NCX is available, or when [`EpubSettings::skip_toc`] is set.
    /// The book remains readable in spine order.
    pub fn toc(&self) -> Result<&Toc, EpubError> {
        self.toc.as_ref().ok_or(EpubError::MissingToc)
    }

    /// Builds the table of contents anew, surfacing why it is unavailable.
    ///
    /// Unlike [`Self::toc`], parse failures of the TOC document are
    /// reported rather than treated as absence.
    pub fn build_toc(&self) -> EbookResult<Toc> {
        EpubParser::new(&self.settings, &self.archive).parse_toc(&self.manifest, &self.spine)
    }

    /// Chapter path to the fragment ids linked from the table of contents.
    pub fn fragment_ids(&self) -> &FragmentIdIndex {
        &self.fragment_ids
    }

    /// Absolute archive paths of each spine entry, in reading order.
    pub fn chapter_paths(&self) -> &[String] {
        self.spine.chapter_paths()
    }

    /// Opens the chapter at `index` within [`Self::chapter_paths`].
    ///
    /// Returns [`None`] if `index` is out of range or the entry is absent.
    pub fn chapter(&self, index: usize) -> Option<FileHandle<'_>> {
        self.archive.open_file(self.chapter_paths().get(index)?)
    }

    /// Maps a table-of-contents href to its chapter index.
    ///
    /// Returns [`None`] if there is no table of contents or no chapter matches.
    pub fn chapter_index(&self, href: &str) -> Option<usize> {
        self.toc
            .as_ref()?
            .chapter_index(href, self.chapter_paths())
    }

    /// Converts the chapter at `index` to Markdown with default [`ConversionSettings`].
    ///
    /// # Errors
    /// - [`EbookError::ChapterOutOfRange`]: `index` exceeds the spine.
    /// - [`ArchiveError::MissingEntry`](crate::errors::ArchiveError::MissingEntry):
    ///   the spine references an absent entry.
    /// - [`FormatError::Unparsable`](crate::errors::FormatError::Unparsable):
    ///   the chapter cannot be parsed.
    pub fn to_markdown(&self, index: usize) -> EbookResult<MarkdownResult> {
        self.to_markdown_with(index, &ConversionSettings::default())
    }

    /// See [`Self::to_markdown`].
    pub fn to_markdown_with(
        &self,
        index: usize,
        settings: &ConversionSettings,
    ) -> EbookResult<MarkdownResult> {
        let handle = self.require_chapter(index)?;
        let reparsed;
        let document = match handle.document() {
            Some(document) => document,
            // Surface the parse error
            None => {
                reparsed = Document::parse(handle.content())?;
                &reparsed
            }
        };
        let preserve_ids = self.fragment_ids.get(handle.archive_path());

        Ok(MarkdownConverter::new(settings, preserve_ids).convert(document))
    }

    /// Embeds every stylesheet and image referenced by the chapter at `index`.
    ///
    /// Created handles are registered in `store` and owned by the returned
    /// [`InlinedChapter`] until released.
    pub fn inline_chapter(&self, index: usize, store: &Arc<BlobStore>) -> EbookResult<InlinedChapter> {
        inline::inline_chapter(&self.require_chapter(index)?, store, None)
    }

    /// See [`Self::inline_chapter`].
    ///
    /// # Errors
    /// [`EbookError::Cancelled`] when `cancel` is raised before completion;
    /// handles created up to that point are already released.
    pub fn inline_chapter_with(
        &self,
        index: usize,
        store: &Arc<BlobStore>,
        cancel: &CancelFlag,
    ) -> EbookResult<InlinedChapter> {
        inline::inline_chapter(&self.require_chapter(index)?, store, Some(cancel))
    }

    fn require_chapter(&self, index: usize) -> EbookResult<FileHandle<'_>> {
        let paths = self.chapter_paths();
        let path = paths.get(index).ok_or(EbookError::ChapterOutOfRange {
            index,
            len: paths.len(),
        })?;

        self.archive
            .open_file(path)
            .ok_or_else(|| crate::errors::ArchiveError::MissingEntry(path.clone()).into())
    }
}

impl Debug for Epub {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Epub")
            .field("package_path", &self.package_path)
            .field("metadata", &self.metadata)
            .field("manifest", &self.manifest)
            .field("spine", &self.spine)
            .field("toc", &self.toc)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Epub {
    fn eq(&self, other: &Self) -> bool {
        self.metadata() == other.metadata()
    }
}

/// EPUB-specific settings upon parsing an [`Epub`].
///
/// To create a mutable settings instance, see
/// [`EpubSettings::builder`] or [`EpubSettings::default`].
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EpubSettings {
    /// Prefer a table of contents format over another.
    ///
    /// **Formats**:
    /// - [`TocKind::Ncx`]: `navMap (ncx)` (EPUB 2)
    /// - [`TocKind::Nav`]: `toc (xhtml)` (EPUB 3)
    ///
    /// If the preferred format is not available,
    /// the other format is used instead.
    ///
    /// Default: [`TocKind::Nav`]
    pub preferred_toc: TocKind,
    /// Do not build the table of contents when opening.
    ///
    /// [`Epub::toc`] then reports [`EpubError::MissingToc`] and no
    /// fragment ids are preserved during Markdown conversion.
    ///
    /// Default: `false`
    pub skip_toc: bool,
}

impl EpubSettings {
    /// Returns a builder to create an [`EpubSettings`] instance.
    pub fn builder() -> EpubSettingsBuilder {
        EpubSettingsBuilder(Self::default())
    }
}

impl From<EpubSettingsBuilder> for EpubSettings {
    fn from(value: EpubSettingsBuilder) -> Self {
        value.build()
    }
}

/// Builder to construct an [`EpubSettings`] instance.
#[derive(Debug, Clone)]
pub struct EpubSettingsBuilder(EpubSettings);

impl EpubSettingsBuilder {
    /// Turn this builder into an [`EpubSettings`] instance.
    pub fn build(self) -> EpubSettings {
        self.0
    }

    /// See [`EpubSettings::preferred_toc`].
    pub fn preferred_toc(mut self, kind: TocKind) -> Self {
        self.0.preferred_toc = kind;
        self
    }

    /// See [`EpubSettings::skip_toc`].
    pub fn skip_toc(mut self, skip_toc: bool) -> Self {
        self.0.skip_toc = skip_toc;
        self
    }
}
