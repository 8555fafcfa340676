//! Random-access reads of named entries within a loaded ebook package.
//!
//! An [`Archive`] is loaded once, eagerly, and is immutable afterward.
//! Every read is therefore lock-free and archives may be shared freely
//! across threads. Missing entries are reported as [`None`] rather than as
//! errors; each higher layer decides whether a miss is fatal.

mod directory;
pub mod errors;
mod zip;

use crate::ebook::archive::errors::{ArchiveError, ArchiveResult};
use crate::markup::Document;
use crate::util::{uri, utf};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// File extensions parsed into a [`Document`] by [`Archive::open_file`].
const MARKUP_EXTENSIONS: &[&str] = &["xhtml", "html", "htm", "xml", "opf", "ncx", "svg"];

/// An immutable in-memory collection of named byte entries.
///
/// Entry names use `/` separators and carry no leading `/`.
///
/// # Examples
/// - Building an archive from raw entries:
/// ```
/// # use folio::archive::Archive;
/// let archive = Archive::from_entries([
///     ("OEBPS/chapter1.xhtml", b"<html/>".to_vec()),
///     ("OEBPS/images/pic 1.png", vec![0x89, 0x50]),
/// ]);
///
/// assert!(archive.read_text("OEBPS/chapter1.xhtml").is_some());
/// // Percent-encoded manifest hrefs resolve to their decoded entry names
/// assert!(archive.read_bytes("OEBPS/images/pic%201.png").is_some());
/// assert!(archive.read_bytes("OEBPS/missing.png").is_none());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Archive {
    entries: HashMap<String, Vec<u8>>,
}

impl Archive {
    /// Loads an archive from a zipped `.epub` **file** or a **directory**
    /// containing the contents of an unzipped package.
    ///
    /// # Errors
    /// [`ArchiveError::UnreadableArchive`] when the path cannot be read or
    /// is not a valid zip file.
    pub fn open(path: impl AsRef<Path>) -> ArchiveResult<Self> {
        let path = path.as_ref();

        let archive = if path.is_file() {
            let file = File::open(path).map_err(|source| ArchiveError::UnreadableArchive {
                source,
                path: Some(path.to_path_buf()),
            })?;
            zip::read_entries(BufReader::new(file), Some(path))?
        } else {
            directory::read_entries(path)?
        };

        tracing::debug!(path = %path.display(), entries = archive.len(), "loaded archive");
        Ok(archive)
    }

    /// Loads an archive from zip data provided by any [`Read`] + [`Seek`].
    ///
    /// # Errors
    /// [`ArchiveError::UnreadableArchive`] when the data is not a valid zip file.
    pub fn read<R: Read + Seek>(reader: R) -> ArchiveResult<Self> {
        let archive = zip::read_entries(reader, None)?;

        tracing::debug!(entries = archive.len(), "loaded archive from reader");
        Ok(archive)
    }

    /// Builds an archive directly from `(path, bytes)` pairs.
    pub fn from_entries<P, B>(entries: impl IntoIterator<Item = (P, B)>) -> Self
    where
        P: Into<String>,
        B: Into<Vec<u8>>,
    {
        let mut archive = Self::default();
        for (path, bytes) in entries {
            archive.insert(path.into(), bytes.into());
        }
        archive
    }

    pub(crate) fn insert(&mut self, path: String, bytes: Vec<u8>) {
        let path = path.replace('\\', "/");
        let path = path.trim_start_matches('/').to_owned();
        self.entries.insert(path, bytes);
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entry names, in no particular order.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.read_bytes(path).is_some()
    }

    /// The raw bytes of the entry at `path`, or [`None`] if absent.
    ///
    /// A leading `/`, a query and a fragment are ignored; a percent-encoded
    /// `path` also matches its decoded entry name.
    pub fn read_bytes(&self, path: &str) -> Option<&[u8]> {
        let path = uri::path(path).trim_start_matches('/');

        self.entries
            .get(path)
            .or_else(|| self.entries.get(uri::decode(path).as_ref()))
            .map(Vec::as_slice)
    }

    /// The entry at `path` decoded as text, or [`None`] if absent.
    ///
    /// UTF-8 (with or without a BOM) and BOM-marked UTF-16 are supported;
    /// undecodable entries are reported as absent.
    pub fn read_text(&self, path: &str) -> Option<String> {
        let bytes = self.read_bytes(path)?;

        match utf::into_utf8_str(bytes.to_vec()) {
            Ok(text) => Some(text),
            Err(error) => {
                tracing::warn!(%path, %error, "entry is not decodable as text");
                None
            }
        }
    }

    /// Like [`Self::read_text`], but reports a miss as [`ArchiveError::MissingEntry`].
    pub fn require_text(&self, path: &str) -> ArchiveResult<String> {
        self.read_text(path)
            .ok_or_else(|| ArchiveError::MissingEntry(path.to_owned()))
    }

    /// Reads the entry at `path` into a [`FileHandle`].
    ///
    /// Markup entries (by extension) are parsed into a [`Document`];
    /// a parse failure leaves [`FileHandle::document`] empty.
    pub fn open_file(&self, path: &str) -> Option<FileHandle<'_>> {
        let content = self.read_text(path)?;
        let path = uri::path(path).trim_start_matches('/').to_owned();

        let document = if is_markup(&path) {
            Document::parse(&content)
                .inspect_err(|error| tracing::warn!(%path, %error, "unable to parse markup"))
                .ok()
        } else {
            None
        };

        Some(FileHandle {
            archive: self,
            base_dir: uri::base_dir(&path),
            archive_path: path,
            content,
            document,
        })
    }
}

impl Debug for Archive {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.entry_names().collect();
        names.sort_unstable();

        f.debug_struct("Archive").field("entries", &names).finish()
    }
}

/// Resolves `relative` against `base` (a directory or a file path).
///
/// - An href starting with `/` is returned unchanged.
/// - If the last segment of `base` contains a `.`, it is treated as a
///   filename and dropped.
/// - `..` pops a segment, `.` is ignored and empty segments are dropped.
///
/// # Examples
/// ```
/// use folio::archive::resolve;
///
/// assert_eq!("images/pic.png", resolve("OEBPS/chapter1.xhtml", "../images/pic.png"));
/// assert_eq!("x/y.png", resolve("", "x/y.png"));
/// assert_eq!("/abs.css", resolve("OEBPS", "/abs.css"));
/// ```
pub fn resolve(base: &str, relative: &str) -> String {
    uri::resolve(base, relative)
}

fn is_markup(path: &str) -> bool {
    uri::extension(path).is_some_and(|ext| MARKUP_EXTENSIONS.contains(&ext.as_str()))
}

/// A text entry read from an [`Archive`], with its location context.
///
/// Holds a non-owning reference back to the archive so sibling resources
/// can be read relative to this file (see [`Self::rebase`]).
#[derive(Clone)]
pub struct FileHandle<'a> {
    archive: &'a Archive,
    archive_path: String,
    base_dir: String,
    content: String,
    document: Option<Document>,
}

impl<'a> FileHandle<'a> {
    /// The absolute entry name of this file.
    pub fn archive_path(&self) -> &str {
        &self.archive_path
    }

    /// The directory that relative references within this file resolve against.
    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    /// The decoded text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The parsed tree, if this file is markup and parsed successfully.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn archive(&self) -> &'a Archive {
        self.archive
    }

    /// Resolves `href` against [`Self::base_dir`].
    pub fn resolve(&self, href: &str) -> String {
        uri::resolve(&self.base_dir, href)
    }

    /// Opens the file that `href` points to, relative to this one.
    pub fn rebase(&self, href: &str) -> Option<FileHandle<'a>> {
        self.archive.open_file(&self.resolve(href))
    }
}

impl Debug for FileHandle<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandle")
            .field("archive_path", &self.archive_path)
            .field("base_dir", &self.base_dir)
            .field("len", &self.content.len())
            .field("parsed", &self.document.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Archive;

    fn archive() -> Archive {
        Archive::from_entries([
            ("OEBPS/text/c1.xhtml", "<html><body><p>one</p></body></html>"),
            ("OEBPS/styles/main.css", "p { margin: 0 }"),
            ("/OEBPS/images/a b.png", "png"),
        ])
    }

    #[test]
    fn test_soft_miss() {
        let archive = archive();

        assert!(archive.read_bytes("OEBPS/none.png").is_none());
        assert!(archive.read_text("none").is_none());
        assert!(archive.open_file("none.xhtml").is_none());
        assert!(archive.require_text("none").is_err());
    }

    #[test]
    fn test_lookup_normalization() {
        let archive = archive();

        assert!(archive.contains("OEBPS/images/a b.png"));
        assert!(archive.contains("/OEBPS/images/a%20b.png"));
        assert!(archive.contains("OEBPS/text/c1.xhtml#start"));
    }

    #[test]
    fn test_open_and_rebase() {
        let archive = archive();
        let chapter = archive.open_file("OEBPS/text/c1.xhtml").unwrap();

        assert_eq!("OEBPS/text", chapter.base_dir());
        assert!(chapter.document().is_some());

        let css = chapter.rebase("../styles/main.css").unwrap();
        assert_eq!("OEBPS/styles/main.css", css.archive_path());
        assert_eq!("OEBPS/styles", css.base_dir());
        // Stylesheets are not markup
        assert!(css.document().is_none());
        assert!(chapter.rebase("../styles/none.css").is_none());
    }
}
