//! Table of contents flattened into reading-order entries.

use crate::ebook::epub::manifest::EpubManifest;
use crate::ebook::epub::spine::EpubSpine;
use crate::util::uri;
use std::collections::{HashMap, HashSet};

/// Which table-of-contents format is preferred when a package offers both.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TocKind {
    /// The EPUB 3 XHTML navigation document (`<nav epub:type="toc">`).
    #[default]
    Nav,
    /// The EPUB 2 NCX document (`toc.ncx`).
    Ncx,
}

/// The archive location of the chosen table of contents.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TocSource {
    Nav(String),
    Ncx(String),
}

impl TocSource {
    /// Picks the table of contents of a package.
    ///
    /// The `preferred` kind wins when both are present; otherwise whichever
    /// exists is used. For NCX, the spine `toc` attribute is honored before
    /// falling back to any manifest item with the NCX media type.
    pub fn select(manifest: &EpubManifest, spine: &EpubSpine, preferred: TocKind) -> Option<Self> {
        let nav = manifest
            .nav()
            .map(|item| Self::Nav(item.path().to_owned()));
        let ncx = spine
            .toc_idref()
            .and_then(|idref| manifest.by_id(idref))
            .filter(|item| item.is_ncx())
            .or_else(|| manifest.ncx())
            .map(|item| Self::Ncx(item.path().to_owned()));

        match preferred {
            TocKind::Nav => nav.or(ncx),
            TocKind::Ncx => ncx.or(nav),
        }
    }

    pub fn kind(&self) -> TocKind {
        match self {
            Self::Nav(_) => TocKind::Nav,
            Self::Ncx(_) => TocKind::Ncx,
        }
    }

    /// The absolute archive path of the TOC document.
    pub fn path(&self) -> &str {
        match self {
            Self::Nav(path) | Self::Ncx(path) => path,
        }
    }
}

/// A single table-of-contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatNavItem {
    pub(crate) label: String,
    pub(crate) href: String,
    pub(crate) level: usize,
}

impl FlatNavItem {
    /// Whitespace-normalized label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The href as authored, relative to the TOC document.
    ///
    /// Empty for label-only headings.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Nesting depth, starting at `0` for top-level entries.
    pub fn level(&self) -> usize {
        self.level
    }
}

/// A flattened table of contents.
///
/// Entries appear in pre-order document order: every parent precedes its
/// children, and the children follow before the parent's next sibling.
#[derive(Clone, Debug, PartialEq)]
pub struct Toc {
    pub(crate) source: TocSource,
    pub(crate) base_dir: String,
    pub(crate) title: Option<String>,
    pub(crate) items: Vec<FlatNavItem>,
}

impl Toc {
    pub fn source(&self) -> &TocSource {
        &self.source
    }

    /// The directory TOC hrefs resolve against.
    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    /// The NCX `docTitle` or the heading of the navigation element, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn items(&self) -> &[FlatNavItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolves a TOC href to an index into `chapter_paths`.
    ///
    /// See [`resolve_to_chapter_index`].
    pub fn chapter_index(&self, href: &str, chapter_paths: &[String]) -> Option<usize> {
        resolve_to_chapter_index(href, &self.base_dir, chapter_paths)
    }

    /// Collects the fragment ids each chapter is linked at.
    pub fn fragment_ids(&self) -> FragmentIdIndex {
        FragmentIdIndex::build(&self.items, &self.base_dir)
    }
}

/// Maps an href (relative to `toc_base_dir`) to its chapter index.
///
/// The fragment is discarded and the path is resolved and percent-decoded
/// before comparison; the first exact match wins.
pub fn resolve_to_chapter_index(
    href: &str,
    toc_base_dir: &str,
    chapter_paths: &[String],
) -> Option<usize> {
    let path = uri::path(href);
    if path.is_empty() || uri::is_external(path) {
        return None;
    }
    let resolved = uri::resolve(toc_base_dir, path);
    let resolved = uri::decode(resolved.trim_start_matches('/'));

    chapter_paths
        .iter()
        .position(|chapter| *chapter == resolved)
}

/// Resolved chapter path to the set of fragment ids the TOC links to in it.
///
/// The Markdown converter preserves these ids as anchors so that TOC links
/// keep landing at the right place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FragmentIdIndex(HashMap<String, HashSet<String>>);

impl FragmentIdIndex {
    pub fn build(items: &[FlatNavItem], toc_base_dir: &str) -> Self {
        let mut index = HashMap::<String, HashSet<String>>::new();

        for item in items {
            let (path, Some(fragment)) = uri::split_fragment(&item.href) else {
                continue;
            };
            let path = uri::path(path);
            if path.is_empty() || fragment.is_empty() || uri::is_external(path) {
                continue;
            }
            let resolved = uri::resolve(toc_base_dir, path);
            let resolved = uri::decode(resolved.trim_start_matches('/')).into_owned();

            index
                .entry(resolved)
                .or_default()
                .insert(uri::decode(fragment).into_owned());
        }
        Self(index)
    }

    /// Fragment ids linked within the chapter at `path`.
    pub fn get(&self, path: &str) -> Option<&HashSet<String>> {
        self.0.get(uri::decode(path.trim_start_matches('/')).as_ref())
    }

    pub fn contains(&self, path: &str, id: &str) -> bool {
        self.get(path).is_some_and(|ids| ids.contains(id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
