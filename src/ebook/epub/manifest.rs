//! EPUB manifest: every publication resource, keyed by id.

use crate::ebook::epub::consts;
use indexmap::IndexSet;
use std::collections::HashMap;

/// A manifest `<item>`.
#[derive(Clone, Debug, PartialEq)]
pub struct ManifestItem {
    pub(crate) id: String,
    pub(crate) href: String,
    pub(crate) path: String,
    pub(crate) media_type: String,
    pub(crate) properties: IndexSet<String>,
}

impl ManifestItem {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `href` attribute as authored, relative to the package document.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The resolved, percent-decoded archive path of the resource.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The lower-cased `media-type` attribute.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn properties(&self) -> &IndexSet<String> {
        &self.properties
    }

    pub fn has_property(&self, property: &str) -> bool {
        self.properties.contains(property)
    }

    pub fn is_nav(&self) -> bool {
        self.has_property(consts::NAV_PROPERTY)
    }

    pub fn is_ncx(&self) -> bool {
        self.media_type == consts::NCX_TYPE
            || crate::util::uri::extension(&self.path).as_deref() == Some(consts::NCX_EXTENSION)
    }

    pub fn is_cover_image(&self) -> bool {
        self.has_property(consts::COVER_IMAGE)
    }
}

/// Manifest items in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubManifest {
    items: Vec<ManifestItem>,
    by_id: HashMap<String, usize>,
}

impl EpubManifest {
    /// Adds an item. Returns `false` if the id is already taken,
    /// in which case the first declaration wins.
    pub(crate) fn push(&mut self, item: ManifestItem) -> bool {
        if self.by_id.contains_key(&item.id) {
            return false;
        }
        self.by_id.insert(item.id.clone(), self.items.len());
        self.items.push(item);
        true
    }

    pub(crate) fn by_id_mut(&mut self, id: &str) -> Option<&mut ManifestItem> {
        self.by_id.get(id).map(|&index| &mut self.items[index])
    }

    pub fn by_id(&self, id: &str) -> Option<&ManifestItem> {
        self.by_id.get(id).map(|&index| &self.items[index])
    }

    /// Looks up an item by its resolved archive path.
    ///
    /// Percent-encoded and decoded forms of the same path match.
    pub fn by_path(&self, path: &str) -> Option<&ManifestItem> {
        let path = crate::util::uri::decode(crate::util::uri::path(path));
        let path = path.trim_start_matches('/');
        self.items.iter().find(|item| item.path == path)
    }

    pub fn items(&self) -> &[ManifestItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item carrying the `cover-image` property.
    ///
    /// For EPUB 2 packages the property is derived from `<meta name="cover">`.
    pub fn cover_image(&self) -> Option<&ManifestItem> {
        self.items.iter().find(|item| item.is_cover_image())
    }

    /// The EPUB 3 navigation document.
    pub fn nav(&self) -> Option<&ManifestItem> {
        self.items.iter().find(|item| item.is_nav())
    }

    /// The EPUB 2 NCX document.
    pub fn ncx(&self) -> Option<&ManifestItem> {
        self.items.iter().find(|item| item.is_ncx())
    }
}
