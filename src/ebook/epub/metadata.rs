//! EPUB package metadata: Dublin Core properties and their refinements.

use crate::markup::Attribute;
use indexmap::IndexMap;
use std::collections::HashMap;

/// The EPUB version declared by the package `version` attribute.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EpubVersion {
    Epub2,
    /// Also assumed when the declared version is absent or unrecognized.
    #[default]
    Epub3,
}

impl EpubVersion {
    pub(crate) fn from_raw(raw: &str) -> Self {
        match raw.trim().split('.').next() {
            Some("2") => Self::Epub2,
            _ => Self::Epub3,
        }
    }

    pub fn is_epub2(&self) -> bool {
        matches!(self, Self::Epub2)
    }

    pub fn is_epub3(&self) -> bool {
        matches!(self, Self::Epub3)
    }
}

/// A Dublin Core metadata record (`<dc:title>`, `<dc:creator>`, ...).
///
/// Refinements attached through `<meta refines="#id" property="...">`
/// are grouped by their (lower-cased) property, in document order.
#[derive(Clone, Debug, PartialEq)]
pub struct DcProperty {
    pub(crate) name: String,
    pub(crate) value: String,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) refinements: IndexMap<String, Vec<String>>,
}

impl DcProperty {
    /// The lower-cased local name (`title` for `<dc:title>`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The `id` attribute, if present.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Every XML attribute on the element, including `id`.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name() == name)
            .map(Attribute::value)
    }

    /// All refinements keyed by property (e.g. `file-as`, `role`).
    pub fn refinements(&self) -> &IndexMap<String, Vec<String>> {
        &self.refinements
    }

    /// The first refinement value for `property`.
    ///
    /// EPUB 2 `opf:*` attributes (e.g. `opf:file-as`) are consulted when no
    /// refinement exists.
    pub fn refinement(&self, property: &str) -> Option<&str> {
        let property = property.to_ascii_lowercase();

        self.refinements
            .get(&property)
            .and_then(|values| values.first())
            .map(String::as_str)
            .or_else(|| self.attr(&format!("opf:{property}")))
    }
}

/// A `<meta>` element that does not refine another record,
/// such as `dcterms:modified` or the EPUB 2 `cover` meta.
#[derive(Clone, Debug, PartialEq)]
pub struct MetaEntry {
    pub(crate) property: String,
    pub(crate) value: String,
    pub(crate) attributes: Vec<Attribute>,
}

impl MetaEntry {
    /// The `property` (EPUB 3) or `name` (EPUB 2) attribute value.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The text content (EPUB 3) or `content` attribute value (EPUB 2).
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

/// Package metadata.
///
/// Records are indexed two ways: by normalized (lower-cased) name, and by
/// `id` for refinement targets.
///
/// # Examples
/// - Case-insensitive lookups:
/// ```no_run
/// # use folio::Epub;
/// # fn main() -> folio::errors::EbookResult<()> {
/// let epub = Epub::open("book.epub")?;
/// let metadata = epub.metadata();
///
/// assert_eq!(metadata.get_text("Title"), metadata.get_text("title"));
/// println!("file-as: {:?}", metadata.creators().next().and_then(|c| c.refinement("file-as")));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubMetadata {
    version: EpubVersion,
    version_raw: String,
    unique_id: Option<String>,
    properties: Vec<DcProperty>,
    by_name: IndexMap<String, Vec<usize>>,
    by_id: HashMap<String, usize>,
    metas: Vec<MetaEntry>,
}

impl EpubMetadata {
    pub(crate) fn new(version_raw: String, unique_id: Option<String>) -> Self {
        Self {
            version: EpubVersion::from_raw(&version_raw),
            version_raw,
            unique_id,
            ..Self::default()
        }
    }

    pub(crate) fn push_property(&mut self, property: DcProperty) {
        let index = self.properties.len();

        if let Some(id) = property.id() {
            // The first record claiming an id keeps it
            self.by_id.entry(id.to_owned()).or_insert(index);
        }
        self.by_name
            .entry(property.name.clone())
            .or_default()
            .push(index);
        self.properties.push(property);
    }

    pub(crate) fn push_meta(&mut self, meta: MetaEntry) {
        self.metas.push(meta);
    }

    /// Attaches a refinement to the record with the given `#id`.
    ///
    /// Returns `false` (and attaches nothing) if no record carries that id.
    pub(crate) fn refine(&mut self, target: &str, property: String, value: String) -> bool {
        let Some(&index) = self.by_id.get(normalize_id(target)) else {
            return false;
        };
        self.properties[index]
            .refinements
            .entry(property)
            .or_default()
            .push(value);
        true
    }

    pub fn version(&self) -> EpubVersion {
        self.version
    }

    /// The `version` attribute as authored (e.g. `3.0`).
    pub fn version_str(&self) -> &str {
        &self.version_raw
    }

    /// The first record named `name` (case-insensitive; a `dc:` prefix is optional).
    pub fn get(&self, name: &str) -> Option<&DcProperty> {
        self.get_all(name).next()
    }

    /// Every record named `name`, in document order.
    pub fn get_all(&self, name: &str) -> impl Iterator<Item = &DcProperty> + '_ {
        self.by_name
            .get(&normalize_name(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&index| &self.properties[index])
    }

    /// The value of the first record named `name`, or an empty string.
    pub fn get_text(&self, name: &str) -> &str {
        self.get(name).map_or("", DcProperty::value)
    }

    /// The record carrying `id` (with or without a leading `#`).
    pub fn by_id(&self, id: &str) -> Option<&DcProperty> {
        self.by_id
            .get(normalize_id(id))
            .map(|&index| &self.properties[index])
    }

    /// Every Dublin Core record, in document order.
    pub fn properties(&self) -> &[DcProperty] {
        &self.properties
    }

    /// The first non-refining `<meta>` with the given property/name.
    pub fn meta(&self, property: &str) -> Option<&MetaEntry> {
        self.metas
            .iter()
            .find(|meta| meta.property.eq_ignore_ascii_case(property))
    }

    pub fn metas(&self) -> &[MetaEntry] {
        &self.metas
    }

    /// The main title.
    ///
    /// For EPUB 3, a title refined with `title-type` `main` is preferred.
    pub fn title(&self) -> Option<&DcProperty> {
        self.get_all(super::consts::TITLE)
            .find(|title| title.refinement("title-type") == Some("main"))
            .or_else(|| self.get(super::consts::TITLE))
    }

    pub fn creators(&self) -> impl Iterator<Item = &DcProperty> + '_ {
        self.get_all(super::consts::CREATOR)
    }

    pub fn language(&self) -> Option<&DcProperty> {
        self.get(super::consts::LANGUAGE)
    }

    /// The identifier referenced by the package `unique-identifier`,
    /// falling back to the first `dc:identifier`.
    pub fn identifier(&self) -> Option<&DcProperty> {
        self.unique_id
            .as_deref()
            .and_then(|id| self.by_id(id))
            .filter(|property| property.name == "identifier")
            .or_else(|| self.get("identifier"))
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.trim();
    let local = name.rsplit_once(':').map_or(name, |(_, local)| local);
    local.to_ascii_lowercase()
}

fn normalize_id(id: &str) -> &str {
    id.trim().trim_start_matches('#')
}
