// General
pub(crate) const ID: &str = "id";
pub(crate) const HREF: &str = "href";
pub(crate) const SRC: &str = "src";

// Paths
pub(crate) const CONTAINER: &str = "META-INF/container.xml";

// Container
pub(crate) const ROOT_FILE: &str = "rootfile";
pub(crate) const FULL_PATH: &str = "full-path";

// Package elements
pub(crate) const PACKAGE: &str = "package";
pub(crate) const METADATA: &str = "metadata";
pub(crate) const MANIFEST: &str = "manifest";
pub(crate) const SPINE: &str = "spine";
pub(crate) const ITEM: &str = "item";
pub(crate) const ITEMREF: &str = "itemref";
pub(crate) const META: &str = "meta";
pub(crate) const DC_NAMESPACE: &str = "dc";
pub(crate) const DC_NAMESPACE_URI: &str = "http://purl.org/dc/elements/1.1/";

// Package attributes
pub(crate) const VERSION: &str = "version";
pub(crate) const UNIQUE_ID: &str = "unique-identifier";

// Metadata
pub(crate) const TITLE: &str = "title";
pub(crate) const CREATOR: &str = "creator";
pub(crate) const LANGUAGE: &str = "language";
pub(crate) const COVER: &str = "cover";
pub(crate) const PROPERTY: &str = "property";
pub(crate) const NAME: &str = "name";
pub(crate) const CONTENT: &str = "content";
pub(crate) const REFINES: &str = "refines";

// Manifest attributes
pub(crate) const MEDIA_TYPE: &str = "media-type";
pub(crate) const PROPERTIES: &str = "properties";
pub(crate) const COVER_IMAGE: &str = "cover-image";
pub(crate) const NAV_PROPERTY: &str = "nav";

// Spine attributes
pub(crate) const IDREF: &str = "idref";
pub(crate) const LINEAR: &str = "linear";
pub(crate) const PAGE_PROGRESSION_DIRECTION: &str = "page-progression-direction";

// Toc
pub(crate) const EPUB_TYPE: &str = "epub:type";
pub(crate) const TOC_TYPE: &str = "toc";
pub(crate) const NAV: &str = "nav";
pub(crate) const ORDERED_LIST: &str = "ol";
pub(crate) const LIST_ITEM: &str = "li";
pub(crate) const ANCHOR: &str = "a";
pub(crate) const NAV_MAP: &str = "navMap"; // NCX
pub(crate) const NAV_POINT: &str = "navPoint"; // NCX
pub(crate) const NAV_LABEL: &str = "navLabel"; // NCX
pub(crate) const DOC_TITLE: &str = "docTitle"; // NCX
pub(crate) const NCX_CONTENT: &str = "content"; // NCX
pub(crate) const NCX_EXTENSION: &str = "ncx";

// Media types
pub(crate) const NCX_TYPE: &str = "application/x-dtbncx+xml";
pub(crate) const OEBPS_PACKAGE_TYPE: &str = "application/oebps-package+xml";

// Spine `toc` attribute (EPUB 2)
pub(crate) const SPINE_TOC: &str = "toc";
pub(crate) const ROLE: &str = "role";
pub(crate) const DOC_TOC_ROLE: &str = "doc-toc";
pub(crate) const UNORDERED_LIST: &str = "ul";
