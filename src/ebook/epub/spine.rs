//! EPUB spine: the canonical reading order.

/// Reading direction declared by `page-progression-direction`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PageDirection {
    LeftToRight,
    RightToLeft,
    #[default]
    Default,
}

impl PageDirection {
    pub(crate) fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "ltr" => Self::LeftToRight,
            "rtl" => Self::RightToLeft,
            _ => Self::Default,
        }
    }
}

/// A spine `<itemref>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpineItem {
    pub(crate) idref: String,
    pub(crate) linear: bool,
}

impl SpineItem {
    /// The id of the referenced manifest item.
    pub fn idref(&self) -> &str {
        &self.idref
    }

    /// `false` only when the itemref declares `linear="no"`.
    pub fn is_linear(&self) -> bool {
        self.linear
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubSpine {
    pub(crate) items: Vec<SpineItem>,
    pub(crate) chapter_paths: Vec<String>,
    pub(crate) page_direction: PageDirection,
    /// EPUB 2 `toc` attribute pointing at the NCX manifest item.
    pub(crate) toc_idref: Option<String>,
}

impl EpubSpine {
    pub fn items(&self) -> &[SpineItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&SpineItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolved archive paths of each spine item, in reading order.
    ///
    /// The chapter index space used throughout the crate is the index
    /// into this list.
    pub fn chapter_paths(&self) -> &[String] {
        &self.chapter_paths
    }

    pub fn page_direction(&self) -> PageDirection {
        self.page_direction
    }

    pub fn toc_idref(&self) -> Option<&str> {
        self.toc_idref.as_deref()
    }
}
