use crate::ebook::epub::consts;
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::toc::FlatNavItem;
use crate::markup::{Document, Element};

impl EpubParser<'_> {
    pub(super) fn parse_ncx(document: &Document) -> (Option<String>, Vec<FlatNavItem>) {
        let title = document
            .find(consts::DOC_TITLE)
            .map(Element::normalized_text)
            .filter(|title| !title.is_empty());

        let mut items = Vec::new();
        if let Some(nav_map) = document.find(consts::NAV_MAP) {
            flatten_nav_points(nav_map, 0, &mut items);
        }
        (title, items)
    }
}

fn flatten_nav_points(parent: &Element, level: usize, items: &mut Vec<FlatNavItem>) {
    for point in parent
        .elements()
        .filter(|el| el.is_local_name(consts::NAV_POINT))
    {
        let label = point
            .elements()
            .find(|el| el.is_local_name(consts::NAV_LABEL))
            .map(Element::normalized_text)
            .unwrap_or_default();
        // NCX documents require content elements to have the src attribute
        let href = point
            .elements()
            .find(|el| el.is_local_name(consts::NCX_CONTENT))
            .and_then(|content| content.attr(consts::SRC))
            .unwrap_or_default()
            .trim()
            .to_owned();

        items.push(FlatNavItem { label, href, level });
        flatten_nav_points(point, level + 1, items);
    }
}
