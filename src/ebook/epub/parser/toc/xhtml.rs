use crate::ebook::epub::consts;
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::toc::FlatNavItem;
use crate::markup::{Document, Element, Node};
use crate::parser::ParserResult;

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

impl EpubParser<'_> {
    pub(super) fn parse_nav(document: &Document) -> ParserResult<(Option<String>, Vec<FlatNavItem>)> {
        let navs: Vec<_> = document
            .descendants()
            .filter(|el| el.is_local_name(consts::NAV))
            .collect();

        // A navigation document may also hold `landmarks` and `page-list` navs
        let nav = navs
            .iter()
            .find(|nav| {
                nav.has_token(consts::EPUB_TYPE, consts::TOC_TYPE)
                    || nav.has_token(consts::ROLE, consts::DOC_TOC_ROLE)
            })
            .or_else(|| navs.first())
            .ok_or(EpubError::MissingToc)?;

        let title = nav
            .elements()
            .find(|el| HEADINGS.iter().any(|h| el.is_local_name(h)))
            .map(Element::normalized_text)
            .filter(|title| !title.is_empty());

        let mut items = Vec::new();
        if let Some(list) = nav.descendants().find(|el| is_list(el)) {
            flatten_list(list, 0, &mut items);
        }
        Ok((title, items))
    }
}

fn is_list(el: &Element) -> bool {
    el.is_local_name(consts::ORDERED_LIST) || el.is_local_name(consts::UNORDERED_LIST)
}

fn flatten_list(list: &Element, level: usize, items: &mut Vec<FlatNavItem>) {
    for li in list
        .elements()
        .filter(|el| el.is_local_name(consts::LIST_ITEM))
    {
        let (label, href) = match find_link(li) {
            Some(link) => (
                link_label(link),
                link.attr(consts::HREF).unwrap_or_default().trim().to_owned(),
            ),
            // Grouping header (`<span>`) without a link
            None => (own_text(li), String::new()),
        };

        items.push(FlatNavItem { label, href, level });

        // Children directly follow their parent
        for nested in li.elements().filter(|el| is_list(el)) {
            flatten_list(nested, level + 1, items);
        }
    }
}

/// The first `<a>` belonging to `li` itself, not to a nested list.
fn find_link(el: &Element) -> Option<&Element> {
    el.elements().filter(|child| !is_list(child)).find_map(|child| {
        if child.is_local_name(consts::ANCHOR) {
            Some(child)
        } else {
            find_link(child)
        }
    })
}

fn link_label(link: &Element) -> String {
    let label = link.normalized_text();

    if label.is_empty() {
        link.attr("title").unwrap_or_default().trim().to_owned()
    } else {
        label
    }
}

/// Text of `li` excluding nested lists.
fn own_text(li: &Element) -> String {
    let mut text = String::new();

    for child in li.children() {
        match child {
            Node::Text(value) => text.push_str(value),
            Node::Element(el) if !is_list(el) => {
                text.push(' ');
                text.push_str(&el.text_content());
            }
            Node::Element(_) => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
