use crate::markdown::ConversionSettings;
use crate::markup::{Document, Element};

/// Probes a chapter for its title.
///
/// In order: an explicit title role (`epub:type` `title`/`fulltitle`,
/// `role="doc-title"`), the first `h1`/`h2`, then a configured title class.
/// The first candidate with non-empty text wins.
pub(super) fn probe(document: &Document, settings: &ConversionSettings) -> Option<String> {
    let explicit = elements(document).filter(|el| {
        el.has_token("epub:type", "title")
            || el.has_token("epub:type", "fulltitle")
            || el.attr("role") == Some("doc-title")
    });
    let headings = elements(document)
        .filter(|el| el.is_local_name("h1") || el.is_local_name("h2"))
        .take(1);
    let classed = elements(document).filter(|el| {
        settings
            .title_classes
            .iter()
            .any(|class| el.has_class(class))
    });

    explicit
        .chain(headings)
        .chain(classed)
        .map(Element::normalized_text)
        .find(|text| !text.is_empty())
}

fn elements(document: &Document) -> Box<dyn Iterator<Item = &Element> + '_> {
    match document.body() {
        Some(body) => Box::new(body.descendants()),
        None => Box::new(document.descendants()),
    }
}
