use crate::ebook::epub::consts;
use crate::ebook::epub::metadata::{DcProperty, EpubMetadata, MetaEntry};
use crate::ebook::epub::parser::EpubParser;
use crate::markup::Element;
use std::collections::HashSet;

/// A `<meta refines="#id">` awaiting its target.
///
/// Refinements may precede the record they refine, so they are only
/// attached after the whole metadata section is read.
struct PendingRefinement {
    target: String,
    property: String,
    value: String,
}

impl EpubParser<'_> {
    pub(super) fn parse_metadata(package: Option<&Element>, metadata_el: &Element) -> EpubMetadata {
        let version = package
            .and_then(|package| package.attr(consts::VERSION))
            .unwrap_or_default();
        let unique_id = package
            .and_then(|package| package.attr(consts::UNIQUE_ID))
            .map(|id| id.trim().to_owned());
        let dc_prefixes = Self::dublin_core_prefixes(package, metadata_el);

        let mut metadata = EpubMetadata::new(version.trim().to_owned(), unique_id);
        let mut pending = Vec::new();

        for el in metadata_el.descendants() {
            if Self::is_dublin_core(el, &dc_prefixes) {
                metadata.push_property(DcProperty {
                    name: el.local_name().to_ascii_lowercase(),
                    value: el.normalized_text(),
                    attributes: el.attributes().to_vec(),
                    refinements: Default::default(),
                });
            } else if el.is_local_name(consts::META) {
                // EPUB 3 metas carry text content; EPUB 2 metas a `content` attribute
                let value = el
                    .attr(consts::CONTENT)
                    .map(|content| content.trim().to_owned())
                    .unwrap_or_else(|| el.normalized_text());

                match (el.attr(consts::REFINES), el.attr(consts::PROPERTY)) {
                    (Some(target), Some(property)) => pending.push(PendingRefinement {
                        target: target.to_owned(),
                        property: property.trim().to_ascii_lowercase(),
                        value,
                    }),
                    (None, property) => {
                        if let Some(property) = property.or_else(|| el.attr(consts::NAME)) {
                            metadata.push_meta(MetaEntry {
                                property: property.trim().to_owned(),
                                value,
                                attributes: el.attributes().to_vec(),
                            });
                        }
                    }
                    (Some(_), None) => {}
                }
            }
        }

        for PendingRefinement {
            target,
            property,
            value,
        } in pending
        {
            // Vendor-specific or dangling targets are common; drop them
            if !metadata.refine(&target, property.clone(), value) {
                tracing::debug!(%target, %property, "discarding unresolvable refinement");
            }
        }
        metadata
    }

    /// Prefixes bound to the Dublin Core namespace, always including `dc`.
    fn dublin_core_prefixes(package: Option<&Element>, metadata: &Element) -> HashSet<String> {
        let mut prefixes = HashSet::from([String::from(consts::DC_NAMESPACE)]);

        for el in package.into_iter().chain([metadata]) {
            prefixes.extend(el.attributes().iter().filter_map(|attribute| {
                let prefix = attribute.name().strip_prefix("xmlns:")?;
                (attribute.value().trim() == consts::DC_NAMESPACE_URI).then(|| prefix.to_owned())
            }));
        }
        prefixes
    }

    fn is_dublin_core(el: &Element, prefixes: &HashSet<String>) -> bool {
        match el.prefix() {
            Some(prefix) => prefixes.contains(prefix),
            None => el.attr("xmlns").is_some_and(|ns| ns.trim() == consts::DC_NAMESPACE_URI),
        }
    }
}
