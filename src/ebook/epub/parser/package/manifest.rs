use crate::ebook::epub::consts;
use crate::ebook::epub::manifest::{EpubManifest, ManifestItem};
use crate::ebook::epub::parser::EpubParser;
use crate::markup::Element;
use crate::util::uri;

impl EpubParser<'_> {
    pub(super) fn parse_manifest(manifest_el: &Element, package_dir: &str) -> EpubManifest {
        let mut manifest = EpubManifest::default();

        for el in manifest_el
            .descendants()
            .filter(|el| el.is_local_name(consts::ITEM))
        {
            let (Some(id), Some(href)) = (el.attr(consts::ID), el.attr(consts::HREF)) else {
                tracing::warn!(id = el.id(), "skipping manifest item without `id` or `href`");
                continue;
            };
            let id = id.trim();
            let href = href.trim();
            let resolved = uri::resolve(package_dir, uri::path(href));
            let path = uri::decode(resolved.trim_start_matches('/')).into_owned();

            let item = ManifestItem {
                id: id.to_owned(),
                href: href.to_owned(),
                path,
                media_type: el
                    .attr(consts::MEDIA_TYPE)
                    .unwrap_or_default()
                    .trim()
                    .to_ascii_lowercase(),
                properties: el
                    .attr(consts::PROPERTIES)
                    .unwrap_or_default()
                    .split_whitespace()
                    .map(String::from)
                    .collect(),
            };

            if !manifest.push(item) {
                tracing::warn!(%id, "ignoring duplicate manifest id");
            }
        }
        manifest
    }
}
