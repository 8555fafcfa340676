use crate::ebook::epub::consts;
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::manifest::EpubManifest;
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::spine::{EpubSpine, PageDirection, SpineItem};
use crate::markup::Element;
use crate::parser::ParserResult;

impl EpubParser<'_> {
    pub(super) fn parse_spine(spine_el: &Element, manifest: &EpubManifest) -> ParserResult<EpubSpine> {
        let mut spine = EpubSpine {
            page_direction: spine_el
                .attr(consts::PAGE_PROGRESSION_DIRECTION)
                .map(PageDirection::from_raw)
                .unwrap_or_default(),
            toc_idref: spine_el
                .attr(consts::SPINE_TOC)
                .map(|idref| idref.trim().to_owned()),
            ..EpubSpine::default()
        };

        for el in spine_el
            .descendants()
            .filter(|el| el.is_local_name(consts::ITEMREF))
        {
            let idref = el.attr(consts::IDREF).unwrap_or_default().trim();
            let Some(item) = manifest.by_id(idref) else {
                return Err(EpubError::DanglingSpineReference(idref.to_owned()).into());
            };
            let linear = el
                .attr(consts::LINEAR)
                .is_none_or(|linear| !linear.trim().eq_ignore_ascii_case("no"));

            spine.chapter_paths.push(item.path().to_owned());
            spine.items.push(SpineItem {
                idref: idref.to_owned(),
                linear,
            });
        }
        Ok(spine)
    }
}
