//! Byte-span edits over chapter text and the scanners that locate them.
//!
//! Only the spans that change are rewritten; everything else, including
//! character references and formatting, is copied through verbatim.

use crate::util::str::has_token;
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

/// Tags whose attributes may reference an asset.
static ASSET_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(link|img|image)\b((?:[^>\x22']|\x22[^\x22]*\x22|'[^']*')*)>").unwrap());

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>(.*?)</style\s*>").unwrap());

/// A set of non-overlapping replacements applied in a single pass.
#[derive(Debug, Default)]
pub(super) struct TextPatch {
    edits: Vec<(Range<usize>, String)>,
}

impl TextPatch {
    pub(super) fn replace(&mut self, range: Range<usize>, replacement: impl Into<String>) {
        self.edits.push((range, replacement.into()));
    }

    pub(super) fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Applies every edit to `source`.
    ///
    /// Edits are ordered by position; an edit overlapping an earlier one
    /// is skipped.
    pub(super) fn apply(mut self, source: &str) -> String {
        self.edits.sort_by_key(|(range, _)| range.start);

        let mut output = String::with_capacity(source.len());
        let mut cursor = 0;

        for (range, replacement) in self.edits {
            if range.start < cursor {
                continue;
            }
            output.push_str(&source[cursor..range.start]);
            output.push_str(&replacement);
            cursor = range.end;
        }
        output.push_str(&source[cursor..]);
        output
    }
}

/// An attribute value located within the source text.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct AttributeSpan<'a> {
    pub(super) name: &'a str,
    /// The raw (still entity-escaped) value.
    pub(super) raw: &'a str,
    /// Byte range of the value, excluding quotes.
    pub(super) range: Range<usize>,
}

impl AttributeSpan<'_> {
    /// The value with character references resolved.
    pub(super) fn value(&self) -> Cow<'_, str> {
        quick_xml::escape::unescape(self.raw).unwrap_or(Cow::Borrowed(self.raw))
    }
}

/// A `<link>`, `<img>` or `<image>` start tag.
#[derive(Debug)]
pub(super) struct AssetTag<'a> {
    /// Lower-cased tag name.
    pub(super) name: String,
    /// Byte range of the whole tag.
    pub(super) range: Range<usize>,
    pub(super) attributes: Vec<AttributeSpan<'a>>,
}

impl<'a> AssetTag<'a> {
    pub(super) fn attribute(&self, name: &str) -> Option<&AttributeSpan<'a>> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name.eq_ignore_ascii_case(name))
    }

    /// `true` for `<link rel="stylesheet">`.
    pub(super) fn is_stylesheet(&self) -> bool {
        self.name == "link"
            && self
                .attribute("rel")
                .is_some_and(|rel| has_token(&rel.raw.to_ascii_lowercase(), "stylesheet"))
    }

    /// The attribute holding an image reference (`src`, `href` or `xlink:href`).
    pub(super) fn image_source(&self) -> Option<&AttributeSpan<'a>> {
        match self.name.as_str() {
            "img" => self.attribute("src"),
            "image" => self
                .attribute("href")
                .or_else(|| self.attribute("xlink:href")),
            _ => None,
        }
    }
}

/// Every asset-bearing start tag in `html`, in document order.
pub(super) fn asset_tags(html: &str) -> Vec<AssetTag<'_>> {
    ASSET_TAG
        .captures_iter(html)
        .filter_map(|caps| {
            let tag = caps.get(0)?;
            let attributes = caps.get(2)?;

            Some(AssetTag {
                name: caps.get(1)?.as_str().to_ascii_lowercase(),
                range: tag.range(),
                attributes: scan_attributes(html, attributes.range()),
            })
        })
        .collect()
}

/// The content range of every `<style>` block in `html`.
pub(super) fn style_blocks(html: &str) -> Vec<Range<usize>> {
    STYLE_BLOCK
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|content| content.range()))
        .collect()
}

fn scan_attributes(html: &str, within: Range<usize>) -> Vec<AttributeSpan<'_>> {
    let offset = within.start;

    ATTRIBUTE
        .captures_iter(&html[within])
        .filter_map(|caps| {
            let name = caps.get(1)?;
            let value = caps.get(2).or_else(|| caps.get(3))?;
            let range = offset + value.start()..offset + value.end();

            Some(AttributeSpan {
                name: name.as_str(),
                raw: &html[range.clone()],
                range,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"<html><head>
<link rel="stylesheet" type="text/css" href="../styles/main.css"/>
<LINK REL='alternate stylesheet' HREF='alt.css'>
<link rel="icon" href="icon.png"/>
<style>p { background: url(bg.png) }</style>
</head><body>
<img alt="a > b" src="../images/a&amp;b.png"/>
<svg><image width="10" xlink:href="../images/c.svg"/></svg>
</body></html>"#;

    #[test]
    fn test_asset_tags() {
        let tags = asset_tags(HTML);
        let names: Vec<_> = tags.iter().map(|tag| tag.name.as_str()).collect();
        assert_eq!(vec!["link", "link", "link", "img", "image"], names);

        let stylesheets: Vec<_> = tags.iter().filter(|tag| tag.is_stylesheet()).collect();
        assert_eq!(2, stylesheets.len());
        assert_eq!("alt.css", stylesheets[1].attribute("href").unwrap().raw);

        // Quoted `>` does not end the tag
        let img = tags[3].image_source().unwrap();
        assert_eq!("../images/a&amp;b.png", img.raw);
        assert_eq!("../images/a&b.png", img.value());
        assert_eq!(img.raw, &HTML[img.range.clone()]);

        assert_eq!("../images/c.svg", tags[4].image_source().unwrap().raw);
    }

    #[test]
    fn test_style_blocks() {
        let blocks = style_blocks(HTML);

        assert_eq!(1, blocks.len());
        assert_eq!("p { background: url(bg.png) }", &HTML[blocks[0].clone()]);
    }

    #[test]
    fn test_apply_patch() {
        let source = "0123456789";
        let mut patch = TextPatch::default();
        patch.replace(6..8, "x");
        patch.replace(1..3, "abc");
        // Overlaps the first edit
        patch.replace(2..4, "!");

        assert_eq!("0abc345x89", patch.apply(source));
        assert_eq!(source, TextPatch::default().apply(source));
    }
}
