//! Custom tokens left in Markdown output.
//!
//! Tokens use HTML syntax so that any CommonMark parser passes them through
//! untouched as inline HTML:
//! - `<epub-image href=".." alt=".." title=".." width=".." height=".."></epub-image>`
//! - `<epub-footnote href=".." id="..">label</epub-footnote>`
//! - `<a id=".."></a>` for preserved navigation targets
//!
//! Absent attributes are omitted.

use crate::markdown::escape::{escape_attribute, escape_text};
use crate::markdown::{FootnoteRef, ImageRef};

pub const IMAGE_TAG: &str = "epub-image";
pub const FOOTNOTE_TAG: &str = "epub-footnote";

pub(crate) fn image(image: &ImageRef) -> String {
    let mut token = format!("<{IMAGE_TAG}");

    push_attribute(&mut token, "href", Some(&image.href));
    push_attribute(&mut token, "alt", image.alt.as_deref());
    push_attribute(&mut token, "title", image.title.as_deref());
    push_attribute(&mut token, "width", image.width.as_deref());
    push_attribute(&mut token, "height", image.height.as_deref());

    token.push_str("></");
    token.push_str(IMAGE_TAG);
    token.push('>');
    token
}

pub(crate) fn footnote(footnote: &FootnoteRef) -> String {
    let mut token = format!("<{FOOTNOTE_TAG}");

    push_attribute(&mut token, "href", Some(&footnote.href));
    push_attribute(&mut token, "id", footnote.id.as_deref());

    token.push('>');
    token.push_str(&escape_text(&footnote.label));
    token.push_str("</");
    token.push_str(FOOTNOTE_TAG);
    token.push('>');
    token
}

pub(crate) fn anchor(id: &str) -> String {
    format!("<a id=\"{}\"></a>", escape_attribute(id))
}

fn push_attribute(token: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        token.push(' ');
        token.push_str(name);
        token.push_str("=\"");
        token.push_str(&escape_attribute(value));
        token.push('"');
    }
}
