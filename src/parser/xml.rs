use crate::ebook::errors::FormatError;
use crate::parser::ParserResult;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;

/// A lenient event reader over markup text.
///
/// Real-world chapter files are frequently not well-formed XML (unclosed
/// void elements, stray end tags, bare `&`), so name checks are disabled and
/// recovery is left to the consumer.
pub(crate) struct XmlReader<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> XmlReader<'a> {
    pub(crate) fn from_str(text: &'a str) -> Self {
        let mut reader = Reader::from_str(text);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.allow_dangling_amp = true;

        Self { reader }
    }

    /// Iterator-like method to read the next [`Event`].
    pub(crate) fn next(&mut self) -> Option<ParserResult<Event<'a>>> {
        match self.reader.read_event() {
            Ok(Event::Eof) => None,
            result => Some(result.map_err(|error| FormatError::Unparsable(Box::new(error)))),
        }
    }
}

pub(crate) trait XmlElement {
    /// The qualified element name as authored (e.g. `dc:title`).
    fn name_str(&self) -> Cow<'_, str>;

    /// All attributes in document order; malformed attributes are skipped.
    fn attribute_pairs(&self) -> Vec<(String, String)>;
}

impl XmlElement for BytesStart<'_> {
    fn name_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.name().into_inner())
    }

    fn attribute_pairs(&self) -> Vec<(String, String)> {
        self.html_attributes()
            .filter_map(Result::ok)
            .map(|attribute| {
                let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
                let raw = String::from_utf8_lossy(&attribute.value);
                (key, unescape(&raw).into_owned())
            })
            .collect()
    }
}

/// Unescapes character and entity references, keeping unknown entities verbatim.
pub(crate) fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }
    quick_xml::escape::unescape_with(raw, named_entity).unwrap_or(Cow::Borrowed(raw))
}

/// Resolves the body of a general reference (`amp`, `#x2014`, `nbsp`, ...).
pub(crate) fn resolve_entity(entity: &str) -> Option<Cow<'static, str>> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .map(|c| Cow::Owned(c.to_string()));
    }
    if let Some(dec) = entity.strip_prefix('#') {
        return dec
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(|c| Cow::Owned(c.to_string()));
    }
    named_entity(entity).map(Cow::Borrowed)
}

/// XML's predefined entities plus the HTML named entities common in ebooks.
fn named_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "shy" => "\u{ad}",
        "zwj" => "\u{200d}",
        "zwnj" => "\u{200c}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "sbquo" => "\u{201a}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bdquo" => "\u{201e}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "lsaquo" => "\u{2039}",
        "rsaquo" => "\u{203a}",
        "middot" => "\u{b7}",
        "bull" => "\u{2022}",
        "dagger" => "\u{2020}",
        "Dagger" => "\u{2021}",
        "sect" => "\u{a7}",
        "para" => "\u{b6}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "deg" => "\u{b0}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "plusmn" => "\u{b1}",
        "frac12" => "\u{bd}",
        "frac14" => "\u{bc}",
        "frac34" => "\u{be}",
        "prime" => "\u{2032}",
        "Prime" => "\u{2033}",
        "iexcl" => "\u{a1}",
        "iquest" => "\u{bf}",
        "eacute" => "\u{e9}",
        "egrave" => "\u{e8}",
        "aacute" => "\u{e1}",
        "agrave" => "\u{e0}",
        "ouml" => "\u{f6}",
        "uuml" => "\u{fc}",
        "auml" => "\u{e4}",
        "ccedil" => "\u{e7}",
        "szlig" => "\u{df}",
        _ => return None,
    })
}
