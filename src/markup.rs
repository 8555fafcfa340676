//! A lightweight owned markup tree.
//!
//! Package documents, navigation documents and chapters are parsed into a
//! [`Document`] once and walked as many times as needed. The builder is
//! deliberately forgiving: HTML void elements without a closing slash,
//! mismatched end tags and unknown entities do not abort parsing.

use crate::parser::ParserResult;
use crate::parser::xml::{self, XmlElement, XmlReader};
use crate::util::str::has_token;
use quick_xml::events::{BytesStart, Event};

/// Elements that never have content in HTML, even when written as `<br>`.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// A parsed markup document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    children: Vec<Node>,
}

/// A node within a [`Document`].
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    /// Text with all character references resolved.
    Text(String),
}

/// A single name/value attribute pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    pub(crate) fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The qualified attribute name as authored (e.g. `epub:type`, `xml:lang`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An element with its attributes and children.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Document {
    /// Parses `text` into a tree.
    ///
    /// # Errors
    /// [`FormatError::Unparsable`](crate::ebook::errors::FormatError::Unparsable)
    /// when the text is too malformed to tokenize.
    pub fn parse(text: &str) -> ParserResult<Self> {
        TreeBuilder::default().build(text)
    }

    /// Top-level nodes of the document.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The first top-level element.
    pub fn root(&self) -> Option<&Element> {
        self.children.iter().find_map(Node::as_element)
    }

    /// Every element in document (pre-)order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(&self.children)
    }

    /// The first element whose local name equals `local_name`.
    pub fn find(&self, local_name: &str) -> Option<&Element> {
        self.descendants().find(|el| el.is_local_name(local_name))
    }

    /// The `<body>` element, if present.
    pub fn body(&self) -> Option<&Element> {
        self.find("body")
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }
}

impl Element {
    pub(crate) fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
            children: Vec::new(),
        }
    }

    /// The qualified name as authored (e.g. `dc:title`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    /// The namespace prefix, if any (`dc` for `dc:title`).
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    pub fn is_local_name(&self, local_name: &str) -> bool {
        self.local_name().eq_ignore_ascii_case(local_name)
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// The value of the attribute named `name` (qualified, as authored).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(Attribute::value)
    }

    /// The value of the first attribute whose *local* name equals `local_name`.
    ///
    /// Useful where the same attribute appears with different prefixes
    /// across documents (`href` / `xlink:href`).
    pub fn attr_local(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| {
                let name = attribute.name.as_str();
                name.rsplit_once(':').map_or(name, |(_, local)| local) == local_name
            })
            .map(Attribute::value)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// `true` if the whitespace-separated attribute `name` contains `token`.
    pub fn has_token(&self, name: &str, token: &str) -> bool {
        self.attr(name).is_some_and(|value| has_token(value, token))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.has_token("class", class)
    }

    /// `true` if any class name contains `needle` (case-insensitive).
    pub fn class_contains(&self, needle: &str) -> bool {
        let needle = needle.to_ascii_lowercase();
        self.attr("class").is_some_and(|classes| {
            classes
                .split_ascii_whitespace()
                .any(|class| class.to_ascii_lowercase().contains(&needle))
        })
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Every descendant element in document (pre-)order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(&self.children)
    }

    /// The first descendant element whose local name equals `local_name`.
    pub fn find(&self, local_name: &str) -> Option<&Element> {
        self.descendants().find(|el| el.is_local_name(local_name))
    }

    /// Concatenated descendant text.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }

    /// Descendant text with whitespace runs collapsed and ends trimmed.
    pub fn normalized_text(&self) -> String {
        self.text_content()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn collect_text(nodes: &[Node], text: &mut String) {
    for node in nodes {
        match node {
            Node::Text(value) => text.push_str(value),
            Node::Element(el) => collect_text(&el.children, text),
        }
    }
}

/// Pre-order iterator over elements.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Descendants<'a> {
    fn new(nodes: &'a [Node]) -> Self {
        Self {
            stack: vec![nodes.iter()],
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(iter) = self.stack.last_mut() {
            match iter.next() {
                Some(Node::Element(el)) => {
                    self.stack.push(el.children.iter());
                    return Some(el);
                }
                Some(Node::Text(_)) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

#[derive(Default)]
struct TreeBuilder {
    /// Open elements; index `0` is a synthetic container for top-level nodes.
    stack: Vec<Element>,
}

impl TreeBuilder {
    fn build(mut self, text: &str) -> ParserResult<Document> {
        let mut reader = XmlReader::from_str(text);
        self.stack.push(Element::new("", Vec::new()));

        while let Some(event) = reader.next() {
            match event? {
                Event::Start(el) => {
                    let element = Self::element(&el);
                    if is_void(element.local_name()) {
                        self.append(Node::Element(element));
                    } else {
                        self.stack.push(element);
                    }
                }
                Event::Empty(el) => self.append(Node::Element(Self::element(&el))),
                Event::End(el) => {
                    let name = String::from_utf8_lossy(el.name().into_inner()).into_owned();
                    self.close(&name);
                }
                Event::Text(text) => self.append_text(&String::from_utf8_lossy(text.as_ref())),
                Event::CData(cdata) => self.append_text(&String::from_utf8_lossy(cdata.as_ref())),
                Event::GeneralRef(reference) => {
                    let entity = String::from_utf8_lossy(reference.as_ref());
                    match xml::resolve_entity(&entity) {
                        Some(resolved) => self.append_text(&resolved),
                        None => self.append_text(&format!("&{entity};")),
                    }
                }
                _ => {}
            }
        }

        // Close anything left open by truncated markup
        while self.stack.len() > 1 {
            self.pop();
        }
        let root = self.stack.pop().unwrap_or_else(|| Element::new("", Vec::new()));

        Ok(Document {
            children: root.children,
        })
    }

    fn element(el: &BytesStart) -> Element {
        let attributes = el
            .attribute_pairs()
            .into_iter()
            .map(|(name, value)| Attribute::new(name, value))
            .collect();

        Element::new(el.name_str(), attributes)
    }

    fn append(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(parent) = self.stack.last_mut() {
            match parent.children.last_mut() {
                Some(Node::Text(previous)) => previous.push_str(text),
                _ => parent.children.push(Node::Text(text.to_owned())),
            }
        }
    }

    fn close(&mut self, name: &str) {
        // Stray end tags (including `</br>`) are ignored
        let Some(index) = self.stack.iter().rposition(|el| el.name == name) else {
            return;
        };
        if index == 0 {
            return;
        }
        while self.stack.len() > index {
            self.pop();
        }
    }

    fn pop(&mut self) {
        if let Some(el) = self.stack.pop() {
            self.append(Node::Element(el));
        }
    }
}

fn is_void(local_name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(local_name))
}
