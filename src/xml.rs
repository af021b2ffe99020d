//! Namespace-aware XML tree parsing.
//!
//! Parts are read into a small owned tree of [`XmlElement`]s and text nodes.
//! Namespace URIs are resolved once, at parse time: an element or attribute in
//! a namespace listed in the caller's [`NamespaceMap`] is named
//! `prefix:local`, one in any other namespace is named `{uri}local`, and one
//! with no namespace keeps its bare local name.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::{Error, Result};
use crate::package::decode_xml_bytes;

/// Mapping from namespace URI to the prefix used in resolved names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    prefixes: HashMap<String, String>,
}

impl NamespaceMap {
    /// Create an empty mapping. Every namespaced name renders as `{uri}local`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prefix for a namespace URI.
    pub fn with(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.insert(prefix, uri);
        self
    }

    /// Add a prefix for a namespace URI, replacing any earlier prefix for it.
    pub fn insert(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.prefixes.insert(uri.into(), prefix.into());
    }

    /// Get the prefix mapped to a namespace URI.
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.prefixes.get(uri).map(String::as_str)
    }

    /// Build the resolved name of `local` in namespace `uri`.
    pub fn qualify(&self, uri: Option<&str>, local: &str) -> String {
        match uri {
            None => local.to_string(),
            Some(uri) => match self.prefix_for(uri) {
                Some(prefix) => format!("{}:{}", prefix, local),
                None => format!("{{{}}}{}", uri, local),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl<P: Into<String>, U: Into<String>> FromIterator<(P, U)> for NamespaceMap {
    /// Collect `(prefix, uri)` pairs.
    fn from_iter<I: IntoIterator<Item = (P, U)>>(iter: I) -> Self {
        let mut map = NamespaceMap::new();
        for (prefix, uri) in iter {
            map.insert(prefix, uri);
        }
        map
    }
}

/// A node of a parsed part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlNode {
    pub fn text(value: impl Into<String>) -> Self {
        XmlNode::Text(value.into())
    }

    /// Get the node as an element, if it is one.
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }
}

impl From<XmlElement> for XmlNode {
    fn from(element: XmlElement) -> Self {
        XmlNode::Element(element)
    }
}

/// An element with resolved name, resolved attribute names, and ordered children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: HashMap<String, String>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<XmlNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: Vec<XmlNode>) -> Self {
        self.children = children;
        self
    }

    /// Get an attribute value by resolved name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Iterate over the element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Find the first child element with the given resolved name.
    pub fn find_child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|child| child.name == name)
    }

    /// Iterate over all child elements with the given resolved name.
    pub fn find_children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.child_elements().filter(move |child| child.name == name)
    }

    /// Concatenate all descendant text.
    pub fn inner_text(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }
}

fn collect_text(nodes: &[XmlNode], out: &mut String) {
    for node in nodes {
        match node {
            XmlNode::Text(value) => out.push_str(value),
            XmlNode::Element(element) => collect_text(&element.children, out),
        }
    }
}

/// Parse XML bytes into an element tree.
///
/// Fails with [`Error::XmlParse`] when the bytes are not well-formed:
/// mismatched or unclosed tags, an unbound namespace prefix, or no root element.
pub fn parse_xml(bytes: &[u8], namespaces: &NamespaceMap) -> Result<XmlElement> {
    let content = decode_xml_bytes(bytes)?;
    let mut reader = NsReader::from_str(&content);

    // Elements opened but not yet closed, innermost last.
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let element = open_element(&reader, e, namespaces)?;
                stack.push(element);
            }
            Event::Empty(ref e) => {
                let element = open_element(&reader, e, namespaces)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::End(ref e) => {
                let element = stack.pop().ok_or_else(|| {
                    Error::XmlParse(format!(
                        "unexpected closing tag: {}",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Text(ref e) => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::XmlParse(err.to_string()))?;
                append_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                append_text(&mut stack, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::XmlParse(format!("unclosed element: {}", open.name)));
    }
    root.ok_or_else(|| Error::XmlParse("document has no root element".to_string()))
}

fn open_element(
    reader: &NsReader<&[u8]>,
    start: &BytesStart,
    namespaces: &NamespaceMap,
) -> Result<XmlElement> {
    let (ns, local) = reader.resolve_element(start.name());
    let name = resolved_name(ns, local.as_ref(), namespaces)?;

    let mut attributes = HashMap::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| Error::XmlParse(err.to_string()))?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attr.key);
        let key = resolved_name(ns, local.as_ref(), namespaces)?;
        let value = attr
            .unescape_value()
            .map_err(|err| Error::XmlParse(err.to_string()))?
            .into_owned();
        attributes.insert(key, value);
    }

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn resolved_name(ns: ResolveResult, local: &[u8], namespaces: &NamespaceMap) -> Result<String> {
    let local = String::from_utf8_lossy(local);
    match ns {
        ResolveResult::Bound(Namespace(uri)) => {
            let uri = String::from_utf8_lossy(uri);
            Ok(namespaces.qualify(Some(&uri), &local))
        }
        ResolveResult::Unbound => Ok(local.into_owned()),
        ResolveResult::Unknown(prefix) => Err(Error::XmlParse(format!(
            "unknown namespace prefix: {}",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn close_element(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None if root.is_some() => {
            return Err(Error::XmlParse(format!(
                "multiple root elements: {}",
                element.name
            )));
        }
        None => *root = Some(element),
    }
    Ok(())
}

/// Append text to the innermost open element, merging with a preceding text node.
/// Text outside the root element is dropped.
fn append_text(stack: &mut [XmlElement], text: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if text.is_empty() {
        return;
    }
    match parent.children.last_mut() {
        Some(XmlNode::Text(existing)) => existing.push_str(text),
        _ => parent.children.push(XmlNode::text(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &[u8]) -> XmlElement {
        parse_xml(xml, &NamespaceMap::new()).unwrap()
    }

    #[test]
    fn test_self_closing_and_empty_element_are_identical() {
        assert_eq!(parse(b"<body/>"), XmlElement::new("body"));
        assert_eq!(parse(b"<body></body>"), XmlElement::new("body"));
    }

    #[test]
    fn test_attributes() {
        let xml = parse(b"<body name='bob'></body>");
        assert_eq!(xml, XmlElement::new("body").with_attribute("name", "bob"));
    }

    #[test]
    fn test_text_before_new_tag() {
        let xml = parse(b"<body>Hello!<br/></body>");
        assert_eq!(
            xml,
            XmlElement::new("body")
                .with_child(XmlNode::text("Hello!"))
                .with_child(XmlElement::new("br"))
        );
    }

    #[test]
    fn test_children_keep_order() {
        let xml = parse(b"<body><a/><b/></body>");
        assert_eq!(
            xml.children,
            vec![
                XmlNode::Element(XmlElement::new("a")),
                XmlNode::Element(XmlElement::new("b"))
            ]
        );
    }

    #[test]
    fn test_entities_and_cdata_merge_into_one_text_node() {
        let xml = parse(b"<t>a &amp; b<![CDATA[ <c>]]></t>");
        assert_eq!(xml.children, vec![XmlNode::text("a & b <c>")]);
    }

    #[test]
    fn test_unmapped_namespace_uses_braces() {
        let xml = parse(b"<w:body xmlns:w=\"word\"/>");
        assert_eq!(xml.name, "{word}body");
    }

    #[test]
    fn test_mapped_namespace_uses_prefix() {
        let namespaces: NamespaceMap = [("x", "word")].into_iter().collect();
        let xml = parse_xml(b"<w:body xmlns:w=\"word\"/>", &namespaces).unwrap();
        assert_eq!(xml.name, "x:body");
    }

    #[test]
    fn test_attribute_namespace_is_mapped() {
        let namespaces = NamespaceMap::new().with("x", "word");
        let xml = parse_xml(b"<w:body xmlns:w=\"word\" w:val=\"Hello!\"/>", &namespaces).unwrap();
        assert_eq!(xml.attribute("x:val"), Some("Hello!"));
        assert!(xml.attributes.keys().all(|k| !k.starts_with("xmlns")));
    }

    #[test]
    fn test_default_namespace_and_shadowing() {
        let namespaces = NamespaceMap::new().with("r", "rels");
        let xml = parse_xml(
            b"<Relationships xmlns=\"rels\"><a:Inner xmlns:a=\"other\"><Child xmlns=\"third\"/></a:Inner></Relationships>",
            &namespaces,
        )
        .unwrap();
        assert_eq!(xml.name, "r:Relationships");
        let inner = xml.find_child("{other}Inner").unwrap();
        assert_eq!(inner.child_elements().next().unwrap().name, "{third}Child");
    }

    #[test]
    fn test_whitespace_after_declaration_is_ignored() {
        let xml = parse(b"<?xml version=\"1.0\" ?>\n<body/>");
        assert_eq!(xml.name, "body");
        assert!(xml.children.is_empty());
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        let namespaces = NamespaceMap::new();
        assert!(matches!(
            parse_xml(b"<a><b></a>", &namespaces),
            Err(Error::XmlParse(_))
        ));
        assert!(matches!(
            parse_xml(b"<a>", &namespaces),
            Err(Error::XmlParse(_))
        ));
        assert!(matches!(parse_xml(b"   ", &namespaces), Err(Error::XmlParse(_))));
        assert!(matches!(
            parse_xml(b"<w:a/>", &namespaces),
            Err(Error::XmlParse(_))
        ));
        assert!(matches!(
            parse_xml(b"<a>\xC3\x28</a>", &namespaces),
            Err(Error::XmlParse(_))
        ));
    }

    #[test]
    fn test_find_child() {
        assert!(XmlElement::new("a").find_child("b").is_none());

        let xml = XmlElement::new("a").with_child(XmlElement::new("c"));
        assert!(xml.find_child("b").is_none());

        let xml = XmlElement::new("a")
            .with_child(XmlElement::new("b").with_attribute("id", "1"))
            .with_child(XmlElement::new("b").with_attribute("id", "2"));
        assert_eq!(xml.find_child("b").unwrap().attribute("id"), Some("1"));
        assert_eq!(xml.find_children("b").count(), 2);

        let xml = XmlElement::new("a").with_child(XmlNode::text("Hello!"));
        assert!(xml.find_child("b").is_none());
    }

    #[test]
    fn test_inner_text() {
        let xml = parse(b"<p>one <b>two</b> three</p>");
        assert_eq!(xml.inner_text(), "one two three");
    }
}
