//! In-memory XMI element tree.
//!
//! The reader keeps every element, its attributes and its children in
//! document order. Text content is dropped: the UML lookups only read
//! attributes.

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;
use std::path::Path;

use super::ExtractError;

/// One XML element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Qualified tag name as written (`uml:Model`, `packagedElement`).
    pub tag: String,
    /// Unescaped attribute values keyed by qualified name, in source order.
    pub attributes: IndexMap<String, String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Tag name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        self.tag.rsplit(':').next().unwrap_or(&self.tag)
    }

    /// Whether the local tag name equals `name`.
    pub fn is(&self, name: &str) -> bool {
        self.local_name() == name
    }

    /// Value of an attribute by its qualified name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// All nested elements (not including `self`) in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Nested elements with the given local tag name, in document order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.descendants().filter(move |e| e.is(name))
    }

    /// First nested element with the given local tag name.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.descendants().find(|e| e.is(name))
    }
}

/// Pre-order walk over an element subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// A parsed XMI document. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmiDocument {
    root: XmlElement,
}

impl XmiDocument {
    /// Read and parse an XMI file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| ExtractError::io(path, e))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read XMI file");
        Self::parse(&bytes)
    }

    /// Parse XMI from bytes.
    pub fn parse(input: &[u8]) -> Result<Self, ExtractError> {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut open: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    open.push(element_from_start(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(e)?;
                    attach(&mut open, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| ExtractError::xml("closing tag without opening tag"))?;
                    attach(&mut open, &mut root, element)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ExtractError::xml(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        if let Some(unclosed) = open.last() {
            return Err(ExtractError::xml(format!(
                "unexpected end of document: <{}> is not closed",
                unclosed.tag
            )));
        }

        let root = root.ok_or_else(|| ExtractError::xml("document has no root element"))?;
        tracing::trace!(root = %root.tag, "parsed XMI document");
        Ok(Self { root })
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Every element of the document, root first, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        std::iter::once(&self.root).chain(self.root.descendants())
    }
}

fn element_from_start(e: &BytesStart<'_>) -> Result<XmlElement, ExtractError> {
    let tag = std::str::from_utf8(e.name().as_ref())
        .map_err(|e| ExtractError::xml(format!("Invalid tag name: {e}")))?
        .to_string();
    let mut element = XmlElement::new(tag);

    for attr_result in e.attributes() {
        let attr =
            attr_result.map_err(|e| ExtractError::xml(format!("Attribute error: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| ExtractError::xml(format!("Attribute key error: {e}")))?;
        let raw = std::str::from_utf8(&attr.value)
            .map_err(|e| ExtractError::xml(format!("Attribute value error: {e}")))?;
        // Normalize before unescaping: escaped whitespace such as `&#xA;` is kept.
        let value = unescape(&normalize_attribute_whitespace(raw))
            .map_err(|e| ExtractError::xml(format!("Attribute value error: {e}")))?
            .into_owned();
        element.attributes.insert(key.to_string(), value);
    }

    Ok(element)
}

/// Attribute-value normalization from XML 1.0 §3.3.3: each literal tab,
/// newline or carriage return becomes a space, and `\r\n` counts once.
fn normalize_attribute_whitespace(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['\t', '\n', '\r']) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\t' | '\n' => out.push(' '),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Hang a finished element under the innermost open element, or make it the root.
fn attach(
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), ExtractError> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(ExtractError::xml(format!(
            "document has more than one root element (second is <{}>)",
            element.tag
        )));
    }
    *root = Some(element);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree_in_document_order() {
        let doc = XmiDocument::parse(
            br#"<?xml version="1.0" encoding="UTF-8"?>
<xmi:XMI xmlns:xmi="http://www.omg.org/spec/XMI/20131001">
  <uml:Model xmi:id="m" name="Root">
    <packagedElement xmi:id="a"/>
    <packagedElement xmi:id="b"><ownedAttribute xmi:id="b1"/></packagedElement>
    <packagedElement xmi:id="c"/>
  </uml:Model>
</xmi:XMI>"#,
        )
        .expect("parse");

        assert_eq!(doc.root().tag, "xmi:XMI");
        let ids: Vec<_> = doc.elements().filter_map(|e| e.attr("xmi:id")).collect();
        assert_eq!(ids, vec!["m", "a", "b", "b1", "c"]);
    }

    #[test]
    fn test_local_name_matching() {
        let prefixed = XmlElement::new("uml:packagedElement");
        let plain = XmlElement::new("packagedElement");
        assert!(prefixed.is("packagedElement"));
        assert!(plain.is("packagedElement"));
        assert_eq!(prefixed.local_name(), "packagedElement");
    }

    #[test]
    fn test_attribute_values_unescaped() {
        let doc = XmiDocument::parse(
            r#"<root><value symbol="Gare &amp; Quai &#233;st"/></root>"#.as_bytes(),
        )
        .expect("parse");
        let value = doc.root().find("value").expect("value");
        assert_eq!(value.attr("symbol"), Some("Gare & Quai ést"));
    }

    #[test]
    fn test_literal_whitespace_in_attributes_becomes_spaces() {
        let doc = XmiDocument::parse(
            b"<root><value symbol=\"North\n\tGate\" name=\"a\r\nb\"/></root>",
        )
        .expect("parse");
        let value = doc.root().find("value").expect("value");
        assert_eq!(value.attr("symbol"), Some("North  Gate"));
        assert_eq!(value.attr("name"), Some("a b"));
    }

    #[test]
    fn test_escaped_whitespace_in_attributes_is_kept() {
        let doc = XmiDocument::parse(
            br#"<root><value symbol="North&#xA;Gate&#9;2" name="x&#13;&#10;y"/></root>"#,
        )
        .expect("parse");
        let value = doc.root().find("value").expect("value");
        assert_eq!(value.attr("symbol"), Some("North\nGate\t2"));
        assert_eq!(value.attr("name"), Some("x\r\ny"));
    }

    #[test]
    fn test_find_excludes_self() {
        let doc =
            XmiDocument::parse(br#"<slot><value symbol="x"/><value symbol="y"/></slot>"#)
                .expect("parse");
        assert!(doc.root().find("slot").is_none());
        assert_eq!(doc.root().find_all("value").count(), 2);
        assert_eq!(doc.root().find("value").and_then(|v| v.attr("symbol")), Some("x"));
    }

    #[test]
    fn test_mismatched_end_tag_fails() {
        let err = XmiDocument::parse(b"<a><b></a>").unwrap_err();
        assert!(matches!(err, ExtractError::Xml(_)), "got {err:?}");
    }

    #[test]
    fn test_unclosed_element_fails() {
        let err = XmiDocument::parse(b"<a><b/>").unwrap_err();
        assert!(matches!(err, ExtractError::Xml(_)), "got {err:?}");
    }

    #[test]
    fn test_empty_document_fails() {
        assert!(XmiDocument::parse(b"").is_err());
        assert!(XmiDocument::parse(b"<?xml version=\"1.0\"?>").is_err());
    }

    #[test]
    fn test_multiple_roots_fail() {
        let err = XmiDocument::parse(b"<a/><b/>").unwrap_err();
        assert!(err.to_string().contains("more than one root"), "got {err}");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = XmiDocument::from_path("/nonexistent/dir/model.xmi").unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }), "got {err:?}");
    }
}
