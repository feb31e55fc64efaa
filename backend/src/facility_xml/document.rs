//! Loads a whole XML document into an element tree.
//!
//! Parsing runs to completion before anything looks at the tree, so a
//! malformed document fails as a single `ParseError`.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ImportError, ParseError};

/// One element with its attributes, leading text and child elements.
///
/// `text` holds the text that appears before the first child element,
/// verbatim including whitespace, or None if there is no such text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given tag.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first direct child with the given tag.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.text.as_deref())
    }

    /// All elements below this one with the given tag, in document order.
    /// The element itself is not included.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        for child in &self.children {
            collect_named(child, name, &mut found);
        }
        found
    }

    fn push_text(&mut self, text: &str) {
        // Text after the first child is tail text of that child, not ours.
        if !self.children.is_empty() || text.is_empty() {
            return;
        }
        match self.text {
            Some(ref mut t) => t.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }
}

fn collect_named<'a>(element: &'a XmlElement, name: &str, found: &mut Vec<&'a XmlElement>) {
    if element.name == name {
        found.push(element);
    }
    for child in &element.children {
        collect_named(child, name, found);
    }
}

/// Reads and parses an XML file.
pub fn load_document(path: &Path) -> Result<XmlElement, ImportError> {
    let content = fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_document(&content)?)
}

/// Parses XML text into its root element.
pub fn parse_document(content: &str) -> Result<XmlElement, ParseError> {
    // No trim_text: whitespace-only content has to stay distinguishable
    // from an empty element.
    let mut reader = Reader::from_str(content);
    reader.check_end_names(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut buf = Vec::new();

    loop {
        let position = reader.buffer_position();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if stack.is_empty() && root.is_some() {
                    return Err(ParseError::new(position, "junk after document element"));
                }
                stack.push(element_from_start(e, position)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from_start(e, position)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => return Err(ParseError::new(position, "junk after document element")),
                }
            }
            Ok(Event::End(ref e)) => {
                let end_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let element = stack.pop().ok_or_else(|| {
                    ParseError::new(position, format!("unexpected closing tag </{}>", end_name))
                })?;
                if element.name != end_name {
                    return Err(ParseError::new(
                        position,
                        format!("mismatched tag: expected </{}>, found </{}>", element.name, end_name),
                    ));
                }
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape()
                    .map_err(|err| ParseError::new(position, err.to_string()))?;
                match stack.last_mut() {
                    Some(current) => current.push_text(&text),
                    None => {
                        if !text.trim().is_empty() {
                            return Err(ParseError::new(position, "text outside of the document element"));
                        }
                    }
                }
            }
            Ok(Event::CData(ref e)) => {
                let text = std::str::from_utf8(e)
                    .map_err(|err| ParseError::new(position, err.to_string()))?;
                match stack.last_mut() {
                    Some(current) => current.push_text(text),
                    None => return Err(ParseError::new(position, "CDATA outside of the document element")),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ParseError::new(reader.buffer_position(), e.to_string()));
            }
            // Declaration, comments, processing instructions, doctype
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::new(
            reader.buffer_position(),
            format!("unclosed element <{}>", open.name),
        ));
    }

    root.ok_or_else(|| ParseError::new(0, "no element found"))
}

fn element_from_start(start: &BytesStart, position: usize) -> Result<XmlElement, ParseError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| ParseError::new(position, e.to_string()))?
        .to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ParseError::new(position, e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| ParseError::new(position, e.to_string()))?
            .to_string();
        let value = attr.unescape_value()
            .map_err(|e| ParseError::new(position, e.to_string()))?
            .to_string();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        attributes,
        text: None,
        children: Vec::new(),
    })
}
