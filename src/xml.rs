//! Minimal owned XML tree over quick-xml's pull events.
//!
//! Both directions of the codec want a tree rather than a stream: reading
//! walks nested `Font` containers and collects `Text` descendants, while
//! writing emits mixed text and element content inside `Text` nodes. Each
//! read or write owns its tree for the duration of the call.

use std::io::{BufRead, Write};

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Reader, Writer,
};

use crate::errors::Error;

/// A child of an element: either a nested element or a run of character data
#[derive(Clone, Debug)]
pub(crate) enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with ordered attributes and ordered children
#[derive(Clone, Debug, Default)]
pub(crate) struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        self.name.as_str()
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.attributes.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Iterate over direct element children
    pub(crate) fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub(crate) fn push_element(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    pub(crate) fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Character data directly inside this element, with surrounding
    /// whitespace removed
    pub(crate) fn text(&self) -> String {
        let mut content = String::new();
        for node in &self.children {
            if let Node::Text(text) = node {
                content.push_str(text);
            }
        }

        content.trim().to_string()
    }

    /// Character data of the whole subtree in document order, so that inline
    /// styling elements do not hide their contents
    pub(crate) fn deep_text(&self) -> String {
        let mut content = String::new();
        self.collect_text(&mut content);

        content
    }

    fn collect_text(&self, content: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => content.push_str(text),
                Node::Element(element) => element.collect_text(content),
            }
        }
    }

    /// All elements with the given name anywhere below this one, in document
    /// order
    pub(crate) fn descendants(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);

        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for element in self.elements() {
            if element.name() == name {
                found.push(element);
            }
            element.collect_descendants(name, found);
        }
    }
}

/// Read a document from the given reader and return its root element
pub(crate) fn read_document<R: BufRead>(reader: R) -> Result<Element, Error> {
    let mut reader = Reader::from_reader(reader);
    let mut stack: Vec<Element> = Vec::new();
    let mut buffer = Vec::new();

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(start)) => {
                let element = element_from_start(&start)?;
                stack.push(element);
            }
            Ok(Event::Empty(start)) => {
                let element = element_from_start(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(element)),
                    None => return Ok(element),
                }
            }
            Ok(Event::Text(text)) => {
                let value = text
                    .unescape()
                    .map_err(|error| Error::ParseError(error.to_string()))?
                    .into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(value));
                }
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::ParseError("unexpected closing tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(element)),
                    None => return Ok(element),
                }
            }
            Ok(Event::Eof) => {
                return Err(Error::ParseError("missing root element".to_string()));
            }
            Ok(_) => {}
            Err(error) => return Err(Error::ParseError(error.to_string())),
        }
        buffer.clear();
    }
}

/// Name of the root element, or `None` when the input is not well-formed XML
pub(crate) fn root_name<R: BufRead>(reader: R) -> Option<String> {
    let mut reader = Reader::from_reader(reader);
    let mut buffer = Vec::new();

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(start) | Event::Empty(start)) => {
                return String::from_utf8(start.name().as_ref().to_vec()).ok();
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
        buffer.clear();
    }
}

/// Serialise a document with an XML declaration through one final write.
///
/// No indentation is inserted, so mixed text and element content survives
/// byte-exact.
pub(crate) fn write_document<W: Write>(root: &Element, writer: W) -> Result<(), Error> {
    let mut writer = Writer::new(writer);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|error| Error::WriteError(error.to_string()))?;

    write_element(&mut writer, root)
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), Error> {
    let mut start = BytesStart::new(element.name());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|error| Error::WriteError(error.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|error| Error::WriteError(error.to_string()))?;
    for node in &element.children {
        match node {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => {
                writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(|error| Error::WriteError(error.to_string()))?;
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name())))
        .map_err(|error| Error::WriteError(error.to_string()))
}

fn element_from_start(start: &BytesStart) -> Result<Element, Error> {
    let name = String::from_utf8(start.name().as_ref().to_vec())
        .map_err(|error| Error::ParseError(error.to_string()))?;
    let mut element = Element::new(name);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|error| Error::ParseError(error.to_string()))?;
        let key = String::from_utf8(attribute.key.as_ref().to_vec())
            .map_err(|error| Error::ParseError(error.to_string()))?;
        let value = attribute
            .unescape_value()
            .map_err(|error| Error::ParseError(error.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}
