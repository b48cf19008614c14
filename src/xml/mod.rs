//! Structure ↔ XML codec (§4.3).
//!
//! EPP's wire format declares namespaces as plain attributes on whichever
//! element first needs them rather than via inherited prefix bindings, so a
//! namespace-aware reader buys nothing here: tag names are matched as the
//! literal strings the server sends (`"domain:infData"`, `"contact:id"`, …),
//! the same way the source's `encoding/xml` struct tags do.
//!
//! Two halves, generalising the teacher's `Encode`/`Decode` trait pair to
//! XML events instead of IMAP's line/literal bytes:
//! - [`Writer`] builds request bodies by pushing start/empty/text/end events
//!   onto a `quick_xml::Writer`.
//! - [`Element`] is a minimal parsed tree built from a `quick_xml::Reader`'s
//!   event stream, with small accessors (`child`, `children`, `attr`, `text`)
//!   that response parsing code walks to pull out the fields it needs.

pub mod datetime;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

/// Pushes well-formed XML onto an in-memory buffer.
///
/// Used by every command builder in `model::*` to serialise a request body;
/// the caller supplies the root element name and namespace, and the codec
/// (`net::frame::write_frame`) is responsible for prepending the XML
/// declaration and the length prefix.
pub struct Writer {
    inner: quick_xml::Writer<Vec<u8>>,
}

impl Writer {
    pub fn new() -> Self {
        Writer {
            inner: quick_xml::Writer::new(Vec::new()),
        }
    }

    /// Opens `<name attr1="v1" attr2="v2">`.
    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> &mut Self {
        let mut start = BytesStart::new(name);
        for (key, value) in attrs {
            start.push_attribute((*key, *value));
        }
        self.inner.write_event(Event::Start(start)).expect("writing to a Vec<u8> cannot fail");
        self
    }

    /// Writes a self-closing `<name attr1="v1"/>`.
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> &mut Self {
        let mut start = BytesStart::new(name);
        for (key, value) in attrs {
            start.push_attribute((*key, *value));
        }
        self.inner.write_event(Event::Empty(start)).expect("writing to a Vec<u8> cannot fail");
        self
    }

    /// Writes escaped character data.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.inner
            .write_event(Event::Text(BytesText::new(text)))
            .expect("writing to a Vec<u8> cannot fail");
        self
    }

    /// Closes `</name>`.
    pub fn end(&mut self, name: &str) -> &mut Self {
        self.inner
            .write_event(Event::End(BytesEnd::new(name)))
            .expect("writing to a Vec<u8> cannot fail");
        self
    }

    /// Convenience for `<name attr1="v1">text</name>`.
    pub fn element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> &mut Self {
        self.start(name, attrs);
        self.text(text);
        self.end(name);
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed XML element: its own attributes, any direct text content, and
/// its child elements in document order.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child named `name`, if any.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children named `name`, in document order.
    pub fn children(&self, name: &str) -> impl Iterator<Item = &Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// This element's own text content, trimmed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Shorthand for `self.child(name).map(Element::text)`, defaulting to `""`.
    pub fn child_text(&self, name: &str) -> &str {
        self.child(name).map(Element::text).unwrap_or("")
    }
}

/// Parses a complete XML document (with or without a leading declaration)
/// into its root [`Element`].
pub fn parse(bytes: &[u8]) -> Result<Element> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Decl(_)) => {}
            Ok(Event::Start(start)) => {
                let element = Element {
                    name: tag_name(&start),
                    attrs: read_attrs(&start),
                    children: Vec::new(),
                    text: String::new(),
                };
                stack.push(element);
            }
            Ok(Event::Empty(start)) => {
                let element = Element {
                    name: tag_name(&start),
                    attrs: read_attrs(&start),
                    children: Vec::new(),
                    text: String::new(),
                };
                push_or_close(&mut stack, &mut root, element);
            }
            Ok(Event::Text(text)) => {
                if let Some(top) = stack.last_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| Error::decode_xml(e.to_string(), bytes.to_vec()))?;
                    top.text.push_str(&unescaped);
                }
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::decode_xml("unbalanced end tag", bytes.to_vec()))?;
                push_or_close(&mut stack, &mut root, element);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::decode_xml(e.to_string(), bytes.to_vec())),
        }
    }

    root.ok_or_else(|| Error::decode_xml("empty document", bytes.to_vec()))
}

fn push_or_close(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn tag_name(start: &BytesStart) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn read_attrs(start: &BytesStart) -> Vec<(String, String)> {
    start
        .attributes()
        .filter_map(|a| a.ok())
        .map(|a| {
            let key = String::from_utf8_lossy(a.key.as_ref()).into_owned();
            let value = a.unescape_value().unwrap_or_default().into_owned();
            (key, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attributes() {
        let doc = br#"<?xml version="1.0" encoding="UTF-8"?>
<epp xmlns="urn:ietf:params:xml:ns:epp-1.0">
  <response>
    <result code="1000">
      <msg>Command completed successfully</msg>
    </result>
  </response>
</epp>"#;
        let root = parse(doc).unwrap();
        assert_eq!(root.name, "epp");
        let result = root.child("response").unwrap().child("result").unwrap();
        assert_eq!(result.attr("code"), Some("1000"));
        assert_eq!(result.child_text("msg"), "Command completed successfully");
    }

    #[test]
    fn writer_escapes_text() {
        let mut w = Writer::new();
        w.start("epp", &[("xmlns", "urn:ietf:params:xml:ns:epp-1.0")]);
        w.element("clTRID", &[], "A&B");
        w.end("epp");
        let bytes = w.into_bytes();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("A&amp;B"));
    }
}
