//! Markup and text output for node trees.
//!
//! Output is compact: no declaration, no indentation, and elements are
//! never self-closed, so an empty element prints as `<a></a>`.
//!
//! Comment bodies go through the same escaping as text, but a parser reads
//! them back verbatim. A comment holding markup characters or non-ASCII text
//! therefore grows by one level of escaping on every print and parse cycle;
//! only plain ASCII comments survive a round trip unchanged.

use crate::node::{NodeData, NodeRef};

/// Renders nodes into an in-memory buffer.
#[derive(Debug, Default)]
pub struct XmlPrinter {
    output: String,
}

impl XmlPrinter {
    /// Creates a printer with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the markup for `node` and everything below it.
    pub fn print(&mut self, node: &NodeRef) {
        let borrowed = node.borrow();
        match borrowed.data() {
            NodeData::Document => {
                for child in borrowed.children() {
                    self.print(child);
                }
            }
            NodeData::Element(element) => {
                self.output.push('<');
                self.output.push_str(element.tag_name());
                // Attribute values are written as stored.
                for (name, value) in element.attributes() {
                    self.output.push(' ');
                    self.output.push_str(name);
                    self.output.push_str("=\"");
                    self.output.push_str(value);
                    self.output.push('"');
                }
                self.output.push('>');
                for child in borrowed.children() {
                    self.print(child);
                }
                self.output.push_str("</");
                self.output.push_str(element.tag_name());
                self.output.push('>');
            }
            NodeData::Text(text) => self.output.push_str(&text.escaped()),
            NodeData::Comment(comment) => {
                self.output.push_str("<!--");
                self.output.push_str(&comment.escaped());
                self.output.push_str("-->");
            }
        }
    }

    /// Appends the text content of `node`, escaped when `escape` is set.
    ///
    /// Only text nodes contribute; comments are skipped.
    pub fn print_text(&mut self, node: &NodeRef, escape: bool) {
        let borrowed = node.borrow();
        match borrowed.data() {
            NodeData::Document | NodeData::Element(_) => {
                for child in borrowed.children() {
                    self.print_text(child, escape);
                }
            }
            NodeData::Text(text) if escape => self.output.push_str(&text.escaped()),
            NodeData::Text(text) => self.output.push_str(&text.data()),
            NodeData::Comment(_) => {}
        }
    }

    /// Returns what has been printed so far.
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Consumes the printer and returns its buffer.
    pub fn into_string(self) -> String {
        self.output
    }
}

/// Escapes markup-significant characters and every non-ASCII code point.
///
/// Code points from 128 up are written as decimal character references, so
/// the result is plain ASCII.
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '\'' => result.push_str("&apos;"),
            '"' => result.push_str("&quot;"),
            c if c.is_ascii() => result.push(c),
            c => {
                result.push_str("&#");
                result.push_str(&u32::from(c).to_string());
                result.push(';');
            }
        }
    }
    result
}

/// Serializes `node` as markup.
pub fn to_xml(node: &NodeRef) -> String {
    let mut printer = XmlPrinter::new();
    printer.print(node);
    printer.into_string()
}

/// Concatenates the text below `node`.
pub fn to_text(node: &NodeRef, escape: bool) -> String {
    let mut printer = XmlPrinter::new();
    printer.print_text(node, escape);
    printer.into_string()
}
