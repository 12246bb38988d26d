//! xmldom - a small in-memory document object model
//!
//! This library keeps markup documents as trees of reference-counted nodes
//! and offers the familiar DOM operations on them: child navigation, live
//! child and attribute views, reparenting mutations, character data editing,
//! lookup by id and tag name, and serialization back to markup or text.
//!
//! It follows the shape of the W3C DOM without claiming conformance. There
//! are no namespaces, no events and no attribute nodes inside the tree.
//!
//! # Overview
//!
//! - [`Document`] owns a tree with at most one root element and creates the
//!   nodes that go into it.
//! - [`NodeRef`] is a shared handle to any node. Free functions in
//!   [`mutation`] move nodes around; [`NodeInner`] answers queries.
//! - [`xml::parse`] and friends build a document from markup using
//!   quick-xml as the tokenizer. Any other [`xml::TokenSource`] can drive
//!   the [`xml::TreeBuilder`] directly.
//!
//! # Example
//!
//! ```
//! use xmldom::{parse_xml_str, NodeList};
//!
//! let doc = parse_xml_str(r#"<list><item id="a">one</item><item>two</item></list>"#)?;
//! assert_eq!(doc.get_elements_by_tag_name("item").length(), 2);
//!
//! let first = doc.get_element_by_id("a").unwrap();
//! assert_eq!(xmldom::to_text(&first, false), "one");
//! assert_eq!(doc.to_xml(), r#"<list><item id="a">one</item><item>two</item></list>"#);
//! # Ok::<(), xmldom::Error>(())
//! ```

pub mod collections;
pub mod constants;
pub mod document;
pub mod error;
pub mod mutation;
pub mod node;
pub mod search;
pub mod xml;

// Re-export commonly used types
pub use collections::{ChildNodeList, NamedNodeMap, NodeList, NodeListIter, TagNodeList};
pub use constants::NodeType;
pub use document::Document;
pub use error::{Error, Result};
pub use mutation::{append_child, insert_before, remove_child, replace_child};
pub use node::{
    new_comment, new_element, new_text, Attr, CharacterData, ElementData, NodeData, NodeInner,
    NodeRef, WeakNodeRef,
};
pub use search::{get_element_by_id, get_elements_by_tag_name};
pub use xml::{
    escape, parse, parse_html, parse_html_str, parse_str, parse_xml, parse_xml_str, to_text,
    to_xml, ParseOptions, Token, TokenSource, TreeBuilder,
};
