//! The document: owner of the tree and factory for its nodes.

use std::cell::RefCell;
use std::rc::Rc;

use crate::collections::{ChildNodeList, TagNodeList};
use crate::constants::{NodeType, DOCUMENT_NAME};
use crate::error::Result;
use crate::mutation;
use crate::node::{new_node_ref, CharacterData, ElementData, NodeData, NodeInner, NodeRef};
use crate::search;
use crate::xml::{to_text, to_xml};

/// A document tree.
///
/// The document node holds at most one child, the root element. Cloning a
/// `Document` clones the handle, not the tree; equality is identity.
#[derive(Debug, Clone)]
pub struct Document {
    node: NodeRef,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        let node = Rc::new_cyclic(|weak_self| {
            RefCell::new(NodeInner::with_owner(NodeData::Document, weak_self.clone()))
        });
        Document { node }
    }

    /// Wraps a document node. Returns `None` for any other kind of node.
    pub fn from_node(node: NodeRef) -> Option<Self> {
        if node.borrow().is_document() {
            Some(Document { node })
        } else {
            None
        }
    }

    /// Returns the underlying document node.
    pub fn as_node(&self) -> &NodeRef {
        &self.node
    }

    /// Always [`NodeType::Document`].
    pub fn node_type(&self) -> NodeType {
        NodeType::Document
    }

    /// Always `#document`.
    pub fn node_name(&self) -> &'static str {
        DOCUMENT_NAME
    }

    /// Always empty.
    pub fn node_value(&self) -> &'static str {
        ""
    }

    /// Returns the root element, if one has been set.
    pub fn document_element(&self) -> Option<NodeRef> {
        self.node.borrow().first_child()
    }

    /// Returns a live view of the document's children.
    pub fn child_nodes(&self) -> ChildNodeList {
        NodeInner::child_nodes_of_ref(&self.node)
    }

    /// Creates a detached element owned by this document.
    pub fn create_element(&self, tag_name: &str) -> NodeRef {
        self.create(NodeData::Element(ElementData::new(tag_name)))
    }

    /// Creates a detached text node owned by this document.
    pub fn create_text_node(&self, data: &str) -> NodeRef {
        self.create(NodeData::Text(CharacterData::new(data)))
    }

    /// Creates a detached comment owned by this document.
    pub fn create_comment(&self, data: &str) -> NodeRef {
        self.create(NodeData::Comment(CharacterData::new(data)))
    }

    fn create(&self, data: NodeData) -> NodeRef {
        new_node_ref(NodeInner::with_owner(data, Rc::downgrade(&self.node)))
    }

    /// Installs `root` as the root element and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the document already has a child, or if `root` cannot be a
    /// document child. Calling this twice is a programming error.
    pub fn set_root(&self, root: NodeRef) -> NodeRef {
        assert!(
            !self.node.borrow().has_child_nodes(),
            "Document::set_root used on a document that already has a root element"
        );
        if let Err(e) = mutation::append_child(&self.node, &root) {
            panic!("Document::set_root: {e}");
        }
        root
    }

    /// Appends the root element. Fails if one is already present.
    pub fn append_child(&self, child: &NodeRef) -> Result<NodeRef> {
        mutation::append_child(&self.node, child)
    }

    /// Removes the root element.
    pub fn remove_child(&self, child: &NodeRef) -> Result<NodeRef> {
        mutation::remove_child(&self.node, child)
    }

    /// Finds the first element, in document order, whose `id` attribute is
    /// `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeRef> {
        let root = self.document_element()?;
        search::get_element_by_id(&root, id)
    }

    /// Collects every element named `tag_name`, root included.
    pub fn get_elements_by_tag_name(&self, tag_name: &str) -> TagNodeList {
        search::get_elements_by_tag_name(&self.node, tag_name)
    }

    /// Serializes the root element as markup.
    pub fn to_xml(&self) -> String {
        to_xml(&self.node)
    }

    /// Concatenates the text of the whole document.
    pub fn to_text(&self, escape: bool) -> String {
        to_text(&self.node, escape)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Document {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::NodeList;

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert_eq!(doc.node_type().code(), 9);
        assert_eq!(doc.node_name(), "#document");
        assert_eq!(doc.node_value(), "");
        assert!(doc.document_element().is_none());
        assert_eq!(doc.child_nodes().length(), 0);
        assert_eq!(doc.to_xml(), "");
        assert!(doc.get_element_by_id("x").is_none());
    }

    #[test]
    fn test_factories_set_owner() {
        let doc = Document::new();
        let element = doc.create_element("child");
        let text = doc.create_text_node("some text");
        let comment = doc.create_comment("note");

        assert_eq!(element.borrow().node_type(), NodeType::Element);
        assert_eq!(element.borrow().node_name(), "child");
        assert_eq!(text.borrow().node_value(), "some text");
        assert_eq!(comment.borrow().node_type(), NodeType::Comment);

        for node in [&element, &text, &comment] {
            assert_eq!(NodeInner::owner_document_of_ref(node), Some(doc.clone()));
            assert!(node.borrow().parent_node().is_none());
        }
        assert_eq!(NodeInner::owner_document_of_ref(doc.as_node()), Some(doc.clone()));
    }

    #[test]
    fn test_set_root() {
        let doc = Document::new();
        let root = doc.set_root(doc.create_element("root"));
        assert!(Rc::ptr_eq(&doc.document_element().unwrap(), &root));
        assert!(Rc::ptr_eq(&root.borrow().parent_node().unwrap(), doc.as_node()));
    }

    #[test]
    #[should_panic(expected = "already has a root element")]
    fn test_set_root_twice_panics() {
        let doc = Document::new();
        doc.set_root(doc.create_element("root"));
        doc.set_root(doc.create_element("again"));
    }

    #[test]
    fn test_documents_compare_by_identity() {
        let a = Document::new();
        let b = Document::new();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
