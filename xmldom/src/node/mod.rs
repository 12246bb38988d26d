//! Node structures for the document tree.
//!
//! Every tree participant is a `NodeInner` behind a shared [`NodeRef`]. The
//! parent owns its children through strong references; the way back up is a
//! `Weak` pointer, so a subtree that is detached and dropped is freed.
//! Kind-specific data lives in [`NodeData`].

mod attr;
mod character_data;
mod element;

pub use attr::Attr;
pub use character_data::CharacterData;
pub use element::ElementData;

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::collections::{ChildNodeList, NamedNodeMap};
use crate::constants::{NodeType, COMMENT_NAME, DOCUMENT_NAME, TEXT_NAME};
use crate::document::Document;

/// Global counter for generating unique node IDs.
///
/// Ids are never reused within a process, unlike the addresses of freed
/// nodes, so mutation and builder logs can tell nodes apart.
static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generates a unique node ID.
fn next_node_id() -> u64 {
    NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A reference-counted pointer to a node.
pub type NodeRef = Rc<RefCell<NodeInner>>;

/// A non-owning pointer to a node.
pub type WeakNodeRef = Weak<RefCell<NodeInner>>;

/// Kind-specific data for nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document node; holds at most the root element.
    Document,
    /// An element with its attribute table.
    Element(ElementData),
    /// A text node.
    Text(CharacterData),
    /// A comment node.
    Comment(CharacterData),
}

/// The inner data of a node in the document tree.
#[derive(Debug)]
pub struct NodeInner {
    /// Unique identifier for this node.
    id: u64,
    /// Child nodes, owned.
    children: Vec<NodeRef>,
    /// Weak reference to parent node.
    parent: WeakNodeRef,
    /// Weak reference to the document that created this node.
    owner: WeakNodeRef,
    /// Kind-specific data.
    data: NodeData,
}

impl NodeInner {
    /// Creates a detached node without an owner document.
    pub fn new(data: NodeData) -> Self {
        Self::with_owner(data, Weak::new())
    }

    pub(crate) fn with_owner(data: NodeData, owner: WeakNodeRef) -> Self {
        NodeInner {
            id: next_node_id(),
            children: Vec::new(),
            parent: Weak::new(),
            owner,
            data,
        }
    }

    /// Returns the unique ID of this node.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the DOM node type.
    pub fn node_type(&self) -> NodeType {
        match self.data {
            NodeData::Document => NodeType::Document,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
        }
    }

    /// Returns the node name: the tag name for elements, `#text`,
    /// `#comment` or `#document` otherwise.
    pub fn node_name(&self) -> &str {
        match &self.data {
            NodeData::Document => DOCUMENT_NAME,
            NodeData::Element(e) => e.tag_name(),
            NodeData::Text(_) => TEXT_NAME,
            NodeData::Comment(_) => COMMENT_NAME,
        }
    }

    /// Returns the node value: the character data for text and comments,
    /// empty for documents and elements.
    pub fn node_value(&self) -> Cow<'_, str> {
        match &self.data {
            NodeData::Text(c) | NodeData::Comment(c) => c.data(),
            NodeData::Document | NodeData::Element(_) => Cow::Borrowed(""),
        }
    }

    /// Returns the kind-specific data.
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Returns true if this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Returns true if this is the document node.
    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document)
    }

    /// Returns true for text and comment nodes, which never have children.
    pub fn is_character_data(&self) -> bool {
        matches!(self.data, NodeData::Text(_) | NodeData::Comment(_))
    }

    /// Returns a reference to the element, if this is an element node.
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns a mutable reference to the element, if this is an element node.
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the character data of a text or comment node.
    pub fn as_character_data(&self) -> Option<&CharacterData> {
        match &self.data {
            NodeData::Text(c) | NodeData::Comment(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the mutable character data of a text or comment node.
    pub fn as_character_data_mut(&mut self) -> Option<&mut CharacterData> {
        match &mut self.data {
            NodeData::Text(c) | NodeData::Comment(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns a reference to the child at the given index.
    pub fn child(&self, index: usize) -> Option<&NodeRef> {
        self.children.get(index)
    }

    /// Returns the children as a slice.
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// Returns true if the node has at least one child.
    pub fn has_child_nodes(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the first child.
    pub fn first_child(&self) -> Option<NodeRef> {
        self.children.first().cloned()
    }

    /// Returns the last child.
    pub fn last_child(&self) -> Option<NodeRef> {
        self.children.last().cloned()
    }

    /// Returns the parent, if the node is attached.
    pub fn parent_node(&self) -> Option<NodeRef> {
        self.parent.upgrade()
    }

    /// Returns the index of `child` among the children, compared by identity.
    pub fn index_of(&self, child: &NodeRef) -> Option<usize> {
        self.children.iter().position(|c| Rc::ptr_eq(c, child))
    }

    pub(crate) fn set_parent(&mut self, parent: WeakNodeRef) {
        self.parent = parent;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeRef> {
        &mut self.children
    }
}

/// Helper functions that work with NodeRef.
impl NodeInner {
    /// Returns a live view of the node's children.
    pub fn child_nodes_of_ref(node_ref: &NodeRef) -> ChildNodeList {
        ChildNodeList::new(node_ref.clone())
    }

    /// Returns a live view of an element's attributes, or `None` for other
    /// node kinds.
    pub fn attributes_of_ref(node_ref: &NodeRef) -> Option<NamedNodeMap> {
        if node_ref.borrow().is_element() {
            Some(NamedNodeMap::new(node_ref.clone()))
        } else {
            None
        }
    }

    /// Gets the sibling immediately before a node.
    pub fn previous_sibling_of_ref(node_ref: &NodeRef) -> Option<NodeRef> {
        let parent = node_ref.borrow().parent_node()?;
        let parent_borrowed = parent.borrow();
        let index = parent_borrowed.index_of(node_ref)?;
        index
            .checked_sub(1)
            .and_then(|i| parent_borrowed.child(i).cloned())
    }

    /// Gets the sibling immediately after a node.
    pub fn next_sibling_of_ref(node_ref: &NodeRef) -> Option<NodeRef> {
        let parent = node_ref.borrow().parent_node()?;
        let parent_borrowed = parent.borrow();
        let index = parent_borrowed.index_of(node_ref)?;
        parent_borrowed.child(index + 1).cloned()
    }

    /// Returns true if `ancestor` is `node_ref` itself or one of its
    /// ancestors.
    pub fn is_inclusive_ancestor_of_ref(ancestor: &NodeRef, node_ref: &NodeRef) -> bool {
        let mut current = Some(node_ref.clone());
        while let Some(node) = current {
            if Rc::ptr_eq(&node, ancestor) {
                return true;
            }
            current = node.borrow().parent_node();
        }
        false
    }

    /// Returns the document a node belongs to.
    ///
    /// A node attached under a document reports that document. A detached
    /// node reports the document that created it, while it is alive.
    pub fn owner_document_of_ref(node_ref: &NodeRef) -> Option<Document> {
        let mut current = Some(node_ref.clone());
        while let Some(node) = current {
            if node.borrow().is_document() {
                return Document::from_node(node);
            }
            current = node.borrow().parent_node();
        }
        let owner = node_ref.borrow().owner.upgrade()?;
        Document::from_node(owner)
    }
}

/// Creates a new node reference.
pub fn new_node_ref(inner: NodeInner) -> NodeRef {
    Rc::new(RefCell::new(inner))
}

/// Creates a detached element node with no owner document.
pub fn new_element(tag_name: &str) -> NodeRef {
    new_node_ref(NodeInner::new(NodeData::Element(ElementData::new(
        tag_name,
    ))))
}

/// Creates a detached text node with no owner document.
pub fn new_text(data: &str) -> NodeRef {
    new_node_ref(NodeInner::new(NodeData::Text(CharacterData::new(data))))
}

/// Creates a detached comment node with no owner document.
pub fn new_comment(data: &str) -> NodeRef {
    new_node_ref(NodeInner::new(NodeData::Comment(CharacterData::new(data))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::append_child;

    #[test]
    fn test_node_names_and_values() {
        let element = new_element("root");
        let text = new_text("hello");
        let comment = new_comment(" note ");

        assert_eq!(element.borrow().node_type(), NodeType::Element);
        assert_eq!(element.borrow().node_name(), "root");
        assert_eq!(element.borrow().node_value(), "");

        assert_eq!(text.borrow().node_type(), NodeType::Text);
        assert_eq!(text.borrow().node_name(), "#text");
        assert_eq!(text.borrow().node_value(), "hello");

        assert_eq!(comment.borrow().node_type(), NodeType::Comment);
        assert_eq!(comment.borrow().node_name(), "#comment");
        assert_eq!(comment.borrow().node_value(), " note ");
    }

    #[test]
    fn test_unique_node_ids() {
        let node1 = new_element("a");
        let node2 = new_element("a");
        let node3 = new_text("a");

        assert_ne!(node1.borrow().id(), node2.borrow().id());
        assert_ne!(node2.borrow().id(), node3.borrow().id());
    }

    #[test]
    fn test_siblings() {
        let parent = new_element("parent");
        let child0 = new_element("child0");
        let child1 = new_element("child1");
        let child2 = new_element("child2");

        append_child(&parent, &child0).unwrap();
        append_child(&parent, &child1).unwrap();
        append_child(&parent, &child2).unwrap();

        assert!(NodeInner::previous_sibling_of_ref(&child0).is_none());
        assert!(NodeInner::next_sibling_of_ref(&child2).is_none());

        let prev = NodeInner::previous_sibling_of_ref(&child1).unwrap();
        let next = NodeInner::next_sibling_of_ref(&child1).unwrap();
        assert!(Rc::ptr_eq(&prev, &child0));
        assert!(Rc::ptr_eq(&next, &child2));

        let back = NodeInner::previous_sibling_of_ref(&next).unwrap();
        assert!(Rc::ptr_eq(&back, &child1));
    }

    #[test]
    fn test_first_last_and_has_children() {
        let parent = new_element("parent");
        assert!(!parent.borrow().has_child_nodes());
        assert!(parent.borrow().first_child().is_none());

        let a = new_element("a");
        let b = new_text("b");
        append_child(&parent, &a).unwrap();
        append_child(&parent, &b).unwrap();

        let parent_borrowed = parent.borrow();
        assert!(parent_borrowed.has_child_nodes());
        assert!(Rc::ptr_eq(&parent_borrowed.first_child().unwrap(), &a));
        assert!(Rc::ptr_eq(&parent_borrowed.last_child().unwrap(), &b));
        assert!(!b.borrow().has_child_nodes());
    }

    #[test]
    fn test_attributes_only_on_elements() {
        let element = new_element("e");
        let text = new_text("t");
        assert!(NodeInner::attributes_of_ref(&element).is_some());
        assert!(NodeInner::attributes_of_ref(&text).is_none());
    }

    #[test]
    fn test_detached_node_has_no_owner() {
        let element = new_element("e");
        assert!(NodeInner::owner_document_of_ref(&element).is_none());
        assert!(element.borrow().parent_node().is_none());
    }
}
