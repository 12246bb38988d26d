//! Node lists and attribute maps.
//!
//! [`ChildNodeList`] and [`NamedNodeMap`] only hold a handle to their owner
//! and re-read it on every call, so they always reflect the current tree.
//! [`TagNodeList`] is different: it is filled once, when it is created, and
//! never refreshed.

use std::rc::Rc;

use crate::node::{Attr, NodeRef};

/// Indexed access to a sequence of nodes.
///
/// Out-of-range indices are not an error; they yield `None`.
pub trait NodeList {
    /// Returns the number of nodes.
    fn length(&self) -> usize;

    /// Returns the node at `index`.
    fn item(&self, index: usize) -> Option<NodeRef>;

    /// Iterates over the nodes, calling [`item`](NodeList::item) for each
    /// index until it returns `None`.
    fn iter(&self) -> NodeListIter<'_, Self>
    where
        Self: Sized,
    {
        NodeListIter {
            list: self,
            index: 0,
        }
    }
}

/// Iterator returned by [`NodeList::iter`].
pub struct NodeListIter<'a, L: NodeList> {
    list: &'a L,
    index: usize,
}

impl<L: NodeList> Iterator for NodeListIter<'_, L> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.item(self.index)?;
        self.index += 1;
        Some(node)
    }
}

/// A live view of a node's children.
#[derive(Debug, Clone)]
pub struct ChildNodeList {
    owner: NodeRef,
}

impl ChildNodeList {
    pub(crate) fn new(owner: NodeRef) -> Self {
        ChildNodeList { owner }
    }

    /// Returns the node whose children this list shows.
    pub fn owner(&self) -> &NodeRef {
        &self.owner
    }
}

impl NodeList for ChildNodeList {
    fn length(&self) -> usize {
        self.owner.borrow().child_count()
    }

    fn item(&self, index: usize) -> Option<NodeRef> {
        self.owner.borrow().child(index).cloned()
    }
}

/// Elements with a given tag name, collected once in document order.
#[derive(Debug, Clone)]
pub struct TagNodeList {
    tag_name: String,
    nodes: Vec<NodeRef>,
}

impl TagNodeList {
    /// Walks the descendants of `root` (excluding `root` itself) in pre-order
    /// and keeps every element named `tag_name`.
    pub fn new(root: &NodeRef, tag_name: &str) -> Self {
        let mut nodes = Vec::new();
        collect_by_tag(root, tag_name, &mut nodes);
        TagNodeList {
            tag_name: tag_name.to_string(),
            nodes,
        }
    }

    /// Returns the tag name the list was built for.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Returns true if `node` was collected, compared by identity.
    pub fn contains(&self, node: &NodeRef) -> bool {
        self.nodes.iter().any(|n| Rc::ptr_eq(n, node))
    }
}

impl NodeList for TagNodeList {
    fn length(&self) -> usize {
        self.nodes.len()
    }

    fn item(&self, index: usize) -> Option<NodeRef> {
        self.nodes.get(index).cloned()
    }
}

fn collect_by_tag(node: &NodeRef, tag_name: &str, out: &mut Vec<NodeRef>) {
    for child in node.borrow().children() {
        if !child.borrow().is_element() {
            continue;
        }
        if child.borrow().node_name() == tag_name {
            out.push(child.clone());
        }
        collect_by_tag(child, tag_name, out);
    }
}

/// A live view of an element's attributes.
///
/// Items are fresh [`Attr`] values; two calls for the same index return
/// equal but independent values.
#[derive(Debug, Clone)]
pub struct NamedNodeMap {
    element: NodeRef,
}

impl NamedNodeMap {
    pub(crate) fn new(element: NodeRef) -> Self {
        NamedNodeMap { element }
    }

    /// Returns the number of attributes.
    pub fn length(&self) -> usize {
        self.element
            .borrow()
            .as_element()
            .map_or(0, |e| e.attribute_count())
    }

    /// Returns a copy of the attribute at `index`.
    pub fn item(&self, index: usize) -> Option<Attr> {
        let element = self.element.borrow();
        let (name, value) = element.as_element()?.attribute_at(index)?;
        Some(Attr::new(name, value))
    }

    /// Returns a copy of the first attribute called `name`.
    pub fn get_named_item(&self, name: &str) -> Option<Attr> {
        let element = self.element.borrow();
        let value = element.as_element()?.attribute(name)?;
        Some(Attr::new(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{append_child, remove_child};
    use crate::node::{new_element, new_text, NodeInner};

    #[test]
    fn test_child_list_is_live() {
        let parent = new_element("parent");
        let children = NodeInner::child_nodes_of_ref(&parent);
        assert_eq!(children.length(), 0);

        let c1 = new_element("child");
        append_child(&parent, &c1).unwrap();
        append_child(&parent, &new_element("child")).unwrap();
        assert_eq!(children.length(), 2);

        remove_child(&parent, &c1).unwrap();
        assert_eq!(children.length(), 1);
    }

    #[test]
    fn test_item_out_of_range_is_none() {
        let parent = new_element("parent");
        append_child(&parent, &new_element("a")).unwrap();
        let children = NodeInner::child_nodes_of_ref(&parent);

        assert!(children.item(0).is_some());
        assert!(children.item(1).is_none());
        assert!(children.item(usize::MAX).is_none());
    }

    #[test]
    fn test_tag_list_is_snapshot() {
        let root = new_element("root");
        let a = new_element("a");
        append_child(&root, &a).unwrap();

        let list = TagNodeList::new(&root, "a");
        assert_eq!(list.length(), 1);

        append_child(&root, &new_element("a")).unwrap();
        assert_eq!(list.length(), 1);
        assert_eq!(TagNodeList::new(&root, "a").length(), 2);
    }

    #[test]
    fn test_tag_list_preorder_excludes_root() {
        let root = new_element("x");
        let outer = new_element("x");
        let inner = new_element("x");
        let sibling = new_element("x");
        append_child(&root, &outer).unwrap();
        append_child(&outer, &inner).unwrap();
        append_child(&root, &new_text("x")).unwrap();
        append_child(&root, &sibling).unwrap();

        let list = TagNodeList::new(&root, "x");
        let found: Vec<NodeRef> = list.iter().collect();
        assert_eq!(found.len(), 3);
        assert!(Rc::ptr_eq(&found[0], &outer));
        assert!(Rc::ptr_eq(&found[1], &inner));
        assert!(Rc::ptr_eq(&found[2], &sibling));
        assert!(!list.contains(&root));
    }

    #[test]
    fn test_named_node_map_is_live() {
        let element = new_element("parent");
        element
            .borrow_mut()
            .as_element_mut()
            .unwrap()
            .set_attribute("attr1", "val1");
        let attrs = NodeInner::attributes_of_ref(&element).unwrap();
        assert_eq!(attrs.length(), 1);

        element
            .borrow_mut()
            .as_element_mut()
            .unwrap()
            .set_attribute("attr2", "val2");
        assert_eq!(attrs.length(), 2);

        let first = attrs.item(0).unwrap();
        assert_eq!(first.node_name(), "attr1");
        assert_eq!(first.node_value(), "val1");
        assert!(first.parent_node().is_none());
        assert!(attrs.item(2).is_none());

        assert_eq!(attrs.item(0), attrs.item(0));
        assert_eq!(attrs.get_named_item("attr2").unwrap().node_value(), "val2");
        assert!(attrs.get_named_item("missing").is_none());
    }
}
