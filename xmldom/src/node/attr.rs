//! Detached attribute values handed out by [`NamedNodeMap`].
//!
//! [`NamedNodeMap`]: crate::collections::NamedNodeMap

use crate::constants::NodeType;
use crate::node::NodeRef;

/// A name/value pair copied out of an element's attribute table.
///
/// Every query builds a fresh `Attr`; editing it does not touch the element.
/// It never has a parent or children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    name: String,
    value: String,
}

impl Attr {
    pub(crate) fn new(name: &str, value: &str) -> Self {
        Attr {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// Always [`NodeType::Attribute`].
    pub fn node_type(&self) -> NodeType {
        NodeType::Attribute
    }

    /// The attribute name.
    pub fn node_name(&self) -> &str {
        &self.name
    }

    /// The attribute value.
    pub fn node_value(&self) -> &str {
        &self.value
    }

    /// Always `None`.
    pub fn parent_node(&self) -> Option<NodeRef> {
        None
    }

    /// Always `false`.
    pub fn has_child_nodes(&self) -> bool {
        false
    }
}
