//! Element lookup by id and by tag name.

use crate::collections::TagNodeList;
use crate::constants::ID_ATTRIBUTE;
use crate::node::NodeRef;

/// Returns the first element at or below `root`, in pre-order, whose `id`
/// attribute equals `id`.
///
/// Ids are not required to be unique; the first match wins. An empty `id`
/// never matches.
pub fn get_element_by_id(root: &NodeRef, id: &str) -> Option<NodeRef> {
    let node = root.borrow();
    let element = node.as_element()?;
    if !id.is_empty() && element.attribute(ID_ATTRIBUTE) == Some(id) {
        return Some(root.clone());
    }
    node.children()
        .iter()
        .find_map(|child| get_element_by_id(child, id))
}

/// Returns a snapshot of the elements below `root` named `tag_name`.
pub fn get_elements_by_tag_name(root: &NodeRef, tag_name: &str) -> TagNodeList {
    TagNodeList::new(root, tag_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::NodeList;
    use crate::mutation::append_child;
    use crate::node::{new_element, new_text};
    use std::rc::Rc;

    fn element_with_id(tag: &str, id: &str) -> NodeRef {
        let node = new_element(tag);
        node.borrow_mut()
            .as_element_mut()
            .unwrap()
            .set_attribute("id", id);
        node
    }

    #[test]
    fn test_get_element_by_id() {
        let parent = element_with_id("parent", "p");
        let child1 = new_element("child");
        let child2 = element_with_id("child", "c");
        append_child(&parent, &child1).unwrap();
        append_child(&parent, &new_text("noise")).unwrap();
        append_child(&parent, &child2).unwrap();

        assert!(Rc::ptr_eq(&get_element_by_id(&parent, "p").unwrap(), &parent));
        assert!(Rc::ptr_eq(&get_element_by_id(&parent, "c").unwrap(), &child2));
        assert!(get_element_by_id(&parent, "nothing").is_none());
        assert!(get_element_by_id(&parent, "").is_none());
    }

    #[test]
    fn test_duplicate_ids_first_preorder_wins() {
        let root = new_element("root");
        let branch = new_element("branch");
        let deep = element_with_id("deep", "dup");
        let shallow = element_with_id("shallow", "dup");
        append_child(&root, &branch).unwrap();
        append_child(&branch, &deep).unwrap();
        append_child(&root, &shallow).unwrap();

        let found = get_element_by_id(&root, "dup").unwrap();
        assert!(Rc::ptr_eq(&found, &deep));
    }

    #[test]
    fn test_get_elements_by_tag_name() {
        let root = new_element("parent");
        for _ in 0..2 {
            let child = new_element("child");
            append_child(&child, &new_element("grandchild")).unwrap();
            append_child(&root, &child).unwrap();
        }
        let childless = new_element("child");
        append_child(&root, &childless).unwrap();

        assert_eq!(get_elements_by_tag_name(&root, "grandchild").length(), 2);
        assert_eq!(get_elements_by_tag_name(&root, "child").length(), 3);
        assert_eq!(get_elements_by_tag_name(&childless, "grandchild").length(), 0);
    }
}
