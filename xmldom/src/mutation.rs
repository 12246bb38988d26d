//! Tree mutation: append, insert, replace and remove.
//!
//! A node is a child of at most one parent. Every insertion first detaches
//! the node from wherever it currently is, so moving a node is just
//! inserting it somewhere else. Children are located by identity with a
//! linear scan.
//!
//! Each operation validates before it changes anything; on error the tree is
//! left exactly as it was.

use std::rc::{Rc, Weak};

use tracing::trace;

use crate::error::{Error, Result};
use crate::node::{NodeInner, NodeRef};

/// Appends `child` as the last child of `parent` and returns it.
///
/// If `child` is already attached, it is removed from its current parent
/// first. Appending a child to its own parent moves it to the end.
pub fn append_child(parent: &NodeRef, child: &NodeRef) -> Result<NodeRef> {
    check_insertable(parent, child, None)?;
    detach(child);
    attach_at(parent, None, child);
    Ok(child.clone())
}

/// Inserts `new_child` immediately before `ref_child` and returns it.
///
/// With no reference node this is [`append_child`]. If `ref_child` is not a
/// child of `parent`, nothing changes and [`Error::NotFound`] is returned.
pub fn insert_before(
    parent: &NodeRef,
    new_child: &NodeRef,
    ref_child: Option<&NodeRef>,
) -> Result<NodeRef> {
    let Some(ref_child) = ref_child else {
        return append_child(parent, new_child);
    };
    if parent.borrow().index_of(ref_child).is_none() {
        return Err(Error::NotFound);
    }
    if Rc::ptr_eq(new_child, ref_child) {
        return Ok(new_child.clone());
    }
    check_insertable(parent, new_child, None)?;

    detach(new_child);
    // The reference may have shifted if new_child was an earlier sibling.
    let index = parent.borrow().index_of(ref_child).ok_or(Error::NotFound)?;
    attach_at(parent, Some(index), new_child);
    Ok(new_child.clone())
}

/// Puts `new_child` where `old_child` was and returns `old_child`, now
/// detached.
pub fn replace_child(parent: &NodeRef, new_child: &NodeRef, old_child: &NodeRef) -> Result<NodeRef> {
    if parent.borrow().index_of(old_child).is_none() {
        return Err(Error::NotFound);
    }
    if Rc::ptr_eq(new_child, old_child) {
        return Ok(old_child.clone());
    }
    check_insertable(parent, new_child, Some(old_child))?;

    detach(new_child);
    let index = parent.borrow().index_of(old_child).ok_or(Error::NotFound)?;
    {
        let mut parent_borrowed = parent.borrow_mut();
        parent_borrowed.children_mut()[index] = new_child.clone();
    }
    old_child.borrow_mut().set_parent(Weak::new());
    new_child.borrow_mut().set_parent(Rc::downgrade(parent));
    trace!(
        parent = parent.borrow().id(),
        new = new_child.borrow().id(),
        old = old_child.borrow().id(),
        "replaced child"
    );
    Ok(old_child.clone())
}

/// Removes `child` from `parent` and returns it.
///
/// If `child` is not a child of `parent`, nothing changes and
/// [`Error::NotFound`] is returned.
pub fn remove_child(parent: &NodeRef, child: &NodeRef) -> Result<NodeRef> {
    let index = parent.borrow().index_of(child).ok_or(Error::NotFound)?;
    parent.borrow_mut().children_mut().remove(index);
    child.borrow_mut().set_parent(Weak::new());
    trace!(
        parent = parent.borrow().id(),
        child = child.borrow().id(),
        "removed child"
    );
    Ok(child.clone())
}

/// Rejects insertions that would break the shape of the tree.
///
/// `replacing` is a child of `parent` that leaves as `child` arrives.
fn check_insertable(parent: &NodeRef, child: &NodeRef, replacing: Option<&NodeRef>) -> Result<()> {
    let parent_borrowed = parent.borrow();
    if parent_borrowed.is_character_data() {
        return Err(Error::hierarchy(format!(
            "{} nodes cannot have children",
            parent_borrowed.node_name()
        )));
    }
    if child.borrow().is_document() {
        return Err(Error::hierarchy("a document cannot be inserted as a child"));
    }
    if NodeInner::is_inclusive_ancestor_of_ref(child, parent) {
        return Err(Error::hierarchy("a node cannot be inserted into itself"));
    }
    if parent_borrowed.is_document() {
        if !child.borrow().is_element() {
            return Err(Error::hierarchy(
                "only an element can be the child of a document",
            ));
        }
        let occupied = parent_borrowed.children().iter().any(|existing| {
            !Rc::ptr_eq(existing, child) && !replacing.is_some_and(|r| Rc::ptr_eq(existing, r))
        });
        if occupied {
            return Err(Error::hierarchy("document already has a root element"));
        }
    }
    Ok(())
}

/// Removes a node from its current parent, if it has one.
fn detach(child: &NodeRef) {
    let parent = child.borrow().parent_node();
    if let Some(parent) = parent {
        let index = parent.borrow().index_of(child);
        if let Some(index) = index {
            parent.borrow_mut().children_mut().remove(index);
        }
        child.borrow_mut().set_parent(Weak::new());
    }
}

/// Inserts a detached node at `index`, or at the end when `index` is `None`.
fn attach_at(parent: &NodeRef, index: Option<usize>, child: &NodeRef) {
    {
        let mut parent_borrowed = parent.borrow_mut();
        let children = parent_borrowed.children_mut();
        match index {
            Some(i) => children.insert(i, child.clone()),
            None => children.push(child.clone()),
        }
    }
    child.borrow_mut().set_parent(Rc::downgrade(parent));
    trace!(
        parent = parent.borrow().id(),
        child = child.borrow().id(),
        index = ?index,
        "attached child"
    );
}
