//! Height accounting, rotations and the upward rebalancing walk.
//!
//! These functions work on a root slot plus raw nodes so they stay
//! independent of the comparator. Every node passed in must belong to the
//! tree whose root slot is given.

use std::cmp;

use crate::node::{self, Branch, Link, NodePtr};

/// Height of a subtree; an absent subtree has height -1.
#[inline]
pub(crate) fn height<K>(link: Link<K>) -> isize {
    match link {
        None => -1,
        Some(node_ptr) => unsafe { node_ptr.as_ref().height as isize },
    }
}

/// Recomputes the cached height of `node_ptr` from its children.
/// Both children must already carry correct heights.
pub(crate) fn update_height<K>(mut node_ptr: NodePtr<K>) {
    unsafe {
        let node = node_ptr.as_mut();
        let new_height = 1 + cmp::max(height(node.left()), height(node.right()));
        debug_assert!(new_height >= 0);
        node.height = new_height as usize;
    }
}

pub(crate) fn balance_factor<K>(node_ptr: NodePtr<K>) -> isize {
    unsafe { height(node_ptr.as_ref().right()) - height(node_ptr.as_ref().left()) }
}

/// Rotates `node_ptr` down toward `toward`, lifting its child on the other side.
fn rotate<K>(root: &mut Link<K>, node_ptr: NodePtr<K>, toward: Branch) {
    let heavy_branch = !toward;
    let Some(heavy_ptr) = (unsafe { node_ptr.as_ref().child(heavy_branch) }) else {
        debug_assert!(false, "rotation without a child to lift");
        return;
    };

    unsafe {
        // node's parent (or the root slot) <--> heavy child
        node::replace_in_parent(root, node_ptr, Some(heavy_ptr));

        // node[heavy_branch] <--> heavy child[toward]
        node::relink(node_ptr, heavy_ptr.as_ref().child(toward), heavy_branch);

        // heavy child[toward] <--> node
        node::relink(heavy_ptr, Some(node_ptr), toward);

        debug_assert!(heavy_ptr.as_ref().parent.is_some() || *root == Some(heavy_ptr));
        debug_assert!(node_ptr.as_ref().parent == Some(heavy_ptr));
    }

    // node is now below the heavy child, so its height goes first
    update_height(node_ptr);
    update_height(heavy_ptr);
    debug_assert!(unsafe { heavy_ptr.as_ref().height > node_ptr.as_ref().height });
}

/// Lifts the heavy child on the side opposite to `toward`.
/// A zig-zag (heavy grandchild on the inner side) is straightened first,
/// which turns the double rotation into two single ones.
fn rotate_heavy_branch<K>(root: &mut Link<K>, node_ptr: NodePtr<K>, toward: Branch) {
    let branch = !toward;
    let Some(heavy_ptr) = (unsafe { node_ptr.as_ref().child(branch) }) else {
        debug_assert!(false, "heavy branch is empty");
        return;
    };

    let (inner, outer) = unsafe {
        (
            heavy_ptr.as_ref().child(toward),
            heavy_ptr.as_ref().child(branch),
        )
    };
    if height(inner) > height(outer) {
        log::trace!("double rotation {:?}, straightening {:?} child first", toward, branch);
        rotate(root, heavy_ptr, branch);
    } else {
        log::trace!("single rotation {:?}", toward);
    }
    rotate(root, node_ptr, toward);
}

/// Restores heights and balance from `start_from` up to the root.
///
/// The walk is iterative and visits every ancestor of `start_from`, fixing
/// each node whose balance factor left the range -1..=1. The parent is read
/// before the node is touched because a rotation moves the node down.
pub(crate) fn rebalance<K>(root: &mut Link<K>, start_from: Link<K>) {
    let mut current = start_from;
    while let Some(node_ptr) = current {
        let parent = unsafe { node_ptr.as_ref().parent };
        update_height(node_ptr);

        let balance = balance_factor(node_ptr);
        // A single insert or removal moves a subtree height by at most one
        debug_assert!((-2..=2).contains(&balance));
        if balance < -1 {
            // Left heavy
            rotate_heavy_branch(root, node_ptr, Branch::Right);
        } else if balance > 1 {
            // Right heavy
            rotate_heavy_branch(root, node_ptr, Branch::Left);
        }

        current = parent;
    }
}
