//! The unbalanced ordered container the AVL layer wraps.
//!
//! `RawTree` owns the nodes and knows how to place, find and splice them
//! according to its comparator. It never rebalances: every structural change
//! reports the lowest node whose subtree changed, and the caller decides
//! what to do from there.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::compare::Comparator;
use crate::node::{self, Branch, Link, Node, NodePtr};

pub(crate) struct RawTree<K, C> {
    pub(crate) root: Link<K>,
    num_nodes: usize,
    cmp: C,
    marker: PhantomData<Box<Node<K>>>,
}

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

impl<K, C> RawTree<K, C> {
    pub(crate) fn new(cmp: C) -> Self {
        Self {
            root: None,
            num_nodes: 0,
            cmp,
            marker: PhantomData,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.num_nodes
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Deallocates all nodes.
    pub(crate) fn clear(&mut self) {
        self.postorder(|node_ptr| unsafe {
            drop(Node::destroy(node_ptr));
        });
        self.root = None;
        self.num_nodes = 0;
    }

    pub(crate) fn first(&self) -> Link<K> {
        self.root.map(|root_ptr| node::extreme(root_ptr, Branch::Left))
    }

    pub(crate) fn last(&self) -> Link<K> {
        self.root.map(|root_ptr| node::extreme(root_ptr, Branch::Right))
    }

    /// Detaches `node_ptr` from the tree and returns the lowest node whose
    /// subtree changed shape, or `None` if the removed node was the root and
    /// nothing above it needs attention.
    ///
    /// A node with two children is replaced by its in-order successor.
    /// The successor is spliced out of its old position first, so the change
    /// point is the successor's former parent (or the successor itself when
    /// that parent was `node_ptr`).
    ///
    /// The node itself stays allocated; its links are stale afterwards.
    pub(crate) fn unlink(&mut self, node_ptr: NodePtr<K>) -> Link<K> {
        debug_assert!(self.num_nodes >= 1);
        self.num_nodes -= 1;
        unsafe {
            match (node_ptr.as_ref().left(), node_ptr.as_ref().right()) {
                (Some(left_ptr), Some(right_ptr)) => {
                    // Smallest node in the right subtree has no left child
                    let successor_ptr = node::extreme(right_ptr, Branch::Left);
                    let successor_parent = successor_ptr.as_ref().parent;
                    let moved_up = successor_parent == Some(node_ptr);
                    if !moved_up {
                        if let Some(successor_parent_ptr) = successor_parent {
                            node::relink(
                                successor_parent_ptr,
                                successor_ptr.as_ref().right(),
                                Branch::Left,
                            );
                        }
                        node::relink(successor_ptr, Some(right_ptr), Branch::Right);
                    }
                    node::relink(successor_ptr, Some(left_ptr), Branch::Left);
                    node::replace_in_parent(&mut self.root, node_ptr, Some(successor_ptr));

                    if moved_up {
                        Some(successor_ptr)
                    } else {
                        successor_parent
                    }
                }
                (child, None) | (None, child) => {
                    let parent = node_ptr.as_ref().parent;
                    node::replace_in_parent(&mut self.root, node_ptr, child);
                    parent
                }
            }
        }
    }

    /// Copies the tree node by node, keeping shape and cached heights.
    pub(crate) fn duplicate(&self) -> Self
    where
        K: Clone,
        C: Clone,
    {
        let mut copy = Self::new(self.cmp.clone());
        let Some(src_root) = self.root else {
            return copy;
        };

        unsafe {
            let clone_node = |src_ptr: NodePtr<K>, parent: Link<K>| {
                let mut dst_ptr = Node::create(parent, src_ptr.as_ref().key.clone());
                dst_ptr.as_mut().height = src_ptr.as_ref().height;
                dst_ptr
            };

            let dst_root = clone_node(src_root, None);
            copy.root = Some(dst_root);
            copy.num_nodes = self.num_nodes;

            let (mut src_ptr, mut dst_ptr) = (src_root, dst_root);
            let mut dir = Direction::FromParent;
            loop {
                match dir {
                    Direction::FromParent => {
                        if let Some(src_left) = src_ptr.as_ref().left() {
                            let dst_left = clone_node(src_left, Some(dst_ptr));
                            dst_ptr.as_mut().set_child(Branch::Left, Some(dst_left));
                            src_ptr = src_left;
                            dst_ptr = dst_left;
                        } else {
                            dir = Direction::FromLeft;
                        }
                    }
                    Direction::FromLeft => {
                        if let Some(src_right) = src_ptr.as_ref().right() {
                            let dst_right = clone_node(src_right, Some(dst_ptr));
                            dst_ptr.as_mut().set_child(Branch::Right, Some(dst_right));
                            src_ptr = src_right;
                            dst_ptr = dst_right;
                            dir = Direction::FromParent;
                        } else {
                            dir = Direction::FromRight;
                        }
                    }
                    Direction::FromRight => {
                        match (src_ptr.as_ref().parent, dst_ptr.as_ref().parent) {
                            (Some(src_parent), Some(dst_parent)) => {
                                if src_parent.as_ref().left() == Some(src_ptr) {
                                    dir = Direction::FromLeft;
                                }
                                src_ptr = src_parent;
                                dst_ptr = dst_parent;
                            }
                            _ => break,
                        }
                    }
                }
            }
        }
        copy
    }

    pub(crate) fn preorder<F: FnMut(NodePtr<K>)>(&self, f: F) {
        self.traverse(f, |_| {}, |_| {});
    }

    fn postorder<F: FnMut(NodePtr<K>)>(&self, f: F) {
        self.traverse(|_| {}, |_| {}, f);
    }

    fn traverse<Pre, In, Post>(&self, mut preorder: Pre, mut inorder: In, mut postorder: Post)
    where
        Pre: FnMut(NodePtr<K>),
        In: FnMut(NodePtr<K>),
        Post: FnMut(NodePtr<K>),
    {
        if let Some(mut node_ptr) = self.root {
            let mut dir = Direction::FromParent;
            loop {
                match dir {
                    Direction::FromParent => {
                        preorder(node_ptr);
                        if let Some(left_ptr) = unsafe { node_ptr.as_ref().left() } {
                            node_ptr = left_ptr;
                        } else {
                            dir = Direction::FromLeft;
                        }
                    }
                    Direction::FromLeft => {
                        inorder(node_ptr);
                        if let Some(right_ptr) = unsafe { node_ptr.as_ref().right() } {
                            node_ptr = right_ptr;
                            dir = Direction::FromParent;
                        } else {
                            dir = Direction::FromRight;
                        }
                    }
                    Direction::FromRight => {
                        // Post order traversal is used for node deletion,
                        // so make sure not to use node pointer after postorder call.
                        if let Some(parent_ptr) = unsafe { node_ptr.as_ref().parent } {
                            if Some(node_ptr) == unsafe { parent_ptr.as_ref().left() } {
                                dir = Direction::FromLeft;
                            } else {
                                dir = Direction::FromRight;
                            }
                            postorder(node_ptr);
                            node_ptr = parent_ptr;
                        } else {
                            postorder(node_ptr);
                            break;
                        }
                    }
                }
            }
        }
    }
}

impl<K, C: Comparator<K>> RawTree<K, C> {
    pub(crate) fn find(&self, key: &K) -> Link<K> {
        let mut current = self.root;
        while let Some(node_ptr) = current {
            current = unsafe {
                match self.cmp.compare(key, &node_ptr.as_ref().key) {
                    Ordering::Equal => break,
                    Ordering::Less => node_ptr.as_ref().left(),
                    Ordering::Greater => node_ptr.as_ref().right(),
                }
            }
        }
        current
    }

    /// Links a new leaf for `key` and returns it.
    /// Returns `None`, dropping `key`, if an equal key is already stored.
    pub(crate) fn insert(&mut self, key: K) -> Link<K> {
        let mut parent: Link<K> = None;
        let mut branch = Branch::Left;
        let mut current = self.root;
        while let Some(node_ptr) = current {
            branch = match self.cmp.compare(&key, unsafe { &node_ptr.as_ref().key }) {
                Ordering::Equal => return None,
                Ordering::Less => Branch::Left,
                Ordering::Greater => Branch::Right,
            };
            parent = current;
            current = unsafe { node_ptr.as_ref().child(branch) };
        }

        let node_ptr = Node::create(parent, key);
        match parent {
            None => self.root = Some(node_ptr),
            Some(mut parent_ptr) => unsafe { parent_ptr.as_mut().set_child(branch, Some(node_ptr)) },
        }
        self.num_nodes += 1;
        Some(node_ptr)
    }

    /// Removes the node holding `key`.
    /// Returns the removed key and the change point reported by [`RawTree::unlink`].
    pub(crate) fn remove(&mut self, key: &K) -> Option<(K, Link<K>)> {
        let node_ptr = self.find(key)?;
        let changed_from = self.unlink(node_ptr);
        let removed = unsafe { Node::destroy(node_ptr) };
        debug_assert!(self.find(&removed).is_none());
        Some((removed, changed_from))
    }
}

impl<K, C> Drop for RawTree<K, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::NaturalOrder;

    fn keys(tree: &RawTree<i32, NaturalOrder>) -> Vec<i32> {
        let mut keys = Vec::new();
        tree.traverse(|_| {}, |node_ptr| keys.push(unsafe { node_ptr.as_ref().key }), |_| {});
        keys
    }

    #[test]
    fn insert_keeps_order_without_balancing() {
        let mut tree = RawTree::new(NaturalOrder);
        for key in [3, 1, 4, 5, 9, 2, 6] {
            assert!(tree.insert(key).is_some());
        }
        assert!(tree.insert(4).is_none());
        assert_eq!(tree.len(), 7);
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5, 6, 9]);
        assert_eq!(tree.first().map(|p| unsafe { p.as_ref().key }), Some(1));
        assert_eq!(tree.last().map(|p| unsafe { p.as_ref().key }), Some(9));
    }

    #[test]
    fn remove_reports_change_point() {
        //     3
        //    / \
        //   1   4
        //    \   \
        //     2   5
        //          \
        //           9
        let mut tree = RawTree::new(NaturalOrder);
        for key in [3, 1, 4, 2, 5, 9] {
            tree.insert(key);
        }

        // Leaf: parent is the change point
        let (removed, changed) = tree.remove(&9).unwrap();
        assert_eq!(removed, 9);
        assert_eq!(changed.map(|p| unsafe { p.as_ref().key }), Some(5));

        // Two children, successor 4 is the right child and moves up
        let (removed, changed) = tree.remove(&3).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(changed.map(|p| unsafe { p.as_ref().key }), Some(4));
        assert_eq!(tree.root.map(|p| unsafe { p.as_ref().key }), Some(4));

        assert!(tree.remove(&42).is_none());
        assert_eq!(keys(&tree), vec![1, 2, 4, 5]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn duplicate_is_independent() {
        let mut tree = RawTree::new(NaturalOrder);
        for key in [5, 2, 8, 1, 3, 7, 9] {
            tree.insert(key);
        }
        let mut copy = tree.duplicate();
        assert_eq!(keys(&copy), keys(&tree));
        assert_eq!(copy.len(), tree.len());

        copy.remove(&5);
        assert_eq!(keys(&copy), vec![1, 2, 3, 7, 8, 9]);
        assert_eq!(keys(&tree), vec![1, 2, 3, 5, 7, 8, 9]);
    }
}
