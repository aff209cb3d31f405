use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::compare::NaturalOrder;
use crate::node::{self, Branch, Link, Node};
use crate::raw::RawTree;

/// An iterator over the keys of a tree in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`AvlTree`].
///
/// [`AvlTree`]: crate::AvlTree
/// [`iter`]: crate::AvlTree::iter
pub struct Iter<'a, K> {
    front: Link<K>,
    back: Link<K>,
    remaining: usize,
    marker: PhantomData<&'a Node<K>>,
}

/// An owning iterator over the keys of a tree in ascending order.
pub struct IntoIter<K, C = NaturalOrder> {
    raw: RawTree<K, C>,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new<C>(raw: &'a RawTree<K, C>) -> Self {
        Self {
            front: raw.first(),
            back: raw.last(),
            remaining: raw.len(),
            marker: PhantomData,
        }
    }

    fn step(&mut self, toward: Branch) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let end = match toward {
            Branch::Right => &mut self.front,
            Branch::Left => &mut self.back,
        };
        let node_ptr = (*end)?;
        *end = node::neighbor(node_ptr, toward);
        self.remaining -= 1;
        Some(unsafe { &(*node_ptr.as_ptr()).key })
    }
}

// Auto derived clone seems to have an invalid type bound of K: Clone
impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            marker: PhantomData,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.step(Branch::Right)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.step(Branch::Left)
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K, C> IntoIter<K, C> {
    pub(crate) fn new(raw: RawTree<K, C>) -> Self {
        Self { raw }
    }

    // Nodes are unlinked without rebalancing; the remaining shape only has
    // to stay ordered until the iterator is dropped.
    fn pop(&mut self, branch: Branch) -> Option<K> {
        let node_ptr = match branch {
            Branch::Left => self.raw.first(),
            Branch::Right => self.raw.last(),
        }?;
        self.raw.unlink(node_ptr);
        Some(unsafe { Node::destroy(node_ptr) })
    }
}

impl<K: fmt::Debug, C> fmt::Debug for IntoIter<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(Iter::new(&self.raw)).finish()
    }
}

impl<K, C> Iterator for IntoIter<K, C> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.pop(Branch::Left)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.raw.len(), Some(self.raw.len()))
    }
}

impl<K, C> DoubleEndedIterator for IntoIter<K, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.pop(Branch::Right)
    }
}

impl<K, C> ExactSizeIterator for IntoIter<K, C> {}

impl<K, C> FusedIterator for IntoIter<K, C> {}
