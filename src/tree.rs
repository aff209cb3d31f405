use std::fmt;

use crate::balance;
use crate::compare::{Comparator, NaturalOrder};
use crate::error::InvariantError;
use crate::iter::{IntoIter, Iter};
use crate::node::{self, Branch, Link, NodeRef};
use crate::raw::RawTree;

/// An ordered set of keys kept height-balanced as an AVL tree.
///
/// Keys are ordered by the comparator `C`, chosen when the tree is created.
/// Inserting a key that compares equal to a stored key leaves the tree
/// unchanged.
///
/// ```
/// use avl_index::AvlTree;
/// let mut tree = AvlTree::new();
/// for key in [1, 0, 2, 3, 4, 3] {
///     tree.insert(key);
/// }
/// assert_eq!(tree.to_vec(), vec![0, 1, 2, 3, 4]);
/// assert_eq!(tree.next(&2), Some(&3));
/// assert_eq!(tree.take(&3), Some(3));
/// assert_eq!(tree.height(), Some(2));
/// ```
pub struct AvlTree<K, C = NaturalOrder> {
    raw: RawTree<K, C>,
}

/// The outcome of [`AvlTree::remove`].
#[derive(Debug)]
pub struct Removal<'a, K> {
    /// The key that was removed.
    pub key: K,
    /// The lowest node whose subtree changed shape, where rebalancing started.
    /// `None` when the removed node was the root and had at most one child.
    pub rebalanced_from: Option<NodeRef<'a, K>>,
}

impl<K: Ord> AvlTree<K> {
    /// Creates an empty tree ordered by `K`'s `Ord` implementation.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, C> AvlTree<K, C> {
    /// Creates an empty tree ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            raw: RawTree::new(cmp),
        }
    }

    pub(crate) fn from_raw(raw: RawTree<K, C>) -> Self {
        Self { raw }
    }

    /// Returns the comparator ordering this tree.
    pub fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns the height of the root node, or `None` for an empty tree.
    /// A tree with a single key has height 0.
    pub fn height(&self) -> Option<usize> {
        self.root().map(|root| root.height())
    }

    /// Removes all keys, deallocating all memory.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.raw.root.map(NodeRef::new)
    }

    pub(crate) fn root_link(&self) -> Link<K> {
        self.raw.root
    }

    /// Returns the smallest key.
    pub fn first(&self) -> Option<&K> {
        self.raw.first().map(|node_ptr| unsafe { &(*node_ptr.as_ptr()).key })
    }

    /// Returns the largest key.
    pub fn last(&self) -> Option<&K> {
        self.raw.last().map(|node_ptr| unsafe { &(*node_ptr.as_ptr()).key })
    }

    /// Gets an iterator over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.raw)
    }

    /// Visits the keys in ascending order until `visit` returns `false`.
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(&K) -> bool,
    {
        for key in self.iter() {
            if !visit(key) {
                break;
            }
        }
    }

    /// Returns the keys in ascending order.
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Checks every structural invariant of the tree.
    ///
    /// Links must be mutual, the root must have no parent, keys must ascend
    /// in order, cached heights must match the children, no node may lean by
    /// more than one level, and the recorded length must match the node count.
    pub fn validate(&self) -> Result<(), InvariantError>
    where
        C: Comparator<K>,
    {
        if let Some(root_ptr) = self.raw.root {
            if unsafe { root_ptr.as_ref().parent.is_some() } {
                return Err(InvariantError::RootHasParent);
            }
        }

        let mut result = Ok(());
        let mut position = 0;
        self.raw.preorder(|node_ptr| {
            if result.is_err() {
                return;
            }
            result = check_node(node_ptr, position);
            position += 1;
        });
        result?;

        if position != self.raw.len() {
            return Err(InvariantError::LengthMismatch {
                counted: position,
                recorded: self.raw.len(),
            });
        }

        let cmp = self.raw.comparator();
        let mut keys = self.iter();
        if let Some(mut previous) = keys.next() {
            for (position, key) in keys.enumerate() {
                if cmp.compare(previous, key) != std::cmp::Ordering::Less {
                    return Err(InvariantError::OutOfOrder {
                        position: position + 1,
                    });
                }
                previous = key;
            }
        }
        Ok(())
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self)
    where
        C: Comparator<K>,
    {
        if let Err(err) = self.validate() {
            panic!("inconsistent tree: {err}");
        }
    }
}

fn check_node<K>(node_ptr: node::NodePtr<K>, position: usize) -> Result<(), InvariantError> {
    unsafe {
        for branch in [Branch::Left, Branch::Right] {
            if let Some(child_ptr) = node_ptr.as_ref().child(branch) {
                if child_ptr.as_ref().parent != Some(node_ptr) {
                    return Err(InvariantError::BrokenParentLink { position });
                }
            }
        }
    }

    let node = NodeRef::new(node_ptr);
    let left_height = balance::height(unsafe { node_ptr.as_ref().left() });
    let right_height = balance::height(unsafe { node_ptr.as_ref().right() });
    let expected = (1 + left_height.max(right_height)) as usize;
    if node.height() != expected {
        return Err(InvariantError::StaleHeight {
            position,
            cached: node.height(),
            expected,
        });
    }

    let balance = node.balance_factor();
    if !(-1..=1).contains(&balance) {
        return Err(InvariantError::Unbalanced { position, balance });
    }
    Ok(())
}

impl<K, C: Comparator<K>> AvlTree<K, C> {
    /// Inserts a key and returns the node now holding it.
    ///
    /// If an equal key is already present the tree is left unchanged, `key`
    /// is dropped and `None` is returned.
    pub fn insert(&mut self, key: K) -> Option<NodeRef<'_, K>> {
        let node_ptr = self.raw.insert(key)?;
        balance::rebalance(&mut self.raw.root, Some(node_ptr));
        Some(NodeRef::new(node_ptr))
    }

    /// Removes a key.
    ///
    /// Returns the removed key together with the node where rebalancing
    /// started, or `None` if the key was not present.
    pub fn remove(&mut self, key: &K) -> Option<Removal<'_, K>> {
        let (key, changed_from) = self.raw.remove(key)?;
        balance::rebalance(&mut self.raw.root, changed_from);
        Some(Removal {
            key,
            rebalanced_from: changed_from.map(NodeRef::new),
        })
    }

    /// Removes a key and returns it, if it was present.
    pub fn take(&mut self, key: &K) -> Option<K> {
        self.remove(key).map(|removal| removal.key)
    }

    /// Returns the node holding a key equal to `key`.
    pub fn search(&self, key: &K) -> Option<NodeRef<'_, K>> {
        self.raw.find(key).map(NodeRef::new)
    }

    /// Returns the stored key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.search(key).map(|node| node.key())
    }

    /// Returns true if the tree contains a key equal to `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.raw.find(key).is_some()
    }

    /// Returns the smallest key greater than `key`.
    /// Returns `None` if `key` is not in the tree or is the largest key.
    pub fn next(&self, key: &K) -> Option<&K> {
        self.neighbor(key, Branch::Right)
    }

    /// Returns the largest key smaller than `key`.
    /// Returns `None` if `key` is not in the tree or is the smallest key.
    pub fn previous(&self, key: &K) -> Option<&K> {
        self.neighbor(key, Branch::Left)
    }

    fn neighbor(&self, key: &K, toward: Branch) -> Option<&K> {
        let node_ptr = self.raw.find(key)?;
        node::neighbor(node_ptr, toward).map(|node_ptr| unsafe { &(*node_ptr.as_ptr()).key })
    }
}

impl<K: Ord> Default for AvlTree<K> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, C: Clone> Clone for AvlTree<K, C> {
    fn clone(&self) -> Self {
        Self::from_raw(self.raw.duplicate())
    }
}

impl<K: PartialEq, C> PartialEq for AvlTree<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, C> Eq for AvlTree<K, C> {}

impl<K: fmt::Debug, C> fmt::Debug for AvlTree<K, C> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, C: Comparator<K>> Extend<K> for AvlTree<K, C> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = K>,
    {
        iter.into_iter().for_each(move |key| {
            self.insert(key);
        });
    }
}

impl<'a, K, C> IntoIterator for &'a AvlTree<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, C> IntoIterator for AvlTree<K, C> {
    type Item = K;
    type IntoIter = IntoIter<K, C>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.raw)
    }
}
