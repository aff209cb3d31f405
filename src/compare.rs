//! Key ordering used for every placement and equality decision of a tree.

use std::cmp::Ordering;

/// A total order over keys.
///
/// A tree's comparator is fixed when the tree is constructed. Keys that
/// compare `Equal` are treated as the same key.
///
/// Any `Fn(&K, &K) -> Ordering` is a comparator:
///
/// ```
/// use avl_index::AvlTree;
/// let mut tree = AvlTree::with_comparator(|a: &f64, b: &f64| a.total_cmp(b));
/// tree.insert(2.5);
/// tree.insert(-1.0);
/// assert_eq!(tree.first(), Some(&-1.0));
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;
}

/// Orders keys by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.cmp(rhs)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        self(lhs, rhs)
    }
}
