//! Set algebra over two trees.
//!
//! Every operation merges the ascending key sequences of both operands in a
//! single pass and inserts each selected key into a fresh tree through the
//! ordinary balanced insert. The operands are never modified.
//!
//! Both operands must order their keys the same way. This is not checked:
//! merging trees whose comparators disagree yields an unspecified selection
//! of keys (the result tree itself is still a valid tree).

use std::cmp::Ordering;

use crate::compare::Comparator;
use crate::iter::Iter;
use crate::AvlTree;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SetOp {
    Union,
    Intersection,
    Difference,
    SymmetricDifference,
}

/// Where a merged key was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Lhs,
    Rhs,
    Both,
}

impl SetOp {
    fn keeps(self, side: Side) -> bool {
        match self {
            SetOp::Union => true,
            SetOp::Intersection => side == Side::Both,
            SetOp::Difference => side == Side::Lhs,
            SetOp::SymmetricDifference => side != Side::Both,
        }
    }

    // Once a side runs dry, some operations cannot select anything more.
    fn exhausted(self, lhs_done: bool, rhs_done: bool) -> bool {
        match self {
            SetOp::Union | SetOp::SymmetricDifference => lhs_done && rhs_done,
            SetOp::Intersection => lhs_done || rhs_done,
            SetOp::Difference => lhs_done,
        }
    }
}

/// A lazy merge of two ascending key sequences, yielding the keys selected
/// by a set operation, in ascending order.
struct Merge<'a, K, C> {
    op: SetOp,
    cmp: &'a C,
    lhs_peek: Option<&'a K>,
    rhs_peek: Option<&'a K>,
    lhs_iter: Iter<'a, K>,
    rhs_iter: Iter<'a, K>,
}

impl<'a, K, C: Comparator<K>> Merge<'a, K, C> {
    fn new(op: SetOp, lhs: &'a AvlTree<K, C>, rhs: &'a AvlTree<K, C>) -> Self {
        let mut lhs_iter = lhs.iter();
        let mut rhs_iter = rhs.iter();
        Self {
            op,
            cmp: lhs.comparator(),
            lhs_peek: lhs_iter.next(),
            rhs_peek: rhs_iter.next(),
            lhs_iter,
            rhs_iter,
        }
    }
}

impl<'a, K, C: Comparator<K>> Iterator for Merge<'a, K, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self
                .op
                .exhausted(self.lhs_peek.is_none(), self.rhs_peek.is_none())
            {
                return None;
            }
            let (key, side) = match (self.lhs_peek, self.rhs_peek) {
                (None, None) => return None,
                (Some(lhs), None) => {
                    self.lhs_peek = self.lhs_iter.next();
                    (lhs, Side::Lhs)
                }
                (None, Some(rhs)) => {
                    self.rhs_peek = self.rhs_iter.next();
                    (rhs, Side::Rhs)
                }
                (Some(lhs), Some(rhs)) => match self.cmp.compare(lhs, rhs) {
                    Ordering::Less => {
                        self.lhs_peek = self.lhs_iter.next();
                        (lhs, Side::Lhs)
                    }
                    Ordering::Equal => {
                        self.lhs_peek = self.lhs_iter.next();
                        self.rhs_peek = self.rhs_iter.next();
                        (lhs, Side::Both)
                    }
                    Ordering::Greater => {
                        self.rhs_peek = self.rhs_iter.next();
                        (rhs, Side::Rhs)
                    }
                },
            };
            if self.op.keeps(side) {
                return Some(key);
            }
        }
    }
}

impl<K, C: Comparator<K>> AvlTree<K, C> {
    /// Returns a new tree with the keys of `self` or `other`.
    /// Where both trees hold equal keys, the key of `self` is kept.
    ///
    /// ```
    /// use avl_index::AvlTree;
    /// let a: AvlTree<_> = [1, 3, 5].into_iter().collect();
    /// let b: AvlTree<_> = [3, 4].into_iter().collect();
    /// assert_eq!(a.union(&b).to_vec(), vec![1, 3, 4, 5]);
    /// ```
    pub fn union(&self, other: &Self) -> Self
    where
        K: Clone,
        C: Clone,
    {
        self.combine(other, SetOp::Union)
    }

    /// Returns a new tree with the keys found in both `self` and `other`.
    pub fn intersection(&self, other: &Self) -> Self
    where
        K: Clone,
        C: Clone,
    {
        self.combine(other, SetOp::Intersection)
    }

    /// Returns a new tree with the keys of `self` that are not in `other`.
    pub fn difference(&self, other: &Self) -> Self
    where
        K: Clone,
        C: Clone,
    {
        self.combine(other, SetOp::Difference)
    }

    /// Returns a new tree with the keys found in exactly one of `self` and `other`.
    pub fn symmetric_difference(&self, other: &Self) -> Self
    where
        K: Clone,
        C: Clone,
    {
        self.combine(other, SetOp::SymmetricDifference)
    }

    /// Returns `true` if `self` has no keys in common with `other`.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        Merge::new(SetOp::Intersection, self, other).next().is_none()
    }

    /// Returns `true` if every key of `self` is also in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && Merge::new(SetOp::Difference, self, other).next().is_none()
    }

    fn combine(&self, other: &Self, op: SetOp) -> Self
    where
        K: Clone,
        C: Clone,
    {
        let mut tree = Self::with_comparator(self.comparator().clone());
        for key in Merge::new(op, self, other) {
            tree.insert(key.clone());
        }
        log::debug!(
            "{:?} of {} and {} keys yields {} keys",
            op,
            self.len(),
            other.len(),
            tree.len()
        );
        tree
    }
}
