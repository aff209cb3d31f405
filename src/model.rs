//! Model-based tests: every operation is mirrored on a `BTreeSet` and the
//! tree must agree with it while staying structurally valid.

use std::collections::BTreeSet;

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

use crate::AvlTree;

#[derive(Copy, Clone, Debug)]
pub enum Op {
    Insert(u16),
    Remove(u16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u16..256).prop_map(Op::Insert),
        (0u16..256).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn ops_match_btree_set(ops in vec(op_strategy(), 0..300)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    prop_assert_eq!(tree.insert(key).is_some(), model.insert(key));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(tree.take(&key), model.take(&key));
                }
            }
            prop_assert_eq!(tree.validate(), Ok(()));
            prop_assert_eq!(tree.len(), model.len());
        }

        prop_assert!(tree.iter().eq(model.iter()));
        prop_assert!(tree.iter().rev().eq(model.iter().rev()));
        prop_assert_eq!(tree.first(), model.first());
        prop_assert_eq!(tree.last(), model.last());
    }

    #[test]
    fn neighbors_match_btree_set(keys in btree_set(0u16..512, 1..100), probe in 0u16..512) {
        let tree: AvlTree<u16> = keys.iter().copied().collect();

        let (next, previous) = if keys.contains(&probe) {
            (keys.range(probe + 1..).next(), keys.range(..probe).next_back())
        } else {
            (None, None)
        };
        prop_assert_eq!(tree.next(&probe), next);
        prop_assert_eq!(tree.previous(&probe), previous);
    }

    #[test]
    fn set_algebra_laws(
        lhs in btree_set(0u16..128, 0..64),
        rhs in btree_set(0u16..128, 0..64),
    ) {
        let a: AvlTree<u16> = lhs.iter().copied().collect();
        let b: AvlTree<u16> = rhs.iter().copied().collect();

        let union = a.union(&b);
        let intersection = a.intersection(&b);
        let difference = a.difference(&b);
        let symmetric = a.symmetric_difference(&b);
        for tree in [&union, &intersection, &difference, &symmetric] {
            prop_assert_eq!(tree.validate(), Ok(()));
        }

        prop_assert_eq!(union.len(), a.len() + b.len() - intersection.len());
        prop_assert!(union.iter().eq(lhs.union(&rhs)));
        prop_assert!(intersection.iter().eq(lhs.intersection(&rhs)));
        prop_assert!(difference.iter().eq(lhs.difference(&rhs)));
        prop_assert!(symmetric.iter().eq(union.difference(&intersection).iter()));

        prop_assert_eq!(a.is_disjoint(&b), lhs.is_disjoint(&rhs));
        prop_assert_eq!(a.is_subset(&b), lhs.is_subset(&rhs));

        // Operands are left as they were
        prop_assert!(a.iter().eq(lhs.iter()));
        prop_assert!(b.iter().eq(rhs.iter()));
    }

    #[test]
    fn clone_is_deep(keys in vec(0u16..1024, 0..200), removed in 0u16..1024) {
        let tree: AvlTree<u16> = keys.iter().copied().collect();
        let mut copy = tree.clone();
        prop_assert_eq!(copy.validate(), Ok(()));
        prop_assert_eq!(&copy, &tree);
        prop_assert_eq!(copy.height(), tree.height());

        copy.take(&removed);
        prop_assert_eq!(copy.validate(), Ok(()));
        prop_assert_eq!(tree.contains(&removed), keys.contains(&removed));
    }
}
