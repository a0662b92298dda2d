//! Model-based checking of [`SplayTree`] against [`BTreeSet`].
//!
//! Used by the unit tests through `proptest` and by the fuzz targets through `arbitrary`.

extern crate std;

use std::{collections::BTreeSet, prelude::v1::*};

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::{SizeNode, SplayTree, SubtreeSize};

type ModelTree = SplayTree<SizeNode<u32>>;

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Find(ItemValue),
    Delete(ItemValue),
    FindMin,
    FindMax,
    Rank(ItemValue),
    Kth(usize),
    Prev(ItemValue),
    Next(ItemValue),
}

impl Op {
    // Resolves index-based values against the keys currently in the model, so that operations
    // hit existing keys often enough to be interesting.
    fn finalize(self, model: &BTreeSet<u32>) -> FinalOp {
        fn get_value(model: &BTreeSet<u32>, i: ItemValue) -> u32 {
            match i {
                ItemValue::Index(idx) => {
                    if model.is_empty() {
                        idx as u32
                    } else {
                        model.iter().nth(idx % model.len()).copied().unwrap_or(0)
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(model, item)),
            Op::Find(item) => FinalOp::Find(get_value(model, item)),
            Op::Delete(item) => FinalOp::Delete(get_value(model, item)),
            Op::FindMin => FinalOp::FindMin,
            Op::FindMax => FinalOp::FindMax,
            Op::Rank(item) => FinalOp::Rank(get_value(model, item)),
            Op::Kth(k) => FinalOp::Kth(k % (model.len() + 2)),
            Op::Prev(item) => FinalOp::Prev(get_value(model, item)),
            Op::Next(item) => FinalOp::Next(get_value(model, item)),
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    Find(u32),
    Delete(u32),
    FindMin,
    FindMax,
    Rank(u32),
    Kth(usize),
    Prev(u32),
    Next(u32),
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        value_strategy().prop_map(Op::Insert),
        value_strategy().prop_map(Op::Find),
        value_strategy().prop_map(Op::Delete),
        Just(Op::FindMin),
        Just(Op::FindMax),
        value_strategy().prop_map(Op::Rank),
        (0usize..1000).prop_map(Op::Kth),
        value_strategy().prop_map(Op::Prev),
        value_strategy().prop_map(Op::Next),
    ]
}

/// Checks the structural invariants plus the size augmentation at every node.
pub fn assert_consistent(tree: &ModelTree) {
    tree.assert_invariants();

    // Every node's size is one more than its children's; checking the whole tree this way
    // also checks that the root's size equals the length.
    let mut stack: Vec<_> = tree.root().into_iter().collect();
    while let Some(node) = stack.pop() {
        let left = tree.left(node);
        let right = tree.right(node);

        let expected = 1 + left.map_or(0, |l| l.size()) + right.map_or(0, |r| r.size());
        assert_eq!(node.size(), expected, "stale size at key {}", node.key());

        stack.extend(left);
        stack.extend(right);
    }

    assert_eq!(tree.root().map_or(0, |r| r.size()), tree.len());
}

fn root_key(tree: &ModelTree) -> Option<u32> {
    tree.root().map(|r| *r.key())
}

pub fn run_btree_equivalence(ops: Vec<Op>) {
    let mut btree = BTreeSet::new();
    let mut splay: ModelTree = SplayTree::new();

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&btree);

        match final_op {
            FinalOp::Insert(value) => {
                btree.insert(value);

                let from_splay = *splay.insert(value).key();

                assert_eq!(value, from_splay, "FinalOp #{op_id}: {final_op:?}");
                assert_eq!(root_key(&splay), Some(value), "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Find(value) => {
                let from_btree = btree.get(&value).copied();
                let from_splay = splay.find(&value).map(|n| *n.key());

                assert_eq!(from_btree, from_splay, "FinalOp #{op_id}: {final_op:?}");
                if from_splay.is_some() {
                    assert_eq!(root_key(&splay), from_splay, "FinalOp #{op_id}: {final_op:?}");
                }
            }

            FinalOp::Delete(value) => {
                let from_btree = btree.remove(&value);
                let from_splay = splay.delete(&value);

                assert_eq!(from_btree, from_splay, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::FindMin => {
                let from_btree = btree.first().copied();
                let from_splay = splay.find_min().map(|n| *n.key());

                assert_eq!(from_btree, from_splay, "FinalOp #{op_id}: {final_op:?}");
                assert_eq!(root_key(&splay), from_splay, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::FindMax => {
                let from_btree = btree.last().copied();
                let from_splay = splay.find_max().map(|n| *n.key());

                assert_eq!(from_btree, from_splay, "FinalOp #{op_id}: {final_op:?}");
                assert_eq!(root_key(&splay), from_splay, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Rank(value) => {
                let from_btree = if btree.contains(&value) {
                    btree.range(..value).count() + 1
                } else {
                    0
                };
                let from_splay = splay.rank(&value);

                assert_eq!(from_btree, from_splay, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Kth(k) => {
                let from_btree = k.checked_sub(1).and_then(|i| btree.iter().nth(i).copied());
                let from_splay = splay.kth(k).map(|n| *n.key());

                assert_eq!(from_btree, from_splay, "FinalOp #{op_id}: {final_op:?}");
                if let Some(key) = from_splay {
                    assert_eq!(root_key(&splay), Some(key), "FinalOp #{op_id}: {final_op:?}");
                    assert_eq!(splay.rank(&key), k, "FinalOp #{op_id}: {final_op:?}");
                }
            }

            FinalOp::Prev(value) => {
                let from_btree = btree.range(..value).next_back().copied();
                let from_splay = splay.prev(&value).map(|n| *n.key());

                assert_eq!(from_btree, from_splay, "FinalOp #{op_id}: {final_op:?}");
                if from_splay.is_some() {
                    assert_eq!(root_key(&splay), from_splay, "FinalOp #{op_id}: {final_op:?}");
                }
            }

            FinalOp::Next(value) => {
                let from_btree = btree
                    .range((core::ops::Bound::Excluded(value), core::ops::Bound::Unbounded))
                    .next()
                    .copied();
                let from_splay = splay.next(&value).map(|n| *n.key());

                assert_eq!(from_btree, from_splay, "FinalOp #{op_id}: {final_op:?}");
                if from_splay.is_some() {
                    assert_eq!(root_key(&splay), from_splay, "FinalOp #{op_id}: {final_op:?}");
                }
            }
        }

        assert_consistent(&splay);
        assert_eq!(btree.len(), splay.len());
        assert!(btree.iter().zip(splay.iter()).all(|(&a, b)| a == *b.key()));
    }
}

fn build(keys: &[u32]) -> ModelTree {
    let mut tree = SplayTree::new();
    for &key in keys {
        tree.insert(key);
    }
    tree
}

/// Splits `keys` at `pivot` into two trees, joins them back, and checks the result.
pub fn run_join_equivalence(keys: Vec<u32>, pivot: u32) {
    let (low, high): (Vec<u32>, Vec<u32>) = keys.iter().partition(|&&k| k < pivot);

    let mut left = build(&low);
    let mut right = build(&high);
    let expected: BTreeSet<u32> = keys.iter().copied().collect();
    let expected_len = left.len() + right.len();

    left.join(&mut right);

    assert_consistent(&left);
    assert!(right.is_empty());
    assert!(right.root().is_none());
    assert_eq!(left.len(), expected_len);
    assert!(expected.iter().eq(left.iter().map(|n| n.key())));
}

/// Merges two trees with arbitrary, possibly overlapping keys, and checks the result.
pub fn run_merge_equivalence(a: Vec<u32>, b: Vec<u32>) {
    let mut left = build(&a);
    let mut right = build(&b);
    let expected: BTreeSet<u32> = a.iter().chain(&b).copied().collect();

    left.merge(&mut right);

    assert_consistent(&left);
    assert!(right.is_empty());
    assert_eq!(left.len(), expected.len());
    assert!(expected.iter().eq(left.iter().map(|n| n.key())));

    for (i, key) in expected.iter().enumerate() {
        assert_eq!(left.rank(key), i + 1);
    }
}
