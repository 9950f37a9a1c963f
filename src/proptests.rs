use crate::codec::{KeyCodec, TagSet};
use crate::error::Error;
use crate::key::{OrderedKey, Tag, Value};
use crate::set::OrderedSet;
use crate::universe::UniverseNode;

use core::ops::Bound;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::vec::Vec;

#[derive(Clone, Debug)]
enum Op {
    Insert(u64),
    Remove(u64),
    Contains(u64),
    Successor(u64),
    Predecessor(u64),
}

fn ops_strategy(size: u128) -> impl Strategy<Value = Vec<Op>> {
    let last = (size - 1) as u64;
    let key = 0..=last;
    let op = prop_oneof![
        40 => key.clone().prop_map(Op::Insert),
        25 => key.clone().prop_map(Op::Remove),
        15 => key.clone().prop_map(Op::Contains),
        10 => key.clone().prop_map(Op::Successor),
        10 => key.prop_map(Op::Predecessor),
    ];
    prop::collection::vec(op, 0..=400)
}

/// Universes with exact and inexact square roots.
fn sized_ops() -> impl Strategy<Value = (u128, Vec<Op>)> {
    prop_oneof![Just(2u128), Just(3), Just(16), Just(17), Just(256), Just(1000), Just(1 << 16)]
        .prop_flat_map(|size| (Just(size), ops_strategy(size)))
}

/// Keys spread over the whole 64-bit universe but clustered so that
/// clusters actually fill up.
fn wide_ops() -> impl Strategy<Value = Vec<Op>> {
    let key = (any::<u8>(), 0u64..64).prop_map(|(hi, lo)| ((hi as u64) << 56) | lo);
    let op = prop_oneof![
        45 => key.clone().prop_map(Op::Insert),
        25 => key.clone().prop_map(Op::Remove),
        10 => key.clone().prop_map(Op::Contains),
        10 => key.clone().prop_map(Op::Successor),
        10 => key.prop_map(Op::Predecessor),
    ];
    prop::collection::vec(op, 0..=300)
}

fn check_against_model(
    node: &mut UniverseNode,
    model: &mut BTreeSet<u64>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    for op in ops {
        match op {
            Op::Insert(key) => {
                prop_assert_eq!(node.insert(key).unwrap(), model.insert(key));
            }
            Op::Remove(key) => {
                prop_assert_eq!(node.remove(key).unwrap(), model.remove(&key));
            }
            Op::Contains(key) => {
                prop_assert_eq!(node.contains(key).unwrap(), model.contains(&key));
            }
            Op::Successor(key) => {
                let expected = model
                    .range((Bound::Excluded(key), Bound::Unbounded))
                    .next()
                    .copied();
                prop_assert_eq!(node.successor(key).unwrap(), expected);
            }
            Op::Predecessor(key) => {
                let expected = model.range(..key).next_back().copied();
                prop_assert_eq!(node.predecessor(key).unwrap(), expected);
            }
        }
        prop_assert_eq!(node.min(), model.first().copied());
        prop_assert_eq!(node.max(), model.last().copied());
    }

    prop_assert_eq!(node.validate(), model.len());
    let got: Vec<u64> = node.keys().collect();
    let expected: Vec<u64> = model.iter().copied().collect();
    prop_assert_eq!(got, expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_node_matches_btreeset((size, ops) in sized_ops()) {
        let mut node = UniverseNode::new(size).unwrap();
        let mut model = BTreeSet::new();
        check_against_model(&mut node, &mut model, ops)?;
    }

    #[test]
    fn prop_wide_node_matches_btreeset(ops in wide_ops()) {
        let mut node = UniverseNode::new(crate::MAX_UNIVERSE).unwrap();
        let mut model = BTreeSet::new();
        check_against_model(&mut node, &mut model, ops)?;
    }

    #[test]
    fn prop_i32_round_trip(v in any::<i32>()) {
        prop_assert_eq!(i32::from_ordered(v.to_ordered()), v);
    }

    #[test]
    fn prop_f32_round_trip(v in any::<f32>().prop_filter("NaN", |v| !v.is_nan())) {
        prop_assert_eq!(f32::from_ordered(v.to_ordered()).to_bits(), v.to_bits());
    }

    #[test]
    fn prop_f64_round_trip(v in any::<f64>().prop_filter("NaN", |v| !v.is_nan())) {
        prop_assert_eq!(f64::from_ordered(v.to_ordered()).to_bits(), v.to_bits());
    }

    #[test]
    fn prop_i32_monotonic(a in any::<i32>(), b in any::<i32>()) {
        prop_assert_eq!(a.cmp(&b), a.to_ordered().cmp(&b.to_ordered()));
    }

    #[test]
    fn prop_f32_monotonic(
        a in any::<f32>().prop_filter("NaN", |v| !v.is_nan()),
        b in any::<f32>().prop_filter("NaN", |v| !v.is_nan()),
    ) {
        let (ka, kb) = (a.to_ordered(), b.to_ordered());
        prop_assert!(ka < 1 << 32 && kb < 1 << 32);
        prop_assert_eq!(a.total_cmp(&b), ka.cmp(&kb));
        if a < b {
            prop_assert!(ka < kb);
        }
    }

    #[test]
    fn prop_nan_payloads_rejected(payload in 1u64..(1 << 52), negative in any::<bool>()) {
        let sign = if negative { 1 << 63 } else { 0 };
        let nan = f64::from_bits(sign | 0x7FF0_0000_0000_0000 | payload);
        prop_assert!(nan.is_nan());
        let codec = KeyCodec::new(TagSet::ALL).unwrap();
        prop_assert_eq!(codec.encode(nan), Err(Error::NotANumber { tag: Tag::F64 }));
    }

    #[test]
    fn prop_f64_monotonic(
        a in any::<f64>().prop_filter("NaN", |v| !v.is_nan()),
        b in any::<f64>().prop_filter("NaN", |v| !v.is_nan()),
    ) {
        let (ka, kb) = (a.to_ordered(), b.to_ordered());
        // -0.0 sorts just below +0.0, exactly like total_cmp
        prop_assert_eq!(a.total_cmp(&b), ka.cmp(&kb));
        if a < b {
            prop_assert!(ka < kb);
        }
    }

    #[test]
    fn prop_shared_space_monotonic(a in value_strategy(), b in value_strategy()) {
        let codec = KeyCodec::new(TagSet::ALL).unwrap();
        let (ka, kb) = (codec.encode(a).unwrap(), codec.encode(b).unwrap());
        prop_assert_eq!(a.widen().total_cmp(&b.widen()), ka.cmp(&kb));
        let decoded = codec.decode(ka, a.tag()).unwrap();
        prop_assert_eq!(decoded.widen().to_bits(), a.widen().to_bits());
    }

    #[test]
    fn prop_i32_set_matches_btreeset(
        values in prop::collection::vec((any::<bool>(), -50i32..50), 0..200),
    ) {
        let mut set = OrderedSet::with_tag(Tag::I32);
        let mut model = BTreeSet::new();
        for (insert, v) in values {
            if insert {
                prop_assert_eq!(set.insert(v).unwrap(), model.insert(v));
            } else {
                prop_assert_eq!(set.remove(v).unwrap(), model.remove(&v));
            }
            prop_assert_eq!(set.len(), model.len());
        }
        for at in -51..51 {
            prop_assert_eq!(set.contains(at).unwrap(), model.contains(&at));
            let succ = model.range(at + 1..).next().map(|&v| Value::I32(v));
            prop_assert_eq!(set.successor(at).unwrap(), succ);
            let pred = model.range(..at).next_back().map(|&v| Value::I32(v));
            prop_assert_eq!(set.predecessor(at).unwrap(), pred);
        }
        let got: Vec<i32> = set.iter().filter_map(|v| v.as_i32()).collect();
        let expected: Vec<i32> = model.into_iter().collect();
        prop_assert_eq!(got, expected);
    }
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(Value::I32),
        any::<f32>().prop_filter("NaN", |v| !v.is_nan()).prop_map(Value::F32),
        any::<f64>().prop_filter("NaN", |v| !v.is_nan()).prop_map(Value::F64),
    ]
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = std::vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_universe_16() {
    let keys = [0u64, 3, 5, 6, 9, 15];
    for_each_permutation(&keys, |perm| {
        let mut node = UniverseNode::new(16).unwrap();
        for key in perm {
            assert!(node.insert(key).unwrap());
        }
        assert_eq!(node.validate(), keys.len());
        assert_eq!(node.keys().collect::<Vec<_>>(), keys);
    });
}

#[test]
fn exhaustive_remove_order_universe_16() {
    let keys = [0u64, 3, 5, 6, 9, 15];
    for_each_permutation(&keys, |perm| {
        let mut node = UniverseNode::new(16).unwrap();
        let mut model: BTreeSet<u64> = keys.iter().copied().collect();
        for &key in &keys {
            node.insert(key).unwrap();
        }

        for key in perm {
            assert!(node.remove(key).unwrap());
            model.remove(&key);
            assert_eq!(node.validate(), model.len());
            assert_eq!(node.min(), model.first().copied());
            assert_eq!(node.max(), model.last().copied());
        }
        assert!(node.is_empty());
    });
}
