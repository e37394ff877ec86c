#![cfg(test)]

// Property tests for ChainHashMap kept inside the crate so they do not
// require feature gates to access internal modules.

use crate::chain_hash_map::{ChainHashMap, TableError};
use crate::hashers::ByteSumBuildHasher;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Clear,
    Resize(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (
        0usize..12,
        proptest::collection::vec("[a-z]{0,5}", 1..=8),
    )
        .prop_flat_map(|(capacity, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let contains_pool = proptest::sample::select(pool.clone());
            let op = prop_oneof![
                4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
                2 => idx.clone().prop_map(OpI::Remove),
                2 => idx.clone().prop_map(OpI::Get),
                1 => prop_oneof![
                    contains_pool.prop_map(|s: String| s),
                    "[a-z]{0,5}".prop_map(|s| s)
                ]
                .prop_map(OpI::Contains),
                1 => Just(OpI::Clear),
                1 => (0usize..16).prop_map(OpI::Resize),
                1 => Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..60)
                .prop_map(move |ops| (capacity, pool.clone(), ops))
        })
}

// Drive one scenario against a std::collections::HashMap model. The model
// mirrors the degenerate zero-capacity semantics: puts are dropped while
// the sut has no buckets, and resizing to zero clears everything.
fn check_against_model<S: BuildHasher>(
    mut sut: ChainHashMap<String, i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = pool[i].clone();
                let prev = sut.put(k.clone(), v);
                if sut.capacity() == 0 {
                    prop_assert_eq!(prev, None, "zero-capacity put must be a no-op");
                } else {
                    let mprev = model.insert(k, v);
                    prop_assert_eq!(prev, mprev, "put must return the previous value");
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let removed = sut.remove(k.as_str());
                let mremoved = model.remove(k);
                prop_assert_eq!(removed, mremoved);
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k.as_str()), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
            }
            OpI::Clear => {
                let capacity = sut.capacity();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), capacity, "clear must not change capacity");
            }
            OpI::Resize(c) => {
                let before = sut.len();
                sut.resize_table(c);
                if c == 0 {
                    // Documented data-loss path: no bucket can host entries.
                    model.clear();
                } else {
                    prop_assert_eq!(sut.len(), before, "nonzero resize must keep every entry");
                }
                prop_assert_eq!(sut.capacity(), c);
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<String> = sut.iter().map(|(k, _)| k.clone()).collect();
                let m_keys: BTreeSet<String> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        // Occupied buckets are bounded by both capacity and entry count.
        let occupied = sut.capacity() - sut.empty_buckets();
        prop_assert!(occupied <= sut.len().min(sut.capacity()));
        match sut.table_load() {
            Ok(load) => {
                prop_assert!(sut.capacity() > 0);
                prop_assert_eq!(load, sut.len() as f64 / sut.capacity() as f64);
            }
            Err(TableError::ZeroCapacity) => prop_assert_eq!(sut.capacity(), 0),
        }
    }

    // Final parity sweep over the whole pool.
    for k in pool {
        prop_assert_eq!(sut.get(k.as_str()), model.get(k));
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap
// across random put/remove/get/clear/resize sequences, including
// zero-capacity construction and resize-to-zero.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let sut: ChainHashMap<String, i32> = ChainHashMap::with_capacity(capacity);
        check_against_model(sut, &pool, ops)?;
    }
}

// Collision variant using a constant hasher so every key lands in one
// bucket; stresses chain traversal, in-place update, and unlinking deep
// in a chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((capacity, pool, ops) in arb_scenario()) {
        let sut: ChainHashMap<String, i32, ConstBuildHasher> =
            ChainHashMap::with_capacity_and_hasher(capacity, ConstBuildHasher);
        check_against_model(sut, &pool, ops)?;
    }
}

// Deterministic-hasher variant: byte-sum hashing with short keys produces
// heavy but non-degenerate collisions.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_byte_sum((capacity, pool, ops) in arb_scenario()) {
        let sut: ChainHashMap<String, i32, ByteSumBuildHasher> =
            ChainHashMap::with_capacity_and_hasher(capacity, ByteSumBuildHasher);
        check_against_model(sut, &pool, ops)?;
    }
}
