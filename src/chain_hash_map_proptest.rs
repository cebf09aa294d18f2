#![cfg(test)]

// Property tests for ChainHashMap kept inside the crate so they can check
// the chain structure itself, not just the public surface.

use crate::chain_hash_map::ChainHashMap;
use crate::config::{MapConfig, ResizePolicy};
use crate::index::bucket_index;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations: indices shrink toward earlier keys, and the pool
// mixes in anagram groups so chains actually form.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
    Iterate,
}

fn arb_pool() -> impl Strategy<Value = Vec<String>> {
    (
        proptest::collection::vec("[a-z]{0,5}", 1..=10),
        "[a-d]{2,4}",
    )
        .prop_map(|(mut pool, seed)| {
            // Append every rotation of `seed`; rotations are anagrams.
            let chars: Vec<char> = seed.chars().collect();
            for r in 0..chars.len() {
                let mut rot = chars.clone();
                rot.rotate_left(r);
                pool.push(rot.into_iter().collect());
            }
            pool
        })
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (1usize..=16, arb_pool()).prop_flat_map(|(cap, pool)| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Get),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (cap, pool.clone(), ops))
    })
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants checked after every operation:
// - size equals the model's distinct key count; is_empty agrees.
// - chain links agree both ways and every entry sits in the bucket its key
//   indexes to under the current capacity.
// - capacity never drops below the initial capacity.
// - put/remove resize exactly when the load factor crosses a threshold.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((cap, pool, ops) in arb_scenario()) {
        let mut sut: ChainHashMap<i32> = ChainHashMap::with_capacity(cap).unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            let before = sut.capacity();
            match op {
                OpI::Put(i, v) => {
                    let k = pool[i].clone();
                    let prev = sut.put(k.clone(), v);
                    prop_assert_eq!(prev, model.insert(k, v));
                    let grow = sut.size() as f64 / before as f64 > 0.75;
                    prop_assert_eq!(sut.capacity(), if grow { before * 2 } else { before });
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    let removed = sut.remove(k);
                    let expected = model.remove(k);
                    prop_assert_eq!(removed, expected);
                    let shrink = expected.is_some()
                        && before > cap
                        && (sut.size() as f64 / before as f64) < 0.25;
                    let want = if shrink { (before / 2).max(cap) } else { before };
                    prop_assert_eq!(sut.capacity(), want);
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k));
                    prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    match (sut.get_mut(k), model.get_mut(k)) {
                        (Some(s), Some(m)) => {
                            *s = s.wrapping_add(d);
                            *m = m.wrapping_add(d);
                        }
                        (None, None) => {}
                        (s, m) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m),
                    }
                }
                OpI::Iterate => {
                    let seen: BTreeMap<String, i32> =
                        sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                    let want: BTreeMap<String, i32> =
                        model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(seen.len(), sut.size(), "iter yields each key once");
                    prop_assert_eq!(seen, want);
                }
            }

            sut.table().assert_invariants();
            prop_assert_eq!(sut.size(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert!(sut.capacity() >= cap);
        }
    }
}

// Property: any anagram group lands in one bucket and forms a single chain
// of exactly its size, under any capacity the map passes through.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_anagrams_share_one_chain(seed in "[a-z]{3,6}", cap in 1usize..=32) {
        let chars: Vec<char> = seed.chars().collect();
        let mut group: Vec<String> = Vec::new();
        for r in 0..chars.len() {
            let mut rot = chars.clone();
            rot.rotate_left(r);
            let s: String = rot.into_iter().collect();
            if !group.contains(&s) {
                group.push(s);
            }
        }

        // A near-1.0 grow threshold keeps every key in the starting table.
        let policy = ResizePolicy::new(1.0, 0.01).unwrap();
        let mut m = ChainHashMap::with_config(MapConfig::new(cap.max(group.len())).with_policy(policy)).unwrap();
        for (i, k) in group.iter().enumerate() {
            m.put(k.as_str(), i);
        }
        m.table().assert_invariants();

        let slot = bucket_index(&group[0], m.capacity());
        let lens = m.table().chain_lengths();
        prop_assert_eq!(lens[slot], group.len());
    }
}

// Property: round trip of distinct keys survives every resize on the way up
// and on the way back down to the floor.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_round_trip_through_resizes(
        keys in proptest::collection::hash_set("[a-zA-Z0-9]{1,8}", 0..200),
        cap in 1usize..=8,
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let mut m = ChainHashMap::with_capacity(cap).unwrap();
        for (i, k) in keys.iter().enumerate() {
            m.put(k.as_str(), i);
        }
        prop_assert_eq!(m.size(), keys.len());
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(m.get(k), Some(&i));
        }
        for k in &keys {
            prop_assert!(m.remove(k).is_some());
            m.table().assert_invariants();
        }
        prop_assert!(m.is_empty());
        // One shrink per removal, so a sparse tail can stop above the floor.
        prop_assert!(m.capacity() >= cap);
        prop_assert!(m.capacity() <= (cap * 4).max(4));
    }
}
