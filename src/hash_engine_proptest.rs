#![cfg(test)]

// Property tests for HashEngine kept inside the crate so they can check
// structural invariants that are not part of the public surface.

use crate::config::TableConfig;
use crate::hash_engine::HashEngine;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, Vec<u8>),
    Remove(usize),
    Retrieve(usize),
    Contains(String),
    Resize,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{1,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), proptest::collection::vec(any::<u8>(), 0..4))
                .prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Retrieve),
            1 => prop_oneof![contains_pool, "[a-z]{1,5}"].prop_map(OpI::Contains),
            1 => Just(OpI::Resize),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run(mut sut: HashEngine, pool: Vec<String>, ops: Vec<OpI>) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, Vec<u8>> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let prev = sut.insert(k, &v).expect("pool keys are non-empty");
                let mprev = model.insert(k.clone(), v);
                prop_assert_eq!(prev.map(|b| b.into_vec()), mprev, "overwrite returns old value");
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let removed = sut.remove(k);
                prop_assert_eq!(removed.map(|b| b.into_vec()), model.remove(k));
                prop_assert!(sut.retrieve(k).is_none(), "removed key must be absent");
            }
            OpI::Retrieve(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.retrieve(k), model.get(k).map(Vec::as_slice));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Resize => {
                let before = sut.capacity();
                sut = sut.resize();
                prop_assert_eq!(sut.capacity(), before * 2);
            }
        }

        // Post-conditions after each op
        sut.assert_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }

    for (k, v) in &model {
        prop_assert_eq!(sut.retrieve(k), Some(v.as_slice()));
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Insert overwrites in place and reports the replaced value.
// - Remove returns the model's value and leaves the key absent.
// - Resize doubles capacity and preserves every pair.
// - Every entry sits in the bucket its key hashes to; no chain holds a key twice.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), cap in 1usize..8) {
        run(HashEngine::new(cap).unwrap(), pool, ops)?;
    }
}

// Property: Same invariants with every key forced into one chain, stressing
// head, interior and tail unlinking.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_single_bucket((pool, ops) in arb_scenario()) {
        let ops: Vec<OpI> = ops.into_iter().filter(|op| !matches!(op, OpI::Resize)).collect();
        run(HashEngine::new(1).unwrap(), pool, ops)?;
    }
}

// Property: Auto-resize keeps the load factor bounded after each new key.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_auto_resize_bounds_load((pool, ops) in arb_scenario(), lf in 0.5f64..3.0) {
        let cfg = TableConfig::new().with_capacity(1).with_max_load_factor(lf);
        let mut sut = HashEngine::with_config(cfg).unwrap();
        for op in ops {
            if let OpI::Insert(i, v) = op {
                sut.insert(&pool[i], v).unwrap();
                prop_assert!(sut.load_factor() <= lf);
            }
        }
        sut.assert_invariants();
    }
}
