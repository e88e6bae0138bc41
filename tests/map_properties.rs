// PackedMap property tests.
//
// Property 1: op-sequence equivalence against std::collections::HashMap.
//  - Model: a std HashMap driven by the same operation sequence.
//  - Operations: insert, remove, get, update_value, get_if_absent_put.
//  - Invariant after each step: get() agrees with the model for the key
//    touched; len() equals the model's len.
//
// Property 2: partitioned traversal covers every entry exactly once, for
// every section count from 1 to the slot capacity.
//
// Property 3: trim_to_size and the rehashes caused by growth never change
// the set of key-value pairs.
use std::collections::HashMap;

use packed_map::PackedMap;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_matches_std_hashmap(ops in proptest::collection::vec((0u8..=4u8, 0u16..64u16, any::<i32>()), 1..200)) {
        let mut map: PackedMap<u16, i32> = PackedMap::new();
        let mut model: HashMap<u16, i32> = HashMap::new();

        for (op, key, value) in ops {
            match op {
                0 => {
                    prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                }
                1 => {
                    prop_assert_eq!(map.remove(&key), model.remove(&key));
                }
                2 => {
                    prop_assert_eq!(map.get(&key), model.get(&key));
                }
                3 => {
                    map.update_value(key, || 0, |v| *v = v.wrapping_add(value));
                    let slot = model.entry(key).or_insert(0);
                    *slot = slot.wrapping_add(value);
                }
                4 => {
                    let inserted = *map.get_if_absent_put(key, value);
                    let expected = *model.entry(key).or_insert(value);
                    prop_assert_eq!(inserted, expected);
                }
                _ => unreachable!(),
            }

            prop_assert_eq!(map.get(&key), model.get(&key));
            prop_assert_eq!(map.len(), model.len());
        }

        // Final sweep: both directions agree.
        for (key, value) in &model {
            prop_assert_eq!(map.get(key), Some(value));
        }
        let mut seen = 0usize;
        map.for_each_key_value(|key, value| {
            assert_eq!(model.get(key), Some(value));
            seen += 1;
        });
        prop_assert_eq!(seen, model.len());
    }

    #[test]
    fn prop_batches_partition_the_map(keys in proptest::collection::hash_set(0u32..10_000, 0..120)) {
        let mut map = PackedMap::new();
        for key in &keys {
            map.insert(*key, *key);
        }

        for section_count in 1..=map.capacity() {
            let mut seen = std::collections::HashSet::new();
            for section in 0..section_count {
                map.batch_for_each(section, section_count, |value| {
                    assert!(seen.insert(*value), "value visited twice");
                });
            }
            prop_assert_eq!(&seen, &keys);
        }
    }

    #[test]
    fn prop_trim_preserves_pairs(
        inserted in proptest::collection::hash_set(0u32..10_000, 0..200),
        removed in proptest::collection::hash_set(0u32..10_000, 0..200),
    ) {
        let mut map = PackedMap::with_capacity(4096);
        let mut model = HashMap::new();
        for key in &inserted {
            map.insert(*key, *key * 2);
            model.insert(*key, *key * 2);
        }
        for key in &removed {
            map.remove(key);
            model.remove(key);
        }

        map.trim_to_size();

        prop_assert_eq!(map.len(), model.len());
        for (key, value) in &model {
            prop_assert_eq!(map.get(key), Some(value));
        }
    }
}
