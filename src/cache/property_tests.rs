//! Property-Based Tests for the Cache Inventory
//!
//! Uses proptest to check capacity, eviction order, hit counting and
//! re-insertion behavior over generated operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::{Entry, Inventory};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache names shaped like "Kind:value"
fn name_strategy() -> impl Strategy<Value = String> {
    ("(VirtualMachine|HostSystem|Datastore)", "[a-z0-9-]{1,16}")
        .prop_map(|(kind, value)| format!("{}:{}", kind, value))
}

fn unique_names(min: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(name_strategy(), min..max)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add { name: String, value: u32 },
    Get { name: String },
    Contains { name: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        6 => (name_strategy(), any::<u32>()).prop_map(|(name, value)| CacheOp::Add { name, value }),
        3 => name_strategy().prop_map(|name| CacheOp::Get { name }),
        2 => name_strategy().prop_map(|name| CacheOp::Contains { name }),
        1 => Just(CacheOp::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations on a bounded inventory, the number of
    // stored entries never exceeds the bound.
    #[test]
    fn prop_capacity_enforcement(
        max_size in 1usize..20,
        ops in prop::collection::vec(cache_op_strategy(), 1..200)
    ) {
        let inv = Inventory::<u32>::with_limits(max_size, Duration::ZERO).unwrap();

        for op in ops {
            match op {
                CacheOp::Add { name, value } => {
                    inv.add(Entry::new(name, value, TEST_TTL)).unwrap();
                }
                CacheOp::Get { name } => {
                    inv.get(&name);
                }
                CacheOp::Contains { name } => {
                    inv.contains(&name);
                }
                CacheOp::Clear => {
                    inv.clear();
                }
            }
            prop_assert!(
                inv.len() <= max_size,
                "Inventory size {} exceeds max {}",
                inv.len(),
                max_size
            );
        }
    }

    // Inserting M+1 distinct names into a capacity-M inventory leaves the
    // first inserted name absent and every later one present.
    #[test]
    fn prop_eviction_order(names in unique_names(2, 12)) {
        let capacity = names.len() - 1;
        let inv = Inventory::<usize>::with_limits(capacity, Duration::ZERO).unwrap();

        for (i, name) in names.iter().enumerate() {
            inv.add(Entry::new(name.clone(), i, TEST_TTL)).unwrap();
        }

        prop_assert_eq!(inv.len(), capacity);
        prop_assert!(!inv.contains(&names[0]), "Oldest name should have been evicted");
        for name in names.iter().skip(1) {
            prop_assert!(inv.contains(name), "Name '{}' should still be present", name);
        }
    }

    // k successful gets yield hits == k; misses never count.
    #[test]
    fn prop_hit_counting(
        name in name_strategy(),
        other in name_strategy(),
        k in 0u64..50,
        misses in 0usize..10
    ) {
        prop_assume!(name != other);
        let inv = Inventory::<u32>::with_limits(0, Duration::ZERO).unwrap();
        inv.add(Entry::new(name.clone(), 7, TEST_TTL)).unwrap();

        for _ in 0..k {
            prop_assert_eq!(inv.get(&name), Some(7));
        }
        for _ in 0..misses {
            prop_assert_eq!(inv.get(&other), None);
        }

        prop_assert_eq!(inv.info(&name).unwrap().hits, k);
        let stats = inv.stats();
        prop_assert_eq!(stats.hits, k);
        prop_assert_eq!(stats.misses, misses as u64);
    }

    // Re-adding a present name replaces its value, resets hits and leaves
    // the set of other present names unchanged.
    #[test]
    fn prop_reinsertion_replaces_in_place(
        names in unique_names(1, 10),
        pick in any::<prop::sample::Index>(),
        reads in 1usize..5
    ) {
        let inv = Inventory::<u32>::with_limits(names.len(), Duration::ZERO).unwrap();
        for name in &names {
            inv.add(Entry::new(name.clone(), 1, TEST_TTL)).unwrap();
        }

        let target = pick.get(&names).clone();
        for _ in 0..reads {
            inv.get(&target);
        }

        inv.add(Entry::new(target.clone(), 2, TEST_TTL)).unwrap();

        prop_assert_eq!(inv.info(&target).unwrap().hits, 0);
        prop_assert_eq!(inv.get(&target), Some(2));

        let present: HashSet<&String> = names.iter().filter(|n| inv.contains(n)).collect();
        prop_assert_eq!(present.len(), names.len());
    }
}

// Separate block with fewer cases for time-sensitive TTL checks
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // An entry is visible inside its TTL window and gone after it.
    #[test]
    fn prop_ttl_window(name in name_strategy(), value in any::<u32>()) {
        let inv = Inventory::<u32>::with_limits(0, Duration::ZERO).unwrap();
        inv.add(Entry::new(name.clone(), value, Duration::from_millis(150))).unwrap();

        prop_assert!(inv.contains(&name), "Entry should exist before TTL elapses");
        prop_assert_eq!(inv.get(&name), Some(value));

        std::thread::sleep(Duration::from_millis(250));

        prop_assert!(!inv.contains(&name), "Entry should be gone after TTL elapses");
        prop_assert_eq!(inv.len(), 0);
    }
}
