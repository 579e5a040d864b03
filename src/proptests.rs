use crate::{AddOutcome, CategoryIndex, DoubleHashTable, IndexError, SimpleSpell, Spell, SpellTree};

use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

use crate::avl::NodeId;

/// Check the stored heights, the AVL balance bound, key order and node count.
pub(crate) fn validate_tree(t: &SpellTree) {
    fn walk(t: &SpellTree, id: NodeId, lo: Option<i32>, hi: Option<i32>) -> (i32, usize) {
        if id.is_null() {
            return (-1, 0);
        }
        let node = t.node(id);
        let level = node.spell.power_level();
        assert_eq!(node.spell.category(), t.category(), "foreign spell in tree");
        if let Some(lo) = lo {
            assert!(level > lo, "level {level} not above {lo}");
        }
        if let Some(hi) = hi {
            assert!(level < hi, "level {level} not below {hi}");
        }

        let (lh, lc) = walk(t, node.left, lo, Some(level));
        let (rh, rc) = walk(t, node.right, Some(level), hi);
        assert_eq!(node.height, lh.max(rh) + 1, "stored height must match children");
        assert!((lh - rh).abs() <= 1, "unbalanced at level {level}: {lh} vs {rh}");
        (node.height, lc + rc + 1)
    }

    let (height, count) = walk(t, t.root(), None, None);
    assert_eq!(height, t.height());
    assert_eq!(count, t.len(), "reachable node count must match SpellTree::len");
}

fn name_strategy() -> impl Strategy<Value = String> + Clone {
    "[a-d]{1,3}"
}

fn inserts_strategy() -> impl Strategy<Value = Vec<(String, i32)>> {
    prop::collection::vec((name_strategy(), -64i32..64), 1..=300)
}

const PRIMES: [usize; 8] = [3, 5, 7, 11, 13, 31, 61, 101];

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_tree_matches_model(inserts in inserts_strategy(), k in 0usize..80) {
        let (first_name, first_level) = inserts[0].clone();
        let mut t = SpellTree::new(Spell::new(first_name.clone(), "fire", first_level, "w"));
        let mut m: BTreeMap<i32, String> = BTreeMap::new();
        m.insert(first_level, first_name);

        for (name, level) in &inserts[1..] {
            let stored = t.insert(Spell::new(name.clone(), "fire", *level, "w"));
            prop_assert_eq!(stored, !m.contains_key(level));
            m.entry(*level).or_insert_with(|| name.clone());
            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t);

        for (name, level) in &inserts {
            let found = t.search(name, *level).map(|s| s.name().to_owned());
            let expected = m.get(level).filter(|n| *n == name).cloned();
            prop_assert_eq!(found, expected);
        }

        let got: Vec<(i32, String)> = t.iter().map(|s| (s.power_level(), s.name().to_owned())).collect();
        let expected: Vec<(i32, String)> = m.iter().map(|(l, n)| (*l, n.clone())).collect();
        prop_assert_eq!(got, expected);

        let top: Vec<i32> = t.top_k(k).into_iter().map(Spell::power_level).collect();
        let expected_top: Vec<i32> = m.keys().rev().take(k).copied().collect();
        prop_assert_eq!(top.len(), k.min(m.len()));
        prop_assert_eq!(top, expected_top);
    }

    #[test]
    fn prop_unknown_levels_absent(inserts in inserts_strategy(), probe in 64i32..200) {
        let mut t = SpellTree::new(Spell::new("seed", "ice", 0, "w"));
        for (name, level) in inserts {
            t.insert(Spell::new(name, "ice", level, "w"));
        }
        prop_assert!(t.search("seed", probe).is_none());
        prop_assert!(t.get_by_level(probe).is_none());
    }

    #[test]
    fn prop_prime_table_fills(
        cap_idx in 0usize..PRIMES.len(),
        names in prop::collection::vec("[a-z]{1,6}", 0..120),
    ) {
        let capacity = PRIMES[cap_idx];
        let mut t = DoubleHashTable::with_capacity(capacity).unwrap();
        let mut first: HashMap<String, String> = HashMap::new();

        for (i, name) in names.iter().enumerate() {
            let words = format!("w{i}");
            let result = t.put(SimpleSpell::new(name.clone(), words.clone()));
            if i < capacity {
                prop_assert!(result.is_ok(), "put failed with {} of {} slots used", i, capacity);
                first.entry(name.clone()).or_insert(words);
            } else {
                let is_full = matches!(result, Err(IndexError::TableFull { .. }));
                prop_assert!(is_full);
            }
        }

        prop_assert_eq!(t.len(), names.len().min(capacity));
        for (name, words) in &first {
            prop_assert_eq!(t.get(name), Some(words.as_str()));
        }
    }

    #[test]
    fn prop_lookup_stops_at_first_empty(
        capacity in 3usize..40,
        names in prop::collection::vec("[a-z]{1,4}", 0..40),
        missing in "[A-Z]{1,4}",
    ) {
        let mut t = DoubleHashTable::with_capacity(capacity).unwrap();
        for name in names {
            let _ = t.put(SimpleSpell::new(name, "w"));
        }

        let first_empty = t
            .probe_sequence(&missing)
            .position(|slot| t.slot(slot).is_none());

        let lookup = t.lookup(&missing);
        prop_assert_eq!(lookup.words, None);
        prop_assert_eq!(lookup.probes, first_empty.unwrap_or(capacity));
    }

    #[test]
    fn prop_categories_isolated(
        ops in prop::collection::vec((0usize..4, name_strategy(), -20i32..20), 0..300),
    ) {
        const CATEGORIES: [&str; 4] = ["fire", "ice", "wind", "erif"];
        let mut index = CategoryIndex::new(3).unwrap();
        let mut model: HashMap<&str, BTreeMap<i32, String>> = HashMap::new();

        for (c, name, level) in ops {
            let category = CATEGORIES[c];
            let outcome = index.add_record(Spell::new(name.clone(), category, level, "w"));

            let tree = model.entry(category).or_default();
            let expected = match tree.get(&level) {
                None if tree.is_empty() => AddOutcome::Created,
                None => AddOutcome::Inserted,
                Some(existing) if *existing == name => AddOutcome::Duplicate,
                Some(_) => AddOutcome::LevelTaken,
            };
            prop_assert_eq!(outcome, expected);
            tree.entry(level).or_insert(name);

            for other in CATEGORIES {
                let count = model.get(other).map_or(0, BTreeMap::len);
                prop_assert_eq!(index.count_in_category(other), count);
            }
        }

        let total: usize = model.values().map(BTreeMap::len).sum();
        prop_assert_eq!(index.count_all(), total);
        for tree in index.categories() {
            validate_tree(tree);
        }
        for (category, levels) in &model {
            for (level, name) in levels {
                let found = index.search(category, name, *level);
                prop_assert_eq!(found.map(Spell::category), Some(*category));
            }
        }
    }
}

/// Every ordering of `items`, generated in place by Heap's algorithm.
fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let mut order = items.to_vec();
    let mut counters = vec![0usize; order.len()];
    let mut all = vec![order.clone()];

    let mut i = 1;
    while i < order.len() {
        if counters[i] < i {
            let j = if i % 2 == 0 { 0 } else { counters[i] };
            order.swap(j, i);
            all.push(order.clone());
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
    all
}

#[test]
fn permutations_cover_every_order() {
    let perms = permutations(&[1, 2, 3, 4]);
    assert_eq!(perms.len(), 24);
    let distinct: std::collections::HashSet<_> = perms.iter().cloned().collect();
    assert_eq!(distinct.len(), 24);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let levels = [10, 20, 30, 40, 50, 60, 70];

    for perm in permutations(&levels) {
        let mut iter = perm.into_iter();
        let seed = iter.next().unwrap();
        let mut t = SpellTree::new(Spell::new(format!("s{seed}"), "earth", seed, "w"));
        for level in iter {
            assert!(t.insert(Spell::new(format!("s{level}"), "earth", level, "w")));
        }

        validate_tree(&t);
        // 7 nodes fit in an AVL tree of height at most 3.
        assert!(t.height() <= 3);
        let got: Vec<i32> = t.iter().map(Spell::power_level).collect();
        assert_eq!(got, levels);
        for level in levels {
            assert!(t.search(&format!("s{level}"), level).is_some());
        }
    }
}
