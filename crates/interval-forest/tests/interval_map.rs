use interval_forest::IntervalMap;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::BTreeMap;

fn fixture() -> IntervalMap<i64, &'static str> {
    let mut map = IntervalMap::new();
    for (low, high) in [(5, 10), (1, 12), (2, 8), (15, 25), (8, 16), (14, 20), (18, 21)] {
        assert!(map.insert(low, high, "i"));
        map.assert_valid().unwrap();
    }
    map
}

fn lows<K: Clone, V>(map: &IntervalMap<K, V>, hits: &[u32]) -> Vec<K> {
    hits.iter().map(|&i| map.low(i).clone()).collect()
}

#[test]
fn interval_map_overlap_fixture() {
    let map = fixture();
    assert_eq!(map.size(), 7);

    let cases: [((i64, i64), usize); 8] = [
        ((26, 28), 0),
        ((12, 15), 4),
        ((10, 12), 3),
        ((18, 19), 3),
        ((6, 9), 4),
        ((7, 15), 6),
        ((6, 16), 6),
        ((0, 26), 7),
    ];
    for ((lo, hi), expected) in cases {
        let hits = map.query_range(&lo, &hi);
        assert_eq!(hits.len(), expected, "query [{lo}, {hi}]");
    }

    assert_eq!(lows(&map, &map.query_range(&10, &12)), vec![1, 5, 8]);
    assert_eq!(lows(&map, &map.query_range(&18, &19)), vec![14, 15, 18]);
}

#[test]
fn interval_map_stabbing_fixture() {
    let map = fixture();

    assert_eq!(lows(&map, &map.query_point(&9)), vec![1, 5, 8]);
    assert_eq!(lows(&map, &map.query_point(&13)), vec![8]);
    assert_eq!(lows(&map, &map.query_point(&17)), vec![14, 15]);
    assert_eq!(lows(&map, &map.query_point(&25)), vec![15]);
    assert!(map.query_point(&0).is_empty());
    assert!(map.query_point(&30).is_empty());
}

#[test]
fn interval_map_insert_is_not_an_update() {
    let mut map = fixture();
    assert!(!map.insert(5, 99, "dup"));
    assert_eq!(map.size(), 7);
    let i = map.find(&5).unwrap();
    assert_eq!(*map.high(i), 10);
    assert_eq!(*map.value(i), "i");
    map.assert_valid().unwrap();
}

#[test]
#[should_panic(expected = "interval low endpoint exceeds high endpoint")]
fn interval_map_rejects_inverted_interval() {
    let mut map = IntervalMap::<i64, ()>::new();
    map.insert(10, 5, ());
}

#[test]
fn interval_map_erase_requires_both_endpoints() {
    let mut map = fixture();

    assert!(!map.erase(&5, &11));
    assert_eq!(map.size(), 7);

    assert!(map.erase(&5, &10));
    map.assert_valid().unwrap();
    assert_eq!(map.size(), 6);
    assert!(map.find(&5).is_none());

    // Idempotent: the interval is already gone.
    assert!(!map.erase(&5, &10));
    assert_eq!(map.size(), 6);
}

#[test]
fn interval_map_erase_then_reinsert() {
    let mut map = fixture();
    assert!(map.erase(&8, &16));
    map.assert_valid().unwrap();
    assert_eq!(map.query_range(&12, &15).len(), 3);

    assert!(map.insert(8, 16, "back"));
    map.assert_valid().unwrap();
    assert_eq!(map.query_range(&12, &15).len(), 4);
    let i = map.find(&8).unwrap();
    assert_eq!(*map.value(i), "back");
}

#[test]
fn interval_map_max_tracks_erases() {
    let mut map = fixture();
    // (15, 25) carries the global max.
    let root = map.root_index().unwrap();
    assert_eq!(*map.max(root), 25);

    assert!(map.erase(&15, &25));
    map.assert_valid().unwrap();
    let root = map.root_index().unwrap();
    assert_eq!(*map.max(root), 21);
}

#[test]
fn interval_map_iteration_is_low_ordered() {
    let map = fixture();
    let order: Vec<i64> = map.iterator().map(|i| *map.low(i)).collect();
    assert_eq!(order, vec![1, 2, 5, 8, 14, 15, 18]);

    let f = map.first().unwrap();
    let l = map.last().unwrap();
    assert_eq!(*map.low(f), 1);
    assert_eq!(*map.low(l), 18);
    assert_eq!(map.prev(f), None);
    assert_eq!(map.next(l), None);
}

#[test]
fn interval_map_clear_resets() {
    let mut map = fixture();
    map.clear();
    assert!(map.is_empty());
    assert!(map.query_range(&0, &100).is_empty());
    assert!(map.insert(3, 4, "x"));
    map.assert_valid().unwrap();
}

#[test]
fn interval_map_value_mut_edits_in_place() {
    let mut map = IntervalMap::<i64, u32>::new();
    map.insert(1, 4, 0);
    let i = map.find(&1).unwrap();
    *map.value_mut(i) = 7;
    assert_eq!(*map.value(map.find(&1).unwrap()), 7);
}

fn oracle_range(shadow: &BTreeMap<i64, i64>, lo: i64, hi: i64) -> Vec<(i64, i64)> {
    shadow
        .iter()
        .filter(|&(&l, &h)| l <= hi && lo <= h)
        .map(|(&l, &h)| (l, h))
        .collect()
}

fn oracle_point(shadow: &BTreeMap<i64, i64>, p: i64) -> Vec<(i64, i64)> {
    shadow
        .iter()
        .filter(|&(&l, &h)| l <= p && p <= h)
        .map(|(&l, &h)| (l, h))
        .collect()
}

#[test]
fn interval_map_randomized_against_brute_force() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0xC0FFEE);
    let mut map = IntervalMap::<i64, u64>::new();
    let mut shadow: BTreeMap<i64, i64> = BTreeMap::new();

    for step in 0u64..1500 {
        let low = rng.gen_range(0..500);
        match rng.gen_range(0..10) {
            0..=5 => {
                let high = low + rng.gen_range(0..60);
                let inserted = map.insert(low, high, step);
                assert_eq!(inserted, !shadow.contains_key(&low));
                shadow.entry(low).or_insert(high);
            }
            6..=7 => {
                // Erase with the correct high when present.
                let high = shadow.get(&low).copied().unwrap_or(low);
                let erased = map.erase(&low, &high);
                assert_eq!(erased, shadow.remove(&low).is_some());
            }
            _ => {
                // Mismatched high must leave the entry alone.
                if let Some(&high) = shadow.get(&low) {
                    assert!(!map.erase(&low, &(high + 1)));
                    assert!(shadow.contains_key(&low));
                }
            }
        }
        map.assert_valid().unwrap();
        assert_eq!(map.size(), shadow.len());

        if step % 25 == 0 {
            let qlo = rng.gen_range(0..560);
            let qhi = qlo + rng.gen_range(0..80);
            let got: Vec<(i64, i64)> = map
                .query_range(&qlo, &qhi)
                .iter()
                .map(|&i| (*map.low(i), *map.high(i)))
                .collect();
            assert_eq!(got, oracle_range(&shadow, qlo, qhi));

            let p = rng.gen_range(0..560);
            let got: Vec<(i64, i64)> = map
                .query_point(&p)
                .iter()
                .map(|&i| (*map.low(i), *map.high(i)))
                .collect();
            assert_eq!(got, oracle_point(&shadow, p));
        }
    }
}

#[test]
fn interval_map_drain_to_empty_keeps_invariants() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(17);
    let mut map = IntervalMap::<i64, ()>::new();
    let mut entries: Vec<(i64, i64)> = Vec::new();

    for low in 0..200 {
        let high = low + rng.gen_range(0..40);
        assert!(map.insert(low, high, ()));
        entries.push((low, high));
    }
    map.assert_valid().unwrap();

    while !entries.is_empty() {
        let pos = rng.gen_range(0..entries.len());
        let (low, high) = entries.swap_remove(pos);
        assert!(map.erase(&low, &high));
        map.assert_valid().unwrap();
    }
    assert!(map.is_empty());
    assert_eq!(map.root_index(), None);
}
