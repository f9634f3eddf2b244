use interval_forest::RbMap;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

#[test]
fn rb_map_smoke() {
    let mut map = RbMap::<i64, i32>::new();
    assert!(map.is_empty());

    assert!(map.insert(1, 1));
    assert!(map.insert(3, 5));
    assert!(map.insert(4, 5));
    assert!(map.insert(44, 123));
    assert!(map.insert(2, 0));

    assert_eq!(map.size(), 5);
    assert_eq!(map.get(&44), Some(&123));
    assert_eq!(map.get(&5), None);
    assert!(map.has(&3));

    let keys: Vec<i64> = map.iterator().map(|i| *map.key(i)).collect();
    assert_eq!(keys, vec![1, 2, 3, 4, 44]);
    map.assert_valid().unwrap();
}

#[test]
fn rb_map_insert_is_not_an_update() {
    let mut map = RbMap::<i64, &str>::new();
    assert!(map.insert(10, "first"));
    assert!(!map.insert(10, "second"));
    assert_eq!(map.size(), 1);
    assert_eq!(map.get(&10), Some(&"first"));
    map.assert_valid().unwrap();
}

#[test]
fn rb_map_get_mut_edits_in_place() {
    let mut map = RbMap::<i64, i32>::new();
    map.insert(7, 0);
    *map.get_mut(&7).unwrap() = 42;
    assert_eq!(map.get(&7), Some(&42));
}

#[test]
fn rb_map_remove_semantics() {
    let mut map = RbMap::<i64, i32>::new();
    for k in [10, 11, 12, 50, 60, 25, 100, 88, 33, 22, 55, 59, 51] {
        assert!(map.insert(k, k as i32));
        map.assert_valid().unwrap();
    }
    assert_eq!(map.size(), 13);

    assert!(map.remove(&100));
    map.assert_valid().unwrap();
    assert_eq!(map.size(), 12);

    assert!(map.remove(&33));
    assert!(!map.remove(&33));
    map.assert_valid().unwrap();
    assert_eq!(map.size(), 11);

    assert!(map.remove(&10));
    assert!(map.remove(&60));
    map.assert_valid().unwrap();
    assert_eq!(map.size(), 9);

    let keys: Vec<i64> = map.iterator().map(|i| *map.key(i)).collect();
    assert_eq!(keys, vec![11, 12, 22, 25, 50, 51, 55, 59, 88]);
}

#[test]
fn rb_map_first_last_next_prev() {
    let mut map = RbMap::<i64, ()>::new();
    assert_eq!(map.first(), None);
    assert_eq!(map.last(), None);

    for k in [5, 3, 8, 1, 9] {
        map.insert(k, ());
    }
    let f = map.first().unwrap();
    let l = map.last().unwrap();
    assert_eq!(*map.key(f), 1);
    assert_eq!(*map.key(l), 9);
    assert_eq!(map.prev(f), None);
    assert_eq!(map.next(l), None);
    assert_eq!(*map.key(map.next(f).unwrap()), 3);
    assert_eq!(*map.key(map.prev(l).unwrap()), 8);
}

#[test]
fn rb_map_clear_resets() {
    let mut map = RbMap::<i64, i32>::new();
    for k in 0..32 {
        map.insert(k, 0);
    }
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.first(), None);
    assert!(map.insert(1, 1));
    map.assert_valid().unwrap();
}

#[test]
fn rb_map_randomized_inserts_and_removes_keep_invariants() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5EED);
    let mut map = RbMap::<i64, u64>::new();
    let mut shadow = std::collections::BTreeMap::new();

    for step in 0u64..3000 {
        let key = rng.gen_range(0..400);
        if rng.gen_bool(0.6) {
            let inserted = map.insert(key, step);
            assert_eq!(inserted, !shadow.contains_key(&key));
            shadow.entry(key).or_insert(step);
        } else {
            let removed = map.remove(&key);
            assert_eq!(removed, shadow.remove(&key).is_some());
        }
        map.assert_valid().unwrap();
        assert_eq!(map.size(), shadow.len());
    }

    let keys: Vec<i64> = map.iterator().map(|i| *map.key(i)).collect();
    let expected: Vec<i64> = shadow.keys().copied().collect();
    assert_eq!(keys, expected);
}
