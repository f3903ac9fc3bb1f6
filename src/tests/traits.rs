use crate::PersistentHashMap;

#[test]
fn default_is_empty() {
    let map: PersistentHashMap<i32, i32> = PersistentHashMap::default();
    assert!(map.is_empty());
}

#[test]
fn debug_format() {
    let map: PersistentHashMap<i32, i32> = PersistentHashMap::new();
    let dbg = format!("{map:?}");
    assert!(dbg.contains("PersistentHashMap"));
    assert!(dbg.contains("len"));
}

#[test]
fn from_iterator() {
    let map: PersistentHashMap<i32, i32> = vec![(1, 10), (2, 20), (3, 30)].into_iter().collect();
    assert_eq!(map.len(), 3);
    assert_eq!(map.find(&1), Some(&10));
}

#[test]
fn extend_trait() {
    let mut map = PersistentHashMap::new();
    map.insert(1, 10);
    map.extend(vec![(2, 20), (3, 30)]);
    assert_eq!(map.len(), 3);
}

#[test]
fn index_existing() {
    let mut map = PersistentHashMap::new();
    map.insert("key", 42);
    assert_eq!(map[&"key"], 42);
}

#[test]
#[should_panic(expected = "key not found")]
fn index_missing_panics() {
    let map: PersistentHashMap<i32, i32> = PersistentHashMap::new();
    let _ = map[&999];
}

#[test]
fn into_iterator_for_ref() {
    let map: PersistentHashMap<i32, i32> = (0..5).map(|i| (i, i)).collect();
    let mut total = 0;
    for (k, v) in &map {
        total += k + v;
    }
    assert_eq!(total, 20);
}
