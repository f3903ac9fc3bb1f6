use crate::PersistentHashMap;

/// A snapshot keeps answering with the values it was taken with.
#[test]
fn snapshot_unchanged_by_insert() {
    let mut map = PersistentHashMap::new();
    map.insert(1, "one");
    map.insert(2, "two");
    let before = map.snapshot();

    map.insert(2, "deux");
    map.insert(3, "trois");

    assert_eq!(before.len(), 2);
    assert_eq!(map.find_in(&before, &2), Some(&"two"));
    assert_eq!(map.find_in(&before, &3), None);
    assert!(!map.contains_in(&before, &3));
    assert_eq!(map.find(&2), Some(&"deux"));
    assert_eq!(map.find(&3), Some(&"trois"));
}

#[test]
fn snapshot_unchanged_by_erase() {
    let mut map: PersistentHashMap<u32, u32> = (0..50).map(|i| (i, i)).collect();
    let before = map.snapshot();
    for i in 0..25 {
        map.erase(&i);
    }
    assert_eq!(map.len(), 25);
    for i in 0..50 {
        assert_eq!(map.find_in(&before, &i), Some(&i));
    }
    assert_eq!(map.iter_in(&before).count(), 50);
    assert_eq!(map.fold_in(&before, 0, |acc, _, _| acc + 1), 50);
}

/// Restoring switches between versions without losing the later one.
#[test]
fn restore_back_and_forth() {
    let mut map = PersistentHashMap::new();
    map.insert("a", 1);
    let v1 = map.snapshot();
    map.insert("b", 2);
    let v2 = map.snapshot();

    map.restore(v1);
    assert_eq!(map.len(), 1);
    assert_eq!(map.find(&"b"), None);

    map.restore(v2);
    assert_eq!(map.len(), 2);
    assert_eq!(map.find(&"b"), Some(&2));
}

/// Branching from an old version leaves the newer branch intact.
#[test]
fn branch_from_old_version() {
    let mut map = PersistentHashMap::new();
    map.insert("base", 0);
    let base = map.snapshot();
    map.insert("left", 1);
    let left = map.snapshot();

    map.restore(base);
    map.insert("right", 2);

    assert_eq!(map.find(&"right"), Some(&2));
    assert_eq!(map.find(&"left"), None);
    assert_eq!(map.find_in(&left, &"left"), Some(&1));
    assert_eq!(map.find_in(&left, &"right"), None);
}

/// Checkpoint + insert + rollback = original state, storage truncated.
#[test]
fn rollback_after_insert() {
    let mut map = PersistentHashMap::new();
    map.insert(1, 10);
    map.insert(2, 20);

    let cp = map.checkpoint();
    let saved_arena = map.arena_len();

    map.insert(3, 30);
    map.insert(4, 40);
    assert_eq!(map.len(), 4);
    assert_ne!(map.arena_len(), saved_arena);

    map.rollback(cp);
    assert_eq!(map.len(), 2);
    assert_eq!(map.arena_len(), saved_arena);
    assert_eq!(map.find(&1), Some(&10));
    assert_eq!(map.find(&2), Some(&20));
    assert_eq!(map.find(&3), None);
}

/// Checkpoint + erase + rollback = original state.
#[test]
fn rollback_after_erase() {
    let mut map = PersistentHashMap::new();
    map.insert("a", 1);
    map.insert("b", 2);

    let cp = map.checkpoint();
    map.erase(&"a");
    assert_eq!(map.len(), 1);

    map.rollback(cp);
    assert_eq!(map.len(), 2);
    assert_eq!(map.find(&"a"), Some(&1));
    assert_eq!(map.find(&"b"), Some(&2));
}

/// Multiple checkpoints: rollback to the earlier one.
#[test]
fn nested_checkpoints() {
    let mut map = PersistentHashMap::new();
    map.insert(1, 10);
    let cp1 = map.checkpoint();

    map.insert(2, 20);
    let _cp2 = map.checkpoint();
    map.insert(3, 30);

    map.rollback(cp1);
    assert_eq!(map.len(), 1);
    assert_eq!(map.find(&1), Some(&10));
    assert_eq!(map.find(&2), None);
}
