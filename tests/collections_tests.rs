// Dictionary structures through the public API

use dsrules::collections::{FrozenHashSet, HashMap, MutableWordCollection, WordCollection};
use std::sync::Arc;

#[test]
fn test_default_map() {
    let map: HashMap<String, u32> = HashMap::new();
    assert_eq!(map.capacity(), 5);
    assert_eq!(map.size(), 0);
    assert!(map.is_empty());
}

#[test]
fn test_insert_keeps_capacity_below_threshold() {
    let mut map = HashMap::new();
    map.insert("pnr".to_string(), 1);
    assert_eq!(map.size(), 1);
    assert_eq!(map.capacity(), 5);
}

#[test]
fn test_rehash_threshold() {
    let mut map = HashMap::with_capacity(2);
    map.insert(1u32, "a");
    map.insert(2u32, "b");
    assert_eq!(map.capacity(), 2);

    map.insert(3u32, "c");
    assert_eq!(map.capacity(), 4);
    assert_eq!(map.size(), 3);
    for key in [1, 2, 3] {
        assert!(map.contains_key(&key));
    }
}

#[test]
fn test_insert_returns_record() {
    let mut map = HashMap::new();
    let record = map.insert("astma".to_string(), 7);
    assert_eq!(record.key(), "astma");
    *record.value_mut() += 1;
    assert_eq!(map.get("astma"), Some(&8));
}

#[test]
fn test_remove() {
    let mut map: HashMap<String, u32> = (0..20).map(|i| (format!("word{i}"), i)).collect();
    assert_eq!(map.remove("word3"), Some(3));
    assert_eq!(map.remove("word3"), None);
    assert_eq!(map.remove("missing"), None);
    assert_eq!(map.size(), 19);
    for i in (0..20).filter(|&i| i != 3) {
        assert_eq!(map.get(format!("word{i}").as_str()), Some(&i), "word{i}");
    }
}

#[test]
fn test_frozen_set_membership() {
    let set = FrozenHashSet::new(["a", "b", "c"]);
    assert!(set.contains("a"));
    assert!(!set.contains("z"));
    assert_eq!(set.size(), 3);
}

#[test]
fn test_collections_satisfy_word_collection() {
    fn known(collection: &dyn WordCollection, words: &[&str]) -> Vec<bool> {
        words.iter().map(|w| collection.contains(w)).collect()
    }

    let frozen = FrozenHashSet::new(["kræft", "gigt"]);
    let mut map: HashMap<String, ()> = HashMap::new();
    assert!(map.insert_word("kræft"));
    assert!(map.insert_word("gigt"));
    assert!(!map.insert_word("gigt"));

    let probe = ["kræft", "feber", "gigt"];
    assert_eq!(known(&frozen, &probe), known(&map, &probe));

    assert!(map.remove_word("gigt"));
    assert!(!map.remove_word("gigt"));
    assert_eq!(map.size(), 1);
}

#[test]
fn test_shared_frozen_set() {
    let set = Arc::new(FrozenHashSet::new(["Vestergade", "Algade"]));
    std::thread::scope(|scope| {
        for _ in 0..4 {
            let set = Arc::clone(&set);
            scope.spawn(move || {
                assert!(set.contains("Algade"));
                assert_eq!(WordCollection::size(&set), 2);
            });
        }
    });
}
