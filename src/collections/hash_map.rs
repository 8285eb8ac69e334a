// Open-addressing hash map with linear probing.
//
// Growth: before every insert the load factor `len / capacity` is measured; at
// or above LOAD_FACTOR_LIMIT the table doubles and every live record is
// re-placed at `hash % new_capacity`. Removal leaves a tombstone so that probe
// chains running through the removed slot stay intact.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;

use tracing::trace;

use super::{MutableWordCollection, WordCollection};

/// Capacity used by `HashMap::new`
pub const DEFAULT_CAPACITY: usize = 5;

/// Load factor at which the next insert first doubles the table
pub const LOAD_FACTOR_LIMIT: f64 = 0.65;

/// A stored key/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<K, V> {
    key: K,
    value: V,
}

impl<K, V> Record<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

#[derive(Debug, Clone)]
enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied(Record<K, V>),
}

impl<K, V> Slot<K, V> {
    fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }
}

/// Mutable associative store; not synchronized, wrap it in a lock to share writers
#[derive(Clone)]
pub struct HashMap<K, V, S = RandomState> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
    hasher: S,
}

impl<K, V> HashMap<K, V, RandomState> {
    /// Empty map with `DEFAULT_CAPACITY` slots
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Empty map with `capacity` slots (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V> Default for HashMap<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashMap<K, V, S> {
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            slots: empty_slots(capacity.max(1)),
            len: 0,
            tombstones: 0,
            hasher,
        }
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.len
    }

    /// Alias of `len`, matching the `WordCollection` vocabulary
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the table
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Current `len / capacity`
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    /// Iterate live records in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Record<K, V>> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(record) => Some(record),
            _ => None,
        })
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn home_slot<Q: Hash + ?Sized>(&self, key: &Q, capacity: usize) -> usize {
        (self.hasher.hash_one(key) % capacity as u64) as usize
    }

    /// Insert `key` with `value`, growing the table first when the load factor
    /// has reached the limit. An existing key keeps its slot and gets the new
    /// value. Returns the stored record.
    pub fn insert(&mut self, key: K, value: V) -> &mut Record<K, V> {
        if self.load_factor() >= LOAD_FACTOR_LIMIT {
            self.rehash(self.capacity() * 2);
        } else if (self.len + self.tombstones) as f64 / self.capacity() as f64 >= LOAD_FACTOR_LIMIT {
            // Purge tombstones without growing.
            self.rehash(self.capacity());
        }

        let index = match self.probe(&key) {
            Probe::Found(index) => {
                if let Slot::Occupied(record) = &mut self.slots[index] {
                    record.value = value;
                }
                index
            }
            Probe::Vacant(index) => {
                if matches!(self.slots[index], Slot::Tombstone) {
                    self.tombstones -= 1;
                }
                self.slots[index] = Slot::Occupied(Record { key, value });
                self.len += 1;
                index
            }
        };

        match &mut self.slots[index] {
            Slot::Occupied(record) => record,
            _ => unreachable!("slot {index} was just filled"),
        }
    }

    /// Look up the record stored under `key`
    pub fn find<Q>(&self, key: &Q) -> Option<&Record<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.probe(key) {
            Probe::Found(index) => match &self.slots[index] {
                Slot::Occupied(record) => Some(record),
                _ => None,
            },
            Probe::Vacant(_) => None,
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(Record::value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.probe(key) {
            Probe::Found(index) => match &mut self.slots[index] {
                Slot::Occupied(record) => Some(&mut record.value),
                _ => None,
            },
            Probe::Vacant(_) => None,
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        matches!(self.probe(key), Probe::Found(_))
    }

    /// Remove `key`, returning its value, or `None` when it was not stored
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Probe::Found(index) = self.probe(key) else {
            return None;
        };

        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(record) => {
                self.len -= 1;
                self.tombstones += 1;
                Some(record.value)
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Walk the probe chain from the home slot of `key`.
    ///
    /// Stops at the matching record, at the first empty slot, or after one
    /// full lap. A vacant result points at the first reusable slot seen.
    fn probe<Q>(&self, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let capacity = self.capacity();
        let home = self.home_slot(key, capacity);
        let mut first_free = None;

        for step in 0..capacity {
            let index = (home + step) % capacity;
            match &self.slots[index] {
                Slot::Occupied(record) if Borrow::<Q>::borrow(&record.key) == key => {
                    return Probe::Found(index)
                }
                Slot::Occupied(_) => {}
                Slot::Tombstone => {
                    first_free.get_or_insert(index);
                }
                Slot::Empty => return Probe::Vacant(first_free.unwrap_or(index)),
            }
        }

        // Full lap with no empty slot. Inserts never get here because the load
        // checks leave at least one empty slot, so this is a lookup miss.
        Probe::Vacant(first_free.unwrap_or(home))
    }

    /// Rebuild the table with `new_capacity` slots, re-placing live records
    fn rehash(&mut self, new_capacity: usize) {
        trace!(from = self.capacity(), to = new_capacity, len = self.len, "rehashing");

        let old = mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.tombstones = 0;

        for slot in old {
            if let Slot::Occupied(record) = slot {
                let mut index = self.home_slot(&record.key, new_capacity);
                while self.slots[index].is_occupied() {
                    index = (index + 1) % new_capacity;
                }
                self.slots[index] = Slot::Occupied(record);
            }
        }
    }
}

enum Probe {
    Found(usize),
    Vacant(usize),
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || Slot::Empty);
    slots
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|record| (&record.key, &record.value)))
            .finish()
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashMap<K, V, RandomState>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, S> WordCollection for HashMap<K, V, S>
where
    K: Hash + Eq + Borrow<str>,
    S: BuildHasher,
{
    fn size(&self) -> usize {
        self.len
    }

    fn contains(&self, word: &str) -> bool {
        self.contains_key(word)
    }
}

impl<S: BuildHasher> MutableWordCollection for HashMap<String, (), S> {
    fn insert_word(&mut self, word: &str) -> bool {
        if self.contains_key(word) {
            return false;
        }
        self.insert(word.to_string(), ());
        true
    }

    fn remove_word(&mut self, word: &str) -> bool {
        self.remove(word).is_some()
    }
}
