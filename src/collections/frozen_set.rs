// Build-once string set. Each bucket holds the full stored values, so lookups
// compare strings rather than trusting a hash match.

use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::BuildHasher;

use super::WordCollection;

/// Immutable chained hash set over strings, safe to share across threads
pub struct FrozenHashSet<S = RandomState> {
    buckets: Vec<Vec<Box<str>>>,
    len: usize,
    hasher: S,
}

impl FrozenHashSet<RandomState> {
    /// Build a set with one bucket per input word
    pub fn new<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let words: Vec<I::Item> = words.into_iter().collect();
        let bucket_count = words.len();
        Self::build(bucket_count, words, RandomState::new())
    }

    /// Build a set with an explicit bucket count (at least one)
    pub fn with_buckets<I>(bucket_count: usize, words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::build(bucket_count, words, RandomState::new())
    }
}

impl<S: BuildHasher> FrozenHashSet<S> {
    /// Build with a caller-supplied hasher
    pub fn build<I>(bucket_count: usize, words: I, hasher: S) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut set = Self {
            buckets: vec![Vec::new(); bucket_count.max(1)],
            len: 0,
            hasher,
        };

        for word in words {
            set.insert(word.as_ref());
        }

        set
    }

    fn bucket_of(&self, value: &str) -> usize {
        (self.hasher.hash_one(value) % self.buckets.len() as u64) as usize
    }

    // Only used while building.
    fn insert(&mut self, value: &str) {
        let index = self.bucket_of(value);
        let bucket = &mut self.buckets[index];
        if !bucket.iter().any(|stored| &**stored == value) {
            bucket.push(value.into());
            self.len += 1;
        }
    }

    /// Check whether `value` was in the initializer
    pub fn contains(&self, value: &str) -> bool {
        self.buckets[self.bucket_of(value)]
            .iter()
            .any(|stored| &**stored == value)
    }
}

impl<S> FrozenHashSet<S> {
    /// Number of distinct stored values
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Length of the longest bucket chain
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Iterate stored values in bucket order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.buckets.iter().flatten().map(|value| &**value)
    }
}

impl<A: AsRef<str>> FromIterator<A> for FrozenHashSet<RandomState> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<S: BuildHasher> WordCollection for FrozenHashSet<S> {
    fn size(&self) -> usize {
        self.len
    }

    fn contains(&self, word: &str) -> bool {
        FrozenHashSet::contains(self, word)
    }
}

impl<S> fmt::Debug for FrozenHashSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrozenHashSet")
            .field("len", &self.len)
            .field("buckets", &self.buckets.len())
            .finish()
    }
}
