// Dictionary structures backing the rules: a growable open-addressing map and
// an immutable chained set built once from a static word list.

pub mod frozen_set;
pub mod hash_map;

pub use frozen_set::FrozenHashSet;
pub use hash_map::{HashMap, Record};

/// A collection of words that can be asked whether it holds a word
pub trait WordCollection {
    /// Number of distinct words stored
    fn size(&self) -> usize;

    /// Check membership by full value comparison
    fn contains(&self, word: &str) -> bool;
}

/// A `WordCollection` that can change after construction
pub trait MutableWordCollection: WordCollection {
    /// Add a word, returning false if it was already present
    fn insert_word(&mut self, word: &str) -> bool;

    /// Remove a word, returning false if it was absent
    fn remove_word(&mut self, word: &str) -> bool;
}

impl<C: WordCollection + ?Sized> WordCollection for &C {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }
}

impl<C: WordCollection + ?Sized> WordCollection for std::sync::Arc<C> {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }
}
