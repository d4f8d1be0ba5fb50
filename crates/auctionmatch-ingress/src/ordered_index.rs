//! Insertion-ordered keyed container.
//!
//! Combines a unique-key lookup with an append-only entry list. Entries
//! are never removed or reordered, so the position of a key is fixed the
//! moment it is first inserted.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Map that iterates in first-insertion order.
#[derive(Debug, Clone)]
pub struct OrderedIndex<K, V> {
    positions: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> OrderedIndex<K, V>
where
    K: Eq + Hash + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Return the value for `key`, appending `make()` if the key is new.
    ///
    /// The `bool` is `true` when the entry was created by this call.
    pub fn get_or_insert_with<F>(&mut self, key: &K, make: F) -> (&mut V, bool)
    where
        F: FnOnce() -> V,
    {
        if let Some(&pos) = self.positions.get(key) {
            return (&mut self.entries[pos].1, false);
        }
        let pos = self.entries.len();
        self.positions.insert(key.clone(), pos);
        self.entries.push((key.clone(), make()));
        (&mut self.entries[pos].1, true)
    }

    /// Look up a value by key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.positions.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Entry at a given insertion position.
    #[must_use]
    pub fn get_index(&self, pos: usize) -> Option<(&K, &V)> {
        self.entries.get(pos).map(|(k, v)| (k, v))
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for OrderedIndex<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
