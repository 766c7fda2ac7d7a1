//! First-seen-wins de-duplication scoped to one scan or one grouping pass.

use std::collections::HashSet;
use std::hash::Hash;

/// Ordered collection that silently drops items whose key was already seen.
#[derive(Debug)]
pub struct FirstSeen<K, T> {
    seen: HashSet<K>,
    items: Vec<T>,
}

impl<K: Eq + Hash, T> FirstSeen<K, T> {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    /// Append `item` unless `key` was pushed before. Returns whether it was kept.
    pub fn push(&mut self, key: K, item: T) -> bool {
        if !self.seen.insert(key) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn contains(&self, key: &K) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<K: Eq + Hash, T> Default for FirstSeen<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
