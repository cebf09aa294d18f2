//! ChainHashMap: public map over `ChainTable` with load-factor resizing.

use crate::chain_table::{ChainTable, Iter};
use crate::config::{MapConfig, ResizePolicy};
use crate::error::ChainMapError;
use core::fmt;

/// String-keyed hash map with separate chaining.
///
/// Inserts double the bucket array once the load factor exceeds the grow
/// threshold; removals halve it once the load factor drops below the shrink
/// threshold, but never below the capacity the map was built with.
///
/// ```
/// use chain_map::ChainHashMap;
///
/// let mut m = ChainHashMap::new();
/// m.put("Apples", 5);
/// m.put("Apples", 20);
/// assert_eq!(m.get("Apples"), Some(&20));
/// assert_eq!(m.size(), 1);
/// ```
pub struct ChainHashMap<V> {
    table: ChainTable<V>,
    initial_capacity: usize,
    policy: ResizePolicy,
}

impl<V> ChainHashMap<V> {
    /// Map with 8 buckets and the default 0.75 / 0.25 thresholds.
    pub fn new() -> Self {
        Self::build(MapConfig::default())
    }

    /// Fails with `ZeroCapacity` when `initial_capacity` is 0.
    pub fn with_capacity(initial_capacity: usize) -> Result<Self, ChainMapError> {
        Self::with_config(MapConfig::new(initial_capacity))
    }

    pub fn with_config(config: MapConfig) -> Result<Self, ChainMapError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: MapConfig) -> Self {
        tracing::trace!(
            initial_capacity = config.initial_capacity,
            grow = config.policy.grow_threshold(),
            shrink = config.policy.shrink_threshold(),
            "new chain hash map"
        );
        Self {
            table: ChainTable::new(config.initial_capacity),
            initial_capacity: config.initial_capacity,
            policy: config.policy,
        }
    }

    /// Insert `key`, or overwrite its value if already present. Returns the
    /// replaced value. May double the capacity.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let previous = self.table.insert_or_update(key.into(), value);
        if let Some(target) = self
            .policy
            .grow_target(self.table.len(), self.table.capacity())
        {
            self.rehash(target);
        }
        previous
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.table.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.table.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.table.get(key).is_some()
    }

    /// Remove `key` and return its value. Absent keys are a no-op and never
    /// resize. May halve the capacity, down to the initial capacity.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let (_key, value) = self.table.remove(key)?;
        if let Some(target) = self.policy.shrink_target(
            self.table.len(),
            self.table.capacity(),
            self.initial_capacity,
        ) {
            self.rehash(target);
        }
        Some(value)
    }

    /// Number of live entries.
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Same as `size`.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    pub fn load_factor(&self) -> f64 {
        self.table.len() as f64 / self.table.capacity() as f64
    }

    pub fn policy(&self) -> ResizePolicy {
        self.policy
    }

    /// Entries in bucket order; no ordering guarantee beyond that.
    pub fn iter(&self) -> Iter<'_, V> {
        self.table.iter()
    }

    /// Drop every entry and return to the initial capacity.
    pub fn clear(&mut self) {
        self.table = ChainTable::new(self.initial_capacity);
    }

    // Build the replacement table completely before swapping it in.
    fn rehash(&mut self, new_capacity: usize) {
        let from = self.table.capacity();
        let mut fresh = ChainTable::new(new_capacity);
        for (key, value) in self.table.drain_chains() {
            let _ = fresh.insert_or_update(key, value);
        }
        self.table = fresh;
        tracing::debug!(
            from,
            to = new_capacity,
            len = self.table.len(),
            "rehashed chain table"
        );
    }

    #[cfg(test)]
    pub(crate) fn table(&self) -> &ChainTable<V> {
        &self.table
    }
}

impl<V> Default for ChainHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a ChainHashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for ChainHashMap<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            let _ = self.put(k, v);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ChainHashMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRUITS: [(&str, i32); 12] = [
        ("Oranges", 1),
        ("Pineapples", 10),
        ("Mangos", 7),
        ("Grapefruit", 9),
        ("Avocado", 53),
        ("Blueberry", 16),
        ("Strawberries", 42),
        ("Cherries", 21),
        ("Durian", 18),
        ("Guava", 99),
        ("Blackberries", 53),
        ("Cranberries", 42),
    ];

    /// Invariant: the 7th insert into 8 buckets is the first above 0.75 and
    /// doubles capacity; 12 of 16 sits exactly at 0.75 and does not.
    #[test]
    fn grows_on_seventh_insert() {
        let mut m = ChainHashMap::new();
        for (i, (k, v)) in FRUITS.iter().enumerate() {
            m.put(*k, *v);
            let expected = if i + 1 < 7 { 8 } else { 16 };
            assert_eq!(m.capacity(), expected, "after {} inserts", i + 1);
            m.table().assert_invariants();
        }
        assert_eq!(m.size(), 12);
        for (k, v) in FRUITS {
            assert_eq!(m.get(k), Some(&v));
        }
    }

    /// Invariant: removal shrinks by half once below 0.25, re-placing entries.
    #[test]
    fn shrinks_and_replaces_entries() {
        let mut m = ChainHashMap::with_capacity(4).unwrap();
        for (k, v) in &FRUITS[..4] {
            m.put(*k, *v);
        }
        assert_eq!(m.capacity(), 8);
        m.remove("Oranges");
        m.remove("Pineapples");
        assert_eq!(m.capacity(), 8, "2/8 is exactly 0.25");
        m.remove("Mangos");
        assert_eq!(m.capacity(), 4);
        m.table().assert_invariants();
        assert_eq!(m.get("Grapefruit"), Some(&9));
    }

    /// Invariant: a miss never resizes, even when the table is sparse.
    #[test]
    fn absent_remove_never_resizes() {
        let mut m = ChainHashMap::new();
        for (k, v) in FRUITS {
            m.put(k, v);
        }
        let cap = m.capacity();
        assert_eq!(m.remove("Bananas"), None);
        assert_eq!(m.capacity(), cap);
        assert_eq!(m.size(), 12);
    }

    /// Invariant: update returns the previous value and never grows.
    #[test]
    fn update_returns_previous() {
        let mut m = ChainHashMap::new();
        assert_eq!(m.put("Apples", 5), None);
        assert_eq!(m.put("Apples", 20), Some(5));
        assert_eq!(m.size(), 1);
        assert_eq!(m.capacity(), 8);
    }

    /// Invariant: `clear` resets to the initial capacity with no entries.
    #[test]
    fn clear_resets_capacity() {
        let mut m: ChainHashMap<i32> = FRUITS.iter().copied().collect();
        assert_eq!(m.capacity(), 16);
        m.clear();
        assert!(m.is_empty());
        assert_eq!(m.capacity(), 8);
        assert_eq!(m.get("Oranges"), None);
        m.table().assert_invariants();
    }

    /// Invariant: a custom policy drives the resize points.
    #[test]
    fn custom_policy_thresholds() {
        let cfg = MapConfig::new(4).with_policy(ResizePolicy::new(0.5, 0.125).unwrap());
        let mut m = ChainHashMap::with_config(cfg).unwrap();
        m.put("a", 1);
        m.put("b", 2);
        assert_eq!(m.capacity(), 4, "2/4 is exactly 0.5");
        m.put("c", 3);
        assert_eq!(m.capacity(), 8);
        m.remove("a");
        m.remove("b");
        assert_eq!(m.capacity(), 8, "1/8 is exactly 0.125");
        m.remove("c");
        assert_eq!(m.capacity(), 4);
    }

    #[test]
    fn debug_lists_entries() {
        let mut m = ChainHashMap::new();
        m.put("k", 1);
        assert_eq!(format!("{:?}", m), r#"{"k": 1}"#);
    }
}
