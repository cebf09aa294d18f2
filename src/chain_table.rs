//! ChainTable: structural layer holding the bucket array and its chains.
//!
//! Entries live in a generational arena; each bucket slot stores the arena
//! key of its chain head, and entries carry `prev`/`next` arena keys. A key
//! that is stale or absent simply ends a walk, so no operation can follow a
//! dangling link.
//!
//! This layer never resizes itself. The owning map decides when to build a
//! new table and moves entries across with `drain_chains`.

use crate::index::bucket_index;
use core::mem;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Entry<V> {
    key: String,
    value: V,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

#[derive(Debug)]
pub(crate) struct ChainTable<V> {
    slots: Vec<Option<DefaultKey>>,
    entries: SlotMap<DefaultKey, Entry<V>>, // chain nodes, linked by arena key
}

impl<V> ChainTable<V> {
    /// Empty table with `capacity` buckets. `capacity` must be non-zero.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: vec![None; capacity],
            entries: SlotMap::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn slot_of(&self, key: &str) -> usize {
        bucket_index(key, self.slots.len())
    }

    /// Walk the chain in `slot` looking for `key`.
    fn find_in(&self, slot: usize, key: &str) -> Option<DefaultKey> {
        let mut cur = self.slots[slot];
        while let Some(k) = cur {
            let e = self.entries.get(k)?;
            if e.key == key {
                return Some(k);
            }
            cur = e.next;
        }
        None
    }

    /// Overwrite the value of an existing key in place, or append a new
    /// entry at the tail of its chain. Returns the previous value on update.
    pub(crate) fn insert_or_update(&mut self, key: String, value: V) -> Option<V> {
        let slot = self.slot_of(&key);
        let mut tail = None;
        let mut cur = self.slots[slot];
        while let Some(k) = cur {
            let e = &mut self.entries[k];
            if e.key == key {
                return Some(mem::replace(&mut e.value, value));
            }
            tail = Some(k);
            cur = e.next;
        }

        let k = self.entries.insert(Entry {
            key,
            value,
            prev: tail,
            next: None,
        });
        match tail {
            Some(t) => self.entries[t].next = Some(k),
            None => self.slots[slot] = Some(k),
        }
        None
    }

    pub(crate) fn get(&self, key: &str) -> Option<&V> {
        let k = self.find_in(self.slot_of(key), key)?;
        self.entries.get(k).map(|e| &e.value)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = self.find_in(self.slot_of(key), key)?;
        self.entries.get_mut(k).map(|e| &mut e.value)
    }

    /// Splice `key` out of its chain. Absent keys leave the table untouched.
    pub(crate) fn remove(&mut self, key: &str) -> Option<(String, V)> {
        let slot = self.slot_of(key);
        let k = self.find_in(slot, key)?;
        let entry = self.entries.remove(k)?;

        match entry.prev {
            Some(p) => self.entries[p].next = entry.next,
            None => self.slots[slot] = entry.next,
        }
        if let Some(n) = entry.next {
            self.entries[n].prev = entry.prev;
        }

        Some((entry.key, entry.value))
    }

    /// Visit entries bucket by bucket, each chain head to tail.
    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter {
            table: self,
            slot: 0,
            cursor: None,
            remaining: self.entries.len(),
        }
    }

    /// Move every entry out in bucket order, each chain head to tail.
    /// Whatever is not consumed is dropped with the iterator; the table is
    /// empty afterwards either way.
    pub(crate) fn drain_chains(&mut self) -> DrainChains<'_, V> {
        DrainChains {
            table: self,
            slot: 0,
            cursor: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn chain_lengths(&self) -> Vec<usize> {
        (0..self.slots.len())
            .map(|slot| {
                let mut n = 0;
                let mut cur = self.slots[slot];
                while let Some(k) = cur {
                    n += 1;
                    cur = self.entries[k].next;
                }
                n
            })
            .collect()
    }

    /// Panics unless every structural invariant holds: links agree in both
    /// directions, heads have no `prev`, every entry sits in the bucket its
    /// key indexes to, keys are unique per chain, and every arena entry is
    /// reachable from exactly one slot.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        use std::collections::HashSet;

        let mut reachable = 0usize;
        for (slot, head) in self.slots.iter().enumerate() {
            let mut seen: HashSet<&str> = HashSet::new();
            let mut prev: Option<DefaultKey> = None;
            let mut cur = *head;
            while let Some(k) = cur {
                let e = self.entries.get(k).expect("link points at a live entry");
                assert_eq!(e.prev, prev, "prev link mismatch for {:?}", e.key);
                assert_eq!(
                    bucket_index(&e.key, self.slots.len()),
                    slot,
                    "{:?} stored in the wrong bucket",
                    e.key
                );
                assert!(seen.insert(&e.key), "duplicate key {:?} in chain", e.key);
                reachable += 1;
                prev = Some(k);
                cur = e.next;
            }
        }
        assert_eq!(reachable, self.entries.len(), "unreachable arena entries");
    }
}

/// Iterator over `(&str, &V)` pairs in bucket order.
pub struct Iter<'a, V> {
    table: &'a ChainTable<V>,
    slot: usize,
    cursor: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cursor {
                let e = self.table.entries.get(k)?;
                self.cursor = e.next;
                self.remaining = self.remaining.saturating_sub(1);
                return Some((e.key.as_str(), &e.value));
            }
            self.cursor = *self.table.slots.get(self.slot)?;
            self.slot += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// Draining iterator returned by `ChainTable::drain_chains`.
pub(crate) struct DrainChains<'a, V> {
    table: &'a mut ChainTable<V>,
    slot: usize,
    cursor: Option<DefaultKey>,
}

impl<V> Iterator for DrainChains<'_, V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cursor {
                let e = self.table.entries.remove(k)?;
                self.cursor = e.next;
                return Some((e.key, e.value));
            }
            self.cursor = self.table.slots.get_mut(self.slot)?.take();
            self.slot += 1;
        }
    }
}

impl<V> Drop for DrainChains<'_, V> {
    fn drop(&mut self) {
        self.table.entries.clear();
        self.table.slots.iter_mut().for_each(|s| *s = None);
    }
}
