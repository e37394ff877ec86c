//! ChainHashMap: separate-chaining hash table with explicit capacity and
//! a pluggable hash function.
//!
//! The table owns a fixed-length bucket array and a node arena shared by
//! every bucket's chain. Keys route through `hash_one(key) % capacity`;
//! the chain at that index performs the actual insert/update/remove/
//! lookup. Capacity never changes behind the caller's back: growth is
//! only via [`ChainHashMap::resize_table`], which rehashes every entry
//! into a freshly built bucket array.
//!
//! A capacity of zero is a legal degenerate state: no index can be
//! computed, so mutations are no-ops, lookups report absence, and
//! [`ChainHashMap::table_load`] fails explicitly instead of dividing by
//! zero.

use crate::bucket_chain::{BucketChain, Node};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use log::debug;
use slotmap::{DefaultKey, SlotMap};
use std::collections::hash_map::RandomState;
use thiserror::Error;

/// Errors surfaced by capacity-dependent accessors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// The table was built with zero buckets, so no load factor exists.
    #[error("load factor is undefined for a zero-capacity table")]
    ZeroCapacity,
}

pub struct ChainHashMap<K, V, S = RandomState> {
    hasher: S,
    buckets: Vec<BucketChain>,
    nodes: SlotMap<DefaultKey, Node<K, V>>, // storage shared by all chains
}

impl<K, V> ChainHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Create a table with `capacity` buckets and the default hasher.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

/// Iterator over immutable entries in `ChainHashMap`.
pub struct Iter<'a, K, V> {
    it: slotmap::basic::Iter<'a, DefaultKey, Node<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, n)| (&n.key, &n.value))
    }
}

/// Iterator over mutable entries in `ChainHashMap`.
pub struct IterMut<'a, K, V> {
    it: slotmap::basic::IterMut<'a, DefaultKey, Node<K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, n)| (&n.key, &mut n.value))
    }
}

impl<K, V, S> ChainHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Create a table with `capacity` buckets and an injected hasher. The
    /// hasher is bound for the table's lifetime and carried unchanged
    /// across resizes.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            hasher,
            buckets: vec![BucketChain::EMPTY; capacity],
            nodes: SlotMap::with_key(),
        }
    }

    /// Number of live entries across all chains.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Declared bucket count. May be zero.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Bucket index for `q`, or `None` when the table has no buckets and
    /// no index can be computed.
    fn bucket_index<Q>(&self, q: &Q) -> Option<usize>
    where
        Q: ?Sized + Hash,
    {
        if self.buckets.is_empty() {
            return None;
        }
        let hash = self.hasher.hash_one(q);
        Some((hash % self.buckets.len() as u64) as usize)
    }

    /// Stored value for `q`, or `None` when the key is absent (including
    /// on a zero-capacity table).
    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.bucket_index(q)?;
        let slot = self.buckets[idx].find(&self.nodes, q)?;
        Some(&self.nodes[slot].value)
    }

    /// Mutable access to the stored value for `q`. Mutation goes through
    /// the owning table rather than a long-lived node alias.
    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.bucket_index(q)?;
        let slot = self.buckets[idx].find(&self.nodes, q)?;
        Some(&mut self.nodes[slot].value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).is_some()
    }

    /// Insert or update the pair. An existing key has its value replaced
    /// in place and the previous value is returned; a new key is inserted
    /// at the front of its bucket's chain. On a zero-capacity table the
    /// pair is discarded and `None` is returned.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let idx = self.bucket_index(&key)?;
        if let Some(slot) = self.buckets[idx].find(&self.nodes, &key) {
            return Some(mem::replace(&mut self.nodes[slot].value, value));
        }
        self.buckets[idx].push_front(&mut self.nodes, key, value);
        None
    }

    /// Remove the entry for `q`, returning its value. Exactly one node is
    /// unlinked per successful removal; absence (and zero capacity) is a
    /// no-op returning `None`.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.bucket_index(q)?;
        let (_, value) = self.buckets[idx].remove(&mut self.nodes, q)?;
        Some(value)
    }

    /// Drop every entry and reset every chain. Capacity is untouched.
    pub fn clear(&mut self) {
        self.nodes.clear();
        for chain in &mut self.buckets {
            *chain = BucketChain::EMPTY;
        }
    }

    /// Rebuild the table with `new_capacity` buckets, rehashing every
    /// entry under the new capacity. Entries keep their arena slots and
    /// the hash function is carried over unchanged; the old bucket array
    /// is superseded in a single assignment. Resizing to zero drops every
    /// entry, since a zero-capacity table cannot host any bucket.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity == 0 {
            self.nodes.clear();
            self.buckets.clear();
            return;
        }
        let mut buckets = vec![BucketChain::EMPTY; new_capacity];
        let slots: Vec<DefaultKey> = self.nodes.keys().collect();
        for slot in slots {
            let hash = self.hasher.hash_one(&self.nodes[slot].key);
            let idx = (hash % new_capacity as u64) as usize;
            buckets[idx].relink_front(&mut self.nodes, slot);
        }
        debug!(
            "rehashed {} entries into {} buckets",
            self.nodes.len(),
            new_capacity
        );
        self.buckets = buckets;
    }

    /// Number of buckets whose chain holds no entries. Zero on a
    /// zero-capacity table.
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|c| c.is_empty()).count()
    }

    /// Live entries per bucket, `len / capacity`. Fails on a
    /// zero-capacity table instead of dividing by zero.
    pub fn table_load(&self) -> Result<f64, TableError> {
        if self.buckets.is_empty() {
            return Err(TableError::ZeroCapacity);
        }
        Ok(self.nodes.len() as f64 / self.buckets.len() as f64)
    }

    /// Iterate all live entries. Order is unspecified and not stable
    /// across mutations.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.nodes.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.nodes.iter_mut(),
        }
    }

    /// Walk one bucket's chain front to back. Test-support hook for
    /// asserting chain placement; not part of the public contract.
    #[cfg(test)]
    pub(crate) fn bucket_keys(&self, index: usize) -> Vec<&K> {
        self.buckets[index]
            .slots(&self.nodes)
            .map(|s| &self.nodes[s].key)
            .collect()
    }
}
