//! HashEngine: fixed bucket array of chain heads over a slot arena.

use crate::config::TableConfig;
use crate::error::TableError;
use crate::hash::bucket_index;
use core::num::NonZeroUsize;
use log::{debug, trace};
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Entry {
    key: Box<[u8]>,
    value: Box<[u8]>,
    next: Option<DefaultKey>,
}

/// String-keyed table resolving collisions by separate chaining.
///
/// Bucket `i` holds the head of a singly linked chain of entries whose keys
/// all satisfy `bucket_index(key, capacity) == i`. Links are arena keys, so
/// every entry is owned by exactly one chain of exactly one table.
#[derive(Debug)]
pub struct HashEngine {
    slots: SlotMap<DefaultKey, Entry>, // entry storage; chains link through it
    buckets: Box<[Option<DefaultKey>]>,
    capacity: NonZeroUsize,
    max_load_factor: Option<f64>,
}

fn empty_buckets(n: usize) -> Box<[Option<DefaultKey>]> {
    vec![None; n].into_boxed_slice()
}

/// Arena walk of one chain, head to tail.
struct Links<'a> {
    slots: &'a SlotMap<DefaultKey, Entry>,
    cur: Option<DefaultKey>,
}

impl<'a> Iterator for Links<'a> {
    type Item = (DefaultKey, &'a Entry);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cur?;
        let e = &self.slots[k];
        self.cur = e.next;
        Some((k, e))
    }
}

/// Iterator over the `(key, value)` pairs of a single bucket, in chain order.
pub struct Chain<'a> {
    links: Links<'a>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (&'a [u8], &'a [u8]);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.links.next().map(|(_, e)| (&*e.key, &*e.value))
    }
}

impl HashEngine {
    /// Creates a table with `capacity` empty buckets and no auto-resize.
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig::new().with_capacity(capacity))
    }

    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        let capacity =
            NonZeroUsize::new(config.capacity).ok_or(TableError::InvalidCapacity(config.capacity))?;
        trace!(
            "creating table with {} buckets (max load factor {:?})",
            capacity,
            config.max_load_factor
        );
        Ok(Self::from_parts(capacity, config.max_load_factor))
    }

    fn from_parts(capacity: NonZeroUsize, max_load_factor: Option<f64>) -> Self {
        Self {
            slots: SlotMap::with_key(),
            buckets: empty_buckets(capacity.get()),
            capacity,
            max_load_factor,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
    pub fn max_load_factor(&self) -> Option<f64> {
        self.max_load_factor
    }

    /// Entries per bucket.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity.get() as f64
    }

    /// Bucket that `key` maps to under the current capacity.
    pub fn bucket_of<K: AsRef<[u8]>>(&self, key: K) -> usize {
        bucket_index(key.as_ref(), self.capacity)
    }

    fn links(&self, index: usize) -> Links<'_> {
        Links {
            slots: &self.slots,
            cur: self.buckets.get(index).copied().flatten(),
        }
    }

    fn find_slot(&self, key: &[u8]) -> Option<DefaultKey> {
        self.links(bucket_index(key, self.capacity))
            .find(|(_, e)| &*e.key == key)
            .map(|(k, _)| k)
    }

    /// Appends `node` after `tail`, or makes it the head when the chain is empty.
    fn link_after(&mut self, index: usize, tail: Option<DefaultKey>, node: DefaultKey) {
        match tail {
            None => self.buckets[index] = Some(node),
            Some(t) => self.slots[t].next = Some(node),
        }
    }

    /// Inserts or overwrites `key`.
    ///
    /// An existing key keeps its chain position and has its value replaced;
    /// the previous value is returned. A new key is appended at the tail of
    /// its bucket's chain. Empty keys are rejected.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Result<Option<Box<[u8]>>, TableError>
    where
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(TableError::InvalidKey);
        }
        let index = bucket_index(key, self.capacity);

        let mut tail = None;
        let mut cur = self.buckets[index];
        while let Some(k) = cur {
            let entry = &mut self.slots[k];
            if &*entry.key == key {
                let old = core::mem::replace(&mut entry.value, Box::from(value.as_ref()));
                return Ok(Some(old));
            }
            tail = cur;
            cur = entry.next;
        }

        let node = self.slots.insert(Entry {
            key: key.into(),
            value: value.as_ref().into(),
            next: None,
        });
        self.link_after(index, tail, node);

        if let Some(lf) = self.max_load_factor {
            if self.load_factor() > lf {
                self.grow(true);
            }
        }
        Ok(None)
    }

    /// Unlinks and frees the entry for `key`, returning its value.
    ///
    /// Removing an absent key is a no-op and returns `None`.
    pub fn remove<K: AsRef<[u8]>>(&mut self, key: K) -> Option<Box<[u8]>> {
        let key = key.as_ref();
        let index = bucket_index(key, self.capacity);

        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[index];
        while let Some(k) = cur {
            let entry = &self.slots[k];
            let next = entry.next;
            if &*entry.key == key {
                match prev {
                    None => self.buckets[index] = next,
                    Some(p) => self.slots[p].next = next,
                }
                return self.slots.remove(k).map(|e| e.value);
            }
            prev = cur;
            cur = next;
        }
        None
    }

    /// Value stored under `key`, or `None` when absent.
    pub fn retrieve<K: AsRef<[u8]>>(&self, key: K) -> Option<&[u8]> {
        self.find_slot(key.as_ref()).map(|k| &*self.slots[k].value)
    }

    pub fn contains_key<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.find_slot(key.as_ref()).is_some()
    }

    /// Consumes the table and returns one with twice as many buckets.
    ///
    /// Entries are relinked, not copied: old buckets are walked in index
    /// order and each chain head to tail, appending every entry to the tail
    /// of its chain under the new capacity. The resulting layout is the one
    /// re-inserting the same walk into an empty table would produce.
    ///
    /// # Panics
    ///
    /// Panics if the doubled capacity overflows `usize`.
    pub fn resize(mut self) -> Self {
        self.grow(false);
        self
    }

    fn grow(&mut self, automatic: bool) {
        let old_capacity = self.capacity;
        let new_capacity = old_capacity
            .get()
            .checked_mul(2)
            .and_then(NonZeroUsize::new)
            .expect("capacity overflow");

        let old_buckets = core::mem::replace(&mut self.buckets, empty_buckets(new_capacity.get()));
        self.capacity = new_capacity;

        let mut tails: Vec<Option<DefaultKey>> = vec![None; new_capacity.get()];
        for &head in old_buckets.iter() {
            let mut cur = head;
            while let Some(k) = cur {
                let entry = &mut self.slots[k];
                cur = entry.next.take();
                let index = bucket_index(&entry.key, new_capacity);
                self.link_after(index, tails[index], k);
                tails[index] = Some(k);
            }
        }
        drop(old_buckets);

        debug!(
            "resized table from {} to {} buckets ({} entries, {})",
            old_capacity,
            new_capacity,
            self.len(),
            if automatic { "automatic" } else { "explicit" }
        );
    }

    /// Releases every entry and then the bucket array.
    ///
    /// Dropping the table does the same; this makes the end of life explicit.
    pub fn destroy(mut self) {
        trace!(
            "destroying table with {} buckets and {} entries",
            self.capacity,
            self.len()
        );
        self.slots.clear();
        self.buckets = Box::default();
    }

    /// Entries of bucket `index`, head to tail. Out-of-range indices yield an
    /// empty chain.
    pub fn chain(&self, index: usize) -> Chain<'_> {
        Chain {
            links: self.links(index),
        }
    }

    /// Renders bucket `index` as `k1 -> k2 -> NULL`, keys decoded lossily as UTF-8.
    pub fn describe_chain(&self, index: usize) -> String {
        let mut out = String::new();
        for (key, _) in self.chain(index) {
            out.push_str(&String::from_utf8_lossy(key));
            out.push_str(" -> ");
        }
        out.push_str("NULL");
        out
    }

    /// Panics unless every structural invariant holds.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        use std::collections::HashSet;

        assert_eq!(self.buckets.len(), self.capacity.get());
        let mut reachable = 0usize;
        for i in 0..self.buckets.len() {
            let mut seen: HashSet<&[u8]> = HashSet::new();
            for (key, _) in self.chain(i) {
                assert_eq!(bucket_index(key, self.capacity), i, "entry in wrong bucket");
                assert!(seen.insert(key), "duplicate key in chain {i}");
                reachable += 1;
            }
        }
        assert_eq!(reachable, self.slots.len(), "unreachable or shared entries");
    }
}

impl Default for HashEngine {
    fn default() -> Self {
        let config = TableConfig::default();
        match NonZeroUsize::new(config.capacity) {
            Some(capacity) => Self::from_parts(capacity, config.max_load_factor),
            None => unreachable!("default capacity is non-zero"),
        }
    }
}
