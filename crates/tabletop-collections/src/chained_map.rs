//! Hash map with separate chaining.
//!
//! Each bucket owns a singly linked chain of boxed entries. New entries are
//! pushed at the front of their chain. Before a new key is stored, a table
//! that is at least half full is rebuilt at twice the bucket count.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

/// Number of buckets in a freshly created or cleared map.
pub const DEFAULT_CAPACITY: usize = 100;

const GROWTH_FACTOR: usize = 2;

type Link<K, V> = Option<Box<Entry<K, V>>>;

#[derive(Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    next: Link<K, V>,
}

impl<K, V> Entry<K, V> {
    fn matches<Q: Eq + ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
    {
        let k: &Q = self.key.borrow();
        k == key
    }
}

fn empty_buckets<K, V>(n: usize) -> Vec<Link<K, V>> {
    std::iter::repeat_with(|| None).take(n).collect()
}

/// Key-value map resolving hash collisions with per-bucket chains.
///
/// Keys are compared by equality, never by identity. A missing key is a
/// normal outcome reported as `None`.
#[derive(Clone)]
pub struct ChainedMap<K, V, S = RandomState> {
    buckets: Vec<Link<K, V>>,
    len: usize,
    hasher: S,
}

impl<K, V> ChainedMap<K, V, RandomState> {
    /// Create an empty map with [`DEFAULT_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, V, S: Default> Default for ChainedMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> ChainedMap<K, V, S> {
    /// Create an empty map hashing keys with `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            buckets: empty_buckets(DEFAULT_CAPACITY),
            len: 0,
            hasher,
        }
    }

    /// Number of live entries across all chains.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Drop every entry and shrink back to [`DEFAULT_CAPACITY`] buckets.
    pub fn clear(&mut self) {
        self.buckets = empty_buckets(DEFAULT_CAPACITY);
        self.len = 0;
    }

    /// Iterate over `(key, value)` pairs in bucket order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.len,
        }
    }

    /// Iterate over the keys in bucket order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate over the values in bucket order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ChainedMap<K, V, S> {
    fn bucket_index<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Insert `value` under `key`, returning the value it replaced.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        if self.len >= self.buckets.len() / 2 {
            self.grow();
        }
        let i = self.bucket_index(&key);
        let next = self.buckets[i].take();
        self.buckets[i] = Some(Box::new(Entry { key, value, next }));
        self.len += 1;
        None
    }

    /// The value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut cur = self.buckets[self.bucket_index(key)].as_deref();
        while let Some(entry) = cur {
            if entry.matches(key) {
                return Some(&entry.value);
            }
            cur = entry.next.as_deref();
        }
        None
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let i = self.bucket_index(key);
        let mut cur = self.buckets[i].as_deref_mut();
        while let Some(entry) = cur {
            if entry.matches(key) {
                return Some(&mut entry.value);
            }
            cur = entry.next.as_deref_mut();
        }
        None
    }

    /// Whether an entry exists for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Unlink the entry for `key` from its chain and return its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let i = self.bucket_index(key);
        let mut link = &mut self.buckets[i];
        while link.as_ref().is_some_and(|e| !e.matches(key)) {
            link = &mut link.as_mut()?.next;
        }
        let mut removed = link.take()?;
        *link = removed.next.take();
        self.len -= 1;
        Some(removed.value)
    }

    /// Rebuild the table at `GROWTH_FACTOR` times the bucket count,
    /// re-bucketing every entry.
    fn grow(&mut self) {
        let new_capacity = self.buckets.len() * GROWTH_FACTOR;
        log::debug!(
            "chained map: {} entries, growing {} -> {} buckets",
            self.len,
            self.buckets.len(),
            new_capacity
        );
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for mut chain in old {
            while let Some(mut entry) = chain {
                chain = entry.next.take();
                let i = self.bucket_index(&entry.key);
                entry.next = self.buckets[i].take();
                self.buckets[i] = Some(entry);
            }
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> FromIterator<(K, V)> for ChainedMap<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for ChainedMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

/// Iterator over the entries of a [`ChainedMap`].
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Link<K, V>>,
    chain: Option<&'a Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain {
                self.chain = entry.next.as_deref();
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
            self.chain = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a ChainedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<K: serde::Serialize, V: serde::Serialize, S> serde::Serialize for ChainedMap<K, V, S> {
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::Deserialize<'de> for ChainedMap<K, V, S>
where
    K: serde::Deserialize<'de> + Hash + Eq,
    V: serde::Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor<K, V, S>(std::marker::PhantomData<fn() -> ChainedMap<K, V, S>>);

        impl<'de, K, V, S> serde::de::Visitor<'de> for MapVisitor<K, V, S>
        where
            K: serde::Deserialize<'de> + Hash + Eq,
            V: serde::Deserialize<'de>,
            S: BuildHasher + Default,
        {
            type Value = ChainedMap<K, V, S>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<Self::Value, A::Error> {
                let mut map = ChainedMap::default();
                while let Some((k, v)) = access.next_entry()? {
                    map.put(k, v);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor(std::marker::PhantomData))
    }
}
