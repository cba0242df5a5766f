use alloc::vec::Vec;
use core::fmt::Debug;

use log::debug;
use log::warn;

use crate::error::CapacityExhausted;
use crate::error::ConfigurationError;
use crate::error::Error;
use crate::error::Result;
use crate::hash_provider::FnHash;
use crate::hash_provider::HashProvider;
use crate::hash_provider::PolynomialHash;
use crate::hash_provider::RawBytes;
use crate::hash_table::HOP_RANGE;
use crate::hash_table::HashTable;
use crate::hash_table::NoVacancy;
use crate::options::LoadFactors;
use crate::options::Options;

/// A hash map using circular hopscotch hashing as the underlying storage.
///
/// Every entry lives within [`HOP_RANGE`] slots of its home slot, so a
/// lookup inspects at most one neighborhood. The map keeps its load factor
/// between the configured bounds by doubling its capacity before an insertion
/// would exceed the upper bound, and halving it after a removal drops below
/// the lower bound (never below the initial capacity).
///
/// Keys are hashed by a [`HashProvider`] `P`. The default,
/// [`PolynomialHash`], hashes the key's raw bytes and is only accepted for
/// keys implementing [`RawBytes`] with a contiguous representation.
///
/// Operations that may need room return [`Result`]: when no free slot can be
/// brought into a neighborhood the operation fails with
/// [`CapacityExhausted`] and no stored entry is lost.
#[derive(Clone)]
pub struct HashMap<K, V, P = PolynomialHash> {
    table: HashTable<(K, V)>,
    hash_provider: P,
    load_factors: LoadFactors,
    min_capacity: usize,
}

impl<K, V, P> Debug for HashMap<K, V, P>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V> HashMap<K, V>
where
    K: RawBytes + Eq,
{
    /// Creates an empty map using the default polynomial hash and default
    /// [`Options`].
    ///
    /// Fails with [`ConfigurationError::InvalidKeyType`] if `K` has no
    /// contiguous byte representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hopscotch_table::HashMap;
    ///
    /// let map: HashMap<u64, &str> = HashMap::new().unwrap();
    /// assert!(map.is_empty());
    ///
    /// assert!(HashMap::<String, u32>::new().is_err());
    /// ```
    pub fn new() -> Result<Self> {
        Self::with_options(Options::new())
    }
}

impl<K, V, F> HashMap<K, V, FnHash<F>>
where
    K: Eq,
    F: Fn(&K) -> usize,
{
    /// Creates an empty map hashing keys with `hash_fn`, whose result is
    /// reduced modulo the capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hopscotch_table::HashMap;
    ///
    /// let mut map = HashMap::with_hash_fn(|key: &String| key.len()).unwrap();
    /// map.insert("hop".to_string(), 1).unwrap();
    /// assert_eq!(map.get(&"hop".to_string()), Some(&1));
    /// ```
    pub fn with_hash_fn(hash_fn: F) -> Result<Self> {
        Self::with_options(Options::new().hash_fn(hash_fn))
    }
}

impl<K, V, P> HashMap<K, V, P> {
    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the map.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Returns the upper load factor bound.
    pub fn max_load_factor(&self) -> f64 {
        self.load_factors.max()
    }

    /// Returns the lower load factor bound.
    pub fn min_load_factor(&self) -> f64 {
        self.load_factors.min()
    }

    /// Returns both load factor bounds.
    pub fn load_factors(&self) -> LoadFactors {
        self.load_factors
    }

    /// Returns the hash provider the map was built with.
    pub fn hash_provider(&self) -> &P {
        &self.hash_provider
    }

    /// Removes every entry and returns to the initial capacity.
    pub fn clear(&mut self) {
        self.table = HashTable::with_capacity(self.min_capacity);
    }

    /// Returns clones of every stored value, in slot order.
    pub fn get_all(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.values().cloned().collect()
    }

    /// Iterates over the key-value pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Iterates over the keys in slot order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterates over the values in slot order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Counts entries per distance from their home slot.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> crate::hash_table::ProbeHistogram {
        self.table.probe_histogram()
    }

    /// Returns utilization statistics for the underlying table.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::hash_table::DebugStats {
        self.table.debug_stats()
    }
}

impl<K, V, P> HashMap<K, V, P>
where
    K: Eq,
    P: HashProvider<K>,
{
    /// Creates an empty map from `options`.
    ///
    /// Fails with a [`ConfigurationError`] if the initial capacity is smaller
    /// than [`HOP_RANGE`], if the load factors are invalid, or if the hash
    /// provider rejects `K`.
    pub fn with_options(options: Options<P>) -> Result<Self> {
        if options.initial_capacity < HOP_RANGE {
            return Err(ConfigurationError::InvalidCapacity {
                capacity: options.initial_capacity,
                minimum: HOP_RANGE,
            }
            .into());
        }
        let load_factors = options.validated_load_factors()?;
        options.hash_provider.validate()?;

        Ok(Self {
            table: HashTable::with_capacity(options.initial_capacity),
            hash_provider: options.hash_provider,
            load_factors,
            min_capacity: options.initial_capacity,
        })
    }

    #[inline]
    fn home(&self, key: &K) -> usize {
        let home = self.hash_provider.home(key, self.capacity());
        debug_assert!(home < self.capacity(), "hash provider returned {home}");
        home
    }

    #[inline]
    fn find_index(&self, key: &K) -> Option<usize> {
        self.table.find(self.home(key), |(k, _)| k == key)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hopscotch_table::HashMap;
    ///
    /// let mut map = HashMap::new().unwrap();
    /// map.insert(1u32, "a").unwrap();
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.find_index(key)?;
        self.table.get(index).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let index = self.find_index(key)?;
        self.table.get(index).map(|(k, v)| (k, v))
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.find_index(key)?;
        self.table.get_mut(index).map(|(_, v)| v)
    }

    /// Inserts a key-value pair if `key` is not present yet.
    ///
    /// Returns `Ok(false)`, leaving the stored value untouched, when the key
    /// is already present, and `Ok(true)` once the pair is stored. Growth
    /// happens before placement if the new entry would push the load factor
    /// over its upper bound.
    ///
    /// # Errors
    ///
    /// [`CapacityExhausted::InsertionFailed`] if no free slot can be brought
    /// into the key's neighborhood, [`CapacityExhausted::ResizeFailed`] if
    /// the required growth fails. Either way every previously stored entry
    /// is still present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hopscotch_table::HashMap;
    ///
    /// let mut map = HashMap::new().unwrap();
    /// assert!(map.insert(37u16, "a").unwrap());
    /// assert!(!map.insert(37, "b").unwrap());
    /// assert_eq!(map.get(&37), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<bool> {
        if self.find_index(&key).is_some() {
            return Ok(false);
        }

        self.insert_unique(key, value)?;
        Ok(true)
    }

    /// Stores a key known to be absent and returns its slot index.
    fn insert_unique(&mut self, key: K, value: V) -> Result<usize> {
        let len = self.len() + 1;
        if self.load_factors.exceeds_max(len, self.capacity()) {
            self.resize(self.grow_target(len))?;
        }

        let home = self.home(&key);
        match self.table.find_vacancy(home) {
            Ok(index) => {
                self.table.place(home, index, (key, value));
                Ok(index)
            }
            Err(NoVacancy) => {
                warn!(
                    "no vacancy reachable from home slot {home} ({} of {} slots used)",
                    self.len(),
                    self.capacity()
                );
                Err(CapacityExhausted::InsertionFailed {
                    home,
                    capacity: self.capacity(),
                }
                .into())
            }
        }
    }

    /// Removes `key` and returns its value.
    ///
    /// # Errors
    ///
    /// [`CapacityExhausted::ResizeFailed`] if the removal calls for a shrink
    /// that cannot re-seat every entry. The removal is then rolled back.
    pub fn remove(&mut self, key: &K) -> Result<Option<V>> {
        Ok(self.remove_entry(key)?.map(|(_, v)| v))
    }

    /// Removes `key` and returns the stored pair. See [`remove`].
    ///
    /// [`remove`]: HashMap::remove
    pub fn remove_entry(&mut self, key: &K) -> Result<Option<(K, V)>> {
        let home = self.home(key);
        let Some(index) = self.table.find(home, |(k, _)| k == key) else {
            return Ok(None);
        };
        let Some(entry) = self.table.take(home, index) else {
            return Ok(None);
        };

        if let Some(capacity) = self.shrink_target()
            && let Err(error) = self.resize(capacity)
        {
            self.table.place(home, index, entry);
            return Err(error);
        }

        Ok(Some(entry))
    }

    /// Returns a mutable reference to the value for `key`, inserting the
    /// value returned by `default` first if the key is absent.
    ///
    /// # Errors
    ///
    /// As for [`insert`](HashMap::insert). `default` is not called when the
    /// key is present.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> Result<&mut V> {
        let index = match self.find_index(&key) {
            Some(index) => index,
            None => self.insert_unique(key, default())?,
        };

        Ok(&mut self.table[index].1)
    }

    /// Returns a mutable reference to the value for `key`, inserting
    /// `V::default()` first if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hopscotch_table::HashMap;
    ///
    /// let mut counts: HashMap<char, usize> = HashMap::new().unwrap();
    /// for c in "hopscotch".chars() {
    ///     *counts.get_or_insert_default(c).unwrap() += 1;
    /// }
    /// assert_eq!(counts.get(&'h'), Some(&2));
    /// assert_eq!(counts.get(&'s'), Some(&1));
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> Result<&mut V>
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Replaces the load factor bounds, resizing right away if the current
    /// load factor falls outside them.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::InvalidLoadFactors`] with nothing changed if the
    /// bounds are invalid. [`CapacityExhausted::ResizeFailed`] if the
    /// resulting resize fails, in which case the previous bounds are kept.
    pub fn set_load_factors(&mut self, max: f64, min: f64) -> Result<()> {
        let load_factors = LoadFactors::new(max, min)?;
        let previous = core::mem::replace(&mut self.load_factors, load_factors);

        let len = self.len();
        let target = if load_factors.exceeds_max(len, self.capacity()) {
            Some(self.grow_target(len))
        } else {
            self.shrink_target()
        };

        if let Some(capacity) = target
            && let Err(error) = self.resize(capacity)
        {
            self.load_factors = previous;
            return Err(error);
        }

        Ok(())
    }

    /// Smallest capacity reached by doubling that holds `len` entries within
    /// the upper bound.
    fn grow_target(&self, len: usize) -> usize {
        let mut capacity = self.capacity();
        while self.load_factors.exceeds_max(len, capacity) && capacity < usize::MAX {
            capacity = capacity.saturating_mul(2);
        }
        capacity
    }

    /// Capacity to shrink to after a removal, if any.
    ///
    /// Halves while the lower bound is violated, stopping at the minimum
    /// capacity and before a halving that would violate the upper bound.
    fn shrink_target(&self) -> Option<usize> {
        let len = self.len();
        let mut capacity = self.capacity();
        while capacity > self.min_capacity && self.load_factors.below_min(len, capacity) {
            let next = capacity.div_ceil(2).max(self.min_capacity);
            if self.load_factors.exceeds_max(len, next) {
                break;
            }
            capacity = next;
        }

        (capacity != self.capacity()).then_some(capacity)
    }

    fn resize(&mut self, capacity: usize) -> Result<()> {
        debug!(
            "resizing from {} to {capacity} slots ({} entries)",
            self.capacity(),
            self.len()
        );

        let hash_provider = &self.hash_provider;
        self.table
            .rehash(capacity, |(key, _), range| hash_provider.home(key, range))
            .map_err(|NoVacancy| {
                warn!("entries could not be re-seated into {capacity} slots");
                Error::from(CapacityExhausted::ResizeFailed { capacity })
            })
    }
}

impl<'a, K, V, P> IntoIterator for &'a HashMap<K, V, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.table.iter(),
        }
    }
}

impl<K, V, P> IntoIterator for HashMap<K, V, P> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

/// An iterator over the key-value pairs of a `HashMap`.
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }
}

/// An iterator over the keys of a `HashMap`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a `HashMap`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// An owning iterator over the key-value pairs of a `HashMap`.
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
