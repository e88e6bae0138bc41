use core::fmt::Debug;

use crate::strategy::HashingStrategy;
use crate::strategy::NaturalStrategy;
use crate::table;
use crate::table::PackedTable;
use crate::table::corruption;
use crate::view::EntrySet;
use crate::view::EntrySetMut;
use crate::view::KeySet;
use crate::view::KeySetMut;
use crate::view::ValuesView;
use crate::view::ValuesViewMut;

pub(crate) fn expect_key<K>(key: Option<&K>) -> &K {
    match key {
        Some(key) => key,
        None => corruption(),
    }
}

/// A hash map backed by the packed-array [`PackedTable`] engine.
///
/// `PackedMap<K, V, H>` stores key-value pairs in one flat slot array and
/// resolves collisions through dense per-slot chains. The hashing strategy
/// `H` is chosen at construction and immutable thereafter; it decides both
/// how keys hash and when two keys are the same, so the map can impose an
/// external identity (say, case-insensitive strings) without its own table
/// implementation. The default strategy uses a key's own `Hash`/`Eq`.
///
/// The map assumes a single logical mutator at a time. The one sanctioned
/// concurrent pattern is read-only partitioned traversal through
/// [`batch_for_each`](PackedMap::batch_for_each) while no mutation is in
/// flight.
///
/// # Performance Characteristics
///
/// - **Lookup**: one slot probe plus at most one linear scan of that slot's
///   chain; expected chain length stays near a small constant at the
///   default load factor.
/// - **Memory**: one enum slot per bucket, no per-entry link nodes; chains
///   grow by a fixed increment and compact on removal.
pub struct PackedMap<K, V, H = NaturalStrategy> {
    pub(crate) table: PackedTable<K, V>,
    pub(crate) strategy: H,
    pub(crate) generation: u64,
}

impl<K, V, H> Debug for PackedMap<K, V, H>
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

impl<K, V> PackedMap<K, V> {
    /// Creates an empty map with the default strategy, capacity, and load
    /// factor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let map: PackedMap<i32, String> = PackedMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_strategy(NaturalStrategy::default())
    }

    /// Creates an empty map with the default strategy, sized to hold
    /// `capacity` entries without rehashing.
    ///
    /// The actual capacity is the next power of two covering
    /// `capacity / load_factor`, so it may be larger than requested.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let map: PackedMap<i32, String> = PackedMap::with_capacity(100);
    /// assert!(map.capacity() >= 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_strategy(capacity, NaturalStrategy::default())
    }

    /// Creates an empty map with the default strategy and the given
    /// capacity and load factor.
    ///
    /// # Panics
    ///
    /// Panics if `load_factor` is not in `(0, 1]`.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f64) -> Self {
        Self::with_capacity_load_factor_and_strategy(
            capacity,
            load_factor,
            NaturalStrategy::default(),
        )
    }
}

impl<K, V, H> PackedMap<K, V, H> {
    /// Creates an empty map that hashes and compares keys through
    /// `strategy`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::HashingStrategy;
    /// use packed_map::PackedMap;
    ///
    /// struct ByLength;
    ///
    /// impl HashingStrategy<&'static str> for ByLength {
    ///     fn hash_key(&self, key: &&'static str) -> u64 {
    ///         key.len() as u64
    ///     }
    ///
    ///     fn eq_keys(&self, a: &&'static str, b: &&'static str) -> bool {
    ///         a.len() == b.len()
    ///     }
    /// }
    ///
    /// let mut map = PackedMap::with_strategy(ByLength);
    /// map.insert("one", 1);
    /// map.insert("two", 2);
    /// assert_eq!(map.len(), 1, "same length, same key");
    /// ```
    pub fn with_strategy(strategy: H) -> Self {
        PackedMap {
            table: PackedTable::new(),
            strategy,
            generation: 0,
        }
    }

    /// Creates an empty map with the given strategy, sized to hold
    /// `capacity` entries without rehashing.
    pub fn with_capacity_and_strategy(capacity: usize, strategy: H) -> Self {
        PackedMap {
            table: PackedTable::with_capacity(capacity),
            strategy,
            generation: 0,
        }
    }

    /// Creates an empty map with the given strategy, capacity, and load
    /// factor.
    ///
    /// # Panics
    ///
    /// Panics if `load_factor` is not in `(0, 1]`.
    pub fn with_capacity_load_factor_and_strategy(
        capacity: usize,
        load_factor: f64,
        strategy: H,
    ) -> Self {
        PackedMap {
            table: PackedTable::with_capacity_and_load_factor(capacity, load_factor),
            strategy,
            generation: 0,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of entries the primary slot array can hold before
    /// chaining.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the load factor controlling the rehash threshold.
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Returns a reference to the map's hashing strategy.
    pub fn strategy(&self) -> &H {
        &self.strategy
    }

    /// Removes all entries, keeping the allocated capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.insert(1, "a");
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.generation += 1;
        }
        self.table.clear();
    }

    /// Shrinks the table to the smallest capacity satisfying the load
    /// factor, if that is smaller than half the current capacity. Returns
    /// whether a reallocation occurred.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::with_capacity(1000);
    /// map.insert(1, "a");
    /// assert!(map.trim_to_size());
    /// assert!(map.capacity() < 1000);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn trim_to_size(&mut self) -> bool {
        self.table.trim_to_size()
    }

    /// Returns `true` if any entry holds `value`. This is a full table
    /// scan; the map keeps no value index.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.table.contains_value(value)
    }

    /// Returns an iterator over the map's key-value pairs in arbitrary
    /// order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let mut pairs: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [(1, "a"), (2, "b")]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the map's keys.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the map's values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Removes every entry, yielding them by value.
    ///
    /// The map is empty afterwards even if the iterator is dropped
    /// unconsumed; capacity is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let pairs: Vec<_> = map.drain().collect();
    /// assert_eq!(pairs.len(), 2);
    /// assert!(map.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<K, V> {
        if !self.is_empty() {
            self.generation += 1;
        }
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Calls `f` for every key.
    pub fn for_each_key<F>(&self, mut f: F)
    where
        F: FnMut(&K),
    {
        self.table.for_each(|key, _| f(expect_key(key)));
    }

    /// Calls `f` for every value.
    pub fn for_each_value<F>(&self, mut f: F)
    where
        F: FnMut(&V),
    {
        self.table.for_each(|_, value| f(value));
    }

    /// Calls `f` for every key-value pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.insert(1, 10);
    /// map.insert(2, 20);
    ///
    /// let mut total = 0;
    /// map.for_each_key_value(|key, value| total += key * value);
    /// assert_eq!(total, 50);
    /// ```
    pub fn for_each_key_value<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.table.for_each(|key, value| f(expect_key(key), value));
    }

    /// Returns the number of batches a traversal should be split into so
    /// each covers roughly `batch_size` primary slots.
    ///
    /// # Panics
    ///
    /// Panics if `batch_size` is zero.
    pub fn batch_count(&self, batch_size: usize) -> usize {
        self.table.batch_count(batch_size)
    }

    /// Calls `f` for every value in one of `section_count` contiguous,
    /// slot-aligned partitions of the table.
    ///
    /// Together the sections cover every entry exactly once, and a chain is
    /// always visited by the section containing its anchor slot. Because
    /// this takes `&self`, disjoint sections may be traversed from multiple
    /// threads concurrently as long as no mutation is in flight.
    ///
    /// # Panics
    ///
    /// Panics if `section_count` is zero or `section` is out of range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// for i in 0..100 {
    ///     map.insert(i, 1u32);
    /// }
    ///
    /// let sections = map.batch_count(16);
    /// let mut total = 0;
    /// for section in 0..sections {
    ///     map.batch_for_each(section, sections, |value| total += value);
    /// }
    /// assert_eq!(total, 100);
    /// ```
    pub fn batch_for_each<F>(&self, section: usize, section_count: usize, mut f: F)
    where
        F: FnMut(&V),
    {
        self.table
            .batch_for_each(section, section_count, |_, value| f(value));
    }

    /// Returns a live read-only view of the map's keys.
    pub fn key_set(&self) -> KeySet<'_, K, V, H> {
        KeySet { map: self }
    }

    /// Returns a live view of the map's keys that can remove entries.
    pub fn key_set_mut(&mut self) -> KeySetMut<'_, K, V, H> {
        KeySetMut { map: self }
    }

    /// Returns a live read-only view of the map's values.
    pub fn values_view(&self) -> ValuesView<'_, K, V, H> {
        ValuesView { map: self }
    }

    /// Returns a live view of the map's values that can remove entries.
    pub fn values_view_mut(&mut self) -> ValuesViewMut<'_, K, V, H> {
        ValuesViewMut { map: self }
    }

    /// Returns a live read-only view of the map's entries.
    pub fn entry_set(&self) -> EntrySet<'_, K, V, H> {
        EntrySet { map: self }
    }

    /// Returns a live view of the map's entries that can remove them.
    pub fn entry_set_mut(&mut self) -> EntrySetMut<'_, K, V, H> {
        EntrySetMut { map: self }
    }

    /// Returns a read-only copy of this map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.insert(1, "one");
    ///
    /// let frozen = map.to_immutable();
    /// map.insert(2, "two");
    ///
    /// assert_eq!(frozen.get(&1), Some(&"one"));
    /// assert_eq!(frozen.len(), 1);
    /// ```
    pub fn to_immutable(&self) -> ImmutableMap<K, V, H>
    where
        K: Clone,
        V: Clone,
        H: Clone,
    {
        ImmutableMap {
            inner: self.clone(),
        }
    }

    /// Converts this map into a read-only representation without copying.
    pub fn into_immutable(self) -> ImmutableMap<K, V, H> {
        ImmutableMap { inner: self }
    }
}

impl<K, V, H> PackedMap<K, V, H>
where
    H: HashingStrategy<K>,
{
    /// Inserts a key-value pair, returning the previous value if the key
    /// was already present under the map's strategy.
    ///
    /// An insertion that pushes the map past its load-factor threshold
    /// triggers a capacity-doubling rehash after the insert completes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.table.put(&self.strategy, Some(key), value)
    }

    /// Returns a reference to the value mapped to `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.table.get(&self.strategy, Some(key))
    }

    /// Returns a mutable reference to the value mapped to `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.insert(1, 10);
    /// if let Some(value) = map.get_mut(&1) {
    ///     *value += 1;
    /// }
    /// assert_eq!(map.get(&1), Some(&11));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.table.get_mut(&self.strategy, Some(key))
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.table.contains_key(&self.strategy, Some(key))
    }

    /// Removes `key` from the map, returning its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.table.remove(&self.strategy, Some(key));
        if removed.is_some() {
            self.generation += 1;
        }
        removed
    }

    /// Removes `key` from the map, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let removed = self.table.remove_pair(&self.strategy, Some(key));
        if removed.is_some() {
            self.generation += 1;
        }
        removed.map(|(key, value)| match key {
            Some(key) => (key, value),
            None => corruption(),
        })
    }

    /// Returns the value mapped to `key`, inserting `value` first if the
    /// key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// assert_eq!(*map.get_if_absent_put(1, "a"), "a");
    /// assert_eq!(*map.get_if_absent_put(1, "b"), "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn get_if_absent_put(&mut self, key: K, value: V) -> &mut V {
        self.table
            .get_or_insert_with(&self.strategy, Some(key), |_| value)
    }

    /// Returns the value mapped to `key`, inserting the value produced by
    /// `f` first if the key is absent. `f` runs only on the absent path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.get_if_absent_put_with(1, || "computed");
    /// assert_eq!(map.get(&1), Some(&"computed"));
    /// ```
    pub fn get_if_absent_put_with<F>(&mut self, key: K, f: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.table
            .get_or_insert_with(&self.strategy, Some(key), |_| f())
    }

    /// Returns the value mapped to `key`, inserting the value produced by
    /// `f` from the key itself if absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.get_if_absent_put_with_key("four", |key| key.len());
    /// assert_eq!(map.get(&"four"), Some(&4));
    /// ```
    pub fn get_if_absent_put_with_key<F>(&mut self, key: K, f: F) -> &mut V
    where
        F: FnOnce(&K) -> V,
    {
        self.table
            .get_or_insert_with(&self.strategy, Some(key), |key| f(expect_key(key)))
    }

    /// Applies `f` to the value mapped to `key`, inserting the value
    /// produced by `default` first if the key is absent. Returns the value
    /// after the update.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.update_value("hits", || 0, |count| *count += 1);
    /// map.update_value("hits", || 0, |count| *count += 1);
    /// assert_eq!(map.get(&"hits"), Some(&2));
    /// ```
    pub fn update_value<D, F>(&mut self, key: K, default: D, f: F) -> &mut V
    where
        D: FnOnce() -> V,
        F: FnOnce(&mut V),
    {
        self.table.update_with(&self.strategy, Some(key), default, f)
    }

    /// Like [`update_value`](PackedMap::update_value), threading an extra
    /// parameter into the update so callers can pass context without
    /// capturing it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.update_value_with("sum", || 0, |total, add| *total += *add, &5);
    /// map.update_value_with("sum", || 0, |total, add| *total += *add, &7);
    /// assert_eq!(map.get(&"sum"), Some(&12));
    /// ```
    pub fn update_value_with<P, D, F>(&mut self, key: K, default: D, f: F, parameter: &P) -> &mut V
    where
        D: FnOnce() -> V,
        F: FnOnce(&mut V, &P),
    {
        self.table
            .update_with(&self.strategy, Some(key), default, |value| {
                f(value, parameter)
            })
    }

    /// Removes every entry for which `pred` returns `true`, returning
    /// whether any entry was removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.insert(1, "odd");
    /// map.insert(2, "even");
    /// assert!(map.remove_if(|key, _| key % 2 == 0));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove_if<F>(&mut self, mut pred: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        let removed = self
            .table
            .remove_if(|key, value| pred(expect_key(key), value));
        if removed > 0 {
            self.generation += 1;
        }
        removed > 0
    }

    /// Keeps only the entries for which `keep` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// for i in 0..10 {
    ///     map.insert(i, i);
    /// }
    /// map.retain(|_, value| value % 2 == 0);
    /// assert_eq!(map.len(), 5);
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.remove_if(|key, value| !keep(key, value));
    }
}

impl<K, V, H> Default for PackedMap<K, V, H>
where
    H: Default,
{
    fn default() -> Self {
        Self::with_strategy(H::default())
    }
}

impl<K, V, H> Clone for PackedMap<K, V, H>
where
    K: Clone,
    V: Clone,
    H: Clone,
{
    fn clone(&self) -> Self {
        PackedMap {
            table: self.table.clone(),
            strategy: self.strategy.clone(),
            generation: self.generation,
        }
    }
}

impl<K, V, H> PartialEq for PackedMap<K, V, H>
where
    V: PartialEq,
    H: HashingStrategy<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V, H> Eq for PackedMap<K, V, H>
where
    V: Eq,
    H: HashingStrategy<K>,
{
}

impl<K, V, H> Extend<(K, V)> for PackedMap<K, V, H>
where
    H: HashingStrategy<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, H> FromIterator<(K, V)> for PackedMap<K, V, H>
where
    H: HashingStrategy<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut map = Self::with_capacity_and_strategy(lower, H::default());
        map.extend(iter);
        map
    }
}

impl<'a, K, V, H> IntoIterator for &'a PackedMap<K, V, H> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, H> IntoIterator for PackedMap<K, V, H> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.drain(),
        }
    }
}

/// A read-only representation of a [`PackedMap`].
///
/// Produced by [`PackedMap::to_immutable`] and
/// [`PackedMap::into_immutable`]; exposes the query half of the contract
/// and nothing that mutates.
#[derive(Clone)]
pub struct ImmutableMap<K, V, H = NaturalStrategy> {
    inner: PackedMap<K, V, H>,
}

impl<K, V, H> Debug for ImmutableMap<K, V, H>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.inner.fmt(f)
    }
}

impl<K, V, H> ImmutableMap<K, V, H> {
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns an iterator over the key-value pairs.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.inner.iter()
    }

    /// Calls `f` for every key-value pair.
    pub fn for_each_key_value<F>(&self, f: F)
    where
        F: FnMut(&K, &V),
    {
        self.inner.for_each_key_value(f);
    }

    /// Returns `true` if any entry holds `value`.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.inner.contains_value(value)
    }

    /// Converts back into a mutable map.
    pub fn to_mutable(self) -> PackedMap<K, V, H> {
        self.inner
    }
}

impl<K, V, H> ImmutableMap<K, V, H>
where
    H: HashingStrategy<K>,
{
    /// Returns a reference to the value mapped to `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }
}

/// An iterator over the key-value pairs of a [`PackedMap`].
pub struct Iter<'a, K, V> {
    inner: table::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, value)| (expect_key(key), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// An iterator over the keys of a [`PackedMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`PackedMap`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// A draining iterator over the key-value pairs of a [`PackedMap`].
pub struct Drain<K, V> {
    inner: table::Drain<K, V>,
}

impl<K, V> Iterator for Drain<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, value)| match key {
                Some(key) => (key, value),
                None => corruption(),
            })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<K, V> {}

/// An owning iterator over the key-value pairs of a [`PackedMap`].
pub struct IntoIter<K, V> {
    inner: table::Drain<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, value)| match key {
                Some(key) => (key, value),
                None => corruption(),
            })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
