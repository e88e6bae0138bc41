//! Live views over a [`PackedMap`].
//!
//! Views are windows, not copies: size and membership delegate straight to
//! the map, and the mutable views remove and retain against the map's own
//! storage. A view borrows the map, so the borrow checker guarantees no
//! view outlives a storage swap (rehash, trim) with a stale reference.
//!
//! None of the views can add entries — a key or entry view cannot
//! synthesize the missing half of a pair, so insertion only exists on the
//! map itself.

use alloc::vec::Vec;
use core::borrow::Borrow;

use crate::map::Keys;
use crate::map::PackedMap;
use crate::map::Values;
use crate::strategy::HashingStrategy;

/// A live read-only view of a map's keys.
///
/// Created by [`PackedMap::key_set`].
pub struct KeySet<'a, K, V, H> {
    pub(crate) map: &'a PackedMap<K, V, H>,
}

impl<'a, K, V, H> KeySet<'a, K, V, H> {
    /// Returns the number of keys, which is the size of the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns an iterator over the keys.
    pub fn iter(&self) -> Keys<'a, K, V> {
        self.map.keys()
    }

    /// Calls `f` for every key.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&K),
    {
        self.map.for_each_key(f);
    }

    /// Returns the number of batches a traversal should be split into.
    pub fn batch_count(&self, batch_size: usize) -> usize {
        self.map.batch_count(batch_size)
    }

    /// Calls `f` for every key in one of `section_count` partitions; the
    /// partitioning is the map's own.
    pub fn batch_for_each<F>(&self, section: usize, section_count: usize, mut f: F)
    where
        F: FnMut(&K),
    {
        self.map
            .table
            .batch_for_each(section, section_count, |key, _| {
                f(crate::map::expect_key(key))
            });
    }
}

impl<'a, K, V, H> KeySet<'a, K, V, H>
where
    H: HashingStrategy<K>,
{
    /// Returns `true` if the map contains `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }
}

/// A live view of a map's keys that can remove entries.
///
/// Created by [`PackedMap::key_set_mut`]. Removing a key removes its whole
/// entry from the map.
pub struct KeySetMut<'a, K, V, H> {
    pub(crate) map: &'a mut PackedMap<K, V, H>,
}

impl<'a, K, V, H> KeySetMut<'a, K, V, H> {
    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Reborrows this view as a read-only key view.
    pub fn as_view(&self) -> KeySet<'_, K, V, H> {
        KeySet { map: self.map }
    }

    /// Removes every entry from the map.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<'a, K, V, H> KeySetMut<'a, K, V, H>
where
    H: HashingStrategy<K>,
{
    /// Returns `true` if the map contains `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Removes `key` and its value from the map, returning whether it was
    /// present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.map.remove(key).is_some()
    }

    /// Removes every listed key, returning whether the map changed.
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
    ///
    /// assert!(map.key_set_mut().remove_all([1, 3, 5]));
    /// assert_eq!(map.len(), 7);
    /// ```
    pub fn remove_all<I>(&mut self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        let mut changed = false;
        for key in keys {
            changed |= self.map.remove(key.borrow()).is_some();
        }
        changed
    }

    /// Keeps only the entries whose key is in `keys`, returning whether the
    /// map changed.
    ///
    /// The listed keys are compared under the map's own strategy.
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
    ///
    /// assert!(map.key_set_mut().retain_all([1, 3, 5, 99]));
    /// assert_eq!(map.len(), 3);
    /// ```
    pub fn retain_all<I>(&mut self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        H: Clone,
    {
        let mut keep: PackedMap<K, (), H> =
            PackedMap::with_strategy(self.map.strategy.clone());
        for key in keys {
            keep.insert(key, ());
        }
        self.map.remove_if(|key, _| !keep.contains_key(key))
    }
}

/// A live read-only view of a map's values.
///
/// Created by [`PackedMap::values_view`].
pub struct ValuesView<'a, K, V, H> {
    pub(crate) map: &'a PackedMap<K, V, H>,
}

impl<'a, K, V, H> ValuesView<'a, K, V, H> {
    /// Returns the number of values, which is the size of the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns `true` if any entry holds `value`. Full table scan.
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.contains_value(value)
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> Values<'a, K, V> {
        self.map.values()
    }

    /// Calls `f` for every value.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&V),
    {
        self.map.for_each_value(f);
    }

    /// Returns the number of batches a traversal should be split into.
    pub fn batch_count(&self, batch_size: usize) -> usize {
        self.map.batch_count(batch_size)
    }

    /// Calls `f` for every value in one of `section_count` partitions.
    pub fn batch_for_each<F>(&self, section: usize, section_count: usize, f: F)
    where
        F: FnMut(&V),
    {
        self.map.batch_for_each(section, section_count, f);
    }
}

/// A live view of a map's values that can remove entries.
///
/// Created by [`PackedMap::values_view_mut`]. Removing a value removes the
/// first entry holding it.
pub struct ValuesViewMut<'a, K, V, H> {
    pub(crate) map: &'a mut PackedMap<K, V, H>,
}

impl<'a, K, V, H> ValuesViewMut<'a, K, V, H> {
    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Reborrows this view as a read-only values view.
    pub fn as_view(&self) -> ValuesView<'_, K, V, H> {
        ValuesView { map: self.map }
    }

    /// Removes the first entry whose value equals `value`, returning
    /// whether an entry was removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.insert(1, "shared");
    /// map.insert(2, "shared");
    ///
    /// assert!(map.values_view_mut().remove_value(&"shared"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove_value(&mut self, value: &V) -> bool
    where
        V: PartialEq,
    {
        let removed = self.map.table.remove_value(value);
        if removed {
            self.map.generation += 1;
        }
        removed
    }

    /// Removes every entry from the map.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// A live read-only view of a map's entries.
///
/// Created by [`PackedMap::entry_set`]. Besides membership and traversal,
/// the entry view is where [`DetachedEntry`] handles are obtained.
pub struct EntrySet<'a, K, V, H> {
    pub(crate) map: &'a PackedMap<K, V, H>,
}

impl<'a, K, V, H> EntrySet<'a, K, V, H> {
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> crate::map::Iter<'a, K, V> {
        self.map.iter()
    }

    /// Calls `f` for every entry.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&K, &V),
    {
        self.map.for_each_key_value(f);
    }

    /// Returns the number of batches a traversal should be split into.
    pub fn batch_count(&self, batch_size: usize) -> usize {
        self.map.batch_count(batch_size)
    }

    /// Calls `f` for every entry in one of `section_count` partitions.
    pub fn batch_for_each<F>(&self, section: usize, section_count: usize, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.map
            .table
            .batch_for_each(section, section_count, |key, value| {
                f(crate::map::expect_key(key), value)
            });
    }
}

impl<'a, K, V, H> EntrySet<'a, K, V, H>
where
    H: HashingStrategy<K>,
{
    /// Returns `true` if the map holds exactly this key-value pair.
    pub fn contains(&self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.get(key) == Some(value)
    }

    /// Returns a detached handle for the entry at `key`, if present.
    pub fn detach(&self, key: &K) -> Option<DetachedEntry<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        let value = self.map.get(key)?;
        Some(DetachedEntry {
            key: key.clone(),
            value: value.clone(),
            generation: self.map.generation,
        })
    }

    /// Returns detached handles for every entry.
    pub fn to_detached(&self) -> Vec<DetachedEntry<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        self.map
            .iter()
            .map(|(key, value)| DetachedEntry {
                key: key.clone(),
                value: value.clone(),
                generation: self.map.generation,
            })
            .collect()
    }
}

/// A live view of a map's entries that can remove them.
///
/// Created by [`PackedMap::entry_set_mut`].
pub struct EntrySetMut<'a, K, V, H> {
    pub(crate) map: &'a mut PackedMap<K, V, H>,
}

impl<'a, K, V, H> EntrySetMut<'a, K, V, H> {
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Reborrows this view as a read-only entry view.
    pub fn as_view(&self) -> EntrySet<'_, K, V, H> {
        EntrySet { map: self.map }
    }

    /// Removes every entry from the map.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<'a, K, V, H> EntrySetMut<'a, K, V, H>
where
    H: HashingStrategy<K>,
{
    /// Removes the entry only if the map holds exactly this key-value
    /// pair, returning whether it was removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::PackedMap;
    ///
    /// let mut map = PackedMap::new();
    /// map.insert(1, "a");
    ///
    /// assert!(!map.entry_set_mut().remove(&1, &"stale"));
    /// assert!(map.entry_set_mut().remove(&1, &"a"));
    /// assert!(map.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        if self.map.get(key) == Some(value) {
            self.map.remove(key).is_some()
        } else {
            false
        }
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.map.retain(keep);
    }
}

/// A detached snapshot of one map entry.
///
/// A detached entry owns a copy of its key and value and remembers the
/// owning map's generation at the moment of capture; it does not borrow the
/// map, so it may freely outlive removals and rehashes. Writing through the
/// handle re-validates against the map first: the write commits only if no
/// removal has happened since capture or the key is still present, and is
/// otherwise discarded without producing a value. A handle must be
/// presented to the map it was detached from.
///
/// # Examples
///
/// ```rust
/// use packed_map::PackedMap;
///
/// let mut map = PackedMap::new();
/// map.insert(1, "a");
///
/// let entry = map.entry_set().detach(&1).unwrap();
/// assert_eq!(entry.set_value(&mut map, "b"), Some("a"));
/// assert_eq!(map.get(&1), Some(&"b"));
///
/// let entry = map.entry_set().detach(&1).unwrap();
/// map.remove(&1);
/// assert_eq!(entry.set_value(&mut map, "c"), None, "stale write discarded");
/// assert!(map.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct DetachedEntry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) generation: u64,
}

impl<K, V> DetachedEntry<K, V> {
    /// Returns the captured key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the captured value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the handle, returning the captured pair.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Writes `value` through to the owning map, returning the previous
    /// value.
    ///
    /// The write commits only if the mapping is still alive: either no
    /// removal has happened on the map since this handle was captured, or
    /// the key re-resolves as present. A stale write is discarded and
    /// returns `None` rather than resurrecting a deleted mapping.
    pub fn set_value<H>(self, map: &mut PackedMap<K, V, H>, value: V) -> Option<V>
    where
        H: HashingStrategy<K>,
    {
        if self.generation == map.generation || map.contains_key(&self.key) {
            map.insert(self.key, value)
        } else {
            None
        }
    }
}
