// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    r#abstract::{AbstractTable, BoxedIter},
    Error, ShardedTable,
};
use std::marker::PhantomData;

/// A map keyed by `i64`, sharded over a three-level table hierarchy
///
/// The map keeps an exact item count; the storage engine (`T`) does not.
///
/// # Examples
///
/// ```
/// use large_map::{Error, LargeMap};
///
/// let mut map = LargeMap::new();
///
/// map.add(1, "a")?;
/// assert_eq!(Err(Error::DuplicateKey(1)), map.add(1, "b"));
/// assert_eq!(1, map.len());
///
/// map.set(i64::MIN, "min");
/// assert_eq!(Ok(&"min"), map.get(i64::MIN));
///
/// assert!(map.remove(1));
/// assert_eq!(Err(Error::KeyNotFound(1)), map.get(1));
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct LargeMap<V, T = ShardedTable<V>> {
    storage: T,
    count: u64,
    phantom: PhantomData<V>,
}

impl<V> Default for LargeMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LargeMap<V> {
    /// Creates an empty map without a sizing hint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(ShardedTable::default())
    }

    /// Creates an empty map, pre-sized for `capacity` items.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the capacity is negative.
    pub fn with_capacity(capacity: i64) -> crate::Result<Self> {
        ShardedTable::new(capacity).map(Self::with_storage)
    }
}

impl<V, T: AbstractTable<V>> LargeMap<V, T> {
    /// Creates a map on top of the given storage engine.
    ///
    /// Items that are already stored in the engine are counted.
    pub fn with_storage(storage: T) -> Self {
        let count = storage.iter().count() as u64;

        Self {
            storage,
            count,
            phantom: PhantomData,
        }
    }

    /// Returns the storage engine.
    #[must_use]
    pub fn storage(&self) -> &T {
        &self.storage
    }

    /// Returns the number of items in the map.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Returns `true` if the map contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the value of the key.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the key does not exist.
    pub fn get(&self, key: i64) -> crate::Result<&V> {
        self.storage.get(key).ok_or(Error::KeyNotFound(key))
    }

    /// Returns a mutable reference to the value of the key, if it exists.
    pub fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        self.storage.get_mut(key)
    }

    /// Inserts or overwrites the value of the key.
    pub fn set(&mut self, key: i64, value: V) {
        if self.storage.insert(key, value) {
            self.count += 1;
        }
    }

    /// Inserts a new key.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the key already exists; the map is not changed.
    pub fn add(&mut self, key: i64, value: V) -> crate::Result<()> {
        if !self.storage.try_insert(key, value) {
            return Err(Error::DuplicateKey(key));
        }

        self.count += 1;
        Ok(())
    }

    /// Inserts the key if it does not exist yet.
    ///
    /// Returns `true` if the item was inserted.
    pub fn try_add(&mut self, key: i64, value: V) -> bool {
        let inserted = self.storage.try_insert(key, value);

        if inserted {
            self.count += 1;
        }

        inserted
    }

    /// Returns the value of the key, if it exists.
    #[must_use]
    pub fn try_get_value(&self, key: i64) -> Option<&V> {
        self.storage.get(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: i64) -> bool {
        self.storage.contains_key(key)
    }

    /// Removes the key.
    ///
    /// Returns `true` if the key existed.
    pub fn remove(&mut self, key: i64) -> bool {
        let removed = self.storage.remove(key);

        if removed {
            self.count -= 1;
        }

        removed
    }

    /// Removes the key, returning its value if it existed.
    pub fn try_remove(&mut self, key: i64) -> Option<V> {
        let value = self.storage.take(key)?;
        self.count -= 1;
        Some(value)
    }

    /// Returns the value of the key, inserting `value` first if the key does not exist.
    pub fn get_or_add(&mut self, key: i64, value: V) -> &V {
        let (value, inserted) = self.storage.get_or_insert(key, value);

        if inserted {
            self.count += 1;
        }

        value
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.count = 0;
    }

    /// Returns an iterator over all items, in unspecified order.
    #[must_use]
    pub fn iter(&self) -> BoxedIter<'_, V> {
        self.storage.iter()
    }

    /// Returns an iterator over all keys, in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = i64> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over all values, in unspecified order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }
}

impl<'a, V, T: AbstractTable<V>> IntoIterator for &'a LargeMap<V, T> {
    type Item = (i64, &'a V);
    type IntoIter = BoxedIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, T: AbstractTable<V>> Extend<(i64, V)> for LargeMap<V, T> {
    fn extend<I: IntoIterator<Item = (i64, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<V> FromIterator<(i64, V)> for LargeMap<V> {
    fn from_iter<I: IntoIterator<Item = (i64, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V: std::fmt::Debug, T: AbstractTable<V>> std::fmt::Debug for LargeMap<V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn map_new_is_empty() {
        let map = LargeMap::<u8>::new();
        assert_eq!(0, map.len());
        assert!(map.is_empty());
    }

    #[test]
    fn map_with_negative_capacity() {
        assert!(matches!(
            LargeMap::<u8>::with_capacity(-5),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn map_add_duplicate_keeps_count() {
        let mut map = LargeMap::new();

        assert_eq!(Ok(()), map.add(1, "a"));
        assert_eq!(Err(Error::DuplicateKey(1)), map.add(1, "b"));
        assert_eq!(1, map.len());
        assert_eq!(Ok(&"a"), map.get(1));
    }

    #[test]
    fn map_set_counts_new_keys_only() {
        let mut map = LargeMap::new();

        map.set(5, "x");
        assert_eq!(1, map.len());

        map.set(5, "y");
        assert_eq!(1, map.len());
        assert_eq!(Ok(&"y"), map.get(5));
    }

    #[test]
    fn map_get_missing() {
        let map = LargeMap::<u8>::new();
        assert_eq!(Err(Error::KeyNotFound(3)), map.get(3));
    }

    #[test]
    fn map_remove_twice() {
        let mut map = LargeMap::new();
        map.set(7, ());

        assert!(map.remove(7));
        assert!(!map.remove(7));
        assert_eq!(0, map.len());
    }

    #[test]
    fn map_try_remove() {
        let mut map = LargeMap::new();
        map.set(7, String::from("seven"));

        assert_eq!(Some(String::from("seven")), map.try_remove(7));
        assert_eq!(None, map.try_remove(7));
        assert_eq!(0, map.len());
    }

    #[test]
    fn map_get_or_add() {
        let mut map = LargeMap::new();

        assert_eq!(&"first", map.get_or_add(10, "first"));
        assert_eq!(&"first", map.get_or_add(10, "second"));
        assert_eq!(1, map.len());
    }

    #[test]
    fn map_get_mut() {
        let mut map = LargeMap::new();
        map.set(1, 1);

        if let Some(value) = map.get_mut(1) {
            *value = 100;
        }

        assert_eq!(Ok(&100), map.get(1));
        assert_eq!(1, map.len());
    }

    #[test]
    fn map_clear() {
        let mut map = (0..100).map(|key| (key, key)).collect::<LargeMap<_>>();
        assert_eq!(100, map.len());

        map.clear();
        assert!(map.is_empty());
        assert!(!map.contains_key(0));
        assert_eq!(0, map.iter().count());
    }

    #[test]
    fn map_with_storage_counts_existing_items() {
        let mut table = ShardedTable::default();
        table.insert(1, 'a');
        table.insert(2, 'b');

        let map: LargeMap<char> = LargeMap::with_storage(table);
        assert_eq!(2, map.len());
    }

    #[test]
    fn map_extend_overwrites() {
        let mut map = LargeMap::new();
        map.extend([(1, 'a'), (2, 'b'), (1, 'c')]);

        assert_eq!(2, map.len());
        assert_eq!(Ok(&'c'), map.get(1));
    }

    #[test]
    fn map_keys_and_values() {
        let map = [(-3, 30), (4, 40)].into_iter().collect::<LargeMap<_>>();

        let mut keys = map.keys().collect::<Vec<_>>();
        keys.sort_unstable();
        assert_eq!(vec![-3, 4], keys);

        let mut values = map.values().copied().collect::<Vec<_>>();
        values.sort_unstable();
        assert_eq!(vec![30, 40], values);

        assert_eq!(2, (&map).into_iter().count());
    }

    #[test]
    fn map_debug() {
        let mut map = LargeMap::new();
        map.set(-1, "v");
        assert_eq!(r#"{-1: "v"}"#, format!("{map:?}"));
    }
}
