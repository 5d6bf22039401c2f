// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Boxed iterator over the live entries of a table
pub type BoxedIter<'a, V> = Box<dyn Iterator<Item = (i64, &'a V)> + 'a>;

/// Storage engine API used by [`crate::LargeMap`]
///
/// The engine does not keep track of its item count, that is the map's job.
/// None of the operations fail: misses and duplicates are reported through
/// the return values.
#[allow(clippy::module_name_repetitions)]
pub trait AbstractTable<V> {
    /// Inserts the value if the key is not present yet.
    ///
    /// Returns `false` (without touching the table) if the key already exists.
    fn try_insert(&mut self, key: i64, value: V) -> bool;

    /// Inserts or overwrites the value.
    ///
    /// Returns `true` if the key did not exist before.
    fn insert(&mut self, key: i64, value: V) -> bool;

    /// Returns the value of the key, if it exists.
    fn get(&self, key: i64) -> Option<&V>;

    /// Returns a mutable reference to the value of the key, if it exists.
    fn get_mut(&mut self, key: i64) -> Option<&mut V>;

    /// Returns the existing value, or inserts `value` if the key does not exist.
    ///
    /// The flag is `true` if the value was inserted.
    fn get_or_insert(&mut self, key: i64, value: V) -> (&mut V, bool);

    /// Removes the key, returning its value if it existed.
    fn take(&mut self, key: i64) -> Option<V>;

    /// Removes the key.
    ///
    /// Returns `true` if the key existed.
    fn remove(&mut self, key: i64) -> bool {
        self.take(key).is_some()
    }

    /// Returns `true` if the table contains the key.
    fn contains_key(&self, key: i64) -> bool {
        self.get(key).is_some()
    }

    /// Removes all items.
    fn clear(&mut self);

    /// Returns an iterator over all live items, in unspecified order.
    fn iter(&self) -> BoxedIter<'_, V>;
}
