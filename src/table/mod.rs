// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

mod iter;

pub use iter::Iter;

use crate::{
    capacity::{CapacityCalculator, CapacityDistribution, LevelCapacityCalculator},
    r#abstract::{AbstractTable, BoxedIter},
    Error, HashMap, LevelKey,
};
use rustc_hash::FxBuildHasher;
use std::collections::hash_map::Entry;

pub(crate) type ThirdLevel<V> = HashMap<u32, V>;
pub(crate) type SecondLevel<V> = HashMap<u32, ThirdLevel<V>>;
pub(crate) type FirstLevel<V> = HashMap<u32, SecondLevel<V>>;

fn new_level<T>(capacity: u32) -> HashMap<u32, T> {
    HashMap::with_capacity_and_hasher(capacity as usize, FxBuildHasher)
}

/// Number of tables and items currently held by a [`ShardedTable`]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelStats {
    /// Number of second level tables (= occupied first level buckets)
    pub second_level_tables: usize,

    /// Number of third level tables (= occupied second level buckets)
    pub third_level_tables: usize,

    /// Number of stored items
    pub entries: usize,
}

/// Three-level hash table keyed by `i64`
///
/// Keys are routed with [`LevelKey::split`]: the first level maps to second
/// level tables, which map to third level tables, which hold the values.
/// Intermediate tables are created on first use and dropped as soon as they
/// become empty.
///
/// Every new table is pre-sized using the [`CapacityDistribution`] computed
/// at construction.
#[derive(Clone, Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ShardedTable<V> {
    root: FirstLevel<V>,
    distribution: CapacityDistribution,
}

impl<V> Default for ShardedTable<V> {
    fn default() -> Self {
        Self::with_distribution(CapacityDistribution::default())
    }
}

impl<V> ShardedTable<V> {
    /// Creates a table pre-sized for `capacity` items.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the capacity is negative.
    pub fn new(capacity: i64) -> crate::Result<Self> {
        Self::with_calculator(capacity, &LevelCapacityCalculator)
    }

    /// Creates a table pre-sized for `capacity` items, using a custom calculator.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the capacity is negative, or the calculator fails.
    pub fn with_calculator(
        capacity: i64,
        calculator: &dyn CapacityCalculator,
    ) -> crate::Result<Self> {
        if capacity < 0 {
            return Err(Error::InvalidArgument("capacity may not be negative"));
        }

        let distribution = calculator.calculate(capacity)?;
        log::debug!("Pre-sizing table for {capacity} items: {distribution:?}");

        Ok(Self::with_distribution(distribution))
    }

    fn with_distribution(distribution: CapacityDistribution) -> Self {
        Self {
            root: new_level(distribution.first),
            distribution,
        }
    }

    /// Returns the per-level capacities new tables are created with.
    #[must_use]
    pub fn distribution(&self) -> CapacityDistribution {
        self.distribution
    }

    /// Counts the tables on each level, and the stored items.
    ///
    /// This walks the first and second levels, so it is not free.
    #[must_use]
    pub fn stats(&self) -> LevelStats {
        let mut stats = LevelStats {
            second_level_tables: self.root.len(),
            ..LevelStats::default()
        };

        for level in self.root.values() {
            stats.third_level_tables += level.len();
            stats.entries += level.values().map(HashMap::len).sum::<usize>();
        }

        stats
    }

    /// Returns an iterator over all items.
    ///
    /// Tables are walked depth-first; the order of items is unspecified.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.root)
    }

    /// Returns the leaf table of the key, creating missing levels.
    fn leaf_mut(&mut self, key: LevelKey) -> &mut ThirdLevel<V> {
        let distribution = self.distribution;

        let second_level = self.root.entry(key.first).or_insert_with(|| {
            log::trace!("Creating second level table {}", key.first);
            new_level(distribution.second)
        });

        second_level.entry(key.second).or_insert_with(|| {
            log::trace!("Creating third level table {}/{}", key.first, key.second);
            new_level(distribution.third)
        })
    }
}

impl<V> AbstractTable<V> for ShardedTable<V> {
    fn try_insert(&mut self, key: i64, value: V) -> bool {
        let key = LevelKey::split(key);

        match self.leaf_mut(key).entry(key.third) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    fn insert(&mut self, key: i64, value: V) -> bool {
        let key = LevelKey::split(key);
        self.leaf_mut(key).insert(key.third, value).is_none()
    }

    fn get(&self, key: i64) -> Option<&V> {
        let key = LevelKey::split(key);

        self.root
            .get(&key.first)?
            .get(&key.second)?
            .get(&key.third)
    }

    fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        let key = LevelKey::split(key);

        self.root
            .get_mut(&key.first)?
            .get_mut(&key.second)?
            .get_mut(&key.third)
    }

    fn get_or_insert(&mut self, key: i64, value: V) -> (&mut V, bool) {
        let key = LevelKey::split(key);

        match self.leaf_mut(key).entry(key.third) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(entry) => (entry.insert(value), true),
        }
    }

    fn take(&mut self, key: i64) -> Option<V> {
        let key = LevelKey::split(key);

        let second_level = self.root.get_mut(&key.first)?;
        let third_level = second_level.get_mut(&key.second)?;
        let value = third_level.remove(&key.third)?;

        // Prune empty tables, so insert/remove churn does not leave them behind
        if third_level.is_empty() {
            second_level.remove(&key.second);
            log::trace!("Dropped third level table {}/{}", key.first, key.second);

            if second_level.is_empty() {
                self.root.remove(&key.first);
                log::trace!("Dropped second level table {}", key.first);
            }
        }

        Some(value)
    }

    fn clear(&mut self) {
        log::trace!("Clearing {} second level tables", self.root.len());
        self.root = new_level(self.distribution.first);
    }

    fn iter(&self) -> BoxedIter<'_, V> {
        Box::new(Iter::new(&self.root))
    }
}
