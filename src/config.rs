// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    capacity::{CapacityCalculator, LevelCapacityCalculator},
    LargeMap, ShardedTable,
};

/// Map configuration builder
///
/// # Examples
///
/// ```
/// use large_map::{Config, LargeMap};
///
/// let mut map: LargeMap<&str> = Config::default().capacity(1_000_000).build()?;
/// map.add(1, "a")?;
/// assert_eq!(1, map.len());
/// # Ok::<(), large_map::Error>(())
/// ```
#[derive(Default)]
pub struct Config {
    /// Expected number of items, used to pre-size tables
    ///
    /// Zero means no sizing hint.
    pub capacity: i64,

    /// Calculator used to spread the capacity over the levels
    ///
    /// Defaults to [`LevelCapacityCalculator`].
    pub calculator: Option<Box<dyn CapacityCalculator>>,
}

impl Config {
    /// Initializes a new config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the expected number of items.
    ///
    /// This is only a pre-sizing hint, the map can hold more items.
    ///
    /// Defaults to 0.
    #[must_use]
    pub fn capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets a custom capacity calculator.
    #[must_use]
    pub fn calculator<C: CapacityCalculator + 'static>(mut self, calculator: C) -> Self {
        self.calculator = Some(Box::new(calculator));
        self
    }

    /// Creates a storage engine from the config.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the capacity is negative.
    pub fn build_table<V>(&self) -> crate::Result<ShardedTable<V>> {
        match &self.calculator {
            Some(calculator) => ShardedTable::with_calculator(self.capacity, calculator.as_ref()),
            None => ShardedTable::with_calculator(self.capacity, &LevelCapacityCalculator),
        }
    }

    /// Creates a map from the config.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the capacity is negative.
    pub fn build<V>(self) -> crate::Result<LargeMap<V>> {
        self.build_table().map(LargeMap::with_storage)
    }
}
