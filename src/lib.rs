// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! An `i64`-keyed map for very large, sparse key spaces.
//!
//! ##### About
//!
//! This crate exports a `LargeMap` that supports a subset of the `HashMap` API.
//!
//! A single hash table holding billions of items becomes unwieldy: every resize has to
//! rehash the entire table at once, which causes large latency spikes.
//! `LargeMap` instead slices every key into three parts (21, 21 and 22 bits) and uses them
//! to route the item through a three-level hierarchy of small hash tables.
//! Each table only ever holds a slice of the key space, so growing it stays cheap.
//!
//! Intermediate tables are created on first use, and dropped once their last item is removed,
//! so insert/remove churn does not leave empty tables behind.
//!
//! If the expected number of items is known up front, tables can be pre-sized
//! (see [`Config::capacity`]), which further reduces rehashing.
//!
//! The map is not thread-safe on its own; wrap it in a lock to share it between threads.
//!
//! # Example usage
//!
//! ```
//! use large_map::LargeMap;
//!
//! let mut map = LargeMap::with_capacity(1_000)?;
//!
//! map.set(1, "a");
//! map.set(-1, "b");
//! map.set(i64::MAX, "c");
//! assert_eq!(3, map.len());
//!
//! assert_eq!(Some(&"b"), map.try_get_value(-1));
//! assert_eq!(Some("c"), map.try_remove(i64::MAX));
//! assert_eq!(2, map.len());
//! #
//! # Ok::<(), large_map::Error>(())
//! ```

#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]
#![warn(clippy::redundant_feature_names)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[doc(hidden)]
pub type HashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;

mod r#abstract;
mod capacity;

/// Configuration
pub mod config;

mod error;
mod key;
mod map;
mod table;

pub use {
    capacity::{CapacityCalculator, CapacityDistribution, LevelCapacityCalculator},
    config::Config,
    error::{Error, Result},
    key::{
        LevelKey, FIRST_LEVEL_BITS, FIRST_LEVEL_MAX, SECOND_LEVEL_BITS, SECOND_LEVEL_MAX,
        THIRD_LEVEL_BITS, THIRD_LEVEL_MAX,
    },
    map::LargeMap,
    r#abstract::{AbstractTable, BoxedIter},
    table::{Iter, LevelStats, ShardedTable},
};
