// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{FirstLevel, SecondLevel, ThirdLevel};
use crate::LevelKey;
use std::{collections::hash_map, iter::FusedIterator};

/// Iterator over the items of a [`super::ShardedTable`]
///
/// Walks each second level table, and each of its third level tables,
/// to completion before moving on. Keys are reassembled from the bucket path.
pub struct Iter<'a, V> {
    first_level: hash_map::Iter<'a, u32, SecondLevel<V>>,
    second_level: Option<(u32, hash_map::Iter<'a, u32, ThirdLevel<V>>)>,
    third_level: Option<(u32, u32, hash_map::Iter<'a, u32, V>)>,
}

impl<'a, V> Iter<'a, V> {
    pub(super) fn new(root: &'a FirstLevel<V>) -> Self {
        Self {
            first_level: root.iter(),
            second_level: None,
            third_level: None,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((first, second, leaf)) = &mut self.third_level {
                if let Some((&third, value)) = leaf.next() {
                    let key = LevelKey {
                        first: *first,
                        second: *second,
                        third,
                    };
                    return Some((key.join(), value));
                }

                self.third_level = None;
            }

            if let Some((first, level)) = &mut self.second_level {
                if let Some((&second, leaf)) = level.next() {
                    self.third_level = Some((*first, second, leaf.iter()));
                    continue;
                }

                self.second_level = None;
            }

            let (&first, level) = self.first_level.next()?;
            self.second_level = Some((first, level.iter()));
        }
    }
}

impl<V> FusedIterator for Iter<'_, V> {}
