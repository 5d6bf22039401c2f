// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Number of key bits addressing the first (coarsest) level
pub const FIRST_LEVEL_BITS: u32 = 21;

/// Number of key bits addressing the second level
pub const SECOND_LEVEL_BITS: u32 = 21;

/// Number of key bits addressing the third (leaf) level
pub const THIRD_LEVEL_BITS: u32 = 22;

/// Maximum number of buckets in a first level table
pub const FIRST_LEVEL_MAX: u32 = 1 << FIRST_LEVEL_BITS;

/// Maximum number of buckets in a second level table
pub const SECOND_LEVEL_MAX: u32 = 1 << SECOND_LEVEL_BITS;

/// Maximum number of entries in a third level table
pub const THIRD_LEVEL_MAX: u32 = 1 << THIRD_LEVEL_BITS;

const FIRST_LEVEL_MASK: i64 = (1 << FIRST_LEVEL_BITS) - 1;
const SECOND_LEVEL_MASK: i64 = (1 << SECOND_LEVEL_BITS) - 1;
const THIRD_LEVEL_MASK: i64 = (1 << THIRD_LEVEL_BITS) - 1;

const SECOND_LEVEL_SHIFT: u32 = THIRD_LEVEL_BITS;
const FIRST_LEVEL_SHIFT: u32 = THIRD_LEVEL_BITS + SECOND_LEVEL_BITS;

/// Address of a key inside the three-level hierarchy
///
/// A 64-bit key is sliced into three unsigned sub-keys:
///
/// ```text
///  63          43 42          22 21           0
/// +--------------+--------------+--------------+
/// |  first (21)  | second (21)  |  third (22)  |
/// +--------------+--------------+--------------+
/// ```
///
/// Negative keys are not treated specially: they alias into the same
/// bucket space through their two's complement representation.
///
/// # Examples
///
/// ```
/// use large_map::LevelKey;
///
/// let address = LevelKey::split(-1);
/// assert_eq!((0x1F_FFFF, 0x1F_FFFF, 0x3F_FFFF), (address.first, address.second, address.third));
/// assert_eq!(-1, address.join());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelKey {
    /// Bits 63..43 of the key
    pub first: u32,

    /// Bits 42..22 of the key
    pub second: u32,

    /// Bits 21..0 of the key
    pub third: u32,
}

impl LevelKey {
    /// Splits a key into its per-level sub-keys.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn split(key: i64) -> Self {
        // NOTE: Each part is masked to at most 22 bits, so it is non-negative and fits a u32
        Self {
            first: ((key >> FIRST_LEVEL_SHIFT) & FIRST_LEVEL_MASK) as u32,
            second: ((key >> SECOND_LEVEL_SHIFT) & SECOND_LEVEL_MASK) as u32,
            third: (key & THIRD_LEVEL_MASK) as u32,
        }
    }

    /// Reassembles the original key, inverse of [`LevelKey::split`].
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn join(self) -> i64 {
        let bits = ((self.first as u64) << FIRST_LEVEL_SHIFT)
            | ((self.second as u64) << SECOND_LEVEL_SHIFT)
            | (self.third as u64);

        bits as i64
    }
}

impl From<i64> for LevelKey {
    fn from(key: i64) -> Self {
        Self::split(key)
    }
}

impl From<LevelKey> for i64 {
    fn from(key: LevelKey) -> Self {
        key.join()
    }
}
