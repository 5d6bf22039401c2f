// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::key::{FIRST_LEVEL_MAX, SECOND_LEVEL_MAX, THIRD_LEVEL_MAX};
use crate::{Error, Result};

const FMAX: i64 = FIRST_LEVEL_MAX as i64;
const SMAX: i64 = SECOND_LEVEL_MAX as i64;
const TMAX: i64 = THIRD_LEVEL_MAX as i64;

/// Initial capacities of the tables on each level
///
/// This is only a pre-sizing hint to reduce rehashing while the map grows,
/// it never limits how many items can be inserted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CapacityDistribution {
    /// Capacity of the first level table, in `1..=2^21`
    pub first: u32,

    /// Capacity of each second level table, in `1..=2^21`
    pub second: u32,

    /// Capacity of each third level table, in `1..=2^22`
    pub third: u32,
}

impl Default for CapacityDistribution {
    fn default() -> Self {
        Self {
            first: 1,
            second: 1,
            third: 1,
        }
    }
}

impl CapacityDistribution {
    /// Number of items the three levels can hold together without growing.
    #[must_use]
    pub fn total(&self) -> u128 {
        u128::from(self.first) * u128::from(self.second) * u128::from(self.third)
    }
}

/// Computes how a requested capacity is spread over the three levels
///
/// The default implementation is [`LevelCapacityCalculator`]. A custom
/// implementation can be injected using [`crate::Config::calculator`].
pub trait CapacityCalculator {
    /// Computes the per-level capacities for `capacity` expected items.
    ///
    /// A capacity of zero or less yields `(1, 1, 1)`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the distribution cannot be computed.
    fn calculate(&self, capacity: i64) -> Result<CapacityDistribution>;
}

/// Fills levels from the top down, giving each level as many buckets as
/// needed so that the levels below it do not exceed their maximum size
///
/// # Examples
///
/// ```
/// use large_map::{CapacityCalculator, LevelCapacityCalculator};
///
/// let distribution = LevelCapacityCalculator.calculate(10_000_000)?;
/// assert_eq!(1, distribution.first);
/// assert_eq!(3, distribution.second);
/// assert_eq!(3_333_334, distribution.third);
/// # Ok::<(), large_map::Error>(())
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct LevelCapacityCalculator;

impl CapacityCalculator for LevelCapacityCalculator {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn calculate(&self, capacity: i64) -> Result<CapacityDistribution> {
        if capacity <= 0 {
            return Ok(CapacityDistribution::default());
        }

        let first = ceil_div(capacity, SMAX * TMAX)?.clamp(1, FMAX);
        let per_first = ceil_div(capacity, first)?;

        let second = ceil_div(per_first, TMAX)?.clamp(1, SMAX);
        let per_second = ceil_div(per_first, second)?;

        let third = per_second.clamp(1, TMAX);

        // NOTE: All values are clamped to at most 2^22, so they fit into u32
        Ok(CapacityDistribution {
            first: first as u32,
            second: second as u32,
            third: third as u32,
        })
    }
}

/// Divides, rounding up.
///
/// Returns 1 for a non-positive dividend.
pub(crate) fn ceil_div(x: i64, y: i64) -> Result<i64> {
    if y <= 0 {
        return Err(Error::InvalidArgument("divisor must be positive"));
    }

    if x <= 0 {
        return Ok(1);
    }

    // NOTE: x + y - 1 could overflow for large x
    Ok(x / y + i64::from(x % y != 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn calc(capacity: i64) -> CapacityDistribution {
        LevelCapacityCalculator
            .calculate(capacity)
            .expect("should calculate")
    }

    #[test]
    fn ceil_div_rounds_up() -> Result<()> {
        assert_eq!(1, ceil_div(1, 1)?);
        assert_eq!(2, ceil_div(3, 2)?);
        assert_eq!(2, ceil_div(4, 2)?);
        assert_eq!(1, ceil_div(1, 1_000)?);
        assert_eq!(i64::MAX, ceil_div(i64::MAX, 1)?);
        assert_eq!(1 << 20, ceil_div(i64::MAX, 1 << 43)?);
        Ok(())
    }

    #[test]
    fn ceil_div_non_positive_dividend() -> Result<()> {
        assert_eq!(1, ceil_div(0, 5)?);
        assert_eq!(1, ceil_div(-10, 5)?);
        assert_eq!(1, ceil_div(i64::MIN, 5)?);
        Ok(())
    }

    #[test]
    fn ceil_div_non_positive_divisor() {
        assert!(matches!(ceil_div(10, 0), Err(Error::InvalidArgument(_))));
        assert!(matches!(ceil_div(10, -3), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn capacity_non_positive() {
        assert_eq!(CapacityDistribution::default(), calc(0));
        assert_eq!(CapacityDistribution::default(), calc(-1));
        assert_eq!(CapacityDistribution::default(), calc(i64::MIN));
    }

    #[test]
    fn capacity_small() {
        assert_eq!(
            CapacityDistribution {
                first: 1,
                second: 1,
                third: 1
            },
            calc(1)
        );
        assert_eq!(
            CapacityDistribution {
                first: 1,
                second: 1,
                third: 1_000
            },
            calc(1_000)
        );
    }

    #[test]
    fn capacity_fills_third_level_first() {
        let d = calc(i64::from(THIRD_LEVEL_MAX));
        assert_eq!((1, 1, THIRD_LEVEL_MAX), (d.first, d.second, d.third));

        let d = calc(i64::from(THIRD_LEVEL_MAX) + 1);
        assert_eq!((1, 2), (d.first, d.second));
        assert_eq!(THIRD_LEVEL_MAX / 2 + 1, d.third);
    }

    #[test]
    fn capacity_spills_into_first_level() {
        let per_first = SMAX * TMAX;

        let d = calc(per_first);
        assert_eq!((1, SECOND_LEVEL_MAX, THIRD_LEVEL_MAX), (d.first, d.second, d.third));

        let d = calc(per_first + 1);
        assert_eq!(2, d.first);
        assert!(d.total() >= (per_first + 1) as u128);
    }

    #[test]
    fn capacity_max() {
        let d = calc(i64::MAX);
        assert_eq!(1 << 20, d.first);
        assert_eq!(SECOND_LEVEL_MAX, d.second);
        assert_eq!(THIRD_LEVEL_MAX, d.third);
        assert!(d.total() >= i64::MAX as u128);
    }
}
