//! Bounded distributions over any [`RngCore`] engine
//!
//! An adaptor holds only its range and a cached span. The engine is passed in
//! on every draw, so one adaptor can be used with any number of engines.

use std::fmt::Debug;

use rand::distributions::Distribution;
use rand::{Rng, RngCore};

use crate::error::{MapError, Result};

/// Integer types usable with [`IntRange`]
pub trait IntDomain: Copy + PartialOrd + Debug {
    fn to_i128(self) -> i128;
    fn from_i128(value: i128) -> Self;
}

macro_rules! impl_int_domain {
    ($($t:ty),*) => {
        $(
            impl IntDomain for $t {
                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_i128(value: i128) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_int_domain!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Floating point types usable with [`RealRange`]
pub trait RealDomain: Copy + PartialOrd + Debug {
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

impl RealDomain for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl RealDomain for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}

/// Uniform integers in `[min, max)`
///
/// Draws are `min + next_u64() % (max - min)`. An empty range would make the
/// modulus zero, so construction rejects `max <= min`.
///
/// # Example
///
/// ```
/// use voronoi_regions::{IntRange, Xoroshiro128Plus};
///
/// let mut engine = Xoroshiro128Plus::new(1);
/// let dice = IntRange::new(1u8, 7).unwrap();
/// let roll = dice.draw(&mut engine);
/// assert!((1..7).contains(&roll));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntRange<T> {
    min: T,
    max: T,
    span: u64,
}

impl<T: IntDomain> IntRange<T> {
    /// Create a range over `[min, max)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if `max <= min`
    pub fn new(min: T, max: T) -> Result<Self> {
        let span = Self::span_of(min, max)?;
        Ok(Self { min, max, span })
    }

    /// Draw one value from `engine`
    #[inline]
    pub fn draw<R: RngCore + ?Sized>(&self, engine: &mut R) -> T {
        let offset = engine.next_u64() % self.span;
        T::from_i128(self.min.to_i128() + offset as i128)
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    /// Set the lower bound, recomputing the span
    pub fn set_min(&mut self, min: T) -> Result<()> {
        self.set_range(min, self.max)
    }

    /// Set the upper bound, recomputing the span
    pub fn set_max(&mut self, max: T) -> Result<()> {
        self.set_range(self.min, max)
    }

    /// Replace both bounds at once
    ///
    /// On error the previous range is kept.
    pub fn set_range(&mut self, min: T, max: T) -> Result<()> {
        self.span = Self::span_of(min, max)?;
        self.min = min;
        self.max = max;
        Ok(())
    }

    fn span_of(min: T, max: T) -> Result<u64> {
        if max <= min {
            return Err(MapError::InvalidRange(format!(
                "integer range needs min < max (got [{:?}, {:?}))",
                min, max
            )));
        }
        Ok((max.to_i128() - min.to_i128()) as u64)
    }
}

impl<T: IntDomain> Distribution<T> for IntRange<T> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.draw(rng)
    }
}

/// Approximately uniform reals in `[min, max]`
///
/// Draws are `min + (next_u64() / u64::MAX) * (max - min)`, so both bounds
/// are reachable up to rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealRange<T> {
    min: T,
    max: T,
    span: f64,
}

impl<T: RealDomain> RealRange<T> {
    /// Create a range over `[min, max]`
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if `min > max` or either bound is not finite
    pub fn new(min: T, max: T) -> Result<Self> {
        let span = Self::span_of(min, max)?;
        Ok(Self { min, max, span })
    }

    /// The unit interval `[0, 1]`
    pub fn unit() -> Self {
        Self {
            min: T::from_f64(0.0),
            max: T::from_f64(1.0),
            span: 1.0,
        }
    }

    /// Draw one value from `engine`
    #[inline]
    pub fn draw<R: RngCore + ?Sized>(&self, engine: &mut R) -> T {
        let unit = engine.next_u64() as f64 / u64::MAX as f64;
        T::from_f64(self.min.to_f64() + unit * self.span)
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    /// Set the lower bound, recomputing the span
    pub fn set_min(&mut self, min: T) -> Result<()> {
        self.set_range(min, self.max)
    }

    /// Set the upper bound, recomputing the span
    pub fn set_max(&mut self, max: T) -> Result<()> {
        self.set_range(self.min, max)
    }

    /// Replace both bounds at once
    ///
    /// On error the previous range is kept.
    pub fn set_range(&mut self, min: T, max: T) -> Result<()> {
        self.span = Self::span_of(min, max)?;
        self.min = min;
        self.max = max;
        Ok(())
    }

    fn span_of(min: T, max: T) -> Result<f64> {
        let (lo, hi) = (min.to_f64(), max.to_f64());
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(MapError::InvalidRange(format!(
                "real range needs finite min <= max (got [{:?}, {:?}])",
                min, max
            )));
        }
        Ok(hi - lo)
    }
}

impl<T: RealDomain> Distribution<T> for RealRange<T> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.draw(rng)
    }
}

/// Fair coin flip from the top bit of the engine output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coin;

impl Coin {
    #[inline]
    pub fn draw<R: RngCore + ?Sized>(&self, engine: &mut R) -> bool {
        engine.next_u64() & (1u64 << 63) != 0
    }
}

impl Distribution<bool> for Coin {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        self.draw(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Xoroshiro128Plus;
    use proptest::prelude::*;

    /// Replays a fixed list of outputs
    struct Scripted(Vec<u64>, usize);

    impl RngCore for Scripted {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_int_range_formula() {
        let range = IntRange::new(10i32, 15).unwrap();
        let mut engine = Scripted(vec![0, 4, 5, 17], 0);
        let draws: Vec<i32> = (0..4).map(|_| range.draw(&mut engine)).collect();
        assert_eq!(draws, vec![10, 14, 10, 12]);
    }

    #[test]
    fn test_int_range_rejects_empty_and_inverted() {
        assert!(IntRange::new(3u32, 3).is_err());
        assert!(IntRange::new(4u32, 3).is_err());
    }

    #[test]
    fn test_int_range_signed_bounds() {
        let range = IntRange::new(-6i32, 9).unwrap();
        let mut engine = Xoroshiro128Plus::new(0xDEFEC8);
        for _ in 0..1_000 {
            let n = range.draw(&mut engine);
            assert!((-6..9).contains(&n));
        }
    }

    #[test]
    fn test_int_range_full_u64_domain() {
        let range = IntRange::new(0u64, u64::MAX).unwrap();
        let mut engine = Scripted(vec![u64::MAX - 1], 0);
        assert_eq!(range.draw(&mut engine), u64::MAX - 1);
    }

    #[test]
    fn test_setters_recompute_span() {
        let mut range = IntRange::new(0u32, 10).unwrap();
        range.set_max(3).unwrap();
        let mut engine = Scripted(vec![7], 0);
        assert_eq!(range.draw(&mut engine), 1);

        range.set_min(2).unwrap();
        assert_eq!(range.draw(&mut engine), 2);
        assert_eq!((range.min(), range.max()), (2, 3));
    }

    #[test]
    fn test_failed_setter_keeps_previous_range() {
        let mut range = IntRange::new(0u32, 10).unwrap();
        assert!(range.set_min(10).is_err());
        assert_eq!((range.min(), range.max()), (0, 10));
    }

    #[test]
    fn test_real_range_endpoints() {
        let range = RealRange::new(2.0f64, 4.0).unwrap();
        let mut engine = Scripted(vec![0, u64::MAX], 0);
        assert_eq!(range.draw(&mut engine), 2.0);
        assert!((range.draw(&mut engine) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_real_range_degenerate_is_allowed() {
        let range = RealRange::new(1.0f32, 1.0).unwrap();
        let mut engine = Xoroshiro128Plus::new(8);
        assert_eq!(range.draw(&mut engine), 1.0);
    }

    #[test]
    fn test_real_range_rejects_bad_bounds() {
        assert!(RealRange::new(1.0f32, 0.0).is_err());
        assert!(RealRange::new(f32::NAN, 1.0).is_err());
        assert!(RealRange::new(0.0f64, f64::INFINITY).is_err());
    }

    #[test]
    fn test_real_setter_recomputes_span() {
        let mut range = RealRange::new(0.0f64, 1.0).unwrap();
        range.set_max(10.0).unwrap();
        let mut engine = Scripted(vec![u64::MAX], 0);
        assert!((range.draw(&mut engine) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_coin_reads_top_bit() {
        let mut engine = Scripted(vec![1 << 63, (1 << 63) - 1], 0);
        assert!(Coin.draw(&mut engine));
        assert!(!Coin.draw(&mut engine));
    }

    #[test]
    fn test_coin_is_roughly_fair() {
        let mut engine = Xoroshiro128Plus::new(2024);
        let heads = (0..10_000).filter(|_| Coin.draw(&mut engine)).count();
        assert!((4_500..5_500).contains(&heads), "heads = {}", heads);
    }

    #[test]
    fn test_adaptor_rebinds_between_engines() {
        let range = IntRange::new(0usize, 100).unwrap();
        let mut a = Xoroshiro128Plus::new(1);
        let mut b = Xoroshiro128Plus::new(1);
        let mut c = Xoroshiro128Plus::new(1);
        let interleaved = [range.draw(&mut a), range.draw(&mut b), range.draw(&mut a)];
        let reference = [range.draw(&mut c), interleaved[1], range.draw(&mut c)];
        assert_eq!(interleaved[0], reference[0]);
        assert_eq!(interleaved[2], reference[2]);
    }

    #[test]
    fn test_distribution_trait_matches_draw() {
        let range = RealRange::new(-1.0f32, 1.0).unwrap();
        let mut a = Xoroshiro128Plus::new(6);
        let mut b = Xoroshiro128Plus::new(6);
        let via_trait: f32 = range.sample(&mut a);
        assert_eq!(via_trait, range.draw(&mut b));
    }

    proptest! {
        #[test]
        fn int_draws_stay_in_range(seed in any::<u64>(), min in -1_000i64..1_000, width in 1i64..5_000) {
            let range = IntRange::new(min, min + width).unwrap();
            let mut engine = Xoroshiro128Plus::new(seed);
            for _ in 0..64 {
                let n = range.draw(&mut engine);
                prop_assert!(n >= min && n < min + width);
            }
        }

        #[test]
        fn real_draws_stay_in_range(seed in any::<u64>(), min in -1.0e3f64..1.0e3, width in 0.0f64..1.0e3) {
            let range = RealRange::new(min, min + width).unwrap();
            let mut engine = Xoroshiro128Plus::new(seed);
            for _ in 0..64 {
                let x = range.draw(&mut engine);
                prop_assert!(x >= min - 1e-9 && x <= min + width + 1e-9);
            }
        }
    }
}
