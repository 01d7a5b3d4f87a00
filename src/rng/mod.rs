//! Deterministic pseudo-random engine and bounded distributions
//!
//! The engine is xoroshiro128+ (Blackman & Vigna), seeded through SplitMix64 so
//! that a single `u64` seed expands into a well-mixed 128-bit state. It
//! implements [`rand::RngCore`], so every algorithm in this crate is generic
//! over the engine and can just as well be driven by any other `RngCore`.

mod distributions;

pub use distributions::{Coin, IntDomain, IntRange, RealDomain, RealRange};

use rand::{RngCore, SeedableRng};

const JUMP: [u64; 2] = [0xDF90_0294_D8F5_54A5, 0x1708_65DF_4B32_01FC];
const LONG_JUMP: [u64; 2] = [0xD2A9_8B26_625E_EE7B, 0xDDDF_9B10_90AA_7AC1];

/// SplitMix64 finalizer used to expand a seed into engine state
#[inline]
pub fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// 128-bit xoroshiro128+ generator
///
/// Two engines built from the same seed produce identical streams.
///
/// # Example
///
/// ```
/// use voronoi_regions::Xoroshiro128Plus;
///
/// let mut a = Xoroshiro128Plus::new(42);
/// let mut b = Xoroshiro128Plus::new(42);
/// assert_eq!(a.next(), b.next());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xoroshiro128Plus {
    state: [u64; 2],
}

impl Xoroshiro128Plus {
    /// Create an engine from a 64-bit seed
    pub fn new(seed: u64) -> Self {
        Self {
            state: [splitmix64(seed), splitmix64(seed.wrapping_add(1))],
        }
    }

    /// Advance the state and return the next 64-bit output
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Advance the state as if 2^64 outputs had been drawn
    pub fn jump(&mut self) {
        self.apply_jump(&JUMP);
    }

    /// Advance the state as if 2^96 outputs had been drawn
    pub fn long_jump(&mut self) {
        self.apply_jump(&LONG_JUMP);
    }

    /// Return a copy positioned 2^64 draws ahead and move `self` past it
    ///
    /// Repeated calls hand out non-overlapping streams, one per worker.
    pub fn split(&mut self) -> Self {
        self.jump();
        self.clone()
    }

    /// Like [`split`](Self::split), but spaced 2^96 draws apart
    pub fn long_split(&mut self) -> Self {
        self.long_jump();
        self.clone()
    }

    /// Raw engine state, mostly useful for debugging and tests
    pub fn state(&self) -> [u64; 2] {
        self.state
    }

    fn apply_jump(&mut self, table: &[u64; 2]) {
        let mut s0 = 0u64;
        let mut s1 = 0u64;
        for &word in table {
            for bit in 0..64 {
                if word & (1u64 << bit) != 0 {
                    s0 ^= self.state[0];
                    s1 ^= self.state[1];
                }
                self.next();
            }
        }
        self.state = [s0, s1];
    }
}

impl RngCore for Xoroshiro128Plus {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xoroshiro128Plus {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&seed[..8]);
        hi.copy_from_slice(&seed[8..]);
        let state = [u64::from_le_bytes(lo), u64::from_le_bytes(hi)];

        // An all-zero state is a fixed point of the recurrence
        if state == [0, 0] {
            return Self::new(0);
        }
        Self { state }
    }

    fn seed_from_u64(seed: u64) -> Self {
        Self::new(seed)
    }
}
