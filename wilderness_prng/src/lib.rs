// Seedable pseudo-random number generator for the wilderness simulation.
//
// xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64 seeding. Terrain
// draws, exit placement and the CLI's random-walk bot all pull from a
// `GameRng`, so a map is fully reproduced by its seed. Tests rely on this to
// pin down map contents without mocking.
//
// **Critical constraint: determinism.** Every method must produce identical
// output given the same prior state on every platform. No floating point in
// the core generator, no OS entropy.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ PRNG. Each map generation or bot run owns its own instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRng {
    s: [u64; 4],
}

impl GameRng {
    /// Create a generator whose 256-bit state is expanded from `seed` via
    /// SplitMix64. Equal seeds give equal streams.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Uniform integer in `[low, high)`, rejection-sampled to avoid modulo
    /// bias. Panics if `low >= high`.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: low must be less than high");
        let range = high - low;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1));
        }
        let threshold = range.wrapping_neg() % range;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range);
            }
        }
    }

    /// Uniform `usize` in `[low, high)`. Panics if `low >= high`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }

    /// Uniform `usize` in `[low, high]`. Panics if `low > high`.
    pub fn range_usize_inclusive(&mut self, low: usize, high: usize) -> usize {
        assert!(low <= high, "range_usize_inclusive: low must be <= high");
        self.range_u64(low as u64, high as u64 + 1) as usize
    }
}

/// SplitMix64 step, used only to expand a `u64` seed into xoshiro state.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(8);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn range_usize_stays_in_half_open_range() {
        let mut rng = GameRng::new(31);
        for _ in 0..10_000 {
            let v = rng.range_usize(3, 17);
            assert!((3..17).contains(&v), "range_usize out of range: {v}");
        }
    }

    #[test]
    fn range_usize_inclusive_reaches_both_ends() {
        let mut rng = GameRng::new(5);
        let mut seen = [false; 4];
        for _ in 0..10_000 {
            let v = rng.range_usize_inclusive(15, 18);
            assert!((15..=18).contains(&v), "inclusive range out of range: {v}");
            seen[v - 15] = true;
        }
        assert!(seen.iter().all(|s| *s), "every value should be drawn: {seen:?}");
    }

    #[test]
    fn range_usize_inclusive_single_value() {
        let mut rng = GameRng::new(5);
        for _ in 0..100 {
            assert_eq!(rng.range_usize_inclusive(3, 3), 3);
        }
    }

    #[test]
    fn serialized_state_continues_stream() {
        let mut rng = GameRng::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: GameRng = serde_json::from_str(&json).unwrap();
        for _ in 0..50 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }
}
