//! Deterministic per-pixel random source.
//!
//! xorshift64* (Vigna, "An experimental exploration of Marsaglia's xorshift
//! generators, scrambled", 2014). Small, fast and fully determined by its
//! seed, which is what makes renders reproducible for any thread count.

use rand::{RngCore, SeedableRng};

/// Replacement state for a zero seed; xorshift never leaves the zero state.
const ZERO_SEED_REPLACEMENT: u64 = 0xDEAD_BEEF_DEAD_BEEF;

/// Multiplicative scramble applied to every output.
const SCRAMBLE: u64 = 2_685_821_657_736_338_717;

/// 2^-53, maps the top 53 bits of an output onto [0, 1).
const INV_2_POW_53: f64 = 1.0 / (1u64 << 53) as f64;

/// xorshift64* generator.
#[derive(Debug, Clone)]
pub struct XorShift {
    state: u64,
}

impl XorShift {
    /// Create a generator. A zero seed is remapped to a fixed non-zero value.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { ZERO_SEED_REPLACEMENT } else { seed };
        Self { state }
    }

    /// Generator for the pixel with the given row-major index.
    ///
    /// Seeds are `index + 1` so pixel 0 does not hit the zero-seed remap.
    pub fn for_pixel(index: u64) -> Self {
        Self::new(index.wrapping_add(1))
    }

    /// Next full-range 64-bit output.
    #[inline]
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(SCRAMBLE)
    }

    /// Uniform real in [0, 1).
    #[inline]
    pub fn next01(&mut self) -> f64 {
        (self.next() >> 11) as f64 * INV_2_POW_53
    }

    /// Uniform real in [min, max).
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next01()
    }
}

impl RngCore for XorShift {
    fn next_u32(&mut self) -> u32 {
        // High bits of xorshift* have the best quality
        (self.next() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShift {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_known_sequence() {
        // Reference values computed by hand from the shift/multiply steps
        let mut rng = XorShift::new(1);
        let mut x: u64 = 1;
        for _ in 0..4 {
            x ^= x >> 12;
            x ^= x << 25;
            x ^= x >> 27;
            assert_eq!(rng.next(), x.wrapping_mul(SCRAMBLE));
        }
    }

    #[test]
    fn test_zero_seed_remapped() {
        let mut zero = XorShift::new(0);
        let mut remapped = XorShift::new(ZERO_SEED_REPLACEMENT);
        assert_eq!(zero.next(), remapped.next());
        assert_ne!(zero.next(), 0);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = XorShift::for_pixel(1234);
        let mut b = XorShift::for_pixel(1234);
        let mut c = XorShift::for_pixel(1235);
        let xs: Vec<u64> = (0..16).map(|_| a.next()).collect();
        let ys: Vec<u64> = (0..16).map(|_| b.next()).collect();
        let zs: Vec<u64> = (0..16).map(|_| c.next()).collect();
        assert_eq!(xs, ys);
        assert_ne!(xs, zs);
    }

    #[test]
    fn test_next01_range_and_mean() {
        let mut rng = XorShift::new(7);
        let n = 200_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let u = rng.next01();
            assert!((0.0..1.0).contains(&u));
            sum += u;
        }
        let mean = sum / n as f64;
        assert!((mean - 0.5).abs() < 0.005, "mean = {mean}");
    }

    #[test]
    fn test_next_range() {
        let mut rng = XorShift::new(99);
        for _ in 0..10_000 {
            let v = rng.next_range(-3.0, 5.0);
            assert!((-3.0..5.0).contains(&v));
        }
    }

    #[test]
    fn test_drives_rand_distributions() {
        let mut rng = XorShift::seed_from_u64(5);
        let mut reference = XorShift::new(5);
        assert_eq!(rng.next_u64(), reference.next());

        for _ in 0..1000 {
            let k: u32 = rng.gen_range(0..10);
            assert!(k < 10);
        }

        let mut bytes = [0u8; 13];
        rng.fill_bytes(&mut bytes);
        assert!(bytes.iter().any(|&b| b != 0));
    }
}
