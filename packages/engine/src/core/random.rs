/// Random number generator (xorshift32)
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Seeded generator for body placement and sizing
#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        // xorshift never leaves zero
        Self { state: if seed == 0 { 0x9E37_79B9 } else { seed } }
    }

    /// Uniform in `[0, 1)`
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (xorshift32(&mut self.state) >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform in `[low, high)`
    #[inline]
    pub fn range(&mut self, low: f32, high: f32) -> f32 {
        low + self.next_f32() * (high - low)
    }

    /// Uniform in `(-range/2, range/2]`
    #[inline]
    pub fn spread(&mut self, range: f32) -> f32 {
        range * (0.5 - self.next_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn range_and_spread_stay_in_bounds() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let r = rng.range(0.4, 0.8);
            assert!((0.4..=0.8).contains(&r));
            let s = rng.spread(10.0);
            assert!((-5.0..=5.0).contains(&s));
        }
    }

    #[test]
    fn zero_seed_does_not_stall() {
        let mut rng = Rng::new(0);
        let first = rng.next_f32();
        let second = rng.next_f32();
        assert_ne!(first, second);
    }
}
