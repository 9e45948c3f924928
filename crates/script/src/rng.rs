/// Seeded generator for scripted randomness (scales, palette picks).
///
/// Given the same seed and the same sequence of calls, the output is
/// identical on every platform.
#[derive(Debug, Clone)]
pub struct ScriptRng {
    state: u64,
}

impl ScriptRng {
    pub fn with_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        splitmix64(self.state)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform in `[min, max]`. The upper bound can be hit through rounding.
    pub fn uniform(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Pick one element uniformly, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = (self.next_u64() % items.len() as u64) as usize;
        items.get(idx)
    }
}

/// Splitmix64 output mix.
fn splitmix64(state: u64) -> u64 {
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ScriptRng::with_seed(42);
        let mut b = ScriptRng::with_seed(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = ScriptRng::with_seed(1);
        let mut b = ScriptRng::with_seed(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn unit_floats_in_range() {
        let mut rng = ScriptRng::with_seed(7);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v), "{v} outside [0, 1)");
        }
    }

    #[test]
    fn uniform_respects_bounds() {
        let mut rng = ScriptRng::with_seed(9);
        for _ in 0..1_000 {
            let v = rng.uniform(0.5, 1.5);
            assert!((0.5..=1.5).contains(&v));
        }
        assert_eq!(rng.uniform(2.0, 2.0), 2.0);
    }

    #[test]
    fn choose_covers_all_items() {
        let mut rng = ScriptRng::with_seed(3);
        let items = ["a", "b", "c"];
        let mut seen = [false; 3];
        for _ in 0..200 {
            let pick = rng.choose(&items).unwrap();
            let idx = items.iter().position(|i| i == pick).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = ScriptRng::with_seed(0);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
