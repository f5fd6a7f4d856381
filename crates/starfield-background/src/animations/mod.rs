//! Simulated bodies drawn by the animator.

pub mod meteor;
pub mod star;

use rand::Rng;

/// Uniform integer in `[min(a, b), max(a, b)]`, returned as a float.
pub(crate) fn random_int<R: Rng + ?Sized>(rng: &mut R, a: i64, b: i64) -> f64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    rng.gen_range(lo..=hi) as f64
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_random_int_swaps_reversed_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let v = random_int(&mut rng, 60, 10);
            assert!((10.0..=60.0).contains(&v));
            assert_eq!(v.fract(), 0.0);
        }
        assert_eq!(random_int(&mut rng, 5, 5), 5.0);
    }
}
