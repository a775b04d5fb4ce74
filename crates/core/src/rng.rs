//! Seedable random source shared by generation, placement and the adversary policy.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub type GameRng = ChaCha8Rng;

pub fn seeded_rng(seed: u64) -> GameRng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub(crate) fn random_usize<R: Rng + ?Sized>(
    rng: &mut R,
    min_value: usize,
    max_value: usize,
) -> usize {
    debug_assert!(min_value <= max_value);
    let range_size = (max_value - min_value + 1) as u64;
    min_value + (rng.next_u64() % range_size) as usize
}

/// True with probability `1 / n`.
pub(crate) fn one_in<R: Rng + ?Sized>(rng: &mut R, n: u64) -> bool {
    debug_assert!(n > 0);
    rng.next_u64() % n == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_usize_stays_inside_requested_bounds() {
        let mut rng = seeded_rng(12_345);
        for _ in 0..500 {
            let value = random_usize(&mut rng, 7, 13);
            assert!((7..=13).contains(&value));
        }
    }

    #[test]
    fn random_usize_reaches_both_ends_of_a_small_range() {
        let mut rng = seeded_rng(7);
        let rolls: Vec<usize> = (0..200).map(|_| random_usize(&mut rng, 0, 2)).collect();
        assert!(rolls.contains(&0));
        assert!(rolls.contains(&2));
    }

    #[test]
    fn same_seed_replays_the_same_stream() {
        let mut left = seeded_rng(99);
        let mut right = seeded_rng(99);
        for _ in 0..32 {
            assert_eq!(random_usize(&mut left, 0, 1000), random_usize(&mut right, 0, 1000));
        }
    }

    #[test]
    fn one_in_one_always_fires() {
        let mut rng = seeded_rng(3);
        assert!((0..50).all(|_| one_in(&mut rng, 1)));
    }
}
