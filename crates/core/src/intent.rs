//! Turns a pressed direction into the movement vector fed to `Session::move_player`.

use rand_chacha::rand_core::Rng;

use crate::rng::random_usize;
use crate::types::Direction;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MovementMode {
    #[default]
    Directional,
    /// Each press moves by an independently drawn `dx` and `dy` in `-1..=1`.
    RandomWalk,
}

impl MovementMode {
    pub fn toggle(self) -> Self {
        match self {
            MovementMode::Directional => MovementMode::RandomWalk,
            MovementMode::RandomWalk => MovementMode::Directional,
        }
    }

    pub fn is_random(self) -> bool {
        self == MovementMode::RandomWalk
    }

    /// `None` when the resolved vector is `(0, 0)`.
    pub fn resolve<R: Rng + ?Sized>(self, pressed: Direction, rng: &mut R) -> Option<(i32, i32)> {
        let (dx, dy) = match self {
            MovementMode::Directional => pressed.delta(),
            MovementMode::RandomWalk => (unit_step(rng), unit_step(rng)),
        };
        ((dx, dy) != (0, 0)).then_some((dx, dy))
    }
}

fn unit_step<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    random_usize(rng, 0, 2) as i32 - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    #[test]
    fn toggle_flips_between_modes() {
        let mode = MovementMode::default();
        assert!(!mode.is_random());
        assert!(mode.toggle().is_random());
        assert_eq!(mode.toggle().toggle(), mode);
    }

    #[test]
    fn directional_mode_follows_the_key() {
        let mut rng = seeded_rng(1);
        for direction in Direction::ALL {
            assert_eq!(
                MovementMode::Directional.resolve(direction, &mut rng),
                Some(direction.delta())
            );
        }
    }

    #[test]
    fn random_walk_stays_within_one_cell_and_reaches_diagonals() {
        let mut rng = seeded_rng(8);
        let vectors: Vec<(i32, i32)> = (0..300)
            .filter_map(|_| MovementMode::RandomWalk.resolve(Direction::Up, &mut rng))
            .collect();

        assert!(vectors.len() < 300, "zero draws resolve to no movement");
        assert!(vectors.iter().all(|&(dx, dy)| dx.abs() <= 1 && dy.abs() <= 1));
        assert!(vectors.iter().any(|&(dx, dy)| dx != 0 && dy != 0));
    }
}
