//! Adversary movement: occasional pursuit of the player, otherwise a random wander.
//! Adversaries move one at a time in slot order, each seeing the moves already committed
//! this round. A step is only committed into an open, unoccupied cell.

use rand_chacha::rand_core::Rng;

use super::*;
use crate::rng::{one_in, random_usize};
use crate::types::Direction;

/// One adversary step in three chases the player.
const PURSUIT_ODDS: u64 = 3;

impl Session {
    pub fn advance_adversaries(&mut self) -> Result<(), GameError> {
        self.ensure_running()?;

        let ids: Vec<AdversaryId> = self.adversaries.keys().collect();
        for id in ids {
            let from = self.adversaries[id].pos;
            let Some(next) = propose_step(from, self.player, &mut self.rng) else {
                continue;
            };
            if self.can_enter(id, next) {
                self.adversaries[id].pos = next;
            }
        }
        self.adversary_rounds += 1;

        Ok(())
    }

    fn can_enter(&self, mover: AdversaryId, pos: Pos) -> bool {
        !self.grid.is_wall(pos)
            && !self.adversaries.iter().any(|(id, other)| id != mover && other.pos == pos)
    }
}

pub(super) fn propose_step<R: Rng + ?Sized>(from: Pos, player: Pos, rng: &mut R) -> Option<Pos> {
    if one_in(rng, PURSUIT_ODDS) {
        return pursuit_step(from, player);
    }
    let (dx, dy) = Direction::ALL[random_usize(rng, 0, Direction::ALL.len() - 1)].delta();
    Some(from.offset(dx, dy))
}

/// Steps along the axis with the larger distance to the player; ties move vertically.
pub(super) fn pursuit_step(from: Pos, player: Pos) -> Option<Pos> {
    let dx = player.x - from.x;
    let dy = player.y - from.y;
    if dx == 0 && dy == 0 {
        return None;
    }
    if dy.abs() >= dx.abs() {
        Some(from.offset(0, dy.signum()))
    } else {
        Some(from.offset(dx.signum(), 0))
    }
}
