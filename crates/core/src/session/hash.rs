//! Stable fingerprint of the simulation state for determinism checks.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Session {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.moves);
        hasher.write_u64(self.adversary_rounds);
        hasher.write_u64(self.elapsed_ms);
        hasher.write_u32(self.lives);
        hasher.write_u8(match self.state {
            SessionState::Running => 0,
            SessionState::Won => 1,
            SessionState::Lost => 2,
        });
        hasher.write_i32(self.player.x);
        hasher.write_i32(self.player.y);
        for trap in self.traps.values() {
            hasher.write_i32(trap.pos.x);
            hasher.write_i32(trap.pos.y);
            hasher.write_u8(u8::from(trap.triggered));
        }
        for adversary in self.adversaries.values() {
            hasher.write_i32(adversary.pos.x);
            hasher.write_i32(adversary.pos.y);
        }
        hasher.finish()
    }
}
