//! One play-through of a generated board: lives, clock, win/loss and the event log.
//!
//! A `Session` owns its grid and entities outright. Mutation goes through `move_player`,
//! `tick` and `advance_adversaries`, each of which rejects calls once the session has ended.

use slotmap::SlotMap;

use crate::grid::Grid;
use crate::mapgen::{BoardGenerator, GeneratedBoard};
use crate::rng::{GameRng, seeded_rng};
use crate::tiers::{Difficulty, TierConfig, TierConfigError};
use crate::types::{
    AdversaryId, EndReport, GameError, MoveOutcome, Pos, RunOutcome, SessionEvent, SessionState,
    TrapId,
};

mod adversaries;
mod hash;
mod movement;
mod snapshot;

#[cfg(test)]
mod test_support;

pub use snapshot::{BoardSnapshot, TrapView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trap {
    pub pos: Pos,
    /// Set on first contact; a triggered trap never damages again.
    pub triggered: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adversary {
    pub pos: Pos,
}

pub struct Session {
    seed: u64,
    difficulty: Difficulty,
    config: TierConfig,
    grid: Grid,
    player: Pos,
    goal: Pos,
    traps: SlotMap<TrapId, Trap>,
    adversaries: SlotMap<AdversaryId, Adversary>,
    lives: u32,
    elapsed_ms: u64,
    state: SessionState,
    rng: GameRng,
    log: Vec<SessionEvent>,
    moves: u64,
    adversary_rounds: u64,
}

impl Session {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self::generate(difficulty, difficulty.config(), seed)
    }

    /// Generates a board from `config`; the same random stream then drives the adversaries.
    pub fn with_tier(
        difficulty: Difficulty,
        config: TierConfig,
        seed: u64,
    ) -> Result<Self, TierConfigError> {
        config.validate()?;
        Ok(Self::generate(difficulty, config, seed))
    }

    fn generate(difficulty: Difficulty, config: TierConfig, seed: u64) -> Self {
        let mut rng = seeded_rng(seed);
        let board = BoardGenerator::new(config).generate(&mut rng);
        Self::assemble(difficulty, config, board, seed, rng)
    }

    /// Starts a session on an already built board, seeding the adversary policy from `seed`.
    pub fn from_board(
        difficulty: Difficulty,
        config: TierConfig,
        board: GeneratedBoard,
        seed: u64,
    ) -> Self {
        Self::assemble(difficulty, config, board, seed, seeded_rng(seed))
    }

    fn assemble(
        difficulty: Difficulty,
        config: TierConfig,
        board: GeneratedBoard,
        seed: u64,
        rng: GameRng,
    ) -> Self {
        debug_assert!(board.grid.is_open(board.entry), "entry {:?} is walled", board.entry);
        debug_assert!(board.grid.is_open(board.exit), "exit {:?} is walled", board.exit);

        let mut traps = SlotMap::with_key();
        for pos in board.traps {
            debug_assert!(board.grid.is_open(pos), "trap {pos:?} is walled");
            traps.insert(Trap { pos, triggered: false });
        }
        let mut adversaries = SlotMap::with_key();
        for pos in board.adversaries {
            debug_assert!(board.grid.is_open(pos), "adversary {pos:?} is walled");
            adversaries.insert(Adversary { pos });
        }

        Self {
            seed,
            difficulty,
            config,
            grid: board.grid,
            player: board.entry,
            goal: board.exit,
            traps,
            adversaries,
            lives: config.lives,
            elapsed_ms: 0,
            state: SessionState::Running,
            rng,
            log: Vec::new(),
            moves: 0,
            adversary_rounds: 0,
        }
    }

    /// Records the wall-clock time since the session started and applies the time limit.
    pub fn tick(&mut self, elapsed_ms: u64) -> Result<SessionState, GameError> {
        self.ensure_running()?;
        self.elapsed_ms = self.elapsed_ms.max(elapsed_ms);

        let time_limit_ms = self.config.time_limit_ms;
        if self.config.has_time_limit() && self.elapsed_ms > time_limit_ms {
            self.log.push(SessionEvent::TimeExpired { elapsed_ms: self.elapsed_ms, time_limit_ms });
            self.finish(SessionState::Lost);
        }

        Ok(self.state)
    }

    pub fn end_report(&self) -> Option<EndReport> {
        let outcome = match self.state {
            SessionState::Running => return None,
            SessionState::Won => RunOutcome::Win,
            SessionState::Lost => RunOutcome::Loss,
        };
        Some(EndReport { outcome, elapsed_ms: self.elapsed_ms, difficulty: self.difficulty })
    }

    /// Time left before the limit expires, or `None` when the tier has no limit.
    pub fn remaining_ms(&self) -> Option<u64> {
        self.config
            .has_time_limit()
            .then(|| self.config.time_limit_ms.saturating_sub(self.elapsed_ms))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &TierConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn log(&self) -> &[SessionEvent] {
        &self.log
    }

    pub fn traps(&self) -> impl Iterator<Item = (TrapId, &Trap)> {
        self.traps.iter()
    }

    pub fn adversaries(&self) -> impl Iterator<Item = (AdversaryId, &Adversary)> {
        self.adversaries.iter()
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.state.is_terminal() {
            return Err(GameError::InvalidTransition { state: self.state });
        }
        Ok(())
    }

    fn finish(&mut self, state: SessionState) {
        debug_assert!(state.is_terminal());
        self.state = state;
        tracing::info!(
            ?state,
            difficulty = %self.difficulty,
            elapsed_ms = self.elapsed_ms,
            lives = self.lives,
            moves = self.moves,
            "session ended"
        );
    }

    fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }
}
