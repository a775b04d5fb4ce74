//! Player movement and the collisions it resolves.

use super::*;

impl Session {
    /// Moves the player by one cell. `dx` and `dy` must each be in `-1..=1`; diagonal steps
    /// are allowed. A step into a wall or off the board, or a zero or oversized step, leaves
    /// the session untouched and reports `moved = false`.
    pub fn move_player(&mut self, dx: i32, dy: i32) -> Result<MoveOutcome, GameError> {
        self.ensure_running()?;

        let is_step = (dx, dy) != (0, 0) && dx.abs() <= 1 && dy.abs() <= 1;
        let destination = self.player.offset(dx, dy);
        if !is_step || self.grid.is_wall(destination) {
            return Ok(self.move_outcome(false, self.log.len()));
        }

        let first_event = self.log.len();
        self.player = destination;
        self.moves += 1;

        if destination == self.goal {
            self.log.push(SessionEvent::GoalReached { pos: destination });
            self.finish(SessionState::Won);
            return Ok(self.move_outcome(true, first_event));
        }

        self.spring_trap_at(destination);
        if !self.state.is_terminal() {
            self.resolve_adversary_contact();
        }

        Ok(self.move_outcome(true, first_event))
    }

    fn spring_trap_at(&mut self, pos: Pos) {
        let Some((trap, entry)) =
            self.traps.iter_mut().find(|(_, trap)| trap.pos == pos && !trap.triggered)
        else {
            return;
        };
        entry.triggered = true;

        let lives_left = self.lose_life();
        self.log.push(SessionEvent::TrapTriggered { trap, pos, lives_left });
        if lives_left == 0 {
            self.log.push(SessionEvent::LivesExhausted);
            self.finish(SessionState::Lost);
        }
    }

    /// Every adversary within one cell, diagonals included, costs a life.
    fn resolve_adversary_contact(&mut self) {
        let touching: Vec<(AdversaryId, Pos)> = self
            .adversaries
            .iter()
            .filter(|(_, adversary)| adversary.pos.chebyshev(self.player) <= 1)
            .map(|(id, adversary)| (id, adversary.pos))
            .collect();

        for (adversary, pos) in touching {
            let lives_left = self.lose_life();
            self.log.push(SessionEvent::AdversaryContact { adversary, pos, lives_left });
            if lives_left == 0 {
                self.log.push(SessionEvent::LivesExhausted);
                self.finish(SessionState::Lost);
                return;
            }
        }
    }

    fn move_outcome(&self, moved: bool, first_event: usize) -> MoveOutcome {
        MoveOutcome {
            moved,
            player: self.player,
            lives: self.lives,
            state: self.state,
            events: self.log[first_event..].to_vec(),
        }
    }
}
