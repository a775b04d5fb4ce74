use std::collections::HashSet;

use anyhow::{Result, bail};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use treasure_core::pathfinding::has_path;
use treasure_core::{Difficulty, Direction, MovementMode, Pos, Session, SessionState};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of sessions to play, each on a seed derived from `--seed`
    #[arg(short, long, default_value_t = 100)]
    runs: u32,
    /// Upper bound on player inputs per session
    #[arg(short, long, default_value_t = 1000)]
    steps: u32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        "Fuzzing {} sessions from seed {} (max {} steps)...",
        args.runs, args.seed, args.steps
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut outcomes = [0_u32; 3];

    for _ in 0..args.runs {
        let seed = rng.next_u64();
        let difficulty = choose(&mut rng, &Difficulty::ALL);
        let state = play(seed, difficulty, args.steps, &mut rng)?;
        outcomes[state as usize] += 1;
    }

    println!(
        "Fuzzing completed: {} running, {} won, {} lost.",
        outcomes[SessionState::Running as usize],
        outcomes[SessionState::Won as usize],
        outcomes[SessionState::Lost as usize]
    );
    Ok(())
}

fn play(
    seed: u64,
    difficulty: Difficulty,
    steps: u32,
    rng: &mut ChaCha8Rng,
) -> Result<SessionState> {
    let mut session = Session::new(difficulty, seed);
    let starting_lives = session.lives();
    let entry = session.player();
    if !has_path(session.grid(), entry, session.goal()) {
        bail!("seed {seed} ({difficulty}): goal unreachable from entry");
    }

    let mode = MovementMode::RandomWalk;
    let mut clock_ms = 0;
    for _ in 0..steps {
        match rng.next_u64() % 4 {
            0 => {
                clock_ms += 250;
                session.tick(clock_ms)?;
            }
            1 => session.advance_adversaries()?,
            _ => {
                let pressed = choose(rng, &Direction::ALL);
                if let Some((dx, dy)) = mode.resolve(pressed, rng) {
                    session.move_player(dx, dy)?;
                }
            }
        }

        check_invariants(&session, starting_lives)
            .map_err(|err| anyhow::anyhow!("seed {seed} ({difficulty}): {err}"))?;
        if session.state().is_terminal() {
            break;
        }
    }

    Ok(session.state())
}

fn check_invariants(session: &Session, starting_lives: u32) -> Result<()> {
    let grid = session.grid();
    if !grid.is_open(session.player()) {
        bail!("player inside a wall at {:?}", session.player());
    }
    if session.lives() > starting_lives {
        bail!("lives grew from {starting_lives} to {}", session.lives());
    }

    let mut seen: HashSet<Pos> = HashSet::new();
    for (_, adversary) in session.adversaries() {
        if !grid.is_open(adversary.pos) {
            bail!("adversary inside a wall at {:?}", adversary.pos);
        }
        if !seen.insert(adversary.pos) {
            bail!("two adversaries share {:?}", adversary.pos);
        }
    }

    let lost = starting_lives - session.lives();
    let triggered = session.traps().filter(|(_, trap)| trap.triggered).count() as u32;
    if triggered > lost {
        bail!("{triggered} triggered traps but only {lost} lives lost");
    }

    match session.state() {
        SessionState::Won if session.player() != session.goal() => {
            bail!("won away from the goal")
        }
        SessionState::Running if session.lives() == 0 => bail!("running with no lives"),
        SessionState::Running if session.player() == session.goal() => {
            bail!("standing on the goal without winning")
        }
        _ => Ok(()),
    }
}
