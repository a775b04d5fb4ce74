mod frame_input;
mod game_layout;
mod ui_render;
mod ui_text;
mod window_config;

use std::io;

use clap::Parser;
use macroquad::prelude::*;
use taffy::TaffyTree;
use tracing_subscriber::EnvFilter;
use treasure_app::app_loop::AppState;
use treasure_app::history_store::{AppHistory, unix_millis_now};
use treasure_app::launch::LaunchArgs;
use treasure_app::seed::{SeedChoice, generate_runtime_seed};
use treasure_core::{GameResult, Session};

use crate::frame_input::capture_frame_input;
use crate::game_layout::{compute_frame_layout, setup_layout};
use crate::ui_render::{FrameContext, draw_frame};
use crate::window_config::build_window_conf;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

struct RunningGame {
    seed: SeedChoice,
    session: Session,
    app_state: AppState,
    started_at: f64,
}

impl RunningGame {
    fn start(args: &LaunchArgs, seed: SeedChoice) -> Self {
        tracing::info!(seed = seed.value(), difficulty = %args.difficulty, "starting board");
        Self {
            seed,
            session: Session::new(args.difficulty, seed.value()),
            app_state: AppState::new(seed.value()),
            started_at: get_time(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        ((get_time() - self.started_at) * 1000.0).max(0.0) as u64
    }
}

#[macroquad::main(build_window_conf)]
async fn main() {
    init_tracing();
    let args = LaunchArgs::parse();

    let history_path = args.history_path();
    let mut history = AppHistory::open(history_path.as_deref());
    let mut recent_results = history.fetch(&args.player);

    let mut taffy = TaffyTree::new();
    let nodes = match setup_layout(&mut taffy) {
        Ok(nodes) => nodes,
        Err(err) => {
            tracing::error!(%err, "failed to build panel layout");
            return;
        }
    };

    let mut game = RunningGame::start(&args, args.seed_choice());

    loop {
        let input = capture_frame_input();
        if input.new_game && game.app_state.is_finished() {
            game = RunningGame::start(&args, SeedChoice::Generated(generate_runtime_seed()));
        }

        let now_ms = game.elapsed_ms();
        if let Some(report) = game.app_state.tick(&mut game.session, &input.keys_pressed, now_ms) {
            let result = GameResult::from_report(&args.player, &report, unix_millis_now());
            history.record(&result);
            recent_results = history.fetch(&args.player);
        }

        clear_background(BLACK);
        match compute_frame_layout(&mut taffy, &nodes, screen_width(), screen_height()) {
            Ok(layout) => draw_frame(
                &FrameContext {
                    session: &game.session,
                    app_state: &game.app_state,
                    player: &args.player,
                    history: &recent_results,
                    run_seed: game.seed.value(),
                },
                &layout,
            ),
            Err(err) => tracing::error!(%err, "failed to compute panel layout"),
        }

        next_frame().await
    }
}
