//! Maze Chase - headless demo entry point
//!
//! Usage: `maze-chase [settings.json]`
//!
//! Plays one autopiloted run on a simulated clock, prints the final screen
//! and the high score table.

use std::path::Path;

use maze_chase::audio::{AudioMixer, LogSink};
use maze_chase::consts::TICK_MS;
use maze_chase::input::Intent;
use maze_chase::persistence::ScoreStore;
use maze_chase::renderer::{draw, text::ranking_table};
use maze_chase::sim::{Command, Phase};
use maze_chase::{Game, Settings};

/// Name the demo run is recorded under
const DEMO_NAME: &str = "DEMO";

fn run(settings: &Settings) {
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);

    let store = ScoreStore::new(&settings.scores_path);
    log::info!("High scores file: {}", store.path().display());
    let mut game = Game::with_store(seed, store);
    game.set_autopilot(true);
    let mut mixer = AudioMixer::from_settings(LogSink, settings);

    let mut now: u64 = 0;
    game.frame(now);
    game.handle(Intent::Command(Command::Start), now);
    for c in DEMO_NAME.chars() {
        game.handle(Intent::Char(c), now);
    }
    game.handle(Intent::Command(Command::ConfirmName), now);

    let end = u64::from(settings.demo_seconds) * 1000;
    let mut last_screen = draw(&game);
    while now < end && game.is_running() {
        now += TICK_MS as u64;
        game.frame(now);
        game.present_frame();
        for event in game.drain_events() {
            mixer.notify(&event, now);
        }
        if game.state().phase == Phase::Menu {
            break;
        }
        last_screen = draw(&game);
    }

    // Out of time mid-run: settle back into play, then quit through pause so
    // the score is kept
    while matches!(game.state().phase, Phase::LifeLost | Phase::StartLevel) {
        now += TICK_MS as u64;
        game.frame(now);
    }
    if game.state().phase == Phase::Playing {
        game.handle(Intent::Command(Command::Pause), now);
        game.handle(Intent::Command(Command::Exit), now);
    }

    println!("{}", last_screen);
    println!("HIGH SCORES");
    print!("{}", ranking_table(game.scores()));
}

fn main() {
    env_logger::init();
    log::info!("Maze Chase starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    run(&settings);
}
