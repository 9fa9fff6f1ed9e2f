//! Session owner and fixed-timestep driver
//!
//! [`Game`] owns the state, the clock, the score table and the name buffer.
//! The platform feeds it timestamps through [`Game::frame`] and input through
//! [`Game::handle`]; everything else happens here.

use crate::clock::FixedClock;
use crate::consts::{COUNTDOWN_MS, MAX_SUBSTEPS};
use crate::highscores::HighScores;
use crate::input::{Intent, NameEntry};
use crate::persistence::ScoreStore;
use crate::sim::{Command, Effect, GameEvent, GameState, Phase, TickInput, Trigger, tick, transition};

pub struct Game {
    state: GameState,
    clock: FixedClock,
    scores: HighScores,
    name: NameEntry,
    /// Input buffered for the next tick
    pending: TickInput,
    autopilot: bool,
    running: bool,
    store: Option<ScoreStore>,
}

impl Game {
    /// Game with an in-memory score table
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            clock: FixedClock::new(),
            scores: HighScores::new(),
            name: NameEntry::new(),
            pending: TickInput::default(),
            autopilot: false,
            running: true,
            store: None,
        }
    }

    /// Game whose score table is loaded from and saved to `store`
    pub fn with_store(seed: u64, store: ScoreStore) -> Self {
        let mut game = Self::new(seed);
        game.scores = store.load();
        game.store = Some(store);
        game
    }

    /// Let the game steer the player
    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    /// Name typed so far
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// False once the player quit from the menu
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ready countdown left before play starts
    pub fn countdown_ms(&self) -> i64 {
        if self.state.phase == Phase::StartLevel {
            self.clock.lead_in_remaining_ms()
        } else {
            0
        }
    }

    /// Advance to wall-clock time `now_ms`. Returns the number of ticks run.
    pub fn frame(&mut self, now_ms: u64) -> usize {
        let delta = self.clock.advance(now_ms);

        match self.state.phase {
            Phase::Playing => {
                self.clock.accumulate(delta);
                self.run_ticks(now_ms)
            }
            // Paused time is given back on resume
            Phase::Paused => {
                self.clock.accumulate(delta);
                0
            }
            Phase::StartLevel => {
                self.clock.accumulate(delta);
                if self.clock.accumulator_ms() < 0 {
                    return 0;
                }
                self.apply(Trigger::TimerElapsed, now_ms);
                self.run_ticks(now_ms)
            }
            Phase::LifeLost | Phase::GameOver | Phase::GameComplete => {
                let delta = i32::try_from(delta).unwrap_or(i32::MAX);
                self.state.phase_timer_ms = self.state.phase_timer_ms.saturating_sub(delta);
                if self.state.phase_timer_ms <= 0 {
                    self.apply(Trigger::TimerElapsed, now_ms);
                }
                0
            }
            Phase::Menu | Phase::EnterName | Phase::Help | Phase::Ranking => 0,
        }
    }

    /// Drain whole ticks, stopping as soon as one leaves `Playing`
    fn run_ticks(&mut self, now_ms: u64) -> usize {
        let mut ticks = 0;
        while ticks < MAX_SUBSTEPS && self.state.phase == Phase::Playing && self.clock.try_step() {
            let input = TickInput {
                direction: self.pending.direction.take(),
                autopilot: self.autopilot,
            };
            ticks += 1;
            if let Some(trigger) = tick(&mut self.state, &input) {
                self.apply(trigger, now_ms);
            }
        }
        ticks
    }

    /// Route one input event
    pub fn handle(&mut self, intent: Intent, now_ms: u64) {
        match intent {
            Intent::Move(dir) => {
                if self.state.phase == Phase::Playing {
                    self.pending.direction = Some(dir);
                }
            }
            Intent::Char(c) => {
                if self.state.phase == Phase::EnterName {
                    self.name.push(c);
                }
            }
            Intent::Backspace => {
                if self.state.phase == Phase::EnterName {
                    self.name.backspace();
                }
            }
            Intent::Command(cmd) => {
                self.command(cmd, now_ms);
            }
        }
    }

    /// Issue a command; returns false if it means nothing in this phase
    pub fn command(&mut self, cmd: Command, now_ms: u64) -> bool {
        self.apply(Trigger::Command(cmd), now_ms)
    }

    fn apply(&mut self, trigger: Trigger, now_ms: u64) -> bool {
        let from = self.state.phase;
        let Some(t) = transition(from, trigger, self.name.is_ready()) else {
            return false;
        };

        for effect in &t.effects {
            self.apply_effect(*effect, now_ms);
        }
        self.state.enter(t.next);

        match t.next {
            Phase::StartLevel => {
                let level = self.state.level;
                self.state.events.push(GameEvent::LevelStarted { level });
            }
            Phase::GameOver => {
                let score = self.state.score;
                self.state.events.push(GameEvent::GameOver { score });
            }
            Phase::GameComplete => {
                let score = self.state.score;
                self.state.events.push(GameEvent::GameComplete { score });
            }
            _ => {}
        }

        if from != t.next {
            log::info!("{:?} -> {:?}", from, t.next);
        }
        true
    }

    fn apply_effect(&mut self, effect: Effect, now_ms: u64) {
        match effect {
            Effect::NewGame => self.state.new_game(),
            Effect::NextLevel => self.state.next_level(),
            Effect::ResetPositions => self.state.reset_positions(),
            Effect::CommitScore => self.commit_score(),
            Effect::PauseClock => self.clock.begin_pause(now_ms),
            Effect::ResumeClock => self.clock.resume(now_ms),
            Effect::LeadIn => self.clock.lead_in(COUNTDOWN_MS),
            Effect::BeginNameEntry => self.name.clear(),
            Effect::Quit => {
                log::info!("Quit requested");
                self.running = false;
            }
        }
    }

    fn commit_score(&mut self) {
        let name = self.name.take();
        let score = self.state.score;
        let Some(rank) = self.scores.add_score(&name, score) else {
            log::info!("{} scored {} (not ranked)", name, score);
            return;
        };
        log::info!("{} scored {} (rank {})", name, score, rank);

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.scores) {
                log::warn!("Failed to save high scores: {e}");
            }
        }
    }

    /// Call once per presented frame
    pub fn present_frame(&mut self) {
        self.state.toggle_player_phase();
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Direction, Tile};
    use glam::IVec2;

    const START: u64 = 1_000;
    /// Wall-clock time at which the first countdown ends
    const PLAY_AT: u64 = START + COUNTDOWN_MS as u64;

    fn type_name(game: &mut Game, name: &str) {
        for c in name.chars() {
            game.handle(Intent::Char(c), START);
        }
    }

    /// A game that has just entered `Playing` at `PLAY_AT` with an empty accumulator
    fn playing_game() -> Game {
        let mut game = Game::new(9);
        game.frame(START);
        assert!(game.command(Command::Start, START));
        type_name(&mut game, "AB");
        assert!(game.command(Command::ConfirmName, START));
        game.frame(PLAY_AT);
        assert_eq!(game.state.phase, Phase::Playing);
        for ghost in &mut game.state.ghosts {
            ghost.move_timer = i32::MIN / 2;
        }
        game.state.player.move_timer = i32::MIN / 2;
        game.drain_events();
        game
    }

    #[test]
    fn test_countdown_then_play() {
        let mut game = Game::new(3);
        game.frame(START);
        game.command(Command::Start, START);
        assert_eq!(game.state.phase, Phase::EnterName);

        // Empty name can't be confirmed
        assert!(!game.command(Command::ConfirmName, START));
        type_name(&mut game, "AB");
        assert!(game.command(Command::ConfirmName, START));
        assert_eq!(game.state.phase, Phase::StartLevel);
        assert_eq!(game.countdown_ms(), COUNTDOWN_MS as i64);

        assert_eq!(game.frame(PLAY_AT - 10), 0);
        assert_eq!(game.state.phase, Phase::StartLevel);
        assert_eq!(game.frame(PLAY_AT + 10), 0);
        assert_eq!(game.state.phase, Phase::Playing);
        assert_eq!(game.frame(PLAY_AT + 42), 2);
        assert_eq!(game.state.time_ticks, 2);
    }

    #[test]
    fn test_last_life_ends_run_and_commits() {
        let mut game = playing_game();
        game.state.lives = 1;
        game.state.score = 500;
        game.state.ghosts[0].pos = game.state.player.pos;

        // Several ticks are due but the capture stops the drain
        assert_eq!(game.frame(PLAY_AT + 5 * TICK_MS as u64), 1);
        assert_eq!(game.state.phase, Phase::GameOver);
        assert_eq!(game.scores().entries[0].name, "AB");
        assert_eq!(game.scores().entries[0].score, 500);
        assert_eq!(game.name(), "");
        assert!(game.drain_events().contains(&GameEvent::GameOver { score: 500 }));

        // Banner runs on wall-clock time
        game.frame(PLAY_AT + 5 * TICK_MS as u64 + BANNER_MS as u64);
        assert_eq!(game.state.phase, Phase::Menu);
    }

    #[test]
    fn test_life_loss_keeps_board() {
        let mut game = playing_game();
        game.state.grid.set_tile(1, 1, Tile::Empty);
        game.state.player.pos = IVec2::new(6, 5);
        game.state.ghosts[2].pos = IVec2::new(6, 5);
        game.state.score = 340;

        let t = PLAY_AT + TICK_MS as u64;
        game.frame(t);
        assert_eq!(game.state.phase, Phase::LifeLost);
        assert_eq!(game.state.lives, START_LIVES - 1);
        assert_eq!(game.state.score, 340);
        assert!(game.scores().is_empty());

        game.frame(t + DEATH_ANIMATION_MS as u64 - 1);
        assert_eq!(game.state.phase, Phase::LifeLost);
        game.frame(t + DEATH_ANIMATION_MS as u64);
        assert_eq!(game.state.phase, Phase::StartLevel);
        assert_eq!(game.state.player.pos, PLAYER_START);
        assert_eq!(game.state.grid.tile_at(1, 1), Tile::Empty);
        assert_eq!(game.state.score, 340);
        assert_eq!(game.countdown_ms(), COUNTDOWN_MS as i64);
    }

    #[test]
    fn test_pause_does_not_bank_ticks() {
        let mut game = playing_game();
        assert_eq!(game.frame(PLAY_AT + 8), 0);
        assert!(game.command(Command::Pause, PLAY_AT + 8));

        assert_eq!(game.frame(PLAY_AT + 2_008), 0);
        assert_eq!(game.state.time_ticks, 0);
        assert!(game.command(Command::Resume, PLAY_AT + 2_008));

        // Only the 8 ms from before the pause carried over
        assert_eq!(game.frame(PLAY_AT + 2_016), 1);
        assert_eq!(game.state.time_ticks, 1);
    }

    #[test]
    fn test_stall_is_caught_up_a_few_ticks_per_frame() {
        let mut game = playing_game();
        assert_eq!(game.frame(PLAY_AT + 1_000), MAX_SUBSTEPS);
        assert_eq!(game.state.time_ticks, MAX_SUBSTEPS as u64);

        // Backlog carries over instead of being dropped
        assert_eq!(game.frame(PLAY_AT + 1_000), MAX_SUBSTEPS);
        assert_eq!(game.state.time_ticks, 2 * MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_quit_from_pause_commits() {
        let mut game = playing_game();
        game.state.score = 70;
        game.command(Command::Pause, PLAY_AT);
        assert!(game.command(Command::Exit, PLAY_AT));
        assert_eq!(game.state.phase, Phase::Menu);
        assert_eq!(game.scores().top_score(), Some(70));
    }

    #[test]
    fn test_cleared_board_starts_next_level() {
        let mut game = playing_game();
        game.state.dots_eaten = TOTAL_PICKUPS - 1;
        game.state.lives = 2;
        game.state.player.pos = IVec2::new(1, 5);
        game.state.player.dir = Direction::Right;
        game.state.player.move_timer = PLAYER_PERIOD_MS - TICK_MS;

        assert_eq!(game.frame(PLAY_AT + 3 * TICK_MS as u64), 1);
        assert_eq!(game.state.phase, Phase::StartLevel);
        assert_eq!(game.state.level, 2);
        assert_eq!(game.state.lives, 2);
        assert_eq!(game.state.dots_eaten, 0);
        assert_eq!(game.countdown_ms(), COUNTDOWN_MS as i64);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::LevelWon { level: 1 }));
        assert!(events.contains(&GameEvent::LevelStarted { level: 2 }));
    }

    #[test]
    fn test_final_level_completes_run() {
        let mut game = playing_game();
        game.state.level = MAX_LEVEL;
        game.state.dots_eaten = TOTAL_PICKUPS - 1;
        game.state.player.pos = IVec2::new(1, 5);
        game.state.player.dir = Direction::Right;
        game.state.player.move_timer = PLAYER_PERIOD_MS - TICK_MS;

        game.frame(PLAY_AT + TICK_MS as u64);
        assert_eq!(game.state.phase, Phase::GameComplete);
        assert_eq!(game.scores().len(), 1);
    }

    #[test]
    fn test_move_intent_only_while_playing() {
        let mut game = Game::new(1);
        game.handle(Intent::Move(Direction::Left), 0);
        assert!(game.pending.direction.is_none());

        let mut game = playing_game();
        game.handle(Intent::Move(Direction::Left), PLAY_AT);
        game.frame(PLAY_AT + TICK_MS as u64);
        assert_eq!(game.state.player.dir, Direction::Left);
        assert!(game.pending.direction.is_none());
    }

    #[test]
    fn test_name_entry_flow() {
        let mut game = Game::new(1);
        // Typing outside name entry is ignored
        game.handle(Intent::Char('Z'), 0);
        assert_eq!(game.name(), "");

        game.command(Command::Start, 0);
        type_name(&mut game, "Al-1");
        assert_eq!(game.name(), "Al1");
        game.handle(Intent::Backspace, 0);
        assert_eq!(game.name(), "Al");

        // Backing out to the menu forgets the name
        game.handle(Intent::Command(Command::Exit), 0);
        assert_eq!(game.state.phase, Phase::Menu);
        game.command(Command::Start, 0);
        assert_eq!(game.name(), "");
    }

    #[test]
    fn test_exit_from_menu_quits() {
        let mut game = Game::new(1);
        assert!(game.is_running());
        game.command(Command::Help, 0);
        game.command(Command::Exit, 0);
        assert!(game.is_running());
        game.command(Command::Exit, 0);
        assert!(!game.is_running());
    }

    #[test]
    fn test_present_frame_toggles_player_phase() {
        let mut game = Game::new(1);
        let before = game.state().player.scared;
        game.present_frame();
        assert_ne!(game.state().player.scared, before);
    }
}
