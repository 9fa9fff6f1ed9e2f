//! Session phase transitions
//!
//! One pure table maps (phase, trigger) to the next phase plus the side
//! effects the owner must apply. Presentation never decides transitions.

use super::state::Phase;

/// Discrete commands from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Help,
    Ranking,
    ConfirmName,
    /// Escape: back to the menu, or quit from the menu
    Exit,
}

/// Anything that can move the session to another phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Command(Command),
    /// A ghost caught the player (lives already decremented)
    PlayerCaught { lives_left: u8 },
    /// Every pickup on the board is gone
    LevelCleared { final_level: bool },
    /// Countdown, death animation or banner finished
    TimerElapsed,
}

/// Side effects requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Reset score, lives, level and board
    NewGame,
    /// Keep score and lives, next level, fresh board
    NextLevel,
    ResetPositions,
    /// Push the run into the high score table
    CommitScore,
    PauseClock,
    ResumeClock,
    /// Hold the accumulator negative for the ready countdown
    LeadIn,
    BeginNameEntry,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: Phase,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(next: Phase) -> Self {
        Self {
            next,
            effects: Vec::new(),
        }
    }

    fn with(next: Phase, effects: &[Effect]) -> Self {
        Self {
            next,
            effects: effects.to_vec(),
        }
    }
}

/// Look up the transition for `trigger` in `phase`.
///
/// `name_ready` guards name confirmation. Returns None when the trigger means
/// nothing in this phase.
pub fn transition(phase: Phase, trigger: Trigger, name_ready: bool) -> Option<Transition> {
    use Command::*;
    use Effect::*;

    let t = match (phase, trigger) {
        (Phase::Menu, Trigger::Command(Start)) => Transition::with(Phase::EnterName, &[BeginNameEntry]),
        (Phase::Menu, Trigger::Command(Help)) => Transition::to(Phase::Help),
        (Phase::Menu, Trigger::Command(Ranking)) => Transition::to(Phase::Ranking),
        (Phase::Menu, Trigger::Command(Exit)) => Transition::with(Phase::Menu, &[Quit]),

        (Phase::EnterName, Trigger::Command(ConfirmName)) if name_ready => {
            Transition::with(Phase::StartLevel, &[NewGame, LeadIn])
        }
        (Phase::EnterName, Trigger::Command(Exit)) => Transition::with(Phase::Menu, &[BeginNameEntry]),

        (Phase::StartLevel, Trigger::TimerElapsed) => Transition::to(Phase::Playing),

        (Phase::Playing, Trigger::Command(Pause)) => Transition::with(Phase::Paused, &[PauseClock]),
        (Phase::Playing, Trigger::PlayerCaught { lives_left: 0 }) => {
            Transition::with(Phase::GameOver, &[CommitScore])
        }
        (Phase::Playing, Trigger::PlayerCaught { .. }) => Transition::to(Phase::LifeLost),
        (Phase::Playing, Trigger::LevelCleared { final_level: true }) => {
            Transition::with(Phase::GameComplete, &[CommitScore])
        }
        (Phase::Playing, Trigger::LevelCleared { final_level: false }) => {
            Transition::with(Phase::StartLevel, &[NextLevel, LeadIn])
        }

        (Phase::Paused, Trigger::Command(Resume)) => Transition::with(Phase::Playing, &[ResumeClock]),
        (Phase::Paused, Trigger::Command(Exit)) => Transition::with(Phase::Menu, &[CommitScore]),

        (Phase::LifeLost, Trigger::TimerElapsed) => {
            Transition::with(Phase::StartLevel, &[ResetPositions, LeadIn])
        }
        (Phase::GameOver | Phase::GameComplete, Trigger::TimerElapsed) => Transition::to(Phase::Menu),

        (Phase::Help | Phase::Ranking, Trigger::Command(Exit)) => Transition::to(Phase::Menu),

        _ => return None,
    };
    Some(t)
}
